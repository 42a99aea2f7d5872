//! Résumé import service.
//!
//! `ingest` turns an uploaded PDF, DOCX or text file into plain text and
//! `segment` turns that text into a display-ready [`models::ResumeRecord`].
//! The remaining modules host both behind a small axum API.

pub mod config;
pub mod errors;
pub mod ingest;
pub mod models;
pub mod routes;
pub mod segment;
pub mod state;
