use std::sync::Arc;

use crate::config::Config;
use crate::segment::{ExperienceHeuristic, PositionalHeuristic};

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-upload data; every request works on its own buffers.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable experience splitter. Default: PositionalHeuristic.
    pub experience_heuristic: Arc<dyn ExperienceHeuristic>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            experience_heuristic: Arc::new(PositionalHeuristic),
        }
    }
}
