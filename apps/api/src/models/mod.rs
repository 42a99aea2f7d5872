pub mod resume;

pub use resume::{Education, Experience, Project, ResumeRecord, SocialLink};
