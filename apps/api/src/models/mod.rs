pub mod jobs;
pub mod resume;
