mod health;
mod info;
mod transcribe;

pub use health::{health_handler, ready_handler};
pub use info::{info_handler, stats_handler};
pub use transcribe::{transcribe_handler, ErrorResponse};
