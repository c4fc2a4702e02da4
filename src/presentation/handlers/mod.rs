mod health;
mod run;

pub use health::health_handler;
pub use run::{ErrorResponse, RunRequest, RunResponse, run_handler};
