//! Run orchestration: pagination loop, per-result pipeline, exit mapping.

mod exit_handler;
mod orchestrator;

pub use exit_handler::determine_exit_outcome;
pub use orchestrator::{Orchestrator, RunOutcome, RunState};
