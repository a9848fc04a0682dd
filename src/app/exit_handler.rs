//! Exit code logic for the pdf-finder process.
//!
//! Single responsibility: map the run outcome to the process exit outcome.

use crate::ProcessExit;
use crate::app::orchestrator::{RunOutcome, RunState};

/// Determines the process exit outcome from a finished run.
///
/// Download failures are per-item and recorded in the manifest; only an
/// aborted run (configuration/API/manifest failure or interrupt) exits
/// non-zero.
#[must_use]
pub fn determine_exit_outcome(outcome: &RunOutcome) -> ProcessExit {
    match outcome.state {
        RunState::Completed => ProcessExit::Success,
        RunState::Idle | RunState::Paginating | RunState::Aborted => ProcessExit::Aborted,
    }
}

#[cfg(test)]
mod tests {
    use super::determine_exit_outcome;
    use crate::ProcessExit;
    use crate::app::orchestrator::{RunOutcome, RunState};

    fn outcome(state: RunState, failed: usize) -> RunOutcome {
        RunOutcome {
            state,
            downloaded: 0,
            failed,
            skipped_duplicate: 0,
            skipped_not_pdf: 0,
            abort_reason: None,
        }
    }

    #[test]
    fn test_exit_outcome_success_when_completed() {
        assert_eq!(
            determine_exit_outcome(&outcome(RunState::Completed, 0)),
            ProcessExit::Success
        );
    }

    #[test]
    fn test_exit_outcome_success_despite_item_failures() {
        assert_eq!(
            determine_exit_outcome(&outcome(RunState::Completed, 4)),
            ProcessExit::Success
        );
    }

    #[test]
    fn test_exit_outcome_aborted() {
        assert_eq!(
            determine_exit_outcome(&outcome(RunState::Aborted, 0)),
            ProcessExit::Aborted
        );
    }
}
