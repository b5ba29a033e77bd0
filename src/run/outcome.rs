// src/run/outcome.rs

//! Exit-code classification for the supervised test command.

/// Exit code pytest uses for a fully passing run.
pub const EXIT_OK: i32 = 0;

/// Exit code pytest uses when a run was interrupted.
pub const EXIT_INTERRUPTED: i32 = 2;

/// Exit code pytest uses when no tests were collected.
pub const EXIT_NOTESTSCOLLECTED: i32 = 5;

/// What a finished run means for hook dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Passed,
    Failed,
    Interrupted,
    /// The runner matched zero tests. Treated as a pass so that an
    /// over-narrow filter neither beeps nor fires failure hooks.
    NoTestsCollected,
}

impl RunOutcome {
    pub fn from_exit_code(code: i32) -> Self {
        match code {
            EXIT_OK => RunOutcome::Passed,
            EXIT_INTERRUPTED => RunOutcome::Interrupted,
            EXIT_NOTESTSCOLLECTED => RunOutcome::NoTestsCollected,
            _ => RunOutcome::Failed,
        }
    }

    /// The pass/fail collapse used when picking which hook to fire.
    pub fn is_pass(self) -> bool {
        matches!(self, RunOutcome::Passed | RunOutcome::NoTestsCollected)
    }
}
