use std::process::ExitCode;

/// Aggregated outcome of a run.
///
/// Non-fatal failures (a file that could not be opened, a read error) are
/// recorded here while processing continues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExitStatus {
    failed: bool,
}

impl ExitStatus {
    pub fn record_failure(&mut self) {
        self.failed = true;
    }

    pub fn is_success(&self) -> bool {
        !self.failed
    }

    pub fn code(&self) -> u8 {
        if self.failed { 1 } else { 0 }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
