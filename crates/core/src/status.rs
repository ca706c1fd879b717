//! User-visible status text and the sink it is written to.

use std::fmt::{Display, Formatter};

use crate::actions::ScriptDescriptor;
use crate::error::Error;
use crate::execution::RunResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Neutral,
    Progress,
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

impl Status {
    pub fn neutral(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Neutral,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn progress(descriptor: &ScriptDescriptor) -> Self {
        Self {
            kind: StatusKind::Progress,
            text: descriptor.progress_message.clone(),
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Failure,
            text: text.into(),
        }
    }

    /// Turns a finished run into the text shown to the user.
    ///
    /// Exit code 0 reports the descriptor's success message. Otherwise the
    /// first line the script printed is the diagnostic, falling back to the
    /// exit code itself.
    #[must_use]
    pub fn from_run_result(descriptor: &ScriptDescriptor, result: &RunResult) -> Self {
        if result.succeeded() {
            return Self {
                kind: StatusKind::Success,
                text: descriptor.success_message.clone(),
            };
        }

        match &result.first_output_line {
            Some(line) => Self::failure(format!("Failed execution with status: {line}")),
            None => Self::failure(format!(
                "Failed execution with status code: {}",
                result.exit_code
            )),
        }
    }

    #[must_use]
    pub fn from_outcome(
        descriptor: &ScriptDescriptor,
        outcome: &std::result::Result<RunResult, Error>,
    ) -> Self {
        match outcome {
            Ok(result) => Self::from_run_result(descriptor, result),
            Err(e) => Self::failure(format!("Failed to start generation script: {e}")),
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.kind == StatusKind::Failure
    }
}

impl Display for Status {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.text)
    }
}

/// Label-like target for status updates and the trigger controls' enabled state.
///
/// Only ever called from the thread that owns the [`crate::dispatch::Dispatcher`].
pub trait StatusSink {
    fn show_status(&mut self, status: &Status);

    fn set_controls_enabled(&mut self, enabled: bool);
}

/// Sink that remembers everything it was told. Handy for tests and for
/// callers that only want the final status.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub statuses: Vec<Status>,
    pub controls_enabled: Vec<bool>,
}

impl RecordingSink {
    #[must_use]
    pub fn last_status(&self) -> Option<&Status> {
        self.statuses.last()
    }
}

impl StatusSink for RecordingSink {
    fn show_status(&mut self, status: &Status) {
        self.statuses.push(status.clone());
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled.push(enabled);
    }
}
