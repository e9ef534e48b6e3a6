//! Regression status from the runner's free-text summary
//!
//! The regression runner writes `tests/regression/results/summary.txt` next
//! to the project directory. Only substring content is interpreted, and the
//! success phrase always wins over any mention of failure.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::artifact::ArtifactRead;

/// Phrase the runner writes when every regression test passed
pub const SUCCESS_PHRASE: &str = "All tests completed successfully";

/// Matched case-insensitively, after the success phrase
const FAILURE_MARKER: &str = "failed";

/// Classification of the regression summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegressionStatus {
    Passing,
    Failed,
    CompletedWithIssues,
    NotYetRun,
    ReadError,
}

impl RegressionStatus {
    /// Visual marker shown before the message
    pub fn marker(&self) -> &'static str {
        match self {
            RegressionStatus::Passing => "✅",
            RegressionStatus::Failed => "❌",
            RegressionStatus::CompletedWithIssues => "⚠️",
            RegressionStatus::NotYetRun => "⏳",
            RegressionStatus::ReadError => "⚠️",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RegressionStatus::Passing => "Regression tests passing",
            RegressionStatus::Failed => "Regression tests failed",
            RegressionStatus::CompletedWithIssues => "Regression tests completed with issues",
            RegressionStatus::NotYetRun => "No regression tests run yet",
            RegressionStatus::ReadError => "Could not read regression results",
        }
    }

    pub fn is_passing(&self) -> bool {
        matches!(self, RegressionStatus::Passing)
    }
}

impl fmt::Display for RegressionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.marker(), self.message())
    }
}

/// Path of the regression summary for a project
///
/// The results live beside the project, under its parent directory. A path
/// without a parent is used as its own parent.
pub fn regression_summary_path(project_dir: impl AsRef<Path>) -> PathBuf {
    let project_dir = project_dir.as_ref();
    let root = project_dir.parent().unwrap_or(project_dir);
    root.join("tests").join("regression").join("results").join("summary.txt")
}

/// Read the raw regression summary text
pub fn read_regression_summary(project_dir: impl AsRef<Path>) -> ArtifactRead<String> {
    ArtifactRead::read_text(regression_summary_path(project_dir))
}

/// Classify summary content
///
/// Order matters: a summary containing both the success phrase and the word
/// "failed" is still `Passing`.
pub fn classify_summary(content: &str) -> RegressionStatus {
    if content.contains(SUCCESS_PHRASE) {
        RegressionStatus::Passing
    } else if content.to_lowercase().contains(FAILURE_MARKER) {
        RegressionStatus::Failed
    } else {
        RegressionStatus::CompletedWithIssues
    }
}

/// Get the regression test status for a project
///
/// Never fails: a missing summary is `NotYetRun` and an unreadable one is
/// `ReadError`.
pub fn get_regression_status(project_dir: impl AsRef<Path>) -> RegressionStatus {
    let project_dir = project_dir.as_ref();
    debug!(project_dir = %project_dir.display(), "get_regression_status: called");

    let status = match read_regression_summary(project_dir) {
        ArtifactRead::Found(content) => classify_summary(&content),
        ArtifactRead::Missing => RegressionStatus::NotYetRun,
        ArtifactRead::Unreadable(e) | ArtifactRead::Malformed(e) => {
            warn!("Could not read regression summary: {}", e);
            RegressionStatus::ReadError
        }
    };

    debug!(?status, "get_regression_status: classified");
    status
}
