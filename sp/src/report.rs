//! Session banners and progress summaries
//!
//! `format_*` functions build the text; `print_*` functions write it to
//! stdout. Printing never fails because neither reader does.

use std::fmt;
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::BANNER_WIDTH;
use crate::features::FeatureProgress;
use crate::regression::{RegressionStatus, get_regression_status};

/// Kind of agent session being started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Initializer,
    CodingAgent,
}

impl SessionKind {
    pub fn from_initializer(is_initializer: bool) -> Self {
        if is_initializer {
            SessionKind::Initializer
        } else {
            SessionKind::CodingAgent
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::Initializer => "INITIALIZER",
            SessionKind::CodingAgent => "CODING AGENT",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Write report text, logging instead of panicking when the writer fails
pub fn emit_to<W: Write>(mut out: W, text: &str) {
    if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
        warn!("Failed to write report output: {}", e);
    }
}

/// Write report text to stdout
///
/// A closed or broken stdout (e.g. a reader that exited early) is logged and
/// otherwise ignored.
pub fn emit(text: &str) {
    emit_to(io::stdout().lock(), text);
}

fn rule() -> String {
    "=".repeat(BANNER_WIDTH)
}

/// Build the banner printed at the start of a session
pub fn format_session_header(session_num: u32, is_initializer: bool) -> String {
    let kind = SessionKind::from_initializer(is_initializer);
    let rule = rule();
    format!("\n{rule}\n  SESSION {session_num}: {kind}\n{rule}\n\n")
}

/// Print the banner for a session
pub fn print_session_header(session_num: u32, is_initializer: bool) {
    debug!(%session_num, %is_initializer, "print_session_header: called");
    emit(&format_session_header(session_num, is_initializer));
}

/// Build the progress summary from already-read values
pub fn format_progress_summary(progress: &FeatureProgress, regression: &RegressionStatus) -> String {
    let progress_line = match progress.percentage() {
        Some(pct) => format!("Progress: {}/{} tests passing ({:.1}%)", progress.passing, progress.total, pct),
        None => "Progress: feature_list.json not yet created".to_string(),
    };
    format!("\n{}\nRegression Status: {}\n", progress_line, regression)
}

/// Print feature progress and regression status for a project
pub fn print_progress_summary(project_dir: impl AsRef<Path>) {
    let project_dir = project_dir.as_ref();
    debug!(project_dir = %project_dir.display(), "print_progress_summary: called");
    let progress = FeatureProgress::load(project_dir);
    let regression = get_regression_status(project_dir);
    emit(&format_progress_summary(&progress, &regression));
}

/// Build the closing block shown when the session driver stops
pub fn format_final_status(progress: &FeatureProgress) -> String {
    let rule = rule();
    let mut out = format!("\n{rule}\n  Runner stopped\n{rule}\n\n");
    if progress.total > 0 {
        out.push_str(&format!("Status: {} / {} tests passing\n", progress.passing, progress.total));
    }
    if progress.all_passing() {
        out.push_str("All features passing\n");
    }
    out
}

/// Print the closing block for a project
pub fn print_final_status(project_dir: impl AsRef<Path>) {
    let progress = FeatureProgress::load(project_dir);
    emit(&format_final_status(&progress));
}

/// Point-in-time view of both artifacts, for machine-readable output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub passing: usize,
    pub total: usize,
    pub percentage: Option<f64>,
    pub regression: RegressionStatus,
    pub regression_message: String,
}

impl ProgressSnapshot {
    /// Read both artifacts now
    pub fn capture(project_dir: impl AsRef<Path>) -> Self {
        let project_dir = project_dir.as_ref();
        Self::from_parts(FeatureProgress::load(project_dir), get_regression_status(project_dir))
    }

    pub fn from_parts(progress: FeatureProgress, regression: RegressionStatus) -> Self {
        Self {
            passing: progress.passing,
            total: progress.total,
            percentage: progress.percentage(),
            regression,
            regression_message: regression.message().to_string(),
        }
    }

    pub fn progress(&self) -> FeatureProgress {
        FeatureProgress::new(self.passing, self.total)
    }

    /// All tracked features pass and the regression suite is green
    pub fn is_complete(&self) -> bool {
        self.progress().all_passing() && self.regression.is_passing()
    }
}

impl fmt::Display for ProgressSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_progress_summary(&self.progress(), &self.regression))
    }
}
