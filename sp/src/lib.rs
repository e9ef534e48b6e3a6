//! SessionProgress - progress reporting for session-based coding workflows
//!
//! Answers two questions between agent sessions: are the regression tests
//! passing, and how many tracked features pass. Both answers come from files
//! written by other processes; this crate only reads and formats them.
//!
//! # Layout
//!
//! ```text
//! workspace/
//! ├── project/                  # project_dir
//! │   └── feature_list.json     # [{"passes": true, ...}, ...]
//! └── tests/
//!     └── regression/
//!         └── results/
//!             └── summary.txt   # free-text regression report
//! ```
//!
//! # Example
//!
//! ```ignore
//! use sessionprogress::{count_passing_tests, print_progress_summary, print_session_header};
//!
//! print_session_header(3, false);
//! let (passing, total) = count_passing_tests("project");
//! print_progress_summary("project");
//! ```
//!
//! Nothing is cached. Every call re-reads the filesystem, and no query ever
//! returns an error: missing, unreadable and malformed artifacts all degrade
//! to a default value.

pub mod artifact;
pub mod cli;
pub mod config;
pub mod features;
pub mod regression;
pub mod report;

pub use artifact::{ArtifactError, ArtifactRead};
pub use features::{
    FeatureProgress, FeatureRecord, count_passing_tests, feature_list_path, pending_features, read_feature_list,
};
pub use regression::{
    RegressionStatus, classify_summary, get_regression_status, read_regression_summary, regression_summary_path,
};
pub use report::{
    ProgressSnapshot, SessionKind, emit, emit_to, format_final_status, format_progress_summary,
    format_session_header, print_final_status, print_progress_summary, print_session_header,
};

/// Name of the feature list inside the project directory
pub const FEATURE_LIST_FILE: &str = "feature_list.json";

/// Width of the session banner rule
pub const BANNER_WIDTH: usize = 70;
