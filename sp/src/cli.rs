//! CLI argument parsing for sessionprogress

use clap::{Parser, Subcommand};
use std::num::NonZeroU32;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sp")]
#[command(author, version, about = "Progress reporting for session-based coding workflows", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the banner for a session
    Header {
        /// Session number (starting at 1)
        #[arg(required = true)]
        session: NonZeroU32,

        /// Mark the session as the initializer session
        #[arg(short, long)]
        initializer: bool,
    },

    /// Print feature progress and regression status
    Summary {
        /// Project directory (default: from config)
        project_dir: Option<PathBuf>,
    },

    /// Print the regression test status
    Regression {
        /// Project directory (default: from config)
        project_dir: Option<PathBuf>,
    },

    /// Print passing and total feature counts
    Count {
        /// Project directory (default: from config)
        project_dir: Option<PathBuf>,
    },

    /// Show progress as text or JSON
    Status {
        /// Project directory (default: from config)
        project_dir: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List features that are not passing yet
    Pending {
        /// Project directory (default: from config)
        project_dir: Option<PathBuf>,

        /// Maximum number of features to list
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Print the closing status block
    Final {
        /// Project directory (default: from config)
        project_dir: Option<PathBuf>,
    },
}

/// Output format for the status command
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
