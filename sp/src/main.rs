use std::path::PathBuf;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sessionprogress::cli::{Cli, Command, OutputFormat};
use sessionprogress::config::Config;
use sessionprogress::{
    ProgressSnapshot, count_passing_tests, emit, get_regression_status, pending_features, print_final_status,
    print_progress_summary, print_session_header,
};

/// Logs go to stderr so stdout carries only report text
fn setup_logging(log_level: Option<&str>) -> Result<()> {
    let filter = match log_level {
        Some(level) => {
            let level: tracing::Level = level.parse().context(format!("Invalid log level: {}", level))?;
            EnvFilter::default().add_directive(level.into())
        }
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if !config.color {
        colored::control::set_override(false);
    }

    info!("sp starting");

    let resolve = |dir: Option<PathBuf>| dir.unwrap_or_else(|| config.project_dir.clone());

    match cli.command {
        Command::Header { session, initializer } => {
            print_session_header(session.get(), initializer);
        }
        Command::Summary { project_dir } => {
            print_progress_summary(resolve(project_dir));
        }
        Command::Regression { project_dir } => {
            emit(&format!("{}\n", get_regression_status(resolve(project_dir))));
        }
        Command::Count { project_dir } => {
            let (passing, total) = count_passing_tests(resolve(project_dir));
            emit(&format!("{} {}\n", passing, total));
        }
        Command::Status { project_dir, format } => {
            let snapshot = ProgressSnapshot::capture(resolve(project_dir));
            match format {
                OutputFormat::Json => emit(&format!("{}\n", serde_json::to_string_pretty(&snapshot)?)),
                OutputFormat::Text => emit(&snapshot.to_string()),
            }
        }
        Command::Pending { project_dir, limit } => {
            let pending = pending_features(resolve(project_dir), limit);
            if pending.is_empty() {
                emit("No pending features\n");
            } else {
                let mut out = String::new();
                for (i, feature) in pending.iter().enumerate() {
                    let category = feature.category().unwrap_or("uncategorized");
                    let description = feature.description().unwrap_or("(no description)");
                    out.push_str(&format!(
                        "{} {} {}\n",
                        format!("{:>3}.", i + 1).dimmed(),
                        format!("[{}]", category).yellow(),
                        description
                    ));
                }
                emit(&out);
            }
        }
        Command::Final { project_dir } => {
            print_final_status(resolve(project_dir));
        }
    }

    Ok(())
}
