//! Reading externally owned artifacts
//!
//! Every artifact read ends in one of four outcomes. Callers decide what a
//! missing file means; unreadable and malformed files are logged and then
//! collapsed into the same default value as a missing one.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while reading an artifact
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected content in {}: {message}", .path.display())]
    Shape { path: PathBuf, message: String },
}

impl ArtifactError {
    /// Path of the artifact that failed
    pub fn path(&self) -> &Path {
        match self {
            ArtifactError::Io { path, .. } => path,
            ArtifactError::Json { path, .. } => path,
            ArtifactError::Shape { path, .. } => path,
        }
    }
}

/// Outcome of reading an artifact from disk
#[derive(Debug)]
pub enum ArtifactRead<T> {
    /// The artifact exists and was read (and parsed) successfully
    Found(T),
    /// The artifact does not exist yet
    Missing,
    /// The artifact exists but could not be read
    Unreadable(ArtifactError),
    /// The artifact was read but its content is not in the expected format
    Malformed(ArtifactError),
}

impl ArtifactRead<String> {
    /// Read a text artifact
    ///
    /// A `NotFound` error maps to `Missing`; every other I/O failure,
    /// including content that is not valid UTF-8, maps to `Unreadable`.
    pub fn read_text(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        debug!(path = %path.display(), "ArtifactRead::read_text: called");
        match fs::read_to_string(path) {
            Ok(content) => ArtifactRead::Found(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "ArtifactRead::read_text: missing");
                ArtifactRead::Missing
            }
            Err(source) => ArtifactRead::Unreadable(ArtifactError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl<T> ArtifactRead<T> {
    /// Parse found content, turning a parse failure into `Malformed`
    pub fn parse<U, F>(self, f: F) -> ArtifactRead<U>
    where
        F: FnOnce(T) -> Result<U, ArtifactError>,
    {
        match self {
            ArtifactRead::Found(value) => match f(value) {
                Ok(parsed) => ArtifactRead::Found(parsed),
                Err(e) => ArtifactRead::Malformed(e),
            },
            ArtifactRead::Missing => ArtifactRead::Missing,
            ArtifactRead::Unreadable(e) => ArtifactRead::Unreadable(e),
            ArtifactRead::Malformed(e) => ArtifactRead::Malformed(e),
        }
    }

    /// Collapse to the found value, logging and discarding any error
    pub fn found(self) -> Option<T> {
        match self {
            ArtifactRead::Found(value) => Some(value),
            ArtifactRead::Missing => None,
            ArtifactRead::Unreadable(e) => {
                warn!("Treating unreadable artifact as absent: {}", e);
                None
            }
            ArtifactRead::Malformed(e) => {
                warn!("Treating malformed artifact as absent: {}", e);
                None
            }
        }
    }

    /// Collapse to the found value or `T::default()`
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.found().unwrap_or_default()
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ArtifactRead::Found(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, ArtifactRead::Missing)
    }
}
