// Error taxonomy for file reporting
// None of these ever reach the host engine; the reporter logs and degrades.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// The run directory is already present at `initialize` time
    #[error("The directory {} does already exist. All logs belonging to this directory will not be saved.", .path.display())]
    RootConflict { path: PathBuf },

    /// A node directory is already present at `initialized` time
    #[error("The directory {} does already exist. All logs belonging to this directory will not be saved.", .path.display())]
    NodeConflict { path: PathBuf },

    #[error("The directory {} could not be created. All logs belonging to this directory will not be saved.", .path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("The file {} could not be created. The logs will not be saved.", .path.display())]
    FileCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("The file {} could not be written to. The logs will not be saved.", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ReportError {
    /// Path the failing operation targeted
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::RootConflict { path }
            | Self::NodeConflict { path }
            | Self::DirectoryCreate { path, .. }
            | Self::FileCreate { path, .. }
            | Self::FileOpen { path, .. } => path,
        }
    }

    /// Conflicts are expected on reruns; everything else is an I/O failure
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::RootConflict { .. } | Self::NodeConflict { .. })
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
