use cadence_fs::DirectoryError;
use std::io;
use std::path::PathBuf;

/// The failure categories reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SourceUnavailable,
    ImageUnavailable,
    DirectoryFull,
    InvalidName,
    NotFound,
}

#[derive(Debug, thiserror::Error)]
pub enum InjectError {
    #[error("source unavailable: {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("image unavailable: {}: {source}", .path.display())]
    ImageUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("image I/O error: {0}")]
    ImageIo(#[from] io::Error),

    #[error("image of {sectors} sectors cannot hold the file table, need at least {min}")]
    ImageTooSmall { sectors: u32, min: u32 },

    #[error("no empty slots in file table for {name:?}")]
    DirectoryFull { name: String },

    #[error("invalid file name {name:?}: {reason}")]
    InvalidName { name: String, reason: DirectoryError },

    #[error("{0:?} is not in the file table")]
    NotFound(String),
}

impl InjectError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
            Self::ImageUnavailable { .. } | Self::ImageIo(_) | Self::ImageTooSmall { .. } => {
                ErrorKind::ImageUnavailable
            }
            Self::DirectoryFull { .. } => ErrorKind::DirectoryFull,
            Self::InvalidName { .. } => ErrorKind::InvalidName,
            Self::NotFound(_) => ErrorKind::NotFound,
        }
    }

    pub(crate) fn from_directory(name: &str, err: DirectoryError) -> Self {
        match err {
            DirectoryError::Full => Self::DirectoryFull { name: name.to_owned() },
            reason => Self::InvalidName {
                name: name.to_owned(),
                reason,
            },
        }
    }
}
