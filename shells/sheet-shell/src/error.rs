use std::path::Path;
use thiserror::Error;
use tube_core::TrackerError;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("failed to open sheet {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SheetError {
    pub(crate) fn open(path: &Path, source: csv::Error) -> Self {
        SheetError::Open {
            path: path.display().to_string(),
            source,
        }
    }
}

impl From<SheetError> for TrackerError {
    fn from(err: SheetError) -> Self {
        match err {
            SheetError::Io(io) => TrackerError::Io(io),
            other => TrackerError::Storage(other.to_string()),
        }
    }
}
