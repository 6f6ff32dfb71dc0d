use thiserror::Error;

/// Failures while loading a station catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures surfaced by a tracker while persisting its state.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("tracker storage error: {0}")]
    Storage(String),
}
