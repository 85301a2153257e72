//! Storage errors.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reading or writing a persisted file.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no cat ids left in '{path}' (highest stored id is {max_id})")]
    IdsExhausted { path: PathBuf, max_id: u32 },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        StoreError::Json {
            path: path.into(),
            source,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            StoreError::Io { path, .. }
            | StoreError::Json { path, .. }
            | StoreError::IdsExhausted { path, .. } => path,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
