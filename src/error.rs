use thiserror::Error;

/// Main error type for the bbload system.
///
/// Nothing in the loader catches or retries: the first error of any
/// variant terminates the run with a non-zero exit, leaving the
/// database in whatever state the last completed statement produced.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Sidecar error: {message}")]
    Sidecar { message: String },

    #[error("Unrecognized in-memory type '{dtype}' for column '{column}'")]
    UnrecognizedType { column: String, dtype: String },

    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl LoadError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn sidecar(message: impl Into<String>) -> Self {
        Self::Sidecar { message: message.into() }
    }
}
