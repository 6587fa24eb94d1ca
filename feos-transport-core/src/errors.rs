use std::io;
use thiserror::Error;

/// Error type for malformed transport data and improper use of mixing rules.
#[derive(Error, Debug)]
pub enum TransportError {
    // malformed or unrecognized transport data
    #[error("Error parsing transport data: {0}")]
    Configuration(String),

    // mixing rule called without required input
    #[error("Improper use of mixing rule: {0}")]
    Usage(String),

    // mixing rule invoked in a physically invalid way
    #[error("Invalid model evaluation: {0}")]
    Model(String),

    // preconditions on the mixture are violated
    #[error("Invalid mixture: {0}")]
    Validation(String),
    #[error(
        "Mixing rule is initialized for {0} components while the input specifies {1} components."
    )]
    IncompatibleComponents(usize, usize),

    #[error("Operation not supported: {0}")]
    UnsupportedOperation(String),

    // errors related to file handling
    #[error(transparent)]
    FileIO(#[from] io::Error),

    // json errors
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// Convenience type for `Result<T, TransportError>`.
pub type TransportResult<T> = Result<T, TransportError>;
