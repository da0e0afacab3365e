use thiserror::Error;

#[derive(Error, Debug)]
pub enum PingError {
    #[error("invalid URI: {0}")]
    InvalidTarget(String),

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("cannot resolve server hostname: {0}")]
    UnresolvableHost(String),

    #[error("cannot build request: {0}")]
    Request(String),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl PingError {
    /// Exit code for a run-ending error. Usage errors exit 2 via the
    /// argument parser before any of these are constructed.
    pub fn exit_code(&self) -> i32 {
        match self {
            PingError::Request(_) => 3,
            _ => 1,
        }
    }
}
