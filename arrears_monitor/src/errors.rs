use arrears_engine::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorServiceError {
    #[error("Could not initialize the monitor. {0}")]
    InitializeError(String),
    #[error("The monitoring pass could not run. {0}")]
    PassFailed(#[from] StoreError),
    #[error("An I/O error happened in the monitor. {0}")]
    IOError(#[from] std::io::Error),
}
