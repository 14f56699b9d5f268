use thiserror::Error;

#[derive(Debug, Error)]
pub enum HwError {
    #[error("uart error: {0}")]
    Uart(String),
    #[error("sensor timeout")]
    Timeout,
    #[error("timed out waiting for the tracking sensor to connect")]
    ConnectTimeout,
    #[error("trace error: {0}")]
    Trace(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HwError>;
