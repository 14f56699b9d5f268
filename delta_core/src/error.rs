use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum DeltaError {
    #[error("hardware error: {0}")]
    Hardware(String),
    #[error("hardware fault: {0}")]
    HardwareFault(String),
    #[error("actuator link error: {0}")]
    Link(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("timeout waiting for sensor")]
    Timeout,
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("missing actuator")]
    MissingActuator,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    #[error("home position {0:?} is outside the pen-valid workspace")]
    HomeNotReachable([f64; 3]),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
