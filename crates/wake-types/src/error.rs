use thiserror::Error;

#[derive(Error, Debug)]
pub enum WakeError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Physics constraint violated: {0}")]
    PhysicsViolation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("NPZ error: {0}")]
    Npz(String),
}

pub type WakeResult<T> = Result<T, WakeError>;
