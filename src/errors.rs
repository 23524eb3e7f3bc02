use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Invalid start month '{0}': expected YYYY-MM")]
    InvalidStartMonth(String),

    #[error("Month label out of range: {start} + {offset} months")]
    MonthOutOfRange { start: String, offset: u32 },

    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
