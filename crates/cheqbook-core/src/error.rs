use cheqbook_domain::DateWindowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid date window: {0}")]
    InvalidWindow(String),
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl From<DateWindowError> for CoreError {
    fn from(err: DateWindowError) -> Self {
        CoreError::InvalidWindow(err.to_string())
    }
}
