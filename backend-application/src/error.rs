use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(field: &str, reason: impl Into<String>) -> AppError {
        AppError::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
