//! Unified error handling.
//!
//! Every failure reported by the store is carried unchanged in
//! [`AppError::Store`]. Absent records on plain reads are not errors.

use domain::DomainError;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Validation
    #[error("{0}")]
    Validation(String),

    // Store errors
    #[cfg(feature = "database")]
    #[error("Store error: {0}")]
    Store(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable error code for logs and CLI output
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            #[cfg(feature = "database")]
            AppError::Store(_) => "STORE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True when the error came from the store
    pub fn is_store(&self) -> bool {
        #[cfg(feature = "database")]
        {
            matches!(self, AppError::Store(_))
        }
        #[cfg(not(feature = "database"))]
        {
            false
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::Password(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_validation_maps_to_validation() {
        let err = AppError::from(DomainError::validation("Page size must be greater than zero"));
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.to_string(), "Page size must be greater than zero");
    }

    #[test]
    fn test_domain_password_maps_to_internal() {
        let err = AppError::from(DomainError::password("Invalid salt"));
        assert!(matches!(err, AppError::Internal(_)));
        assert!(!err.is_store());
    }

    #[test]
    fn test_ok_or_not_found() {
        let missing: Option<u8> = None;
        assert!(matches!(missing.ok_or_not_found(), Err(AppError::NotFound)));
        assert_eq!(Some(7).ok_or_not_found().unwrap(), 7);
    }

    #[cfg(feature = "database")]
    #[test]
    fn test_store_error_wraps_db_err() {
        let err = AppError::from(sea_orm::DbErr::Custom("connection reset".to_string()));
        assert!(err.is_store());
        assert_eq!(err.code(), "STORE_ERROR");
        assert!(err.to_string().contains("connection reset"));
    }
}
