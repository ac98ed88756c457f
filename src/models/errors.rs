//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code so it can be grepped in logs.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - FETCH_xxx: product fetch errors (the single "fetch failed" class)
//! - API_xxx: catalog API errors
//! - INVENTORY_xxx: stock bookkeeping errors
//! - STORAGE_xxx: catalog database errors
//! - CFG_xxx: configuration errors

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Fetch Errors
    // ============================================
    /// Could not connect to the products endpoint
    FetchConnectionFailed,
    /// Transport deadline fired
    FetchTimeout,
    /// Status outside 200-299
    FetchBadStatus,
    /// Body is not JSON
    FetchInvalidBody,
    /// Any other transport failure
    FetchFailed,

    // ============================================
    // API Errors
    // ============================================
    /// Invalid request
    ApiBadRequest,
    /// Resource not found
    ApiNotFound,
    /// Resource already exists
    ApiConflict,

    // ============================================
    // Inventory Errors
    // ============================================
    /// Not enough stock to subtract
    InventoryInsufficient,

    // ============================================
    // Storage Errors
    // ============================================
    /// Could not reach the catalog database
    StorageUnavailable,
    /// A catalog query failed
    StorageQueryFailed,

    // ============================================
    // Configuration Errors
    // ============================================
    /// Invalid configuration value
    ConfigInvalidValue,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FetchConnectionFailed => "FETCH_CONNECTION_FAILED",
            Self::FetchTimeout => "FETCH_TIMEOUT",
            Self::FetchBadStatus => "FETCH_BAD_STATUS",
            Self::FetchInvalidBody => "FETCH_INVALID_BODY",
            Self::FetchFailed => "FETCH_FAILED",

            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::ApiNotFound => "API_NOT_FOUND",
            Self::ApiConflict => "API_CONFLICT",

            Self::InventoryInsufficient => "INVENTORY_INSUFFICIENT",

            Self::StorageUnavailable => "STORAGE_UNAVAILABLE",
            Self::StorageQueryFailed => "STORAGE_QUERY_FAILED",

            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ApiBadRequest | Self::ConfigInvalidValue => 400,
            Self::ApiNotFound => 404,
            Self::ApiConflict | Self::InventoryInsufficient => 409,
            Self::FetchBadStatus | Self::FetchInvalidBody | Self::FetchConnectionFailed => 502,
            Self::FetchTimeout => 504,
            Self::StorageUnavailable => 503,
            _ => 500,
        }
    }

    /// True for every member of the "fetch failed" class
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::FetchConnectionFailed
                | Self::FetchTimeout
                | Self::FetchBadStatus
                | Self::FetchInvalidBody
                | Self::FetchFailed
        )
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Products endpoint answered with a non-success status
    pub fn bad_status(status: u16, url: &str) -> Self {
        Self::new(
            ErrorCode::FetchBadStatus,
            format!("GET {} returned HTTP {}", url, status),
        )
    }

    /// API bad request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }

    /// Resource not found
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiNotFound, msg)
    }

    /// Resource already exists
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiConflict, msg)
    }

    /// Stock too low for the requested decrease
    pub fn insufficient_quantity(name: &str, available: i64, requested: i64) -> Self {
        Self::new(
            ErrorCode::InventoryInsufficient,
            format!(
                "Not enough quantity to decrease '{}': have {}, asked for {}",
                name, available, requested
            ),
        )
    }

    /// Invalid configuration value
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalidValue, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::with_source(ErrorCode::StorageUnavailable, "Catalog database unavailable", err)
            }
            _ => {
                let message = err.to_string();
                Self::with_source(ErrorCode::StorageQueryFailed, message, err)
            }
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::with_source(ErrorCode::FetchTimeout, "Request timeout", err)
        } else if err.is_connect() {
            Self::with_source(ErrorCode::FetchConnectionFailed, "Connection failed", err)
        } else if err.is_decode() {
            Self::with_source(ErrorCode::FetchInvalidBody, "Response body is not valid JSON", err)
        } else if let Some(status) = err.status() {
            let message = format!("HTTP {}", status.as_u16());
            Self::with_source(ErrorCode::FetchBadStatus, message, err)
        } else {
            let message = err.to_string();
            Self::with_source(ErrorCode::FetchFailed, message, err)
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::FetchInvalidBody, "JSON parse error", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::bad_status(503, "http://localhost:5000/products");
        assert_eq!(err.code, ErrorCode::FetchBadStatus);
        assert_eq!(err.code_str(), "FETCH_BAD_STATUS");
        assert!(err.to_string().starts_with("[FETCH_BAD_STATUS]"));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_fetch_failure_class() {
        assert!(ErrorCode::FetchConnectionFailed.is_fetch_failure());
        assert!(ErrorCode::FetchBadStatus.is_fetch_failure());
        assert!(ErrorCode::FetchInvalidBody.is_fetch_failure());
        assert!(!ErrorCode::ApiNotFound.is_fetch_failure());
        assert!(!ErrorCode::InventoryInsufficient.is_fetch_failure());
    }

    #[test]
    fn test_http_status() {
        assert_eq!(ErrorCode::ApiBadRequest.http_status(), 400);
        assert_eq!(ErrorCode::ApiNotFound.http_status(), 404);
        assert_eq!(ErrorCode::ApiConflict.http_status(), 409);
        assert_eq!(ErrorCode::InventoryInsufficient.http_status(), 409);
        assert_eq!(ErrorCode::StorageQueryFailed.http_status(), 500);
        assert_eq!(ErrorCode::StorageUnavailable.http_status(), 503);
    }

    #[test]
    fn test_sqlx_errors_map_to_storage_codes() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(err.code, ErrorCode::StorageUnavailable);
        assert!(!err.code.is_fetch_failure());

        let err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.code, ErrorCode::StorageQueryFailed);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_json_error_is_invalid_body() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: AppError = parse_err.into();
        assert_eq!(err.code, ErrorCode::FetchInvalidBody);
        assert!(std::error::Error::source(&err).is_some());
    }
}
