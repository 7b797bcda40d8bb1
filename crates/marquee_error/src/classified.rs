//! The canonical failure record.

use crate::ErrorKind;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A failure normalized into one kind from the closed taxonomy, with
/// source location tracking.
///
/// `details` is an opaque structured payload (original status code,
/// operation name, cause text). The core never interprets it, only
/// carries and logs it.
///
/// # Examples
///
/// ```
/// use marquee_error::{ClassifiedError, ErrorKind};
///
/// let err = ClassifiedError::new(ErrorKind::ApiRateLimit, "provider throttled the request");
/// assert_eq!(err.kind, ErrorKind::ApiRateLimit);
/// assert!(format!("{}", err).contains("API_RATE_LIMIT"));
/// ```
#[derive(Debug, Clone, Serialize, derive_more::Display, derive_more::Error)]
#[display("{}: {} at line {} in {}", kind, message, line, file)]
pub struct ClassifiedError {
    /// The single kind chosen for this failure.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub message: String,
    /// Opaque structured payload, carried and logged but never interpreted.
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
    /// Acting user or session, for audit correlation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<String>,
    /// Line number where the error was created.
    pub line: u32,
    /// File where the error was created.
    pub file: &'static str,
}

impl ClassifiedError {
    /// Create a new classified error at the caller's location.
    #[track_caller]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            details: serde_json::Value::Null,
            timestamp: Utc::now(),
            principal: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Attach an opaque details payload.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    /// Attach the acting user or session identifier.
    pub fn with_principal(mut self, principal: impl Into<String>) -> Self {
        self.principal = Some(principal.into());
        self
    }
}

/// Result type for catalog access operations.
///
/// # Examples
///
/// ```
/// use marquee_error::{CatalogResult, ClassifiedError, ErrorKind};
///
/// fn fetch() -> CatalogResult<String> {
///     Err(ClassifiedError::new(ErrorKind::ApiNetworkError, "connection refused"))
/// }
/// ```
pub type CatalogResult<T> = std::result::Result<T, ClassifiedError>;
