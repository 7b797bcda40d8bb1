//! Pure classification of raw failures into the closed taxonomy.

use crate::{ClassifiedError, ErrorKind};
use serde_json::json;

/// The shapes a failed network operation can present for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawFailure {
    /// The provider replied with a non-success HTTP status, possibly with
    /// its own error message in the body.
    Status { status: u16, message: Option<String> },
    /// The request was attempted but no usable reply came back, which
    /// implies connectivity loss (timeouts included).
    NoResponse { message: String },
    /// A failure local to this process, with no HTTP context at all.
    Local {
        message: String,
        detail: Option<String>,
    },
}

/// Map a raw failure to exactly one error kind.
///
/// Rules are checked in order, first match wins:
///
/// 1. status 401 → [`ErrorKind::ApiUnauthorized`]
/// 2. status 404 → [`ErrorKind::ApiNotFound`]
/// 3. status 429 → [`ErrorKind::ApiRateLimit`]
/// 4. any 5xx → [`ErrorKind::ApiServerError`]
/// 5. no response → [`ErrorKind::ApiNetworkError`]
/// 6. anything else → [`ErrorKind::UnknownError`]
///
/// `context` is a short label for the operation that failed (for example
/// `"search_movies"`) and lands in the error's `details`. Classification
/// is a pure function with no side effects; the caller decides whether
/// and where to log.
///
/// # Examples
///
/// ```
/// use marquee_error::{ErrorKind, RawFailure, classify};
///
/// let err = classify(
///     &RawFailure::Status { status: 503, message: None },
///     "search_movies",
/// );
/// assert_eq!(err.kind, ErrorKind::ApiServerError);
/// ```
#[track_caller]
pub fn classify(raw: &RawFailure, context: &str) -> ClassifiedError {
    match raw {
        RawFailure::Status { status, message } => {
            let kind = match *status {
                401 => ErrorKind::ApiUnauthorized,
                404 => ErrorKind::ApiNotFound,
                429 => ErrorKind::ApiRateLimit,
                500..=599 => ErrorKind::ApiServerError,
                _ => ErrorKind::UnknownError,
            };
            let text = message
                .clone()
                .unwrap_or_else(|| default_status_message(kind, *status));
            ClassifiedError::new(kind, text).with_details(json!({
                "context": context,
                "status": status,
            }))
        }
        RawFailure::NoResponse { message } => {
            ClassifiedError::new(ErrorKind::ApiNetworkError, "no response from the catalog provider")
                .with_details(json!({
                    "context": context,
                    "cause": message,
                }))
        }
        RawFailure::Local { message, detail } => {
            ClassifiedError::new(ErrorKind::UnknownError, message.clone()).with_details(json!({
                "context": context,
                "detail": detail,
            }))
        }
    }
}

fn default_status_message(kind: ErrorKind, status: u16) -> String {
    match kind {
        ErrorKind::ApiUnauthorized => "the catalog provider rejected the API key".to_string(),
        ErrorKind::ApiNotFound => "the requested resource does not exist".to_string(),
        ErrorKind::ApiRateLimit => "the catalog provider throttled the request".to_string(),
        ErrorKind::ApiServerError => {
            format!("the catalog provider failed with status {status}")
        }
        _ => format!("unexpected provider status {status}"),
    }
}

/// Classify a failure from the key/value persistence surface.
///
/// Persistence failures are identified by error name rather than by HTTP
/// status; the same total-function contract applies, with
/// [`ErrorKind::UnknownError`] as the catch-all for unrecognized names.
///
/// # Examples
///
/// ```
/// use marquee_error::{ErrorKind, classify_storage};
///
/// let err = classify_storage("QuotaExceededError", "storage is full", "save_favorites");
/// assert_eq!(err.kind, ErrorKind::StorageQuotaExceeded);
/// ```
#[track_caller]
pub fn classify_storage(name: &str, message: &str, context: &str) -> ClassifiedError {
    let kind = match name {
        "QuotaExceededError" => ErrorKind::StorageQuotaExceeded,
        "SecurityError" => ErrorKind::StorageAccessDenied,
        "SyntaxError" => ErrorKind::StorageCorrupted,
        _ => ErrorKind::UnknownError,
    };
    ClassifiedError::new(kind, message).with_details(json!({
        "context": context,
        "name": name,
    }))
}

/// A supplied value failed validation.
#[track_caller]
pub fn invalid_input(field: &str, reason: &str, context: &str) -> ClassifiedError {
    ClassifiedError::new(
        ErrorKind::ValidationInvalidInput,
        format!("invalid value for '{field}': {reason}"),
    )
    .with_details(json!({
        "context": context,
        "field": field,
    }))
}

/// A required value was absent.
#[track_caller]
pub fn missing_required(field: &str, context: &str) -> ClassifiedError {
    ClassifiedError::new(
        ErrorKind::ValidationMissingRequired,
        format!("missing required value: {field}"),
    )
    .with_details(json!({
        "context": context,
        "field": field,
    }))
}
