//! The closed error-kind taxonomy.

use serde::{Deserialize, Serialize};

/// Every failure the access layer can surface, as a closed enumeration.
///
/// The taxonomy is extended only by design decision, never ad hoc: the
/// kind is a stable input to the retry policy and to user-facing
/// messaging, so adding or re-mapping a variant changes retry behavior.
///
/// `Display` and serde both render the stable wire code
/// (`API_SERVER_ERROR`, `UNKNOWN_ERROR`, …).
///
/// # Examples
///
/// ```
/// use marquee_error::ErrorKind;
///
/// assert_eq!(ErrorKind::ApiServerError.to_string(), "API_SERVER_ERROR");
/// assert!(ErrorKind::ApiServerError.is_retryable());
/// assert!(ErrorKind::ApiNotFound.is_terminal());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// No API key was configured; the client refuses to construct.
    ApiKeyMissing,
    /// The catalog provider throttled the request (HTTP 429).
    ApiRateLimit,
    /// The catalog provider failed internally (HTTP 5xx).
    ApiServerError,
    /// The request was sent but no usable reply came back.
    ApiNetworkError,
    /// The requested catalog resource does not exist (HTTP 404).
    ApiNotFound,
    /// The catalog provider rejected the credentials (HTTP 401).
    ApiUnauthorized,
    /// The operation requires a signed-in session.
    AuthRequired,
    /// The presented session credentials are invalid.
    AuthInvalid,
    /// The session has expired and must be renewed.
    AuthExpired,
    /// The persistence surface is out of space.
    StorageQuotaExceeded,
    /// The persistence surface denied access.
    StorageAccessDenied,
    /// Persisted data could not be read back intact.
    StorageCorrupted,
    /// A supplied value failed validation.
    ValidationInvalidInput,
    /// A required value was absent.
    ValidationMissingRequired,
    /// Catch-all for failures with no more specific kind.
    UnknownError,
    /// Generic connectivity loss outside a catalog call.
    NetworkError,
    /// An operation exceeded its time budget.
    TimeoutError,
}

impl ErrorKind {
    /// True when retrying can plausibly change the outcome.
    ///
    /// Server errors and connectivity losses are presumed transient;
    /// everything else is terminal: retrying an auth, not-found, rate
    /// limit, or validation failure cannot change the result, or would
    /// mask a client-side bug.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            ErrorKind::ApiServerError
                | ErrorKind::ApiNetworkError
                | ErrorKind::NetworkError
                | ErrorKind::TimeoutError
        )
    }

    /// Negation of [`ErrorKind::is_retryable`].
    pub fn is_terminal(self) -> bool {
        !self.is_retryable()
    }
}
