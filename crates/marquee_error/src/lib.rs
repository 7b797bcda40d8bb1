//! Error taxonomy, classification, and reporting for the marquee catalog
//! access layer.
//!
//! Every failure that crosses a component boundary is normalized into a
//! [`ClassifiedError`] carrying exactly one [`ErrorKind`] from a closed
//! taxonomy. The kind is the stable contract: the retry loop and the
//! user-facing messaging both key off it, so classification is a pure,
//! total function: every representable raw failure maps to exactly one
//! kind, with [`ErrorKind::UnknownError`] as the catch-all.
//!
//! The crate also provides [`ErrorLog`], a bounded in-memory buffer of the
//! most recent classified errors, used for operator-facing diagnostics.

mod classified;
mod classify;
mod kind;
mod log;

pub use classified::{CatalogResult, ClassifiedError};
pub use classify::{RawFailure, classify, classify_storage, invalid_input, missing_required};
pub use kind::ErrorKind;
pub use log::{DEFAULT_LOG_CAPACITY, ErrorLog, ErrorLogEntry};
