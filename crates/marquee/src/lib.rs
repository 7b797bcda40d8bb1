//! Marquee - Resilient Catalog API Access Layer
//!
//! Marquee is the data backbone of a movie/TV content-discovery frontend:
//! a typed client for a remote catalog provider that serializes all
//! outbound traffic, enforces the provider's throughput ceiling, retries
//! transient failures with exponential backoff, and normalizes every
//! failure into a closed taxonomy the UI can map to messages.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use marquee::{CatalogClient, CatalogConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     marquee::init_tracing()?;
//!
//!     let client = CatalogClient::new(CatalogConfig::load()?)?;
//!     let page = client.search_movies("alien", 1).await?;
//!     for movie in &page.results {
//!         println!("{} ({:?})", movie.title, movie.release_date);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Marquee is organized as a workspace with focused crates:
//!
//! - `marquee_error` - error taxonomy, classifier, and bounded error log
//! - `marquee_rate_limit` - paced, strictly ordered dispatch queue
//! - `marquee_catalog` - configuration, transport, retry policy, and the
//!   typed client facade
//!
//! This crate (`marquee`) re-exports everything for convenience.

mod observability;

pub use marquee_catalog::*;
pub use marquee_error::*;
pub use marquee_rate_limit::*;
pub use observability::init_tracing;
