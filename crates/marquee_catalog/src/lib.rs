//! Typed client for the movie/TV catalog provider.
//!
//! Every operation follows the same pipeline: validate inputs, take a turn
//! in the shared dispatch queue, perform the network call, classify any
//! failure into the closed taxonomy, retry transient kinds with
//! exponential backoff, and record terminal failures in the error log
//! before surfacing them unchanged to the caller.
//!
//! The network edge sits behind the [`CatalogTransport`] trait so tests
//! can script the provider without touching the wire.

mod client;
mod config;
mod models;
mod retry;
mod transport;

pub use client::CatalogClient;
pub use config::{CatalogConfig, RetryConfig};
pub use models::{
    Genre, GenreList, MovieCategory, MovieDetails, MovieSummary, Page, PersonDetails,
    TrendingWindow, TvDetails, TvSummary,
};
pub use retry::RetryPolicy;
pub use transport::{CatalogTransport, HttpTransport, ProviderResponse, TransportFailure};
