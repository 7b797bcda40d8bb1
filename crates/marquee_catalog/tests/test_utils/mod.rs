//! Test utilities for catalog client tests.
//!
//! Provides a scripted transport standing in for the provider, plus
//! canned payloads and a config tuned for fast tests.

use async_trait::async_trait;
use marquee_catalog::{
    CatalogClient, CatalogConfig, CatalogTransport, ProviderResponse, RetryConfig,
    TransportFailure,
};
use marquee_rate_limit::QueueConfig;
use reqwest::Url;
use std::sync::{Arc, Mutex};

/// How the mock transport behaves across successive calls.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always reply with this status and body.
    Respond { status: u16, body: String },
    /// Never reply at all (connectivity loss).
    NoResponse,
    /// Reply with `status` for the first `failures` calls, then 200 with `body`.
    FailThenRespond {
        failures: usize,
        status: u16,
        body: String,
    },
}

/// Scripted transport with call counting.
#[derive(Debug, Clone)]
pub struct MockTransport {
    behavior: MockBehavior,
    call_count: Arc<Mutex<usize>>,
}

impl MockTransport {
    /// A transport that always replies with the given status and body.
    pub fn respond(status: u16, body: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Respond {
                status,
                body: body.into(),
            },
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// A transport that never replies.
    pub fn no_response() -> Self {
        Self {
            behavior: MockBehavior::NoResponse,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// A transport that fails `failures` times with `status`, then
    /// succeeds with `body`. Useful for testing retry behavior.
    pub fn fail_then_respond(failures: usize, status: u16, body: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::FailThenRespond {
                failures,
                status,
                body: body.into(),
            },
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of calls the transport has seen.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl CatalogTransport for MockTransport {
    async fn get(&self, _url: &Url) -> Result<ProviderResponse, TransportFailure> {
        let calls = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count
        };
        match &self.behavior {
            MockBehavior::Respond { status, body } => {
                Ok(ProviderResponse::new(*status, body.clone()))
            }
            MockBehavior::NoResponse => Err(TransportFailure::new("connection refused")),
            MockBehavior::FailThenRespond {
                failures,
                status,
                body,
            } => {
                if calls <= *failures {
                    Ok(ProviderResponse::new(
                        *status,
                        error_body("simulated upstream failure"),
                    ))
                } else {
                    Ok(ProviderResponse::new(200, body.clone()))
                }
            }
        }
    }
}

/// A minimal valid search page payload.
pub fn page_body() -> String {
    r#"{"page":1,"results":[{"id":550,"title":"Fight Club","genre_ids":[18]}],"total_pages":1,"total_results":1}"#
        .to_string()
}

/// A minimal valid movie details payload.
pub fn movie_body() -> String {
    r#"{"id":550,"title":"Fight Club","runtime":139,"genres":[{"id":18,"name":"Drama"}]}"#
        .to_string()
}

/// The error body shape the provider attaches to failures.
pub fn error_body(message: &str) -> String {
    format!(r#"{{"status_code":25,"status_message":"{message}"}}"#)
}

/// Config tuned for fast tests: short backoff, tight dispatch gap.
pub fn test_config() -> CatalogConfig {
    CatalogConfig {
        api_key: "test-key".to_string(),
        retry: RetryConfig {
            max_attempts: 3,
            base_delay_ms: 10,
        },
        queue: QueueConfig {
            requests_per_window: 4,
            window_ms: 20,
            min_gap_ms: 5,
        },
        ..CatalogConfig::default()
    }
}

/// A client over the given mock, with the fast test config.
pub fn client_with(transport: MockTransport) -> CatalogClient {
    CatalogClient::with_transport(test_config(), Arc::new(transport))
        .expect("client should construct with a test key")
}
