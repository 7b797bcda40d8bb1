//! Client configuration with layered loading.
//!
//! Configuration sources, later winning over earlier:
//! 1. Bundled defaults (`include_str!` of marquee.toml)
//! 2. User config in the home directory (~/.config/marquee/marquee.toml)
//! 3. User config in the current directory (./marquee.toml)
//! 4. The `TMDB_API_KEY` environment variable, for the key only
//!
//! Everything is read once at startup; there is no hot reload.

use crate::RetryPolicy;
use config::{Config, File, FileFormat};
use marquee_error::{CatalogResult, ClassifiedError, ErrorKind};
use marquee_rate_limit::QueueConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Retry knobs for transient failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries allowed after the initial attempt.
    pub max_attempts: usize,
    /// Delay before the first retry, in milliseconds.
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1_000,
        }
    }
}

/// Static configuration for the catalog client.
///
/// # Example
///
/// ```no_run
/// use marquee_catalog::CatalogConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CatalogConfig::load()?;
/// println!("catalog base URL: {}", config.base_url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Provider API key, carried as a query parameter on every request.
    /// Empty means unconfigured; the client refuses to construct.
    pub api_key: String,
    /// Base URL of the catalog API.
    pub base_url: String,
    /// Base URL for image assets.
    pub image_base_url: String,
    /// Language tag sent with every request.
    pub language: String,
    /// Client-side timeout per network call, in milliseconds.
    pub timeout_ms: u64,
    /// Entries retained by the error log.
    pub error_log_capacity: usize,
    /// Retry knobs for transient failures.
    pub retry: RetryConfig,
    /// Dispatch pacing limits.
    pub queue: QueueConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p".to_string(),
            language: "en-US".to_string(),
            timeout_ms: 10_000,
            error_log_capacity: 100,
            retry: RetryConfig::default(),
            queue: QueueConfig::default(),
        }
    }
}

impl CatalogConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> CatalogResult<Self> {
        debug!("loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ClassifiedError::new(
                    ErrorKind::UnknownError,
                    format!(
                        "failed to read configuration from {}: {}",
                        path.as_ref().display(),
                        e
                    ),
                )
            })?
            .try_deserialize()
            .map_err(|e| {
                ClassifiedError::new(
                    ErrorKind::UnknownError,
                    format!("failed to parse configuration: {e}"),
                )
            })
    }

    /// Load configuration with the full source precedence.
    #[instrument]
    pub fn load() -> CatalogResult<Self> {
        debug!("loading configuration: env > current dir > home dir > bundled defaults");

        // Bundled default configuration
        const DEFAULT_CONFIG: &str = include_str!("../../../marquee.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        // User config from the home directory (optional)
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/marquee/marquee.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        // User config from the current directory (optional, highest file precedence)
        builder = builder.add_source(File::with_name("marquee").required(false));

        let mut config: CatalogConfig = builder
            .build()
            .map_err(|e| {
                ClassifiedError::new(
                    ErrorKind::UnknownError,
                    format!("failed to build configuration: {e}"),
                )
            })?
            .try_deserialize()
            .map_err(|e| {
                ClassifiedError::new(
                    ErrorKind::UnknownError,
                    format!("failed to parse configuration: {e}"),
                )
            })?;

        // The key is a secret: the environment wins over any file.
        dotenvy::dotenv().ok();
        if let Ok(key) = std::env::var("TMDB_API_KEY") {
            if !key.trim().is_empty() {
                config.api_key = key;
            }
        }

        Ok(config)
    }

    /// Client-side timeout applied to every network call.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Retry policy derived from the retry knobs.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry.max_attempts,
            base_delay: Duration::from_millis(self.retry.base_delay_ms),
        }
    }

    /// Build a browser-ready image URL from a provider-relative path.
    ///
    /// # Examples
    ///
    /// ```
    /// use marquee_catalog::CatalogConfig;
    ///
    /// let config = CatalogConfig::default();
    /// assert_eq!(
    ///     config.image_url("w500", "/abc.jpg"),
    ///     "https://image.tmdb.org/t/p/w500/abc.jpg"
    /// );
    /// ```
    pub fn image_url(&self, size: &str, path: &str) -> String {
        format!(
            "{}/{}{}",
            self.image_base_url.trim_end_matches('/'),
            size,
            path
        )
    }
}
