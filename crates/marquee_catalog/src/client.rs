//! The catalog client facade.

use crate::{
    CatalogConfig, CatalogTransport, Genre, GenreList, HttpTransport, MovieCategory, MovieDetails,
    MovieSummary, Page, PersonDetails, ProviderResponse, RetryPolicy, TrendingWindow, TvDetails,
    TvSummary,
};
use marquee_error::{
    CatalogResult, ClassifiedError, ErrorKind, ErrorLog, RawFailure, classify, missing_required,
};
use marquee_rate_limit::RequestQueue;
use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, instrument, warn};

/// Error body the provider attaches to non-success statuses.
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    status_message: Option<String>,
}

/// Typed, rate-limited, retrying access to the catalog provider.
///
/// Every operation takes a turn in the shared dispatch queue, so the
/// provider's throughput ceiling holds no matter how many callers are in
/// flight. Transient failures (5xx, connectivity loss) are retried with
/// exponential backoff inside the queued task; terminal failures are
/// recorded in the error log and returned to the caller unchanged.
///
/// The handle is cheap to clone; clones share the queue and the log.
///
/// # Example
///
/// ```no_run
/// use marquee_catalog::{CatalogClient, CatalogConfig};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CatalogClient::new(CatalogConfig::load()?)?;
/// let page = client.search_movies("alien", 1).await?;
/// println!("{} results", page.total_results);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CatalogClient {
    config: Arc<CatalogConfig>,
    transport: Arc<dyn CatalogTransport>,
    queue: RequestQueue,
    retry: RetryPolicy,
    log: ErrorLog,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("config", &self.config)
            .field("queue", &self.queue)
            .field("retry", &self.retry)
            .field("log", &self.log)
            .finish()
    }
}

impl CatalogClient {
    /// Create a client backed by a real HTTP transport.
    ///
    /// Refuses to construct without an API key: a missing key is a
    /// configuration error, not a per-call one.
    pub fn new(config: CatalogConfig) -> CatalogResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                ClassifiedError::new(
                    ErrorKind::UnknownError,
                    format!("failed to build HTTP client: {e}"),
                )
            })?;
        Self::with_transport(config, Arc::new(HttpTransport::new(http)))
    }

    /// Create a client over an explicit transport.
    ///
    /// Tests use this to script the provider; the API key requirement
    /// still applies.
    pub fn with_transport(
        config: CatalogConfig,
        transport: Arc<dyn CatalogTransport>,
    ) -> CatalogResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ClassifiedError::new(
                ErrorKind::ApiKeyMissing,
                "no catalog API key is configured; set TMDB_API_KEY or the api_key config field",
            ));
        }
        debug!("creating catalog client");
        Ok(Self {
            queue: RequestQueue::new(config.queue),
            retry: config.retry_policy(),
            log: ErrorLog::with_capacity(config.error_log_capacity),
            transport,
            config: Arc::new(config),
        })
    }

    /// The log of terminal failures, for diagnostics surfaces.
    pub fn error_log(&self) -> &ErrorLog {
        &self.log
    }

    /// The active configuration.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Full-text movie search.
    #[instrument(skip(self))]
    pub async fn search_movies(&self, query: &str, page: u32) -> CatalogResult<Page<MovieSummary>> {
        self.require_query(query, "search_movies")?;
        let value = self
            .fetch(
                "search_movies",
                "search/movie",
                vec![
                    ("query".to_string(), query.to_string()),
                    page_param(page),
                    ("include_adult".to_string(), "false".to_string()),
                ],
            )
            .await?;
        self.decode("search_movies", value)
    }

    /// Full-text TV show search.
    #[instrument(skip(self))]
    pub async fn search_tv(&self, query: &str, page: u32) -> CatalogResult<Page<TvSummary>> {
        self.require_query(query, "search_tv")?;
        let value = self
            .fetch(
                "search_tv",
                "search/tv",
                vec![
                    ("query".to_string(), query.to_string()),
                    page_param(page),
                    ("include_adult".to_string(), "false".to_string()),
                ],
            )
            .await?;
        self.decode("search_tv", value)
    }

    /// Movie lookup by id.
    ///
    /// Absence is an expected outcome for lookups by id: a 404 yields
    /// `Ok(None)` instead of an error and is not recorded in the log.
    #[instrument(skip(self))]
    pub async fn movie_details(&self, id: u64) -> CatalogResult<Option<MovieDetails>> {
        let value = self
            .fetch_optional("movie_details", &format!("movie/{id}"), Vec::new())
            .await?;
        value.map(|v| self.decode("movie_details", v)).transpose()
    }

    /// TV show lookup by id; 404 yields `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn tv_details(&self, id: u64) -> CatalogResult<Option<TvDetails>> {
        let value = self
            .fetch_optional("tv_details", &format!("tv/{id}"), Vec::new())
            .await?;
        value.map(|v| self.decode("tv_details", v)).transpose()
    }

    /// Person lookup by id; 404 yields `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn person_details(&self, id: u64) -> CatalogResult<Option<PersonDetails>> {
        let value = self
            .fetch_optional("person_details", &format!("person/{id}"), Vec::new())
            .await?;
        value.map(|v| self.decode("person_details", v)).transpose()
    }

    /// Movies in one of the provider's fixed listing categories.
    #[instrument(skip(self))]
    pub async fn movies_in_category(
        &self,
        category: MovieCategory,
        page: u32,
    ) -> CatalogResult<Page<MovieSummary>> {
        let value = self
            .fetch(
                "movies_in_category",
                &format!("movie/{category}"),
                vec![page_param(page)],
            )
            .await?;
        self.decode("movies_in_category", value)
    }

    /// Trending movies over a rolling window.
    #[instrument(skip(self))]
    pub async fn trending(
        &self,
        window: TrendingWindow,
        page: u32,
    ) -> CatalogResult<Page<MovieSummary>> {
        let value = self
            .fetch(
                "trending",
                &format!("trending/movie/{window}"),
                vec![page_param(page)],
            )
            .await?;
        self.decode("trending", value)
    }

    /// The provider's movie genre table.
    #[instrument(skip(self))]
    pub async fn movie_genres(&self) -> CatalogResult<Vec<Genre>> {
        let value = self
            .fetch("movie_genres", "genre/movie/list", Vec::new())
            .await?;
        let list: GenreList = self.decode("movie_genres", value)?;
        Ok(list.genres)
    }

    /// Take a turn in the queue and run the attempt-with-retry loop.
    ///
    /// Retries happen inside the queued task: attempts are strictly
    /// sequential and are never re-enqueued. No error-log writes here;
    /// callers decide what counts as terminal.
    async fn dispatch(
        &self,
        op: &'static str,
        path: &str,
        params: Vec<(String, String)>,
    ) -> CatalogResult<Value> {
        let url = self.endpoint(op, path, &params)?;
        let transport = self.transport.clone();
        let retry = self.retry;
        self.queue
            .enqueue(op, move || async move {
                Retry::spawn(retry.strategy(), move || {
                    let transport = transport.clone();
                    let url = url.clone();
                    async move {
                        match attempt(transport.as_ref(), &url, op).await {
                            Ok(value) => Ok(value),
                            Err(err) if err.kind.is_retryable() => {
                                warn!(
                                    operation = op,
                                    kind = %err.kind,
                                    "transient failure, will retry"
                                );
                                Err(RetryError::Transient {
                                    err,
                                    retry_after: None,
                                })
                            }
                            Err(err) => Err(RetryError::Permanent(err)),
                        }
                    }
                })
                .await
            })
            .await
    }

    /// Dispatch and record any failure as terminal.
    async fn fetch(
        &self,
        op: &'static str,
        path: &str,
        params: Vec<(String, String)>,
    ) -> CatalogResult<Value> {
        self.dispatch(op, path, params)
            .await
            .map_err(|err| self.fail(err))
    }

    /// Dispatch, softening a 404 into `Ok(None)`.
    async fn fetch_optional(
        &self,
        op: &'static str,
        path: &str,
        params: Vec<(String, String)>,
    ) -> CatalogResult<Option<Value>> {
        match self.dispatch(op, path, params).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind == ErrorKind::ApiNotFound => {
                debug!(operation = op, "resource not found, treating as absent");
                Ok(None)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn decode<T: DeserializeOwned>(&self, op: &'static str, value: Value) -> CatalogResult<T> {
        serde_json::from_value(value).map_err(|e| {
            self.fail(classify(
                &RawFailure::Local {
                    message: "provider payload did not match the expected shape".to_string(),
                    detail: Some(e.to_string()),
                },
                op,
            ))
        })
    }

    fn require_query(&self, query: &str, op: &'static str) -> CatalogResult<()> {
        if query.trim().is_empty() {
            return Err(self.fail(missing_required("query", op)));
        }
        Ok(())
    }

    /// Record a terminal failure before handing it to the caller.
    fn fail(&self, err: ClassifiedError) -> ClassifiedError {
        self.log.record(err.clone());
        err
    }

    fn endpoint(
        &self,
        op: &'static str,
        path: &str,
        params: &[(String, String)],
    ) -> CatalogResult<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/{path}")).map_err(|e| {
            classify(
                &RawFailure::Local {
                    message: format!("could not build an endpoint for {path}"),
                    detail: Some(e.to_string()),
                },
                op,
            )
        })?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.config.api_key)
            .append_pair("language", &self.config.language);
        for (key, value) in params {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }
}

/// One network attempt: transport call plus response interpretation.
async fn attempt(
    transport: &dyn CatalogTransport,
    url: &Url,
    op: &'static str,
) -> CatalogResult<Value> {
    match transport.get(url).await {
        Ok(response) => interpret(response, op),
        Err(failure) => Err(classify(
            &RawFailure::NoResponse {
                message: failure.message,
            },
            op,
        )),
    }
}

/// Turn a raw provider reply into a payload or a classified error.
fn interpret(response: ProviderResponse, op: &'static str) -> CatalogResult<Value> {
    if (200..300).contains(&response.status) {
        serde_json::from_str(&response.body).map_err(|e| {
            classify(
                &RawFailure::Local {
                    message: "failed to decode the provider response".to_string(),
                    detail: Some(e.to_string()),
                },
                op,
            )
        })
    } else {
        let message = serde_json::from_str::<ProviderErrorBody>(&response.body)
            .ok()
            .and_then(|body| body.status_message);
        Err(classify(
            &RawFailure::Status {
                status: response.status,
                message,
            },
            op,
        ))
    }
}

fn page_param(page: u32) -> (String, String) {
    ("page".to_string(), page.to_string())
}
