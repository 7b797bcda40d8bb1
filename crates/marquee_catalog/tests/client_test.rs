//! Tests for the client pipeline: validation, queueing, classification,
//! retry, not-found softening, and error logging.
//!
//! Backoff and dispatch pacing run under a paused Tokio clock, so the
//! tests finish instantly in wall time.

mod test_utils;

use marquee_catalog::{CatalogClient, MovieCategory, TrendingWindow};
use marquee_error::ErrorKind;
use std::sync::Arc;
use test_utils::{MockTransport, client_with, error_body, movie_body, page_body, test_config};

#[tokio::test(start_paused = true)]
async fn test_always_failing_server_error_is_bounded() {
    let transport = MockTransport::respond(503, error_body("upstream worker died"));
    let client = client_with(transport.clone());

    let err = client.search_movies("dune", 1).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::ApiServerError);
    // Initial attempt plus max_attempts retries.
    assert_eq!(transport.call_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_not_found_search_fails_once_without_retry() {
    let transport = MockTransport::respond(
        404,
        error_body("The resource you requested could not be found."),
    );
    let client = client_with(transport.clone());

    let err = client.search_movies("dune", 1).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::ApiNotFound);
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limited_request_is_not_retried() {
    let transport = MockTransport::respond(
        429,
        error_body("Your request count is over the allowed limit."),
    );
    let client = client_with(transport.clone());

    let err = client
        .movies_in_category(MovieCategory::Popular, 1)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::ApiRateLimit);
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_lookup_by_id_softens_not_found() {
    let transport = MockTransport::respond(404, error_body("not found"));
    let client = client_with(transport.clone());

    let movie = client.movie_details(550).await.unwrap();
    assert!(movie.is_none());
    assert_eq!(transport.call_count(), 1);
    // Absence is an expected outcome, so nothing is logged.
    assert!(client.error_log().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_transient_failures_then_success_resolves() {
    let transport = MockTransport::fail_then_respond(2, 503, page_body());
    let client = client_with(transport.clone());

    let page = client.search_movies("fight club", 1).await.unwrap();
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].title, "Fight Club");
    assert_eq!(transport.call_count(), 3);
    // Only terminal outcomes reach the error log.
    assert!(client.error_log().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_terminal_failures_are_logged_and_surfaced_unchanged() {
    let transport = MockTransport::respond(
        401,
        error_body("Invalid API key: You must be granted a valid key."),
    );
    let client = client_with(transport.clone());

    let err = client.search_movies("dune", 1).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::ApiUnauthorized);
    assert_eq!(
        err.message,
        "Invalid API key: You must be granted a valid key."
    );

    let recent = client.error_log().recent(10);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].error.kind, ErrorKind::ApiUnauthorized);
}

#[tokio::test(start_paused = true)]
async fn test_no_response_is_retried_then_surfaced() {
    let transport = MockTransport::no_response();
    let client = client_with(transport.clone());

    let err = client.trending(TrendingWindow::Day, 1).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::ApiNetworkError);
    assert_eq!(transport.call_count(), 4);
    assert_eq!(client.error_log().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_malformed_success_body_is_unknown_and_not_retried() {
    let transport = MockTransport::respond(200, "<!doctype html>");
    let client = client_with(transport.clone());

    let err = client.search_movies("dune", 1).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownError);
    assert_eq!(transport.call_count(), 1);
    assert_eq!(client.error_log().len(), 1);
}

#[tokio::test]
async fn test_blank_query_never_reaches_the_transport() {
    let transport = MockTransport::respond(200, page_body());
    let client = client_with(transport.clone());

    let err = client.search_movies("   ", 1).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::ValidationMissingRequired);
    assert_eq!(transport.call_count(), 0);
    assert_eq!(client.error_log().len(), 1);
}

#[tokio::test]
async fn test_missing_api_key_is_fatal_at_construction() {
    let mut config = test_config();
    config.api_key = String::new();

    let err = CatalogClient::with_transport(
        config,
        Arc::new(MockTransport::respond(200, page_body())),
    )
    .unwrap_err();
    assert_eq!(err.kind, ErrorKind::ApiKeyMissing);
}

#[tokio::test(start_paused = true)]
async fn test_movie_details_decodes_payload() -> anyhow::Result<()> {
    let transport = MockTransport::respond(200, movie_body());
    let client = client_with(transport);

    let movie = client.movie_details(550).await?.unwrap();
    assert_eq!(movie.title, "Fight Club");
    assert_eq!(movie.runtime, Some(139));
    assert_eq!(movie.genres[0].name, "Drama");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_genre_table_unwraps_provider_envelope() -> anyhow::Result<()> {
    let transport =
        MockTransport::respond(200, r#"{"genres":[{"id":18,"name":"Drama"},{"id":35,"name":"Comedy"}]}"#);
    let client = client_with(transport);

    let genres = client.movie_genres().await?;
    assert_eq!(genres.len(), 2);
    assert_eq!(genres[1].name, "Comedy");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_clones_share_the_error_log() {
    let transport = MockTransport::respond(401, error_body("bad key"));
    let client = client_with(transport);
    let clone = client.clone();

    let _ = clone.search_movies("dune", 1).await;
    assert_eq!(client.error_log().len(), 1);
}
