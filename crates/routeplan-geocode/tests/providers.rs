//! Integration tests for the provider chain using wiremock HTTP mocks.

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use routeplan_geocode::{
    GeocodingResolver, LocationIqProvider, NominatimProvider, SuggestionSession,
};

fn locationiq(base_url: &str) -> LocationIqProvider {
    LocationIqProvider::with_base_url("test-key", 30, "test-agent", base_url)
        .expect("provider construction should not fail")
        .with_retry_policy(0, 0)
}

fn nominatim(base_url: &str) -> NominatimProvider {
    NominatimProvider::with_base_url(30, "test-agent", base_url)
        .expect("provider construction should not fail")
        .with_retry_policy(0, 0)
}

fn place(lat: &str, lon: &str, name: &str) -> serde_json::Value {
    serde_json::json!({ "lat": lat, "lon": lon, "display_name": name })
}

#[tokio::test]
async fn locationiq_resolves_top_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.php"))
        .and(query_param("key", "test-key"))
        .and(query_param("q", "1400 John F Kennedy Blvd"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            place("39.9533727", "-75.165577", "City Hall, Philadelphia, PA")
        ])))
        .mount(&server)
        .await;

    let resolver = GeocodingResolver::new(vec![Box::new(locationiq(&server.uri()))]);
    let result = resolver
        .resolve("1400 John F Kennedy Blvd")
        .await
        .expect("should resolve");

    assert_eq!(result.address, "1400 John F Kennedy Blvd");
    assert!((result.latitude - 39.9533727).abs() < 1e-9);
    assert!((result.longitude - (-75.165577)).abs() < 1e-9);
    assert_eq!(
        result.display_name.as_deref(),
        Some("City Hall, Philadelphia, PA")
    );
}

#[tokio::test]
async fn chain_falls_back_to_nominatim_on_server_error() {
    let broken = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.php"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&broken)
        .await;

    let working = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            place("40.4406", "-79.9959", "Pittsburgh, PA")
        ])))
        .mount(&working)
        .await;

    let resolver = GeocodingResolver::new(vec![
        Box::new(locationiq(&broken.uri())),
        Box::new(nominatim(&working.uri())),
    ]);
    let result = resolver.resolve("pittsburgh").await.expect("fallback hit");
    assert_eq!(result.display_name.as_deref(), Some("Pittsburgh, PA"));
}

#[tokio::test]
async fn chain_falls_back_when_primary_matches_nothing() {
    let empty = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&empty)
        .await;

    let working = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            place("39.2904", "-76.6122", "Baltimore, MD")
        ])))
        .mount(&working)
        .await;

    let resolver = GeocodingResolver::new(vec![
        Box::new(locationiq(&empty.uri())),
        Box::new(nominatim(&working.uri())),
    ]);
    let result = resolver.resolve("baltimore").await.expect("fallback hit");
    assert_eq!(result.display_name.as_deref(), Some("Baltimore, MD"));
}

#[tokio::test]
async fn chain_reports_not_found_when_everything_fails() {
    let broken = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&broken)
        .await;

    let empty = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&empty)
        .await;

    let resolver = GeocodingResolver::new(vec![
        Box::new(locationiq(&broken.uri())),
        Box::new(nominatim(&empty.uri())),
    ]);
    assert!(resolver.resolve("nowhere in particular").await.is_none());
}

#[tokio::test]
async fn nominatim_reverse_returns_display_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("lat", "39.9533727"))
        .and(query_param("lon", "-75.165577"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "display_name": "City Hall, 1400 John F Kennedy Blvd, Philadelphia"
        })))
        .mount(&server)
        .await;

    let resolver = GeocodingResolver::new(vec![Box::new(nominatim(&server.uri()))]);
    let label = resolver.reverse_resolve(39.9533727, -75.165577).await;
    assert_eq!(
        label.as_deref(),
        Some("City Hall, 1400 John F Kennedy Blvd, Philadelphia")
    );
}

#[tokio::test]
async fn suggestions_are_capped_even_when_the_provider_over_answers() {
    let server = MockServer::start().await;
    let body: Vec<_> = (0..8)
        .map(|i| place("39.95", "-75.16", &format!("Match {i}")))
        .collect();
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(body)))
        .mount(&server)
        .await;

    let resolver = GeocodingResolver::new(vec![Box::new(nominatim(&server.uri()))]);
    let suggestions = resolver.suggest("market street").await;
    assert_eq!(suggestions.len(), 5);
}

#[tokio::test]
async fn newer_query_wins_when_the_older_response_is_slow() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "123 Ma"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([place("1.0", "1.0", "stale")]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "123 Main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            place("39.95", "-75.16", "123 Main St, Philadelphia")
        ])))
        .mount(&server)
        .await;

    let resolver = Arc::new(GeocodingResolver::new(vec![Box::new(nominatim(
        &server.uri(),
    ))]));
    let session = Arc::new(SuggestionSession::new(
        resolver,
        Duration::from_millis(20),
    ));

    let first = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.query("123 Ma").await })
    };
    // Let the first request get past its quiet period and onto the wire.
    tokio::time::sleep(Duration::from_millis(60)).await;
    let second = session.query("123 Main").await;

    let applied = second.expect("newest query must be applied");
    assert_eq!(applied.len(), 1);
    assert_eq!(
        applied[0].display_name.as_deref(),
        Some("123 Main St, Philadelphia")
    );
    assert!(
        first.await.unwrap().is_none(),
        "the stale response must never be applied"
    );
}
