//! Integration tests for the Nominatim client against a mock HTTP server.

use serde_json::json;
use wetterau_core::models::Coordinate;
use wetterau_geocode::{GeocodeError, Geocoder, NominatimClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn lookup_returns_first_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Hauptstraße 1, 61169 Friedberg"))
        .and(query_param("format", "jsonv2"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "lat": "50.3371",
                "lon": "8.7527",
                "display_name": "Friedberg (Hessen), Wetteraukreis, Hessen, Deutschland"
            }
        ])))
        .mount(&server)
        .await;

    let client = NominatimClient::new(server.uri(), "wetterau-mapper").unwrap();
    let coord = client.lookup("Hauptstraße 1, 61169 Friedberg").await.unwrap();

    assert_eq!(coord, Some(Coordinate::new(50.3371, 8.7527)));
}

#[tokio::test]
async fn lookup_with_no_match_returns_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = NominatimClient::new(server.uri(), "wetterau-mapper").unwrap();
    let coord = client.lookup("Nonexistent 999, 00000 Nowhere").await.unwrap();

    assert_eq!(coord, None);
}

#[tokio::test]
async fn lookup_rejection_is_a_terminal_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_string("access blocked"))
        .mount(&server)
        .await;

    let client = NominatimClient::new(server.uri(), "wetterau-mapper").unwrap();
    let err = client.lookup("Hauptstraße 1, 61169 Friedberg").await.unwrap_err();

    match err {
        GeocodeError::Rejected { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "access blocked");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn lookup_with_malformed_body_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let client = NominatimClient::new(server.uri(), "wetterau-mapper").unwrap();
    let err = client.lookup("Hauptstraße 1, 61169 Friedberg").await.unwrap_err();

    assert!(matches!(err, GeocodeError::Unavailable { .. }));
}

#[tokio::test]
async fn lookup_with_non_numeric_coordinates_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "lat": "fifty", "lon": "8.75" }
        ])))
        .mount(&server)
        .await;

    let client = NominatimClient::new(server.uri(), "wetterau-mapper").unwrap();
    let err = client.lookup("Hauptstraße 1, 61169 Friedberg").await.unwrap_err();

    assert!(matches!(err, GeocodeError::Unavailable { .. }));
}
