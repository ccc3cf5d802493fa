//! End-to-end tests for the fetch and lookup flows against a mock provider

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use skycast::config::SkycastConfig;
use skycast::{
    ApiClient, FetchStage, Geocoder, Location, PositionSource, SkycastError, SnapshotCache,
    WeatherService, locate,
};

const API_KEY: &str = "test_api_key_123";

fn test_config(server: &MockServer) -> SkycastConfig {
    let mut config = SkycastConfig::default();
    config.api.key = Some(API_KEY.to_string());
    config.api.base_url = format!("{}/data/2.5", server.uri());
    config.api.geo_url = format!("{}/geo/1.0", server.uri());
    config
}

fn api_client(server: &MockServer) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(test_config(server).api).unwrap())
}

fn weather_service(server: &MockServer) -> WeatherService {
    WeatherService::new(
        api_client(server),
        SnapshotCache::new(Duration::from_secs(300)),
    )
}

fn geocoder(server: &MockServer) -> Geocoder {
    Geocoder::new(api_client(server), 5)
}

fn current_body() -> serde_json::Value {
    json!({
        "main": {"temp": 18.4, "feels_like": 17.9, "humidity": 62, "pressure": 1013},
        "wind": {"speed": 4.2, "deg": 225},
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "visibility": 10000,
        "sys": {"sunrise": 1715300000, "sunset": 1715350000}
    })
}

fn forecast_body() -> serde_json::Value {
    json!({
        "list": [
            {"dt": 1715310000, "main": {"temp": 14.0},
             "weather": [{"id": 801, "main": "Clouds", "description": "few clouds", "icon": "02d"}],
             "pop": 0.1},
            {"dt": 1715320800, "main": {"temp": 17.5},
             "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
             "pop": 0.6},
            {"dt": 1715396400, "main": {"temp": 12.0},
             "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
             "pop": 0.0}
        ],
        "city": {"timezone": 0}
    })
}

fn testville() -> Location {
    Location::new("Testville", 46.8182, 8.2275)
}

#[tokio::test]
async fn test_fetch_combines_both_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("appid", API_KEY))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    let snapshot = weather_service(&server).fetch(&testville()).await.unwrap();

    assert_eq!(snapshot.current.temp, 18.4);
    assert_eq!(snapshot.current.humidity, Some(62.0));
    assert_eq!(snapshot.current.primary().description, "clear sky");
    assert_eq!(snapshot.hourly.len(), 3);
    assert_eq!(snapshot.daily.len(), 2);
    // Day one: first-seen condition, widened range, max pop
    assert_eq!(snapshot.daily[0].summary.description, "few clouds");
    assert_eq!(snapshot.daily[0].temp.min, 14.0);
    assert_eq!(snapshot.daily[0].temp.max, 17.5);
    assert_eq!(snapshot.daily[0].pop, 0.6);
}

#[tokio::test]
async fn test_current_failure_fails_whole_fetch_with_stage() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({
                "cod": 401,
                "message": "Invalid API key"
            })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    let err = weather_service(&server).fetch(&testville()).await.unwrap_err();

    match err {
        SkycastError::Fetch { stage, message } => {
            assert_eq!(stage, FetchStage::Current);
            assert_eq!(message, "Invalid API key");
        }
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_forecast_failure_tags_forecast_stage() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({
                "cod": "404",
                "message": "city not found"
            })),
        )
        .mount(&server)
        .await;

    let err = weather_service(&server).fetch(&testville()).await.unwrap_err();

    assert!(matches!(
        err,
        SkycastError::Fetch {
            stage: FetchStage::Forecast,
            ..
        }
    ));
}

#[tokio::test]
async fn test_fresh_cache_hit_suppresses_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&server)
        .await;

    let service = weather_service(&server);
    let first = service.fetch(&testville()).await.unwrap();
    let second = service.fetch(&testville()).await.unwrap();

    assert_eq!(first, second);
    // Mock expectations (one call per endpoint) verify on drop
}

#[tokio::test]
async fn test_invalidation_forces_refetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(2)
        .mount(&server)
        .await;

    let service = weather_service(&server);
    let location = testville();
    service.fetch(&location).await.unwrap();
    service.cache().invalidate(&location);
    service.fetch(&location).await.unwrap();
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let server = MockServer::start().await;

    // First attempt breaks, the automatic retry recovers
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    let snapshot = weather_service(&server).fetch(&testville()).await.unwrap();
    assert_eq!(snapshot.current.temp, 18.4);
}

#[tokio::test]
async fn test_search_composes_display_names() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "springfield"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Springfield", "lat": 39.8017, "lon": -89.6437,
             "country": "US", "state": "Illinois"},
            {"name": "Springfield", "lat": -26.1792, "lon": 28.2474, "country": "ZA"}
        ])))
        .mount(&server)
        .await;

    let results = geocoder(&server).search("springfield").await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].name, "Springfield, Illinois, US");
    assert_eq!(results[1].name, "Springfield, ZA");
    assert_eq!(results[0].lat, 39.8017);
}

#[tokio::test]
async fn test_search_empty_result_set_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let results = geocoder(&server).search("xyzzy").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_blank_query_issues_no_network_call() {
    let server = MockServer::start().await;

    let results = geocoder(&server).search("   ").await.unwrap();

    assert!(results.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_failure_carries_upstream_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({
                "cod": 401,
                "message": "Invalid API key. Please see https://openweathermap.org/faq"
            })),
        )
        .mount(&server)
        .await;

    let err = geocoder(&server).search("london").await.unwrap_err();

    match err {
        SkycastError::Lookup { message } => {
            assert!(message.contains("Invalid API key"));
        }
        other => panic!("expected lookup error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_reverse_uses_first_place() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/reverse"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Seattle", "lat": 47.6062, "lon": -122.3321,
             "country": "US", "state": "Washington"}
        ])))
        .mount(&server)
        .await;

    let location = geocoder(&server).reverse(47.61, -122.33).await.unwrap();
    assert_eq!(location.name, "Seattle, Washington, US");
}

struct FixedPosition(f64, f64);

#[async_trait]
impl PositionSource for FixedPosition {
    async fn current_position(&self) -> Result<(f64, f64), SkycastError> {
        Ok((self.0, self.1))
    }
}

#[tokio::test]
async fn test_locate_resolves_named_location() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Seattle", "lat": 47.6062, "lon": -122.3321, "country": "US"}
        ])))
        .mount(&server)
        .await;

    let location = locate(
        &FixedPosition(47.6062, -122.3321),
        &geocoder(&server),
        Duration::from_secs(5),
    )
    .await
    .unwrap();

    assert_eq!(location.name, "Seattle, US");
}

#[tokio::test]
async fn test_locate_falls_back_to_coordinate_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/reverse"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let location = locate(
        &FixedPosition(47.6062, -122.3321),
        &geocoder(&server),
        Duration::from_secs(5),
    )
    .await
    .unwrap();

    assert_eq!(location.name, "47.6062, -122.3321");
    assert_eq!(location.lat, 47.6062);
}
