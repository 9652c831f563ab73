//! WeatherAPI client and widget behaviour against a mock HTTP server.

use weather_core::{
    FetchError, SubmitEvent, View, WeatherApiProvider, WeatherProvider, WeatherWidget, render,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn lahore_body() -> serde_json::Value {
    serde_json::json!({
        "location": {
            "name": "Lahore",
            "region": "Punjab",
            "country": "Pakistan",
            "lat": 31.55,
            "lon": 74.34,
            "localtime": "2024-10-04 14:00"
        },
        "current": {
            "temp_c": 31,
            "temp_f": 87.8,
            "condition": { "text": "Sunny", "icon": "//icon.url/sunny.png", "code": 1000 },
            "humidity": 40
        }
    })
}

fn not_found_body() -> serde_json::Value {
    serde_json::json!({ "error": { "code": 1006, "message": "No matching location found." } })
}

fn provider_for(server: &MockServer) -> WeatherApiProvider {
    WeatherApiProvider::with_endpoint(server.uri(), Some("TEST_KEY".to_string()))
}

/// Address nothing is listening on.
fn refused_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn current_returns_snapshot_for_known_city() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("key", "TEST_KEY"))
        .and(query_param("q", "Lahore"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lahore_body()))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = provider_for(&server)
        .current("Lahore")
        .await
        .expect("request succeeds")
        .expect("body describes a location");

    assert_eq!(snapshot.location_label(), "Lahore, Punjab, Pakistan");
    assert_eq!(snapshot.temperature_label(), "31°C");
    assert_eq!(snapshot.current.condition.text, "Sunny");
}

#[tokio::test]
async fn provider_error_body_is_absent_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(not_found_body()))
        .mount(&server)
        .await;

    let result = provider_for(&server).current("zzzznotacity").await;

    assert!(matches!(result, Ok(None)), "expected Ok(None), got: {result:?}");
}

#[tokio::test]
async fn city_is_percent_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("q", "New York & Co"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lahore_body()))
        .expect(1)
        .mount(&server)
        .await;

    let result = provider_for(&server).current("New York & Co").await;
    assert!(matches!(result, Ok(Some(_))), "got: {result:?}");

    let requests = server.received_requests().await.expect("recording enabled");
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(!query.contains(' '), "raw query must not contain spaces: {query}");
    assert!(query.contains("%26"), "ampersand must be escaped: {query}");
}

#[tokio::test]
async fn proxy_endpoint_sends_no_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/weather/current.json"))
        .and(query_param("q", "Karachi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lahore_body()))
        .mount(&server)
        .await;

    let provider =
        WeatherApiProvider::with_endpoint(format!("{}/api/weather/", server.uri()), None);
    let result = provider.current("Karachi").await;
    assert!(matches!(result, Ok(Some(_))), "got: {result:?}");

    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests[0].url.query_pairs().all(|(k, _)| k != "key"));
}

#[tokio::test]
async fn non_json_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let result = provider_for(&server).current("Lahore").await;

    assert!(
        matches!(result, Err(FetchError::Decode { status: 502, .. })),
        "expected Decode error, got: {result:?}"
    );
}

#[tokio::test]
async fn refused_connection_is_request_error() {
    let provider = WeatherApiProvider::with_endpoint(refused_endpoint(), Some("KEY".into()));

    let result = provider.current("Lahore").await;

    assert!(matches!(result, Err(FetchError::Request { .. })), "got: {result:?}");
}

#[tokio::test]
async fn widget_mount_issues_one_empty_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("q", ""))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": { "code": 1003, "message": "Parameter q is missing." }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut widget = WeatherWidget::new(provider_for(&server));
    widget.on_mount().await;

    assert_eq!(widget.view(), View::Prompt);
}

#[tokio::test]
async fn widget_renders_lahore_scenario() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("q", "Lahore"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lahore_body()))
        .mount(&server)
        .await;

    let mut widget = WeatherWidget::new(provider_for(&server));
    widget.on_city_input_change("Lahore");
    let mut event = SubmitEvent::new();
    widget.on_submit(&mut event).await;

    assert!(event.default_prevented());
    assert!(!widget.is_loading());

    let text = render(&widget.view());
    assert!(text.contains("Lahore, Punjab, Pakistan"));
    assert!(text.contains("31°C"));
    assert!(text.contains("Sunny"));
    assert!(text.contains("https://icon.url/sunny.png"));
}

#[tokio::test]
async fn widget_prompts_for_unknown_city() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(not_found_body()))
        .mount(&server)
        .await;

    let mut widget = WeatherWidget::new(provider_for(&server));
    widget.on_city_input_change("zzzznotacity");
    widget.on_submit(&mut SubmitEvent::new()).await;

    assert_eq!(widget.view(), View::Prompt);
    assert_eq!(render(&widget.view()), weather_core::render::PROMPT_MESSAGE);
}

#[tokio::test]
async fn widget_survives_offline_provider() {
    let provider = WeatherApiProvider::with_endpoint(refused_endpoint(), Some("KEY".into()));
    let mut widget = WeatherWidget::new(provider);

    widget.on_city_input_change("Lahore");
    widget.on_submit(&mut SubmitEvent::new()).await;

    assert!(!widget.is_loading());
    assert!(widget.weather().is_none());
    assert_eq!(widget.view(), View::Prompt);
}
