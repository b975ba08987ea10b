//! Tests for the 7Timer client and the app flow against a mock HTTP server.

use chrono::NaiveDate;
use forecast_core::{
    App, Config, ForecastError, ForecastSource, LocationInput, RetrieverState, ServiceConfig,
    SevenTimerClient, WeatherSummary, Wind,
    error::{NO_SELECTION_MESSAGE, SERVICE_UNAVAILABLE_MESSAGE},
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn civil_light_body(date: u32, weather: &str, wind: i64) -> serde_json::Value {
    serde_json::json!({
        "product": "civillight",
        "init": "2024061500",
        "dataseries": [
            {
                "date": date,
                "weather": weather,
                "temp2m": { "max": 31, "min": 22 },
                "wind10m_max": wind
            },
            {
                "date": date + 1,
                "weather": "clear",
                "temp2m": { "max": 29, "min": 21 },
                "wind10m_max": 2
            }
        ]
    })
}

fn config_for(server: &MockServer) -> Config {
    Config {
        service: ServiceConfig {
            api_base: server.uri(),
            image_base: server.uri(),
            ..ServiceConfig::default()
        },
        log_filter: None,
    }
}

fn client_for(server: &MockServer) -> SevenTimerClient {
    SevenTimerClient::new(&config_for(server).service).unwrap()
}

#[tokio::test]
async fn client_requests_civillight_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bin/api.pl"))
        .and(query_param("lon", "34.78"))
        .and(query_param("lat", "32.08"))
        .and(query_param("product", "civillight"))
        .and(query_param("output", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(civil_light_body(20240615, "pcloudy", 3)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.civil_light(32.08, 34.78).await.unwrap();

    assert_eq!(response.dataseries.len(), 2);

    let summary = WeatherSummary::try_from(response).unwrap();
    assert_eq!(summary.weather, "pcloudy");
    assert_eq!(summary.min_temp, 22.0);
    assert_eq!(summary.max_temp, 31.0);
    assert_eq!(summary.wind, Wind::Level(3));
    assert_eq!(summary.date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
}

#[tokio::test]
async fn client_accepts_json_served_as_html() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bin/api.pl"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(civil_light_body(20240615, "clear", 1).to_string())
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let response = client_for(&mock_server).civil_light(0.0, 0.0).await.unwrap();
    assert_eq!(response.dataseries[0].wind10m_max, 1);
}

#[tokio::test]
async fn client_rejects_non_2xx_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bin/api.pl"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).civil_light(1.0, 2.0).await.unwrap_err();

    match err {
        ForecastError::Status { status, status_text } => {
            assert_eq!(status, 503);
            assert_eq!(status_text, "Service Unavailable");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn client_reports_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bin/api.pl"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).civil_light(1.0, 2.0).await.unwrap_err();

    assert!(matches!(err, ForecastError::Malformed(_)), "got {err:?}");
    assert!(err.to_string().contains("maintenance"));
}

#[tokio::test]
async fn client_reports_transport_failure() {
    // Nothing listens on port 1 locally.
    let service = ServiceConfig { api_base: "http://127.0.0.1:1".into(), ..ServiceConfig::default() };

    let client = SevenTimerClient::new(&service).unwrap();
    let err = client.civil_light(1.0, 2.0).await.unwrap_err();

    assert!(matches!(err, ForecastError::Transport(_)), "got {err:?}");
    assert_eq!(err.user_message(), SERVICE_UNAVAILABLE_MESSAGE);
}

#[tokio::test]
async fn app_fetch_without_selection_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(civil_light_body(20240615, "clear", 1)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut app = App::from_config(&config_for(&mock_server)).unwrap();
    app.add_location(LocationInput::new("Tel Aviv", 32.08, 34.78));

    let state = app.fetch().await;
    assert_eq!(*state, RetrieverState::Failure(NO_SELECTION_MESSAGE.to_string()));
}

#[tokio::test]
async fn app_add_select_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bin/api.pl"))
        .and(query_param("lat", "32.08"))
        .respond_with(ResponseTemplate::new(200).set_body_json(civil_light_body(20240615, "tsrain", 1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut app = App::from_config(&config_for(&mock_server)).unwrap();
    let errors = app.add_location(LocationInput::from_raw(" Tel Aviv ", "32.08", "34.78"));
    assert!(errors.is_valid());

    assert!(app.select("Tel Aviv"));
    app.fetch().await;

    let retriever = app.retriever();
    let summary = retriever.summary().expect("summary after successful fetch");
    assert_eq!(summary.weather, "tsrain");
    assert_eq!(summary.wind, Wind::Calm);
    assert_eq!(summary.wind.to_string(), "No wind");
    assert!(!retriever.is_loading());

    let image = retriever.image_url().unwrap();
    assert!(image.starts_with(&format!("{}/bin/civillight.php?%20lon=34.78&lat=32.08", mock_server.uri())));
}

#[tokio::test]
async fn app_service_error_is_generic() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bin/api.pl"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let mut app = App::from_config(&config_for(&mock_server)).unwrap();
    app.add_location(LocationInput::new("Nowhere", 0.0, 0.0));
    app.select("Nowhere");
    app.fetch().await;

    let retriever = app.retriever();
    assert_eq!(retriever.error_message(), Some(SERVICE_UNAVAILABLE_MESSAGE));
    assert!(matches!(retriever.last_error(), Some(ForecastError::Status { status: 404, .. })));
}

#[tokio::test]
async fn app_select_unknown_name() {
    let mock_server = MockServer::start().await;
    let mut app = App::from_config(&config_for(&mock_server)).unwrap();

    assert!(!app.select("Atlantis"));
    assert!(app.retriever().selected().is_none());
}

#[tokio::test]
async fn app_list_mutations_go_through_store() {
    let mock_server = MockServer::start().await;
    let mut app = App::from_config(&config_for(&mock_server)).unwrap();

    assert!(app.add_location(LocationInput::new("A", 1.0, 1.0)).is_valid());
    assert!(app.add_location(LocationInput::new("B", 2.0, 2.0)).is_valid());
    let snapshot = app.locations().clone();

    let errors = app.add_location(LocationInput::new("A", 3.0, 3.0));
    assert_eq!(errors.name_message(), "Name is already in use");
    assert_eq!(app.locations(), &snapshot);

    app.remove_location("A");
    app.remove_location("missing");
    let names: Vec<&str> = app.locations().iter().map(|loc| loc.name()).collect();
    assert_eq!(names, ["B"]);
    assert_eq!(snapshot.len(), 2);
}
