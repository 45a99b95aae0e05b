mod common;

use common::{birth, date, sample_chart};
use serde_json::json;
use skyprint::backend::{Backend, BackendError, HttpBackend};
use skyprint::chart::ChartEngine;
use skyprint::transits::TransitQuery;
use std::collections::BTreeMap;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chart_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "method": "placidus",
        "datetime_utc": "from_local_tz",
        "tz": "Europe/London",
        "lat": 51.5,
        "lng": -0.12,
        "planets": { "Sun": { "sign": 1, "lon": 56.2 }, "Moon": { "sign": 9, "lon": 281.0 } },
        "houses": { "H1": 100.5, "H2": 130.5 },
        "aspects": [ { "a": "Sun", "b": "Moon", "type": "trine", "orb": 4.8 } ],
        "meta": { "name": "Ada", "place": "London", "time_precision": "unknown" }
    })
}

fn backend(server: &MockServer) -> HttpBackend {
    HttpBackend::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_create_chart_posts_birth_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/charts/swiss"))
        .and(body_partial_json(json!({
            "name": "Ada",
            "date": "1990-05-17",
            "time": null,
            "time_precision": "unknown",
            "place": "London",
            "tz": "Europe/London"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_json("sw_abc")))
        .expect(1)
        .mount(&server)
        .await;

    let chart = backend(&server)
        .create_chart(ChartEngine::Swiss, &birth())
        .await
        .unwrap();

    assert_eq!(chart.id, "sw_abc");
    assert_eq!(chart.houses.ascendant(), 100.5);
    let names: Vec<&str> = chart.planets.iter().map(|(k, _)| k).collect();
    assert_eq!(names, vec!["Sun", "Moon"]);
    assert_eq!(chart.aspects[0].aspect_type, "trine");
}

#[tokio::test]
async fn test_http_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/charts/swiss"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string("Swiss Ephemeris not available yet (missing files)."),
        )
        .mount(&server)
        .await;

    let err = backend(&server)
        .create_chart(ChartEngine::Swiss, &birth())
        .await
        .unwrap_err();

    match err {
        BackendError::Http { status, body, endpoint } => {
            assert_eq!(status, 500);
            assert!(body.contains("not available"));
            assert_eq!(endpoint, "/api/charts/swiss");
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_demo_engine_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/charts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_json("demo_1")))
        .expect(1)
        .mount(&server)
        .await;

    let chart = backend(&server)
        .create_chart(ChartEngine::Demo, &birth())
        .await
        .unwrap();
    assert_eq!(chart.id, "demo_1");
}

#[tokio::test]
async fn test_reading_posts_chart_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/readings"))
        .and(body_partial_json(json!({
            "chart": { "id": "sw_abc", "datetime_utc": "from_local_tz", "lat": 51.5 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "sw_abc_r",
            "chart_id": "sw_abc",
            "signature": ["BigThree", "RelationshipFocus"],
            "sections": [ { "key": "venus.house.H7", "title": "Venus in 7th", "short": "", "long": "", "actions": [] } ],
            "meta": { "name": "Ada" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let chart: skyprint::Chart = serde_json::from_value(chart_json("sw_abc")).unwrap();
    let reading = backend(&server).create_reading(&chart).await.unwrap();

    assert_eq!(reading.id, "sw_abc_r");
    assert_eq!(reading.sections[0].title, "Venus in 7th");
    assert_eq!(reading.sections[0].action_list(), None);
}

#[tokio::test]
async fn test_transits_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/transits"))
        .and(query_param("date", "2024-03-01"))
        .and(query_param("days", "7"))
        .and(query_param("tz", "UTC"))
        .and(query_param("natal_json", r#"{"Moon":200.0,"Sun":10.0}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "events": [
                { "transit": "Mars", "natal": "Sun", "aspect": "square", "orb": 0.4, "date": "2024-03-01" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let natal: BTreeMap<String, f64> = sample_chart("c").planets.longitudes();
    let query = TransitQuery {
        date: date("2024-03-01"),
        days: 7,
        tz: "UTC".to_string(),
        natal,
    };
    let report = backend(&server).transits(&query).await.unwrap();

    assert_eq!(report.events.len(), 1);
    assert_eq!(report.events[0].natal, "Sun");
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/transits"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let query = TransitQuery {
        date: date("2024-03-01"),
        days: 7,
        tz: "UTC".to_string(),
        natal: BTreeMap::new(),
    };
    let err = backend(&server).transits(&query).await.unwrap_err();
    assert!(matches!(err, BackendError::Decode { .. }));
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/readings"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": "late" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let slow = HttpBackend::new(&server.uri(), Duration::from_millis(200)).unwrap();
    let chart: skyprint::Chart = serde_json::from_value(chart_json("sw_abc")).unwrap();
    let err = slow.create_reading(&chart).await.unwrap_err();
    assert!(matches!(err, BackendError::Timeout { .. }));
}
