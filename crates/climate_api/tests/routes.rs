use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use climate_api::{create_router, AppState};
use rusqlite::Connection;
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt;

const STATIONS: &[(&str, &str)] = &[
    ("USC00519397", "WAIKIKI 717.2, HI US"),
    ("USC00513117", "KANEOHE 838.1, HI US"),
];

const OBSERVATIONS: &[(&str, &str, Option<f64>, f64)] = &[
    ("USC00519397", "2016-08-22", Some(0.1), 70.0),
    ("USC00519397", "2016-08-23", None, 72.0),
    ("USC00519397", "2017-01-01", Some(0.0), 62.0),
    ("USC00513117", "2017-01-15", Some(0.5), 66.0),
    ("USC00513117", "2017-01-31", Some(0.2), 74.0),
    ("USC00513117", "2017-02-01", None, 80.0),
    ("USC00519397", "2017-08-23", Some(0.0), 81.0),
];

struct TestApp {
    dir: TempDir,
    router: Router,
}

impl TestApp {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hawaii.sqlite");
        seed(&path);
        Self {
            router: create_router(AppState::new(path)),
            dir,
        }
    }

    async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let resp = self
            .router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    async fn get_json(&self, uri: &str) -> Value {
        let (status, body) = self.get(uri).await;
        assert_eq!(status, StatusCode::OK, "GET {uri}");
        serde_json::from_slice(&body).unwrap()
    }
}

#[tokio::test]
async fn index_lists_every_route() {
    let app = TestApp::new();

    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);

    let html = String::from_utf8(body).unwrap();
    for route in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/start_date",
        "/api/v1.0/start_date/end_date",
    ] {
        assert!(html.contains(route), "index is missing {route}");
    }
}

#[tokio::test]
async fn precipitation_returns_one_object_per_observation() {
    let app = TestApp::new();

    let body = app.get_json("/api/v1.0/precipitation").await;
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), OBSERVATIONS.len());

    for record in records {
        let object = record.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["date", "precipitation"]);
    }

    assert_eq!(records[0], json!({"date": "2016-08-22", "precipitation": 0.1}));
    assert_eq!(records[1], json!({"date": "2016-08-23", "precipitation": null}));
}

#[tokio::test]
async fn precipitation_serves_rows_with_missing_temperature() {
    let app = TestApp::new();
    {
        let conn = Connection::open(app.dir.path().join("hawaii.sqlite")).unwrap();
        conn.execute(
            "INSERT INTO measurement (station, date, prcp, tobs)
             VALUES ('USC00519397', '2017-08-24', 0.3, NULL);",
            [],
        )
        .unwrap();
    }

    let body = app.get_json("/api/v1.0/precipitation").await;
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), OBSERVATIONS.len() + 1);
    assert_eq!(
        records.last().unwrap(),
        &json!({"date": "2017-08-24", "precipitation": 0.3})
    );

    let summary = app.get_json("/api/v1.0/2017-01-01").await;
    assert_eq!(summary.as_array().unwrap().len(), 3);
    assert_eq!(summary[0], json!(62.0));
}

#[tokio::test]
async fn stations_returns_flat_name_list() {
    let app = TestApp::new();

    let body = app.get_json("/api/v1.0/stations").await;
    assert_eq!(body, json!(["WAIKIKI 717.2, HI US", "KANEOHE 838.1, HI US"]));
}

#[tokio::test]
async fn tobs_returns_last_twelve_months_from_anchor() {
    let app = TestApp::new();

    let body = app.get_json("/api/v1.0/tobs").await;
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), OBSERVATIONS.len() - 1);

    for record in records {
        let date = record["date"].as_str().unwrap();
        assert!(date >= "2016-08-23", "{date} is before the window");
        assert!(record["temperature"].is_number());
        assert_eq!(record.as_object().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn summary_between_dates_is_ordered_min_avg_max() {
    let app = TestApp::new();

    let body = app.get_json("/api/v1.0/2017-01-01/2017-01-31").await;
    let values = body.as_array().unwrap();
    assert_eq!(values.len(), 3);

    let min = values[0].as_f64().unwrap();
    let avg = values[1].as_f64().unwrap();
    let max = values[2].as_f64().unwrap();
    assert_eq!(min, 62.0);
    assert_eq!(max, 74.0);
    assert!(min <= avg && avg <= max);
}

#[tokio::test]
async fn summary_since_start_date_covers_through_latest_record() {
    let app = TestApp::new();

    let body = app.get_json("/api/v1.0/2017-02-01").await;
    assert_eq!(body, json!([80.0, 80.5, 81.0]));
}

#[tokio::test]
async fn summary_without_matching_rows_is_all_null() {
    let app = TestApp::new();

    let future = app.get_json("/api/v1.0/2100-01-01").await;
    assert_eq!(future, json!([null, null, null]));

    let reversed = app.get_json("/api/v1.0/2017-01-31/2017-01-01").await;
    assert_eq!(reversed, json!([null, null, null]));
}

#[tokio::test]
async fn malformed_dates_are_not_rejected() {
    let app = TestApp::new();

    let body = app.get_json("/api/v1.0/yesterday").await;
    assert_eq!(body, json!([null, null, null]));
}

#[tokio::test]
async fn repeated_requests_return_identical_bodies() {
    let app = TestApp::new();

    for uri in ["/api/v1.0/precipitation", "/api/v1.0/tobs", "/api/v1.0/2016-08-23"] {
        let first = app.get(uri).await;
        let second = app.get(uri).await;
        assert_eq!(first, second, "GET {uri}");
    }
}

#[tokio::test]
async fn custom_anchor_moves_tobs_window() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hawaii.sqlite");
    seed(&path);
    let anchor = chrono::NaiveDate::from_ymd_opt(2018, 1, 31).unwrap();
    let app = TestApp {
        router: create_router(AppState::with_anchor(path, anchor)),
        dir,
    };

    let body = app.get_json("/api/v1.0/tobs").await;
    let dates: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["date"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(dates, vec!["2017-01-31", "2017-02-01", "2017-08-23"]);
}

#[tokio::test]
async fn missing_dataset_answers_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_router(AppState::new(dir.path().join("missing.sqlite")));

    let resp = router
        .oneshot(
            Request::builder()
                .uri("/api/v1.0/stations")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert!(error["error"]
        .as_str()
        .unwrap()
        .starts_with("dataset unavailable"));
}

#[tokio::test]
async fn unknown_nested_path_is_not_found() {
    let app = TestApp::new();

    let (status, _) = app.get("/api/v1.0/2017-01-01/2017-01-31/extra").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn seed(path: &Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE measurement (
            id INTEGER PRIMARY KEY,
            station TEXT,
            date TEXT,
            prcp FLOAT,
            tobs FLOAT
        );
        CREATE TABLE station (
            id INTEGER PRIMARY KEY,
            station TEXT,
            name TEXT,
            latitude FLOAT,
            longitude FLOAT,
            elevation FLOAT
        );",
    )
    .unwrap();

    for (station, name) in STATIONS {
        conn.execute(
            "INSERT INTO station (station, name) VALUES (?1, ?2);",
            (station, name),
        )
        .unwrap();
    }

    for (station, date, prcp, tobs) in OBSERVATIONS {
        conn.execute(
            "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4);",
            (station, date, prcp, tobs),
        )
        .unwrap();
    }
}
