use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    http::{StatusCode, header},
};
use chrono::{DateTime, TimeZone, Utc};
use civic_api::{
    build_registry, build_router, run,
    config::{Environment, Settings},
    state::AppState,
};
use civic_core::db::DbConfig;
use civic_core::{CivicRepository, CouncilMember, Project, RepositoryError, TaxRecord};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Empty or failing store.
struct StubRepository {
    failure: Option<RepositoryError>,
}

impl StubRepository {
    fn empty() -> Self {
        Self { failure: None }
    }

    fn failing(message: &str) -> Self {
        Self {
            failure: Some(RepositoryError::Database(message.to_string())),
        }
    }

    fn check(&self) -> Result<(), RepositoryError> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CivicRepository for StubRepository {
    async fn database_time(&self) -> Result<DateTime<Utc>, RepositoryError> {
        self.check()?;
        Ok(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap())
    }

    async fn list_tax_records(&self) -> Result<Vec<TaxRecord>, RepositoryError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn list_council_members(&self) -> Result<Vec<CouncilMember>, RepositoryError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, RepositoryError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn close(&self) {}
}

fn settings(environment: Environment) -> Settings {
    Settings {
        environment,
        images_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/images"),
        ..Settings::default()
    }
}

fn router_with(repo: impl CivicRepository + 'static, environment: Environment) -> Router {
    build_router(AppState::new(Box::new(repo), settings(environment))).unwrap()
}

async fn seeded_router() -> Router {
    let repo = build_registry()
        .create(&DbConfig::default())
        .await
        .expect("seeded sqlite store");
    build_router(AppState::new(repo, settings(Environment::Development))).unwrap()
}

/// Serve `app` on an ephemeral port and return its base URL.
async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    format!("http://{address}")
}

async fn send(app: Router, uri: &str, origin: Option<&str>) -> reqwest::Response {
    let base = spawn(app).await;
    let mut request = reqwest::Client::new().get(format!("{base}{uri}"));
    if let Some(origin) = origin {
        request = request.header(header::ORIGIN, origin);
    }
    request.send().await.expect("request")
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = send(app, uri, None).await;
    let status = response.status();
    let bytes = response.bytes().await.expect("body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn health_check_reports_store_time() {
    let app = router_with(StubRepository::empty(), Environment::Development);

    let (status, body) = get(app, "/api/test-db").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": "Database connection successful!",
            "time": "2024-03-01T12:30:00.000Z",
        })
    );
}

#[tokio::test]
async fn empty_collections_are_not_found() {
    let cases = [
        ("/api/tax-records", "No tax records found."),
        ("/api/council-members", "No council members found."),
        ("/api/projects", "No projects found."),
    ];

    for (uri, message) in cases {
        let app = router_with(StubRepository::empty(), Environment::Development);

        let (status, body) = get(app, uri).await;

        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({ "error": message }), "{uri}");
    }
}

#[tokio::test]
async fn store_failure_exposes_message_in_development() {
    let app = router_with(StubRepository::failing("connection reset"), Environment::Development);

    let (status, body) = get(app, "/api/projects").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Database error: connection reset" }));
}

#[tokio::test]
async fn store_failure_is_generic_in_production() {
    for uri in ["/api/test-db", "/api/tax-records", "/api/council-members", "/api/projects"] {
        let app = router_with(StubRepository::failing("password authentication failed"), Environment::Production);

        let (status, body) = get(app, uri).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(body, json!({ "error": "Internal server error" }), "{uri}");
    }
}

#[tokio::test]
async fn not_found_is_unchanged_in_production() {
    let app = router_with(StubRepository::empty(), Environment::Production);

    let (status, body) = get(app, "/api/tax-records").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "No tax records found." }));
}

#[tokio::test]
async fn tax_records_are_listed_in_id_order() {
    let (status, body) = get(seeded_router().await, "/api/tax-records").await;

    assert_eq!(status, StatusCode::OK);
    let years: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["fiscal_year"].as_str().unwrap())
        .collect();
    assert_eq!(years, vec!["2021-2022", "2022-2023", "2023-2024"]);
}

#[tokio::test]
async fn projects_serialize_status_labels_and_exact_decimals() {
    let (status, body) = get(seeded_router().await, "/api/projects").await;

    assert_eq!(status, StatusCode::OK);
    let bike_lanes = &body[1];
    assert_eq!(bike_lanes["name"], "Citywide Bike Lane Network");
    assert_eq!(bike_lanes["status"], "In Progress");
    assert_eq!(bike_lanes["budget_allocation"], "12750000.50");
    assert_eq!(bike_lanes["start_date"], "2023-09-01");
    assert_eq!(bike_lanes["end_date"], Value::Null);
}

#[tokio::test]
async fn council_members_include_current_flag() {
    let (status, body) = get(seeded_router().await, "/api/council-members").await;

    assert_eq!(status, StatusCode::OK);
    let flags: Vec<bool> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|member| member["is_current"].as_bool().unwrap())
        .collect();
    assert_eq!(flags, vec![true, true, false]);
}

#[tokio::test]
async fn query_strings_are_ignored() {
    let (status, body) = get(seeded_router().await, "/api/tax-records?year=2022-2023").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn images_are_served_from_configured_directory() {
    let app = router_with(StubRepository::empty(), Environment::Development);

    let response = send(app, "/images/seal.svg", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
}

#[tokio::test]
async fn missing_image_is_not_found() {
    let app = router_with(StubRepository::empty(), Environment::Development);

    let (status, _) = get(app, "/images/nope.png").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let app = router_with(StubRepository::empty(), Environment::Development);

    let response = send(app, "/api/test-db", Some("https://tino.example")).await;

    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn cors_echoes_configured_origin() {
    let state = AppState::new(
        Box::new(StubRepository::empty()),
        Settings {
            cors_origin: "https://tino.example".to_string(),
            ..settings(Environment::Development)
        },
    );
    let app = build_router(Arc::clone(&state)).unwrap();

    let response = send(app, "/api/test-db", Some("https://tino.example")).await;

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://tino.example"
    );
}

#[tokio::test]
async fn unknown_backend_fails_to_start() {
    let config = DbConfig {
        backend: "mongo".to_string(),
        ..DbConfig::default()
    };

    let result = build_registry().create(&config).await;

    assert!(matches!(result, Err(RepositoryError::Configuration(_))));
}

#[tokio::test]
async fn unreachable_store_stops_startup_before_binding() {
    let port = {
        let free = TcpListener::bind("0.0.0.0:0").await.unwrap();
        free.local_addr().unwrap().port()
    };
    let settings = Settings {
        port,
        backend: "sqlite".to_string(),
        database_url: Some("/nonexistent-dir/x.db".to_string()),
        ..settings(Environment::Development)
    };

    let result = tokio::time::timeout(Duration::from_secs(10), run(settings))
        .await
        .expect("run should return instead of serving");

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("Failed to connect to the database"), "{err:#}");
    TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("port should still be free");
}
