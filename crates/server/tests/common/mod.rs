//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with mock dependencies injected, enabling E2E testing without reaching
//! the real catalog.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use marquee_core::{
    catalog::DEFAULT_IMAGE_BASE_URL,
    config::{CatalogConfig, DatabaseConfig, SearchConfig, ServerConfig, TrendingConfig},
    create_debouncer, create_trend_system,
    testing::{MockCatalog, MockTrendStore},
    Config, SearchOrchestrator, SearchOrchestratorConfig, SqliteTrendStore, TrendStore,
};
use marquee_server::api::{create_router, spawn_view_updates, WsBroadcaster};
use marquee_server::state::AppState;

/// Re-export fixtures for test convenience
pub use marquee_core::testing::fixtures;

/// Token configured for every fixture; must never appear in responses.
pub const TEST_API_TOKEN: &str = "test-secret-token";

/// Test fixture for E2E testing with mock dependencies.
///
/// Provides an in-process server with a controllable mock catalog and a
/// trend store (SQLite in a temp dir, or a failing in-memory mock).
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_lookup() {
///     let fixture = TestFixture::new().await;
///     fixture.catalog.set_results("dune", vec![fixtures::movie(1, "Dune", None)]).await;
///
///     let response = fixture.get("/api/v1/movies?query=dune").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock catalog - configure search results
    pub catalog: Arc<MockCatalog>,
    /// Trend store backing the fixture
    pub trend_store: Arc<dyn TrendStore>,
    /// Orchestrator shared with the router
    pub orchestrator: Arc<SearchOrchestrator>,
    /// Temporary directory for test database
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Raw response for non-JSON endpoints
#[derive(Debug)]
pub struct TextResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestFixture {
    /// Create a new test fixture with default mocks.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        let catalog = Arc::new(MockCatalog::new());

        let config = Config {
            catalog: CatalogConfig {
                api_token: TEST_API_TOKEN.to_string(),
                base_url: "http://127.0.0.1:9/3".to_string(),
                image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
                timeout_secs: 5,
            },
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            database: DatabaseConfig {
                path: db_path.clone(),
            },
            search: SearchConfig {
                debounce_ms: test_config.debounce_ms,
            },
            trending: TrendingConfig::default(),
        };

        // Create trend store
        let trend_store: Arc<dyn TrendStore> = if test_config.failing_store {
            let store = MockTrendStore::new();
            store.set_fail_reads(true);
            store.set_fail_writes(true);
            Arc::new(store)
        } else {
            Arc::new(
                SqliteTrendStore::new(&db_path, DEFAULT_IMAGE_BASE_URL)
                    .expect("Failed to create trend store"),
            )
        };

        // Create trend system and spawn its writer
        let (trend_handle, trend_writer) = create_trend_system(Arc::clone(&trend_store), 100);
        tokio::spawn(trend_writer.run());

        // Create debouncer
        let (input, debouncer) = create_debouncer(config.search.debounce());
        let settled = debouncer.subscribe();
        tokio::spawn(debouncer.run());

        let orchestrator = Arc::new(SearchOrchestrator::new(
            Arc::clone(&catalog) as _,
            Arc::clone(&trend_store),
            trend_handle,
            SearchOrchestratorConfig::from(&config),
        ));

        let ws_broadcaster = WsBroadcaster::default();
        spawn_view_updates(
            &orchestrator,
            ws_broadcaster.clone(),
            DEFAULT_IMAGE_BASE_URL.to_string(),
        );

        if test_config.start_orchestrator {
            orchestrator.start(settled);
        }

        let state = Arc::new(AppState::new(
            config,
            Arc::clone(&trend_store),
            Arc::clone(&orchestrator),
            input,
            ws_broadcaster,
        ));

        let router = create_router(state);

        Self {
            router,
            catalog,
            trend_store,
            orchestrator,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request without a body.
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request("POST", path, None).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a PUT request with custom content type (for testing rejections).
    pub async fn put_with_content_type(
        &self,
        path: &str,
        body: &str,
        content_type: &str,
    ) -> TestResponse {
        let request = Request::builder()
            .method("PUT")
            .uri(path)
            .header("Content-Type", content_type)
            .body(Body::from(body.to_string()))
            .unwrap();

        let (status, _, bytes) = self.send(request).await;
        TestResponse {
            status,
            body: parse_json(&bytes),
        }
    }

    /// Send a GET request and return the raw body.
    pub async fn get_text(&self, path: &str) -> TextResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let (status, content_type, bytes) = self.send(request).await;
        TextResponse {
            status,
            content_type,
            body: String::from_utf8_lossy(&bytes).to_string(),
        }
    }

    /// Poll GET `path` until `check` accepts the body or two seconds pass.
    pub async fn wait_for<F: Fn(&Value) -> bool>(&self, path: &str, check: F) -> Option<Value> {
        for _ in 0..100 {
            let response = self.get(path).await;
            if check(&response.body) {
                return Some(response.body);
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        None
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let (status, _, bytes) = self.send(request).await;
        TestResponse {
            status,
            body: parse_json(&bytes),
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        (status, content_type, body_bytes.to_vec())
    }
}

fn parse_json(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(bytes).unwrap_or(Value::Null)
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Start the orchestrator (search loop + initial trending load)
    pub start_orchestrator: bool,
    /// Use a trend store whose reads and writes always fail
    pub failing_store: bool,
    /// Debounce quiet period
    pub debounce_ms: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            start_orchestrator: false,
            failing_store: false,
            debounce_ms: 20,
        }
    }
}

impl TestConfig {
    /// Create config with the orchestrator running.
    pub fn started() -> Self {
        Self {
            start_orchestrator: true,
            ..Default::default()
        }
    }

    /// Create config with a failing trend store.
    pub fn with_failing_store() -> Self {
        Self {
            failing_store: true,
            ..Default::default()
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}

/// Helper to assert a JSON path equals expected value.
#[macro_export]
macro_rules! assert_json_path {
    ($json:expr, $path:expr, $expected:expr) => {
        let actual = &$json[$path];
        assert_eq!(
            actual, &$expected,
            "Path '{}' expected {:?}, got {:?}",
            $path, $expected, actual
        );
    };
}
