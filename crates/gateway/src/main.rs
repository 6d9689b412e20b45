//! Citenet API Gateway
//!
//! Serves the laid-out citation network to the renderer.
//! Handles:
//! - Corpus fetch and one-time graph build (cached)
//! - Title filtering and reset over the cached graph
//! - Papers-per-year trends
//! - Observability (logging, metrics, tracing)

mod handlers;
mod middleware;
mod service;

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use citenet_common::{
    config::{AppConfig, CorpusKind, ObservabilityConfig},
    db::DbPool,
    errors::AppError,
    metrics::{self, BUILD_BUCKETS, LATENCY_BUCKETS},
    CorpusSource, JsonCorpus, Repository,
};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::service::GraphService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub graphs: Arc<GraphService>,
    pub metrics: Option<PrometheusHandle>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match std::env::var("APP_CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path)?,
        Err(_) => AppConfig::load()?,
    };

    // Initialize tracing
    init_tracing(&config.observability);

    info!(
        service = %config.observability.service_name,
        "Starting Citenet API Gateway v{}",
        citenet_common::VERSION
    );

    config.layout.validate().map_err(|e| {
        tracing::error!(error = %e, "Invalid layout configuration");
        e
    })?;

    let config = Arc::new(config);

    // Initialize metrics
    let metrics_handle = install_metrics_recorder();
    metrics::register_metrics();

    // Connect the corpus source
    let source = corpus_source(&config).await?;
    let graphs = Arc::new(GraphService::new(source, config.layout.clone()));

    // Warm the cache; a failure here is retried on the first request
    if let Err(e) = graphs.snapshot().await {
        warn!(error = %e, "Initial citation graph build failed");
    }

    if config.observability.metrics_port != 0 {
        if let Some(handle) = metrics_handle.clone() {
            spawn_metrics_server(config.observability.metrics_port, handle);
        }
    }

    // Create app state
    let state = AppState {
        config: config.clone(),
        graphs,
        metrics: metrics_handle,
    };

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.json_logging {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// Install the Prometheus recorder; metrics stay no-ops if this fails
fn install_metrics_recorder() -> Option<PrometheusHandle> {
    let installed = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Suffix("request_duration_seconds".to_string()),
            LATENCY_BUCKETS,
        )
        .and_then(|builder| {
            builder.set_buckets_for_metric(
                Matcher::Suffix("graph_build_duration_seconds".to_string()),
                BUILD_BUCKETS,
            )
        })
        .and_then(|builder| builder.install_recorder());

    match installed {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!(error = %e, "Failed to install Prometheus recorder, metrics disabled");
            None
        }
    }
}

fn spawn_metrics_server(port: u16, handle: PrometheusHandle) {
    tokio::spawn(async move {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let app = Router::new().route("/metrics", get(move || async move { handle.render() }));

        match tokio::net::TcpListener::bind(addr).await {
            Ok(listener) => {
                info!("Metrics listening on {}", addr);
                if let Err(e) = axum::serve(listener, app).await {
                    warn!(error = %e, "Metrics server stopped");
                }
            }
            Err(e) => warn!(error = %e, "Failed to bind metrics port"),
        }
    });
}

/// Build the configured corpus source
async fn corpus_source(config: &AppConfig) -> Result<Arc<dyn CorpusSource>, AppError> {
    match config.corpus.source {
        CorpusKind::Database => {
            info!("Connecting to database...");
            let db = DbPool::new(&config.database).await?;
            Ok(Arc::new(Repository::new(db)))
        }
        CorpusKind::File => {
            let path = config.corpus.path.as_deref().ok_or_else(|| AppError::Configuration {
                message: "corpus.path is required when corpus.source = \"file\"".to_string(),
            })?;
            info!(path, "Using JSON corpus file");
            Ok(Arc::new(JsonCorpus::new(path)))
        }
    }
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    let timeout = TimeoutLayer::new(state.config.request_timeout());

    // API routes
    let api_routes = Router::new()
        .route("/citation-network", get(handlers::citations::get_network))
        .route("/citation-network/reset", post(handlers::citations::reset_network))
        .route("/citation-network/refresh", post(handlers::citations::refresh_network))
        .route("/trends", get(handlers::citations::get_trends))
        .route_layer(from_fn(middleware::track_requests));

    // Compose the app
    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        .route("/metrics", get(handlers::metrics::metrics))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(timeout)
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use citenet_common::{InMemoryCorpus, LayoutConfig, PaperRecord};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app_with(source: Arc<dyn CorpusSource>) -> Router {
        let layout = LayoutConfig { seed: Some(1), ..LayoutConfig::default() };
        let config = AppConfig { layout: layout.clone(), ..AppConfig::default() };
        create_router(AppState {
            config: Arc::new(config),
            graphs: Arc::new(GraphService::new(source, layout)),
            metrics: None,
        })
    }

    fn app() -> Router {
        app_with(Arc::new(InMemoryCorpus::new(vec![
            PaperRecord::new("P1", "Neural machine translation")
                .with_year(2014)
                .with_references(["P2", "P9"]),
            PaperRecord::new("P2", "Sequence to sequence learning")
                .with_year(2014)
                .with_references(["P3"]),
            PaperRecord::new("P3", "Neural Turing machines").with_year(2014),
            PaperRecord::new("P4", "Random forests"),
        ])))
    }

    async fn call(app: Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_full_network() {
        let (status, body) = call(app(), Method::GET, "/api/citation-network").await;
        assert_eq!(status, StatusCode::OK);

        assert_eq!(body["nodes"].as_array().unwrap().len(), 4);
        assert_eq!(body["edges"].as_array().unwrap().len(), 2);
        assert_eq!(body["stats"]["connectedCount"], 3);
        assert!(body.get("query").is_none());

        let first = &body["nodes"][0];
        assert_eq!(first["id"], "P1");
        assert_eq!(first["isConnected"], true);
        assert!(first["x"].is_f64() && first["y"].is_f64());
        assert_eq!(body["nodes"][3]["isConnected"], false);
    }

    #[tokio::test]
    async fn test_filtered_network_is_induced() {
        let (status, body) = call(app(), Method::GET, "/api/citation-network?q=neural").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["query"], "neural");

        let ids: Vec<&str> = body["nodes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["P1", "P3"]);
        assert!(body["edges"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_whitespace_is_significant() {
        let (status, body) = call(app(), Method::GET, "/api/citation-network?q=machines%20").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["nodes"].as_array().unwrap().is_empty());

        let (_, body) = call(app(), Method::GET, "/api/citation-network?q=%20%20").await;
        assert!(body.get("query").is_none());
        assert_eq!(body["nodes"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_trends() {
        let app = app_with(Arc::new(InMemoryCorpus::new(vec![
            PaperRecord::new("P1", "A").with_year(2017),
            PaperRecord::new("P2", "B").with_year(2015),
            PaperRecord::new("P3", "C").with_year(2017),
            PaperRecord::new("P4", "D"),
        ])));

        let (status, body) = call(app, Method::GET, "/api/trends").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!([
                {"year": 2015, "count": 1},
                {"year": 2017, "count": 2}
            ])
        );
    }

    #[tokio::test]
    async fn test_filter_keeps_cached_positions() {
        let app = app();
        let (_, full) = call(app.clone(), Method::GET, "/api/citation-network").await;
        let (_, filtered) = call(app, Method::GET, "/api/citation-network?q=turing").await;

        assert_eq!(filtered["nodes"][0]["id"], "P3");
        assert_eq!(filtered["nodes"][0]["x"], full["nodes"][2]["x"]);
        assert_eq!(filtered["nodes"][0]["y"], full["nodes"][2]["y"]);
    }

    #[tokio::test]
    async fn test_reset_returns_full_network() {
        let app = app();
        let (_, full) = call(app.clone(), Method::GET, "/api/citation-network").await;
        let (status, reset) = call(app, Method::POST, "/api/citation-network/reset").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(reset["nodes"], full["nodes"]);
        assert_eq!(reset["edges"], full["edges"]);
    }

    #[tokio::test]
    async fn test_refresh_rebuilds() {
        let (status, body) = call(app(), Method::POST, "/api/citation-network/refresh").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stats"]["nodeCount"], 4);
    }

    #[tokio::test]
    async fn test_overlong_query_is_rejected() {
        let uri = format!("/api/citation-network?q={}", "a".repeat(300));
        let (status, body) = call(app(), Method::GET, &uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unavailable_corpus_is_503() {
        let app = app_with(Arc::new(JsonCorpus::new("/nonexistent/citenet/corpus.json")));
        let (status, body) = call(app, Method::GET, "/api/citation-network").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "CORPUS_UNAVAILABLE");
        assert!(body.get("nodes").is_none());
    }

    #[tokio::test]
    async fn test_health_and_ready() {
        let (status, body) = call(app(), Method::GET, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (_, body) = call(app(), Method::GET, "/ready").await;
        assert_eq!(body["status"], "ready");
        assert_eq!(body["checks"]["corpus"]["source"], "memory");

        let missing = app_with(Arc::new(JsonCorpus::new("/nonexistent/citenet/corpus.json")));
        let (_, body) = call(missing, Method::GET, "/ready").await;
        assert_eq!(body["status"], "not_ready");
    }

    #[tokio::test]
    async fn test_metrics_without_recorder() {
        let response = app()
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
