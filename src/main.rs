use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pinned_repos::config::Config;
use pinned_repos::handlers;
use pinned_repos::state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration first so APP_ENV from .env decides the log format.
    let config = Config::from_env().expect("Failed to load configuration");

    // Initialize tracing — JSON in production, human-readable in dev.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pinned_repos=info,tower_http=info"));

    if config.is_production {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("📌 Pinned repos service starting...");
    info!(
        base_url = %config.base_url,
        fetch_timeout_secs = config.fetch_timeout.as_secs(),
        cache_max_entries = config.cache_max_entries,
        cache_max_age_secs = config.cache_max_age.as_secs(),
        "📝 Configuration loaded"
    );

    let app_state = AppState::from_config(&config).expect("Failed to build HTTP client");

    // Prometheus metrics layer
    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let app = handlers::router(app_state)
        .route(
            "/metrics",
            get(move || async move { metric_handle.render() }),
        )
        .layer(prometheus_layer);

    let addr = config.server_addr();
    info!("🎧 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
