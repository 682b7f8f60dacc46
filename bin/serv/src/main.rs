use axum::{Router, middleware, routing::get};
use scribe_api::{config::ApiConfig, state::ApiState};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env()?;

    scribe_api::tracing::init_tracing(&config.env);

    let metrics_handle = scribe_api::metrics::init_metrics()?;
    tracing::info!("Prometheus metrics exporter initialized");

    let state = ApiState::new(&config)?;

    let cors = scribe_api::middleware::cors::create_cors_layer(config.parsed_allowed_origins());

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Metrics endpoint has its own state
    let metrics_app = Router::new()
        .route("/metrics", get(scribe_api::metrics::metrics_handler))
        .with_state(metrics_handle);

    let app = scribe_api::router::router()
        .with_state(state)
        .merge(metrics_app)
        .layer(cors)
        .layer(trace_layer)
        .layer(middleware::from_fn(scribe_api::metrics::track_metrics))
        .layer(middleware::from_fn(
            scribe_api::middleware::request_id::request_id_middleware,
        ));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(environment = ?config.env, %addr, "serving");
    axum::serve(listener, app).await?;

    Ok(())
}
