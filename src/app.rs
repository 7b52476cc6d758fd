use std::{net::SocketAddr, time::Duration};

use axum::{body::Body, http::Request, response::Response, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{field, Span};

use crate::state::AppState;
use crate::todos;

pub fn build_app(state: AppState) -> Router {
    let api = Router::new()
        .merge(todos::router())
        .route("/health", get(|| async { "ok" }));

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(rpc_span)
                .on_response(log_response),
        )
}

/// One span per procedure call; `status` is filled in once the response is ready.
fn rpc_span(req: &Request<Body>) -> Span {
    let procedure = req.uri().path().rsplit('/').next().unwrap_or_default();
    tracing::info_span!(
        "rpc_request",
        method = %req.method(),
        procedure,
        status = field::Empty
    )
}

fn log_response(res: &Response, latency: Duration, span: &Span) {
    let status = res.status();
    span.record("status", field::display(status));
    let latency_ms = latency.as_millis() as u64;
    if status.is_server_error() {
        tracing::error!(%status, latency_ms, "rpc failed");
    } else {
        tracing::debug!(%status, latency_ms, "rpc finished");
    }
}

pub async fn serve(app: Router, host: &str, port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
