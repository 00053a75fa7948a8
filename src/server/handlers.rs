// HTTP request handlers

use axum::http::header;
use axum::response::{Html, IntoResponse, Response};

use crate::error::{ExporterError, Result};
use crate::metrics::gather_metrics;

const WEBROOT: &str = r#"<html>
  <head><title>ccache exporter</title></head>
  <body>
    <h1>ccache exporter</h1>
    <p><a href="/metrics">Metrics</a></p>
  </body>
</html>"#;

pub async fn webroot_handler() -> Html<&'static str> {
    Html(WEBROOT)
}

pub async fn metrics_handler() -> Result<Response> {
    // Gathering runs the ccache subprocesses; keep them off the async
    // worker threads.
    let body = tokio::task::spawn_blocking(gather_metrics)
        .await
        .map_err(|err| ExporterError::Internal(err.to_string()))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response())
}
