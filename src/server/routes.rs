// HTTP routes configuration

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{metrics_handler, webroot_handler};
use crate::ccache::Wrapper;
use crate::error::Result;
use crate::metrics::{CcacheCollector, REGISTRY};

pub fn create_router(wrapper: Wrapper) -> Result<Router> {
    let collector = CcacheCollector::new(wrapper);
    REGISTRY.register(Box::new(collector))?;

    let app = Router::new()
        .route("/", get(webroot_handler))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http());

    Ok(app)
}
