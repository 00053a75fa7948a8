// Metrics module for Prometheus observability

mod collector;
mod registry;

pub use collector::CcacheCollector;
pub use registry::{gather_metrics, PARSING_ERRORS, REGISTRY};
