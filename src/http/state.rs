use crate::pipeline::BatchPipeline;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Stateless pipeline shared by all requests
    pub pipeline: Arc<BatchPipeline>,

    /// Shown on the status page
    pub service_name: String,
}

impl AppState {
    pub fn new(pipeline: BatchPipeline, service_name: impl Into<String>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            service_name: service_name.into(),
        }
    }
}
