use std::sync::Arc;

use crate::evaluate::EvaluationPipeline;

pub struct AppState {
    pub pipeline: Arc<EvaluationPipeline>,
    /// Reported by the health endpoint.
    pub version: &'static str,
}

impl AppState {
    pub fn new(pipeline: EvaluationPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            version: crate::VERSION,
        }
    }
}
