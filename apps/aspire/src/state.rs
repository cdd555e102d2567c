use std::sync::Arc;

use crate::advice::AdviceOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded corpora plus providers. Read-only after startup.
    pub advisor: Arc<AdviceOrchestrator>,
}
