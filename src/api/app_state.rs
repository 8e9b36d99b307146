use crate::observability::AppMetrics;
use crate::services::search::SearchService;
use std::sync::Arc;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Natural-language company search
    pub search_service: Arc<dyn SearchService>,
    /// Request and search counters
    pub metrics: Arc<AppMetrics>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("search_service", &"Arc<dyn SearchService>")
            .field("metrics", &"Arc<AppMetrics>")
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(search_service: Box<dyn SearchService>, metrics: Arc<AppMetrics>) -> Self {
        Self {
            search_service: Arc::from(search_service),
            metrics,
        }
    }
}
