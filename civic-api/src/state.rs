use std::sync::Arc;

use civic_core::CivicRepository;

use crate::config::Settings;

/// Shared by every handler for the life of the process.
pub struct AppState {
    pub repo: Box<dyn CivicRepository>,
    pub settings: Settings,
}

impl AppState {
    pub fn new(repo: Box<dyn CivicRepository>, settings: Settings) -> Arc<Self> {
        Arc::new(Self { repo, settings })
    }
}
