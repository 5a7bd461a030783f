use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{CommitHostService, GenerationService, PublisherService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub commit_host: Arc<dyn CommitHostService>,
    pub general_provider: Arc<dyn GenerationService>,
    pub repo_aware_provider: Arc<dyn GenerationService>,
    pub publisher: Arc<dyn PublisherService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        commit_host: Arc<dyn CommitHostService>,
        general_provider: Arc<dyn GenerationService>,
        repo_aware_provider: Arc<dyn GenerationService>,
        publisher: Arc<dyn PublisherService>,
    ) -> Self {
        Self {
            config,
            commit_host,
            general_provider,
            repo_aware_provider,
            publisher,
        }
    }
}
