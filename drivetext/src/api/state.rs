use std::sync::Arc;

use crate::auth::TokenSupplier;
use crate::config::Config;
use crate::drive::GraphClient;
use crate::extraction::ExtractionService;
use crate::services::FileService;

#[derive(Clone)]
pub struct AppState {
    pub extraction: Arc<ExtractionService>,
    pub files: Arc<FileService>,
    pub client: GraphClient,
    pub tokens: Arc<TokenSupplier>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        let client = GraphClient::new(&config.graph);
        Self {
            extraction: Arc::new(ExtractionService::new(config.extraction.clone())),
            files: Arc::new(FileService::new(client.clone())),
            client: client.clone(),
            tokens: Arc::new(TokenSupplier::new(&config.graph)),
        }
    }
}
