//! Application state shared across handlers

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::service::ListingService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    listings: ListingService,
    config: ServerConfig,
}

impl AppState {
    pub fn new(listings: ListingService, config: ServerConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner { listings, config }),
        }
    }

    pub fn listings(&self) -> &ListingService {
        &self.inner.listings
    }

    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }
}
