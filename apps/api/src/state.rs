use std::sync::Arc;

use crate::config::Config;
use crate::extraction::{build_extractor, ExtractionStrategy, FieldExtractor};
use crate::letter::{default_page_config, PageConfig};

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; session field values live with the client.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Extractor for the configured strategy. Requests may override it.
    pub extractor: Arc<dyn FieldExtractor>,
    /// Page geometry and font for PDF export.
    pub page_config: PageConfig,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            extractor: build_extractor(config.extraction_strategy),
            page_config: default_page_config(config.letter_font),
            config,
        }
    }

    /// The configured extractor, or a fresh one when a request asks for another strategy.
    pub fn extractor_for(&self, requested: Option<ExtractionStrategy>) -> Arc<dyn FieldExtractor> {
        match requested {
            Some(strategy) if strategy != self.extractor.strategy() => build_extractor(strategy),
            _ => Arc::clone(&self.extractor),
        }
    }
}
