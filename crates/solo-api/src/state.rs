use std::sync::Arc;

use crate::{ApiConfig, config::Environment, content::Catalog};

#[derive(Clone)]
pub struct ApiState {
    pub environment: Environment,
    /// Accuracy an attempt needs to count as correct
    pub pass_threshold: u8,
    /// Default accuracy a catalog entry needs to be reported as a match
    pub match_threshold: u8,
    pub catalog: Arc<Catalog>,
}

impl ApiState {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let catalog = Catalog::builtin()?;
        tracing::info!(
            items = catalog.all().count(),
            "Lesson catalog loaded"
        );

        Ok(Self::with_catalog(config, catalog))
    }

    pub fn with_catalog(config: &ApiConfig, catalog: Catalog) -> Self {
        Self {
            environment: config.env,
            pass_threshold: config.pass_threshold,
            match_threshold: config.match_threshold,
            catalog: Arc::new(catalog),
        }
    }
}
