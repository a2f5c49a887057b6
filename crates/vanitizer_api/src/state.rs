//! Shared application state

use crate::config::AppConfig;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use vanitizer_core::{
    privacy::PrivacyProcessor, CascadeConfig, Classifier, GoogleProbe, ListRegistry, ProbeConfig,
};

/// State shared by every handler
pub struct AppState {
    pub classifier: Classifier,
    pub cascade_config: CascadeConfig,
    pub probe: GoogleProbe,
    pub privacy: PrivacyProcessor,
    pub config: AppConfig,
}

impl AppState {
    /// Load reference lists and build the probe clients
    pub fn new(config: AppConfig) -> Result<Self> {
        let lists = match config.lists.paths() {
            Some(paths) => {
                ListRegistry::from_files(&paths).context("Failed to load reference lists")?
            }
            None => ListRegistry::bundled().context("Failed to load bundled reference lists")?,
        };
        let classifier = Classifier::new(Arc::new(lists));

        let cascade_config = config.overrides.to_cascade_config();
        info!("Cascade overrides: {:?}", cascade_config);

        let probe = GoogleProbe::new(ProbeConfig::from(&config.probes))
            .context("Failed to initialize Google probes")?;

        let privacy = match &config.security.privacy_salt {
            Some(salt) => PrivacyProcessor::new(salt.as_bytes().to_vec()),
            None => PrivacyProcessor::with_random_salt(),
        };

        Ok(Self {
            classifier,
            cascade_config,
            probe,
            privacy,
            config,
        })
    }
}
