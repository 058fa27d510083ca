//! Guide catalog loaded from a JSON file
//!
//! The file holds an array of guide profiles in catalog order.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::outbound::GuideCatalogPort;
use crate::domain::entities::GuideProfile;
use crate::infrastructure::catalog::validate;

#[derive(Debug, Clone)]
pub struct JsonGuideCatalog {
    guides: Vec<GuideProfile>,
}

impl JsonGuideCatalog {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read guide catalog {}", path.display()))?;
        let catalog = Self::from_json(&raw)
            .with_context(|| format!("Invalid guide catalog {}", path.display()))?;
        tracing::info!(
            "Loaded {} guides from {}",
            catalog.guides.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let guides: Vec<GuideProfile> =
            serde_json::from_str(raw).context("Guide catalog is not a JSON array of guides")?;
        validate(&guides)?;
        Ok(Self { guides })
    }
}

impl GuideCatalogPort for JsonGuideCatalog {
    fn guides(&self) -> &[GuideProfile] {
        &self.guides
    }
}
