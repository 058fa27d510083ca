//! Guide catalog adapters

mod builtin;
mod json_catalog;

use std::collections::HashSet;

use anyhow::Result;

use crate::domain::entities::GuideProfile;

pub use builtin::{builtin_guides, BuiltinCatalog};
pub use json_catalog::JsonGuideCatalog;

pub const MAX_CATALOG_ENTRIES: usize = 10;

/// Check catalog size, id uniqueness and non-empty ids
pub fn validate(guides: &[GuideProfile]) -> Result<()> {
    if guides.len() > MAX_CATALOG_ENTRIES {
        anyhow::bail!(
            "Catalog holds {} guides, at most {} are allowed",
            guides.len(),
            MAX_CATALOG_ENTRIES
        );
    }
    let mut seen = HashSet::new();
    for guide in guides {
        if guide.id.trim().is_empty() {
            anyhow::bail!("Guide '{}' has an empty id", guide.name);
        }
        if !seen.insert(guide.id.as_str()) {
            anyhow::bail!("Duplicate guide id: {}", guide.id);
        }
    }
    Ok(())
}
