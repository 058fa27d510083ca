use crate::domain::entities::GuideProfile;
use crate::domain::errors::BaziError;

/// Read-only, ordered catalog of guides
///
/// Declaration order matters: ranking ties are resolved by it.
pub trait GuideCatalogPort: Send + Sync {
    fn guides(&self) -> &[GuideProfile];

    fn get(&self, id: &str) -> Result<&GuideProfile, BaziError> {
        self.guides()
            .iter()
            .find(|g| g.id == id)
            .ok_or_else(|| BaziError::UnknownCatalogEntry(id.to_string()))
    }
}
