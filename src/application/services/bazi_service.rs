//! Bazi Service - Application facade over the chart engines
//!
//! Wires the pure domain engines to the clock, the randomness source, the
//! guide catalog and the result cache. Every result is cached per subject;
//! daily fortunes are additionally keyed by day. Cached entries carry the
//! birth moment they were computed from, so a changed birth for a known
//! subject is recomputed instead of served stale.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::application::dto::CacheKey;
use crate::application::ports::outbound::{ClockPort, GuideCatalogPort, RandomSource};
use crate::application::services::result_cache::{CacheStats, ResultCache};
use crate::domain::entities::GuideProfile;
use crate::domain::errors::BaziError;
use crate::domain::services::{compatibility_scorer, daily_fortune, trait_inference};
use crate::domain::value_objects::{
    BaziAnalysis, BirthMoment, DailyFortune, GuideRecommendation, SubjectId,
};

/// Number of top-ranked guides consulted for daily guidance
const GUIDANCE_GUIDES: usize = 3;

/// Cache payload tagged with the birth moment it was computed from
#[derive(Serialize, Deserialize)]
struct BirthScoped<T> {
    birth: BirthMoment,
    value: T,
}

pub struct BaziService {
    catalog: Arc<dyn GuideCatalogPort>,
    cache: ResultCache,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomSource>,
}

impl BaziService {
    pub fn new(
        catalog: Arc<dyn GuideCatalogPort>,
        cache: ResultCache,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            catalog,
            cache,
            clock,
            random,
        }
    }

    /// Cached value for `key` if it was computed from `birth`, else a fresh one
    async fn cached_for_birth<T, F>(
        &self,
        key: &CacheKey,
        birth: &BirthMoment,
        compute: F,
    ) -> Result<T, BaziError>
    where
        T: Serialize + DeserializeOwned,
        F: Fn() -> Result<T, BaziError>,
    {
        let scoped = self
            .cache
            .get_or_compute(key, || {
                compute().map(|value| BirthScoped {
                    birth: birth.clone(),
                    value,
                })
            })
            .await?;
        if scoped.birth == *birth {
            return Ok(scoped.value);
        }

        debug!(key = %key, "Cached result belongs to another birth moment, recomputing");
        let fresh = BirthScoped {
            birth: birth.clone(),
            value: compute()?,
        };
        self.cache.put(key, &fresh).await;
        Ok(fresh.value)
    }

    /// Chart, element balance and inferred traits for a subject
    ///
    /// The birth moment is validated before any cache lookup.
    #[instrument(skip(self, birth))]
    pub async fn analyze(
        &self,
        subject_id: SubjectId,
        birth: &BirthMoment,
    ) -> Result<BaziAnalysis, BaziError> {
        birth.validate()?;
        let key = CacheKey::analysis(subject_id);
        let analysis = self
            .cached_for_birth(&key, birth, || {
                trait_inference::analyze(birth, self.clock.now_utc())
            })
            .await?;

        debug!(
            day_master = %analysis.chart.day_master,
            strongest = %analysis.balance.strongest,
            weakest = %analysis.balance.weakest,
            "Analysis ready"
        );
        Ok(analysis)
    }

    /// Guides ranked by compatibility, with the seasonal guide of this month
    #[instrument(skip(self, birth))]
    pub async fn match_guides(
        &self,
        subject_id: SubjectId,
        birth: &BirthMoment,
    ) -> Result<GuideRecommendation, BaziError> {
        let analysis = self.analyze(subject_id, birth).await?;
        let month = self.clock.now_local().month();
        let key = CacheKey::compatibility(subject_id);

        let recommendation = self
            .cached_for_birth(&key, birth, || {
                let guides = self.catalog.guides();
                let matches = compatibility_scorer::rank(&analysis.subject_profile(), guides);
                let explanation = compatibility_scorer::explain(&matches, guides);
                let seasonal_guide_id = match compatibility_scorer::seasonal_guide(month, guides) {
                    Ok(guide) => Some(guide.id.clone()),
                    Err(e) => {
                        debug!(month, error = %e, "No seasonal guide in catalog");
                        None
                    }
                };
                Ok(GuideRecommendation {
                    matches,
                    explanation,
                    seasonal_guide_id,
                })
            })
            .await?;

        if let Some(top) = recommendation.matches.first() {
            info!(guide_id = %top.guide_id, score = top.score, "Top guide match");
        }
        Ok(recommendation)
    }

    /// Fortune of a subject for `target_date`, or for today by the clock
    ///
    /// The current two-hour window weight is read from the clock when the
    /// fortune is first computed. The cached fortune for that date keeps that
    /// hour until it expires or is invalidated.
    #[instrument(skip(self, birth))]
    pub async fn daily_fortune(
        &self,
        subject_id: SubjectId,
        birth: &BirthMoment,
        target_date: Option<NaiveDate>,
    ) -> Result<DailyFortune, BaziError> {
        let analysis = self.analyze(subject_id, birth).await?;
        let recommendation = self.match_guides(subject_id, birth).await?;
        let guides = recommendation
            .matches
            .iter()
            .take(GUIDANCE_GUIDES)
            .map(|m| self.catalog.get(&m.guide_id).cloned())
            .collect::<Result<Vec<GuideProfile>, _>>()?;

        let now = self.clock.now_local();
        let date = target_date.unwrap_or_else(|| now.date());
        let key = CacheKey::daily_fortune(subject_id, date);

        let fortune = self
            .cached_for_birth(&key, birth, || {
                Ok(daily_fortune::calculate(
                    &analysis.chart,
                    now,
                    Some(date),
                    &guides,
                    self.random.as_ref(),
                ))
            })
            .await?;

        info!(date = %fortune.date, overall_luck = fortune.overall_luck, "Daily fortune ready");
        Ok(fortune)
    }

    /// Look up a catalog guide by id
    pub fn guide(&self, id: &str) -> Result<&GuideProfile, BaziError> {
        self.catalog.get(id)
    }

    /// Guide favoured by the current calendar month
    pub fn seasonal_guide(&self) -> Result<&GuideProfile, BaziError> {
        let month = self.clock.now_local().month();
        compatibility_scorer::seasonal_guide(month, self.catalog.guides())
    }

    /// Drop every cached result of a subject, including one day's fortune
    pub async fn invalidate(&self, subject_id: SubjectId, date: Option<NaiveDate>) {
        let mut keys = vec![CacheKey::analysis(subject_id), CacheKey::compatibility(subject_id)];
        if let Some(date) = date {
            keys.push(CacheKey::daily_fortune(subject_id, date));
        }
        for key in keys {
            if let Err(e) = self.cache.invalidate(&key).await {
                debug!(key = %key, error = %e, "Cache invalidation failed");
            }
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    use crate::domain::services::NoPerturbation;
    use crate::domain::value_objects::{Element, Gender};
    use crate::infrastructure::cache::InMemoryCacheStore;
    use crate::infrastructure::catalog::BuiltinCatalog;
    use crate::infrastructure::clock::FixedClock;

    fn local(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn service_at(now: &str) -> BaziService {
        let clock = Arc::new(FixedClock::new(local(now)));
        let store = Arc::new(InMemoryCacheStore::new(clock.clone()));
        BaziService::new(
            Arc::new(BuiltinCatalog::new()),
            ResultCache::new(store),
            clock,
            Arc::new(NoPerturbation),
        )
    }

    fn birth() -> BirthMoment {
        BirthMoment::new("Lin", Gender::Female, 1990, 1, 1, 12, 0)
    }

    #[tokio::test]
    async fn test_analyze_is_cached_per_subject() {
        let service = service_at("2024-01-15 09:00");
        let subject = SubjectId::new();

        let first = service.analyze(subject, &birth()).await.unwrap();
        let second = service.analyze(subject, &birth()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.chart.day_master, Element::Wood);
        let stats = service.cache_stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
    }

    #[tokio::test]
    async fn test_analyze_rejects_invalid_birth() {
        let service = service_at("2024-01-15 09:00");
        let invalid = BirthMoment::new("Lin", Gender::Male, 1990, 2, 30, 12, 0);

        let result = service.analyze(SubjectId::new(), &invalid).await;
        assert!(matches!(result, Err(BaziError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_match_guides_ranks_whole_catalog() {
        let service = service_at("2024-01-15 09:00");
        let recommendation = service.match_guides(SubjectId::new(), &birth()).await.unwrap();

        assert_eq!(recommendation.matches.len(), BuiltinCatalog::new().guides().len());
        assert!(recommendation
            .matches
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score));
        assert_eq!(recommendation.seasonal_guide_id.as_deref(), Some("guanyin"));
        assert!(!recommendation.explanation.is_empty());
    }

    #[tokio::test]
    async fn test_daily_fortune_defaults_to_clock_date() {
        let service = service_at("2024-01-15 09:00");
        let fortune = service.daily_fortune(SubjectId::new(), &birth(), None).await.unwrap();

        assert_eq!(fortune.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(fortune.overall_luck, 75);
        assert!(fortune.guide_guidance.len() <= GUIDANCE_GUIDES);
    }

    #[tokio::test]
    async fn test_daily_fortune_is_cached_per_date() {
        let service = service_at("2024-01-15 09:00");
        let subject = SubjectId::new();
        let day = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();

        let first = service.daily_fortune(subject, &birth(), Some(day)).await.unwrap();
        let misses = service.cache_stats().misses;
        let second = service.daily_fortune(subject, &birth(), Some(day)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.date, day);
        assert_eq!(service.cache_stats().misses, misses);
    }

    #[tokio::test]
    async fn test_invalidate_recomputes_analysis() {
        let service = service_at("2024-01-15 09:00");
        let subject = SubjectId::new();

        service.analyze(subject, &birth()).await.unwrap();
        service.invalidate(subject, None).await;
        service.analyze(subject, &birth()).await.unwrap();

        assert_eq!(service.cache_stats().misses, 2);
    }

    #[tokio::test]
    async fn test_guide_lookup() {
        let service = service_at("2024-05-01 10:00");
        assert_eq!(service.seasonal_guide().unwrap().id, "guan-yu");
        assert!(service.guide("wenchang").is_ok());
        assert!(matches!(
            service.guide("nobody"),
            Err(BaziError::UnknownCatalogEntry(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_birth_rejected_for_cached_subject() {
        let service = service_at("2024-01-15 09:00");
        let subject = SubjectId::new();
        service.daily_fortune(subject, &birth(), None).await.unwrap();

        let invalid = BirthMoment::new("Lin", Gender::Female, 1990, 2, 30, 25, 0);
        assert!(matches!(
            service.analyze(subject, &invalid).await,
            Err(BaziError::InvalidInput(_))
        ));
        assert!(matches!(
            service.match_guides(subject, &invalid).await,
            Err(BaziError::InvalidInput(_))
        ));
        assert!(matches!(
            service.daily_fortune(subject, &invalid, None).await,
            Err(BaziError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_changed_birth_replaces_cached_results() {
        let service = service_at("2024-01-15 09:00");
        let subject = SubjectId::new();
        // 辛 day: metal day master
        let corrected = BirthMoment::new("Lin", Gender::Female, 1985, 7, 23, 12, 0);

        let before = service.daily_fortune(subject, &birth(), None).await.unwrap();
        assert_eq!(before.lucky_items.element, Element::Water);

        let analysis = service.analyze(subject, &corrected).await.unwrap();
        assert_eq!(analysis.chart.birth_info, corrected);
        assert_eq!(analysis.chart.day_master, Element::Metal);

        let after = service.daily_fortune(subject, &corrected, None).await.unwrap();
        assert_eq!(after.lucky_items.element, Element::Earth);

        // the corrected birth is now the cached one
        let misses = service.cache_stats().misses;
        let again = service.analyze(subject, &corrected).await.unwrap();
        assert_eq!(again.chart.day_master, Element::Metal);
        assert_eq!(service.cache_stats().misses, misses);
    }
}
