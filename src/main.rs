//! Bazi Engine - Command line front end
//!
//! Usage: `bazi-engine <birth.json> [YYYY-MM-DD]`
//!
//! Reads a birth moment from a JSON file, then prints the chart analysis, the
//! ranked guide matches and the fortune of the given day (today when omitted)
//! as one JSON document on stdout.

use std::env;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bazi_engine::domain::value_objects::{BirthMoment, SubjectId};
use bazi_engine::infrastructure::config::AppConfig;
use bazi_engine::infrastructure::state::AppState;

/// Birth file contents; a stable subject id lets a persistent cache hit
#[derive(Debug, Deserialize)]
struct BirthFile {
    #[serde(default)]
    subject_id: Option<SubjectId>,
    #[serde(flatten)]
    birth: BirthMoment,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bazi_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = env::args().skip(1);
    let birth_path = args
        .next()
        .context("Usage: bazi-engine <birth.json> [YYYY-MM-DD]")?;
    let target_date = args
        .next()
        .map(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d"))
        .transpose()
        .context("Target date must be formatted as YYYY-MM-DD")?;

    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Cache backend: {:?}", config.cache.backend);
    tracing::info!("  Cache TTL: {}h", config.cache.ttl_hours);

    let state = AppState::new(config).await?;
    tracing::info!("Application state initialized");

    let raw = tokio::fs::read_to_string(&birth_path)
        .await
        .with_context(|| format!("Failed to read birth file {}", birth_path))?;
    let file: BirthFile = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid birth file {}", birth_path))?;
    let subject_id = file.subject_id.unwrap_or_default();

    let service = &state.bazi_service;
    let analysis = service.analyze(subject_id, &file.birth).await?;
    let recommendation = service.match_guides(subject_id, &file.birth).await?;
    let fortune = service
        .daily_fortune(subject_id, &file.birth, target_date)
        .await?;

    let stats = service.cache_stats();
    tracing::debug!(hits = stats.hits, misses = stats.misses, "Cache statistics");

    let output = serde_json::json!({
        "subject_id": subject_id,
        "analysis": analysis,
        "recommendation": recommendation,
        "daily_fortune": fortune,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
