//! One-shot address resolution commands.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};

use routeplan_core::AppConfig;
use routeplan_geocode::{GeocodingResolver, SuggestionSession};

pub async fn resolve(config: &AppConfig, address: &str) -> Result<()> {
    let resolver = GeocodingResolver::from_config(config)?;
    match resolver.resolve(address).await {
        Some(result) => {
            println!("{}, {}", result.latitude, result.longitude);
            if let Some(name) = result.display_name {
                println!("{name}");
            }
            Ok(())
        }
        None => bail!(
            "no geocoding provider could resolve '{address}'; \
             check the address, or configure ROUTEPLAN_LOCATIONIQ_TOKEN for better coverage"
        ),
    }
}

pub async fn reverse(config: &AppConfig, latitude: f64, longitude: f64) -> Result<()> {
    let resolver = GeocodingResolver::from_config(config)?;
    match resolver.reverse_resolve(latitude, longitude).await {
        Some(label) => {
            println!("{label}");
            Ok(())
        }
        None => bail!("no geocoding provider could reverse-resolve ({latitude}, {longitude})"),
    }
}

pub async fn suggest(config: &AppConfig, query: &str) -> Result<()> {
    let resolver = Arc::new(GeocodingResolver::from_config(config)?);
    let session = SuggestionSession::new(
        resolver,
        Duration::from_millis(config.suggest_debounce_ms),
    );

    // A sole query is never superseded, so this always yields a result set.
    let suggestions = session.query(query).await.unwrap_or_default();
    if suggestions.is_empty() {
        println!("no suggestions");
        return Ok(());
    }
    for (index, suggestion) in suggestions.iter().enumerate() {
        let label = suggestion
            .display_name
            .as_deref()
            .unwrap_or(&suggestion.address);
        println!(
            "{}. {label} ({}, {})",
            index + 1,
            suggestion.latitude,
            suggestion.longitude
        );
    }
    Ok(())
}
