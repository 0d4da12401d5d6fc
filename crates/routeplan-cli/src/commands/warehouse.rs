//! Manage the persisted warehouse origin.
//!
//! Saving a new warehouse invalidates any derived route by construction:
//! each CLI run's job store is session-scoped, so no stale route can outlive
//! the change.

use anyhow::{bail, Result};

use routeplan_core::{AppConfig, Warehouse};
use routeplan_geocode::GeocodingResolver;
use routeplan_store::{JsonFileWarehouseStore, WarehouseStore};

pub async fn set(config: &AppConfig, address: &str) -> Result<()> {
    let resolver = GeocodingResolver::from_config(config)?;
    let Some(result) = resolver.resolve(address).await else {
        bail!(
            "no geocoding provider could resolve '{address}'; \
             the warehouse was not changed"
        );
    };

    let warehouse = Warehouse {
        address: result
            .display_name
            .clone()
            .unwrap_or_else(|| address.to_string()),
        latitude: result.latitude,
        longitude: result.longitude,
    };

    let store = JsonFileWarehouseStore::new(&config.warehouse_path);
    store.save(&warehouse)?;
    println!(
        "warehouse set to {} ({}, {})",
        warehouse.address, warehouse.latitude, warehouse.longitude
    );
    Ok(())
}

pub fn show(config: &AppConfig) -> Result<()> {
    let store = JsonFileWarehouseStore::new(&config.warehouse_path);
    match store.load()? {
        Some(warehouse) => {
            println!(
                "{} ({}, {})",
                warehouse.address, warehouse.latitude, warehouse.longitude
            );
        }
        None => println!("no warehouse saved; the default origin will be used"),
    }
    Ok(())
}
