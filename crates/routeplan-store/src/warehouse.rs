//! Warehouse persistence: the only state that survives a session.
//!
//! The record is stored as a JSON object under a single well-known key so an
//! operator can inspect or edit it by hand.

use std::path::{Path, PathBuf};

use routeplan_core::Warehouse;
use routeplan_geocode::GeocodingResolver;

use crate::error::StoreError;

/// The well-known key the warehouse record is stored under.
pub const WAREHOUSE_KEY: &str = "routeplan-warehouse";

/// Load/save interface for the persisted warehouse, injected into whatever
/// flow needs it.
pub trait WarehouseStore {
    /// Returns the persisted warehouse, or `None` when nothing has been
    /// saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on I/O failure or a malformed record.
    fn load(&self) -> Result<Option<Warehouse>, StoreError>;

    /// Persists the warehouse, replacing any previous record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on I/O or serialization failure.
    fn save(&self, warehouse: &Warehouse) -> Result<(), StoreError>;
}

/// File-backed [`WarehouseStore`]: a small JSON document holding
/// `{"routeplan-warehouse": {...}}` at a configured path.
pub struct JsonFileWarehouseStore {
    path: PathBuf,
}

impl JsonFileWarehouseStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WarehouseStore for JsonFileWarehouseStore {
    fn load(&self) -> Result<Option<Warehouse>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let document: serde_json::Value = serde_json::from_str(&contents)?;
        match document.get(WAREHOUSE_KEY) {
            Some(record) => Ok(Some(serde_json::from_value(record.clone())?)),
            None => Ok(None),
        }
    }

    fn save(&self, warehouse: &Warehouse) -> Result<(), StoreError> {
        let document = serde_json::json!({ WAREHOUSE_KEY: warehouse });
        std::fs::write(&self.path, serde_json::to_string_pretty(&document)?)?;
        Ok(())
    }
}

/// Resolves the active warehouse at startup.
///
/// A persisted record wins. Otherwise the default origin is used, labeled by
/// best-effort reverse geocoding; when that also fails the label is the bare
/// coordinates to 4 decimal places. The default is not persisted — only an
/// explicit save is.
pub async fn init_warehouse(
    store: &dyn WarehouseStore,
    resolver: &GeocodingResolver,
) -> Warehouse {
    match store.load() {
        Ok(Some(warehouse)) => return warehouse,
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(error = %err, "could not load persisted warehouse, using default");
        }
    }

    let mut warehouse = Warehouse::default_origin();
    warehouse.address = match resolver
        .reverse_resolve(warehouse.latitude, warehouse.longitude)
        .await
    {
        Some(label) => label,
        None => format!("{:.4}, {:.4}", warehouse.latitude, warehouse.longitude),
    };
    warehouse
}
