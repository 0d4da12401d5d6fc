pub mod error;
pub mod jobs;
pub mod warehouse;

pub use error::StoreError;
pub use jobs::{BulkAddOutcome, JobPatch, JobStore};
pub use warehouse::{init_warehouse, JsonFileWarehouseStore, WarehouseStore, WAREHOUSE_KEY};
