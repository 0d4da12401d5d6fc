//! End-to-end flow: import jobs, initialize the warehouse, call the
//! optimizer service, and export the optimized route.

use std::path::Path;

use anyhow::{bail, Context, Result};

use routeplan_core::AppConfig;
use routeplan_csv::serialize_optimized_route;
use routeplan_geocode::GeocodingResolver;
use routeplan_optimizer::OptimizerClient;
use routeplan_store::{init_warehouse, JsonFileWarehouseStore};

use super::import;

pub async fn run(
    config: &AppConfig,
    file: &Path,
    output: Option<&Path>,
    replace: bool,
) -> Result<()> {
    let resolver = GeocodingResolver::from_config(config)?;
    let report = import::ingest_file(file, &resolver).await?;
    let mut store = import::apply_report(report, replace).context("nothing to optimize")?;

    let warehouse_store = JsonFileWarehouseStore::new(&config.warehouse_path);
    let warehouse = init_warehouse(&warehouse_store, &resolver).await;
    tracing::info!(
        address = %warehouse.address,
        latitude = warehouse.latitude,
        longitude = warehouse.longitude,
        "using warehouse origin"
    );

    let client = OptimizerClient::new(&config.optimizer_url, config.optimizer_timeout_secs)?;
    let optimized = client
        .optimize(&warehouse, store.jobs())
        .await
        .with_context(|| {
            format!(
                "route optimization failed; check that the optimizer service at {} is running",
                config.optimizer_url
            )
        })?;

    store
        .set_route(optimized.route, optimized.summary)
        .context("optimizer returned a malformed route")?;
    let Some((route, summary)) = store.route() else {
        bail!("optimized route was invalidated before export");
    };

    let csv = serialize_optimized_route(route, summary, &warehouse)?;
    match output {
        Some(path) => {
            std::fs::write(path, csv)
                .with_context(|| format!("cannot write {}", path.display()))?;
            println!("optimized route written to {}", path.display());
        }
        None => print!("{csv}"),
    }
    Ok(())
}
