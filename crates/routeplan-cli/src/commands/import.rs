//! Bulk CSV import: run the ingestion pipeline, apply the duplicate-id
//! policy, and print the resulting job list as CSV.

use std::path::Path;

use anyhow::{bail, Context, Result};

use routeplan_core::AppConfig;
use routeplan_csv::{parse_jobs_csv, serialize_jobs, IngestReport};
use routeplan_geocode::GeocodingResolver;
use routeplan_store::{JobStore, StoreError};

pub async fn run(config: &AppConfig, file: &Path, replace: bool) -> Result<()> {
    let resolver = GeocodingResolver::from_config(config)?;
    let report = ingest_file(file, &resolver).await?;
    let store = apply_report(report, replace)?;
    print!("{}", serialize_jobs(store.jobs())?);
    Ok(())
}

/// Reads and parses the file, echoing per-row problems to stderr. Row
/// failures never abort the import; they are reported and skipped.
pub(crate) async fn ingest_file(
    file: &Path,
    resolver: &GeocodingResolver,
) -> Result<IngestReport> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("cannot read {}", file.display()))?;
    let report = parse_jobs_csv(&contents, resolver).await;

    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
    for error in &report.errors {
        eprintln!("error: {error}");
    }
    Ok(report)
}

/// Loads parsed jobs into a fresh store, resolving in-file id conflicts per
/// the chosen policy: `--replace` overwrites, the default keeps the first
/// occurrence and reports the rest.
pub(crate) fn apply_report(report: IngestReport, replace: bool) -> Result<JobStore> {
    let mut store = JobStore::new();
    let mut conflicts = Vec::new();
    for job in report.jobs {
        if replace {
            store.replace(job);
        } else if let Err(err) = store.add(job) {
            match err {
                StoreError::DuplicateId(id) => conflicts.push(id),
                other => return Err(other.into()),
            }
        }
    }

    if !conflicts.is_empty() {
        eprintln!(
            "skipped {} duplicate job id(s): {} (pass --replace to overwrite)",
            conflicts.len(),
            conflicts.join(", ")
        );
    }
    if store.is_empty() {
        bail!("no valid jobs were imported");
    }
    Ok(store)
}
