//! Pure CSV serialization: the job list, the optimized route with its
//! metadata preamble, and a template documenting the expected input shape.
//!
//! String fields are double-quoted, numeric fields emitted bare
//! (`QuoteStyle::NonNumeric`); no network calls anywhere.

use csv::{QuoteStyle, Writer, WriterBuilder};

use routeplan_core::{Job, OptimizedJob, RouteSummary, Warehouse};

use crate::error::CsvError;

const JOBS_HEADER: &str = "id,address,latitude,longitude,priority,estimated_time";
const ROUTE_HEADER: &str = "route_position,id,address,latitude,longitude,priority,\
                            estimated_time,eta_minutes,distance_from_prev_km,cumulative_distance_km";

fn quoted_writer() -> Writer<Vec<u8>> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(Vec::new())
}

fn into_string(writer: Writer<Vec<u8>>) -> Result<String, CsvError> {
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Serializes jobs in input order, suitable for re-ingestion by
/// [`crate::parse_jobs_csv`] without re-geocoding.
///
/// # Errors
///
/// Returns [`CsvError`] if the underlying writer fails.
pub fn serialize_jobs(jobs: &[Job]) -> Result<String, CsvError> {
    let mut writer = quoted_writer();
    for job in jobs {
        writer.write_record([
            job.id.clone(),
            job.address.clone(),
            job.latitude.to_string(),
            job.longitude.to_string(),
            job.priority.to_string(),
            job.estimated_time.to_string(),
        ])?;
    }
    Ok(format!("{JOBS_HEADER}\n{}", into_string(writer)?))
}

/// Serializes an optimized route: a quoted metadata preamble (warehouse,
/// totals, stop count), a blank separator, then the data table ordered by
/// `route_position` ascending with distances to exactly 2 decimal places.
///
/// # Errors
///
/// Returns [`CsvError`] if the underlying writer fails.
pub fn serialize_optimized_route(
    jobs: &[OptimizedJob],
    summary: &RouteSummary,
    warehouse: &Warehouse,
) -> Result<String, CsvError> {
    let mut preamble = quoted_writer();
    preamble.write_record([format!("Warehouse: {}", warehouse.address)])?;
    preamble.write_record([format!("Latitude: {}", warehouse.latitude)])?;
    preamble.write_record([format!("Longitude: {}", warehouse.longitude)])?;
    preamble.write_record([String::new()])?;
    preamble.write_record(["Route Summary".to_string()])?;
    preamble.write_record([format!(
        "Total Distance: {:.2} km",
        summary.total_distance_km
    )])?;
    preamble.write_record([format!(
        "Total Duration: {} minutes",
        summary.estimated_total_time_min
    )])?;
    preamble.write_record([format!("Total Stops: {}", jobs.len())])?;
    preamble.write_record([String::new()])?;

    let mut ordered: Vec<&OptimizedJob> = jobs.iter().collect();
    ordered.sort_by_key(|j| j.route_position);

    let mut table = quoted_writer();
    for stop in ordered {
        table.write_record([
            stop.route_position.to_string(),
            stop.job.id.clone(),
            stop.job.address.clone(),
            stop.job.latitude.to_string(),
            stop.job.longitude.to_string(),
            stop.job.priority.to_string(),
            stop.job.estimated_time.to_string(),
            stop.eta_minutes.to_string(),
            format!("{:.2}", stop.distance_from_prev_km),
            format!("{:.2}", stop.cumulative_distance_km),
        ])?;
    }

    Ok(format!(
        "{}{ROUTE_HEADER}\n{}",
        into_string(preamble)?,
        into_string(table)?
    ))
}

/// A template file documenting the expected import shape: the header plus
/// one illustrative example row.
///
/// # Errors
///
/// Returns [`CsvError`] if the underlying writer fails.
pub fn csv_template() -> Result<String, CsvError> {
    let mut writer = quoted_writer();
    writer.write_record([
        "job-1".to_string(),
        "123 Main St, New York, NY".to_string(),
        "40.7589".to_string(),
        "-73.9851".to_string(),
        "high".to_string(),
        "30".to_string(),
    ])?;
    Ok(format!("{JOBS_HEADER}\n{}", into_string(writer)?))
}
