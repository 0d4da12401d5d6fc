//! Bulk job ingestion from CSV text.
//!
//! Validation and geocoding failures are per-row: a bad row is recorded in
//! the report's `errors` and the batch keeps going. Only an empty file,
//! missing required columns, or a file that yields nothing abort the parse
//! as a whole.

use std::collections::HashSet;

use csv::StringRecord;

use routeplan_core::{Job, Priority};
use routeplan_geocode::GeocodingResolver;

/// Outcome of one ingestion run.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Jobs from rows that passed validation and coordinate resolution.
    pub jobs: Vec<Job>,
    /// Fatal whole-file messages and `Row N: …` messages for rejected rows.
    pub errors: Vec<String>,
    /// Non-fatal `Row N: …` notes; the rows still produced jobs.
    pub warnings: Vec<String>,
}

const REQUIRED_COLUMNS: [&str; 4] = ["id", "address", "priority", "estimated_time"];

/// Column positions after mapping the header, `None` when absent.
struct Columns {
    id: Option<usize>,
    address: Option<usize>,
    priority: Option<usize>,
    estimated_time: Option<usize>,
    latitude: Option<usize>,
    longitude: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &[String]) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self {
            id: find("id"),
            address: find("address"),
            priority: find("priority"),
            estimated_time: find("estimated_time"),
            latitude: find("latitude"),
            longitude: find("longitude"),
        }
    }

    fn missing_required(&self) -> Vec<&'static str> {
        [
            (self.id, REQUIRED_COLUMNS[0]),
            (self.address, REQUIRED_COLUMNS[1]),
            (self.priority, REQUIRED_COLUMNS[2]),
            (self.estimated_time, REQUIRED_COLUMNS[3]),
        ]
        .into_iter()
        .filter_map(|(idx, name)| idx.is_none().then_some(name))
        .collect()
    }
}

/// Parses CSV text into validated jobs, geocoding rows that lack
/// coordinates through `resolver`.
///
/// Rows are processed strictly in order, one at a time: a row's geocoding
/// round trip completes before the next row starts, so error attribution
/// and job ordering follow the file exactly. Line numbers are 1-based with
/// the header as line 1; blank lines are discarded before numbering.
pub async fn parse_jobs_csv(contents: &str, resolver: &GeocodingResolver) -> IngestReport {
    let mut report = IngestReport::default();

    let trimmed = contents.trim();
    if trimmed.is_empty() {
        report.errors.push("CSV file is empty".to_string());
        return report;
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(trimmed.as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(row) => row.iter().map(str::to_lowercase).collect(),
        Err(err) => {
            report.errors.push(format!("Failed to parse CSV header: {err}"));
            return report;
        }
    };

    let columns = Columns::from_headers(&headers);
    let missing = columns.missing_required();
    if !missing.is_empty() {
        report
            .errors
            .push(format!("Missing required columns: {}", missing.join(", ")));
        return report;
    }

    let mut seen_ids: HashSet<String> = HashSet::new();
    // The header is line 1; the csv reader has already dropped blank lines.
    let mut line = 1usize;
    for record in reader.records() {
        line += 1;
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                report.errors.push(format!("Row {line}: {err}"));
                continue;
            }
        };

        match parse_row(&record, &columns, resolver, &mut report.warnings, line).await {
            Ok(job) => {
                if !seen_ids.insert(job.id.clone()) {
                    report.warnings.push(format!(
                        "Row {line}: id '{}' also appears earlier in this file",
                        job.id
                    ));
                }
                report.jobs.push(job);
            }
            Err(message) => report.errors.push(format!("Row {line}: {message}")),
        }
    }

    if report.jobs.is_empty() && report.errors.is_empty() {
        report.errors.push("No valid jobs found in CSV".to_string());
    }

    tracing::debug!(
        jobs = report.jobs.len(),
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "CSV ingestion finished"
    );
    report
}

fn cell<'r>(record: &'r StringRecord, index: Option<usize>) -> &'r str {
    // Ragged rows fill missing trailing cells with the empty string.
    index.and_then(|i| record.get(i)).unwrap_or("").trim()
}

/// Validates one row and resolves its coordinates. First failure wins.
async fn parse_row(
    record: &StringRecord,
    columns: &Columns,
    resolver: &GeocodingResolver,
    warnings: &mut Vec<String>,
    line: usize,
) -> Result<Job, String> {
    let id = cell(record, columns.id);
    if id.is_empty() {
        return Err("ID is required".to_string());
    }

    let address = cell(record, columns.address);
    if address.is_empty() {
        return Err("Address is required".to_string());
    }

    let priority_raw = cell(record, columns.priority);
    if priority_raw.is_empty() {
        return Err("Priority is required".to_string());
    }
    let priority: Priority = priority_raw
        .parse()
        .map_err(|_| "Priority must be one of: low, medium, high".to_string())?;

    let time_raw = cell(record, columns.estimated_time);
    if time_raw.is_empty() {
        return Err("Estimated time is required".to_string());
    }
    let estimated_time: i64 = time_raw
        .parse()
        .map_err(|_| "Estimated time must be a positive number (minutes)".to_string())?;
    if estimated_time < 1 {
        return Err("Estimated time must be a positive number (minutes)".to_string());
    }

    let lat_raw = cell(record, columns.latitude);
    let lon_raw = cell(record, columns.longitude);
    let (latitude, longitude) = if !lat_raw.is_empty() && !lon_raw.is_empty() {
        match (lat_raw.parse::<f64>(), lon_raw.parse::<f64>()) {
            (Ok(lat), Ok(lon)) => (lat, lon),
            _ => return Err("Invalid latitude/longitude coordinates".to_string()),
        }
    } else {
        if lat_raw.is_empty() != lon_raw.is_empty() {
            warnings.push(format!(
                "Row {line}: ignoring partial coordinates, geocoding address instead"
            ));
        }
        match resolver.resolve(address).await {
            Some(result) => (result.latitude, result.longitude),
            None => return Err(format!("Could not geocode address: {address}")),
        }
    };

    Job::new(id, address, latitude, longitude, priority, estimated_time)
        .map_err(|err| err.to_string())
}
