//! In-memory job collection with derived-route invalidation.
//!
//! The store owns the current optimized route, and every successful mutation
//! of the job set discards it: a route computed for a different job set must
//! never be rendered or exported as if it were current.

use routeplan_core::{Job, OptimizedJob, Priority, RouteSummary};

use crate::error::StoreError;

/// A partial update for [`JobStore::edit`]. `None` fields keep their current
/// value; the id is immutable.
#[derive(Debug, Default, Clone)]
pub struct JobPatch {
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub priority: Option<Priority>,
    pub estimated_time: Option<u32>,
}

/// Per-item outcome of a bulk add: conflicted items were left out and are the
/// caller's keep-or-replace decision.
#[derive(Debug, Default)]
pub struct BulkAddOutcome {
    pub added: Vec<String>,
    pub conflicts: Vec<String>,
}

/// Ordered in-memory collection of jobs, keyed by id.
#[derive(Default)]
pub struct JobStore {
    jobs: Vec<Job>,
    route: Option<(Vec<OptimizedJob>, RouteSummary)>,
}

impl JobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    /// Adds a job, rejecting duplicates — conflict resolution is a
    /// caller-level policy, never a silent overwrite.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] when the id is already present.
    pub fn add(&mut self, job: Job) -> Result<(), StoreError> {
        if self.get(&job.id).is_some() {
            return Err(StoreError::DuplicateId(job.id));
        }
        self.jobs.push(job);
        self.invalidate_route();
        Ok(())
    }

    /// Adds many jobs, applying the duplicate-id rule per item. The route is
    /// invalidated when at least one job was added.
    pub fn bulk_add(&mut self, jobs: Vec<Job>) -> BulkAddOutcome {
        let mut outcome = BulkAddOutcome::default();
        for job in jobs {
            if self.get(&job.id).is_some() {
                outcome.conflicts.push(job.id);
            } else {
                outcome.added.push(job.id.clone());
                self.jobs.push(job);
            }
        }
        if !outcome.added.is_empty() {
            self.invalidate_route();
        }
        outcome
    }

    /// Inserts or overwrites a job in place — the explicit "replace
    /// existing" policy primitive for resolving a reported conflict.
    pub fn replace(&mut self, job: Job) {
        if let Some(existing) = self.jobs.iter_mut().find(|j| j.id == job.id) {
            *existing = job;
        } else {
            self.jobs.push(job);
        }
        self.invalidate_route();
    }

    /// Merges a partial patch into an existing job.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownId`] when no job has this id.
    pub fn edit(&mut self, id: &str, patch: JobPatch) -> Result<(), StoreError> {
        let job = self
            .jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| StoreError::UnknownId(id.to_string()))?;

        if let Some(address) = patch.address {
            job.address = address;
        }
        if let Some(latitude) = patch.latitude {
            job.latitude = latitude;
        }
        if let Some(longitude) = patch.longitude {
            job.longitude = longitude;
        }
        if let Some(priority) = patch.priority {
            job.priority = priority;
        }
        if let Some(estimated_time) = patch.estimated_time {
            job.estimated_time = estimated_time;
        }
        self.invalidate_route();
        Ok(())
    }

    /// Removes a job by id. Returns whether anything was removed; removing
    /// an absent id is a no-op and keeps the current route.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.jobs.len();
        self.jobs.retain(|j| j.id != id);
        let removed = self.jobs.len() != before;
        if removed {
            self.invalidate_route();
        }
        removed
    }

    /// Stores an optimized route for the current job set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MalformedRoute`] unless route positions are
    /// exactly `1..=n`, each used once.
    pub fn set_route(
        &mut self,
        route: Vec<OptimizedJob>,
        summary: RouteSummary,
    ) -> Result<(), StoreError> {
        let mut positions: Vec<u32> = route.iter().map(|j| j.route_position).collect();
        positions.sort_unstable();
        #[allow(clippy::cast_possible_truncation)]
        let contiguous = positions
            .iter()
            .enumerate()
            .all(|(i, &p)| p == i as u32 + 1);
        if !contiguous {
            return Err(StoreError::MalformedRoute);
        }
        self.route = Some((route, summary));
        Ok(())
    }

    /// The current optimized route, if one is still valid for this job set.
    #[must_use]
    pub fn route(&self) -> Option<(&[OptimizedJob], &RouteSummary)> {
        self.route
            .as_ref()
            .map(|(route, summary)| (route.as_slice(), summary))
    }

    /// Discards the derived route and summary. Called internally by every
    /// mutating operation; also the hook for external invalidation events
    /// such as a warehouse change.
    pub fn invalidate_route(&mut self) {
        if self.route.take().is_some() {
            tracing::debug!("optimized route invalidated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str) -> Job {
        Job::new(id, format!("{id} street"), 40.0, -75.0, Priority::Medium, 15).unwrap()
    }

    fn stop(id: &str, position: u32) -> OptimizedJob {
        OptimizedJob {
            job: job(id),
            route_position: position,
            eta_minutes: 10 * position,
            distance_from_prev_km: 1.0,
            cumulative_distance_km: f64::from(position),
        }
    }

    fn summary() -> RouteSummary {
        RouteSummary {
            total_distance_km: 3.0,
            estimated_total_time_min: 45,
            path: vec![[-75.16, 39.95]],
        }
    }

    fn store_with_route(ids: &[&str]) -> JobStore {
        let mut store = JobStore::new();
        for id in ids {
            store.add(job(id)).unwrap();
        }
        let route = ids
            .iter()
            .enumerate()
            .map(|(i, id)| stop(id, u32::try_from(i).unwrap() + 1))
            .collect();
        store.set_route(route, summary()).unwrap();
        assert!(store.route().is_some());
        store
    }

    #[test]
    fn add_rejects_duplicate_ids() {
        let mut store = JobStore::new();
        store.add(job("j1")).unwrap();
        let err = store.add(job("j1")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(ref id) if id == "j1"));
        assert_eq!(store.len(), 1, "duplicate must not overwrite");
    }

    #[test]
    fn bulk_add_reports_conflicts_per_item() {
        let mut store = JobStore::new();
        store.add(job("j1")).unwrap();

        let outcome = store.bulk_add(vec![job("j1"), job("j2"), job("j3")]);
        assert_eq!(outcome.added, vec!["j2", "j3"]);
        assert_eq!(outcome.conflicts, vec!["j1"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn add_invalidates_route() {
        let mut store = store_with_route(&["j1"]);
        store.add(job("j2")).unwrap();
        assert!(store.route().is_none());
    }

    #[test]
    fn edit_invalidates_route_and_merges_patch() {
        let mut store = store_with_route(&["j1"]);
        store
            .edit(
                "j1",
                JobPatch {
                    priority: Some(Priority::High),
                    estimated_time: Some(45),
                    ..JobPatch::default()
                },
            )
            .unwrap();

        assert!(store.route().is_none());
        let edited = store.get("j1").unwrap();
        assert_eq!(edited.priority, Priority::High);
        assert_eq!(edited.estimated_time, 45);
        assert_eq!(edited.address, "j1 street", "unpatched fields survive");
    }

    #[test]
    fn edit_unknown_id_is_an_error() {
        let mut store = JobStore::new();
        let err = store.edit("ghost", JobPatch::default()).unwrap_err();
        assert!(matches!(err, StoreError::UnknownId(ref id) if id == "ghost"));
    }

    #[test]
    fn delete_invalidates_route_only_when_something_was_removed() {
        let mut store = store_with_route(&["j1", "j2"]);
        assert!(!store.delete("ghost"));
        assert!(store.route().is_some(), "no-op delete keeps the route");

        assert!(store.delete("j1"));
        assert!(store.route().is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn replace_overwrites_in_place_and_invalidates() {
        let mut store = store_with_route(&["j1", "j2"]);
        let mut replacement = job("j1");
        replacement.estimated_time = 99;
        store.replace(replacement);

        assert!(store.route().is_none());
        assert_eq!(store.get("j1").unwrap().estimated_time, 99);
        assert_eq!(store.jobs()[0].id, "j1", "replace keeps ordering");
    }

    #[test]
    fn set_route_rejects_non_contiguous_positions() {
        let mut store = JobStore::new();
        store.add(job("j1")).unwrap();
        store.add(job("j2")).unwrap();

        let err = store
            .set_route(vec![stop("j1", 1), stop("j2", 3)], summary())
            .unwrap_err();
        assert!(matches!(err, StoreError::MalformedRoute));

        let err = store
            .set_route(vec![stop("j1", 1), stop("j2", 1)], summary())
            .unwrap_err();
        assert!(matches!(err, StoreError::MalformedRoute));

        let err = store
            .set_route(vec![stop("j1", 0), stop("j2", 1)], summary())
            .unwrap_err();
        assert!(matches!(err, StoreError::MalformedRoute));
    }

    #[test]
    fn bulk_add_of_only_conflicts_keeps_route() {
        let mut store = store_with_route(&["j1"]);
        let outcome = store.bulk_add(vec![job("j1")]);
        assert!(outcome.added.is_empty());
        assert!(
            store.route().is_some(),
            "nothing changed, the route is still valid"
        );
    }
}
