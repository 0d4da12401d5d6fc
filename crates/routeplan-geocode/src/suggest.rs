//! Debounced, cancellable suggestion lookups for a single input field.
//!
//! Each new query supersedes the previous one: the older request is
//! abandoned at its next checkpoint, so a slow response can never overwrite
//! a newer query's results.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use routeplan_core::GeocodingResult;

use crate::resolver::GeocodingResolver;

/// Per-input-field suggestion state: a quiet-period debounce plus a
/// generation counter acting as the cancellation token.
///
/// Create one session per input field; concurrent fields get independent
/// supersession.
pub struct SuggestionSession {
    resolver: Arc<GeocodingResolver>,
    quiet_period: Duration,
    generation: AtomicU64,
}

impl SuggestionSession {
    #[must_use]
    pub fn new(resolver: Arc<GeocodingResolver>, quiet_period: Duration) -> Self {
        Self {
            resolver,
            quiet_period,
            generation: AtomicU64::new(0),
        }
    }

    /// Looks up suggestions for `text` after the quiet period.
    ///
    /// Returns `None` when a newer query superseded this one — either during
    /// the quiet period (no network call is made) or while the lookup was in
    /// flight (the stale response is discarded). `Some` carries the
    /// suggestions to apply, which may be empty.
    pub async fn query(&self, text: &str) -> Option<Vec<GeocodingResult>> {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        tokio::time::sleep(self.quiet_period).await;
        if self.generation.load(Ordering::SeqCst) != token {
            return None;
        }

        let suggestions = self.resolver.suggest(text).await;

        // A newer query may have started while this one was on the wire.
        if self.generation.load(Ordering::SeqCst) != token {
            return None;
        }
        Some(suggestions)
    }
}
