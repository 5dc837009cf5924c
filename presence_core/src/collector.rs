//! Live activity aggregation feeding `ActivityMetrics`.
//!
//! The tracker is the stateful side of the engine. It never reads a clock:
//! every timestamp is supplied by the caller in milliseconds, so snapshots
//! are reproducible in tests.

use presence_rules::ActivityMetrics;
use std::collections::{BTreeSet, VecDeque};
use tracing::trace;

/// Window used for the interactions-per-minute rate.
pub const DEFAULT_RATE_WINDOW_MS: f64 = 60_000.0;

/// Aggregates interactions and trigger tags for one node.
#[derive(Debug, Clone)]
pub struct ActivityTracker {
    interactions: VecDeque<f64>,
    last_interaction: Option<f64>,
    triggers: BTreeSet<String>,
    window_ms: f64,
}

impl Default for ActivityTracker {
    fn default() -> Self {
        Self::new(DEFAULT_RATE_WINDOW_MS)
    }
}

impl ActivityTracker {
    /// Create a tracker with a custom rate window. Non-positive or non-finite
    /// windows fall back to one minute.
    pub fn new(window_ms: f64) -> Self {
        let window_ms = if window_ms.is_finite() && window_ms > 0.0 {
            window_ms
        } else {
            DEFAULT_RATE_WINDOW_MS
        };
        Self {
            interactions: VecDeque::new(),
            last_interaction: None,
            triggers: BTreeSet::new(),
            window_ms,
        }
    }

    /// Record one interaction. Non-finite timestamps are ignored.
    pub fn record_interaction(&mut self, at_ms: f64) {
        if !at_ms.is_finite() {
            return;
        }
        self.last_interaction = Some(self.last_interaction.map_or(at_ms, |last| last.max(at_ms)));
        self.interactions.push_back(at_ms);
        if let Some(latest) = self.last_interaction {
            self.prune(latest);
        }
    }

    /// Mark a trigger tag as active. Returns `false` if it already was.
    pub fn raise_trigger(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        trace!(%tag, "Trigger raised");
        self.triggers.insert(tag)
    }

    /// Clear a trigger tag. Returns `false` if it was not active.
    pub fn resolve_trigger(&mut self, tag: &str) -> bool {
        trace!(%tag, "Trigger resolved");
        self.triggers.remove(tag)
    }

    pub fn triggers(&self) -> &BTreeSet<String> {
        &self.triggers
    }

    /// Aggregate the current state as seen at `now_ms`.
    pub fn snapshot(&self, now_ms: f64) -> ActivityMetrics {
        let last_interaction_ms = self
            .last_interaction
            .map(|last| (now_ms - last).max(0.0));

        let actions_per_minute = self.last_interaction.map(|_| {
            let since = now_ms - self.window_ms;
            let recent = self
                .interactions
                .iter()
                .filter(|&&at| at > since && at <= now_ms)
                .count();
            recent as f64 * 60_000.0 / self.window_ms
        });

        ActivityMetrics {
            last_interaction_ms,
            actions_per_minute,
            triggers: self.triggers.clone(),
        }
    }

    /// Forget everything.
    pub fn reset(&mut self) {
        self.interactions.clear();
        self.last_interaction = None;
        self.triggers.clear();
    }

    fn prune(&mut self, latest: f64) {
        let since = latest - self.window_ms;
        self.interactions.retain(|&at| at > since);
    }
}
