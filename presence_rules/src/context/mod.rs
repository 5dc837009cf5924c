//! The input bundle that drives dimension resolution.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::tiers::{ComplexityTier, Permission};

/// Content volume carried by a node.
///
/// Counts are `f64` because collaborators feed them from loosely typed
/// sources; [`Context::sanitized`] clamps anything invalid to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentMetrics {
    pub items: f64,
    pub agents: f64,
    pub active_processes: f64,
    pub pending_decisions: f64,
}

/// Live interaction signals, already aggregated by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityMetrics {
    /// Milliseconds since the last interaction. `None` = never interacted.
    pub last_interaction_ms: Option<f64>,
    pub actions_per_minute: Option<f64>,
    /// Active trigger tags, e.g. `"error"` or `"deadline"`.
    pub triggers: BTreeSet<String>,
}

/// Everything the resolver needs to know about one node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    #[serde(default)]
    pub content: ContentMetrics,
    #[serde(default)]
    pub activity: ActivityMetrics,
    #[serde(default)]
    pub complexity: Option<ComplexityTier>,
    #[serde(default)]
    pub permission: Option<Permission>,
    pub depth: u32,
    #[serde(default)]
    pub domain: Option<String>,
}

impl Context {
    /// Create a context at the given nesting depth with everything else unset.
    pub fn at_depth(depth: u32) -> Self {
        Self {
            depth,
            ..Default::default()
        }
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permission = Some(permission);
        self
    }

    pub fn with_complexity(mut self, complexity: ComplexityTier) -> Self {
        self.complexity = Some(complexity);
        self
    }

    pub fn with_content(mut self, content: ContentMetrics) -> Self {
        self.content = content;
        self
    }

    pub fn with_activity(mut self, activity: ActivityMetrics) -> Self {
        self.activity = activity;
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Copy with every numeric field clamped to a finite, non-negative value.
    pub fn sanitized(&self) -> Self {
        Self {
            content: ContentMetrics {
                items: non_negative(self.content.items),
                agents: non_negative(self.content.agents),
                active_processes: non_negative(self.content.active_processes),
                pending_decisions: non_negative(self.content.pending_decisions),
            },
            activity: ActivityMetrics {
                last_interaction_ms: self.activity.last_interaction_ms.map(non_negative),
                actions_per_minute: self.activity.actions_per_minute.map(non_negative),
                triggers: self.activity.triggers.clone(),
            },
            ..self.clone()
        }
    }
}

/// NaN, infinities, and negatives all become zero.
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
