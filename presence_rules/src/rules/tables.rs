//! Per-tier lookup tables used by [`EngineRules`](super::EngineRules).

use serde::{Deserialize, Serialize};

use crate::error::{Result, RulesError};
use crate::tiers::{ActivityState, ComplexityTier, ContentLevel, Density};

/// Weight of each content metric in the content-volume sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentWeights {
    pub items: f64,
    pub agents: f64,
    pub active_processes: f64,
    pub pending_decisions: f64,
}

impl Default for ContentWeights {
    fn default() -> Self {
        Self {
            items: 1.0,
            agents: 2.0,
            active_processes: 1.5,
            pending_decisions: 3.0,
        }
    }
}

impl ContentWeights {
    pub(crate) fn validate(&self) -> Result<()> {
        for (name, weight) in [
            ("content_weights.items", self.items),
            ("content_weights.agents", self.agents),
            ("content_weights.active_processes", self.active_processes),
            ("content_weights.pending_decisions", self.pending_decisions),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(RulesError::invalid(name, "weight must be finite and non-negative"));
            }
        }
        Ok(())
    }
}

/// Per-field weight overrides. Each weight can be set independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WeightOverrides {
    pub items: Option<f64>,
    pub agents: Option<f64>,
    pub active_processes: Option<f64>,
    pub pending_decisions: Option<f64>,
}

impl WeightOverrides {
    /// Overlay these overrides onto `base`.
    pub fn apply(&self, base: &ContentWeights) -> ContentWeights {
        ContentWeights {
            items: self.items.unwrap_or(base.items),
            agents: self.agents.unwrap_or(base.agents),
            active_processes: self.active_processes.unwrap_or(base.active_processes),
            pending_decisions: self.pending_decisions.unwrap_or(base.pending_decisions),
        }
    }
}

/// Ascending lower bounds for `light`, `moderate`, `heavy`, and `extreme`.
/// Anything below the first bound is `minimal`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentThresholds(pub [f64; 4]);

impl Default for ContentThresholds {
    fn default() -> Self {
        Self([5.0, 15.0, 30.0, 60.0])
    }
}

impl ContentThresholds {
    /// Bucket a weighted content sum.
    pub fn bucket(&self, weighted: f64) -> ContentLevel {
        let passed = self.0.iter().filter(|bound| weighted >= **bound).count();
        ContentLevel::ALL[passed]
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.0.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(RulesError::invalid(
                "content_thresholds",
                "thresholds must be finite and non-negative",
            ));
        }
        if self.0.windows(2).any(|w| w[0] >= w[1]) {
            return Err(RulesError::invalid(
                "content_thresholds",
                "thresholds must be strictly ascending",
            ));
        }
        Ok(())
    }
}

/// Base scale per density tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityScale {
    pub minimal: f64,
    pub compact: f64,
    pub standard: f64,
    pub expanded: f64,
    pub full: f64,
}

impl Default for DensityScale {
    fn default() -> Self {
        Self {
            minimal: 0.6,
            compact: 0.8,
            standard: 1.0,
            expanded: 1.2,
            full: 1.4,
        }
    }
}

impl DensityScale {
    pub fn get(&self, density: Density) -> f64 {
        match density {
            Density::Minimal => self.minimal,
            Density::Compact => self.compact,
            Density::Standard => self.standard,
            Density::Expanded => self.expanded,
            Density::Full => self.full,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if Density::ALL
            .iter()
            .any(|d| !self.get(*d).is_finite() || self.get(*d) <= 0.0)
        {
            return Err(RulesError::invalid("base_scale", "scales must be positive"));
        }
        Ok(())
    }
}

/// Scale multiplier per activity tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityScale {
    pub dormant: f64,
    pub idle: f64,
    pub active: f64,
    pub busy: f64,
    pub critical: f64,
}

impl Default for ActivityScale {
    fn default() -> Self {
        Self {
            dormant: 0.9,
            idle: 0.95,
            active: 1.0,
            busy: 1.05,
            critical: 1.1,
        }
    }
}

impl ActivityScale {
    pub fn get(&self, state: ActivityState) -> f64 {
        match state {
            ActivityState::Dormant => self.dormant,
            ActivityState::Idle => self.idle,
            ActivityState::Active => self.active,
            ActivityState::Busy => self.busy,
            ActivityState::Critical => self.critical,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if ActivityState::ALL
            .iter()
            .any(|s| !self.get(*s).is_finite() || self.get(*s) <= 0.0)
        {
            return Err(RulesError::invalid(
                "activity_multiplier",
                "multipliers must be positive",
            ));
        }
        Ok(())
    }
}

/// Visibility per content level, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelVisibility {
    pub minimal: f64,
    pub light: f64,
    pub moderate: f64,
    pub heavy: f64,
    pub extreme: f64,
}

impl Default for LevelVisibility {
    fn default() -> Self {
        Self {
            minimal: 0.6,
            light: 0.7,
            moderate: 0.8,
            heavy: 0.9,
            extreme: 1.0,
        }
    }
}

impl LevelVisibility {
    pub fn get(&self, level: ContentLevel) -> f64 {
        match level {
            ContentLevel::Minimal => self.minimal,
            ContentLevel::Light => self.light,
            ContentLevel::Moderate => self.moderate,
            ContentLevel::Heavy => self.heavy,
            ContentLevel::Extreme => self.extreme,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if ContentLevel::ALL
            .iter()
            .any(|l| !(0.0..=1.0).contains(&self.get(*l)))
        {
            return Err(RulesError::invalid(
                "visibility",
                "visibility must lie in [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Minimum density forced by an explicit complexity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityFloors {
    pub simple: Density,
    pub moderate: Density,
    pub complex: Density,
    pub expert: Density,
}

impl Default for ComplexityFloors {
    fn default() -> Self {
        Self {
            simple: Density::Minimal,
            moderate: Density::Compact,
            complex: Density::Standard,
            expert: Density::Expanded,
        }
    }
}

impl ComplexityFloors {
    pub fn get(&self, tier: ComplexityTier) -> Density {
        match tier {
            ComplexityTier::Simple => self.simple,
            ComplexityTier::Moderate => self.moderate,
            ComplexityTier::Complex => self.complex,
            ComplexityTier::Expert => self.expert,
        }
    }
}
