//! Engine-wide defaults, per-domain overrides, and their merge.
//!
//! Resolution reads a single [`EffectiveRules`] value. It is built by a
//! field-level merge: every field a domain sets wins, every field it leaves
//! unset falls through to the engine default. The merge looks at each field
//! in isolation, so the result does not depend on evaluation order.

mod book;
mod domain;
mod tables;

pub use book::*;
pub use domain::*;
pub use tables::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::error::{Result, RulesError};
use crate::tiers::{ComplexityTier, Density, Permission};

/// Version stamp of a rule set, used to key result caches.
///
/// Built-in defaults carry the nil version. Every load from a document gets
/// a fresh random version; callers that edit rules in place must call
/// `restamp` so cached results keyed on the old version are not reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RulesVersion(pub Uuid);

impl RulesVersion {
    /// Version of the compiled-in defaults.
    pub fn builtin() -> Self {
        Self(Uuid::nil())
    }

    /// A new random version.
    pub fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RulesVersion {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Display for RulesVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Engine-wide defaults for every tunable of the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineRules {
    #[serde(skip)]
    pub version: RulesVersion,

    // Content level
    pub content_weights: ContentWeights,
    pub content_thresholds: ContentThresholds,

    // Activity
    /// Interactions more recent than this keep a node `active`.
    pub active_within_ms: f64,
    /// Interactions more recent than this keep a node `idle`; older is `dormant`.
    pub idle_within_ms: f64,
    /// Interactions per minute above which the activity tier is promoted once.
    pub promotion_rate: f64,
    /// Trigger tags that force the activity tier to at least `busy`.
    pub critical_triggers: BTreeSet<String>,

    /// Permission assumed when a context does not carry one.
    pub default_permission: Permission,

    // Density
    /// Highest density a `view`-only user may receive.
    pub view_density_ceiling: Density,
    pub complexity_floors: ComplexityFloors,

    // Scale
    pub base_scale: DensityScale,
    pub activity_multiplier: ActivityScale,
    /// Per-level scale factor applied once for each level of nesting.
    pub depth_falloff: f64,
    /// Depth falloff never shrinks scale below this factor.
    pub min_depth_factor: f64,
    /// Depths above this are clamped before computation.
    pub depth_limit: u32,

    // Visibility and navigation
    pub depth_allowed: u32,
    pub visibility: LevelVisibility,
    /// Visibility factor applied per level beyond `depth_allowed`.
    pub overflow_dampening: f64,
    pub interaction_floor: Permission,

    // Motion
    pub motion_window_ms: f64,
    pub min_motion_intensity: f64,
    pub max_motion_intensity: f64,

    pub size_by_content: bool,
    pub motion_by_activity: bool,
}

impl Default for EngineRules {
    fn default() -> Self {
        Self {
            version: RulesVersion::builtin(),
            content_weights: ContentWeights::default(),
            content_thresholds: ContentThresholds::default(),
            active_within_ms: 30_000.0,
            idle_within_ms: 300_000.0,
            promotion_rate: 10.0,
            critical_triggers: ["blocked", "deadline", "error"]
                .into_iter()
                .map(String::from)
                .collect(),
            default_permission: Permission::View,
            view_density_ceiling: Density::Compact,
            complexity_floors: ComplexityFloors::default(),
            base_scale: DensityScale::default(),
            activity_multiplier: ActivityScale::default(),
            depth_falloff: 0.85,
            min_depth_factor: 0.35,
            depth_limit: 32,
            depth_allowed: 4,
            visibility: LevelVisibility::default(),
            overflow_dampening: 0.5,
            interaction_floor: Permission::Read,
            motion_window_ms: 60_000.0,
            min_motion_intensity: 0.1,
            max_motion_intensity: 2.0,
            size_by_content: true,
            motion_by_activity: true,
        }
    }
}

impl EngineRules {
    /// Give these rules a new version after editing them in place.
    pub fn restamp(&mut self) {
        self.version = RulesVersion::fresh();
    }

    /// Highest density allowed for a permission tier.
    pub fn density_ceiling(&self, permission: Permission) -> Density {
        match permission {
            Permission::None => Density::Minimal,
            Permission::View => self.view_density_ceiling,
            Permission::Read | Permission::Write | Permission::Admin => Density::Full,
        }
    }

    /// Check every field for values the resolver cannot work with.
    pub fn validate(&self) -> Result<()> {
        self.content_weights.validate()?;
        self.content_thresholds.validate()?;
        self.base_scale.validate()?;
        self.activity_multiplier.validate()?;
        self.visibility.validate()?;

        if !(self.active_within_ms.is_finite() && self.idle_within_ms.is_finite())
            || self.active_within_ms < 0.0
            || self.active_within_ms > self.idle_within_ms
        {
            return Err(RulesError::invalid(
                "active_within_ms",
                "recency windows must satisfy 0 <= active <= idle",
            ));
        }
        if !self.promotion_rate.is_finite() || self.promotion_rate < 0.0 {
            return Err(RulesError::invalid("promotion_rate", "must be non-negative"));
        }
        if !(self.depth_falloff > 0.0 && self.depth_falloff <= 1.0) {
            return Err(RulesError::invalid("depth_falloff", "must lie in (0, 1]"));
        }
        if !(self.min_depth_factor > 0.0 && self.min_depth_factor <= 1.0) {
            return Err(RulesError::invalid("min_depth_factor", "must lie in (0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.overflow_dampening) {
            return Err(RulesError::invalid("overflow_dampening", "must lie in [0, 1]"));
        }
        if !self.motion_window_ms.is_finite() || self.motion_window_ms <= 0.0 {
            return Err(RulesError::invalid("motion_window_ms", "must be positive"));
        }
        if !(self.min_motion_intensity >= 0.0
            && self.min_motion_intensity <= self.max_motion_intensity
            && self.max_motion_intensity.is_finite())
        {
            return Err(RulesError::invalid(
                "min_motion_intensity",
                "motion intensity bounds must satisfy 0 <= min <= max",
            ));
        }
        Ok(())
    }
}

/// Overrides a single content domain layers on top of [`EngineRules`].
///
/// The two flags are mandatory in rule documents; everything else is
/// optional and falls through to the engine default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainRules {
    #[serde(skip)]
    pub version: RulesVersion,

    /// Whether content volume drives scale. When false, base scale is 1.0.
    pub size_by_content: bool,
    /// Whether activity drives motion. When false, motion is always `none`.
    pub motion_by_activity: bool,

    #[serde(default)]
    pub content_weights: WeightOverrides,
    #[serde(default)]
    pub content_thresholds: Option<ContentThresholds>,
    #[serde(default)]
    pub active_within_ms: Option<f64>,
    #[serde(default)]
    pub idle_within_ms: Option<f64>,
    #[serde(default)]
    pub promotion_rate: Option<f64>,
    #[serde(default)]
    pub critical_triggers: Option<BTreeSet<String>>,
    #[serde(default)]
    pub view_density_ceiling: Option<Density>,
    #[serde(default)]
    pub complexity_floors: Option<ComplexityFloors>,
    #[serde(default)]
    pub base_scale: Option<DensityScale>,
    #[serde(default)]
    pub activity_multiplier: Option<ActivityScale>,
    #[serde(default)]
    pub depth_falloff: Option<f64>,
    #[serde(default)]
    pub min_depth_factor: Option<f64>,
    #[serde(default)]
    pub depth_allowed: Option<u32>,
    #[serde(default)]
    pub visibility: Option<LevelVisibility>,
    #[serde(default)]
    pub overflow_dampening: Option<f64>,
    /// May only raise the engine floor, never lower it.
    #[serde(default)]
    pub interaction_floor: Option<Permission>,
    #[serde(default)]
    pub motion_window_ms: Option<f64>,
    #[serde(default)]
    pub min_motion_intensity: Option<f64>,
    #[serde(default)]
    pub max_motion_intensity: Option<f64>,

    /// Complexity tiers at which nodes of this domain are locked.
    #[serde(default)]
    pub locked_complexities: BTreeSet<ComplexityTier>,
}

impl Default for DomainRules {
    fn default() -> Self {
        Self {
            version: RulesVersion::builtin(),
            size_by_content: true,
            motion_by_activity: true,
            content_weights: WeightOverrides::default(),
            content_thresholds: None,
            active_within_ms: None,
            idle_within_ms: None,
            promotion_rate: None,
            critical_triggers: None,
            view_density_ceiling: None,
            complexity_floors: None,
            base_scale: None,
            activity_multiplier: None,
            depth_falloff: None,
            min_depth_factor: None,
            depth_allowed: None,
            visibility: None,
            overflow_dampening: None,
            interaction_floor: None,
            motion_window_ms: None,
            min_motion_intensity: None,
            max_motion_intensity: None,
            locked_complexities: BTreeSet::new(),
        }
    }
}

impl DomainRules {
    pub fn restamp(&mut self) {
        self.version = RulesVersion::fresh();
    }

    /// Validate the overrides against the built-in engine rules.
    pub fn validate(&self) -> Result<()> {
        self.validate_against(&EngineRules::default())
    }

    /// Validate the overrides by validating what they merge into on `engine`.
    pub fn validate_against(&self, engine: &EngineRules) -> Result<()> {
        EffectiveRules::merge(engine, Some(self)).rules.validate()
    }
}

/// The merged view the resolver reads.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveRules {
    pub rules: EngineRules,
    pub locked_complexities: BTreeSet<ComplexityTier>,
}

impl EffectiveRules {
    /// Merge domain overrides onto engine defaults, field by field.
    pub fn merge(engine: &EngineRules, domain: Option<&DomainRules>) -> Self {
        let Some(domain) = domain else {
            return Self {
                rules: engine.clone(),
                locked_complexities: BTreeSet::new(),
            };
        };

        let rules = EngineRules {
            version: engine.version,
            content_weights: domain.content_weights.apply(&engine.content_weights),
            content_thresholds: pick(domain.content_thresholds, engine.content_thresholds),
            active_within_ms: pick(domain.active_within_ms, engine.active_within_ms),
            idle_within_ms: pick(domain.idle_within_ms, engine.idle_within_ms),
            promotion_rate: pick(domain.promotion_rate, engine.promotion_rate),
            critical_triggers: domain
                .critical_triggers
                .clone()
                .unwrap_or_else(|| engine.critical_triggers.clone()),
            default_permission: engine.default_permission,
            view_density_ceiling: pick(domain.view_density_ceiling, engine.view_density_ceiling),
            complexity_floors: pick(domain.complexity_floors, engine.complexity_floors),
            base_scale: pick(domain.base_scale, engine.base_scale),
            activity_multiplier: pick(domain.activity_multiplier, engine.activity_multiplier),
            depth_falloff: pick(domain.depth_falloff, engine.depth_falloff),
            min_depth_factor: pick(domain.min_depth_factor, engine.min_depth_factor),
            depth_limit: engine.depth_limit,
            depth_allowed: pick(domain.depth_allowed, engine.depth_allowed),
            visibility: pick(domain.visibility, engine.visibility),
            overflow_dampening: pick(domain.overflow_dampening, engine.overflow_dampening),
            interaction_floor: domain
                .interaction_floor
                .map_or(engine.interaction_floor, |floor| {
                    floor.max(engine.interaction_floor)
                }),
            motion_window_ms: pick(domain.motion_window_ms, engine.motion_window_ms),
            min_motion_intensity: pick(domain.min_motion_intensity, engine.min_motion_intensity),
            max_motion_intensity: pick(domain.max_motion_intensity, engine.max_motion_intensity),
            size_by_content: domain.size_by_content,
            motion_by_activity: domain.motion_by_activity,
        };

        Self {
            rules,
            locked_complexities: domain.locked_complexities.clone(),
        }
    }

    /// Replace merged values the resolver cannot work with, first by the
    /// engine's own value, then by the built-in default. Motion bounds are
    /// reordered so that `min <= max`.
    pub fn settled(mut self, engine: &EngineRules) -> Self {
        let builtin = EngineRules::default();
        let rules = &mut self.rules;

        rules.content_weights = settle(
            rules.content_weights,
            engine.content_weights,
            builtin.content_weights,
            |weights| weights.validate().is_ok(),
        );
        rules.content_thresholds = settle(
            rules.content_thresholds,
            engine.content_thresholds,
            builtin.content_thresholds,
            |thresholds| thresholds.validate().is_ok(),
        );
        rules.base_scale = settle(
            rules.base_scale,
            engine.base_scale,
            builtin.base_scale,
            |scale| scale.validate().is_ok(),
        );
        rules.activity_multiplier = settle(
            rules.activity_multiplier,
            engine.activity_multiplier,
            builtin.activity_multiplier,
            |scale| scale.validate().is_ok(),
        );
        rules.visibility = settle(
            rules.visibility,
            engine.visibility,
            builtin.visibility,
            |visibility| visibility.validate().is_ok(),
        );

        let window = |ms: f64| ms >= 0.0;
        let unit = |value: f64| value > 0.0 && value <= 1.0;
        let finite_non_negative = |value: f64| value.is_finite() && value >= 0.0;

        rules.active_within_ms = settle(
            rules.active_within_ms,
            engine.active_within_ms,
            builtin.active_within_ms,
            window,
        );
        rules.idle_within_ms = settle(
            rules.idle_within_ms,
            engine.idle_within_ms,
            builtin.idle_within_ms,
            window,
        );
        rules.promotion_rate = settle(
            rules.promotion_rate,
            engine.promotion_rate,
            builtin.promotion_rate,
            finite_non_negative,
        );
        rules.depth_falloff = settle(
            rules.depth_falloff,
            engine.depth_falloff,
            builtin.depth_falloff,
            unit,
        );
        rules.min_depth_factor = settle(
            rules.min_depth_factor,
            engine.min_depth_factor,
            builtin.min_depth_factor,
            unit,
        );
        rules.overflow_dampening = settle(
            rules.overflow_dampening,
            engine.overflow_dampening,
            builtin.overflow_dampening,
            |value| (0.0..=1.0).contains(&value),
        );
        rules.motion_window_ms = settle(
            rules.motion_window_ms,
            engine.motion_window_ms,
            builtin.motion_window_ms,
            |ms| ms.is_finite() && ms > 0.0,
        );

        let min = settle(
            rules.min_motion_intensity,
            engine.min_motion_intensity,
            builtin.min_motion_intensity,
            finite_non_negative,
        );
        let max = settle(
            rules.max_motion_intensity,
            engine.max_motion_intensity,
            builtin.max_motion_intensity,
            finite_non_negative,
        );
        rules.min_motion_intensity = min.min(max);
        rules.max_motion_intensity = min.max(max);

        self
    }

    /// Whether nodes are administratively locked at this complexity.
    pub fn is_locked(&self, complexity: Option<ComplexityTier>) -> bool {
        complexity.is_some_and(|tier| self.locked_complexities.contains(&tier))
    }
}

fn pick<T>(over: Option<T>, base: T) -> T {
    over.unwrap_or(base)
}

fn settle<T: Copy>(merged: T, engine: T, builtin: T, valid: impl Fn(T) -> bool) -> T {
    if valid(merged) {
        merged
    } else if valid(engine) {
        engine
    } else {
        builtin
    }
}
