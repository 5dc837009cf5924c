//! Dimension Resolver - maps a context to presentation parameters.
//!
//! Resolution runs in fixed steps, each reading only the sanitized context
//! and the merged rules:
//! 1. **Activity**: recency picks `active`/`idle`/`dormant`, critical triggers
//!    raise the tier to at least `busy`, a high interaction rate promotes once
//! 2. **Content level**: weighted content sum bucketed by ascending thresholds
//! 3. **Density**: natural density of the level, raised to the complexity
//!    floor, then capped by the permission ceiling
//! 4. **Scale**: `base(density) * activity multiplier * depth falloff`
//! 5. **Visibility**: per-level visibility, dampened past `depth_allowed`
//! 6. **Interactability**: visible, permission at the floor, not locked
//! 7. **Motion**: type from activity, intensity from recency

mod dimension;

pub use dimension::*;

use presence_rules::{
    ActivityState, ComplexityTier, ContentLevel, Context, Density, DomainRules, EffectiveRules,
    EngineRules, MotionType, Permission,
};
use tracing::trace;

/// Resolve a context against engine rules and optional domain overrides.
///
/// Total and pure: identical inputs always give identical output.
pub fn resolve_dimension(
    context: &Context,
    engine: &EngineRules,
    domain: Option<&DomainRules>,
) -> ResolvedDimension {
    DimensionResolver::new(engine, domain).resolve(context)
}

/// Resolver bound to one merged rule set.
///
/// Worth holding on to when many contexts resolve against the same rules,
/// since the merge happens once.
#[derive(Debug, Clone)]
pub struct DimensionResolver {
    rules: EffectiveRules,
}

impl DimensionResolver {
    /// Merge the rules, then settle any value the steps below cannot use.
    pub fn new(engine: &EngineRules, domain: Option<&DomainRules>) -> Self {
        Self {
            rules: EffectiveRules::merge(engine, domain).settled(engine),
        }
    }

    /// Resolver over the built-in engine defaults.
    pub fn with_defaults() -> Self {
        Self::new(&EngineRules::default(), None)
    }

    pub fn rules(&self) -> &EffectiveRules {
        &self.rules
    }

    /// Run every resolution step for one context.
    pub fn resolve(&self, context: &Context) -> ResolvedDimension {
        let rules = &self.rules.rules;
        let ctx = context.sanitized();
        let depth = ctx.depth.min(rules.depth_limit);
        let permission = ctx.permission.unwrap_or(rules.default_permission);

        if permission == Permission::None {
            trace!(depth, "Permission none, node hidden");
            return ResolvedDimension::hidden(depth, rules.depth_allowed);
        }

        let activity_state = self.activity_state(&ctx);
        let content_level = self.content_level(&ctx);
        let density = self.density(content_level, ctx.complexity, permission);
        let scale = self.scale(density, activity_state, depth);
        let visibility = self.visibility(content_level, depth);
        let visible = visibility > 0.0 && permission >= Permission::View;
        let interactable = visible
            && permission >= rules.interaction_floor
            && !self.rules.is_locked(ctx.complexity);
        let motion = self.motion(activity_state, ctx.activity.last_interaction_ms);

        trace!(
            ?activity_state,
            ?content_level,
            ?density,
            scale,
            visibility,
            interactable,
            "Resolved dimension"
        );

        ResolvedDimension {
            scale,
            visibility,
            visible,
            interactable,
            density,
            detail_level: density.detail_level(),
            motion,
            activity_state,
            content_level,
            current_depth: depth,
            depth_allowed: rules.depth_allowed,
        }
    }

    /// Activity tier from recency, critical triggers, and interaction rate.
    pub fn activity_state(&self, ctx: &Context) -> ActivityState {
        let rules = &self.rules.rules;

        let mut state = match ctx.activity.last_interaction_ms {
            Some(ms) if ms < rules.active_within_ms => ActivityState::Active,
            Some(ms) if ms < rules.idle_within_ms => ActivityState::Idle,
            _ => ActivityState::Dormant,
        };

        let critical = ctx
            .activity
            .triggers
            .iter()
            .any(|tag| rules.critical_triggers.contains(tag));
        if critical {
            state = state.max(ActivityState::Busy);
        }

        if ctx
            .activity
            .actions_per_minute
            .is_some_and(|rate| rate > rules.promotion_rate)
        {
            state = state.promoted();
        }

        state
    }

    /// Content level from the weighted content sum.
    pub fn content_level(&self, ctx: &Context) -> ContentLevel {
        let rules = &self.rules.rules;
        let weights = &rules.content_weights;
        let content = &ctx.content;

        let weighted = content.items * weights.items
            + content.agents * weights.agents
            + content.active_processes * weights.active_processes
            + content.pending_decisions * weights.pending_decisions;

        rules.content_thresholds.bucket(weighted)
    }

    /// Density from content level, complexity floor, and permission ceiling.
    ///
    /// The permission ceiling is applied last so a `view`-only user never
    /// exceeds it, whatever complexity was requested.
    pub fn density(
        &self,
        level: ContentLevel,
        complexity: Option<ComplexityTier>,
        permission: Permission,
    ) -> Density {
        let rules = &self.rules.rules;
        let floor = complexity.map_or(Density::Minimal, |tier| rules.complexity_floors.get(tier));

        level
            .natural_density()
            .max(floor)
            .min(rules.density_ceiling(permission))
    }

    pub fn scale(&self, density: Density, activity: ActivityState, depth: u32) -> f64 {
        let rules = &self.rules.rules;
        let base = if rules.size_by_content {
            rules.base_scale.get(density)
        } else {
            1.0
        };
        base * rules.activity_multiplier.get(activity) * self.depth_factor(depth)
    }

    /// Monotonically non-increasing in depth, floored at `min_depth_factor`.
    pub fn depth_factor(&self, depth: u32) -> f64 {
        let rules = &self.rules.rules;
        let exponent = i32::try_from(depth).unwrap_or(i32::MAX);
        rules
            .depth_falloff
            .powi(exponent)
            .max(rules.min_depth_factor)
    }

    pub fn visibility(&self, level: ContentLevel, depth: u32) -> f64 {
        let rules = &self.rules.rules;
        let base = rules.visibility.get(level);
        if depth <= rules.depth_allowed {
            return base;
        }
        let overflow = i32::try_from(depth - rules.depth_allowed).unwrap_or(i32::MAX);
        base * rules.overflow_dampening.powi(overflow)
    }

    /// Motion type escalates with activity; intensity grows with recency.
    pub fn motion(&self, activity: ActivityState, last_interaction_ms: Option<f64>) -> Motion {
        let rules = &self.rules.rules;
        if !rules.motion_by_activity {
            return Motion::none();
        }

        let kind = MotionType::for_activity(activity);
        if kind == MotionType::None {
            return Motion::none();
        }

        // 1.0 for an interaction right now, approaching 0 as it ages.
        let recency = last_interaction_ms.map_or(0.0, |ms| {
            rules.motion_window_ms / (rules.motion_window_ms + ms)
        });
        let intensity = (kind.base_intensity() * (1.0 + recency))
            .clamp(rules.min_motion_intensity, rules.max_motion_intensity);

        Motion { kind, intensity }
    }
}
