//! Property-based tests for resolution and composition guarantees

use presence_core::{
    compose_page, resolve_dimension, CompositionRules, PageComposition, PageContext,
    ResolvedDimension, SectionId,
};
use presence_rules::{
    ActivityMetrics, ContentMetrics, ContentNode, Context, Density, DomainRules, EngineRules,
    GrowthAxis, NodeState, Permission,
};
use proptest::prelude::*;
use proptest::test_runner::TestRunner;

fn count() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => -10.0f64..200.0,
        1 => Just(f64::NAN),
    ]
}

fn context_strategy() -> impl Strategy<Value = Context> {
    (
        (count(), count(), count(), count()),
        prop::option::of(0.0f64..600_000.0),
        prop::option::of(0.0f64..40.0),
        prop::sample::subsequence(vec!["error", "deadline", "idle"], 0..=2),
        0u32..48,
    )
        .prop_map(|((items, agents, active, pending), last, rate, triggers, depth)| {
            Context::at_depth(depth)
                .with_content(ContentMetrics {
                    items,
                    agents,
                    active_processes: active,
                    pending_decisions: pending,
                })
                .with_activity(ActivityMetrics {
                    last_interaction_ms: last,
                    actions_per_minute: rate,
                    triggers: triggers.into_iter().map(String::from).collect(),
                })
        })
}

fn permission() -> impl Strategy<Value = Permission> {
    prop::sample::select(Permission::ALL.to_vec())
}

/// Resolving the same context twice gives identical output
#[test]
fn test_resolution_determinism_property() {
    let mut runner = TestRunner::default();
    let engine = EngineRules::default();

    runner
        .run(&(context_strategy(), permission()), |(context, permission)| {
            let context = context.with_permission(permission);
            let first = resolve_dimension(&context, &engine, None);
            let second = resolve_dimension(&context, &engine, None);
            prop_assert_eq!(first, second);
            Ok(())
        })
        .unwrap();
}

/// Raising permission never makes a node less visible or less interactable
#[test]
fn test_permission_monotonicity_property() {
    let mut runner = TestRunner::default();
    let engine = EngineRules::default();

    runner
        .run(&context_strategy(), |context| {
            let resolved: Vec<_> = Permission::ALL
                .iter()
                .map(|p| resolve_dimension(&context.clone().with_permission(*p), &engine, None))
                .collect();

            for pair in resolved.windows(2) {
                prop_assert!(pair[1].visible >= pair[0].visible);
                prop_assert!(pair[1].interactable >= pair[0].interactable);
            }
            Ok(())
        })
        .unwrap();
}

/// Deeper nodes are never larger than shallower ones
#[test]
fn test_depth_falloff_property() {
    let mut runner = TestRunner::default();
    let engine = EngineRules::default();

    runner
        .run(
            &(context_strategy(), permission(), 0u32..48, 0u32..48),
            |(context, permission, a, b)| {
                let (shallow, deep) = (a.min(b), a.max(b));
                let base = context.with_permission(permission);

                let mut shallow_ctx = base.clone();
                shallow_ctx.depth = shallow;
                let mut deep_ctx = base;
                deep_ctx.depth = deep;

                let shallow = resolve_dimension(&shallow_ctx, &engine, None);
                let deep = resolve_dimension(&deep_ctx, &engine, None);
                prop_assert!(deep.scale <= shallow.scale);
                Ok(())
            },
        )
        .unwrap();
}

/// Every resolved dimension stays structurally valid
#[test]
fn test_resolved_dimension_bounds_property() {
    let mut runner = TestRunner::default();
    let engine = EngineRules::default();

    runner
        .run(&(context_strategy(), permission()), |(context, permission)| {
            let dim = resolve_dimension(&context.with_permission(permission), &engine, None);
            prop_assert!(dim.scale.is_finite() && dim.scale > 0.0);
            prop_assert!((0.0..=1.0).contains(&dim.visibility));
            prop_assert!(dim.motion.intensity >= 0.0);
            prop_assert!(dim.visible || !dim.interactable);
            prop_assert!(dim.current_depth <= engine.depth_limit);
            Ok(())
        })
        .unwrap();
}

/// Arbitrary domain overrides never break resolution
#[test]
fn test_domain_overrides_stay_total_property() {
    let mut runner = TestRunner::default();
    let engine = EngineRules::default();
    let number = || {
        prop::option::of(prop_oneof![
            4 => -2.0f64..3.0,
            1 => Just(f64::NAN),
            1 => Just(f64::INFINITY),
        ])
    };

    runner
        .run(
            &(context_strategy(), (number(), number(), number(), number(), number())),
            |(context, (min, max, falloff, floor, dampening))| {
                let domain = DomainRules {
                    min_motion_intensity: min,
                    max_motion_intensity: max,
                    depth_falloff: falloff,
                    min_depth_factor: floor,
                    overflow_dampening: dampening,
                    ..Default::default()
                };
                let context = context.with_permission(Permission::Write);
                let dim = resolve_dimension(&context, &engine, Some(&domain));
                prop_assert!(dim.scale.is_finite() && dim.scale > 0.0);
                prop_assert!(dim.visibility.is_finite());
                prop_assert!(dim.motion.intensity.is_finite() && dim.motion.intensity >= 0.0);
                Ok(())
            },
        )
        .unwrap();
}

/// Higher density tiers show a superset of the sections of lower tiers
#[test]
fn test_density_section_superset() {
    let node = ContentNode::new("hub", "workspace")
        .with_metrics(Default::default())
        .with_action(presence_rules::NodeAction::new("open", "Open"));

    let visible: Vec<_> = Density::ALL
        .iter()
        .map(|density| {
            let dimension = ResolvedDimension {
                density: *density,
                detail_level: density.detail_level(),
                interactable: true,
                ..Default::default()
            };
            compose_page(&PageContext::new(&node, dimension), None).visible_sections()
        })
        .collect();

    assert_eq!(visible[0].len(), 1);
    assert!(visible[0].contains(&SectionId::Primary));
    for pair in visible.windows(2) {
        assert!(pair[1].is_superset(&pair[0]));
    }
    assert_eq!(visible[4].len(), SectionId::ALL.len());
}

/// Locked children are never interactable, whatever the parent allows
#[test]
fn test_locked_child_suppression_property() {
    let mut runner = TestRunner::default();
    let engine = EngineRules::default();

    runner
        .run(
            &(context_strategy(), permission(), any::<bool>(), any::<bool>()),
            |(context, permission, active, focused)| {
                let parent = resolve_dimension(&context.with_permission(permission), &engine, None);
                let state = NodeState {
                    is_active: active,
                    is_locked: true,
                    is_focused: focused,
                    ..Default::default()
                };
                let node = ContentNode::new("hub", "workspace")
                    .with_child(ContentNode::new("vault", "item").with_state(state));

                let page = compose_page(&PageContext::new(&node, parent), None);
                prop_assert!(page.sections[0].items.iter().all(|i| !i.dimension.interactable));
                Ok(())
            },
        )
        .unwrap();
}

/// More children never means fewer columns
#[test]
fn test_column_monotonicity_property() {
    let mut runner = TestRunner::default();
    let rules = CompositionRules::default();

    runner
        .run(&(0usize..2_000, 0usize..2_000), |(a, b)| {
            let (small, large) = (a.min(b), a.max(b));
            prop_assert!(rules.columns_for(large) >= rules.columns_for(small));
            Ok(())
        })
        .unwrap();
}

/// Composing the same tree twice orders items identically, by ascending priority
#[test]
fn test_priority_ordering_property() {
    let mut runner = TestRunner::default();

    runner
        .run(&prop::collection::vec(-3i32..3, 0..30), |priorities| {
            let node = ContentNode::new("hub", "workspace")
                .with_growth_axis(GrowthAxis::Vertical)
                .with_children(
                    priorities
                        .iter()
                        .enumerate()
                        .map(|(i, p)| {
                            ContentNode::new(format!("child-{i}"), "item").with_priority(*p)
                        }),
                );
            let context = PageContext::new(&node, ResolvedDimension::default());

            let ids = |page: PageComposition<'_>| {
                page.sections[0]
                    .items
                    .iter()
                    .map(|item| (item.node.priority, item.node.id.clone()))
                    .collect::<Vec<_>>()
            };
            let first = ids(compose_page(&context, None));
            let second = ids(compose_page(&context, None));
            prop_assert_eq!(&first, &second);
            prop_assert!(first.windows(2).all(|w| w[0].0 <= w[1].0));
            Ok(())
        })
        .unwrap();
}
