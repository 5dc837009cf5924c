//! Per-item dimension adjustment and layout hints.

use presence_rules::{ContentNode, NodeState};

use super::composition::{LayoutHints, Position, SizeTier};
use super::ItemModifiers;
use crate::resolver::ResolvedDimension;

/// Derive a child's dimension from its parent's and its own state.
///
/// The child's state modulates the inherited budget but never overrides it:
/// a locked child is never interactable, and a child is only ever as visible
/// and interactable as its parent.
pub fn adjust_for_state(
    parent: &ResolvedDimension,
    state: &NodeState,
    modifiers: &ItemModifiers,
) -> ResolvedDimension {
    let state_scale = if state.is_active {
        modifiers.active_scale
    } else if state.is_locked {
        modifiers.locked_scale
    } else {
        1.0
    };
    let focus_scale = if state.is_focused {
        modifiers.focused_scale
    } else {
        1.0
    };

    let visibility = if state.is_locked {
        parent.visibility * modifiers.locked_visibility
    } else {
        parent.visibility
    };
    let visible = parent.visible && visibility > 0.0;

    ResolvedDimension {
        scale: parent.scale * state_scale * focus_scale,
        visibility,
        visible,
        interactable: visible && parent.interactable && !state.is_locked,
        current_depth: parent.current_depth.saturating_add(1),
        ..*parent
    }
}

pub fn size_tier(scale: f64) -> SizeTier {
    if scale < 0.75 {
        SizeTier::Small
    } else if scale < 1.1 {
        SizeTier::Medium
    } else if scale < 1.35 {
        SizeTier::Large
    } else {
        SizeTier::Hero
    }
}

/// Hints for one item from its own dimension.
pub fn hints_for(
    node: &ContentNode,
    dimension: &ResolvedDimension,
    actions_detail_threshold: u8,
    position: Option<Position>,
) -> LayoutHints {
    LayoutHints {
        size: size_tier(dimension.scale),
        show_label: dimension.visible,
        show_description: dimension.visible
            && dimension.detail_level >= 3
            && node.description.is_some(),
        show_metrics: dimension.visible && dimension.detail_level >= 4 && node.metrics.is_some(),
        show_actions: dimension.interactable
            && dimension.detail_level >= actions_detail_threshold
            && !node.actions.is_empty(),
        position,
    }
}
