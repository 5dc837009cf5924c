//! Page layout selection and item geometry.

use presence_rules::{ContentNode, Density, GrowthAxis};
use std::f64::consts::TAU;

use super::composition::{
    Background, Direction, LayoutKind, LayoutShape, PageLayout, Position, Spacing,
};
use super::{CompositionRules, DisplayPreferences};
use crate::resolver::ResolvedDimension;

/// Pick the page layout from depth, density, and preferences.
pub fn select_layout(
    content: &ContentNode,
    dimension: &ResolvedDimension,
    preferences: &DisplayPreferences,
    rules: &CompositionRules,
) -> PageLayout {
    let shape = match dimension.current_depth {
        0 => LayoutShape::Centered,
        1 if preferences.split_view => LayoutShape::Split,
        1 => LayoutShape::Sidebar,
        _ => LayoutShape::Full,
    };

    let direction = match shape {
        LayoutShape::Sidebar | LayoutShape::Split => Direction::Row,
        LayoutShape::Centered | LayoutShape::Full => Direction::Column,
    };

    let spacing = if preferences.compact_mode {
        Spacing::Tight
    } else {
        spacing_for(dimension.density)
    };

    let max_width = match shape {
        LayoutShape::Centered => Some(rules.hub_max_width),
        LayoutShape::Sidebar => Some(rules.sidebar_max_width),
        LayoutShape::Split | LayoutShape::Full => None,
    };

    PageLayout {
        shape,
        direction,
        spacing,
        max_width,
        background: background_for(content, dimension, shape),
    }
}

/// Coarser density gets looser spacing.
pub fn spacing_for(density: Density) -> Spacing {
    match density {
        Density::Minimal => Spacing::Loose,
        Density::Compact => Spacing::Relaxed,
        Density::Standard => Spacing::Normal,
        Density::Expanded => Spacing::Snug,
        Density::Full => Spacing::Tight,
    }
}

fn background_for(
    content: &ContentNode,
    dimension: &ResolvedDimension,
    shape: LayoutShape,
) -> Background {
    let colors = &content.visual.colors;
    if content.visual.glow {
        return Background::Glow {
            color: colors.accent.clone(),
            intensity: content.visual.glow_intensity * dimension.visibility,
        };
    }
    match shape {
        LayoutShape::Centered => Background::Gradient {
            from: colors.primary.clone(),
            to: colors.secondary.clone(),
        },
        _ => Background::Solid {
            color: colors.secondary.clone(),
        },
    }
}

/// Layout kind for a growth axis and child count.
pub fn layout_kind_for(
    axis: GrowthAxis,
    child_count: usize,
    rules: &CompositionRules,
) -> LayoutKind {
    match axis {
        GrowthAxis::Radial => LayoutKind::Orbital,
        GrowthAxis::Vertical if child_count > rules.list_grid_threshold => LayoutKind::Grid,
        GrowthAxis::Vertical => LayoutKind::List,
        GrowthAxis::Horizontal => LayoutKind::Grid,
        GrowthAxis::Fixed => LayoutKind::Stack,
    }
}

/// Orbit placement for the item at sorted index `index` of `count`.
///
/// The radius cycles through three rings by `index % 3` so neighbours do not
/// share a ring; the result depends on the index alone.
pub fn orbital_position(index: usize, count: usize, rules: &CompositionRules) -> Position {
    let angle = if count == 0 {
        0.0
    } else {
        index as f64 / count as f64 * TAU
    };
    let radius = rules.orbit_base_radius + (index % 3) as f64 * rules.orbit_radius_step;

    Position {
        x: radius * angle.cos(),
        y: radius * angle.sin(),
        z: Some(0.0),
        angle,
        radius,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn dimension_at(depth: u32, density: Density) -> ResolvedDimension {
        ResolvedDimension {
            current_depth: depth,
            density,
            detail_level: density.detail_level(),
            ..Default::default()
        }
    }

    #[test]
    fn test_shape_by_depth() {
        let node = ContentNode::new("n", "node");
        let prefs = DisplayPreferences::default();
        let rules = CompositionRules::default();

        let hub = select_layout(&node, &dimension_at(0, Density::Standard), &prefs, &rules);
        assert_eq!(hub.shape, LayoutShape::Centered);
        assert_eq!(hub.max_width, Some(1200));
        assert!(matches!(hub.background, Background::Gradient { .. }));

        let side = select_layout(&node, &dimension_at(1, Density::Standard), &prefs, &rules);
        assert_eq!(side.shape, LayoutShape::Sidebar);
        assert_eq!(side.direction, Direction::Row);

        let deep = select_layout(&node, &dimension_at(5, Density::Standard), &prefs, &rules);
        assert_eq!(deep.shape, LayoutShape::Full);
        assert_eq!(deep.max_width, None);
    }

    #[test]
    fn test_split_view_preference() {
        let node = ContentNode::new("n", "node");
        let prefs = DisplayPreferences {
            split_view: true,
            ..Default::default()
        };
        let layout = select_layout(
            &node,
            &dimension_at(1, Density::Standard),
            &prefs,
            &CompositionRules::default(),
        );
        assert_eq!(layout.shape, LayoutShape::Split);
    }

    #[test]
    fn test_compact_mode_forces_tight() {
        let node = ContentNode::new("n", "node");
        let prefs = DisplayPreferences {
            compact_mode: true,
            ..Default::default()
        };
        let layout = select_layout(
            &node,
            &dimension_at(0, Density::Minimal),
            &prefs,
            &CompositionRules::default(),
        );
        assert_eq!(layout.spacing, Spacing::Tight);
    }

    #[test]
    fn test_spacing_loosens_with_coarser_density() {
        let spacings: Vec<_> = Density::ALL.iter().map(|d| spacing_for(*d)).collect();
        assert!(spacings.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_glow_background() {
        let node = ContentNode::new("n", "node")
            .with_visual(presence_rules::VisualDescriptor::default().with_glow(0.5));
        let layout = select_layout(
            &node,
            &dimension_at(2, Density::Standard),
            &DisplayPreferences::default(),
            &CompositionRules::default(),
        );
        assert!(matches!(
            layout.background,
            Background::Glow { intensity, .. } if (intensity - 0.5).abs() < 1e-9
        ));
    }

    #[test]
    fn test_layout_kind_mapping() {
        let rules = CompositionRules::default();
        assert_eq!(layout_kind_for(GrowthAxis::Radial, 3, &rules), LayoutKind::Orbital);
        assert_eq!(layout_kind_for(GrowthAxis::Vertical, 12, &rules), LayoutKind::List);
        assert_eq!(layout_kind_for(GrowthAxis::Vertical, 13, &rules), LayoutKind::Grid);
        assert_eq!(layout_kind_for(GrowthAxis::Horizontal, 1, &rules), LayoutKind::Grid);
        assert_eq!(layout_kind_for(GrowthAxis::Fixed, 40, &rules), LayoutKind::Stack);
    }

    #[test]
    fn test_orbit_radii_cycle() {
        let rules = CompositionRules::default();
        let radii: Vec<f64> = (0..8).map(|i| orbital_position(i, 8, &rules).radius).collect();

        assert_eq!(radii[0], 120.0);
        assert_eq!(radii[1], 160.0);
        assert_eq!(radii[2], 200.0);
        assert_eq!(radii[3], 120.0);

        let distinct: BTreeSet<u64> = radii.iter().map(|r| r.to_bits()).collect();
        assert_eq!(distinct.len(), 3);
    }

    #[test]
    fn test_orbit_angles_spread_evenly() {
        let rules = CompositionRules::default();
        let quarter = orbital_position(2, 8, &rules);
        assert!((quarter.angle - TAU / 4.0).abs() < 1e-12);
        assert!(quarter.x.abs() < 1e-9);
        assert!((quarter.y - 200.0).abs() < 1e-9);
    }
}
