//! Page Composer - turns a resolved dimension and a content tree into a page.
//!
//! Composition runs in four passes over one node and its direct children:
//! 1. **Layout**: page shape from depth, spacing from density and preferences
//! 2. **Sections**: primary, metrics, actions, history, always in that order,
//!    each flagged visible per the density section table
//! 3. **Items**: each child gets its own dimension derived from the page's,
//!    plus size and detail hints and an orbit position when radial
//! 4. **Navigation**: breadcrumb, back target, enter targets, quick links
//!
//! Composition never fails and never touches anything outside its arguments.

mod composition;
mod items;
mod layout;
mod navigation;
mod rules;

pub use composition::*;
pub use items::*;
pub use layout::*;
pub use navigation::*;
pub use rules::*;

use presence_rules::{ContentNode, GrowthAxis, NodeMetrics, NodeState, Permission};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::trace;

use crate::resolver::{Motion, ResolvedDimension};

/// Who is looking at the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UserContext {
    pub id: Option<String>,
    pub permission: Permission,
}

impl UserContext {
    pub fn new(permission: Permission) -> Self {
        Self {
            id: None,
            permission,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Where the page sits in the content tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NavigationContext {
    /// Ids from the root down to and including the current node.
    pub path: Vec<String>,
    pub can_go_back: bool,
}

impl NavigationContext {
    /// Navigation for a path; going back is possible below the root.
    pub fn at(path: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let path: Vec<String> = path.into_iter().map(Into::into).collect();
        Self {
            can_go_back: path.len() > 1,
            path,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DisplayPreferences {
    /// Force the tightest spacing regardless of density.
    pub compact_mode: bool,
    /// Zero all item motion.
    pub reduce_motion: bool,
    /// Use the split shape instead of the sidebar at depth 1.
    pub split_view: bool,
}

/// Everything one composition reads.
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    pub user: UserContext,
    pub navigation: NavigationContext,
    pub dimension: ResolvedDimension,
    pub content: &'a ContentNode,
    pub preferences: DisplayPreferences,
}

impl<'a> PageContext<'a> {
    pub fn new(content: &'a ContentNode, dimension: ResolvedDimension) -> Self {
        Self {
            user: UserContext::default(),
            navigation: NavigationContext::at([content.id.clone()]),
            dimension,
            content,
            preferences: DisplayPreferences::default(),
        }
    }

    pub fn with_user(mut self, user: UserContext) -> Self {
        self.user = user;
        self
    }

    pub fn with_navigation(mut self, navigation: NavigationContext) -> Self {
        self.navigation = navigation;
        self
    }

    pub fn with_preferences(mut self, preferences: DisplayPreferences) -> Self {
        self.preferences = preferences;
        self
    }
}

/// Compose a page, falling back to default composition rules.
pub fn compose_page<'a>(
    context: &PageContext<'a>,
    rules: Option<&CompositionRules>,
) -> PageComposition<'a> {
    match rules {
        Some(rules) => PageComposer::new(rules).compose(context),
        None => PageComposer::new(&CompositionRules::default()).compose(context),
    }
}

/// Composer bound to one set of composition rules.
#[derive(Debug, Clone, Copy)]
pub struct PageComposer<'r> {
    rules: &'r CompositionRules,
}

impl<'r> PageComposer<'r> {
    pub fn new(rules: &'r CompositionRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &CompositionRules {
        self.rules
    }

    pub fn compose<'a>(&self, context: &PageContext<'a>) -> PageComposition<'a> {
        let content = context.content;
        let dimension = &context.dimension;

        let children = sorted_children(content);
        let layout = select_layout(content, dimension, &context.preferences, self.rules);
        let sections = vec![
            self.primary_section(context, &children),
            self.metrics_section(context),
            self.actions_section(context),
            self.history_section(context),
        ];
        let navigation = compose_navigation(
            content,
            &children,
            &context.navigation,
            dimension,
            self.rules.quick_link_limit,
        );

        let interaction_mode = if dimension.interactable {
            InteractionMode::Interactive
        } else if dimension.visible {
            InteractionMode::ReadOnly
        } else {
            InteractionMode::Hidden
        };

        trace!(
            node = %content.id,
            shape = ?layout.shape,
            children = children.len(),
            mode = ?interaction_mode,
            "Composed page"
        );

        PageComposition {
            layout,
            sections,
            navigation,
            state: CompositionState {
                loading: false,
                error: None,
                animation_phase: AnimationPhase::Idle,
                interaction_mode,
            },
        }
    }

    fn section_visible(&self, context: &PageContext<'_>, id: SectionId) -> bool {
        context.dimension.visible
            && self
                .rules
                .sections
                .get(context.dimension.density)
                .contains(&id)
    }

    fn item_dimension(&self, context: &PageContext<'_>, state: &NodeState) -> ResolvedDimension {
        let mut dimension = adjust_for_state(&context.dimension, state, &self.rules.item_modifiers);
        if context.preferences.reduce_motion {
            dimension.motion = Motion::none();
        }
        dimension
    }

    fn primary_section<'a>(
        &self,
        context: &PageContext<'a>,
        children: &[&'a ContentNode],
    ) -> Section<'a> {
        let count = children.len();
        let axis = context.content.visual.growth_axis;
        let layout = layout_kind_for(axis, count, self.rules);
        let columns = match layout {
            LayoutKind::Grid => self.rules.columns_for(count),
            LayoutKind::List | LayoutKind::Orbital | LayoutKind::Stack => 1,
        };

        let items = children
            .iter()
            .enumerate()
            .map(|(index, child)| {
                let dimension = self.item_dimension(context, &child.state);
                let position = (axis == GrowthAxis::Radial)
                    .then(|| orbital_position(index, count, self.rules));
                CompositionItem {
                    hints: hints_for(
                        child,
                        &dimension,
                        self.rules.actions_detail_threshold,
                        position,
                    ),
                    node: Cow::Borrowed(*child),
                    dimension,
                }
            })
            .collect();

        Section {
            id: SectionId::Primary,
            visible: self.section_visible(context, SectionId::Primary),
            priority: SectionId::Primary.priority(),
            layout,
            columns,
            items,
        }
    }

    fn metrics_section<'a>(&self, context: &PageContext<'a>) -> Section<'a> {
        let content = context.content;
        let items = content
            .metrics
            .map(|metrics| {
                metric_nodes(&content.id, &metrics)
                    .into_iter()
                    .map(|node| {
                        let mut dimension = self.item_dimension(context, &NodeState::default());
                        dimension.interactable = false;
                        CompositionItem {
                            hints: hints_for(
                                &node,
                                &dimension,
                                self.rules.actions_detail_threshold,
                                None,
                            ),
                            node: Cow::Owned(node),
                            dimension,
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Section {
            id: SectionId::Metrics,
            visible: content.metrics.is_some()
                && self.section_visible(context, SectionId::Metrics),
            priority: SectionId::Metrics.priority(),
            layout: LayoutKind::Grid,
            columns: self.rules.metric_columns,
            items,
        }
    }

    fn actions_section<'a>(&self, context: &PageContext<'a>) -> Section<'a> {
        let content = context.content;
        let permission = context.user.permission;

        let items = content
            .actions
            .iter()
            .map(|action| {
                let mut dimension = self.item_dimension(context, &NodeState::default());
                dimension.interactable = dimension.interactable && action.permits(permission);

                let mut node =
                    ContentNode::new(action.id.clone(), "action").with_label(action.label.clone());
                node.icon = action.icon.clone();
                node.actions.push(action.clone());

                CompositionItem {
                    hints: hints_for(&node, &dimension, self.rules.actions_detail_threshold, None),
                    node: Cow::Owned(node),
                    dimension,
                }
            })
            .collect();

        Section {
            id: SectionId::Actions,
            visible: !content.actions.is_empty()
                && context.dimension.detail_level >= self.rules.actions_detail_threshold
                && self.section_visible(context, SectionId::Actions),
            priority: SectionId::Actions.priority(),
            layout: LayoutKind::List,
            columns: 1,
            items,
        }
    }

    fn history_section<'a>(&self, context: &PageContext<'a>) -> Section<'a> {
        Section {
            id: SectionId::History,
            visible: self.section_visible(context, SectionId::History),
            priority: SectionId::History.priority(),
            layout: LayoutKind::List,
            columns: 1,
            items: Vec::new(),
        }
    }
}

/// Children by ascending priority; ties keep their original order.
pub fn sorted_children(content: &ContentNode) -> Vec<&ContentNode> {
    let mut children: Vec<&ContentNode> = content.children.iter().collect();
    children.sort_by_key(|child| child.priority);
    children
}

/// The four fixed metric pseudo-nodes, in display order.
fn metric_nodes(owner: &str, metrics: &NodeMetrics) -> [ContentNode; 4] {
    let metric = |key: &str, label: &str, value: u32| {
        ContentNode::new(format!("{owner}-metric-{key}"), "metric")
            .with_label(label)
            .with_description(value.to_string())
    };
    [
        metric("items", "Items", metrics.items),
        metric("agents", "Agents", metrics.agents),
        metric("active", "Active", metrics.active),
        metric("pending", "Pending", metrics.pending),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use presence_rules::{Density, NodeAction};

    fn dimension(density: Density, interactable: bool) -> ResolvedDimension {
        ResolvedDimension {
            density,
            detail_level: density.detail_level(),
            interactable,
            ..Default::default()
        }
    }

    fn node_with_children(axis: GrowthAxis, count: usize) -> ContentNode {
        ContentNode::new("hub", "workspace")
            .with_growth_axis(axis)
            .with_children((0..count).map(|i| ContentNode::new(format!("child-{i}"), "item")))
    }

    #[test]
    fn test_horizontal_fourteen_children_grid_five_columns() {
        let node = node_with_children(GrowthAxis::Horizontal, 14);
        let ctx = PageContext::new(&node, dimension(Density::Standard, true));
        let page = compose_page(&ctx, None);

        let primary = page.section(SectionId::Primary).unwrap();
        assert_eq!(primary.layout, LayoutKind::Grid);
        assert_eq!(primary.columns, 5);
        assert_eq!(primary.items.len(), 14);
    }

    #[test]
    fn test_radial_eight_children_three_rings() {
        let node = node_with_children(GrowthAxis::Radial, 8);
        let ctx = PageContext::new(&node, dimension(Density::Standard, true));
        let page = compose_page(&ctx, None);

        let primary = page.section(SectionId::Primary).unwrap();
        assert_eq!(primary.layout, LayoutKind::Orbital);
        let radii: Vec<f64> = primary
            .items
            .iter()
            .map(|item| item.hints.position.unwrap().radius)
            .collect();
        assert_eq!(radii, vec![120.0, 160.0, 200.0, 120.0, 160.0, 200.0, 120.0, 160.0]);
    }

    #[test]
    fn test_sections_always_emitted_in_order() {
        let node = ContentNode::new("leaf", "item");
        let ctx = PageContext::new(&node, dimension(Density::Minimal, false));
        let page = compose_page(&ctx, None);

        let ids: Vec<SectionId> = page.sections.iter().map(|s| s.id).collect();
        assert_eq!(ids, SectionId::ALL.to_vec());
        assert_eq!(
            page.visible_sections(),
            std::collections::BTreeSet::from([SectionId::Primary])
        );
    }

    #[test]
    fn test_children_sorted_stably_by_priority() {
        let node = ContentNode::new("hub", "workspace").with_children([
            ContentNode::new("c", "item").with_priority(2),
            ContentNode::new("a", "item").with_priority(1),
            ContentNode::new("b", "item").with_priority(1),
            ContentNode::new("z", "item").with_priority(-1),
        ]);
        let ctx = PageContext::new(&node, dimension(Density::Standard, true));
        let page = compose_page(&ctx, None);

        let order: Vec<&str> = page.sections[0]
            .items
            .iter()
            .map(|item| item.node.id.as_str())
            .collect();
        assert_eq!(order, vec!["z", "a", "b", "c"]);
        assert!(matches!(page.sections[0].items[0].node, Cow::Borrowed(_)));
    }

    #[test]
    fn test_metrics_pseudo_items() {
        let node = ContentNode::new("pool", "collection").with_metrics(NodeMetrics {
            items: 20,
            agents: 3,
            active: 2,
            pending: 5,
        });
        let ctx = PageContext::new(&node, dimension(Density::Compact, true));
        let page = compose_page(&ctx, None);

        let metrics = page.section(SectionId::Metrics).unwrap();
        assert!(metrics.visible);
        assert_eq!(metrics.columns, 4);
        let labels: Vec<&str> = metrics.items.iter().map(|i| i.node.label.as_str()).collect();
        assert_eq!(labels, vec!["Items", "Agents", "Active", "Pending"]);
        assert_eq!(metrics.items[0].node.description.as_deref(), Some("20"));
        assert!(metrics.items.iter().all(|i| !i.dimension.interactable));
    }

    #[test]
    fn test_metrics_hidden_without_metrics() {
        let node = ContentNode::new("pool", "collection");
        let ctx = PageContext::new(&node, dimension(Density::Full, true));
        let page = compose_page(&ctx, None);

        let metrics = page.section(SectionId::Metrics).unwrap();
        assert!(!metrics.visible);
        assert!(metrics.items.is_empty());
    }

    #[test]
    fn test_actions_respect_detail_and_permission() {
        let node = ContentNode::new("job", "item")
            .with_action(NodeAction::new("run", "Run"))
            .with_action(NodeAction::new("delete", "Delete").requiring(Permission::Admin));

        let ctx = PageContext::new(&node, dimension(Density::Standard, true))
            .with_user(UserContext::new(Permission::Write));
        let page = compose_page(&ctx, None);
        let actions = page.section(SectionId::Actions).unwrap();
        assert!(actions.visible);
        assert_eq!(actions.items[0].node.id, "run");
        assert!(actions.items[0].dimension.interactable);
        assert!(!actions.items[1].dimension.interactable);

        let sparse = PageContext::new(&node, dimension(Density::Compact, true));
        let page = compose_page(&sparse, None);
        assert!(!page.section(SectionId::Actions).unwrap().visible);
    }

    #[test]
    fn test_locked_child_not_interactable() {
        let node = ContentNode::new("hub", "workspace")
            .with_child(ContentNode::new("vault", "item").with_state(NodeState::locked()));
        let ctx = PageContext::new(&node, dimension(Density::Standard, true));
        let page = compose_page(&ctx, None);

        assert!(!page.sections[0].items[0].dimension.interactable);
    }

    #[test]
    fn test_reduce_motion() {
        let node = node_with_children(GrowthAxis::Vertical, 2);
        let mut dim = dimension(Density::Standard, true);
        dim.motion = Motion {
            kind: presence_rules::MotionType::Moderate,
            intensity: 0.8,
        };
        let ctx = PageContext::new(&node, dim).with_preferences(DisplayPreferences {
            reduce_motion: true,
            ..Default::default()
        });
        let page = compose_page(&ctx, None);

        assert!(page.sections[0].items.iter().all(|i| i.dimension.motion.is_still()));
    }

    #[test]
    fn test_interaction_mode() {
        let node = ContentNode::new("n", "item");

        let page = compose_page(&PageContext::new(&node, dimension(Density::Standard, true)), None);
        assert_eq!(page.state.interaction_mode, InteractionMode::Interactive);
        assert_eq!(page.state.animation_phase, AnimationPhase::Idle);

        let page = compose_page(
            &PageContext::new(&node, dimension(Density::Standard, false)),
            None,
        );
        assert_eq!(page.state.interaction_mode, InteractionMode::ReadOnly);

        let page = compose_page(&PageContext::new(&node, ResolvedDimension::hidden(0, 4)), None);
        assert_eq!(page.state.interaction_mode, InteractionMode::Hidden);
        assert!(page.visible_sections().is_empty());
    }

    #[test]
    fn test_custom_rules() {
        let node = node_with_children(GrowthAxis::Vertical, 3);
        let rules = CompositionRules {
            list_grid_threshold: 2,
            quick_link_limit: 1,
            ..Default::default()
        };
        let ctx = PageContext::new(&node, dimension(Density::Standard, true));
        let page = PageComposer::new(&rules).compose(&ctx);

        assert_eq!(page.sections[0].layout, LayoutKind::Grid);
        assert_eq!(page.sections[0].columns, 2);
        assert_eq!(page.navigation.quick_actions.len(), 1);
    }

    #[test]
    fn test_compose_is_repeatable() {
        let node = node_with_children(GrowthAxis::Radial, 5);
        let ctx = PageContext::new(&node, dimension(Density::Expanded, true));
        assert_eq!(compose_page(&ctx, None), compose_page(&ctx, None));
    }
}
