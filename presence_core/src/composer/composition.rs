//! Output types of the page composer.

use presence_rules::ContentNode;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeSet;

use crate::composer::SectionId;
use crate::resolver::ResolvedDimension;

/// Overall page shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutShape {
    /// Full-bleed hub, used at the root.
    Centered,
    Split,
    Full,
    Sidebar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Row,
    Column,
}

/// Spacing tier, tightest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Spacing {
    Tight,
    Snug,
    Normal,
    Relaxed,
    Loose,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Background {
    Solid { color: String },
    Gradient { from: String, to: String },
    Glow { color: String, intensity: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageLayout {
    pub shape: LayoutShape,
    pub direction: Direction,
    pub spacing: Spacing,
    pub max_width: Option<u32>,
    pub background: Background,
}

/// How a section arranges its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    Grid,
    List,
    Orbital,
    Stack,
}

/// Coarse size bucket for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeTier {
    Small,
    Medium,
    Large,
    Hero,
}

/// Placement for non-linear layouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
    /// Radians.
    pub angle: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutHints {
    pub size: SizeTier,
    pub show_label: bool,
    pub show_description: bool,
    pub show_metrics: bool,
    pub show_actions: bool,
    pub position: Option<Position>,
}

/// One placed item: its source node, its own dimension, and layout hints.
///
/// Children borrow the caller's node; metric and action pseudo-items are
/// synthesized and owned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionItem<'a> {
    pub node: Cow<'a, ContentNode>,
    pub dimension: ResolvedDimension,
    pub hints: LayoutHints,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section<'a> {
    pub id: SectionId,
    pub visible: bool,
    /// Lower renders first.
    pub priority: u8,
    pub layout: LayoutKind,
    pub columns: u32,
    pub items: Vec<CompositionItem<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    pub path: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Enter,
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationTarget {
    pub id: String,
    pub label: String,
    pub path: Vec<String>,
    pub kind: TargetKind,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Navigation {
    pub breadcrumb: Vec<Breadcrumb>,
    /// Children that can be entered from here.
    pub targets: Vec<NavigationTarget>,
    pub back: Option<NavigationTarget>,
    pub quick_actions: Vec<NavigationTarget>,
}

/// Animation phase. The composer always emits `Idle`; transitions belong to
/// the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnimationPhase {
    Enter,
    #[default]
    Idle,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    Interactive,
    ReadOnly,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositionState {
    pub loading: bool,
    pub error: Option<String>,
    pub animation_phase: AnimationPhase,
    pub interaction_mode: InteractionMode,
}

/// A fully specified page, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageComposition<'a> {
    pub layout: PageLayout,
    pub sections: Vec<Section<'a>>,
    pub navigation: Navigation,
    pub state: CompositionState,
}

impl<'a> PageComposition<'a> {
    pub fn section(&self, id: SectionId) -> Option<&Section<'a>> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Ids of every visible section.
    pub fn visible_sections(&self) -> BTreeSet<SectionId> {
        self.sections
            .iter()
            .filter(|s| s.visible)
            .map(|s| s.id)
            .collect()
    }
}
