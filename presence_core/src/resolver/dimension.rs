//! The resolved presentation bundle for one node.

use presence_rules::{ActivityState, ContentLevel, Density, MotionType};
use serde::{Deserialize, Serialize};

/// Motion a renderer should apply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Motion {
    #[serde(rename = "type")]
    pub kind: MotionType,
    /// Always `>= 0`.
    pub intensity: f64,
}

impl Motion {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_still(&self) -> bool {
        self.kind == MotionType::None
    }
}

/// Presentation parameters derived for one node.
///
/// `visible == false` means the node must not be rendered at all, and always
/// implies `interactable == false`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDimension {
    /// Relative size multiplier, always positive.
    pub scale: f64,
    /// Opacity-equivalent in `[0, 1]`.
    pub visibility: f64,
    pub visible: bool,
    pub interactable: bool,
    pub density: Density,
    /// 1 (minimal) to 5 (full).
    pub detail_level: u8,
    pub motion: Motion,
    pub activity_state: ActivityState,
    pub content_level: ContentLevel,
    pub current_depth: u32,
    pub depth_allowed: u32,
}

impl ResolvedDimension {
    /// A dimension for a node nobody may see.
    pub fn hidden(current_depth: u32, depth_allowed: u32) -> Self {
        Self {
            scale: 1.0,
            visibility: 0.0,
            visible: false,
            interactable: false,
            density: Density::Minimal,
            detail_level: Density::Minimal.detail_level(),
            motion: Motion::none(),
            activity_state: ActivityState::Dormant,
            content_level: ContentLevel::Minimal,
            current_depth,
            depth_allowed,
        }
    }

    /// Whether navigation may go one level deeper from here.
    pub fn can_descend(&self) -> bool {
        self.current_depth < self.depth_allowed
    }
}

impl Default for ResolvedDimension {
    fn default() -> Self {
        Self {
            scale: 1.0,
            visibility: 1.0,
            visible: true,
            interactable: false,
            density: Density::Standard,
            detail_level: Density::Standard.detail_level(),
            motion: Motion::none(),
            activity_state: ActivityState::Idle,
            content_level: ContentLevel::Moderate,
            current_depth: 0,
            depth_allowed: 4,
        }
    }
}
