//! Visual descriptors. Only ever used for layout geometry.

use serde::{Deserialize, Serialize};

/// Base outline of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    #[default]
    Circle,
    Square,
    Hexagon,
    Diamond,
    #[serde(other)]
    Other,
}

/// Direction in which a node's children grow. Selects the primary layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GrowthAxis {
    Radial,
    Vertical,
    Horizontal,
    /// Any unrecognised axis. Children stack.
    #[default]
    #[serde(other)]
    Fixed,
}

/// Three-color palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: "#6366f1".to_string(),
            secondary: "#1e1b4b".to_string(),
            accent: "#a5b4fc".to_string(),
        }
    }
}

/// Geometry hints attached to a content node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VisualDescriptor {
    pub shape: Shape,
    pub colors: Palette,
    pub growth_axis: GrowthAxis,
    pub glow: bool,
    /// 0.0 - 1.0.
    pub glow_intensity: f64,
}

impl VisualDescriptor {
    pub fn with_growth_axis(mut self, axis: GrowthAxis) -> Self {
        self.growth_axis = axis;
        self
    }

    pub fn with_glow(mut self, intensity: f64) -> Self {
        self.glow = true;
        self.glow_intensity = intensity.clamp(0.0, 1.0);
        self
    }
}
