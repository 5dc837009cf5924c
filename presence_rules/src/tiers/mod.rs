//! Ordered tiers shared by the resolver and the composer.
//!
//! Every tier is a closed enum whose declaration order is its rank, so the
//! derived `Ord` matches the documented `a < b < c` ordering.

use serde::{Deserialize, Serialize};

/// Access level of the viewing user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Nothing may be shown.
    None,
    /// Visible, never interactable.
    #[default]
    View,
    Read,
    Write,
    Admin,
}

impl Permission {
    /// All permissions, lowest first.
    pub const ALL: [Permission; 5] = [
        Permission::None,
        Permission::View,
        Permission::Read,
        Permission::Write,
        Permission::Admin,
    ];

    /// Numeric rank (higher = more authority).
    pub fn rank(self) -> u8 {
        self as u8
    }
}

/// How busy a node currently is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum ActivityState {
    #[default]
    Dormant,
    Idle,
    Active,
    Busy,
    Critical,
}

impl ActivityState {
    pub const ALL: [ActivityState; 5] = [
        ActivityState::Dormant,
        ActivityState::Idle,
        ActivityState::Active,
        ActivityState::Busy,
        ActivityState::Critical,
    ];

    pub fn rank(self) -> u8 {
        self as u8
    }

    /// One step up, saturating at `Critical`.
    pub fn promoted(self) -> Self {
        match self {
            ActivityState::Dormant => ActivityState::Idle,
            ActivityState::Idle => ActivityState::Active,
            ActivityState::Active => ActivityState::Busy,
            ActivityState::Busy | ActivityState::Critical => ActivityState::Critical,
        }
    }
}

/// Bucketed information volume of a node.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum ContentLevel {
    #[default]
    Minimal,
    Light,
    Moderate,
    Heavy,
    Extreme,
}

impl ContentLevel {
    pub const ALL: [ContentLevel; 5] = [
        ContentLevel::Minimal,
        ContentLevel::Light,
        ContentLevel::Moderate,
        ContentLevel::Heavy,
        ContentLevel::Extreme,
    ];

    pub fn rank(self) -> u8 {
        self as u8
    }

    /// The density a node of this volume starts from before clamping.
    pub fn natural_density(self) -> Density {
        match self {
            ContentLevel::Minimal => Density::Minimal,
            ContentLevel::Light => Density::Compact,
            ContentLevel::Moderate => Density::Standard,
            ContentLevel::Heavy => Density::Expanded,
            ContentLevel::Extreme => Density::Full,
        }
    }
}

/// How much detail and spacing a node receives.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Density {
    Minimal,
    Compact,
    #[default]
    Standard,
    Expanded,
    Full,
}

impl Density {
    pub const ALL: [Density; 5] = [
        Density::Minimal,
        Density::Compact,
        Density::Standard,
        Density::Expanded,
        Density::Full,
    ];

    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Detail level from 1 (minimal) to 5 (full), used for threshold checks.
    pub fn detail_level(self) -> u8 {
        self.rank() + 1
    }
}

/// Explicit complexity requested by the caller. Acts as a density floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityTier {
    Simple,
    Moderate,
    Complex,
    Expert,
}

impl ComplexityTier {
    pub fn rank(self) -> u8 {
        self as u8
    }
}

/// Kind of motion a renderer should apply.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum MotionType {
    #[default]
    None,
    Subtle,
    Moderate,
    Urgent,
}

impl MotionType {
    /// Motion escalates with activity.
    pub fn for_activity(state: ActivityState) -> Self {
        match state {
            ActivityState::Dormant | ActivityState::Idle => MotionType::None,
            ActivityState::Active => MotionType::Subtle,
            ActivityState::Busy => MotionType::Moderate,
            ActivityState::Critical => MotionType::Urgent,
        }
    }

    /// Base intensity before recency scaling.
    pub fn base_intensity(self) -> f64 {
        match self {
            MotionType::None => 0.0,
            MotionType::Subtle => 0.3,
            MotionType::Moderate => 0.6,
            MotionType::Urgent => 1.0,
        }
    }
}
