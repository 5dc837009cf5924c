//! Optional parts of a content node: metrics, actions, and state flags.

use serde::{Deserialize, Serialize};

use crate::tiers::{ActivityState, Permission};

/// Counts shown in the metrics section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NodeMetrics {
    pub items: u32,
    pub agents: u32,
    pub active: u32,
    pub pending: u32,
}

/// Rough category of an action, for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    #[default]
    Primary,
    Secondary,
    Destructive,
    Navigate,
}

/// Something the user can do on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAction {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub kind: ActionKind,
    /// `None` = anyone who can interact with the node.
    #[serde(default)]
    pub required_permission: Option<Permission>,
}

impl NodeAction {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            kind: ActionKind::Primary,
            required_permission: None,
        }
    }

    pub fn with_kind(mut self, kind: ActionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn requiring(mut self, permission: Permission) -> Self {
        self.required_permission = Some(permission);
        self
    }

    /// Check whether a user with `permission` may trigger this action.
    pub fn permits(&self, permission: Permission) -> bool {
        self.required_permission
            .map_or(true, |required| permission >= required)
    }
}

/// Runtime flags of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NodeState {
    pub is_active: bool,
    pub is_locked: bool,
    pub is_focused: bool,
    pub is_expanded: bool,
    pub activity: ActivityState,
}

impl NodeState {
    pub fn active() -> Self {
        Self {
            is_active: true,
            activity: ActivityState::Active,
            ..Default::default()
        }
    }

    pub fn locked() -> Self {
        Self {
            is_locked: true,
            ..Default::default()
        }
    }

    pub fn focused(mut self) -> Self {
        self.is_focused = true;
        self
    }
}
