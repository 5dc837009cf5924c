//! The generic content tree supplied by external collaborators.
//!
//! Nodes own their children outright; a child is addressed by its stable
//! string id, and paths are sequences of those ids starting below the node
//! the lookup is called on. The engine only ever borrows these trees.

mod components;
mod visual;

pub use components::*;
pub use visual::*;

use serde::{Deserialize, Serialize};

/// A domain-agnostic unit of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,

    // Display hints
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub visual: VisualDescriptor,
    #[serde(default)]
    pub children: Vec<ContentNode>,
    #[serde(default)]
    pub metrics: Option<NodeMetrics>,
    #[serde(default)]
    pub actions: Vec<NodeAction>,
    #[serde(default)]
    pub state: NodeState,

    /// Caller-assigned ordering key. Lower sorts first.
    #[serde(default)]
    pub priority: i32,
}

impl ContentNode {
    /// Create a node with the given id and type. The label defaults to the id.
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            node_type: node_type.into(),
            icon: None,
            description: None,
            visual: VisualDescriptor::default(),
            children: Vec::new(),
            metrics: None,
            actions: Vec::new(),
            state: NodeState::default(),
            priority: 0,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_visual(mut self, visual: VisualDescriptor) -> Self {
        self.visual = visual;
        self
    }

    pub fn with_growth_axis(mut self, axis: GrowthAxis) -> Self {
        self.visual.growth_axis = axis;
        self
    }

    pub fn with_child(mut self, child: ContentNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = ContentNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_metrics(mut self, metrics: NodeMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_action(mut self, action: NodeAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_state(mut self, state: NodeState) -> Self {
        self.state = state;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Get a direct child by id.
    pub fn child(&self, id: &str) -> Option<&ContentNode> {
        self.children.iter().find(|c| c.id == id)
    }

    /// Follow a path of child ids down from this node.
    ///
    /// An empty path resolves to `self`.
    pub fn find_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&ContentNode> {
        path.iter()
            .try_fold(self, |node, segment| node.child(segment.as_ref()))
    }

    /// Find the path of ids leading from this node to the descendant `id`.
    pub fn path_to(&self, id: &str) -> Option<Vec<String>> {
        if self.id == id {
            return Some(Vec::new());
        }
        self.children.iter().find_map(|child| {
            child.path_to(id).map(|mut rest| {
                rest.insert(0, child.id.clone());
                rest
            })
        })
    }

    /// Nesting depth of the descendant `id` relative to this node.
    pub fn depth_of(&self, id: &str) -> Option<usize> {
        self.path_to(id).map(|path| path.len())
    }

    /// Depth-first, pre-order iterator over every node below this one.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }
}

/// Iterator returned by [`ContentNode::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a ContentNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a ContentNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> ContentNode {
        ContentNode::new("hub", "workspace")
            .with_child(
                ContentNode::new("projects", "collection")
                    .with_child(ContentNode::new("alpha", "project"))
                    .with_child(ContentNode::new("beta", "project")),
            )
            .with_child(ContentNode::new("inbox", "collection"))
    }

    #[test]
    fn test_find_path() {
        let tree = sample_tree();

        let beta = tree.find_path(&["projects", "beta"]);
        assert_eq!(beta.map(|n| n.id.as_str()), Some("beta"));

        let empty: [&str; 0] = [];
        assert_eq!(tree.find_path(&empty).map(|n| n.id.as_str()), Some("hub"));

        assert!(tree.find_path(&["projects", "gamma"]).is_none());
    }

    #[test]
    fn test_path_to_and_depth() {
        let tree = sample_tree();

        assert_eq!(
            tree.path_to("alpha"),
            Some(vec!["projects".to_string(), "alpha".to_string()])
        );
        assert_eq!(tree.depth_of("inbox"), Some(1));
        assert_eq!(tree.depth_of("hub"), Some(0));
        assert_eq!(tree.depth_of("missing"), None);
    }

    #[test]
    fn test_descendants_preorder() {
        let tree = sample_tree();
        let ids: Vec<_> = tree.descendants().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["projects", "alpha", "beta", "inbox"]);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "id": "t1",
            "type": "thread",
            "visual": { "growth_axis": "radial" },
            "state": { "is_locked": true }
        }"#;
        let node: ContentNode = serde_json::from_str(json).unwrap();

        assert_eq!(node.node_type, "thread");
        assert_eq!(node.visual.growth_axis, GrowthAxis::Radial);
        assert!(node.state.is_locked);
        assert!(node.children.is_empty());
        assert_eq!(node.priority, 0);
    }
}
