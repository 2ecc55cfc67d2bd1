use serde::{Deserialize, Serialize};

/// One game's sales record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub name: String,
    pub category: String,
    pub value: f64,
}

/// A platform grouping a list of games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub name: String,
    pub children: Vec<Game>,
}

/// Root of the fetched sales document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub children: Vec<Platform>,
}

impl Dataset {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl Default for NodeId {
    fn default() -> Self {
        NodeId(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Root,
    Category,
    Leaf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub name: String,
    pub kind: NodeKind,
    /// Platform label carried by leaves.
    pub category: Option<String>,
    /// Stored value for leaves, zero for internal nodes.
    pub own_value: f64,
    /// Sum of descendant leaf values.
    pub value: f64,
    pub depth: u32,
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Hierarchy {
    pub root: NodeId,
    pub nodes: Vec<TreeNode>,
}

impl Hierarchy {
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0 as usize]
    }
}
