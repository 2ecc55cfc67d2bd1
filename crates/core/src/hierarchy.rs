use crate::model::{Dataset, Hierarchy, NodeId, NodeKind, TreeNode};

impl Hierarchy {
    /// Builds the value-summed tree for a dataset. Children of every node are
    /// ordered by aggregate value, largest first; equal values keep dataset order.
    pub fn from_dataset(data: &Dataset) -> Self {
        let mut nodes: Vec<TreeNode> = Vec::with_capacity(
            1 + data.children.len() + data.children.iter().map(|p| p.children.len()).sum::<usize>(),
        );

        let root = push(&mut nodes, None, &data.name, NodeKind::Root, None, 0.0, 0);
        for platform in &data.children {
            let pid = push(&mut nodes, Some(root), &platform.name, NodeKind::Category, None, 0.0, 1);
            for game in &platform.children {
                push(
                    &mut nodes,
                    Some(pid),
                    &game.name,
                    NodeKind::Leaf,
                    Some(game.category.clone()),
                    game.value,
                    2,
                );
            }
        }

        sum(&mut nodes, root);
        sort_children(&mut nodes, root);

        tracing::debug!(nodes = nodes.len(), total = nodes[0].value, "hierarchy built");
        Hierarchy { root, nodes }
    }

    /// Leaves in pre-order of the sorted tree.
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if node.children.is_empty() {
                if node.kind == NodeKind::Leaf {
                    out.push(id);
                }
            } else {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Distinct top-level names in dataset order (ignores the value sort).
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for node in &self.nodes {
            if node.parent == Some(self.root) && !seen.iter().any(|c| c == &node.name) {
                seen.push(node.name.clone());
            }
        }
        seen
    }

    pub fn total(&self) -> f64 {
        self.node(self.root).value
    }
}

fn push(
    nodes: &mut Vec<TreeNode>,
    parent: Option<NodeId>,
    name: &str,
    kind: NodeKind,
    category: Option<String>,
    own_value: f64,
    depth: u32,
) -> NodeId {
    let id = NodeId(nodes.len() as u64);
    nodes.push(TreeNode {
        id,
        parent,
        name: name.to_string(),
        kind,
        category,
        own_value,
        value: 0.0,
        depth,
        children: Vec::new(),
    });
    if let Some(pid) = parent {
        nodes[pid.0 as usize].children.push(id);
    }
    id
}

fn sum(nodes: &mut [TreeNode], id: NodeId) -> f64 {
    let children = nodes[id.0 as usize].children.clone();
    let mut total = nodes[id.0 as usize].own_value;
    for child in children {
        total += sum(nodes, child);
    }
    nodes[id.0 as usize].value = total;
    total
}

fn sort_children(nodes: &mut [TreeNode], id: NodeId) {
    let mut children = std::mem::take(&mut nodes[id.0 as usize].children);
    // sort_by is stable, so ties keep dataset order
    children.sort_by(|a, b| {
        let va = nodes[a.0 as usize].value;
        let vb = nodes[b.0 as usize].value;
        vb.partial_cmp(&va).unwrap_or(std::cmp::Ordering::Equal)
    });
    for &child in &children {
        sort_children(nodes, child);
    }
    nodes[id.0 as usize].children = children;
}
