//! Shape adjacency and column leveling.
//!
//! The graph is keyed by [`ShapeId`] in row order. Iteration order matters:
//! it decides which shape is the traversal root and the top-to-bottom order
//! of shapes within a column.

use std::collections::{HashSet, VecDeque};

use indexmap::IndexMap;
use log::{debug, trace};

use flowsheet_core::{
    identifier::ShapeId,
    semantic::{Flow, Shape},
};

/// A shape's neighbours and its assigned column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphNode {
    prev: Vec<ShapeId>,
    next: Vec<ShapeId>,
    level: Option<usize>,
}

impl GraphNode {
    /// Shapes with a flow into this one, in flow order.
    pub fn prev(&self) -> &[ShapeId] {
        &self.prev
    }

    /// Shapes this one has a flow into, in flow order.
    pub fn next(&self) -> &[ShapeId] {
        &self.next
    }

    /// The column of this shape, or `None` before leveling.
    pub fn level(&self) -> Option<usize> {
        self.level
    }
}

/// Directed graph over the shapes of one sheet.
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    nodes: IndexMap<ShapeId, GraphNode>,
}

impl FlowGraph {
    /// Builds the graph from shapes and flows.
    ///
    /// Every shape becomes a node. A flow becomes an edge only when both of
    /// its endpoints are shapes; other flows are skipped.
    pub fn new<'a>(shapes: &[Shape], flows: impl IntoIterator<Item = &'a Flow>) -> Self {
        let mut nodes: IndexMap<ShapeId, GraphNode> = shapes
            .iter()
            .map(|shape| (shape.id().clone(), GraphNode::default()))
            .collect();

        let mut edges = 0;
        for flow in flows {
            if !nodes.contains_key(flow.source()) || !nodes.contains_key(flow.target()) {
                debug!(
                    flow_id:% = flow.id(),
                    source:% = flow.source(),
                    target:% = flow.target();
                    "Flow endpoint is not a shape, skipping edge"
                );
                continue;
            }

            if let Some(source) = nodes.get_mut(flow.source()) {
                source.next.push(flow.target().clone());
            }
            if let Some(target) = nodes.get_mut(flow.target()) {
                target.prev.push(flow.source().clone());
            }
            edges += 1;
        }

        debug!(nodes = nodes.len(), edges; "Flow graph built");
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &ShapeId) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    /// Iterates nodes in row order.
    pub fn nodes(&self) -> impl Iterator<Item = (&ShapeId, &GraphNode)> {
        self.nodes.iter()
    }

    /// Returns the first node in row order that has no incoming edge.
    pub fn root(&self) -> Option<&ShapeId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.prev.is_empty())
            .map(|(id, _)| id)
    }

    /// Assigns every node a column level.
    ///
    /// A breadth-first walk from [`FlowGraph::root`] gives each reachable
    /// node its hop distance from the root. Nodes the walk never reaches,
    /// including every node of a graph without a root, get level 0.
    pub fn assign_levels(&mut self) {
        let mut visited: HashSet<ShapeId> = HashSet::new();
        let mut queue: VecDeque<(ShapeId, usize)> = VecDeque::new();

        if let Some(root) = self.root() {
            trace!(root:% = root; "Leveling from root");
            queue.push_back((root.clone(), 0));
        } else {
            debug!("Flow graph has no root, skipping traversal");
        }

        while let Some((id, level)) = queue.pop_front() {
            if visited.contains(&id) {
                continue;
            }
            let Some(node) = self.nodes.get_mut(&id) else {
                continue;
            };
            node.level = Some(level);

            for child in &node.next {
                if !visited.contains(child) {
                    queue.push_back((child.clone(), level + 1));
                }
            }
            visited.insert(id);
        }

        let mut unreached = 0;
        for node in self.nodes.values_mut().filter(|node| node.level.is_none()) {
            node.level = Some(0);
            unreached += 1;
        }

        debug!(reached = visited.len(), unreached; "Levels assigned");
    }

    /// Groups node ids into columns by level, keeping row order within each
    /// column.
    ///
    /// Columns are indexed by level; a level no node holds yields an empty
    /// column. Nodes without a level are left out.
    pub fn columns(&self) -> Vec<Vec<&ShapeId>> {
        let mut columns: Vec<Vec<&ShapeId>> = Vec::new();
        for (id, node) in &self.nodes {
            let Some(level) = node.level else {
                continue;
            };
            if columns.len() <= level {
                columns.resize_with(level + 1, Vec::new);
            }
            columns[level].push(id);
        }
        columns
    }
}
