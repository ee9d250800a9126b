use std::collections::{HashMap, HashSet};

use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

use crate::types::{Edge, Graph};

/// Errors returned by mutating [`Graph`] operations.
///
/// Every operation that returns one of these leaves the graph unmodified.
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("cannot rename onto existing node key {0:?}")]
    NameCollision(String),

    #[error("no node with key {0:?}")]
    UnknownNode(String),
}

/// Parent → role → targets, in edge order. See [`Graph::edge_mapping`].
pub type EdgeMapping<'a> = IndexMap<&'a str, IndexMap<&'a str, Vec<&'a str>>>;

impl Graph {
    /// An independent copy of the graph.
    ///
    /// Collections are duplicated; mutating the copy never affects `self`.
    pub fn copy(&self) -> Graph {
        self.clone()
    }

    /// Relabel node key `from` as `to` everywhere it appears: node key, root,
    /// edge sources and edge targets. The node keeps its position in `nodes`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::NameCollision`] if `to` is already a node key.
    /// - [`GraphError::UnknownNode`] if `from` is not a node key.
    pub fn rename(&mut self, from: &str, to: &str) -> Result<(), GraphError> {
        if self.nodes.contains_key(to) {
            return Err(GraphError::NameCollision(to.to_string()));
        }
        let Some(index) = self.nodes.get_index_of(from) else {
            return Err(GraphError::UnknownNode(from.to_string()));
        };

        if let Some(label) = self.nodes.shift_remove(from) {
            self.nodes.shift_insert(index, to.to_string(), label);
        }
        if self.root.as_deref() == Some(from) {
            self.root = Some(to.to_string());
        }
        for edge in self.edges.iter_mut() {
            if edge.source == from {
                edge.source = to.to_string();
            }
            if edge.target == from {
                edge.target = to.to_string();
            }
        }

        tracing::debug!(graph_id = %self.id, from, to, "renamed node");
        Ok(())
    }

    /// Edges where `node` is the source or the target, in edge order.
    pub fn edges_for_node(&self, node: &str) -> Vec<&Edge> {
        self.edges.iter().filter(|e| e.touches(node)).collect()
    }

    /// Distinct targets of edges leaving `node`, in first-seen order.
    pub fn children(&self, node: &str) -> Vec<&str> {
        let set: IndexSet<&str> = self
            .edges
            .iter()
            .filter(|e| e.source == node)
            .map(|e| e.target.as_str())
            .collect();
        set.into_iter().collect()
    }

    /// Distinct sources of edges entering `node`, in first-seen order.
    pub fn parents(&self, node: &str) -> Vec<&str> {
        let set: IndexSet<&str> = self
            .edges
            .iter()
            .filter(|e| e.target == node)
            .map(|e| e.source.as_str())
            .collect();
        set.into_iter().collect()
    }

    /// Group edges by source, then by role.
    ///
    /// ```text
    /// { "w": { ":ARG0": ["b"], ":ARG1": ["g", "g2"] }, ... }
    /// ```
    ///
    /// Sources and roles appear in first-seen order; each target list keeps
    /// edge order, including duplicates.
    pub fn edge_mapping(&self) -> EdgeMapping<'_> {
        let mut mapping: EdgeMapping<'_> = IndexMap::new();
        for e in &self.edges {
            mapping
                .entry(e.source.as_str())
                .or_default()
                .entry(e.role.as_str())
                .or_default()
                .push(e.target.as_str());
        }
        mapping
    }

    /// Node labels in breadth-first order from the root.
    ///
    /// Children are visited in raw edge-list order (not sorted by role), and
    /// each node contributes its label once. Nodes unreachable from the root
    /// are omitted. Missing labels degrade to [`UNKNOWN_LABEL`](crate::types::UNKNOWN_LABEL).
    pub fn ordered_node_labels(&self) -> Vec<&str> {
        let Some(root) = self.root.as_deref() else {
            return vec![];
        };

        let mut out_edges: HashMap<&str, Vec<&str>> = HashMap::new();
        for e in &self.edges {
            out_edges
                .entry(e.source.as_str())
                .or_default()
                .push(e.target.as_str());
        }

        let mut labels = vec![self.label_or_unknown(root)];
        let mut processed: HashSet<&str> = HashSet::from([root]);
        let mut level = vec![root];

        while !level.is_empty() {
            let mut next = Vec::new();
            for parent in &level {
                for &child in out_edges.get(parent).into_iter().flatten() {
                    if processed.insert(child) {
                        labels.push(self.label_or_unknown(child));
                        next.push(child);
                    }
                }
            }
            level = next;
        }

        labels
    }
}

// --- tests -------------------------------------------------------------------
