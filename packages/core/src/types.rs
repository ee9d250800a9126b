//! Core data types for rooted semantic graphs.
//!
//! This module defines the in-memory structures every other module reads:
//! [`Graph`] and [`Edge`], plus the literal-label rules shared by the
//! serializer and the triple extractor. All types serialise to and from JSON;
//! node and metadata mappings keep their insertion order so that identifier
//! assignment sees the graph in document order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Label substituted for node lookups that miss (dangling root or edge keys).
pub const UNKNOWN_LABEL: &str = "None";

/// Short id used by the serializer for nodes it never assigned an id to.
pub const UNKNOWN_ID: &str = "x91";

/// Graph id used when none was supplied.
pub const DEFAULT_GRAPH_ID: &str = "None";

/// Role of the `(node, :instance, concept)` triple.
pub const INSTANCE_ROLE: &str = ":instance";

/// Discourse-mood markers. Letter-initial, but always treated as literal values.
pub const SENTINEL_LITERALS: [&str; 3] = ["imperative", "expressive", "interrogative"];

/// Expression emitted for a graph with no nodes.
pub const EMPTY_GRAPH: &str = "(a / amr-empty)";

/// Whether a concept label is a literal leaf rather than a concept.
///
/// Literals are labels that do not start with a letter (numbers, quoted
/// strings, `-` polarity, the empty label) and the [`SENTINEL_LITERALS`].
pub fn is_literal(label: &str) -> bool {
    match label.chars().next() {
        Some(c) if c.is_alphabetic() => SENTINEL_LITERALS.contains(&label),
        _ => true,
    }
}

/// A labeled, directed edge `(source, role, target)`.
///
/// Roles carry their leading colon, e.g. `":ARG0"` or `":location-of"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Key of the node the edge leaves.
    pub source: String,
    /// Role label, including the leading `:`.
    pub role: String,
    /// Key of the node the edge points at.
    pub target: String,
}

impl Edge {
    pub fn new(
        source: impl Into<String>,
        role: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            role: role.into(),
            target: target.into(),
        }
    }

    /// Whether `node` is either end of this edge.
    pub fn touches(&self, node: &str) -> bool {
        self.source == node || self.target == node
    }
}

/// A rooted, directed, possibly reentrant graph for a single sentence.
///
/// Nodes are addressed by string key; `nodes` maps each key to its concept
/// label. Edges are kept in input order and may repeat. A node may be the
/// target of several edges (reentrancy). Keys referenced by `root` or by an
/// edge but absent from `nodes` are tolerated: lookups degrade to
/// [`UNKNOWN_LABEL`] instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Graph {
    /// Graph identifier; [`DEFAULT_GRAPH_ID`] when absent.
    #[serde(default = "default_graph_id")]
    pub id: String,

    /// The source sentence, one entry per token.
    #[serde(default)]
    pub tokens: Vec<String>,

    /// Key of the root node, `None` for an empty graph.
    #[serde(default)]
    pub root: Option<String>,

    /// Node key → concept label, in insertion order.
    #[serde(default)]
    pub nodes: IndexMap<String, String>,

    /// Edges in input order. Duplicates and parallel edges are allowed.
    #[serde(default)]
    pub edges: Vec<Edge>,

    /// Free-form annotations, in insertion order.
    #[serde(default)]
    pub metadata: IndexMap<String, String>,
}

fn default_graph_id() -> String {
    DEFAULT_GRAPH_ID.to_string()
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            id: default_graph_id(),
            tokens: Vec::new(),
            root: None,
            nodes: IndexMap::new(),
            edges: Vec::new(),
            metadata: IndexMap::new(),
        }
    }
}

impl Graph {
    /// Create an empty graph with the default id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with the given id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Insert a node. An existing key keeps its position and gets the new label.
    pub fn add_node(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.nodes.insert(key.into(), label.into());
    }

    /// Append an edge.
    pub fn add_edge(
        &mut self,
        source: impl Into<String>,
        role: impl Into<String>,
        target: impl Into<String>,
    ) {
        self.edges.push(Edge::new(source, role, target));
    }

    /// Set the root key.
    pub fn set_root(&mut self, key: impl Into<String>) {
        self.root = Some(key.into());
    }

    /// The label of `key`, if the node exists.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.nodes.get(key).map(String::as_str)
    }

    /// The label of `key`, or [`UNKNOWN_LABEL`] if the node does not exist.
    pub fn label_or_unknown(&self, key: &str) -> &str {
        self.label(key).unwrap_or(UNKNOWN_LABEL)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// --- tests -------------------------------------------------------------------
