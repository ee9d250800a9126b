//! Token-to-graph alignments.
//!
//! An [`Alignment`] ties a span of sentence tokens to the nodes and edges they
//! realize. Alignments are stored outside the graph, in an [`Alignments`]
//! store keyed by graph id. Lookups never fail: when nothing covers the query
//! the neutral empty alignment is returned.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Edge, Graph};

/// One alignment record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Alignment {
    /// Optional category, e.g. `"subgraph"` or `"relation"`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Indices into [`Graph::tokens`].
    #[serde(default)]
    pub tokens: Vec<usize>,
    /// Node keys.
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

static EMPTY: Alignment = Alignment {
    kind: None,
    tokens: Vec::new(),
    nodes: Vec::new(),
    edges: Vec::new(),
};

impl Alignment {
    /// The neutral alignment returned when a lookup finds nothing.
    pub fn empty() -> &'static Alignment {
        &EMPTY
    }

    /// Whether this alignment covers nothing.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.nodes.is_empty() && self.edges.is_empty()
    }

    fn covers(&self, query: &AlignmentQuery<'_>) -> bool {
        match query {
            AlignmentQuery::Token(i) => self.tokens.contains(i),
            AlignmentQuery::Node(n) => self.nodes.iter().any(|k| k == n),
            AlignmentQuery::Edge(e) => self.edges.contains(e),
        }
    }
}

/// What an alignment lookup is searching for.
#[derive(Debug, Clone, Copy)]
pub enum AlignmentQuery<'q> {
    Token(usize),
    Node(&'q str),
    Edge(&'q Edge),
}

/// Alignment records for many graphs, keyed by graph id.
///
/// Serialises as a JSON object `{ "<graph id>": [ <alignment>, ... ] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Alignments {
    by_graph: HashMap<String, Vec<Alignment>>,
}

impl Alignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an alignment record for `graph_id`.
    pub fn add(&mut self, graph_id: impl Into<String>, alignment: Alignment) {
        self.by_graph.entry(graph_id.into()).or_default().push(alignment);
    }

    /// All records for `graph_id`, in order. Empty if the id is unknown.
    pub fn for_graph(&self, graph_id: &str) -> &[Alignment] {
        self.by_graph.get(graph_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Graph {
    /// The first alignment for this graph that covers `query`, or
    /// [`Alignment::empty`].
    pub fn get_alignment<'a>(
        &self,
        alignments: &'a Alignments,
        query: AlignmentQuery<'_>,
    ) -> &'a Alignment {
        alignments
            .for_graph(&self.id)
            .iter()
            .find(|a| a.covers(&query))
            .unwrap_or(Alignment::empty())
    }

    /// Shorthand for [`get_alignment`](Self::get_alignment) with a token index.
    pub fn alignment_for_token<'a>(&self, alignments: &'a Alignments, token: usize) -> &'a Alignment {
        self.get_alignment(alignments, AlignmentQuery::Token(token))
    }

    /// Shorthand for [`get_alignment`](Self::get_alignment) with a node key.
    pub fn alignment_for_node<'a>(&self, alignments: &'a Alignments, node: &str) -> &'a Alignment {
        self.get_alignment(alignments, AlignmentQuery::Node(node))
    }

    /// Shorthand for [`get_alignment`](Self::get_alignment) with an edge.
    pub fn alignment_for_edge<'a>(&self, alignments: &'a Alignments, edge: &Edge) -> &'a Alignment {
        self.get_alignment(alignments, AlignmentQuery::Edge(edge))
    }

    /// Text of every token aligned to `node`, in alignment order.
    ///
    /// Each alignment in `alignments` that covers `node` contributes its
    /// tokens in order. Punctuation-only tokens and indices outside
    /// [`Graph::tokens`] are skipped. Duplicates across alignments are kept.
    pub fn tokens_for_node<'g>(&'g self, node: &str, alignments: &[Alignment]) -> Vec<&'g str> {
        alignments
            .iter()
            .filter(|a| a.nodes.iter().any(|k| k == node))
            .flat_map(|a| a.tokens.iter())
            .filter_map(|&i| self.tokens.get(i))
            .map(String::as_str)
            .filter(|text| !is_punctuation(text))
            .collect()
    }
}

fn is_punctuation(token: &str) -> bool {
    token.chars().all(|c| c.is_ascii_punctuation())
}

// --- tests -------------------------------------------------------------------
