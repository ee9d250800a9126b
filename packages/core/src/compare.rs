//! Side-by-side comparison of graphs for the same sentences.
//!
//! A [`ComparisonContext`] holds the graphs being compared, keyed by graph id,
//! and answers per-node and per-edge questions ("is this concept also in the
//! other graph?"). The side being rendered is always passed explicitly as a
//! [`Side`].
//!
//! Two modes are supported:
//!
//! | Mode | Built with | A node/edge is a [`Verdict::Match`] when… |
//! |------|------------|-------------------------------------------|
//! | pair | [`ComparisonContext::pairs`] | it appears in both graphs |
//! | gold | [`ComparisonContext::with_gold`] | it appears in gold but not in the other system |
//!
//! Nodes are compared by concept label and edges by labeled triple
//! `(label(source), role, label(target))`, never by node key, so graphs with
//! different key schemes compare correctly.

use std::collections::HashMap;

use crate::types::{Edge, Graph};

/// Outcome of comparing one node or edge against the other graph(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Match,
    Mismatch,
    /// Nothing to report.
    Neutral,
}

impl Verdict {
    /// Display color used by renderers: `green`, `red`, or empty.
    pub fn color(self) -> &'static str {
        match self {
            Verdict::Match => "green",
            Verdict::Mismatch => "red",
            Verdict::Neutral => "",
        }
    }
}

/// Which graph of a comparison is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
    /// The reference graph; only meaningful in gold mode.
    Gold,
}

/// Per-node and per-edge annotation strategy used by
/// [`render_annotated`](crate::render::render_annotated).
///
/// Descriptions default to none.
pub trait Annotate {
    fn node_verdict(&self, graph: &Graph, node: &str) -> Verdict;

    fn edge_verdict(&self, graph: &Graph, edge: &Edge) -> Verdict;

    fn node_description(&self, _graph: &Graph, _node: &str) -> Option<String> {
        None
    }

    fn edge_description(&self, _graph: &Graph, _edge: &Edge) -> Option<String> {
        None
    }
}

enum Entry {
    Pair(Graph, Graph),
    Gold { first: Graph, second: Graph, gold: Graph },
}

/// Graphs under comparison, keyed by graph id, in input order.
pub struct ComparisonContext {
    ids: Vec<String>,
    entries: HashMap<String, Entry>,
}

impl ComparisonContext {
    /// Pair graphs positionally. Each second graph adopts its partner's id.
    ///
    /// Extra graphs in the longer list are ignored. A repeated id replaces
    /// the earlier entry.
    pub fn pairs(first: Vec<Graph>, second: Vec<Graph>) -> Self {
        let mut ctx = Self::empty();
        for (a, mut b) in first.into_iter().zip(second) {
            b.id = a.id.clone();
            ctx.insert(a.id.clone(), Entry::Pair(a, b));
        }
        ctx
    }

    /// Group two system outputs with a gold graph positionally. Both system
    /// graphs adopt the gold graph's id.
    pub fn with_gold(first: Vec<Graph>, second: Vec<Graph>, gold: Vec<Graph>) -> Self {
        let mut ctx = Self::empty();
        for ((mut a, mut b), g) in first.into_iter().zip(second).zip(gold) {
            a.id = g.id.clone();
            b.id = g.id.clone();
            ctx.insert(
                g.id.clone(),
                Entry::Gold {
                    first: a,
                    second: b,
                    gold: g,
                },
            );
        }
        ctx
    }

    fn empty() -> Self {
        Self {
            ids: Vec::new(),
            entries: HashMap::new(),
        }
    }

    fn insert(&mut self, id: String, entry: Entry) {
        if self.entries.insert(id.clone(), entry).is_none() {
            self.ids.push(id);
        }
    }

    /// Number of compared sentences.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether this context compares against a gold graph.
    pub fn has_gold(&self) -> bool {
        matches!(self.entries.values().next(), Some(Entry::Gold { .. }))
    }

    /// Graph ids in input order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// The graph for `id` on `side`. [`Side::Gold`] is `None` in pair mode.
    pub fn graph(&self, id: &str, side: Side) -> Option<&Graph> {
        match (self.entries.get(id)?, side) {
            (Entry::Pair(a, _), Side::First) => Some(a),
            (Entry::Pair(_, b), Side::Second) => Some(b),
            (Entry::Pair(..), Side::Gold) => None,
            (Entry::Gold { first, .. }, Side::First) => Some(first),
            (Entry::Gold { second, .. }, Side::Second) => Some(second),
            (Entry::Gold { gold, .. }, Side::Gold) => Some(gold),
        }
    }

    /// Verdict for node `node` of `graph`, rendered as `side`.
    ///
    /// Graphs whose id is not in the context are [`Verdict::Neutral`].
    pub fn node_verdict(&self, side: Side, graph: &Graph, node: &str) -> Verdict {
        let label = graph.label_or_unknown(node);
        self.verdict(side, &graph.id, |g| has_label(g, label))
    }

    /// Verdict for `edge` of `graph`, rendered as `side`.
    pub fn edge_verdict(&self, side: Side, graph: &Graph, edge: &Edge) -> Verdict {
        let triple = labeled(graph, edge);
        self.verdict(side, &graph.id, |g| has_labeled_edge(g, triple))
    }

    /// Human-readable explanation of a pair-mode node verdict.
    pub fn node_description(&self, side: Side, graph: &Graph, node: &str) -> Option<String> {
        let label = graph.label_or_unknown(node);
        match self.node_verdict(side, graph, node) {
            Verdict::Match => Some(format!("node ({label}) in both graphs")),
            Verdict::Mismatch => Some(format!("node ({label}) missing from other graph")),
            Verdict::Neutral => None,
        }
    }

    /// Human-readable explanation of a pair-mode edge verdict.
    pub fn edge_description(&self, side: Side, graph: &Graph, edge: &Edge) -> Option<String> {
        let (s, r, t) = labeled(graph, edge);
        match self.edge_verdict(side, graph, edge) {
            Verdict::Match => Some(format!("edge ({s}, {r}, {t}) in both graphs")),
            Verdict::Mismatch => Some(format!("edge ({s}, {r}, {t}) missing from other graph")),
            Verdict::Neutral => None,
        }
    }

    /// Bind this context to `side`, producing an [`Annotate`] strategy.
    pub fn annotator(&self, side: Side) -> SideAnnotator<'_> {
        SideAnnotator { ctx: self, side }
    }

    fn verdict(&self, side: Side, id: &str, contains: impl Fn(&Graph) -> bool) -> Verdict {
        match (self.entries.get(id), side) {
            (None, _) | (Some(Entry::Pair(..)), Side::Gold) => Verdict::Neutral,
            (Some(Entry::Pair(a, b)), _) => {
                if contains(a) && contains(b) {
                    Verdict::Match
                } else {
                    Verdict::Mismatch
                }
            }
            (Some(Entry::Gold { .. }), Side::Gold) => Verdict::Neutral,
            (Some(Entry::Gold { first, second, gold }), side) => {
                let other = if side == Side::First { second } else { first };
                match (contains(gold), contains(other)) {
                    (true, false) => Verdict::Match,
                    (false, false) => Verdict::Mismatch,
                    _ => Verdict::Neutral,
                }
            }
        }
    }
}

/// A [`ComparisonContext`] bound to one side. See [`ComparisonContext::annotator`].
pub struct SideAnnotator<'a> {
    ctx: &'a ComparisonContext,
    side: Side,
}

impl Annotate for SideAnnotator<'_> {
    fn node_verdict(&self, graph: &Graph, node: &str) -> Verdict {
        self.ctx.node_verdict(self.side, graph, node)
    }

    fn edge_verdict(&self, graph: &Graph, edge: &Edge) -> Verdict {
        self.ctx.edge_verdict(self.side, graph, edge)
    }

    fn node_description(&self, graph: &Graph, node: &str) -> Option<String> {
        if self.ctx.has_gold() {
            return None;
        }
        self.ctx.node_description(self.side, graph, node)
    }

    fn edge_description(&self, graph: &Graph, edge: &Edge) -> Option<String> {
        if self.ctx.has_gold() {
            return None;
        }
        self.ctx.edge_description(self.side, graph, edge)
    }
}

// --- helpers -----------------------------------------------------------------

fn labeled<'g>(graph: &'g Graph, edge: &'g Edge) -> (&'g str, &'g str, &'g str) {
    (
        graph.label_or_unknown(&edge.source),
        edge.role.as_str(),
        graph.label_or_unknown(&edge.target),
    )
}

fn has_label(graph: &Graph, label: &str) -> bool {
    graph.nodes.values().any(|l| l == label)
}

fn has_labeled_edge(graph: &Graph, triple: (&str, &str, &str)) -> bool {
    graph.edges.iter().any(|e| labeled(graph, e) == triple)
}

// --- tests -------------------------------------------------------------------
