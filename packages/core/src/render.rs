//! Text rendering of [`Graph`]s.
//!
//! Three outputs are produced here:
//!
//! - the canonical nested-parenthesis expression ([`graph_string`]), which is
//!   deterministic for a given graph and safe for reentrant and cyclic graphs;
//! - the comment-style header block ([`metadata_string`]) that precedes it in
//!   the exchanged text form;
//! - an annotated listing for comparison views ([`render_annotated`]).
//!
//! ```text
//! # ::id test.1
//! # ::tok The boy wants to go
//! # ::node	w	want-01
//! # ::node	b	boy
//! # ::node	g	go-02
//! # ::root	w	want-01
//! # ::edge	want-01	ARG0	boy	w	b
//! # ::edge	want-01	ARG1	go-02	w	g
//! # ::edge	go-02	ARG0	boy	g	b
//! (w / want-01
//! 	:ARG0 (b / boy)
//! 	:ARG1 (g / go-02
//! 		:ARG0 b))
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;

use indexmap::IndexSet;

use crate::compare::{Annotate, Verdict};
use crate::ids::assign_ids;
use crate::types::{is_literal, Edge, Graph, EMPTY_GRAPH, UNKNOWN_ID, UNKNOWN_LABEL};

/// Metadata keys that the header block renders from graph fields instead.
const RESERVED_METADATA: [&str; 6] = ["tok", "id", "node", "root", "edge", "alignments"];

/// Nodes the serializer could not reach from the root.
///
/// Returned alongside the best-effort expression by
/// [`graph_string_with_report`] and logged as a warning by [`graph_string`].
#[derive(Debug, Clone, PartialEq)]
pub struct Unreached {
    pub graph_id: String,
    /// Nodes written to the expression.
    pub reached: usize,
    /// Nodes in the graph.
    pub total: usize,
    /// `(key, label)` of every node that was not written.
    pub missing_nodes: Vec<(String, String)>,
    /// Edges touching a missing node, in edge order.
    pub missing_edges: Vec<MissingEdge>,
}

/// An edge touching an unreached node, with the labels of both endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingEdge {
    pub edge: Edge,
    pub source_label: String,
    pub target_label: String,
}

impl fmt::Display for Unreached {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} of {} nodes printed",
            self.graph_id, self.reached, self.total
        )?;
        let nodes: Vec<String> = self
            .missing_nodes
            .iter()
            .map(|(key, label)| format!("{key}/{label}"))
            .collect();
        writeln!(f, "Missing nodes: {}", nodes.join(", "))?;
        let edges: Vec<String> = self
            .missing_edges
            .iter()
            .map(|m| {
                format!(
                    "{}/{} {} {}/{}",
                    m.edge.source, m.source_label, m.edge.role, m.edge.target, m.target_label
                )
            })
            .collect();
        write!(f, "Missing edges: {}", edges.join(", "))
    }
}

// A slot in the expression under construction: finished text, or a node
// reference still waiting to be resolved.
enum Piece<'g> {
    Text(String),
    Pending(&'g str),
}

impl Piece<'_> {
    fn is_pending(&self) -> bool {
        matches!(self, Piece::Pending(_))
    }

    fn is_pending_for(&self, node: &str) -> bool {
        matches!(self, Piece::Pending(n) if *n == node)
    }
}

/// Render the canonical expression of `graph`, logging unreachable nodes.
///
/// See [`graph_string_with_report`] for the algorithm.
pub fn graph_string(graph: &Graph) -> String {
    let (out, unreached) = graph_string_with_report(graph);
    if let Some(report) = unreached {
        tracing::warn!(
            graph_id = %report.graph_id,
            reached = report.reached,
            total = report.total,
            "failed to print graph:\n{out}\n{report}"
        );
    }
    out
}

/// Render the canonical expression of `graph`, returning a report of any
/// nodes that could not be reached from the root.
///
/// The expression is built breadth-first from the root. Outgoing edges are
/// written sorted by role. The first reference to a node (in text order)
/// becomes its full `(id / concept ...)` expansion; every other reference
/// becomes its bare id. Literal leaves without outgoing edges are written as
/// their label, with no id and no parentheses, wherever they are referenced.
///
/// A graph without nodes renders as [`EMPTY_GRAPH`]. Unreachable nodes do
/// not fail the render: the best-effort expression is returned together with
/// an [`Unreached`] report.
pub fn graph_string_with_report(graph: &Graph) -> (String, Option<Unreached>) {
    if graph.is_empty() {
        return (EMPTY_GRAPH.to_string(), None);
    }

    let Some(root) = graph.root.as_deref() else {
        let out = format!("({UNKNOWN_ID} / {UNKNOWN_LABEL})");
        return (out, unreached_report(graph, &HashMap::new()));
    };
    let ids = assign_ids(&graph.nodes);

    let mut buffer = vec![Piece::Pending(root)];
    // node → the text that replaces its later references
    let mut resolved: HashMap<&str, String> = HashMap::new();
    let mut frontier: IndexSet<&str> = IndexSet::from([root]);
    let mut depth = 1;

    while !frontier.is_empty() && buffer.iter().any(Piece::is_pending) {
        let indent = "\t".repeat(depth);
        let mut next: IndexSet<&str> = IndexSet::new();

        for &node in &frontier {
            let (id, concept) = match ids.get(node) {
                Some(id) => (
                    id.as_str(),
                    graph
                        .label(node)
                        .filter(|l| !l.is_empty())
                        .unwrap_or(UNKNOWN_LABEL),
                ),
                None => (UNKNOWN_ID, UNKNOWN_LABEL),
            };

            let mut outgoing: Vec<&Edge> =
                graph.edges.iter().filter(|e| e.source == node).collect();
            outgoing.sort_by(|a, b| a.role.cmp(&b.role));

            if !resolved.contains_key(node) {
                if let Some(at) = buffer.iter().position(|p| p.is_pending_for(node)) {
                    if !is_literal(concept) || !outgoing.is_empty() {
                        let mut expansion = Vec::with_capacity(outgoing.len() * 2 + 2);
                        expansion.push(Piece::Text(format!("({id} / {concept}")));
                        for e in &outgoing {
                            expansion.push(Piece::Text(format!("\n{indent}{} ", e.role)));
                            expansion.push(Piece::Pending(e.target.as_str()));
                        }
                        expansion.push(Piece::Text(")".to_string()));
                        buffer.splice(at..=at, expansion);
                        resolved.insert(node, id.to_string());
                    } else {
                        resolved.insert(node, concept.to_string());
                    }
                }
            }

            if let Some(text) = resolved.get(node) {
                for piece in buffer.iter_mut() {
                    if piece.is_pending_for(node) {
                        *piece = Piece::Text(text.clone());
                    }
                }
            }

            next.extend(outgoing.iter().map(|e| e.target.as_str()));
        }

        frontier = next;
        depth += 1;
    }

    let mut out: String = buffer
        .into_iter()
        .map(|piece| match piece {
            Piece::Text(text) => text,
            Piece::Pending(node) => ids
                .get(node)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_ID.to_string()),
        })
        .collect();

    if !out.starts_with('(') {
        out = format!("({out})");
    }

    (out, unreached_report(graph, &resolved))
}

fn unreached_report(graph: &Graph, resolved: &HashMap<&str, String>) -> Option<Unreached> {
    let missing: HashSet<&str> = graph
        .nodes
        .keys()
        .map(String::as_str)
        .filter(|n| !resolved.contains_key(n))
        .collect();
    if missing.is_empty() {
        return None;
    }

    Some(Unreached {
        graph_id: graph.id.clone(),
        reached: graph.len() - missing.len(),
        total: graph.len(),
        missing_nodes: graph
            .nodes
            .iter()
            .filter(|(key, _)| missing.contains(key.as_str()))
            .map(|(key, label)| (key.clone(), label.clone()))
            .collect(),
        missing_edges: graph
            .edges
            .iter()
            .filter(|e| missing.contains(e.source.as_str()) || missing.contains(e.target.as_str()))
            .map(|e| MissingEdge {
                edge: e.clone(),
                source_label: graph.label_or_unknown(&e.source).to_string(),
                target_label: graph.label_or_unknown(&e.target).to_string(),
            })
            .collect(),
    })
}

/// Render the header block: one `# ::` comment line per field.
///
/// Field order is fixed: id, tokens, extra metadata, nodes, root, edges.
/// Labels of keys missing from `nodes` render as [`UNKNOWN_LABEL`].
pub fn metadata_string(graph: &Graph) -> String {
    let mut out = String::new();

    if !graph.id.is_empty() {
        out.push_str(&format!("# ::id {}\n", graph.id));
    }
    out.push_str(&format!("# ::tok {}\n", graph.tokens.join(" ")));

    for (key, value) in &graph.metadata {
        if !RESERVED_METADATA.contains(&key.as_str()) {
            out.push_str(&format!("# ::{key} {value}\n"));
        }
    }

    for (key, label) in &graph.nodes {
        out.push_str(&format!("# ::node\t{key}\t{}\n", label.replace(' ', "_")));
    }

    if let Some(root) = graph.root.as_deref().filter(|r| !r.is_empty()) {
        out.push_str(&format!(
            "# ::root\t{root}\t{}\n",
            graph.label_or_unknown(root)
        ));
    }

    for e in &graph.edges {
        let role = e.role.strip_prefix(':').unwrap_or(&e.role);
        out.push_str(&format!(
            "# ::edge\t{}\t{role}\t{}\t{}\t{}\n",
            graph.label_or_unknown(&e.source),
            graph.label_or_unknown(&e.target),
            e.source,
            e.target,
        ));
    }

    out
}

/// Render the full exchanged text form: header block, canonical expression,
/// and a blank-line separator.
pub fn amr_string(graph: &Graph) -> String {
    format!("{}{}\n\n", metadata_string(graph), graph_string(graph))
}

/// Render `graph` as a listing of its nodes and edges, each marked by the
/// verdict `annotator` assigns to it.
///
/// ```text
/// # ::id test.1
/// (w / want-01
/// 	:ARG0 (b / boy))
/// nodes:
///   [+] w  want-01  node (want-01) in both graphs
///   [-] b  boy  node (boy) missing from other graph
/// edges:
///   [-] w :ARG0 b  edge (want-01, :ARG0, boy) missing from other graph
/// ```
pub fn render_annotated(graph: &Graph, annotator: &dyn Annotate) -> String {
    let mut out = format!("# ::id {}\n", graph.id);
    if !graph.tokens.is_empty() {
        out.push_str(&format!("# ::tok {}\n", graph.tokens.join(" ")));
    }
    out.push_str(&graph_string(graph));
    out.push('\n');

    out.push_str("nodes:\n");
    for (key, label) in &graph.nodes {
        let verdict = annotator.node_verdict(graph, key);
        out.push_str(&format!("  [{}] {key}  {label}", mark(verdict)));
        if let Some(desc) = annotator.node_description(graph, key) {
            out.push_str(&format!("  {desc}"));
        }
        out.push('\n');
    }

    out.push_str("edges:\n");
    for e in &graph.edges {
        let verdict = annotator.edge_verdict(graph, e);
        out.push_str(&format!(
            "  [{}] {} {} {}",
            mark(verdict),
            e.source,
            e.role,
            e.target
        ));
        if let Some(desc) = annotator.edge_description(graph, e) {
            out.push_str(&format!("  {desc}"));
        }
        out.push('\n');
    }

    out
}

fn mark(verdict: Verdict) -> char {
    match verdict {
        Verdict::Match => '+',
        Verdict::Mismatch => '-',
        Verdict::Neutral => ' ',
    }
}

impl Graph {
    /// The canonical nested-parenthesis expression. See [`graph_string`].
    pub fn graph_string(&self) -> String {
        graph_string(self)
    }

    /// Header block, expression, and blank-line separator. See [`amr_string`].
    pub fn amr_string(&self) -> String {
        amr_string(self)
    }
}

/// Formats the header block ([`metadata_string`]).
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&metadata_string(self))
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io;
    use std::sync::{Arc, Mutex};

    fn graph(nodes: &[(&str, &str)], root: &str, edges: &[(&str, &str, &str)]) -> Graph {
        let mut g = Graph::with_id("test.1");
        for (k, v) in nodes {
            g.add_node(*k, *v);
        }
        g.set_root(root);
        for (s, r, t) in edges {
            g.add_edge(*s, *r, *t);
        }
        g
    }

    fn boy_wants_to_go() -> Graph {
        let mut g = graph(
            &[("w", "want-01"), ("b", "boy"), ("g", "go-02")],
            "w",
            &[("w", ":ARG1", "g"), ("w", ":ARG0", "b"), ("g", ":ARG0", "b")],
        );
        g.tokens = vec!["The".into(), "boy".into(), "wants".into(), "to".into(), "go".into()];
        g
    }

    #[test]
    fn roles_sorted_and_reentrancy_is_a_bare_id() {
        assert_eq!(
            graph_string(&boy_wants_to_go()),
            "(w / want-01\n\t:ARG0 (b / boy)\n\t:ARG1 (g / go-02\n\t\t:ARG0 b))"
        );
    }

    #[test]
    fn literal_leaves_render_as_values() {
        let g = graph(
            &[("r", "run-01"), ("n", "-"), ("i", "imperative"), ("q", "5")],
            "r",
            &[("r", ":polarity", "n"), ("r", ":mode", "i"), ("r", ":quant", "q")],
        );
        assert_eq!(
            graph_string(&g),
            "(r / run-01\n\t:mode imperative\n\t:polarity -\n\t:quant 5)"
        );
    }

    #[test]
    fn literal_with_children_is_expanded() {
        let g = graph(
            &[("c", "cost-01"), ("n", "5"), ("a", "about")],
            "c",
            &[("c", ":ARG1", "n"), ("n", ":mod", "a")],
        );
        assert_eq!(
            graph_string(&g),
            "(c / cost-01\n\t:ARG1 (x0 / 5\n\t\t:mod (a / about)))"
        );
    }

    #[test]
    fn shared_literal_stays_a_value_at_every_depth() {
        let g = graph(
            &[("a", "and"), ("r", "run-01"), ("m", "-")],
            "a",
            &[("a", ":op1", "r"), ("a", ":polarity", "m"), ("r", ":polarity", "m")],
        );
        assert_eq!(
            graph_string(&g),
            "(a / and\n\t:op1 (r / run-01\n\t\t:polarity -)\n\t:polarity -)"
        );
    }

    #[test]
    fn cycles_terminate() {
        let g = graph(
            &[("a", "alpha"), ("b", "beta")],
            "a",
            &[("a", ":next", "b"), ("b", ":next", "a")],
        );
        let (out, report) = graph_string_with_report(&g);
        assert_eq!(out, "(a / alpha\n\t:next (b / beta\n\t\t:next a))");
        assert!(report.is_none());
    }

    #[test]
    fn single_literal_root_is_wrapped() {
        let g = graph(&[("n", "5")], "n", &[]);
        assert_eq!(graph_string(&g), "(5)");
    }

    #[test]
    fn empty_graph_sentinel() {
        let mut g = Graph::with_id("empty");
        g.tokens = vec!["Hmm".into()];
        g.set_root("ghost");
        assert_eq!(graph_string(&g), EMPTY_GRAPH);
    }

    #[test]
    fn dangling_target_degrades_to_unknown() {
        let g = graph(&[("w", "want-01")], "w", &[("w", ":ARG0", "ghost")]);
        assert_eq!(
            graph_string(&g),
            format!("(w / want-01\n\t:ARG0 ({UNKNOWN_ID} / {UNKNOWN_LABEL}))")
        );
    }

    #[test]
    fn disconnected_nodes_are_reported() {
        let mut g = boy_wants_to_go();
        g.add_node("z", "zebra");
        g.add_node("y", "yak");
        g.add_edge("z", ":mod", "y");
        let (out, report) = graph_string_with_report(&g);
        assert!(out.starts_with("(w / want-01"));
        let report = report.expect("unreached nodes should be reported");
        assert_eq!(report.reached, 3);
        assert_eq!(report.total, 5);
        assert_eq!(
            report.missing_nodes,
            vec![("z".to_string(), "zebra".to_string()), ("y".to_string(), "yak".to_string())]
        );
        assert_eq!(
            report.missing_edges,
            vec![MissingEdge {
                edge: Edge::new("z", ":mod", "y"),
                source_label: "zebra".into(),
                target_label: "yak".into(),
            }]
        );
        let text = report.to_string();
        assert!(text.contains("3 of 5 nodes printed"));
        assert!(text.contains("Missing nodes: z/zebra, y/yak"), "got: {text}");
        assert!(text.ends_with("Missing edges: z/zebra :mod y/yak"), "got: {text}");
    }

    #[test]
    fn missing_edge_to_dangling_key_shows_unknown_label() {
        let mut g = graph(&[("w", "want-01"), ("z", "zebra")], "w", &[]);
        g.add_edge("z", ":ARG0", "ghost");
        let (_, report) = graph_string_with_report(&g);
        let text = report.expect("z is unreachable").to_string();
        assert!(text.ends_with("Missing edges: z/zebra :ARG0 ghost/None"), "got: {text}");
    }

    #[test]
    fn no_root_renders_placeholder_even_with_a_none_key() {
        let mut g = Graph::with_id("test.1");
        g.add_node("None", "dog");
        g.add_node("c", "cat");
        let (out, report) = graph_string_with_report(&g);
        assert_eq!(out, format!("({UNKNOWN_ID} / {UNKNOWN_LABEL})"));
        let report = report.expect("every node is unreached without a root");
        assert_eq!(report.reached, 0);
        assert_eq!(report.total, 2);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logs_of(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn graph_string_warns_about_unreached_nodes() {
        let mut g = boy_wants_to_go();
        g.add_node("z", "zebra");
        let logs = logs_of(|| {
            graph_string(&g);
        });
        assert!(logs.contains("WARN"), "got: {logs}");
        assert!(logs.contains("failed to print graph"), "got: {logs}");
        assert!(logs.contains("Missing nodes: z/zebra"), "got: {logs}");
    }

    #[test]
    fn graph_string_is_silent_when_everything_is_reached() {
        let g = boy_wants_to_go();
        let logs = logs_of(|| {
            graph_string(&g);
        });
        assert_eq!(logs, "");
    }

    #[test]
    fn header_block() {
        let mut g = boy_wants_to_go();
        g.metadata.insert("snt".into(), "The boy wants to go.".into());
        g.metadata.insert("tok".into(), "ignored".into());
        g.add_node("n", "New York");
        assert_eq!(
            metadata_string(&g),
            "# ::id test.1\n\
             # ::tok The boy wants to go\n\
             # ::snt The boy wants to go.\n\
             # ::node\tw\twant-01\n\
             # ::node\tb\tboy\n\
             # ::node\tg\tgo-02\n\
             # ::node\tn\tNew_York\n\
             # ::root\tw\twant-01\n\
             # ::edge\twant-01\tARG1\tgo-02\tw\tg\n\
             # ::edge\twant-01\tARG0\tboy\tw\tb\n\
             # ::edge\tgo-02\tARG0\tboy\tg\tb\n"
        );
    }

    #[test]
    fn header_degrades_missing_labels() {
        let g = graph(&[("w", "want-01")], "ghost", &[("w", ":ARG0", "ghost")]);
        let header = metadata_string(&g);
        assert!(header.contains("# ::root\tghost\tNone\n"));
        assert!(header.contains("# ::edge\twant-01\tARG0\tNone\tw\tghost\n"));
    }

    #[test]
    fn full_text_form() {
        let g = boy_wants_to_go();
        let text = g.amr_string();
        assert!(text.starts_with("# ::id test.1\n"));
        assert!(text.contains("\n(w / want-01\n"));
        assert!(text.ends_with("b))\n\n"));
        assert_eq!(g.to_string(), metadata_string(&g));
    }
}
