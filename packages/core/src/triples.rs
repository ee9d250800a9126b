//! Flattening a [`Graph`] into `(source, role, target)` triples.
//!
//! [`Graph::triples`] yields the root's instance triple first, then one triple
//! per edge in edge order, each followed by the target's instance triple the
//! first time that target is seen. Literal targets are embedded by value.
//!
//! With inverse normalization, `(s, :role-of, t)` is yielded as
//! `(t, :role, s)`, except for roles in [`NON_INVERTIBLE_ROLES`].

use std::collections::HashSet;
use std::fmt;

use crate::types::{is_literal, Graph, INSTANCE_ROLE};

/// Suffix marking an inverse role.
pub const INVERSE_SUFFIX: &str = "-of";

/// Roles ending in [`INVERSE_SUFFIX`] that are not inverses.
pub const NON_INVERTIBLE_ROLES: [&str; 3] = [":consist-of", ":prep-out-of", ":prep-on-behalf-of"];

/// One `(source, role, target)` statement.
///
/// For instance triples and literal targets, `target` is a label rather than
/// a node key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triple<'g> {
    pub source: &'g str,
    pub role: &'g str,
    pub target: &'g str,
}

impl<'g> Triple<'g> {
    pub fn new(source: &'g str, role: &'g str, target: &'g str) -> Self {
        Self {
            source,
            role,
            target,
        }
    }

    pub fn is_instance(&self) -> bool {
        self.role == INSTANCE_ROLE
    }
}

/// Formats as tab-separated `source role target`.
impl fmt::Display for Triple<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.source, self.role, self.target)
    }
}

/// Whether `role` is an inverse role that normalization should flip.
pub fn is_invertible(role: &str) -> bool {
    role.ends_with(INVERSE_SUFFIX) && !NON_INVERTIBLE_ROLES.contains(&role)
}

/// Lazy iterator returned by [`Graph::triples`].
pub struct Triples<'g> {
    graph: &'g Graph,
    normalize_inverse: bool,
    root_done: bool,
    next_edge: usize,
    pending_instance: Option<Triple<'g>>,
    taken: HashSet<&'g str>,
}

impl<'g> Iterator for Triples<'g> {
    type Item = Triple<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.root_done {
            self.root_done = true;
            if let Some(root) = self.graph.root.as_deref().filter(|_| !self.graph.is_empty()) {
                self.taken.insert(root);
                return Some(Triple::new(root, INSTANCE_ROLE, self.graph.label_or_unknown(root)));
            }
        }

        if let Some(instance) = self.pending_instance.take() {
            return Some(instance);
        }

        let edge = self.graph.edges.get(self.next_edge)?;
        self.next_edge += 1;

        let (s, r, t) = (edge.source.as_str(), edge.role.as_str(), edge.target.as_str());
        let target_label = self.graph.label_or_unknown(t);

        if is_literal(target_label) {
            return Some(Triple::new(s, r, target_label));
        }

        if self.taken.insert(t) {
            self.pending_instance = Some(Triple::new(t, INSTANCE_ROLE, target_label));
        }

        if self.normalize_inverse && is_invertible(r) {
            Some(Triple::new(t, &r[..r.len() - INVERSE_SUFFIX.len()], s))
        } else {
            Some(Triple::new(s, r, t))
        }
    }
}

impl Graph {
    /// Iterate over the graph as triples. See the [module docs](self).
    ///
    /// An empty graph yields nothing. Missing labels degrade to
    /// [`UNKNOWN_LABEL`](crate::types::UNKNOWN_LABEL).
    pub fn triples(&self, normalize_inverse: bool) -> Triples<'_> {
        Triples {
            graph: self,
            normalize_inverse,
            root_done: false,
            next_edge: 0,
            pending_instance: None,
            taken: HashSet::new(),
        }
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(g: &Graph, normalize: bool) -> Vec<(&str, &str, &str)> {
        g.triples(normalize)
            .map(|t| (t.source, t.role, t.target))
            .collect()
    }

    fn located() -> Graph {
        // (c / city :location-of (m / meet-03 :time (d / date-entity :year 2020)))
        let mut g = Graph::with_id("t.1");
        g.add_node("c", "city");
        g.add_node("m", "meet-03");
        g.add_node("d", "date-entity");
        g.add_node("y", "2020");
        g.set_root("c");
        g.add_edge("c", ":location-of", "m");
        g.add_edge("m", ":time", "d");
        g.add_edge("d", ":year", "y");
        g
    }

    #[test]
    fn instances_follow_first_reference() {
        assert_eq!(
            collect(&located(), false),
            vec![
                ("c", ":instance", "city"),
                ("c", ":location-of", "m"),
                ("m", ":instance", "meet-03"),
                ("m", ":time", "d"),
                ("d", ":instance", "date-entity"),
                ("d", ":year", "2020"),
            ]
        );
    }

    #[test]
    fn normalization_flips_inverse_roles() {
        let binding = located();
        let triples = collect(&binding, true);
        assert_eq!(triples[1], ("m", ":location", "c"));
        // instance is decided by the structural target, not the flipped one
        assert_eq!(triples[2], ("m", ":instance", "meet-03"));
    }

    #[test]
    fn excluded_roles_never_flip() {
        let mut g = Graph::new();
        g.add_node("a", "box");
        g.add_node("b", "house");
        g.set_root("a");
        g.add_edge("a", ":prep-out-of", "b");
        g.add_edge("a", ":consist-of", "b");
        let triples = collect(&g, true);
        assert_eq!(triples[1], ("a", ":prep-out-of", "b"));
        assert_eq!(triples[3], ("a", ":consist-of", "b"));
        assert!(!is_invertible(":prep-on-behalf-of"));
        assert!(is_invertible(":ARG0-of"));
        assert!(!is_invertible(":ARG0"));
    }

    #[test]
    fn one_instance_per_node() {
        let mut g = Graph::new();
        g.add_node("w", "want-01");
        g.add_node("b", "boy");
        g.add_node("g", "go-02");
        g.set_root("w");
        g.add_edge("w", ":ARG0", "b");
        g.add_edge("w", ":ARG1", "g");
        g.add_edge("g", ":ARG0", "b");
        g.add_edge("b", ":ARG0-of", "w"); // back to the root
        let triples: Vec<Triple> = g.triples(false).collect();
        let instances: Vec<&str> = triples
            .iter()
            .filter(|t| t.is_instance())
            .map(|t| t.source)
            .collect();
        assert_eq!(instances, ["w", "b", "g"]);
        assert_eq!(triples.len(), 7);
    }

    #[test]
    fn literal_targets_are_values_without_instances() {
        let mut g = Graph::new();
        g.add_node("r", "run-01");
        g.add_node("i", "imperative");
        g.add_node("n", "-");
        g.set_root("r");
        g.add_edge("r", ":mode", "i");
        g.add_edge("r", ":polarity", "n");
        assert_eq!(
            collect(&g, false),
            vec![
                ("r", ":instance", "run-01"),
                ("r", ":mode", "imperative"),
                ("r", ":polarity", "-"),
            ]
        );
    }

    #[test]
    fn empty_graph_yields_nothing() {
        assert_eq!(Graph::new().triples(true).count(), 0);
    }

    #[test]
    fn display_is_tab_separated() {
        assert_eq!(Triple::new("a", ":ARG0", "b").to_string(), "a\t:ARG0\tb");
    }
}
