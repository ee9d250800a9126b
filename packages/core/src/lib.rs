//! Rooted, reentrant semantic graphs and their canonical text form.
//!
//! This crate holds the graph model for sentence-level meaning
//! representations (concept nodes linked by labeled roles) and the
//! deterministic conversions built on it. It is the foundation for the
//! `amrg` CLI and the `amrgraph-wasm` WebAssembly bindings.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`types`] | Core data types: [`Graph`], [`Edge`], literal-label rules |
//! | [`graph`] | Renaming, copying, and derived accessors over a [`Graph`] |
//! | [`ids`] | Short display ids for nodes via [`assign_ids`] |
//! | [`render`] | Canonical nested-parenthesis expression and header block |
//! | [`triples`] | Lazy `(source, role, target)` extraction via [`Graph::triples`] |
//! | [`alignment`] | Token ↔ node/edge alignment lookup |
//! | [`validation`] | Opt-in structural checks via [`validate_graph`] |
//! | [`compare`] | Side-by-side comparison of graphs for the same sentence |
//!
//! # Quick start
//!
//! ```rust
//! use amrgraph::Graph;
//!
//! let mut g = Graph::with_id("ex.1");
//! g.add_node("w", "want-01");
//! g.add_node("b", "boy");
//! g.add_node("g", "go-02");
//! g.set_root("w");
//! g.add_edge("w", ":ARG0", "b");
//! g.add_edge("w", ":ARG1", "g");
//! g.add_edge("g", ":ARG0", "b");
//!
//! assert_eq!(
//!     g.graph_string(),
//!     "(w / want-01\n\t:ARG0 (b / boy)\n\t:ARG1 (g / go-02\n\t\t:ARG0 b))"
//! );
//! assert_eq!(g.triples(false).count(), 6);
//! ```

pub mod alignment;
pub mod compare;
pub mod graph;
pub mod ids;
pub mod render;
pub mod triples;
pub mod types;
pub mod validation;

pub use alignment::{Alignment, AlignmentQuery, Alignments};
pub use compare::{Annotate, ComparisonContext, Side, Verdict};
pub use graph::GraphError;
pub use ids::assign_ids;
pub use render::{MissingEdge, Unreached};
pub use triples::Triple;
pub use types::{Edge, Graph};
pub use validation::{load_graphs, validate_graph, DanglingPolicy, LoadError, ValidationError};
