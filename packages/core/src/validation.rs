use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::types::Graph;

/// Errors returned when a [`Graph`] fails structural validation.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("graph has nodes but no root")]
    MissingRoot,

    #[error("graph has root {0:?} but no nodes")]
    RootWithoutNodes(String),

    #[error("root {0:?} is not a node key")]
    DanglingRoot(String),

    #[error("edge {index} source {key:?} is not a node key")]
    DanglingEdgeSource { index: usize, key: String },

    #[error("edge {index} target {key:?} is not a node key")]
    DanglingEdgeTarget { index: usize, key: String },

    #[error("edge {index} role {role:?} must be a colon followed by a non-empty label")]
    InvalidRole { index: usize, role: String },
}

/// Errors returned by [`load_graphs`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to parse graph JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("graph {index} ({id}): {source}")]
    Invalid {
        index: usize,
        id: String,
        source: ValidationError,
    },
}

/// What loaders do with graphs whose root or edges reference missing nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DanglingPolicy {
    /// Accept the graph; lookups degrade to the unknown placeholder.
    #[default]
    Tolerate,
    /// Reject the graph with the first [`ValidationError`].
    Reject,
}

/// Validate a [`Graph`]'s structure.
///
/// Returns `Ok(())` if the root and every edge endpoint name an existing node
/// and every role is well-formed, or the first [`ValidationError`] found.
/// Errors are returned in field order: root first, then edges in order.
pub fn validate_graph(graph: &Graph) -> Result<(), ValidationError> {
    match (&graph.root, graph.is_empty()) {
        (None, false) => return Err(ValidationError::MissingRoot),
        (Some(root), true) => return Err(ValidationError::RootWithoutNodes(root.clone())),
        (Some(root), false) if !graph.nodes.contains_key(root) => {
            return Err(ValidationError::DanglingRoot(root.clone()));
        }
        _ => {}
    }

    for (index, e) in graph.edges.iter().enumerate() {
        if !graph.nodes.contains_key(&e.source) {
            return Err(ValidationError::DanglingEdgeSource {
                index,
                key: e.source.clone(),
            });
        }
        if !ROLE_RE.is_match(&e.role) {
            return Err(ValidationError::InvalidRole {
                index,
                role: e.role.clone(),
            });
        }
        if !graph.nodes.contains_key(&e.target) {
            return Err(ValidationError::DanglingEdgeTarget {
                index,
                key: e.target.clone(),
            });
        }
    }

    Ok(())
}

/// Parse one graph or an array of graphs from JSON, applying `policy`.
///
/// Input whose first non-whitespace character is `[` is parsed as an array;
/// anything else as a single graph object. Parse errors come from that one
/// attempt.
pub fn load_graphs(json: &str, policy: DanglingPolicy) -> Result<Vec<Graph>, LoadError> {
    let graphs = if json.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<Graph>>(json)?
    } else {
        vec![serde_json::from_str::<Graph>(json)?]
    };

    if policy == DanglingPolicy::Reject {
        for (index, g) in graphs.iter().enumerate() {
            validate_graph(g).map_err(|source| {
                tracing::debug!(graph_id = %g.id, %source, "rejected graph");
                LoadError::Invalid {
                    index,
                    id: g.id.clone(),
                    source,
                }
            })?;
        }
    }

    Ok(graphs)
}

/// `^:[^\s:]\S*$`
static ROLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:[^\s:]\S*$").expect("invalid role regex"));

// --- tests -------------------------------------------------------------------
