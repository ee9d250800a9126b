//! Short display identifiers for nodes.
//!
//! Each node gets a short id derived from its concept label: the first letter
//! of the label when it is lowercase (`dog` → `d`, a second `dog` → `d2`),
//! otherwise `x0`, `x1`, … Assignment walks the nodes in insertion order, so
//! the same graph always yields the same ids.

use std::collections::HashSet;

use indexmap::IndexMap;

/// Node key → short id, in node insertion order.
pub type ShortIds<'a> = IndexMap<&'a str, String>;

/// Assign a unique short id to every node in `nodes`.
pub fn assign_ids(nodes: &IndexMap<String, String>) -> ShortIds<'_> {
    let mut ids: ShortIds<'_> = IndexMap::with_capacity(nodes.len());
    let mut used: HashSet<String> = HashSet::with_capacity(nodes.len());

    for (key, label) in nodes {
        let id = match label.chars().next() {
            Some(c) if c.is_lowercase() => letter_id(c, &used),
            _ => numbered_id(&used),
        };
        used.insert(id.clone());
        ids.insert(key.as_str(), id);
    }

    ids
}

fn letter_id(c: char, used: &HashSet<String>) -> String {
    let base = c.to_string();
    if !used.contains(&base) {
        return base;
    }
    (2..)
        .map(|j| format!("{c}{j}"))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or(base)
}

fn numbered_id(used: &HashSet<String>) -> String {
    (0..)
        .map(|j| format!("x{j}"))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_else(|| "x".to_string())
}

// --- tests -------------------------------------------------------------------
