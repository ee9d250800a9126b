//! wasm-bindgen-test integration tests for the amrgraph WASM bindings.
//!
//! Run with:
//!   wasm-pack test packages/wasm --node
//!
//! These tests compile to WASM and execute in a Node.js process, verifying
//! the exported API surface works end-to-end in a JavaScript host.

use wasm_bindgen_test::*;

// Configure all tests in this file to run in Node.js (no browser required).
wasm_bindgen_test_configure!(run_in_node_experimental);

use amrgraph_wasm::{graph_string, ordered_labels, render, triples, validate};

const BOY_WANTS: &str = r#"{
    "id": "w.1",
    "tokens": ["The", "boy", "wants", "to", "go"],
    "root": "w",
    "nodes": {"w": "want-01", "b": "boy", "g": "go-02"},
    "edges": [
        {"source": "w", "role": ":ARG1", "target": "g"},
        {"source": "w", "role": ":ARG0", "target": "b"},
        {"source": "g", "role": ":ARG0", "target": "b"}
    ]
}"#;

const DANGLING: &str = r#"{
    "id": "d.1",
    "root": "w",
    "nodes": {"w": "want-01"},
    "edges": [{"source": "w", "role": ":ARG0", "target": "ghost"}]
}"#;

// ---------------------------------------------------------------------------
// validate()
// ---------------------------------------------------------------------------

#[wasm_bindgen_test]
fn validate_valid_graph_succeeds() {
    validate(BOY_WANTS).expect("valid graph should pass validate()");
}

#[wasm_bindgen_test]
fn validate_invalid_json_returns_err() {
    let result = validate("not json at all");
    assert!(result.is_err(), "invalid JSON should fail validate()");
}

#[wasm_bindgen_test]
fn validate_dangling_edge_returns_err() {
    let result = validate(DANGLING);
    assert!(result.is_err(), "dangling edge target should fail validate()");
}

// ---------------------------------------------------------------------------
// render() / graphString()
// ---------------------------------------------------------------------------

#[wasm_bindgen_test]
fn render_contains_header_and_expression() {
    let text = render(BOY_WANTS, None).unwrap();
    assert!(text.starts_with("# ::id w.1\n"), "got: {text}");
    assert!(text.contains("# ::tok The boy wants to go\n"));
    assert!(text.ends_with("\t\t:ARG0 b))\n\n"), "got: {text}");
}

#[wasm_bindgen_test]
fn render_strict_rejects_dangling() {
    assert!(render(DANGLING, None).is_ok());
    assert!(render(DANGLING, Some(true)).is_err());
}

#[wasm_bindgen_test]
fn render_empty_array_returns_err() {
    let result = render("[]", None);
    assert!(result.is_err(), "empty array should return an error");
}

#[wasm_bindgen_test]
fn graph_string_is_canonical() {
    assert_eq!(
        graph_string(BOY_WANTS).unwrap(),
        "(w / want-01\n\t:ARG0 (b / boy)\n\t:ARG1 (g / go-02\n\t\t:ARG0 b))"
    );
}

// ---------------------------------------------------------------------------
// triples() / orderedLabels()
// ---------------------------------------------------------------------------

#[wasm_bindgen_test]
fn triples_start_with_root_instance() {
    let json = triples(BOY_WANTS, false).unwrap();
    let rows: Vec<Vec<String>> = serde_json::from_str(&json).unwrap();
    assert_eq!(rows[0], ["w", ":instance", "want-01"]);
    assert_eq!(rows.len(), 6);
}

#[wasm_bindgen_test]
fn ordered_labels_follow_edge_order() {
    let json = ordered_labels(BOY_WANTS).unwrap();
    let labels: Vec<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(labels, ["want-01", "go-02", "boy"]);
}
