//! WebAssembly bindings for the amrgraph core library.
//!
//! Exposes the graph rendering and inspection APIs to JavaScript/TypeScript
//! via `wasm-bindgen`. Compile with `wasm-pack build` to produce an npm-ready
//! package that works in browsers, Node.js, and any other WASM host.
//!
//! Every function takes a graph as a JSON string (one graph object, or an
//! array for [`render`]) and returns plain strings.
//!
//! ```js
//! import init, { render, triples, validate } from './amrgraph_wasm.js';
//! await init();
//!
//! validate(graphJson);                 // throws if invalid
//! console.log(render(graphJson));      // header block + expression
//! const rows = JSON.parse(triples(graphJson, true));
//! ```

use amrgraph::{load_graphs, validate_graph, DanglingPolicy, Graph};
use wasm_bindgen::prelude::*;

/// One-time initialisation called at the start of every exported function.
///
/// Installs the `console_error_panic_hook` when the feature is enabled so
/// that Rust panics are forwarded to the browser console as readable errors
/// rather than appearing as generic "unreachable" WASM traps.
fn setup() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn parse_graph(json: &str) -> Result<Graph, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("parse error: {e}")))
}

/// Validate a graph given as a JSON string.
///
/// Returns `undefined` on success. Throws a descriptive string on failure
/// (either a JSON parse error or a dangling reference / malformed role).
///
/// ```js
/// validate(graphJson); // throws if invalid
/// ```
#[wasm_bindgen]
pub fn validate(json: &str) -> Result<(), JsValue> {
    setup();
    let graph = parse_graph(json)?;
    validate_graph(&graph).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render one graph or an array of graphs in the full text form: header
/// block, canonical expression, blank line.
///
/// Pass `strict = true` to throw on dangling references instead of rendering
/// placeholders.
///
/// ```js
/// const text = render(graphJson);
/// const text = render(JSON.stringify([g1, g2]), true);
/// ```
#[wasm_bindgen]
pub fn render(json: &str, strict: Option<bool>) -> Result<String, JsValue> {
    setup();
    let policy = if strict.unwrap_or(false) {
        DanglingPolicy::Reject
    } else {
        DanglingPolicy::Tolerate
    };
    let graphs = load_graphs(json, policy).map_err(|e| JsValue::from_str(&e.to_string()))?;
    if graphs.is_empty() {
        return Err(JsValue::from_str("input array is empty"));
    }
    Ok(graphs.iter().map(Graph::amr_string).collect())
}

/// Render only the canonical nested-parenthesis expression of one graph.
#[wasm_bindgen(js_name = graphString)]
pub fn graph_string(json: &str) -> Result<String, JsValue> {
    setup();
    Ok(parse_graph(json)?.graph_string())
}

/// Flatten one graph into triples, returned as a JSON array of
/// `[source, role, target]` arrays.
///
/// ```js
/// const rows = JSON.parse(triples(graphJson, true));
/// // [["w", ":instance", "want-01"], ["w", ":ARG0", "b"], ...]
/// ```
#[wasm_bindgen]
pub fn triples(json: &str, normalize_inverse: bool) -> Result<String, JsValue> {
    setup();
    let graph = parse_graph(json)?;
    let rows: Vec<[&str; 3]> = graph
        .triples(normalize_inverse)
        .map(|t| [t.source, t.role, t.target])
        .collect();
    serde_json::to_string(&rows).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Node labels breadth-first from the root, as a JSON array of strings.
#[wasm_bindgen(js_name = orderedLabels)]
pub fn ordered_labels(json: &str) -> Result<String, JsValue> {
    setup();
    let graph = parse_graph(json)?;
    serde_json::to_string(&graph.ordered_node_labels())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
