//! Graph rendering.
//!
//! Layout runs in the browser: the projection, the generated style rules and
//! the layout parameters are marshaled into a Cytoscape document and handed
//! to the `cose-bilkent` force-directed layout. DOT output is provided for
//! offline tooling.

use docgraph_domain::style::{DEFAULT_EDGE_COLOR, DEFAULT_NODE_COLOR};
use docgraph_domain::{cluster_style_rules, color_for_cluster, LayoutConfig, Projection};
use serde_json::{json, Map, Value};

/// Name of the layout extension the parameters are tuned for
pub const LAYOUT_NAME: &str = "cose-bilkent";

/// Cytoscape document: `{elements, style, layout}`.
pub fn cytoscape_document(graph: &Projection, layout: &LayoutConfig) -> Value {
    json!({
        "elements": elements(graph),
        "style": stylesheet(layout),
        "layout": layout_options(layout),
    })
}

/// Nodes and edges in Cytoscape element format.
///
/// Edges get positional ids so duplicate triples stay distinct elements.
pub fn elements(graph: &Projection) -> Value {
    let nodes: Vec<Value> = graph
        .nodes
        .iter()
        .map(|n| {
            json!({
                "data": {
                    "id": n.id,
                    "label": n.label,
                    "cluster": n.cluster,
                }
            })
        })
        .collect();

    let edges: Vec<Value> = graph
        .edges
        .iter()
        .enumerate()
        .map(|(i, e)| {
            json!({
                "data": {
                    "id": format!("e{}", i),
                    "source": e.source,
                    "target": e.target,
                    "label": e.label,
                }
            })
        })
        .collect();

    json!({ "nodes": nodes, "edges": edges })
}

/// Base rules plus one rule per palette color.
pub fn stylesheet(layout: &LayoutConfig) -> Value {
    let rules: Vec<Value> = cluster_style_rules(&layout.palette)
        .into_iter()
        .map(|rule| {
            let style: Map<String, Value> = rule
                .properties
                .into_iter()
                .map(|(name, value)| (name.to_string(), Value::String(value)))
                .collect();
            json!({ "selector": rule.selector, "style": style })
        })
        .collect();
    Value::Array(rules)
}

/// Layout options for the force-directed layout extension.
pub fn layout_options(layout: &LayoutConfig) -> Value {
    json!({
        "name": LAYOUT_NAME,
        "nodeRepulsion": layout.node_repulsion,
        "idealEdgeLength": layout.ideal_edge_length,
        "edgeElasticity": layout.edge_elasticity,
        "gravity": layout.gravity,
        "numIter": layout.num_iter,
        "padding": layout.padding,
        "tilingPaddingVertical": layout.tiling_padding_vertical,
        "tilingPaddingHorizontal": layout.tiling_padding_horizontal,
        "gravityRangeCompound": layout.gravity_range_compound,
        "gravityCompound": layout.gravity_compound,
        "initialEnergyOnIncremental": layout.initial_energy_on_incremental,
        "animate": false,
        "randomize": true,
    })
}

/// Raw projection as `{nodes, edges}`.
pub fn projection_json(graph: &Projection) -> Value {
    let nodes: Vec<Value> = graph
        .nodes
        .iter()
        .map(|n| json!({ "id": n.id, "label": n.label, "cluster": n.cluster }))
        .collect();
    let edges: Vec<Value> = graph
        .edges
        .iter()
        .map(|e| json!({ "source": e.source, "target": e.target, "label": e.label }))
        .collect();
    json!({ "nodes": nodes, "edges": edges })
}

/// Standalone page that loads Cytoscape and lays out the document.
pub fn html_page(title: &str, graph: &Projection, layout: &LayoutConfig) -> String {
    // `</` would end the script element early
    let document = cytoscape_document(graph, layout)
        .to_string()
        .replace("</", "<\\/");

    HTML_TEMPLATE
        .replace("{{TITLE}}", &escape_html(title))
        .replace("{{DOCUMENT}}", &document)
}

/// Graphviz digraph with cluster fill colors and edge labels.
pub fn dot(graph: &Projection, layout: &LayoutConfig) -> String {
    let mut out = String::from("digraph docgraph {\n");
    out.push_str("  node [shape=ellipse, style=filled, fontsize=12];\n");
    out.push_str(&format!(
        "  edge [color=\"{}\", fontsize=10];\n",
        DEFAULT_EDGE_COLOR
    ));

    for node in &graph.nodes {
        let fill = color_for_cluster(&layout.palette, node.cluster).unwrap_or(DEFAULT_NODE_COLOR);
        out.push_str(&format!(
            "  \"{}\" [label=\"{}\", fillcolor=\"{}\"];\n",
            escape_dot(&node.id),
            escape_dot(&node.label),
            fill
        ));
    }

    for edge in &graph.edges {
        out.push_str(&format!(
            "  \"{}\" -> \"{}\" [label=\"{}\"];\n",
            escape_dot(&edge.source),
            escape_dot(&edge.target),
            escape_dot(&edge.label)
        ));
    }

    out.push_str("}\n");
    out
}

fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const HTML_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>{{TITLE}}</title>
<script src="https://unpkg.com/cytoscape@3.28.1/dist/cytoscape.min.js"></script>
<script src="https://unpkg.com/layout-base@1.0.2/layout-base.js"></script>
<script src="https://unpkg.com/cose-base@1.0.3/cose-base.js"></script>
<script src="https://unpkg.com/cytoscape-cose-bilkent@4.1.0/cytoscape-cose-bilkent.js"></script>
<style>
*{box-sizing:border-box;margin:0;padding:0}
body{background:#f9fafb;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',sans-serif;height:100vh;display:flex;flex-direction:column}
#bar{padding:8px 16px;background:#fff;border-bottom:1px solid #e5e7eb;font-size:14px;font-weight:600;color:#111827}
#cy{flex:1}
</style>
</head>
<body>
<div id="bar">{{TITLE}}</div>
<div id="cy"></div>
<script>
const doc = {{DOCUMENT}};
if (window.cytoscapeCoseBilkent) { cytoscape.use(window.cytoscapeCoseBilkent); }
cytoscape({
  container: document.getElementById('cy'),
  elements: doc.elements,
  style: doc.style,
  layout: doc.layout
});
</script>
</body>
</html>
"##;
