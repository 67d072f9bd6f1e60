//! Style rules for cluster coloring
//!
//! The renderer is styled with selector/property rules in the Cytoscape
//! stylesheet model. One rule is generated per palette entry. Nodes whose
//! cluster id is past the end of the palette match no cluster rule and keep
//! the default node style.

use crate::layout::Palette;

/// Fill color of nodes that match no cluster rule
pub const DEFAULT_NODE_COLOR: &str = "#999999";

/// Line color of edges
pub const DEFAULT_EDGE_COLOR: &str = "#cccccc";

/// A selector plus the style properties it applies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// Stylesheet selector, e.g. `node[cluster = 2]`
    pub selector: String,

    /// Property name/value pairs in application order
    pub properties: Vec<(&'static str, String)>,
}

impl StyleRule {
    fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            properties: Vec::new(),
        }
    }

    fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.properties.push((name, value.into()));
        self
    }

    /// Value of a property, if set by this rule
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Palette color for a cluster, `None` when the id is past the palette
pub fn color_for_cluster(palette: &Palette, cluster: u32) -> Option<&str> {
    palette.get(cluster)
}

/// Base node rule, base edge rule, then one rule per palette entry.
///
/// # Examples
///
/// ```
/// use docgraph_domain::{cluster_style_rules, Palette};
///
/// let rules = cluster_style_rules(&Palette::default());
/// assert_eq!(rules.len(), 2 + 8);
/// assert_eq!(rules[2].selector, "node[cluster = 0]");
/// ```
pub fn cluster_style_rules(palette: &Palette) -> Vec<StyleRule> {
    let mut rules = Vec::with_capacity(palette.len() + 2);

    rules.push(
        StyleRule::new("node")
            .with("label", "data(label)")
            .with("background-color", DEFAULT_NODE_COLOR)
            .with("color", "#111827")
            .with("font-size", "12px")
            .with("text-valign", "center")
            .with("text-halign", "center"),
    );

    rules.push(
        StyleRule::new("edge")
            .with("label", "data(label)")
            .with("width", "2")
            .with("line-color", DEFAULT_EDGE_COLOR)
            .with("target-arrow-color", DEFAULT_EDGE_COLOR)
            .with("target-arrow-shape", "triangle")
            .with("curve-style", "bezier")
            .with("font-size", "10px")
            .with("text-rotation", "autorotate"),
    );

    for (cluster, color) in palette.iter().enumerate() {
        rules.push(
            StyleRule::new(format!("node[cluster = {}]", cluster)).with("background-color", color),
        );
    }

    rules
}
