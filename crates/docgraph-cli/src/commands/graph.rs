//! Graph command implementation.

use crate::cli::{GraphArgs, GraphFormat};
use crate::error::Result;
use crate::output::Formatter;
use crate::render;
use docgraph_domain::{LayoutConfig, Projection};
use docgraph_sdk::DocGraphClient;
use std::fs;
use std::path::Path;

/// Execute the graph command.
pub async fn execute_graph(
    args: GraphArgs,
    client: &DocGraphClient,
    layout: &LayoutConfig,
    formatter: &Formatter,
) -> Result<()> {
    let graph = client.fetch_projection(&args.upload_id).await?;
    let title = format!("docgraph: upload {}", args.upload_id);
    emit_graph(&graph, args.render, args.output.as_deref(), &title, layout, formatter)
}

/// Render a projection and print it or write it to `output`.
pub fn emit_graph(
    graph: &Projection,
    format: GraphFormat,
    output: Option<&Path>,
    title: &str,
    layout: &LayoutConfig,
    formatter: &Formatter,
) -> Result<()> {
    let rendered = render_graph(graph, format, title, layout, formatter)?;

    match output {
        Some(path) => {
            fs::write(path, rendered)?;
            println!(
                "{}",
                formatter.success(&format!(
                    "Wrote graph ({} nodes, {} edges) to {}",
                    graph.node_count(),
                    graph.edge_count(),
                    path.display()
                ))
            );
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn render_graph(
    graph: &Projection,
    format: GraphFormat,
    title: &str,
    layout: &LayoutConfig,
    formatter: &Formatter,
) -> Result<String> {
    Ok(match format {
        GraphFormat::Table => formatter.format_graph(graph)?,
        GraphFormat::Json => serde_json::to_string_pretty(&render::projection_json(graph))?,
        GraphFormat::Cytoscape => {
            serde_json::to_string_pretty(&render::cytoscape_document(graph, layout))?
        }
        GraphFormat::Html => render::html_page(title, graph, layout),
        GraphFormat::Dot => render::dot(graph, layout),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use docgraph_domain::{project, ClusterMap, Triple};

    #[test]
    fn test_emit_graph_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.dot");
        let graph = project(&[Triple::new("A", "knows", "B")], &ClusterMap::new());
        let formatter = Formatter::new(OutputFormat::Table, false);

        emit_graph(
            &graph,
            GraphFormat::Dot,
            Some(&path),
            "test",
            &LayoutConfig::default(),
            &formatter,
        )
        .unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"A\" -> \"B\" [label=\"knows\"]"));
    }

    #[test]
    fn test_render_cytoscape_is_json() {
        let graph = project(&[Triple::new("A", "knows", "B")], &ClusterMap::new());
        let formatter = Formatter::new(OutputFormat::Table, false);
        let out = render_graph(
            &graph,
            GraphFormat::Cytoscape,
            "t",
            &LayoutConfig::default(),
            &formatter,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["layout"]["name"], render::LAYOUT_NAME);
    }
}
