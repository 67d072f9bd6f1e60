//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::render;
use colored::*;
use docgraph_domain::{ChatTurn, Projection, Transcript};
use docgraph_sdk::{Controller, UploadReceipt};
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an upload receipt.
    pub fn format_receipt(&self, receipt: &UploadReceipt) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "message": receipt.message,
                "upload_id": receipt.upload_id,
            }))?),
            OutputFormat::Table => Ok(self.success(&format!(
                "{} (upload id: {})",
                receipt.message, receipt.upload_id
            ))),
            OutputFormat::Quiet => Ok(receipt.upload_id.clone()),
        }
    }

    /// Format a single chat turn.
    pub fn format_turn(&self, turn: &ChatTurn) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&turn_json(turn))?),
            OutputFormat::Quiet => Ok(turn.answer.clone()),
            OutputFormat::Table => {
                let mut out = format!(
                    "{} {}\n{} {}",
                    self.colorize("Q:", "cyan"),
                    turn.question,
                    self.colorize("A:", "magenta"),
                    if turn.failed {
                        self.colorize(&turn.answer, "red")
                    } else {
                        turn.answer.clone()
                    }
                );
                if let Some(meta) = turn_metadata(turn) {
                    out.push('\n');
                    out.push_str(&self.colorize(&meta, "blue"));
                }
                Ok(out)
            }
        }
    }

    /// Format the whole transcript.
    pub fn format_transcript(&self, transcript: &Transcript) -> Result<String> {
        if let OutputFormat::Json = self.format {
            let turns: Vec<Value> = transcript.turns().map(turn_json).collect();
            return Ok(serde_json::to_string_pretty(&turns)?);
        }

        if transcript.is_empty() {
            return Ok(self.colorize("No questions asked yet.", "yellow"));
        }

        let parts = transcript
            .turns()
            .map(|t| self.format_turn(t))
            .collect::<Result<Vec<_>>>()?;
        Ok(parts.join("\n\n"))
    }

    /// Format the projected graph as node and edge tables.
    pub fn format_graph(&self, graph: &Projection) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&render::projection_json(graph))?),
            OutputFormat::Quiet => Ok(graph
                .nodes
                .iter()
                .map(|n| n.id.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => self.format_graph_tables(graph),
        }
    }

    fn format_graph_tables(&self, graph: &Projection) -> Result<String> {
        if graph.is_empty() {
            return Ok(self.colorize("Graph is empty.", "yellow"));
        }

        let mut nodes = Builder::default();
        nodes.push_record(["Node", "Cluster"]);
        for node in &graph.nodes {
            nodes.push_record([node.label.clone(), node.cluster.to_string()]);
        }
        let mut nodes = nodes.build();
        nodes
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut edges = Builder::default();
        edges.push_record(["Source", "Relation", "Target"]);
        for edge in &graph.edges {
            edges.push_record([edge.source.as_str(), edge.label.as_str(), edge.target.as_str()]);
        }
        let mut edges = edges.build();
        edges
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        Ok(format!(
            "{}\n{}\n\n{}",
            self.info(&format!(
                "{} node(s), {} edge(s), {} cluster(s)",
                graph.node_count(),
                graph.edge_count(),
                graph.clusters().len()
            )),
            nodes,
            edges
        ))
    }

    /// Format the controller state for the REPL `status` command.
    pub fn format_status(&self, controller: &Controller) -> String {
        let mut lines = Vec::new();
        match (controller.upload_id(), controller.document_kind()) {
            (Some(id), Some(kind)) => lines.push(format!("Document: {} (upload id: {})", kind, id)),
            _ => lines.push("Document: none".to_string()),
        }
        if let Some(message) = controller.status_message() {
            lines.push(format!("Status: {}", message));
        }
        lines.push(format!(
            "Graph: {} node(s), {} edge(s)",
            controller.graph().node_count(),
            controller.graph().edge_count()
        ));
        lines.push(format!("Transcript: {} turn(s)", controller.transcript().len()));
        if let Some(error) = controller.error_message() {
            lines.push(self.error(error));
        }
        lines.join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn turn_json(turn: &ChatTurn) -> Value {
    json!({
        "question": turn.question,
        "answer": turn.answer,
        "query_time": turn.query_time,
        "token_usage": turn.token_usage,
        "failed": turn.failed,
    })
}

fn turn_metadata(turn: &ChatTurn) -> Option<String> {
    match (turn.query_time, turn.token_usage) {
        (Some(t), Some(tokens)) => Some(format!("({:.2}s, {} tokens)", t, tokens)),
        (Some(t), None) => Some(format!("({:.2}s)", t)),
        (None, Some(tokens)) => Some(format!("({} tokens)", tokens)),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgraph_domain::{project, ClusterMap, Triple};

    fn turn() -> ChatTurn {
        ChatTurn {
            question: "Who?".to_string(),
            answer: "Ada".to_string(),
            query_time: Some(0.5),
            token_usage: Some(33),
            failed: false,
        }
    }

    #[test]
    fn test_turn_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let out = formatter.format_turn(&turn()).unwrap();
        assert_eq!(out, "Q: Who?\nA: Ada\n(0.50s, 33 tokens)");
    }

    #[test]
    fn test_turn_quiet_and_json() {
        let quiet = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(quiet.format_turn(&turn()).unwrap(), "Ada");

        let json = Formatter::new(OutputFormat::Json, false);
        let out = json.format_turn(&turn()).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["token_usage"], 33);
    }

    #[test]
    fn test_empty_transcript() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let out = formatter.format_transcript(&Transcript::new()).unwrap();
        assert!(out.contains("No questions asked yet"));
    }

    #[test]
    fn test_receipt_formats() {
        let receipt = UploadReceipt {
            message: "PDF uploaded successfully".to_string(),
            upload_id: "4".to_string(),
        };
        let quiet = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(quiet.format_receipt(&receipt).unwrap(), "4");

        let table = Formatter::new(OutputFormat::Table, false);
        assert_eq!(
            table.format_receipt(&receipt).unwrap(),
            "✓ PDF uploaded successfully (upload id: 4)"
        );
    }

    #[test]
    fn test_graph_tables() {
        let graph = project(&[Triple::new("A", "knows", "B")], &ClusterMap::new());
        let formatter = Formatter::new(OutputFormat::Table, false);
        let out = formatter.format_graph(&graph).unwrap();
        assert!(out.contains("2 node(s), 1 edge(s), 1 cluster(s)"));
        assert!(out.contains("Relation"));
        assert!(out.contains("knows"));
    }

    #[test]
    fn test_status_without_document() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let out = formatter.format_status(&Controller::new());
        assert!(out.starts_with("Document: none"));
        assert!(out.contains("Transcript: 0 turn(s)"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
