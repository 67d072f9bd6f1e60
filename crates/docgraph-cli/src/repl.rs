//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! A session keeps one [`Controller`]: the current document, its graph and
//! the chat transcript live for as long as the REPL runs.

use crate::cli::GraphFormat;
use crate::commands::emit_graph;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use docgraph_domain::{DocumentKind, LayoutConfig};
use docgraph_sdk::{Controller, DocGraphClient, Outcome, UploadFile};
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use std::path::PathBuf;

/// Run the interactive REPL.
pub async fn run_repl(
    client: &DocGraphClient,
    config: &Config,
    layout: &LayoutConfig,
    formatter: &Formatter,
) -> Result<()> {
    println!("{}", formatter.info("docgraph REPL - Type 'help' for commands, 'exit' to quit"));
    println!("{}", formatter.info(&format!("Document service: {}", client.base_url())));
    println!();

    let editor_config = EditorConfig::builder()
        .max_history_size(config.settings.history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut session = Session {
        controller: Controller::new(),
        client,
        layout,
        formatter,
    };

    loop {
        let prompt = session.prompt();

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) = session.execute(cmd).await {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Upload {
        file: PathBuf,
        kind: Option<DocumentKind>,
    },
    Open {
        upload_id: String,
        kind: DocumentKind,
    },
    Ask(String),
    Graph {
        format: GraphFormat,
        output: Option<PathBuf>,
    },
    Transcript,
    Status,
    Clear,
}

/// Parse a REPL command line.
///
/// A command word only counts as a command when its arguments fit;
/// anything else is sent as a question.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }
    let args = &parts[1..];

    match (parts[0], args.len()) {
        ("exit" | "quit" | "q", 0) => Ok(ReplCommand::Exit),
        ("help" | "?", 0) => Ok(ReplCommand::Help),
        ("upload", 0..=2) => parse_upload_command(args),
        ("open", 0..=2) => parse_open_command(args),
        ("ask", 0) => Err(CliError::InvalidInput("Usage: ask <question>".to_string())),
        ("ask", _) => Ok(ReplCommand::Ask(args.join(" "))),
        ("graph", 0) => Ok(ReplCommand::Graph {
            format: GraphFormat::Table,
            output: None,
        }),
        ("graph", 1..=2) => match GraphFormat::parse(args[0]) {
            Some(format) => Ok(ReplCommand::Graph {
                format,
                output: args.get(1).map(PathBuf::from),
            }),
            None => Ok(ReplCommand::Ask(line.to_string())),
        },
        ("transcript" | "history", 0) => Ok(ReplCommand::Transcript),
        ("status", 0) => Ok(ReplCommand::Status),
        ("clear", 0) => Ok(ReplCommand::Clear),
        _ => Ok(ReplCommand::Ask(line.to_string())),
    }
}

fn parse_upload_command(args: &[&str]) -> Result<ReplCommand> {
    let file = args
        .first()
        .ok_or_else(|| CliError::InvalidInput("Usage: upload <file> [csv|pdf]".to_string()))?;
    let kind = args.get(1).map(|s| parse_kind(s)).transpose()?;

    Ok(ReplCommand::Upload {
        file: PathBuf::from(file),
        kind,
    })
}

fn parse_open_command(args: &[&str]) -> Result<ReplCommand> {
    let upload_id = args
        .first()
        .ok_or_else(|| CliError::InvalidInput("Usage: open <upload-id> [csv|pdf]".to_string()))?;
    let kind = match args.get(1) {
        Some(s) => parse_kind(s)?,
        None => DocumentKind::Pdf,
    };

    Ok(ReplCommand::Open {
        upload_id: upload_id.to_string(),
        kind,
    })
}

fn parse_kind(s: &str) -> Result<DocumentKind> {
    DocumentKind::parse(s)
        .ok_or_else(|| CliError::InvalidInput(format!("Unknown document kind: {}. Use csv or pdf.", s)))
}

/// State shared by the commands of one REPL run.
struct Session<'a> {
    controller: Controller,
    client: &'a DocGraphClient,
    layout: &'a LayoutConfig,
    formatter: &'a Formatter,
}

impl Session<'_> {
    fn prompt(&self) -> String {
        match (self.controller.upload_id(), self.controller.document_kind()) {
            (Some(id), Some(kind)) => format!("docgraph [{} {}]> ", kind, id),
            _ => "docgraph (no document)> ".to_string(),
        }
    }

    async fn execute(&mut self, cmd: ReplCommand) -> Result<()> {
        match cmd {
            ReplCommand::Upload { file, kind } => self.upload(file, kind).await,
            ReplCommand::Open { upload_id, kind } => self.open(upload_id, kind).await,
            ReplCommand::Ask(question) => self.ask(question).await,
            ReplCommand::Graph { format, output } => self.graph(format, output).await,
            ReplCommand::Transcript => {
                println!(
                    "{}",
                    self.formatter.format_transcript(self.controller.transcript())?
                );
                Ok(())
            }
            ReplCommand::Status => {
                println!("{}", self.formatter.format_status(&self.controller));
                Ok(())
            }
            ReplCommand::Clear => {
                self.controller.clear();
                println!("{}", self.formatter.success("Cleared the current document"));
                Ok(())
            }
            ReplCommand::Exit | ReplCommand::Help => Ok(()),
        }
    }

    async fn upload(&mut self, path: PathBuf, kind: Option<DocumentKind>) -> Result<()> {
        let file = UploadFile::read(&path).await?;
        let outcome = self.controller.submit_file(self.client, file, kind).await?;

        if outcome != Outcome::Applied {
            let message = self.controller.error_message().unwrap_or("Upload failed");
            return Err(CliError::Failed(message.to_string()));
        }

        if let Some(message) = self.controller.status_message() {
            println!("{}", self.formatter.success(message));
        }
        self.report_document();
        Ok(())
    }

    async fn open(&mut self, upload_id: String, kind: DocumentKind) -> Result<()> {
        if let Some(ticket) = self.controller.resume(upload_id, kind) {
            self.controller.load_graph(self.client, ticket).await;
        }
        self.report_document();
        Ok(())
    }

    async fn ask(&mut self, question: String) -> Result<()> {
        if self.controller.upload_id().is_none() {
            return Err(CliError::NoDocument);
        }

        self.controller.set_input(question);
        match self.controller.submit_question(self.client).await {
            Outcome::Skipped => Err(CliError::InvalidInput("Question must not be empty".to_string())),
            _ => {
                if let Some(turn) = self.controller.transcript().last() {
                    println!("{}", self.formatter.format_turn(turn)?);
                }
                Ok(())
            }
        }
    }

    async fn graph(&mut self, format: GraphFormat, output: Option<PathBuf>) -> Result<()> {
        let kind = self.controller.document_kind().ok_or(CliError::NoDocument)?;
        if !kind.has_graph() {
            println!(
                "{}",
                self.formatter.warning("Graphs are only extracted from PDF documents")
            );
            return Ok(());
        }

        // Retry after an earlier failure or an empty extraction
        if self.controller.graph().is_empty()
            && self.controller.refresh_graph(self.client).await == Outcome::Failed
        {
            let message = self.controller.error_message().unwrap_or("Failed to load graph");
            return Err(CliError::Failed(message.to_string()));
        }

        let title = format!(
            "docgraph: upload {}",
            self.controller.upload_id().unwrap_or_default()
        );
        emit_graph(
            self.controller.graph(),
            format,
            output.as_deref(),
            &title,
            self.layout,
            self.formatter,
        )
    }

    fn report_document(&self) {
        if let Some(id) = self.controller.upload_id() {
            println!("{}", self.formatter.info(&format!("Upload id: {}", id)));
        }
        if self.controller.document_kind().is_some_and(|k| k.has_graph()) {
            let graph = self.controller.graph();
            println!(
                "{}",
                self.formatter.info(&format!(
                    "Graph: {} node(s), {} edge(s)",
                    graph.node_count(),
                    graph.edge_count()
                ))
            );
        }
        if let Some(error) = self.controller.error_message() {
            eprintln!("{}", self.formatter.warning(error));
        }
    }
}

fn editor_error(err: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!(
        "Failed to initialize editor: {}",
        err
    )))
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  upload <file> [csv|pdf]        - Upload a document (kind from extension by default)");
    println!("  open <upload-id> [csv|pdf]     - Continue with an earlier upload (default: pdf)");
    println!("  ask <question>                 - Ask about the current document");
    println!("  <question>                     - Same as ask");
    println!("  graph [format] [file]          - Show the graph of the current PDF");
    println!("    format: table|json|cytoscape|html|dot (default: table)");
    println!("  transcript                     - Show questions and answers so far");
    println!("  status                         - Show the current document and state");
    println!("  clear                          - Forget the current document");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upload() {
        assert_eq!(
            parse_repl_command("upload report.pdf").unwrap(),
            ReplCommand::Upload {
                file: PathBuf::from("report.pdf"),
                kind: None,
            }
        );
        assert_eq!(
            parse_repl_command("upload data.txt csv").unwrap(),
            ReplCommand::Upload {
                file: PathBuf::from("data.txt"),
                kind: Some(DocumentKind::Csv),
            }
        );
        assert!(parse_repl_command("upload").is_err());
        assert!(parse_repl_command("upload a.pdf docx").is_err());
    }

    #[test]
    fn test_parse_open_defaults_to_pdf() {
        assert_eq!(
            parse_repl_command("open 42").unwrap(),
            ReplCommand::Open {
                upload_id: "42".to_string(),
                kind: DocumentKind::Pdf,
            }
        );
    }

    #[test]
    fn test_bare_text_is_a_question() {
        assert_eq!(
            parse_repl_command("who wrote   this?").unwrap(),
            ReplCommand::Ask("who wrote   this?".to_string())
        );
        assert_eq!(
            parse_repl_command("ask who wrote   this?").unwrap(),
            ReplCommand::Ask("who wrote this?".to_string())
        );
        assert!(parse_repl_command("ask").is_err());
    }

    #[test]
    fn test_parse_graph() {
        assert_eq!(
            parse_repl_command("graph").unwrap(),
            ReplCommand::Graph {
                format: GraphFormat::Table,
                output: None,
            }
        );
        assert_eq!(
            parse_repl_command("graph html out.html").unwrap(),
            ReplCommand::Graph {
                format: GraphFormat::Html,
                output: Some(PathBuf::from("out.html")),
            }
        );
        assert_eq!(
            parse_repl_command("graph svg").unwrap(),
            ReplCommand::Ask("graph svg".to_string())
        );
    }

    #[test]
    fn test_command_words_in_questions_are_asked() {
        for line in [
            "clear up how X relates to Y?",
            "status of the merger?",
            "graph theory used?",
            "graph json is what format exactly?",
            "transcript of the meeting?",
            "help me understand section 2",
            "open the second chapter please",
            "q is a variable here?",
        ] {
            assert_eq!(
                parse_repl_command(line).unwrap(),
                ReplCommand::Ask(line.to_string()),
                "{}",
                line
            );
        }
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_repl_command("q").unwrap(), ReplCommand::Exit);
        assert_eq!(parse_repl_command("?").unwrap(), ReplCommand::Help);
        assert_eq!(parse_repl_command("status").unwrap(), ReplCommand::Status);
        assert_eq!(parse_repl_command("clear").unwrap(), ReplCommand::Clear);
        assert_eq!(parse_repl_command("transcript").unwrap(), ReplCommand::Transcript);
    }

    #[tokio::test]
    async fn test_ask_without_document() {
        let client = DocGraphClient::new("http://127.0.0.1:9");
        let layout = LayoutConfig::default();
        let formatter = Formatter::new(crate::config::OutputFormat::Quiet, false);
        let mut session = Session {
            controller: Controller::new(),
            client: &client,
            layout: &layout,
            formatter: &formatter,
        };

        let result = session.execute(ReplCommand::Ask("hello".to_string())).await;
        assert!(matches!(result, Err(CliError::NoDocument)));
        assert!(session.controller.transcript().is_empty());
        assert_eq!(session.prompt(), "docgraph (no document)> ");
    }
}
