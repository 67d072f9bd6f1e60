//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use docgraph_domain::DocumentKind;
use std::path::PathBuf;

/// docgraph - Upload documents, explore their relation graph, ask questions.
#[derive(Debug, Parser)]
#[command(name = "docgraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Document service URL (overrides the profile)
    #[arg(short, long, global = true, env = "DOCGRAPH_SERVER")]
    pub server: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (identifiers and answers only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upload a CSV or PDF document
    Upload(UploadArgs),

    /// Ask a question about an uploaded document
    Ask(AskArgs),

    /// Fetch and render the relation graph of an uploaded PDF
    Graph(GraphArgs),

    /// Check that the document service is reachable
    Health,

    /// Manage configuration profiles
    Profile(ProfileArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the upload command.
#[derive(Debug, Parser)]
pub struct UploadArgs {
    /// File to upload
    pub file: PathBuf,

    /// Document kind (inferred from the extension when omitted)
    #[arg(short, long, value_enum)]
    pub kind: Option<KindArg>,

    /// Also fetch and render the graph after a PDF upload
    #[arg(short, long, value_enum)]
    pub graph: Option<GraphFormat>,

    /// Write the rendered graph to this file instead of stdout
    #[arg(short, long, requires = "graph")]
    pub output: Option<PathBuf>,
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// Upload identifier returned by `upload`
    pub upload_id: String,

    /// Question text
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,

    /// Kind of the uploaded document (selects the chat endpoint)
    #[arg(short, long, value_enum, default_value = "pdf")]
    pub kind: KindArg,
}

/// Arguments for the graph command.
#[derive(Debug, Parser)]
pub struct GraphArgs {
    /// Upload identifier returned by `upload`
    pub upload_id: String,

    /// Graph output format
    #[arg(short = 'g', long = "as", value_enum, default_value = "table")]
    pub render: GraphFormat,

    /// Write the output to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Graph output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum GraphFormat {
    /// Node and edge tables
    Table,
    /// Raw projection as JSON
    Json,
    /// Cytoscape document (elements, style, layout)
    Cytoscape,
    /// Standalone HTML page
    Html,
    /// Graphviz DOT
    Dot,
}

impl GraphFormat {
    /// Parse a format name (REPL input)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(GraphFormat::Table),
            "json" => Some(GraphFormat::Json),
            "cytoscape" | "cy" => Some(GraphFormat::Cytoscape),
            "html" => Some(GraphFormat::Html),
            "dot" => Some(GraphFormat::Dot),
            _ => None,
        }
    }
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Document service URL
        #[arg(short, long)]
        url: String,
        /// Request timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Document kind argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum KindArg {
    /// CSV document
    Csv,
    /// PDF document
    Pdf,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Csv => DocumentKind::Csv,
            KindArg::Pdf => DocumentKind::Pdf,
        }
    }
}
