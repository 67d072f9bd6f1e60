//! docgraph - command-line client for the document graph service.

use clap::Parser;
use docgraph_cli::commands;
use docgraph_cli::config::DEFAULT_SERVER_URL;
use docgraph_cli::repl;
use docgraph_cli::{Cli, Command, Config, Formatter};
use docgraph_sdk::DocGraphClient;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; RUST_LOG takes precedence over -v flags.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> docgraph_cli::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let command = match cli.command.unwrap_or(Command::Repl) {
        // Profile commands never talk to the service
        Command::Profile(args) => {
            return commands::execute_profile(args, &mut config, &formatter).await;
        }
        command => command,
    };

    let layout = config.layout_config()?;
    let client = build_client(cli.server.as_deref(), &config)?;
    tracing::debug!(server = %client.base_url(), "Using document service");

    match command {
        Command::Repl => repl::run_repl(&client, &config, &layout, &formatter).await,
        Command::Upload(args) => commands::execute_upload(args, &client, &layout, &formatter).await,
        Command::Ask(args) => commands::execute_ask(args, &client, &formatter).await,
        Command::Graph(args) => commands::execute_graph(args, &client, &layout, &formatter).await,
        Command::Health => commands::execute_health(&client, &formatter).await,
        Command::Profile(_) => unreachable!(),
    }
}

/// Server URL precedence: --server / DOCGRAPH_SERVER, then the active profile, then the default.
fn build_client(server: Option<&str>, config: &Config) -> docgraph_cli::Result<DocGraphClient> {
    let profile = config.get_active_profile().ok();
    let url = server
        .map(str::to_string)
        .or_else(|| profile.map(|p| p.server_url.clone()))
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

    match profile.and_then(|p| p.timeout_secs) {
        Some(secs) => Ok(DocGraphClient::with_timeout(&url, Duration::from_secs(secs))?),
        None => Ok(DocGraphClient::new(&url)),
    }
}
