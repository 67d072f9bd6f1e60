//! Ask command implementation.

use crate::cli::AskArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use docgraph_domain::{ChatTurn, DocumentKind};
use docgraph_sdk::{DocGraphClient, DocumentService};

/// Execute the ask command.
///
/// One-shot questions report service errors directly instead of recording a
/// generic failure turn.
pub async fn execute_ask(args: AskArgs, client: &DocGraphClient, formatter: &Formatter) -> Result<()> {
    let question = args.question.join(" ");
    let question = question.trim();
    if question.is_empty() {
        return Err(CliError::InvalidInput("Question must not be empty".to_string()));
    }
    if args.upload_id.trim().is_empty() {
        return Err(CliError::InvalidInput("Upload id must not be empty".to_string()));
    }

    let kind: DocumentKind = args.kind.into();
    let answer = client.ask(kind, &args.upload_id, question).await?;

    let turn = ChatTurn {
        question: question.to_string(),
        answer: answer.answer,
        query_time: answer.query_time,
        token_usage: answer.token_usage,
        failed: false,
    };
    println!("{}", formatter.format_turn(&turn)?);

    Ok(())
}
