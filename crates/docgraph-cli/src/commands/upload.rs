//! Upload command implementation.

use crate::cli::UploadArgs;
use crate::commands::emit_graph;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use docgraph_domain::LayoutConfig;
use docgraph_sdk::{Controller, DocGraphClient, Outcome, UploadFile, UploadReceipt};

/// Execute the upload command.
pub async fn execute_upload(
    args: UploadArgs,
    client: &DocGraphClient,
    layout: &LayoutConfig,
    formatter: &Formatter,
) -> Result<()> {
    let file = UploadFile::read(&args.file).await?;
    let file_name = file.file_name.clone();

    let mut controller = Controller::new();
    let outcome = controller
        .submit_file(client, file, args.kind.map(Into::into))
        .await?;

    if outcome != Outcome::Applied {
        let message = controller
            .error_message()
            .unwrap_or("Upload failed")
            .to_string();
        return Err(CliError::Failed(message));
    }

    let receipt = UploadReceipt {
        message: controller
            .status_message()
            .unwrap_or("Upload complete")
            .to_string(),
        upload_id: controller.upload_id().unwrap_or_default().to_string(),
    };
    println!("{}", formatter.format_receipt(&receipt)?);

    // Graph failures do not undo the upload
    if let Some(error) = controller.error_message() {
        eprintln!("{}", formatter.warning(error));
    }

    if let Some(format) = args.graph {
        if controller.document_kind().is_some_and(|k| k.has_graph()) {
            emit_graph(
                controller.graph(),
                format,
                args.output.as_deref(),
                &file_name,
                layout,
                formatter,
            )?;
        } else {
            eprintln!(
                "{}",
                formatter.warning("Graphs are only extracted from PDF documents")
            );
        }
    }

    Ok(())
}
