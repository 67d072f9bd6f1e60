//! Health command implementation.

use crate::error::Result;
use crate::output::Formatter;
use docgraph_sdk::DocGraphClient;

/// Execute the health command.
pub async fn execute_health(client: &DocGraphClient, formatter: &Formatter) -> Result<()> {
    client.health().await?;
    println!(
        "{}",
        formatter.success(&format!("Document service at {} is up", client.base_url()))
    );
    Ok(())
}
