//! Open the relay's browser dashboard

use anyhow::Result;

pub async fn open(relay_url: &str) -> Result<()> {
    println!("Opening dashboard...");
    println!("If browser doesn't open, visit: {}", relay_url);

    if let Err(e) = open::that(relay_url) {
        tracing::warn!("Failed to open browser: {}", e);
    }

    Ok(())
}
