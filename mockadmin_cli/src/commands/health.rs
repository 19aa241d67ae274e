//! MockServer health commands

use crate::relay::RelayClient;
use crate::render;
use anyhow::Result;
use console::style;
use std::time::Duration;

/// Check once; fails when MockServer is not healthy
pub async fn check(client: &RelayClient) -> Result<()> {
    let report = client.health().await?;
    println!("{}", render::health_line(&report));

    if !report.ok {
        anyhow::bail!("MockServer is not healthy");
    }
    Ok(())
}

/// Poll until interrupted; failures are printed, never fatal
pub async fn watch(client: &RelayClient, interval_secs: u64) -> Result<()> {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match client.health().await {
                    Ok(report) => println!("{}", render::health_line(&report)),
                    Err(e) => println!(
                        "{} Relay unreachable at {}: {:#}",
                        style("●").red(),
                        client.base_url(),
                        e
                    ),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}
