//! Save the relay URL to the config file

use crate::config::{config_file, Config};
use crate::relay::RelayClient;
use crate::render;
use anyhow::Result;

pub async fn run(url: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set_relay_url(url)?;
    config.save()?;

    cliclack::log::success(format!(
        "Relay set to {} (saved in {})",
        config.relay_url,
        config_file().display()
    ))?;

    // Probe so a typo shows up now rather than on the next command
    let client = RelayClient::new(&config.relay_url)?;
    match client.health().await {
        Ok(report) => println!("{}", render::health_line(&report)),
        Err(e) => cliclack::log::warning(format!("Relay not reachable yet: {:#}", e))?,
    }

    Ok(())
}
