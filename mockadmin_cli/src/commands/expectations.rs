//! Expectation commands (list, create, delete, reset)

use crate::relay::RelayClient;
use crate::render;
use anyhow::Result;
use cliclack::confirm;
use console::style;
use mockadmin_common::{ExpectationDraft, ExpectationSelector};

/// Options for creating an expectation
#[derive(Debug, Clone)]
pub struct CreateOptions {
    pub method: String,
    pub path: String,
    pub body: Option<String>,
    pub status: Option<u16>,
    pub response_body: Option<String>,
}

/// Print the active expectations
pub async fn list(client: &RelayClient, with_bodies: bool) -> Result<()> {
    let rows = client.expectation_rows().await?;
    println!("{}", render::expectation_table(&rows, with_bodies));
    Ok(())
}

pub async fn create(client: &RelayClient, opts: CreateOptions) -> Result<()> {
    let draft = ExpectationDraft {
        method: Some(opts.method),
        path: Some(opts.path),
        body: opts.body,
        status_code: opts.status,
        response_body: opts.response_body,
    };

    // Validate locally first so obvious mistakes never reach the relay
    let expectation = draft.clone().into_expectation()?;
    let result = client.create_expectation(&draft).await?;
    tracing::debug!("MockServer answered: {}", result);

    cliclack::log::success(format!(
        "Created expectation {} {} -> {}",
        style(&expectation.http_request.method).bold(),
        expectation.http_request.path,
        expectation.http_response.status_code
    ))?;
    Ok(())
}

pub async fn delete(client: &RelayClient, method: &str, path: &str, yes: bool) -> Result<()> {
    let selector = ExpectationSelector::new(method, path);
    let criteria = selector.clone().into_clear_criteria()?;
    let (method, path) = (&criteria.http_request.method, &criteria.http_request.path);

    if !yes
        && !confirm(format!("Delete expectations for {} {}?", method, path))
            .initial_value(false)
            .interact()?
    {
        cliclack::log::info("Nothing deleted")?;
        return Ok(());
    }

    client.delete_expectations(&selector).await?;
    cliclack::log::success(format!("Deleted expectations for {} {}", method, path))?;
    Ok(())
}

pub async fn reset(client: &RelayClient, yes: bool) -> Result<()> {
    if !yes
        && !confirm("Delete all expectations?")
            .initial_value(false)
            .interact()?
    {
        cliclack::log::info("Nothing deleted")?;
        return Ok(());
    }

    client.reset().await?;
    cliclack::log::success("All expectations deleted")?;
    Ok(())
}
