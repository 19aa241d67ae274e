//! MockServer Admin CLI - manage MockServer from the terminal
//!
//! Usage:
//!   mockadmin connect <URL>            Save the relay URL
//!   mockadmin health [--watch]         Check MockServer health
//!   mockadmin list                     List active expectations
//!   mockadmin create -m GET -p /path   Create an expectation
//!   mockadmin delete -m GET -p /path   Delete matching expectations
//!   mockadmin reset                    Delete all expectations
//!   mockadmin logs [-i]                Browse recorded requests
//!   mockadmin dashboard                Open the browser dashboard

mod commands;
mod config;
mod relay;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mockadmin")]
#[command(author = "MockServer Admin Team")]
#[command(version)]
#[command(about = "Manage a MockServer instance through the admin relay", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Relay URL (overrides the config file)
    #[arg(long, global = true, env = "MOCKADMIN_URL")]
    relay_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Save the relay URL to the config file
    Connect {
        /// Relay URL, e.g. http://localhost:3000
        url: String,
    },

    /// Check MockServer health
    Health {
        /// Keep polling until interrupted
        #[arg(short, long)]
        watch: bool,

        /// Seconds between polls
        #[arg(long, default_value_t = 5)]
        interval: u64,
    },

    /// List active expectations
    List {
        /// Include request and response bodies
        #[arg(long)]
        bodies: bool,
    },

    /// Create an expectation
    Create {
        /// HTTP method to match
        #[arg(short, long)]
        method: String,

        /// Request path to match
        #[arg(short, long)]
        path: String,

        /// Request body to match exactly
        #[arg(long)]
        body: Option<String>,

        /// Response status code (default: 200)
        #[arg(long)]
        status: Option<u16>,

        /// Response body (default: {})
        #[arg(long)]
        response_body: Option<String>,
    },

    /// Delete expectations matching a method and path
    Delete {
        /// HTTP method
        #[arg(short, long)]
        method: String,

        /// Request path
        #[arg(short, long)]
        path: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete all expectations
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Browse recorded request/response logs
    Logs {
        /// Only show requests whose path starts with this prefix
        #[arg(short, long)]
        filter: Option<String>,

        /// Page to show
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Show headers and bodies
        #[arg(long)]
        full: bool,

        /// Page through logs interactively
        #[arg(short, long)]
        interactive: bool,
    },

    /// Open the browser dashboard
    Dashboard,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},mockadmin_cli=info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    // connect must work even when the existing config file is broken
    let command = match cli.command {
        Commands::Connect { url } => return commands::connect::run(&url).await,
        command => command,
    };

    let config = config::Config::load()?;
    let relay_url = cli.relay_url.unwrap_or(config.relay_url);
    let client = relay::RelayClient::new(&relay_url)?;
    tracing::debug!("Using relay at {}", client.base_url());

    match command {
        Commands::Connect { .. } => {}

        Commands::Health { watch, interval } => {
            if watch {
                commands::health::watch(&client, interval).await?;
            } else {
                commands::health::check(&client).await?;
            }
        }

        Commands::List { bodies } => {
            commands::expectations::list(&client, bodies).await?;
        }

        Commands::Create {
            method,
            path,
            body,
            status,
            response_body,
        } => {
            let opts = commands::expectations::CreateOptions {
                method,
                path,
                body,
                status,
                response_body,
            };
            commands::expectations::create(&client, opts).await?;
        }

        Commands::Delete { method, path, yes } => {
            commands::expectations::delete(&client, &method, &path, yes).await?;
        }

        Commands::Reset { yes } => {
            commands::expectations::reset(&client, yes).await?;
        }

        Commands::Logs {
            filter,
            page,
            full,
            interactive,
        } => {
            let opts = commands::logs::LogOptions {
                filter,
                page,
                full,
                page_size: config.page_size,
            };
            if interactive {
                commands::logs::interactive(&client, opts).await?;
            } else {
                commands::logs::show(&client, opts).await?;
            }
        }

        Commands::Dashboard => {
            commands::dashboard::open(client.base_url()).await?;
        }
    }

    Ok(())
}
