//! `allowlist`: keep a router's domain allow-list in sync from the terminal.
//!
//! Talks to the router's `update_domain.sh` CGI script, caches the list
//! locally for an hour and applies add/remove commands optimistically.

mod commands;
mod shell;
mod view;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use allowlist_app::{default_store_path, AppStateBuilder, StoreBackend};
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::view::ConsoleView;

#[derive(Parser)]
#[command(name = "allowlist", version)]
#[command(about = "Manage the domain allow-list of a router", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Store file (default: <config dir>/allowlist-keeper/storage.json)
    #[arg(long, global = true, env = "ALLOWLIST_STORE", value_name = "PATH")]
    store: Option<PathBuf>,

    /// Keep all state in memory for this run
    #[arg(long, global = true, conflicts_with = "store")]
    memory: bool,

    /// Request timeout in seconds
    #[arg(
        long,
        global = true,
        env = "ALLOWLIST_TIMEOUT_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the list, fetching it when the cache is missing or stale
    List,

    /// Fetch the list from the server
    Refresh {
        /// Skip the fetch while the cached list is still fresh
        #[arg(long)]
        if_stale: bool,
    },

    /// Add a domain to the allow-list
    Add {
        /// Domain or IPv4 address; defaults to the host of --current-url
        domain: Option<String>,

        /// Page whose host is added when no domain is given
        #[arg(long, value_name = "URL")]
        current_url: Option<String>,
    },

    /// Remove a domain from the allow-list
    Remove {
        /// Domain to remove
        domain: String,
    },

    /// Server settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Interactive session
    Shell {
        /// Page whose host `add` uses when no domain is given
        #[arg(long, value_name = "URL")]
        current_url: Option<String>,
    },
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Show saved settings and cache state
    Show,

    /// Validate and save the server address; clears the cached list
    Save {
        /// IPv4 address or hostname
        #[arg(long)]
        host: String,

        /// Port (1-65535); omit for the default HTTP port
        #[arg(long, default_value = "")]
        port: String,
    },

    /// Forget saved settings and the cached list
    Reset,

    /// Check that a server answers; nothing is saved
    Test {
        /// Host to test (default: saved host)
        #[arg(long)]
        host: Option<String>,

        /// Port to test (default: saved port)
        #[arg(long)]
        port: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    // stdout belongs to the list and status output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let backend = if cli.memory {
        StoreBackend::Memory
    } else {
        StoreBackend::File(cli.store.unwrap_or_else(default_store_path))
    };
    tracing::debug!("Store backend: {backend:?}");

    let state = AppStateBuilder::new()
        .store_backend(backend)
        .request_timeout(Duration::from_secs(cli.timeout_secs))
        .build()
        .context("failed to initialize application state")?;

    let view = Arc::new(ConsoleView::new());

    let code = match cli.command {
        Commands::List => commands::list(&state, view).await,
        Commands::Refresh { if_stale } => commands::refresh(&state, view, !if_stale).await,
        Commands::Add {
            domain,
            current_url,
        } => {
            commands::add(
                &state,
                view,
                domain.as_deref(),
                current_url.as_deref(),
            )
            .await
        }
        Commands::Remove { domain } => commands::remove(&state, view, &domain).await,
        Commands::Settings(cmd) => match cmd {
            SettingsCommand::Show => commands::settings_show(&state, view.as_ref()).await,
            SettingsCommand::Save { host, port } => {
                commands::settings_save(&state, view.as_ref(), &host, &port).await
            }
            SettingsCommand::Reset => commands::settings_reset(&state, view.as_ref()).await,
            SettingsCommand::Test { host, port } => {
                commands::settings_test(&state, view.as_ref(), host.as_deref(), port.as_deref())
                    .await
            }
        },
        Commands::Shell { current_url } => {
            shell::run(&state, view, current_url.as_deref()).await?;
            ExitCode::SUCCESS
        }
    };

    Ok(code)
}
