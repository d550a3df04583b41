//! Runner dashboard development server.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌───────────────────────────────────────────────┐
//!                          │                 DEV SERVER                     │
//!                          │                                                │
//!     Browser request      │  ┌─────────┐    ┌──────────────┐               │
//!     ─────────────────────┼─▶│  http   │───▶│ proxy prefix │── match ──────┼──▶ Runner backend
//!                          │  │ server  │    │    table     │               │    127.0.0.1:1337
//!                          │  └─────────┘    └──────┬───────┘               │
//!                          │                        │ no match              │
//!                          │                        ▼                       │
//!                          │                 ┌──────────────┐  ┌────────┐   │
//!     Asset / index.html   │                 │  spa layer   │─▶│ route  │   │
//!     ◀────────────────────┼─────────────────│ (dist dir)   │  │ table  │   │
//!                          │                 └──────────────┘  └────────┘   │
//!                          └───────────────────────────────────────────────┘
//! ```
//!
//! Besides `serve`, the binary resolves URLs against a profile's route table
//! (`resolve`), prints the tables (`routes`) and checks config files (`check`).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tokio::net::TcpListener;

use runner_devserver::config::{load_or_default, validate_config, ConfigError, DevServerConfig};
use runner_devserver::lifecycle::signals::spawn_signal_handler;
use runner_devserver::observability::{logging, metrics};
use runner_devserver::{inspect, DeploymentProfile, DevServer, Shutdown};

#[derive(Parser)]
#[command(name = "runner-devserver", version)]
#[command(about = "Development server and route inspector for the runner dashboard", long_about = None)]
struct Cli {
    /// TOML configuration file (built-in profiles when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Deployment profile to use (e.g. "hash" or "history")
    #[arg(short, long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the app and proxy API calls to the backend (default)
    Serve(ServeArgs),
    /// Resolve browser URLs against the route table, in navigation order
    Resolve {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Print the route and proxy tables of the profile
    Routes,
    /// Validate the configuration and exit
    Check,
}

#[derive(Args, Default)]
struct ServeArgs {
    /// Bind address, overrides listener.bind_address
    #[arg(long)]
    bind: Option<String>,

    /// Built app directory, overrides static_files.dist_dir
    #[arg(long)]
    dist: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let command = cli.command.unwrap_or(Commands::Serve(ServeArgs::default()));

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(profile) = cli.profile {
        config.profile = profile;
    }
    if let Commands::Serve(args) = &command {
        if let Some(bind) = &args.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(dist) = &args.dist {
            config.static_files.dist_dir = dist.display().to_string();
        }
        if args.debug {
            config.observability.log_level = "debug".to_string();
        }
    }

    logging::init_logging(&config.observability);
    tracing::debug!(
        path = ?cli.config,
        profile = %config.profile,
        profiles = config.profiles.len(),
        "Configuration loaded"
    );
    validate_config(&config).map_err(ConfigError::Validation)?;

    match command {
        Commands::Serve(_) => serve(config).await,
        Commands::Resolve { urls } => {
            let profile = DeploymentProfile::active(&config)?;
            let navigations = inspect::resolve_urls(&profile, urls.as_slice());
            for line in inspect::navigation_lines(&navigations)? {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Routes => {
            let profile = DeploymentProfile::active(&config)?;
            print!("{}", inspect::route_listing(&profile));
            Ok(())
        }
        Commands::Check => {
            println!("configuration ok (profile `{}`)", config.profile);
            Ok(())
        }
    }
}

async fn serve(config: DevServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("runner-devserver v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = DevServer::new(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    spawn_signal_handler(shutdown);

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
