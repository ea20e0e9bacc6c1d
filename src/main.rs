//! HAProxy backend self-registration agent (CLI entry point).
//!
//! # Commands
//!
//! ```text
//! haproxy-register --host lb.internal --backend web register
//! haproxy-register --host lb.internal --backend web unregister
//! haproxy-register --host lb.internal --backend web daemon
//! ```
//!
//! One-shot commands exit 0 on success and non-zero with a descriptive
//! message on any failure. The daemon re-registers every interval, traps
//! SIGTERM/SIGINT, de-registers once on the way out, and exits 0.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use haproxy_register::config::{load_config, AgentConfig, ConfigError};
use haproxy_register::lifecycle::{signals, Daemon, Shutdown};
use haproxy_register::{discovery, Reconciler, Result, RuntimeSocket};

#[derive(Parser)]
#[command(name = "haproxy-register")]
#[command(about = "Register this host into an HAProxy backend slot", long_about = None)]
struct Cli {
    /// HAProxy host running the runtime API.
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Runtime API TCP port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Backend to register into.
    #[arg(short, long)]
    backend: Option<String>,

    /// Fixed IP to register, bypassing discovery.
    #[arg(long)]
    ip: Option<String>,

    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Claim a slot for this host (no-op if already registered).
    Register,
    /// Release this host's slot (no-op if not registered).
    Unregister,
    /// Re-assert registration on an interval; de-register on shutdown.
    Daemon {
        /// Seconds between registration cycles.
        #[arg(long)]
        interval_secs: Option<u64>,
    },
}

/// File config with CLI flags folded in. Flags always win.
struct Settings {
    host: String,
    port: u16,
    backend: String,
    config: AgentConfig,
}

fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AgentConfig::default(),
    };

    if let Some(ip) = &cli.ip {
        config.discovery.ip_override = Some(ip.clone());
    }

    let missing = |what: &str| {
        ConfigError::Validation(format!(
            "no {what} given (use --{what} or set it in the config file)"
        ))
    };
    let host = cli
        .host
        .clone()
        .or_else(|| config.haproxy.host.clone())
        .ok_or_else(|| missing("host"))?;
    let port = cli.port.unwrap_or(config.haproxy.port);
    let backend = cli
        .backend
        .clone()
        .or_else(|| config.backend.clone())
        .ok_or_else(|| missing("backend"))?;

    Ok(Settings {
        host,
        port,
        backend,
        config,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match resolve_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // RUST_LOG wins over the configured level.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "haproxy_register={}",
                    settings.config.observability.log_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(cli, settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, settings: Settings) -> Result<()> {
    let timeouts = &settings.config.timeouts;
    let socket = RuntimeSocket::new(settings.host.clone(), settings.port).with_timeouts(
        Duration::from_secs(timeouts.connect_secs),
        Duration::from_secs(timeouts.response_secs),
    );
    let reconciler = Reconciler::new(socket);

    let ip = discovery::current_ip(
        settings.config.discovery.ip_override.as_deref(),
        Duration::from_millis(settings.config.discovery.metadata_timeout_ms),
    )
    .await?;

    tracing::info!(
        haproxy = %format!("{}:{}", settings.host, settings.port),
        backend = %settings.backend,
        ip = %ip,
        "Configuration resolved"
    );

    match cli.command {
        Commands::Register => reconciler.register(&settings.backend, &ip).await,
        Commands::Unregister => reconciler.unregister(&settings.backend, &ip).await,
        Commands::Daemon { interval_secs } => {
            let interval = Duration::from_secs(
                interval_secs.unwrap_or(settings.config.daemon.interval_secs),
            );
            let shutdown = Shutdown::new();
            // Subscribe before the signal listener starts so an early signal
            // cannot be lost.
            let shutdown_rx = shutdown.subscribe();
            tokio::spawn(signals::listen(shutdown.clone()));

            let daemon = Daemon::new(reconciler, settings.backend, ip, interval);
            daemon.run(shutdown_rx).await;
            Ok(())
        }
    }
}
