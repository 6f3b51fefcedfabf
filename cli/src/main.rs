//! Barbershop booking: CLI server
//!
//! ```sh
//! # Run with default config (~/.config/barbershop-booking/config.toml)
//! barbershop-service
//!
//! # Custom config path
//! barbershop-service --config /etc/barbershop/config.toml
//!
//! # Override port and log level
//! barbershop-service --api-port 8080 --log-level debug
//!
//! # Validate config without starting
//! barbershop-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use barbershop::config::{resolve_config_path, AppConfig};
use barbershop::server::{init_tracing, ServerHandle, ServerOptions};

/// REST API for booking barbershop services.
#[derive(Parser, Debug)]
#[command(
    name = "barbershop-service",
    version,
    about = "Barbershop booking REST API",
    long_about = "Barbershop booking service: clients book services, owners manage \
                  their shop and appointments.\n\n\
                  Default config: ~/.config/barbershop-booking/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "BARBERSHOP_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(resolve_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) if cli.check => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            let cfg = AppConfig::default();
            init_tracing(&cfg);
            error!("Failed to load config: {}. Using defaults.", e);
            cfg
        }
    };

    if let Some(port) = cli.api_port {
        config.server.api_port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.api_address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // no-op when the fallback path above already installed it
    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
