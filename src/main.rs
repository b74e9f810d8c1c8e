use std::path::PathBuf;

use clap::Parser;

use pattern_router::config::{read_config, validate_config, ServerConfig};
use pattern_router::lifecycle::{self, startup, Shutdown};
use pattern_router::observability;

/// Pattern-routed HTTP file server.
#[derive(Parser)]
#[command(name = "pattern-router", version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override `storage.root`.
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Override `observability.log_level`.
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn apply(self, config: &mut ServerConfig) {
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(root) = self.root {
            config.storage.root = root;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => ServerConfig::default(),
    };
    let config_path = args.config.clone();
    args.apply(&mut config);

    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            eprintln!("config error: {error}");
        }
        return Err(format!("{} configuration error(s)", errors.len()).into());
    }

    observability::logging::init(&config.observability)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "pattern-router starting");
    tracing::info!(
        config_file = ?config_path,
        bind_address = %config.listener.bind_address,
        storage_root = %config.storage.root.display(),
        max_connections = config.listener.max_connections,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        observability::metrics::init_metrics(addr)?;
    }

    let shutdown = Shutdown::new();
    lifecycle::spawn_signal_listener(shutdown.clone());

    startup::run(&config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
