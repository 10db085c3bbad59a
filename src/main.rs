mod cli;

use masxflix::{config, server};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting masxflix");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    server::start_server(config).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "masxflix=debug,tower_http=debug".to_string()
        } else {
            "masxflix=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("masxflix {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            let mut config = config::Config::default();
            config::apply_env_overrides(&mut config);
            config
        }
    };

    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  TMDb API: {}", config.tmdb.base_url);
    println!(
        "  TMDb API key: {}",
        if config.tmdb.api_key.is_some() {
            "set"
        } else {
            "missing"
        }
    );
    println!("  Route protection enforced: {}", config.server.auth.enforce);
    println!("  Public routes: {}", config.server.auth.public_routes.len());
    println!(
        "  Allowed image sources: {}",
        config.images.remote_patterns.len()
    );

    Ok(())
}
