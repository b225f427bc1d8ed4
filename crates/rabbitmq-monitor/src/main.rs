// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! RabbitMQ Monitoring Plugin CLI
//!
//! Runs one collection cycle and prints the payload on stdout. Logs go to
//! stderr.
//!
//! # Usage
//!
//! ```bash
//! # Defaults: http://localhost:15672, guest/guest
//! rabbitmq-monitor
//!
//! # Only inventory, for two queues
//! rabbitmq-monitor --mode inventory --queues orders,billing
//!
//! # Using config file
//! rabbitmq-monitor --config rabbitmq-monitor.toml
//! ```

use clap::{Parser, Subcommand};
use rabbitmq_monitor::{render_payload, AgentConfig, ApiClient, CollectMode, Collector};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// RabbitMQ Monitoring Plugin
#[derive(Parser, Debug)]
#[command(name = "rabbitmq-monitor")]
#[command(about = "Report RabbitMQ topology, inventory and metrics")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Management API hostname
    #[arg(long, env = "RABBITMQ_HOSTNAME")]
    hostname: Option<String>,

    /// Management API port
    #[arg(long, env = "RABBITMQ_PORT")]
    port: Option<u16>,

    /// Management API username
    #[arg(long, env = "RABBITMQ_USERNAME")]
    username: Option<String>,

    /// Management API password
    #[arg(long, env = "RABBITMQ_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Use https for the management API
    #[arg(long)]
    use_ssl: bool,

    /// Request timeout (seconds)
    #[arg(long)]
    timeout: Option<u64>,

    /// Queue names to report (comma-separated)
    #[arg(long, value_delimiter = ',')]
    queues: Option<Vec<String>>,

    /// Queue name regexes to report (comma-separated)
    #[arg(long, value_delimiter = ',')]
    queues_regexes: Option<Vec<String>>,

    /// Exchange names to report (comma-separated)
    #[arg(long, value_delimiter = ',')]
    exchanges: Option<Vec<String>>,

    /// Exchange name regexes to report (comma-separated)
    #[arg(long, value_delimiter = ',')]
    exchanges_regexes: Option<Vec<String>>,

    /// Vhosts to report (comma-separated)
    #[arg(long, value_delimiter = ',')]
    vhosts: Option<Vec<String>>,

    /// Vhost regexes to report (comma-separated)
    #[arg(long, value_delimiter = ',')]
    vhosts_regexes: Option<Vec<String>>,

    /// Cluster name reported with every entity
    #[arg(long)]
    cluster_name: Option<String>,

    /// What to collect
    #[arg(long, value_enum)]
    mode: Option<CollectMode>,

    /// Pretty-print the payload
    #[arg(long)]
    pretty: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate example configuration file
    GenConfig {
        /// Output file path
        #[arg(short, long, default_value = "rabbitmq-monitor.toml")]
        output: PathBuf,
    },

    /// Validate a configuration file
    Validate {
        /// Configuration file path
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // stdout carries the payload
    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Some(cmd) = args.command {
        return match cmd {
            Commands::GenConfig { output } => cmd_gen_config(output),
            Commands::Validate { config } => cmd_validate(config),
        };
    }

    let config = build_config(&args)?;
    let pretty = config.pretty;
    let client = ApiClient::new(&config.api)?;
    tracing::info!("Collecting from {}", client.base_url());

    let collector = Collector::new(config)?;
    let (integration, _summary) = collector.run(&client)?;

    println!("{}", render_payload(&integration, pretty)?);
    Ok(())
}

fn build_config(args: &Args) -> Result<AgentConfig, Box<dyn std::error::Error>> {
    let mut config = match args.config {
        Some(ref path) => AgentConfig::from_file(path)?,
        None => AgentConfig::default(),
    };

    // Command line overrides file values
    if let Some(ref hostname) = args.hostname {
        config.api.hostname = hostname.clone();
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }
    if let Some(ref username) = args.username {
        config.api.username = username.clone();
    }
    if let Some(ref password) = args.password {
        config.api.password = password.clone();
    }
    if args.use_ssl {
        config.api.use_ssl = true;
    }
    if let Some(timeout) = args.timeout {
        config.api.timeout_secs = timeout;
    }

    let filters = &mut config.filters;
    for (arg, target) in [
        (&args.queues, &mut filters.queues),
        (&args.queues_regexes, &mut filters.queues_regexes),
        (&args.exchanges, &mut filters.exchanges),
        (&args.exchanges_regexes, &mut filters.exchanges_regexes),
        (&args.vhosts, &mut filters.vhosts),
        (&args.vhosts_regexes, &mut filters.vhosts_regexes),
    ] {
        if let Some(values) = arg {
            *target = values.clone();
        }
    }

    if args.cluster_name.is_some() {
        config.cluster_name = args.cluster_name.clone();
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if args.pretty {
        config.pretty = true;
    }

    config.validate()?;
    Ok(config)
}

fn cmd_gen_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AgentConfig::default();
    config.filters.queues_regexes = vec!["^orders\\.".into()];
    config.filters.vhosts = vec!["/".into()];
    config.pretty = true;

    let toml_str = toml::to_string_pretty(&config)?;
    let content = format!(
        r#"# RabbitMQ Monitor Configuration
# Generated by rabbitmq-monitor gen-config

{}
"#,
        toml_str
    );

    std::fs::write(&output, content)?;
    println!("Generated configuration file: {}", output.display());
    Ok(())
}

fn cmd_validate(config_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    match AgentConfig::from_file(&config_path) {
        Ok(config) => {
            println!("Configuration valid!");
            println!();
            println!("Management API: {}", config.api.base_url());
            println!("Mode: {:?}", config.mode);
            println!(
                "Filters: {} queues, {} exchanges, {} vhosts",
                config.filters.queues.len() + config.filters.queues_regexes.len(),
                config.filters.exchanges.len() + config.filters.exchanges_regexes.len(),
                config.filters.vhosts.len() + config.filters.vhosts_regexes.len(),
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("Configuration invalid: {}", e);
            std::process::exit(1);
        }
    }
}
