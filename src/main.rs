use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

mod bridge;
mod config;
mod launch;
mod router;

use config::Config;
use launch::{LaunchResolver, SystemLauncher};
use router::{Arguments, Router};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer line-delimited JSON method calls on stdin/stdout
    Serve,
    /// Run a single method call and print the response
    Call {
        /// Method name, e.g. openVideo or isAppInstalled
        method: String,
        /// Call argument as key=value (repeatable)
        #[arg(long = "arg", value_parser = parse_key_value)]
        args: Vec<(String, String)>,
    },
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{s}`"))
}

fn get_config_path(args: &Args) -> Option<String> {
    if let Some(path) = &args.config {
        return Some(path.clone());
    }

    if let Ok(path) = std::env::var("CONFIG_FILE") {
        return Some(path);
    }

    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        let config_path = format!("{}/playchooser/config.toml", xdg_config_home);
        if std::path::Path::new(&config_path).exists() {
            return Some(config_path);
        }
    }

    if let Some(home) = dirs::home_dir() {
        let config_path = format!("{}/.config/playchooser/config.toml", home.display());
        if std::path::Path::new(&config_path).exists() {
            return Some(config_path);
        }
    }

    None
}

fn init_logging(format: &str) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    // stdout carries the method channel, so logs go to stderr.
    if format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = get_config_path(&args);
    let config = match &config_path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => Config::default(),
    };

    init_logging(config.get_logging_format());

    info!("Starting playchooser...");
    match &config_path {
        Some(path) => info!("Loaded config from: {}", path),
        None => info!("No config file found, using built-in player roster"),
    }

    let roster = config.build_roster()?;
    let launcher = SystemLauncher::new(roster.clone());
    let resolver = LaunchResolver::new(Box::new(launcher), roster, config.get_prompt());
    let router = Router::new(resolver);

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => bridge::serve(router).await?,
        Command::Call { method, args } => {
            let arguments: Arguments = args
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect();
            let response = bridge::call(&router, &method, &arguments).await;
            println!("{}", serde_json::to_string(&response)?);
        }
    }

    Ok(())
}
