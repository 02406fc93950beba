use clap::{Parser, Subcommand};
use std::path::PathBuf;

use bridge_wizard::bridge::store::{RouteConfigStore, RouteStoreError};
use bridge_wizard::bridge::types::{BridgeTransferDirection, NetworkKind, RouteConfig};
use bridge_wizard::config::load_or_default;

#[derive(Parser)]
#[command(name = "bridge-cli")]
#[command(about = "Inspect and edit bridge route configuration", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Route store file, overriding the configured one
    #[arg(long)]
    store: Option<String>,

    #[arg(short, long, default_value = "mainnet")]
    network: NetworkKind,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List enabled routes and whether they are overridden
    Routes,
    /// Print the effective configuration of a route
    Show { direction: BridgeTransferDirection },
    /// Edit fields of a route
    Set {
        direction: BridgeTransferDirection,
        #[arg(long)]
        prefix: Option<String>,
        #[arg(long)]
        channel: Option<String>,
        #[arg(long)]
        port: Option<String>,
        #[arg(long)]
        contract: Option<String>,
    },
    /// Restore the built-in configuration of a route
    Reset { direction: BridgeTransferDirection },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;
    let path = cli
        .store
        .or(config.bridge.route_store_path.clone())
        .ok_or("no route store configured; pass --store or set bridge.route_store_path")?;
    let store = RouteConfigStore::load_from_file(&path)?;

    match cli.command {
        Commands::Routes => {
            for direction in &config.bridge.supported_directions {
                let marker = if store.is_overridden(cli.network, *direction) {
                    "custom"
                } else {
                    "default"
                };
                println!("{:<22} {}", direction.as_str(), marker);
            }
        }
        Commands::Show { direction } => print_config(&store.get(cli.network, direction))?,
        Commands::Set {
            direction,
            prefix,
            channel,
            port,
            contract,
        } => {
            let mut route = store.get(cli.network, direction);
            if let Some(prefix) = prefix {
                route.prefix = prefix;
            }
            if channel.is_some() {
                route.bridge_channel = channel;
            }
            if port.is_some() {
                route.bridge_port = port;
            }
            if contract.is_some() {
                route.cronos_bridge_contract_address = contract;
            }

            match store.update(route.clone()) {
                Ok(()) => print_config(&route)?,
                Err(RouteStoreError::Invalid(errors)) => {
                    for error in errors {
                        eprintln!("Error: {}", error);
                    }
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Reset { direction } => print_config(&store.reset(cli.network, direction)?)?,
    }

    Ok(())
}

fn print_config(config: &RouteConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
