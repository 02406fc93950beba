//! Interactive terminal front end of the bridge wizard.
//!
//! Reads one command per line from stdin and prints the wizard state after
//! each. Type `help` for the command list.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use bridge_wizard::auth::PasswordEntry;
use bridge_wizard::bridge::store::RouteConfigStore;
use bridge_wizard::bridge::types::{Chain, RouteConfig};
use bridge_wizard::config::load_or_default;
use bridge_wizard::observability::{logging, metrics};
use bridge_wizard::services::{LocalBridgeService, RemoteWalletService, TracingAnalytics};
use bridge_wizard::session::address::middle_ellipsis;
use bridge_wizard::wizard::{ProgressKind, WizardStep};
use bridge_wizard::{BridgeWizard, SessionSnapshot, WizardContext, WizardEvent, WizardServices};

const HELP: &str = "\
commands:
  from <CRYPTO_ORG|CRONOS>     select source chain
  to <CRYPTO_ORG|CRONOS>       select destination chain
  swap                         swap source and destination
  asset <id>                   select asset
  amount <value>               set amount
  next                         continue to confirmation
  ack                          toggle the disclaimer
  confirm                      submit the transfer
  back                         return to the form
  route                        show route configuration
  route set <field> <value>    edit prefix, channel, port or contract
  route reset                  restore built-in route configuration
  status                       print the current step
  quit";

#[derive(Parser)]
#[command(name = "bridge-wizard")]
#[command(about = "Bridge CRO between Crypto.org Chain and Cronos", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Wallet session snapshot (JSON)
    #[arg(short, long)]
    session: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;

    logging::init_logging(&config.observability);
    tracing::info!("bridge-wizard v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let session = SessionSnapshot::load(&cli.session).map_err(|e| format!("Failed to load session: {}", e))?;
    tracing::info!(
        wallet = %session.wallet.identifier,
        network = session.network().as_str(),
        assets = session.assets.len(),
        "Session loaded"
    );

    let store = match config.bridge.route_store_path.as_deref() {
        Some(path) => RouteConfigStore::load_from_file(path)?,
        None => RouteConfigStore::new(None),
    };
    let wallet = Arc::new(RemoteWalletService::new(&config.wallet_service)?);
    let services = WizardServices {
        secrets: wallet.clone(),
        bridge: Arc::new(LocalBridgeService::new(store)),
        transfers: wallet,
        analytics: Arc::new(TracingAnalytics::new(session.wallet.identifier.clone())),
    };

    let ctx = Arc::new(WizardContext::new(session, config.bridge.clone()));
    let mut wizard = BridgeWizard::new(ctx, services, config.timeouts.clone());

    println!("{}", HELP);
    render(&wizard);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if wizard.state().awaiting_password {
            if line.eq_ignore_ascii_case("cancel") {
                wizard.cancel_password();
            } else if let Some(err) = wizard.submit_password(PasswordEntry::new(line)).await {
                println!("! {}", err);
            }
            render(&wizard);
            continue;
        }

        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();
        let event = match (command, args.as_slice()) {
            ("", _) => continue,
            ("quit" | "exit", _) => break,
            ("help", _) => {
                println!("{}", HELP);
                continue;
            }
            ("status", _) => {
                render(&wizard);
                continue;
            }
            ("route", rest) => {
                if let Err(e) = route_command(&mut wizard, rest).await {
                    println!("! {}", e);
                }
                continue;
            }
            ("from", [chain]) => chain.parse::<Chain>().map(WizardEvent::SelectSourceChain),
            ("to", [chain]) => chain.parse::<Chain>().map(WizardEvent::SelectDestinationChain),
            ("swap", _) => Ok(WizardEvent::SwapChains),
            ("asset", [id]) => Ok(WizardEvent::SelectAsset(id.to_string())),
            ("amount", [value]) => Ok(WizardEvent::SetAmount(value.to_string())),
            ("next", _) => Ok(WizardEvent::RequestTransfer),
            ("ack", _) => Ok(WizardEvent::ToggleDisclaimer),
            ("confirm", _) => Ok(WizardEvent::Confirm),
            ("back", _) => Ok(WizardEvent::Back),
            _ => {
                println!("! unknown command, type `help`");
                continue;
            }
        };

        match event {
            Ok(event) => {
                if let Some(err) = wizard.dispatch(event) {
                    println!("! {}", err);
                }
                wizard.settle().await;
                render(&wizard);
            }
            Err(e) => println!("! {}", e),
        }
    }

    tracing::info!(transfers = wizard.history().len(), "Shutdown complete");
    Ok(())
}

async fn route_command(wizard: &mut BridgeWizard, args: &[&str]) -> Result<(), Box<dyn std::error::Error>> {
    match args {
        [] => {
            match &wizard.state().route_config {
                Some(config) => print_route(config),
                None => println!("no route configuration loaded"),
            }
            Ok(())
        }
        ["reset"] => {
            wizard.reset_route_config().await?;
            println!("Bridge config restored to defaults");
            Ok(())
        }
        ["set", field, value] => {
            let mut config = wizard
                .state()
                .route_config
                .clone()
                .ok_or("no route configuration loaded")?;
            match *field {
                "prefix" => config.prefix = value.to_string(),
                "channel" => config.bridge_channel = Some(value.to_string()),
                "port" => config.bridge_port = Some(value.to_string()),
                "contract" => config.cronos_bridge_contract_address = Some(value.to_string()),
                other => return Err(format!("unknown route field {}", other).into()),
            }
            wizard.update_route_config(config).await?;
            println!("Bridge config successfully updated");
            Ok(())
        }
        _ => Err("usage: route [set <field> <value> | reset]".into()),
    }
}

fn print_route(config: &RouteConfig) {
    println!("{}", serde_json::to_string_pretty(config).unwrap_or_default());
}

fn render(wizard: &BridgeWizard) {
    let state = wizard.state();
    println!("-- step {} of 3: {}", state.step.index() + 1, state.step.name());
    match &state.step {
        WizardStep::Configure => {
            let form = &state.form;
            let chain = |c: Option<Chain>| c.map(|c| c.label()).unwrap_or("-");
            println!("   from   {} {}", chain(form.source_chain), middle_ellipsis(&form.source_address, 8));
            println!(
                "   to     {} {}",
                chain(form.destination_chain),
                middle_ellipsis(&form.destination_address, 8)
            );
            let ctx = wizard.context();
            let choices: Vec<&str> = ctx
                .session
                .bridge_supported_assets(&ctx.settings.supported_assets)
                .map(|a| a.identifier.as_str())
                .collect();
            println!(
                "   asset  {} (choices: {})",
                form.asset_id.as_deref().unwrap_or("-"),
                choices.join(", ")
            );
            println!("   amount {}", form.amount);
            if let Some(preview) = wizard.preview() {
                println!(
                    "   fee {} {}, will receive {} {}",
                    preview.fee, preview.fee_symbol, preview.will_receive, preview.receive_symbol
                );
            }
            for (field, message) in state.field_errors.iter() {
                println!("   * {}: {}", field, message);
            }
            if state.awaiting_password {
                println!("   enter wallet password (or `cancel`):");
            }
        }
        WizardStep::Confirm {
            snapshot,
            disclaimer_acknowledged,
        } => {
            println!("   sending {} {}", snapshot.amount, snapshot.asset_id.as_deref().unwrap_or_default());
            println!("   to      {}", snapshot.destination_address);
            if let Some(preview) = wizard.preview() {
                println!("   receive {} {}", preview.will_receive, preview.receive_symbol);
            }
            println!(
                "   [{}] I understand bridge transfers cannot be reversed (`ack`)",
                if *disclaimer_acknowledged { "x" } else { " " }
            );
        }
        WizardStep::Execute { result, .. } => {
            for entry in &state.progress {
                let marker = match entry.kind {
                    ProgressKind::Pending => "..",
                    ProgressKind::Loading => "~~",
                    ProgressKind::Complete | ProgressKind::TransferInitiated => "ok",
                    ProgressKind::Failed => "!!",
                };
                println!("   [{}] {} {}", marker, entry.title, entry.description);
                if let Some(link) = &entry.link {
                    println!("        {}", link);
                }
            }
            match result.as_ref().map(|r| r.outcome()) {
                Some(Ok(hash)) => println!("   done: {}", hash.unwrap_or("broadcast without hash")),
                Some(Err(e)) => println!("   {}", e),
                None => {}
            }
        }
    }
}
