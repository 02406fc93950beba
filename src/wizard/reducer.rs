//! Pure state machine driving the wizard.
//!
//! `reduce` takes the current state and one event and returns the next
//! state, the side effects to run and, when the event was refused, the
//! reason. It never performs I/O; the controller runs the effects and feeds
//! their completions back in as events.

use crate::bridge::types::{BridgeTransferDirection, Chain};
use crate::services::BridgeTransferRequest;
use crate::session::address::middle_ellipsis;
use crate::session::UserAsset;
use crate::wizard::context::WizardContext;
use crate::wizard::error::WizardError;
use crate::wizard::event::{Effect, WizardEvent};
use crate::wizard::form::{validate_form, FieldErrors, FormField, TransferForm};
use crate::wizard::state::{ProgressEntry, ProgressKind, TransferResult, WizardState, WizardStep};

const HASH_DISPLAY_KEEP: usize = 8;

/// Result of applying one event.
#[derive(Debug)]
pub struct Transition {
    pub state: WizardState,
    pub effects: Vec<Effect>,
    pub rejection: Option<WizardError>,
}

impl Transition {
    fn accept(state: WizardState) -> Self {
        Self {
            state,
            effects: Vec::new(),
            rejection: None,
        }
    }

    fn reject(state: WizardState, error: WizardError) -> Self {
        Self {
            state,
            effects: Vec::new(),
            rejection: Some(error),
        }
    }
}

/// Whether a route fetch tagged with `generation` is out of date.
pub fn is_stale(state: &WizardState, generation: u64) -> bool {
    generation != state.route_generation
}

pub fn reduce(state: WizardState, event: WizardEvent, ctx: &WizardContext) -> Transition {
    match event {
        WizardEvent::RouteConfigLoaded { generation, config } => {
            let mut state = state;
            if is_stale(&state, generation) || config.direction != state.direction {
                return Transition::accept(state);
            }
            state.route_config = Some(config);
            state.route_error = None;
            if matches!(state.step, WizardStep::Configure) {
                revalidate(state, ctx)
            } else {
                Transition::accept(state)
            }
        }
        WizardEvent::RouteConfigFailed { generation, reason } => {
            let mut state = state;
            if is_stale(&state, generation) {
                return Transition::accept(state);
            }
            state.route_config = None;
            state.route_error = Some(reason);
            if matches!(state.step, WizardStep::Configure) {
                revalidate(state, ctx)
            } else {
                Transition::accept(state)
            }
        }
        event => match state.step {
            WizardStep::Configure => configure(state, event, ctx),
            WizardStep::Confirm { .. } => confirm(state, event, ctx),
            WizardStep::Execute { .. } => execute(state, event, ctx),
        },
    }
}

fn configure(mut state: WizardState, event: WizardEvent, ctx: &WizardContext) -> Transition {
    match event {
        WizardEvent::SelectSourceChain(chain) => {
            let form = &mut state.form;
            form.source_chain = Some(chain);
            form.destination_chain = None;
            form.destination_address.clear();
            form.source_address = chain_address(ctx, chain);
            reset_asset(form, ctx);
            revalidate(state, ctx)
        }
        WizardEvent::SelectDestinationChain(chain) => {
            let form = &mut state.form;
            form.destination_chain = Some(chain);
            form.destination_address = chain_address(ctx, chain);
            reset_asset(form, ctx);
            revalidate(state, ctx)
        }
        WizardEvent::SwapChains => {
            let form = &mut state.form;
            std::mem::swap(&mut form.source_chain, &mut form.destination_chain);
            std::mem::swap(&mut form.source_address, &mut form.destination_address);
            form.asset_id = form.source_chain.and_then(|c| default_asset(ctx, c));
            revalidate(state, ctx)
        }
        WizardEvent::SelectAsset(id) => {
            if !state.inputs_enabled() {
                return reject_field(state, FormField::Asset, "Select a supported route first");
            }
            match ctx.session.find_asset(&id) {
                Some(asset) if ctx.is_bridge_asset(asset) => {
                    state.form.asset_id = Some(id);
                    revalidate(state, ctx)
                }
                Some(asset) => {
                    let message = format!("{} cannot be bridged", asset.symbol);
                    reject_field(state, FormField::Asset, message)
                }
                None => reject_field(state, FormField::Asset, format!("Unknown asset {}", id)),
            }
        }
        WizardEvent::SetAmount(amount) => {
            if !state.inputs_enabled() {
                return reject_field(state, FormField::Amount, "Select a supported route first");
            }
            state.form.amount = amount;
            revalidate(state, ctx)
        }
        WizardEvent::RequestTransfer => {
            if state.awaiting_password {
                return Transition::accept(state);
            }
            let mut transition = revalidate(state, ctx);
            if !transition.state.is_valid {
                transition.rejection = Some(blocking_error(&transition.state));
                return transition;
            }
            if ctx.auth_mode().requires_password() && transition.state.secret.is_none() {
                transition.state.awaiting_password = true;
                transition.effects.push(Effect::PromptPassword);
                return transition;
            }
            enter_confirm(transition)
        }
        WizardEvent::PasswordVerified(secret) => {
            if !state.awaiting_password {
                return Transition::reject(state, WizardError::invalid_transition("configure", "password_verified"));
            }
            state.awaiting_password = false;
            state.secret = Some(secret);
            let mut transition = revalidate(state, ctx);
            if !transition.state.is_valid {
                transition.rejection = Some(blocking_error(&transition.state));
                return transition;
            }
            enter_confirm(transition)
        }
        WizardEvent::PasswordRejected(reason) => {
            if !state.awaiting_password {
                return Transition::reject(state, WizardError::invalid_transition("configure", "password_rejected"));
            }
            state.field_errors.remove(FormField::Password);
            state.field_errors.insert(FormField::Password, reason.clone());
            Transition::reject(state, WizardError::Auth(reason))
        }
        WizardEvent::CancelPassword => {
            state.awaiting_password = false;
            state.field_errors.remove(FormField::Password);
            Transition::accept(state)
        }
        WizardEvent::RouteConfigEdited(config) => {
            if config.direction != state.direction || config.network != ctx.network() {
                return Transition::reject(
                    state,
                    WizardError::RouteConfig("configuration does not match the selected route".to_string()),
                );
            }
            // in-flight fetches must not overwrite the edit
            state.route_generation += 1;
            state.route_config = Some(config);
            state.route_error = None;
            revalidate(state, ctx)
        }
        other => Transition::reject(state, WizardError::invalid_transition("configure", other.name())),
    }
}

fn confirm(mut state: WizardState, event: WizardEvent, ctx: &WizardContext) -> Transition {
    match event {
        WizardEvent::ToggleDisclaimer => {
            if let WizardStep::Confirm {
                disclaimer_acknowledged,
                ..
            } = &mut state.step
            {
                *disclaimer_acknowledged = !*disclaimer_acknowledged;
            }
            Transition::accept(state)
        }
        WizardEvent::Back => {
            state.step = WizardStep::Configure;
            Transition::accept(state)
        }
        WizardEvent::Confirm => {
            let (snapshot, acknowledged) = match &state.step {
                WizardStep::Confirm {
                    snapshot,
                    disclaimer_acknowledged,
                } => (snapshot.clone(), *disclaimer_acknowledged),
                _ => return Transition::reject(state, WizardError::invalid_transition("confirm", "confirm")),
            };
            if !acknowledged {
                return Transition::reject(state, WizardError::DisclaimerNotAcknowledged);
            }
            let (Some(source), Some(destination)) = (snapshot.source_chain, snapshot.destination_chain) else {
                return reject_field(state, FormField::DestinationChain, "Destination chain is required");
            };
            let Some(asset) = snapshot.asset_id.as_deref().and_then(|id| ctx.session.find_asset(id)) else {
                return reject_field(state, FormField::Asset, "Asset is required");
            };

            let auth_mode = ctx.auth_mode();
            let request = BridgeTransferRequest {
                direction: BridgeTransferDirection::from_pair(source, destination),
                source_address: snapshot.source_address.to_lowercase(),
                destination_address: snapshot.destination_address.to_lowercase(),
                amount: snapshot.amount.trim().to_string(),
                asset: asset.clone(),
                secret_phrase: if auth_mode.requires_password() {
                    state.secret.clone()
                } else {
                    None
                },
                wallet_auth_mode: auth_mode,
            };

            state.progress = vec![pending_entry(&snapshot, asset), ProgressEntry::loading()];
            state.step = WizardStep::Execute { snapshot, result: None };
            Transition {
                state,
                effects: vec![Effect::SubmitTransfer(request)],
                rejection: None,
            }
        }
        other => Transition::reject(state, WizardError::invalid_transition("confirm", other.name())),
    }
}

fn execute(mut state: WizardState, event: WizardEvent, ctx: &WizardContext) -> Transition {
    let snapshot = match &state.step {
        WizardStep::Execute { snapshot, result: None } => snapshot.clone(),
        _ => return Transition::reject(state, WizardError::invalid_transition("execute", event.name())),
    };
    let asset = snapshot.asset_id.as_deref().and_then(|id| ctx.session.find_asset(id));
    let heading = transfer_heading(&snapshot, asset);

    let result = match event {
        WizardEvent::SubmissionSucceeded(broadcast) => {
            state.progress.retain(|e| e.kind != ProgressKind::Loading);

            let mut complete = ProgressEntry::new(
                ProgressKind::Complete,
                format!("{} completed", heading),
                "Transaction broadcast",
            );
            if let Some(hash) = &broadcast.transaction_hash {
                complete.description = format!("Transaction ID: {}", middle_ellipsis(hash, HASH_DISPLAY_KEEP));
                complete.link = Some(ctx.session.transaction_url(asset, hash));
                complete.transaction_hash = Some(hash.clone());
            }
            state.progress.push(complete);

            let destination = snapshot.destination_chain.map(|c| c.label()).unwrap_or("the destination chain");
            state.progress.push(ProgressEntry::new(
                ProgressKind::TransferInitiated,
                "Transfer initiated",
                format!("Funds will arrive on {} shortly", destination),
            ));

            TransferResult {
                transaction_hash: broadcast.transaction_hash,
                error: None,
            }
        }
        WizardEvent::SubmissionFailed(reason) => {
            state.progress.retain(|e| e.kind != ProgressKind::Loading);
            state.progress.push(ProgressEntry::new(
                ProgressKind::Failed,
                format!("{} failed", heading),
                reason.clone(),
            ));
            TransferResult {
                transaction_hash: None,
                error: Some(reason),
            }
        }
        other => return Transition::reject(state, WizardError::invalid_transition("execute", other.name())),
    };

    state.step = WizardStep::Execute {
        snapshot,
        result: Some(result),
    };
    Transition::accept(state)
}

/// Re-run validation and follow any change of direction with a fresh
/// route configuration fetch.
fn revalidate(mut state: WizardState, ctx: &WizardContext) -> Transition {
    let validation = validate_form(&state.form, ctx);
    let mut effects = Vec::new();

    if validation.direction != state.direction {
        state.direction = validation.direction;
        state.route_generation += 1;
        state.route_config = None;
        state.route_error = None;
        if validation.direction.is_supported() {
            effects.push(Effect::FetchRouteConfig {
                generation: state.route_generation,
                network: ctx.network(),
                direction: validation.direction,
            });
        }
    }

    let mut errors = validation.errors;
    if let Some(reason) = &state.route_error {
        errors.insert(
            FormField::DestinationChain,
            format!("Route configuration unavailable: {}", reason),
        );
    }
    state.is_valid = errors.is_empty();
    state.field_errors = errors;

    Transition {
        state,
        effects,
        rejection: None,
    }
}

fn enter_confirm(mut transition: Transition) -> Transition {
    transition.state.step = WizardStep::Confirm {
        snapshot: transition.state.form.clone(),
        disclaimer_acknowledged: false,
    };
    transition
}

fn blocking_error(state: &WizardState) -> WizardError {
    match (state.form.source_chain, state.form.destination_chain) {
        (Some(source), Some(destination)) if source != destination && !state.direction.is_supported() => {
            WizardError::RouteUnsupported {
                source_chain: source,
                destination_chain: destination,
            }
        }
        _ => WizardError::Validation(state.field_errors.clone()),
    }
}

fn reject_field(mut state: WizardState, field: FormField, message: impl Into<String>) -> Transition {
    let message = message.into();
    state.field_errors.remove(field);
    state.field_errors.insert(field, message.clone());
    let mut errors = FieldErrors::new();
    errors.insert(field, message);
    Transition::reject(state, WizardError::Validation(errors))
}

fn chain_address(ctx: &WizardContext, chain: Chain) -> String {
    ctx.session.address_for_chain(chain).unwrap_or_default().to_string()
}

fn default_asset(ctx: &WizardContext, chain: Chain) -> Option<String> {
    ctx.session
        .asset_for_chain(chain)
        .filter(|a| ctx.is_bridge_asset(a))
        .map(|a| a.identifier.clone())
}

/// Chain changes reset the amount and pick the source chain's native asset.
fn reset_asset(form: &mut TransferForm, ctx: &WizardContext) {
    form.amount.clear();
    form.asset_id = form.source_chain.and_then(|c| default_asset(ctx, c));
}

fn transfer_heading(snapshot: &TransferForm, asset: Option<&UserAsset>) -> String {
    let symbol = asset.map(|a| a.symbol.as_str()).unwrap_or_default();
    format!("Bridge transfer of {} {}", snapshot.amount.trim(), symbol)
}

fn pending_entry(snapshot: &TransferForm, asset: &UserAsset) -> ProgressEntry {
    let label = |chain: Option<Chain>| chain.map(|c| c.label()).unwrap_or_default();
    ProgressEntry::new(
        ProgressKind::Pending,
        transfer_heading(snapshot, Some(asset)),
        format!(
            "From {} to {}",
            label(snapshot.source_chain),
            label(snapshot.destination_chain)
        ),
    )
}
