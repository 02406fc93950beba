//! Runs the reducer against real services.
//!
//! `BridgeWizard` owns the state, applies events through `reduce`, and turns
//! effects into spawned service calls. Completions come back over a channel
//! and are applied with `process_next` / `settle`, so every state change
//! still goes through the reducer.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::{validate_password_entry, PasswordEntry, PasswordPolicy};
use crate::bridge::types::{BridgeTransferDirection, RouteConfig};
use crate::bridge::validation::validate_route_config;
use crate::config::schema::TimeoutConfig;
use crate::observability::metrics;
use crate::services::{AnalyticsSink, BridgeService, SecretStore, ServiceError, TransferService};
use crate::wizard::context::WizardContext;
use crate::wizard::error::WizardError;
use crate::wizard::event::{Effect, WizardEvent};
use crate::wizard::history::{now_secs, TransactionDirection, TransactionStatus, TransferHistory, TransferRecord};
use crate::wizard::preview::{preview, TransferPreview};
use crate::wizard::reducer::{is_stale, reduce, Transition};
use crate::wizard::state::{WizardState, WizardStep};

const PAGE_NAME: &str = "Bridge";

/// Services the wizard consumes.
#[derive(Clone)]
pub struct WizardServices {
    pub secrets: Arc<dyn SecretStore>,
    pub bridge: Arc<dyn BridgeService>,
    pub transfers: Arc<dyn TransferService>,
    pub analytics: Arc<dyn AnalyticsSink>,
}

pub struct BridgeWizard {
    id: Uuid,
    ctx: Arc<WizardContext>,
    services: WizardServices,
    timeouts: TimeoutConfig,
    state: WizardState,
    history: TransferHistory,
    completions_tx: mpsc::UnboundedSender<WizardEvent>,
    completions_rx: mpsc::UnboundedReceiver<WizardEvent>,
    in_flight: usize,
}

impl BridgeWizard {
    pub fn new(ctx: Arc<WizardContext>, services: WizardServices, timeouts: TimeoutConfig) -> Self {
        let id = Uuid::new_v4();
        services.analytics.log_page(PAGE_NAME);
        info!(
            wizard_id = %id,
            wallet = %ctx.session.wallet.identifier,
            network = ctx.network().as_str(),
            "Bridge wizard started"
        );

        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            id,
            ctx,
            services,
            timeouts,
            state: WizardState::new(),
            history: TransferHistory::new(),
            completions_tx,
            completions_rx,
            in_flight: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn context(&self) -> &WizardContext {
        &self.ctx
    }

    pub fn history(&self) -> &TransferHistory {
        &self.history
    }

    /// Whether service calls are still running.
    pub fn has_pending(&self) -> bool {
        self.in_flight > 0
    }

    /// Apply one event. Returns why it was refused, if it was.
    pub fn dispatch(&mut self, event: WizardEvent) -> Option<WizardError> {
        let name = event.name();
        let step_before = self.state.step.index();
        let old = std::mem::take(&mut self.state);
        let Transition {
            state,
            effects,
            rejection,
        } = reduce(old, event, &self.ctx);
        self.state = state;

        match &rejection {
            Some(WizardError::Validation(errors)) => {
                for (field, _) in errors.iter() {
                    metrics::record_validation_rejection(field.as_str());
                }
                debug!(wizard_id = %self.id, event = name, errors = %errors, "Event rejected");
            }
            Some(err) => debug!(wizard_id = %self.id, event = name, error = %err, "Event rejected"),
            None => {}
        }
        if self.state.step.index() != step_before {
            info!(wizard_id = %self.id, step = self.state.step.name(), "Wizard step changed");
        }

        for effect in effects {
            self.run(effect);
        }
        rejection
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::FetchRouteConfig {
                generation,
                network,
                direction,
            } => {
                let bridge = self.services.bridge.clone();
                let deadline = self.timeouts.route_fetch_secs;
                self.spawn(async move {
                    let fetched = timeout(
                        Duration::from_secs(deadline),
                        bridge.retrieve_route_config(network, direction),
                    )
                    .await
                    .unwrap_or(Err(ServiceError::Timeout(deadline)));
                    match fetched {
                        Ok(config) => {
                            metrics::record_route_fetch(direction.as_str(), "ok");
                            WizardEvent::RouteConfigLoaded { generation, config }
                        }
                        Err(e) => {
                            metrics::record_route_fetch(direction.as_str(), "error");
                            warn!(direction = direction.as_str(), error = %e, "Route configuration fetch failed");
                            WizardEvent::RouteConfigFailed {
                                generation,
                                reason: e.to_string(),
                            }
                        }
                    }
                });
            }
            Effect::PromptPassword => {
                debug!(wizard_id = %self.id, "Waiting for wallet password");
            }
            Effect::SubmitTransfer(request) => {
                let transfers = self.services.transfers.clone();
                let deadline = self.timeouts.submission_secs;
                let direction = request.direction;
                info!(
                    wizard_id = %self.id,
                    direction = direction.as_str(),
                    amount = %request.amount,
                    symbol = %request.asset.symbol,
                    "Submitting bridge transfer"
                );
                self.spawn(async move {
                    let submitted = timeout(Duration::from_secs(deadline), transfers.submit_bridge_transfer(request))
                        .await
                        .unwrap_or(Err(ServiceError::Timeout(deadline)));
                    match submitted {
                        Ok(result) => {
                            metrics::record_transfer(direction.as_str(), "success");
                            WizardEvent::SubmissionSucceeded(result)
                        }
                        Err(e) => {
                            metrics::record_transfer(direction.as_str(), "failed");
                            WizardEvent::SubmissionFailed(e.to_string())
                        }
                    }
                });
            }
        }
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: std::future::Future<Output = WizardEvent> + Send + 'static,
    {
        let tx = self.completions_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let event = task.await;
            if tx.send(event).is_err() {
                debug!("Wizard dropped before service call completed");
            }
        });
    }

    /// Wait for the next service completion and apply it.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn process_next(&mut self) -> Option<Option<WizardError>> {
        if self.in_flight == 0 {
            return None;
        }
        let event = self.completions_rx.recv().await?;
        self.in_flight -= 1;
        Some(self.complete(event))
    }

    /// Apply completions until no service call is running.
    pub async fn settle(&mut self) {
        while self.process_next().await.is_some() {}
    }

    fn complete(&mut self, event: WizardEvent) -> Option<WizardError> {
        match &event {
            WizardEvent::RouteConfigLoaded { generation, .. } | WizardEvent::RouteConfigFailed { generation, .. }
                if is_stale(&self.state, *generation) =>
            {
                metrics::record_stale_route_fetch();
                debug!(
                    wizard_id = %self.id,
                    generation,
                    current = self.state.route_generation,
                    "Discarding stale route configuration"
                );
            }
            _ => {}
        }
        let is_submission = matches!(
            event,
            WizardEvent::SubmissionSucceeded(_) | WizardEvent::SubmissionFailed(_)
        );
        let rejection = self.dispatch(event);
        if is_submission && rejection.is_none() {
            self.record_history();
        }
        rejection
    }

    fn record_history(&mut self) {
        let WizardStep::Execute {
            snapshot,
            result: Some(result),
        } = &self.state.step
        else {
            return;
        };
        let symbol = snapshot
            .asset_id
            .as_deref()
            .and_then(|id| self.ctx.session.find_asset(id))
            .map(|a| a.symbol.clone())
            .unwrap_or_default();
        let direction = match (snapshot.source_chain, snapshot.destination_chain) {
            (Some(source), Some(destination)) => BridgeTransferDirection::from_pair(source, destination),
            _ => BridgeTransferDirection::NotSupport,
        };
        let record = TransferRecord {
            transaction_hash: result.transaction_hash.clone(),
            sender: snapshot.source_address.clone(),
            recipient: snapshot.destination_address.clone(),
            amount: snapshot.amount.trim().to_string(),
            symbol,
            bridge_direction: direction,
            direction: TransactionDirection::classify(
                &self.ctx.session.own_addresses(),
                &snapshot.source_address,
                &snapshot.destination_address,
            ),
            status: if result.is_success() {
                TransactionStatus::Success
            } else {
                TransactionStatus::Failed
            },
            time: now_secs(),
        };
        info!(
            wizard_id = %self.id,
            key = %record.key(),
            status = ?record.status,
            "Bridge transfer finished"
        );
        self.history.push(record);
    }

    /// Check the password and decrypt the wallet secret.
    ///
    /// Only valid while the password prompt is open. A wrong password keeps
    /// the prompt open and returns `WizardError::Auth`.
    pub async fn submit_password(&mut self, entry: PasswordEntry) -> Option<WizardError> {
        if !self.state.awaiting_password {
            return Some(WizardError::invalid_transition(self.state.step.name(), "submit_password"));
        }
        let password = match validate_password_entry(&entry, PasswordPolicy::unlock()) {
            Ok(password) => password,
            Err(e) => {
                metrics::record_auth_attempt("malformed");
                return self.dispatch(WizardEvent::PasswordRejected(e.to_string()));
            }
        };

        let deadline = self.timeouts.password_secs;
        let secrets = self.services.secrets.clone();
        let checked = timeout(Duration::from_secs(deadline), secrets.validate_password(password))
            .await
            .unwrap_or(Err(ServiceError::Timeout(deadline)));
        match checked {
            Ok(true) => {}
            Ok(false) | Err(ServiceError::InvalidPassword) => {
                metrics::record_auth_attempt("invalid");
                return self.dispatch(WizardEvent::PasswordRejected("Incorrect password".to_string()));
            }
            Err(e) => {
                metrics::record_auth_attempt("error");
                return self.dispatch(WizardEvent::PasswordRejected(e.to_string()));
            }
        }

        let wallet_id = self.ctx.session.wallet.identifier.clone();
        let decrypted = timeout(Duration::from_secs(deadline), secrets.decrypt_secret(password, &wallet_id))
            .await
            .unwrap_or(Err(ServiceError::Timeout(deadline)));
        match decrypted {
            Ok(secret) => {
                metrics::record_auth_attempt("accepted");
                self.dispatch(WizardEvent::PasswordVerified(secret))
            }
            Err(ServiceError::InvalidPassword) => {
                metrics::record_auth_attempt("invalid");
                self.dispatch(WizardEvent::PasswordRejected("Incorrect password".to_string()))
            }
            Err(e) => {
                metrics::record_auth_attempt("error");
                self.dispatch(WizardEvent::PasswordRejected(e.to_string()))
            }
        }
    }

    pub fn cancel_password(&mut self) -> Option<WizardError> {
        self.dispatch(WizardEvent::CancelPassword)
    }

    pub fn preview(&self) -> Option<TransferPreview> {
        preview(&self.state.form, &self.ctx)
    }

    /// Validate and persist edited route parameters, then use them.
    pub async fn update_route_config(&mut self, config: RouteConfig) -> Result<(), WizardError> {
        if !matches!(self.state.step, WizardStep::Configure) || !self.state.direction.is_supported() {
            return Err(WizardError::invalid_transition(self.state.step.name(), "update_route_config"));
        }
        if config.direction != self.state.direction || config.network != self.ctx.network() {
            return Err(WizardError::RouteConfig(
                "configuration does not match the selected route".to_string(),
            ));
        }
        validate_route_config(&config).map_err(|errors| {
            let message = errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", ");
            WizardError::RouteConfig(message)
        })?;

        let deadline = self.timeouts.route_fetch_secs;
        timeout(
            Duration::from_secs(deadline),
            self.services.bridge.update_route_config(config.clone()),
        )
        .await
        .unwrap_or(Err(ServiceError::Timeout(deadline)))?;

        info!(wizard_id = %self.id, direction = config.direction.as_str(), "Bridge config updated");
        match self.dispatch(WizardEvent::RouteConfigEdited(config)) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Discard edits of the selected route and use the defaults again.
    pub async fn reset_route_config(&mut self) -> Result<RouteConfig, WizardError> {
        if !matches!(self.state.step, WizardStep::Configure) || !self.state.direction.is_supported() {
            return Err(WizardError::invalid_transition(self.state.step.name(), "reset_route_config"));
        }

        let deadline = self.timeouts.route_fetch_secs;
        let config = timeout(
            Duration::from_secs(deadline),
            self.services
                .bridge
                .reset_route_config(self.ctx.network(), self.state.direction),
        )
        .await
        .unwrap_or(Err(ServiceError::Timeout(deadline)))?;

        info!(wizard_id = %self.id, direction = config.direction.as_str(), "Bridge config reset");
        match self.dispatch(WizardEvent::RouteConfigEdited(config.clone())) {
            Some(err) => Err(err),
            None => Ok(config),
        }
    }
}
