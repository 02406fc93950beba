//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use bridge_wizard::bridge::store::RouteConfigStore;
use bridge_wizard::bridge::types::{BridgeTransferDirection, NetworkKind, RouteConfig};
use bridge_wizard::config::schema::{BridgeSettings, TimeoutConfig};
use bridge_wizard::services::{
    AnalyticsSink, BridgeService, BridgeTransferRequest, BroadcastResult, SecretPhrase, SecretStore, ServiceError,
    ServiceResult, TransferService,
};
use bridge_wizard::session::SessionSnapshot;
use bridge_wizard::{BridgeWizard, WizardContext, WizardServices};

pub const PASSWORD: &str = "correct horse";
pub const WALLET_ADDRESS: &str = "tcro1qqqsyqcyq5rqwzqfpg9scrgwpugpzysnzs23v";
pub const EVM_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

/// Testnet session: 50 TCRO on Crypto.org, 20 CRONOS on Cronos.
pub fn session(wallet_type: &str) -> SessionSnapshot {
    let json = format!(
        r#"{{
            "wallet": {{
                "identifier": "wallet-1",
                "name": "Main",
                "address": "{wallet}",
                "walletType": "{wallet_type}",
                "network": "testnet",
                "explorerUrl": "https://explorer.example/croeseid"
            }},
            "assets": [
                {{
                    "identifier": "tcro", "name": "Crypto.org Coin", "symbol": "TCRO",
                    "mainnetSymbol": "CRO", "assetType": "TENDERMINT", "decimals": 8,
                    "balance": "5000000000", "address": "{wallet}"
                }},
                {{
                    "identifier": "cronos", "name": "Cronos", "symbol": "CRONOS",
                    "mainnetSymbol": "CRO", "assetType": "EVM", "decimals": 18,
                    "balance": "20000000000000000000", "address": "{evm}",
                    "explorerUrl": "https://cronos.example"
                }}
            ]
        }}"#,
        wallet = WALLET_ADDRESS,
        evm = EVM_ADDRESS,
        wallet_type = wallet_type,
    );
    serde_json::from_str(&json).unwrap()
}

/// Secret store accepting only `PASSWORD`.
#[derive(Default)]
pub struct MockSecrets {
    pub calls: AtomicUsize,
}

#[async_trait]
impl SecretStore for MockSecrets {
    async fn decrypt_secret(&self, password: &str, _wallet_id: &str) -> ServiceResult<SecretPhrase> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if password == PASSWORD {
            Ok(SecretPhrase::new("abandon abandon about"))
        } else {
            Err(ServiceError::InvalidPassword)
        }
    }

    async fn validate_password(&self, password: &str) -> ServiceResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(password == PASSWORD)
    }
}

/// Route service backed by the real store, with a per-direction delay.
pub struct DelayedBridge {
    store: RouteConfigStore,
    delays: HashMap<BridgeTransferDirection, Duration>,
}

impl DelayedBridge {
    pub fn new(delays: &[(BridgeTransferDirection, u64)]) -> Self {
        Self {
            store: RouteConfigStore::new(None),
            delays: delays
                .iter()
                .map(|(d, ms)| (*d, Duration::from_millis(*ms)))
                .collect(),
        }
    }
}

#[async_trait]
impl BridgeService for DelayedBridge {
    async fn retrieve_route_config(
        &self,
        network: NetworkKind,
        direction: BridgeTransferDirection,
    ) -> ServiceResult<RouteConfig> {
        if let Some(delay) = self.delays.get(&direction) {
            tokio::time::sleep(*delay).await;
        }
        Ok(self.store.get(network, direction))
    }

    async fn update_route_config(&self, config: RouteConfig) -> ServiceResult<()> {
        self.store.update(config).map_err(|e| ServiceError::Rejected(e.to_string()))
    }

    async fn reset_route_config(
        &self,
        network: NetworkKind,
        direction: BridgeTransferDirection,
    ) -> ServiceResult<RouteConfig> {
        self.store
            .reset(network, direction)
            .map_err(|e| ServiceError::Transport(e.to_string()))
    }
}

pub enum TransferOutcome {
    Broadcast(&'static str),
    Fail(ServiceError),
    Hang,
}

/// Transfer service with a fixed outcome that records every request.
pub struct ScriptedTransfers {
    outcome: TransferOutcome,
    pub requests: Mutex<Vec<BridgeTransferRequest>>,
}

impl ScriptedTransfers {
    pub fn new(outcome: TransferOutcome) -> Self {
        Self {
            outcome,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TransferService for ScriptedTransfers {
    async fn submit_bridge_transfer(&self, request: BridgeTransferRequest) -> ServiceResult<BroadcastResult> {
        self.requests.lock().unwrap().push(request);
        match &self.outcome {
            TransferOutcome::Broadcast(hash) => Ok(BroadcastResult {
                transaction_hash: Some(hash.to_string()),
            }),
            TransferOutcome::Fail(e) => Err(e.clone()),
            TransferOutcome::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(BroadcastResult::default())
            }
        }
    }
}

#[derive(Default)]
pub struct RecordingAnalytics {
    pub pages: Mutex<Vec<String>>,
}

impl AnalyticsSink for RecordingAnalytics {
    fn log_page(&self, page: &str) {
        self.pages.lock().unwrap().push(page.to_string());
    }
}

pub struct Harness {
    pub wizard: BridgeWizard,
    pub secrets: Arc<MockSecrets>,
    pub transfers: Arc<ScriptedTransfers>,
    pub analytics: Arc<RecordingAnalytics>,
}

pub struct HarnessBuilder {
    wallet_type: &'static str,
    settings: BridgeSettings,
    timeouts: TimeoutConfig,
    bridge: DelayedBridge,
    outcome: TransferOutcome,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        Self {
            wallet_type: "normal",
            settings: BridgeSettings::default(),
            timeouts: TimeoutConfig::default(),
            bridge: DelayedBridge::new(&[]),
            outcome: TransferOutcome::Broadcast("ABCDEF0123456789"),
        }
    }

    pub fn ledger(mut self) -> Self {
        self.wallet_type = "ledger";
        self
    }

    pub fn settings(mut self, settings: BridgeSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn bridge(mut self, bridge: DelayedBridge) -> Self {
        self.bridge = bridge;
        self
    }

    pub fn outcome(mut self, outcome: TransferOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn build(self) -> Harness {
        let secrets = Arc::new(MockSecrets::default());
        let transfers = Arc::new(ScriptedTransfers::new(self.outcome));
        let analytics = Arc::new(RecordingAnalytics::default());
        let ctx = Arc::new(WizardContext::new(session(self.wallet_type), self.settings));
        let services = WizardServices {
            secrets: secrets.clone(),
            bridge: Arc::new(self.bridge),
            transfers: transfers.clone(),
            analytics: analytics.clone(),
        };
        Harness {
            wizard: BridgeWizard::new(ctx, services, self.timeouts),
            secrets,
            transfers,
            analytics,
        }
    }
}

/// Start a mock wallet daemon on an ephemeral port.
///
/// `f` maps `(path, body)` to `(status, body)`.
pub async fn start_mock_wallet<F>(f: F) -> SocketAddr
where
    F: Fn(&str, &str) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let Some((path, body)) = read_request(&mut socket).await else {
                            return;
                        };
                        let (status, reply) = f(&path, &body);
                        let status_text = match status {
                            200 => "200 OK",
                            401 => "401 Unauthorized",
                            500 => "500 Internal Server Error",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            reply.len(),
                            reply
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Option<(String, String)> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let path = head.lines().next()?.split_whitespace().nth(1)?.to_string();
    let content_length = head
        .lines()
        .filter_map(|l| l.split_once(':'))
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();
    Some((path, body))
}
