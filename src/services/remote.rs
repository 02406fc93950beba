//! HTTP client for the wallet daemon's secret store and transfer endpoints.
//!
//! # Endpoints
//! - `POST /secrets/validate` `{password}` → `{valid}`
//! - `POST /secrets/decrypt` `{password, walletId}` → `{phrase}`, 401 on a wrong password
//! - `POST /bridge/transfers` transfer payload → `{transactionHash}`

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::bridge::types::BridgeTransferDirection;
use crate::config::schema::WalletServiceConfig;
use crate::services::{
    BridgeTransferRequest, BroadcastResult, SecretPhrase, SecretStore, ServiceError, ServiceResult,
    TransferService,
};
use crate::session::asset::parse_amount;
use crate::session::WalletAuthMode;

#[derive(Serialize)]
struct ValidatePasswordBody<'a> {
    password: &'a str,
}

#[derive(Deserialize)]
struct ValidatePasswordResponse {
    valid: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DecryptBody<'a> {
    password: &'a str,
    wallet_id: &'a str,
}

#[derive(Deserialize)]
struct DecryptResponse {
    phrase: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransferBody<'a> {
    bridge_transfer_direction: BridgeTransferDirection,
    source_address: &'a str,
    destination_address: &'a str,
    amount: &'a str,
    amount_in_base_units: String,
    asset_identifier: &'a str,
    asset_symbol: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    decrypted_phrase: Option<&'a str>,
    wallet_auth_mode: WalletAuthMode,
}

/// Wallet daemon client implementing `SecretStore` and `TransferService`.
#[derive(Clone)]
pub struct RemoteWalletService {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl RemoteWalletService {
    /// Build a client from configuration.
    pub fn new(config: &WalletServiceConfig) -> ServiceResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = config.api_key.as_deref().filter(|k| !k.is_empty()) {
            let value = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|e| ServiceError::Transport(format!("Invalid API key header: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.request_timeout_secs,
        })
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> ServiceResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let res = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = res.status();
        let text = res.text().await.map_err(|e| self.map_transport_error(e))?;

        match status {
            s if s.is_success() => serde_json::from_str(&text).map_err(|e| ServiceError::Decode(e.to_string())),
            StatusCode::UNAUTHORIZED => Err(ServiceError::InvalidPassword),
            s => {
                tracing::warn!(path = path, status = %s, "Wallet service returned error status");
                Err(ServiceError::Rejected(format!("status {}: {}", s, text)))
            }
        }
    }

    fn map_transport_error(&self, e: reqwest::Error) -> ServiceError {
        if e.is_timeout() {
            ServiceError::Timeout(self.timeout_secs)
        } else {
            ServiceError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl SecretStore for RemoteWalletService {
    async fn decrypt_secret(&self, password: &str, wallet_id: &str) -> ServiceResult<SecretPhrase> {
        let response: DecryptResponse = self.post("/secrets/decrypt", &DecryptBody { password, wallet_id }).await?;
        Ok(SecretPhrase::new(response.phrase))
    }

    async fn validate_password(&self, password: &str) -> ServiceResult<bool> {
        match self
            .post::<_, ValidatePasswordResponse>("/secrets/validate", &ValidatePasswordBody { password })
            .await
        {
            Ok(response) => Ok(response.valid),
            Err(ServiceError::InvalidPassword) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl TransferService for RemoteWalletService {
    async fn submit_bridge_transfer(&self, request: BridgeTransferRequest) -> ServiceResult<BroadcastResult> {
        let base_units = parse_amount(&request.amount)
            .and_then(|amount| request.asset.to_base_units(amount))
            .map_err(|e| ServiceError::Rejected(e.to_string()))?;
        let body = TransferBody {
            bridge_transfer_direction: request.direction,
            source_address: &request.source_address,
            destination_address: &request.destination_address,
            amount: &request.amount,
            amount_in_base_units: base_units,
            asset_identifier: &request.asset.identifier,
            asset_symbol: &request.asset.symbol,
            decrypted_phrase: request.secret_phrase.as_ref().map(SecretPhrase::expose),
            wallet_auth_mode: request.wallet_auth_mode,
        };
        self.post("/bridge/transfers", &body).await
    }
}
