//! Analytics sink that records page views as tracing events.

use crate::services::AnalyticsSink;

/// Emits one `info` event per page view, tagged with the wallet id.
#[derive(Debug, Clone)]
pub struct TracingAnalytics {
    wallet_id: String,
}

impl TracingAnalytics {
    pub fn new(wallet_id: impl Into<String>) -> Self {
        Self {
            wallet_id: wallet_id.into(),
        }
    }
}

impl AnalyticsSink for TracingAnalytics {
    fn log_page(&self, page: &str) {
        tracing::info!(target: "analytics", wallet_id = %self.wallet_id, page = page, "Page view");
    }
}
