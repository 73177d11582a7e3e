//! Configuration - passed in by the embedding application

use std::time::Duration;

use crate::wallet::DEFAULT_FEE_PER_BYTE;

/// Relay endpoint settings.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Base URL, e.g. `https://relay.example.com`. A trailing `/` is ignored.
    pub url: String,
    /// Whole-request timeout enforced by the HTTP client.
    pub timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self { url: "http://localhost:8080".into(), timeout: Duration::from_secs(30) }
    }
}

impl RelayConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), ..Default::default() }
    }
    pub fn with_timeout(mut self, timeout: Duration) -> Self { self.timeout = timeout; self }

    #[cfg(feature = "native")]
    pub(crate) fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Wallet settings. `fee_per_byte: None` means "unset"; rehydration fills in the default.
#[derive(Debug, Clone)]
pub struct WalletConfig {
    pub fee_per_byte: Option<u64>,
}

impl Default for WalletConfig {
    fn default() -> Self { Self { fee_per_byte: Some(DEFAULT_FEE_PER_BYTE) } }
}

impl WalletConfig {
    pub fn with_fee_per_byte(mut self, fee: u64) -> Self { self.fee_per_byte = Some(fee); self }
    /// Config for a wallet restored from storage that never recorded a fee.
    pub fn unset_fee() -> Self { Self { fee_per_byte: None } }
}
