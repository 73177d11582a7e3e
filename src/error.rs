//! Error types.

use thiserror::Error;

/// Failures while decoding or authenticating an envelope.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("malformed envelope: {0}")]
    Malformed(#[from] prost::DecodeError),

    #[error("unsupported signature scheme {0}")]
    UnsupportedScheme(i32),

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid signature")]
    InvalidSignature,
}

/// Failures talking to a relay. Nothing here is retried internally.
#[cfg(feature = "native")]
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("relay rejected auth token: {url}")]
    Unauthorized { url: String },

    #[error("relay unreachable: {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("relay rejected request {url}: HTTP {status}: {body}")]
    Rejected { url: String, status: u16, body: String },

    #[error("relay sent undecodable body from {url}: {source}")]
    Malformed {
        url: String,
        #[source]
        source: EnvelopeError,
    },

    #[error("HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[cfg(feature = "native")]
impl RelayError {
    /// Transport-level failures a caller may reasonably retry.
    pub fn is_transient(&self) -> bool {
        match self {
            RelayError::Unreachable { .. } => true,
            RelayError::Rejected { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Failures reading or writing the outpoint store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("outpoint store io: {0}")]
    Io(#[from] std::io::Error),

    #[error("outpoint record at line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("outpoint encode: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum RehydrateError {
    #[error("rehydration failed: {0}")]
    RehydrationFailed(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("mnemonic: {0}")]
    Mnemonic(#[from] bip39::Error),

    #[error("key derivation: {0}")]
    KeyDerivation(#[from] bitcoin::bip32::Error),
}
