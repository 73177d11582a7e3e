//! Relaywallet: signed relay envelopes and a rehydrating UTXO ledger.
//!
//! # Architecture
//!
//! ```text
//! Payload / Filter
//!   │
//!   ├── wire (prost, deterministic bytes)
//!   │
//!   ├── EnvelopeSigner (sha256 → secp256k1 ECDSA, compact)
//!   │     └── Message / FilterApplication
//!   │
//!   └── RelayClient (reqwest)
//!         └── GET/PUT /message/{address}
//!
//! Wallet
//!   ├── xpriv / seed phrase
//!   └── UtxoLedger ◄── rehydrate() ◄── OutpointStore
//! ```
//!
//! # Features
//!
//! - `native` (default) - HTTP relay client, JSON-lines outpoint store, log init
//!
//! # Usage
//!
//! ```ignore
//! use relaywallet::{EnvelopeSigner, Entry, Payload, RelayClient, Wallet};
//!
//! let mut wallet = Wallet::from_mnemonic("abandon abandon ...", Network::Bitcoin)?;
//! relaywallet::wallet::rehydrate(&mut wallet, &store).await?;
//!
//! let key = wallet.signing_key().expect("keyed wallet");
//! let message = EnvelopeSigner::new().text_message("hello", &key);
//! RelayClient::new("https://relay.example.com")?
//!     .publish_messages("1BoatSLRHtKNngkdXEeobR76b53LETtpyT", &[message])
//!     .await?;
//! ```

// =============================================================================
// Shared modules (compile everywhere)
// =============================================================================
pub mod config;
pub mod envelope;
pub mod error;
pub mod wallet;
pub mod wire;

// =============================================================================
// Native-only modules (HTTP, filesystem, subscriber)
// =============================================================================
#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod relay;

// =============================================================================
// Re-exports
// =============================================================================
pub use config::{RelayConfig, WalletConfig};
pub use envelope::{Envelope, EnvelopeSigner, SignatureScheme};
pub use error::{EnvelopeError, RehydrateError, StoreError, WalletError};
pub use wallet::{LedgerEvent, Outpoint, UtxoLedger, Wallet};
pub use wire::{Entry, Filter, FilterApplication, Message, Payload, PriceFilter};

#[cfg(feature = "native")]
pub use error::RelayError;
#[cfg(feature = "native")]
pub use relay::RelayClient;
