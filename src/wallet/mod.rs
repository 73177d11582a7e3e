//! Wallet - Key material, fee setting and the UTXO ledger
//!
//! # Architecture
//!
//! ```text
//! Wallet
//!     │
//!     ├── xpriv / seed phrase (opaque signing material)
//!     │
//!     └── UtxoLedger ◄── rehydrate() ◄── OutpointStore (memory / JSON lines)
//!             │
//!             └── broadcast::Receiver<LedgerEvent>
//! ```
//!
//! The wallet owns its ledger. Load order: build the wallet, `rehydrate` it,
//! then apply live `add_utxo` / `remove_utxo` traffic.

mod ledger;
mod rehydrate;
mod store;

pub use ledger::{LedgerEvent, Outpoint, UtxoLedger};
pub use rehydrate::{rehydrate, RehydrateSummary};
#[cfg(feature = "native")]
pub use store::JsonLinesOutpointStore;
pub use store::{MemoryOutpointStore, OutpointStore, OutpointStream};

use bitcoin::bip32::Xpriv;
use bitcoin::{Network, OutPoint, PrivateKey};
use tokio::sync::broadcast;
use zeroize::Zeroizing;

use crate::config::WalletConfig;
use crate::error::WalletError;

pub const DEFAULT_FEE_PER_BYTE: u64 = 2;

pub struct Wallet {
    xpriv: Option<Xpriv>,
    fee_per_byte: Option<u64>,
    utxos: UtxoLedger,
    seed_phrase: Option<Zeroizing<String>>,
}

impl Default for Wallet {
    fn default() -> Self { Self::new() }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("has_key", &self.xpriv.is_some())
            .field("fee_per_byte", &self.fee_per_byte)
            .field("utxos", &self.utxos.len())
            .finish_non_exhaustive()
    }
}

impl Wallet {
    /// Empty wallet with no key and the default fee.
    pub fn new() -> Self {
        Self::from_config(&WalletConfig::default())
    }

    pub fn from_config(config: &WalletConfig) -> Self {
        Self {
            xpriv: None,
            fee_per_byte: config.fee_per_byte,
            utxos: UtxoLedger::new(),
            seed_phrase: None,
        }
    }

    /// Wallet keyed from a BIP39 phrase (empty passphrase, BIP32 master key).
    pub fn from_mnemonic(phrase: &str, network: Network) -> Result<Self, WalletError> {
        let mut wallet = Self::new();
        wallet.set_mnemonic(phrase, network)?;
        Ok(wallet)
    }

    pub fn set_mnemonic(&mut self, phrase: &str, network: Network) -> Result<(), WalletError> {
        let mnemonic = bip39::Mnemonic::parse(phrase)?;
        let seed = Zeroizing::new(mnemonic.to_seed(""));
        self.xpriv = Some(Xpriv::new_master(network, &seed[..])?);
        self.set_seed_phrase(phrase);
        Ok(())
    }

    pub fn set_seed_phrase(&mut self, phrase: impl Into<String>) {
        self.seed_phrase = Some(Zeroizing::new(phrase.into()));
    }

    pub fn seed_phrase(&self) -> Option<&str> {
        self.seed_phrase.as_deref().map(String::as_str)
    }

    pub fn set_xpriv(&mut self, xpriv: Xpriv) {
        self.xpriv = Some(xpriv);
    }

    pub fn xpriv(&self) -> Option<&Xpriv> {
        self.xpriv.as_ref()
    }

    /// Key used to sign relay envelopes.
    pub fn signing_key(&self) -> Option<PrivateKey> {
        self.xpriv.map(Xpriv::to_priv)
    }

    pub fn fee_per_byte(&self) -> Option<u64> {
        self.fee_per_byte
    }

    pub fn set_fee_per_byte(&mut self, fee: u64) {
        self.fee_per_byte = Some(fee);
    }

    pub fn clear_fee_per_byte(&mut self) {
        self.fee_per_byte = None;
    }

    /// Drop key material and every UTXO. The seed phrase is kept.
    pub fn reset(&mut self) {
        self.xpriv = None;
        self.utxos.clear();
    }

    pub fn add_utxo(&mut self, outpoint: Outpoint) -> Option<Outpoint> {
        self.utxos.add(outpoint)
    }

    pub fn remove_utxo(&mut self, id: &OutPoint) -> Option<Outpoint> {
        self.utxos.remove(id)
    }

    pub fn utxos(&self) -> impl Iterator<Item = (&OutPoint, &Outpoint)> + '_ {
        self.utxos.utxos()
    }

    pub fn balance(&self) -> u128 {
        self.utxos.balance()
    }

    pub fn ledger(&self) -> &UtxoLedger {
        &self.utxos
    }

    pub(crate) fn ledger_mut(&mut self) -> &mut UtxoLedger {
        &mut self.utxos
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.utxos.subscribe()
    }
}
