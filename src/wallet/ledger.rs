//! Ledger - In-memory UTXO set keyed by canonical outpoint identity

use bitcoin::{OutPoint, Txid};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::broadcast;

/// An output observed on chain. `address` is absent until the output is
/// attributed to a wallet-controlled address; such outputs are not ledgerable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outpoint {
    #[serde(rename = "txId")]
    pub txid: Txid,
    #[serde(rename = "outputIndex")]
    pub index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub satoshis: u64,
    /// Everything else the store recorded (script, height, ...), kept verbatim.
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl Outpoint {
    pub fn new(txid: Txid, index: u32, address: Option<String>, satoshis: u64) -> Self {
        Self { txid, index, address, satoshis, metadata: Map::new() }
    }

    /// Canonical identity, displayed as `<txid>:<index>`.
    pub fn id(&self) -> OutPoint {
        OutPoint::new(self.txid, self.index)
    }
}

/// Ledger change notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    Added(OutPoint),
    Removed(OutPoint),
    Cleared,
    Rehydrated { count: usize },
}

const EVENT_CAPACITY: usize = 64;

/// Unspent outputs owned by a wallet. Balance is always derived from the
/// entries present, never tracked on the side.
#[derive(Debug)]
pub struct UtxoLedger {
    utxos: IndexMap<OutPoint, Outpoint>,
    events: broadcast::Sender<LedgerEvent>,
}

impl Default for UtxoLedger {
    fn default() -> Self { Self::new() }
}

impl UtxoLedger {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { utxos: IndexMap::new(), events }
    }

    /// Subscribe to change notifications. Slow receivers lag; mutations never wait.
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }

    fn notify(&self, event: LedgerEvent) {
        // No receivers is fine
        let _ = self.events.send(event);
    }

    /// Insert or replace by canonical id. Re-adding an identical outpoint is a no-op.
    pub fn add(&mut self, outpoint: Outpoint) -> Option<Outpoint> {
        let id = outpoint.id();
        match self.utxos.get(&id) {
            Some(existing) if *existing == outpoint => return Some(outpoint),
            _ => {}
        }
        tracing::trace!(%id, satoshis = outpoint.satoshis, "utxo added");
        let previous = self.utxos.insert(id, outpoint);
        self.notify(LedgerEvent::Added(id));
        previous
    }

    /// Remove by canonical id. Absent ids are ignored.
    pub fn remove(&mut self, id: &OutPoint) -> Option<Outpoint> {
        let removed = self.utxos.swap_remove(id)?;
        tracing::trace!(%id, "utxo removed");
        self.notify(LedgerEvent::Removed(*id));
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.utxos.clear();
        self.notify(LedgerEvent::Cleared);
    }

    /// Swap the whole set for `outpoints` (later duplicates win).
    pub fn replace_all(&mut self, outpoints: impl IntoIterator<Item = Outpoint>) {
        self.utxos = outpoints.into_iter().map(|o| (o.id(), o)).collect();
        self.notify(LedgerEvent::Rehydrated { count: self.utxos.len() });
    }

    /// Sum of satoshis over present entries. Widened so no realistic set overflows.
    pub fn balance(&self) -> u128 {
        self.utxos.values().map(|o| u128::from(o.satoshis)).sum()
    }

    pub fn get(&self, id: &OutPoint) -> Option<&Outpoint> {
        self.utxos.get(id)
    }

    pub fn contains(&self, id: &OutPoint) -> bool {
        self.utxos.contains_key(id)
    }

    /// Read-only view of the current entries.
    pub fn utxos(&self) -> impl Iterator<Item = (&OutPoint, &Outpoint)> + '_ {
        self.utxos.iter()
    }

    pub fn len(&self) -> usize { self.utxos.len() }

    pub fn is_empty(&self) -> bool { self.utxos.is_empty() }
}
