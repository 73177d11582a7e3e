//! Integration Tests: UTXO ledger and wallet rehydration
//!
//! These tests verify:
//! 1. Balance tracks adds and removes
//! 2. Rehydration from a JSON-lines store skips unaddressed outpoints
//! 3. Rehydrating a keyless wallet does nothing
//! 4. A corrupt store aborts rehydration with an empty ledger
//! 5. Ledger events reach subscribers

#![cfg(feature = "native")]

use bitcoin::hashes::Hash;
use bitcoin::{Network, OutPoint, Txid};
use relaywallet::wallet::{rehydrate, JsonLinesOutpointStore, MemoryOutpointStore, RehydrateSummary};
use relaywallet::{LedgerEvent, Outpoint, RehydrateError, StoreError, Wallet, WalletConfig};
use std::str::FromStr;
use tempfile::TempDir;

// Test mnemonic (well-known, never use with real funds)
const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

fn txid_a() -> Txid {
    Txid::from_byte_array([0xaa; 32])
}

fn addressed(txid: Txid, index: u32, satoshis: u64) -> Outpoint {
    Outpoint::new(txid, index, Some("1BoatSLRHtKNngkdXEeobR76b53LETtpyT".into()), satoshis)
}

/// Test: A:0 (1000) + A:1 (500) = 1500, removing A:0 leaves 500
#[test]
fn balance_follows_add_and_remove() {
    let mut wallet = Wallet::new();
    wallet.add_utxo(addressed(txid_a(), 0, 1000));
    wallet.add_utxo(addressed(txid_a(), 1, 500));
    assert_eq!(wallet.balance(), 1500);

    let id = OutPoint::from_str(&format!("{}:0", txid_a())).expect("outpoint id");
    let removed = wallet.remove_utxo(&id).expect("was present");
    assert_eq!(removed.satoshis, 1000);
    assert_eq!(wallet.balance(), 500);

    // observing the same spend twice is harmless
    assert!(wallet.remove_utxo(&id).is_none());
    assert_eq!(wallet.balance(), 500);
}

/// Test: the ledger view lists exactly what was added
#[test]
fn utxo_view_matches_entries() {
    let mut wallet = Wallet::new();
    for i in 0..5 {
        wallet.add_utxo(addressed(txid_a(), i, 100 + u64::from(i)));
    }
    wallet.add_utxo(addressed(txid_a(), 2, 102));
    let ids: Vec<String> = wallet.utxos().map(|(id, _)| id.to_string()).collect();
    assert_eq!(ids.len(), 5);
    assert_eq!(ids[0], format!("{}:0", txid_a()));
    let sum: u128 = wallet.utxos().map(|(_, o)| u128::from(o.satoshis)).sum();
    assert_eq!(wallet.balance(), sum);
}

/// Test: rehydration from a file store keeps only addressed outpoints
#[tokio::test]
async fn rehydrate_from_jsonl_store() {
    let dir = TempDir::new().expect("tempdir");
    let store = JsonLinesOutpointStore::new(dir.path().join("outpoints.jsonl"));

    let kept_a = addressed(txid_a(), 0, 1000);
    let kept_b = addressed(txid_a(), 1, 500);
    let unattributed = Outpoint::new(Txid::from_byte_array([0xbb; 32]), 0, None, 42);
    for o in [&kept_a, &unattributed, &kept_b] {
        store.append(o).await.expect("append");
    }

    let mut wallet = Wallet::from_mnemonic(TEST_MNEMONIC, Network::Bitcoin).expect("wallet");
    let summary = rehydrate(&mut wallet, &store).await.expect("rehydrate").expect("keyed");

    assert_eq!(summary, RehydrateSummary { retained: 2, skipped: 1 });
    assert_eq!(wallet.balance(), 1500);
    assert!(wallet.ledger().contains(&kept_a.id()));
    assert!(wallet.ledger().contains(&kept_b.id()));
    assert!(!wallet.ledger().contains(&unattributed.id()));

    // restarting from storage yields the same ledger
    let mut again = Wallet::from_mnemonic(TEST_MNEMONIC, Network::Bitcoin).expect("wallet");
    rehydrate(&mut again, &store).await.expect("rehydrate");
    let first: Vec<_> = wallet.utxos().map(|(id, _)| *id).collect();
    let second: Vec<_> = again.utxos().map(|(id, _)| *id).collect();
    assert_eq!(first, second);
}

/// Test: a wallet without key material is left alone
#[tokio::test]
async fn rehydrate_keyless_wallet_is_noop() {
    let store = MemoryOutpointStore::new(vec![addressed(txid_a(), 0, 1000)]);
    let mut wallet = Wallet::from_config(&WalletConfig::unset_fee());

    let result = rehydrate(&mut wallet, &store).await.expect("no error");
    assert!(result.is_none());
    assert!(wallet.ledger().is_empty());
    assert_eq!(wallet.fee_per_byte(), None);
}

/// Test: restored wallet without a fee gets the default
#[tokio::test]
async fn rehydrate_sets_missing_fee() {
    let mut wallet = Wallet::from_config(&WalletConfig::unset_fee());
    wallet.set_mnemonic(TEST_MNEMONIC, Network::Testnet).expect("mnemonic");
    rehydrate(&mut wallet, &MemoryOutpointStore::default()).await.expect("rehydrate");
    assert_eq!(wallet.fee_per_byte(), Some(2));
}

/// Test: a corrupt line aborts rehydration and nothing partial is kept
#[tokio::test]
async fn corrupt_store_aborts_rehydration() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("outpoints.jsonl");
    let good = serde_json::to_string(&addressed(txid_a(), 0, 1000)).expect("json");
    std::fs::write(&path, format!("{good}\n{{\"txId\": 12}}\n")).expect("write");

    let mut wallet = Wallet::from_mnemonic(TEST_MNEMONIC, Network::Bitcoin).expect("wallet");
    wallet.add_utxo(addressed(txid_a(), 7, 1));
    let err = rehydrate(&mut wallet, &JsonLinesOutpointStore::new(&path)).await.unwrap_err();

    assert!(matches!(err, RehydrateError::RehydrationFailed(StoreError::Decode { line: 2, .. })));
    assert!(wallet.ledger().is_empty());
}

/// Test: subscribers see rehydration and live traffic in order
#[tokio::test]
async fn ledger_events_reach_subscribers() {
    let mut wallet = Wallet::from_mnemonic(TEST_MNEMONIC, Network::Bitcoin).expect("wallet");
    let mut rx = wallet.subscribe();

    let store = MemoryOutpointStore::new(vec![addressed(txid_a(), 0, 1000)]);
    rehydrate(&mut wallet, &store).await.expect("rehydrate");
    let live = addressed(txid_a(), 1, 500);
    wallet.add_utxo(live.clone());
    wallet.remove_utxo(&live.id());

    assert_eq!(rx.recv().await.expect("event"), LedgerEvent::Cleared);
    assert_eq!(rx.recv().await.expect("event"), LedgerEvent::Rehydrated { count: 1 });
    assert_eq!(rx.recv().await.expect("event"), LedgerEvent::Added(live.id()));
    assert_eq!(rx.recv().await.expect("event"), LedgerEvent::Removed(live.id()));
}
