//! Rehydrate - Rebuild a wallet's ledger from the outpoint store on load

use futures_util::StreamExt;
use tracing::{debug, info, warn};

use crate::error::RehydrateError;
use crate::wallet::store::OutpointStore;
use crate::wallet::{Wallet, DEFAULT_FEE_PER_BYTE};

/// What a rehydration pass kept and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RehydrateSummary {
    pub retained: usize,
    pub skipped: usize,
}

/// Replace the wallet's ledger with every addressed outpoint in `store`.
///
/// Returns `Ok(None)` without touching anything when the wallet has no key.
/// Run once at load, before any live add/remove traffic. If the store fails
/// mid-stream the ledger is left empty and the error is returned.
pub async fn rehydrate<S>(wallet: &mut Wallet, store: &S) -> Result<Option<RehydrateSummary>, RehydrateError>
where
    S: OutpointStore + ?Sized,
{
    if wallet.xpriv().is_none() {
        debug!("no signing key, skipping rehydration");
        return Ok(None);
    }
    if wallet.fee_per_byte().unwrap_or(0) == 0 {
        wallet.set_fee_per_byte(DEFAULT_FEE_PER_BYTE);
    }
    wallet.ledger_mut().clear();

    let mut staged = Vec::new();
    let mut summary = RehydrateSummary::default();
    let mut outpoints = store.outpoints().await?;
    while let Some(record) = outpoints.next().await {
        let outpoint = match record {
            Ok(outpoint) => outpoint,
            Err(e) => {
                warn!(error = %e, retained = staged.len(), "outpoint store failed during rehydration");
                return Err(e.into());
            }
        };
        if outpoint.address.is_none() {
            summary.skipped += 1;
            continue;
        }
        staged.push(outpoint);
    }

    summary.retained = staged.len();
    wallet.ledger_mut().replace_all(staged);
    info!(
        retained = summary.retained,
        skipped = summary.skipped,
        balance = %wallet.balance(),
        "wallet rehydrated"
    );
    Ok(Some(summary))
}
