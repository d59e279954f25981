//! Asset disposal
//!
//! Disposing an asset freezes its book value, books the gain or loss, and
//! retires it from depreciation. An asset is disposed at most once; the
//! record lives on the asset itself, so a second disposal is structurally
//! impossible to miss.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{
    notify_best_effort, AssetId, BusinessEvent, DisposalId, JournalEntryId, LedgerAccountId,
    Money, Notifier, TenantId,
};
use domain_ledger::{EntryDraft, Journal};

use crate::asset::{AssetStatus, FixedAsset};
use crate::error::AssetError;

/// The disposal record for an asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetDisposal {
    /// Unique identifier
    pub id: DisposalId,
    /// Disposed asset
    pub asset_id: AssetId,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Disposal date
    pub disposal_date: NaiveDate,
    /// Sale or scrap proceeds
    pub proceeds: Money,
    /// Book value frozen at the moment of disposal
    pub book_value_at_disposal: Money,
    /// Proceeds minus book value; positive is a gain, negative a loss
    pub gain_loss: Money,
    /// Journal entry booking the disposal
    pub journal_entry_id: Option<JournalEntryId>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl AssetDisposal {
    /// True when the disposal produced a gain
    pub fn is_gain(&self) -> bool {
        self.gain_loss.is_positive()
    }

    /// True when the disposal produced a loss
    pub fn is_loss(&self) -> bool {
        self.gain_loss.is_negative()
    }
}

/// Ledger accounts the disposal postings go to
#[derive(Debug, Clone, Copy)]
pub struct DisposalAccounts {
    /// Cash (debited with proceeds)
    pub cash: LedgerAccountId,
    /// Accumulated depreciation (debited to clear)
    pub accumulated_depreciation: LedgerAccountId,
    /// Fixed asset cost (credited to clear)
    pub asset_cost: LedgerAccountId,
    /// Gain on disposal (credited on a gain)
    pub disposal_gain: LedgerAccountId,
    /// Loss on disposal (debited on a loss)
    pub disposal_loss: LedgerAccountId,
}

/// Disposes an asset, booking the gain or loss
///
/// The book value is snapshotted at this moment and never recomputed;
/// `gain_loss = proceeds - book_value_at_disposal`, unclamped.
///
/// # Errors
///
/// - `AlreadyDisposed` on a second disposal
/// - `DisposalBeforeAcquisition` if the date predates acquisition
/// - `InvalidAsset` for negative proceeds or a currency mismatch
pub fn dispose(
    asset: &mut FixedAsset,
    disposal_date: NaiveDate,
    proceeds: Money,
    accounts: &DisposalAccounts,
    journal: &mut Journal,
    notifier: &dyn Notifier,
) -> Result<AssetDisposal, AssetError> {
    if asset.status == AssetStatus::Disposed || asset.disposal.is_some() {
        return Err(AssetError::AlreadyDisposed(asset.id.to_string()));
    }
    if disposal_date < asset.acquisition_date {
        return Err(AssetError::DisposalBeforeAcquisition {
            acquisition: asset.acquisition_date,
            disposal: disposal_date,
        });
    }
    if proceeds.currency() != asset.acquisition_cost.currency() {
        return Err(AssetError::InvalidAsset(
            "proceeds currency must match acquisition cost".to_string(),
        ));
    }
    if proceeds.is_negative() {
        return Err(AssetError::InvalidAsset(
            "proceeds cannot be negative".to_string(),
        ));
    }

    let book_value_at_disposal = asset.book_value();
    let gain_loss = proceeds - book_value_at_disposal;

    let mut draft = EntryDraft::new(format!("Disposal - {}", asset.name))
        .dated(disposal_date)
        .with_reference("asset", *asset.id.as_uuid());
    if proceeds.is_positive() {
        draft = draft.debit(accounts.cash, proceeds);
    }
    if asset.accumulated_depreciation.is_positive() {
        draft = draft.debit(
            accounts.accumulated_depreciation,
            asset.accumulated_depreciation,
        );
    }
    draft = draft.credit(accounts.asset_cost, asset.acquisition_cost);
    if gain_loss.is_positive() {
        draft = draft.credit(accounts.disposal_gain, gain_loss);
    } else if gain_loss.is_negative() {
        draft = draft.debit(accounts.disposal_loss, gain_loss.abs());
    }

    let journal_entry_id = journal.post(draft)?;

    let disposal = AssetDisposal {
        id: DisposalId::new_v7(),
        asset_id: asset.id,
        tenant_id: asset.tenant_id,
        disposal_date,
        proceeds,
        book_value_at_disposal,
        gain_loss,
        journal_entry_id: Some(journal_entry_id),
        created_at: Utc::now(),
    };

    asset.status = AssetStatus::Disposed;
    asset.disposal = Some(disposal.clone());
    asset.touch();

    tracing::info!(
        asset = %asset.id,
        proceeds = %proceeds,
        gain_loss = %gain_loss,
        "asset disposed"
    );
    notify_best_effort(
        notifier,
        BusinessEvent::AssetDisposed {
            tenant_id: asset.tenant_id,
            asset_id: asset.id,
        },
    );

    Ok(disposal)
}

/// Reinstates a disposed asset
///
/// The status is re-derived from accumulated depreciation - never restored
/// from what it was before disposal. Ledger corrections are the caller's
/// responsibility via a reversing entry against the disposal's journal
/// entry.
pub fn reactivate(asset: &mut FixedAsset) -> Result<(), AssetError> {
    if asset.status != AssetStatus::Disposed {
        return Err(AssetError::NotDisposed(asset.id.to_string()));
    }

    asset.disposal = None;
    asset.status = if asset.is_fully_depreciated() {
        AssetStatus::FullyDepreciated
    } else {
        AssetStatus::Active
    };
    asset.touch();

    Ok(())
}
