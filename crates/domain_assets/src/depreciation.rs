//! Depreciation engine and schedule
//!
//! The engine computes one period's depreciation for an asset; the book
//! records it, enforcing one schedule entry per (asset, period) and posting
//! the matching journal entry. Recording a period twice is a domain error,
//! not a silent skip.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use core_kernel::{
    AssetId, JournalEntryId, LedgerAccountId, Money, Period, ScheduleEntryId, TenantId,
};
use domain_ledger::{EntryDraft, Journal};

use crate::asset::{AssetStatus, DepreciationMethod, FixedAsset};
use crate::error::AssetError;

/// Ledger accounts the depreciation postings go to
#[derive(Debug, Clone, Copy)]
pub struct DepreciationAccounts {
    /// Depreciation expense (debited)
    pub expense: LedgerAccountId,
    /// Accumulated depreciation contra-asset (credited)
    pub accumulated: LedgerAccountId,
}

/// Computes per-period depreciation amounts
pub struct DepreciationEngine;

impl DepreciationEngine {
    /// One period's depreciation for the asset, rounded to cents
    ///
    /// Yields zero (not an error) when the asset is not active or already
    /// fully depreciated, and clamps the final period so accumulated
    /// depreciation lands exactly on the depreciable amount.
    pub fn periodic_depreciation(asset: &FixedAsset) -> Money {
        let zero = Money::zero(asset.acquisition_cost.currency());

        if asset.status != AssetStatus::Active || asset.is_fully_depreciated() {
            return zero;
        }

        match asset.method {
            DepreciationMethod::StraightLine => {
                let base =
                    asset.depreciable_amount() / Decimal::from(asset.useful_life_months);
                let remaining = asset.depreciable_amount() - asset.accumulated_depreciation;
                if base.amount() > remaining.amount() {
                    remaining
                } else {
                    base
                }
            }
            DepreciationMethod::DecliningBalance { annual_rate } => {
                let monthly_rate = annual_rate.as_decimal() / dec!(12);
                let amount = asset.book_value().multiply(monthly_rate);
                // Book value never drops below salvage
                let headroom = asset.book_value() - asset.salvage_value;
                if amount.amount() > headroom.amount() {
                    headroom
                } else {
                    amount
                }
            }
            // No usage feed in this kernel; see DepreciationMethod docs
            DepreciationMethod::UnitsOfProduction => zero,
        }
    }
}

/// One period's depreciation snapshot for an asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepreciationScheduleEntry {
    /// Unique identifier
    pub id: ScheduleEntryId,
    /// Asset this entry belongs to
    pub asset_id: AssetId,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Accounting period
    pub period: Period,
    /// Depreciation recorded this period
    pub amount: Money,
    /// Accumulated depreciation after this entry
    pub accumulated_after: Money,
    /// Book value after this entry
    pub book_value_after: Money,
    /// Journal entry carrying the postings
    pub journal_entry_id: JournalEntryId,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

/// The depreciation schedule for a tenant's assets
///
/// Uniqueness of (asset, period) is a correctness invariant: the map key
/// is the constraint, and a duplicate insert is rejected before any state
/// changes.
#[derive(Debug, Default)]
pub struct DepreciationBook {
    entries: HashMap<(AssetId, Period), DepreciationScheduleEntry>,
}

impl DepreciationBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether depreciation was already recorded for (asset, period)
    pub fn has_entry(&self, asset_id: AssetId, period: Period) -> bool {
        self.entries.contains_key(&(asset_id, period))
    }

    /// The schedule entry for (asset, period), if recorded
    pub fn entry(&self, asset_id: AssetId, period: Period) -> Option<&DepreciationScheduleEntry> {
        self.entries.get(&(asset_id, period))
    }

    /// All entries for an asset, ordered by period
    pub fn entries_for(&self, asset_id: AssetId) -> Vec<&DepreciationScheduleEntry> {
        let mut entries: Vec<_> = self
            .entries
            .values()
            .filter(|e| e.asset_id == asset_id)
            .collect();
        entries.sort_by_key(|e| e.period);
        entries
    }

    /// Records one period of depreciation for an asset
    ///
    /// Computes the period amount, posts debit expense / credit accumulated
    /// depreciation, advances the asset, and snapshots a schedule entry.
    /// The journal entry is posted before the asset mutates, so a ledger
    /// rejection leaves everything unchanged.
    ///
    /// # Errors
    ///
    /// - `PeriodAlreadyRecorded` if (asset, period) exists
    /// - `NotActive` if the asset is disposed or fully depreciated
    /// - `NothingToDepreciate` if the computed amount is zero
    pub fn record_period(
        &mut self,
        asset: &mut FixedAsset,
        period: Period,
        accounts: &DepreciationAccounts,
        journal: &mut Journal,
    ) -> Result<&DepreciationScheduleEntry, AssetError> {
        if self.has_entry(asset.id, period) {
            return Err(AssetError::PeriodAlreadyRecorded {
                asset: asset.id.to_string(),
                period: period.to_string(),
            });
        }
        if asset.status != AssetStatus::Active {
            return Err(AssetError::NotActive {
                asset: asset.id.to_string(),
                status: asset.status,
                operation: "record depreciation",
            });
        }

        let amount = DepreciationEngine::periodic_depreciation(asset);
        if !amount.is_positive() {
            return Err(AssetError::NothingToDepreciate(asset.id.to_string()));
        }

        let journal_entry_id = journal.post(
            EntryDraft::new(format!("Depreciation - {} ({})", asset.name, period))
                .dated(period.last_day())
                .with_reference("asset", *asset.id.as_uuid())
                .debit(accounts.expense, amount)
                .credit(accounts.accumulated, amount),
        )?;

        asset.accumulated_depreciation = asset.accumulated_depreciation.checked_add(&amount)?;
        if asset.is_fully_depreciated() {
            asset.status = AssetStatus::FullyDepreciated;
        }
        asset.touch();

        let entry = DepreciationScheduleEntry {
            id: ScheduleEntryId::new_v7(),
            asset_id: asset.id,
            tenant_id: asset.tenant_id,
            period,
            amount,
            accumulated_after: asset.accumulated_depreciation,
            book_value_after: asset.book_value(),
            journal_entry_id,
            created_at: Utc::now(),
        };

        tracing::debug!(
            asset = %asset.id,
            %period,
            amount = %amount,
            "recorded depreciation period"
        );

        Ok(self.entries.entry((asset.id, period)).or_insert(entry))
    }
}
