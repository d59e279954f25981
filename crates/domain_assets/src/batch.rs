//! Monthly depreciation run
//!
//! The external scheduler triggers one run per period, either for a single
//! tenant or across all of them. Failures are isolated per asset: one bad
//! asset is recorded in the report and the run continues. Retrying the
//! whole run is safe because recorded periods are counted, not re-recorded.

use serde::{Deserialize, Serialize};

use core_kernel::{AssetId, Money, Period, TenantId};
use domain_ledger::Journal;

use crate::asset::{AssetStatus, FixedAsset};
use crate::depreciation::{DepreciationAccounts, DepreciationBook, DepreciationEngine};

/// A single asset's failure during a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRunError {
    pub asset_id: AssetId,
    pub reason: String,
}

/// Outcome of one tenant's monthly run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantDepreciationReport {
    /// Tenant processed
    pub tenant_id: TenantId,
    /// Period processed
    pub period: Period,
    /// Assets that had a period recorded
    pub processed: u32,
    /// Assets skipped (inactive, fully depreciated, or nothing to record)
    pub skipped: u32,
    /// Assets whose period was already recorded by an earlier run
    pub already_recorded: u32,
    /// Per-asset failures; these never abort the run
    pub errors: Vec<AssetRunError>,
    /// Total depreciation recorded this run
    pub total_depreciation: Money,
}

impl TenantDepreciationReport {
    fn new(tenant_id: TenantId, period: Period, currency: core_kernel::Currency) -> Self {
        Self {
            tenant_id,
            period,
            processed: 0,
            skipped: 0,
            already_recorded: 0,
            errors: Vec::new(),
            total_depreciation: Money::zero(currency),
        }
    }

    /// True when any asset failed
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Outcome of an all-tenants run, with per-tenant breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepreciationRunReport {
    pub period: Period,
    pub tenants: Vec<TenantDepreciationReport>,
}

impl DepreciationRunReport {
    pub fn total_processed(&self) -> u32 {
        self.tenants.iter().map(|t| t.processed).sum()
    }

    pub fn total_errors(&self) -> usize {
        self.tenants.iter().map(|t| t.errors.len()).sum()
    }
}

/// One tenant's assets together with its schedule book and journal
#[derive(Debug)]
pub struct TenantAssetBatch {
    pub tenant_id: TenantId,
    pub assets: Vec<FixedAsset>,
    pub book: DepreciationBook,
    pub journal: Journal,
}

/// The monthly depreciation batch driver
pub struct MonthlyDepreciationRun {
    accounts: DepreciationAccounts,
}

impl MonthlyDepreciationRun {
    pub fn new(accounts: DepreciationAccounts) -> Self {
        Self { accounts }
    }

    /// Runs one period for one tenant's assets
    ///
    /// Inactive assets and already-recorded periods are counted and
    /// skipped; a failing asset is logged, reported, and does not stop the
    /// remaining assets.
    pub fn run_for_tenant(
        &self,
        tenant_id: TenantId,
        assets: &mut [FixedAsset],
        book: &mut DepreciationBook,
        journal: &mut Journal,
        period: Period,
    ) -> TenantDepreciationReport {
        let mut report = TenantDepreciationReport::new(tenant_id, period, journal.currency());

        for asset in assets.iter_mut() {
            if asset.tenant_id != tenant_id {
                report.errors.push(AssetRunError {
                    asset_id: asset.id,
                    reason: format!(
                        "asset belongs to tenant {}, not {}",
                        asset.tenant_id, tenant_id
                    ),
                });
                continue;
            }
            if asset.status != AssetStatus::Active {
                report.skipped += 1;
                continue;
            }
            if book.has_entry(asset.id, period) {
                report.already_recorded += 1;
                continue;
            }
            if !DepreciationEngine::periodic_depreciation(asset).is_positive() {
                report.skipped += 1;
                continue;
            }

            match book.record_period(asset, period, &self.accounts, journal) {
                Ok(entry) => {
                    let amount = entry.amount;
                    match report.total_depreciation.checked_add(&amount) {
                        Ok(total) => {
                            report.processed += 1;
                            report.total_depreciation = total;
                        }
                        Err(err) => report.errors.push(AssetRunError {
                            asset_id: asset.id,
                            reason: err.to_string(),
                        }),
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        asset = %asset.id,
                        %period,
                        error = %err,
                        "asset failed during depreciation run; continuing"
                    );
                    report.errors.push(AssetRunError {
                        asset_id: asset.id,
                        reason: err.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            tenant = %tenant_id,
            %period,
            processed = report.processed,
            skipped = report.skipped,
            already_recorded = report.already_recorded,
            errors = report.errors.len(),
            "monthly depreciation run finished for tenant"
        );

        report
    }

    /// Runs one period across every tenant
    ///
    /// Tenants are processed sequentially; one tenant's failures never
    /// abort the others. The caller may wrap the whole call in a bounded
    /// retry - recorded periods make a re-run idempotent.
    pub fn run_all(
        &self,
        batches: &mut [TenantAssetBatch],
        period: Period,
    ) -> DepreciationRunReport {
        let tenants = batches
            .iter_mut()
            .map(|batch| {
                self.run_for_tenant(
                    batch.tenant_id,
                    &mut batch.assets,
                    &mut batch.book,
                    &mut batch.journal,
                    period,
                )
            })
            .collect();

        DepreciationRunReport { period, tenants }
    }
}
