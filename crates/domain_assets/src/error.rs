//! Fixed asset domain errors

use chrono::NaiveDate;
use thiserror::Error;

use core_kernel::MoneyError;
use domain_ledger::LedgerError;

/// Errors that can occur in the fixed asset domain
#[derive(Debug, Error)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// Asset fields are structurally invalid
    #[error("Invalid asset: {0}")]
    InvalidAsset(String),

    /// Asset is not in a state that allows the operation
    #[error("Asset {asset} is {status:?}; {operation} requires an active asset")]
    NotActive {
        asset: String,
        status: crate::asset::AssetStatus,
        operation: &'static str,
    },

    /// Depreciation for this period was already recorded
    #[error("Depreciation already recorded for asset {asset} in period {period}")]
    PeriodAlreadyRecorded { asset: String, period: String },

    /// Nothing left to depreciate
    #[error("Asset {0} has no depreciation to record")]
    NothingToDepreciate(String),

    /// Asset was already disposed
    #[error("Asset {0} is already disposed")]
    AlreadyDisposed(String),

    /// Asset is not disposed
    #[error("Asset {0} is not disposed")]
    NotDisposed(String),

    /// Disposal cannot predate acquisition
    #[error("Disposal date {disposal} precedes acquisition date {acquisition}")]
    DisposalBeforeAcquisition {
        acquisition: NaiveDate,
        disposal: NaiveDate,
    },

    /// Ledger error while posting
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Money arithmetic error
    #[error(transparent)]
    Money(#[from] MoneyError),
}
