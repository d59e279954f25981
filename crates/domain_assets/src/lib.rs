//! Fixed Asset Domain - Depreciation and Disposal
//!
//! Fixed assets depreciate monthly under straight-line or declining-balance
//! methods. Each recorded period produces a schedule snapshot and a
//! balanced journal entry (debit depreciation expense, credit accumulated
//! depreciation). Disposal freezes the book value, books the gain or loss,
//! and retires the asset.
//!
//! # Invariants
//!
//! - Exactly one schedule entry per (asset, period)
//! - Accumulated depreciation is non-decreasing and never exceeds
//!   cost minus salvage
//! - The final period lands book value exactly on salvage value
//! - At most one disposal per asset

pub mod asset;
pub mod batch;
pub mod depreciation;
pub mod disposal;
pub mod error;

pub use asset::{AssetStatus, DepreciationMethod, FixedAsset};
pub use batch::{
    AssetRunError, DepreciationRunReport, MonthlyDepreciationRun, TenantAssetBatch,
    TenantDepreciationReport,
};
pub use depreciation::{
    DepreciationAccounts, DepreciationBook, DepreciationEngine, DepreciationScheduleEntry,
};
pub use disposal::{dispose, reactivate, AssetDisposal, DisposalAccounts};
pub use error::AssetError;
