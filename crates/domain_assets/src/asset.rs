//! Fixed assets
//!
//! Display cases, safes, engraving machines - anything the shop owns and
//! depreciates over time.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{
    format_document_number, AssetId, Money, Period, Rate, SequenceProvider, TenantId,
};

use crate::disposal::AssetDisposal;
use crate::error::AssetError;

/// Depreciation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepreciationMethod {
    /// Equal amounts over the useful life
    StraightLine,
    /// A fixed annual percentage of the remaining book value
    DecliningBalance { annual_rate: Rate },
    /// Usage-based depreciation. Declared but not computed: there is no
    /// usage feed in this kernel, so the engine yields zero for it.
    UnitsOfProduction,
}

/// Asset lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetStatus {
    /// Depreciating normally
    Active,
    /// Accumulated depreciation reached the depreciable amount
    FullyDepreciated,
    /// Sold or scrapped
    Disposed,
}

/// A depreciable fixed asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedAsset {
    /// Unique identifier
    pub id: AssetId,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Asset name
    pub name: String,
    /// Generated asset number
    pub asset_number: Option<String>,
    /// Acquisition date
    pub acquisition_date: NaiveDate,
    /// Acquisition cost
    pub acquisition_cost: Money,
    /// Expected salvage value at end of life
    pub salvage_value: Money,
    /// Useful life in months
    pub useful_life_months: u32,
    /// Depreciation method
    pub method: DepreciationMethod,
    /// Depreciation recorded to date
    pub accumulated_depreciation: Money,
    /// Status
    pub status: AssetStatus,
    /// Disposal record, at most one per asset
    pub disposal: Option<AssetDisposal>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl FixedAsset {
    /// Creates a new active asset
    ///
    /// # Errors
    ///
    /// Validates cost, salvage value, useful life, and (for declining
    /// balance) the rate before anything is constructed.
    pub fn new(
        tenant_id: TenantId,
        name: impl Into<String>,
        acquisition_date: NaiveDate,
        acquisition_cost: Money,
        salvage_value: Money,
        useful_life_months: u32,
        method: DepreciationMethod,
    ) -> Result<Self, AssetError> {
        if !acquisition_cost.is_positive() {
            return Err(AssetError::InvalidAsset(
                "acquisition cost must be positive".to_string(),
            ));
        }
        if salvage_value.currency() != acquisition_cost.currency() {
            return Err(AssetError::InvalidAsset(
                "salvage currency must match acquisition cost".to_string(),
            ));
        }
        if salvage_value.is_negative() {
            return Err(AssetError::InvalidAsset(
                "salvage value cannot be negative".to_string(),
            ));
        }
        if salvage_value.amount() >= acquisition_cost.amount() {
            return Err(AssetError::InvalidAsset(
                "salvage value must be below acquisition cost".to_string(),
            ));
        }
        if useful_life_months == 0 {
            return Err(AssetError::InvalidAsset(
                "useful life must be at least one month".to_string(),
            ));
        }
        if let DepreciationMethod::DecliningBalance { annual_rate } = method {
            if !annual_rate.is_positive() {
                return Err(AssetError::InvalidAsset(
                    "declining balance requires a positive annual rate".to_string(),
                ));
            }
        }

        let now = Utc::now();
        Ok(Self {
            id: AssetId::new_v7(),
            tenant_id,
            name: name.into(),
            asset_number: None,
            acquisition_date,
            acquisition_cost,
            salvage_value,
            useful_life_months,
            method,
            accumulated_depreciation: Money::zero(acquisition_cost.currency()),
            status: AssetStatus::Active,
            disposal: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Assigns a generated asset number (`FA-<YYYYMM>-<seq>`)
    pub fn assign_number(&mut self, sequences: &mut dyn SequenceProvider) {
        let period = Period::from_date(self.acquisition_date);
        let seq = sequences.next(self.tenant_id, "FA", period);
        self.asset_number = Some(format_document_number("FA", period, seq));
        self.touch();
    }

    /// Cost minus salvage value: the total that can ever be depreciated
    pub fn depreciable_amount(&self) -> Money {
        self.acquisition_cost - self.salvage_value
    }

    /// Cost minus accumulated depreciation
    pub fn book_value(&self) -> Money {
        self.acquisition_cost - self.accumulated_depreciation
    }

    /// True once accumulated depreciation reaches the depreciable amount
    pub fn is_fully_depreciated(&self) -> bool {
        self.accumulated_depreciation.amount() >= self.depreciable_amount().amount()
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
