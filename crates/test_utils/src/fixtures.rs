//! Pre-built test fixtures
//!
//! Ready-to-use test data for common entities across the system, designed
//! to be consistent and predictable for unit tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use core_kernel::{ActorId, Currency, Money, PartyId, Period, TenantId};

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A USD amount
    pub fn usd(amount: Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    /// Zero USD
    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// A EUR amount for currency mismatch tests
    pub fn eur(amount: Decimal) -> Money {
        Money::new(amount, Currency::EUR)
    }

    /// A typical ring sale amount
    pub fn ring_sale() -> Money {
        Money::new(dec!(550.00), Currency::USD)
    }
}

/// Fixture for date and period test data
pub struct DateFixtures;

impl DateFixtures {
    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Standard acquisition date for test assets
    pub fn acquisition() -> NaiveDate {
        Self::ymd(2026, 1, 15)
    }

    /// Standard statement period start
    pub fn statement_start() -> NaiveDate {
        Self::ymd(2026, 8, 1)
    }

    /// Standard statement period end
    pub fn statement_end() -> NaiveDate {
        Self::ymd(2026, 8, 31)
    }

    /// The standard test accounting period
    pub fn august() -> Period {
        Period::new(2026, 8).unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// A deterministic tenant ID
    pub fn tenant_id() -> TenantId {
        TenantId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// A deterministic party ID
    pub fn party_id() -> PartyId {
        PartyId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }

    /// A deterministic actor ID
    pub fn actor_id() -> ActorId {
        ActorId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap())
    }
}
