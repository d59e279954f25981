//! Shared test utilities for the jewelry shop accounting kernel
//!
//! Fixtures provide deterministic values; builders construct entities with
//! sensible defaults so tests only spell out what they are about.

pub mod builders;
pub mod fixtures;

pub use builders::{usd, AssetBuilder, BankTransactionBuilder, DocumentBuilder};
pub use fixtures::{DateFixtures, IdFixtures, MoneyFixtures};
