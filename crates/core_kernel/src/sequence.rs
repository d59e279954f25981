//! Per-tenant document number sequences
//!
//! Document and asset numbers take the form `<PREFIX>-<YYYYMM>-<seq>`.
//! The sequence itself comes from a [`SequenceProvider`], which must hand
//! out monotonically increasing values per (tenant, prefix, period). A
//! production deployment backs this with the persistence layer's atomic
//! counter; scanning existing numbers for the maximum is not race-safe
//! and is deliberately unsupported.

use std::collections::HashMap;

use crate::identifiers::TenantId;
use crate::period::Period;

/// Source of monotonic sequence numbers scoped to (tenant, prefix, period)
pub trait SequenceProvider {
    /// Returns the next sequence value, starting at 1
    fn next(&mut self, tenant: TenantId, prefix: &str, period: Period) -> u64;
}

/// In-process sequence provider
///
/// Suitable for tests and single-writer deployments. Multi-process
/// deployments need a store-backed implementation.
#[derive(Debug, Default)]
pub struct InMemorySequences {
    counters: HashMap<(TenantId, String, Period), u64>,
}

impl InMemorySequences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SequenceProvider for InMemorySequences {
    fn next(&mut self, tenant: TenantId, prefix: &str, period: Period) -> u64 {
        let counter = self
            .counters
            .entry((tenant, prefix.to_string(), period))
            .or_insert(0);
        *counter += 1;
        *counter
    }
}

/// Formats a document number as `<PREFIX>-<YYYYMM>-<seq>`
pub fn format_document_number(prefix: &str, period: Period, seq: u64) -> String {
    format!("{}-{}-{:04}", prefix, period.yyyymm(), seq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequences_start_at_one_and_increment() {
        let mut sequences = InMemorySequences::new();
        let tenant = TenantId::new();
        let period = Period::new(2026, 8).unwrap();

        assert_eq!(sequences.next(tenant, "INV", period), 1);
        assert_eq!(sequences.next(tenant, "INV", period), 2);
    }

    #[test]
    fn test_sequences_are_scoped() {
        let mut sequences = InMemorySequences::new();
        let tenant_a = TenantId::new();
        let tenant_b = TenantId::new();
        let august = Period::new(2026, 8).unwrap();
        let september = Period::new(2026, 9).unwrap();

        assert_eq!(sequences.next(tenant_a, "INV", august), 1);
        assert_eq!(sequences.next(tenant_b, "INV", august), 1);
        assert_eq!(sequences.next(tenant_a, "BILL", august), 1);
        assert_eq!(sequences.next(tenant_a, "INV", september), 1);
        assert_eq!(sequences.next(tenant_a, "INV", august), 2);
    }

    #[test]
    fn test_format_document_number() {
        let period = Period::new(2026, 8).unwrap();
        assert_eq!(format_document_number("INV", period, 7), "INV-202608-0007");
    }
}
