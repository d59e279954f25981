//! Integration tests for accounting periods and document numbering

use chrono::NaiveDate;
use core_kernel::{format_document_number, InMemorySequences, Period, SequenceProvider, TenantId};

#[test]
fn period_spans_its_month() {
    let period = Period::from_date(NaiveDate::from_ymd_opt(2026, 8, 6).unwrap());
    assert_eq!(period.first_day(), NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
    assert_eq!(period.last_day(), NaiveDate::from_ymd_opt(2026, 8, 31).unwrap());
}

#[test]
fn document_numbers_are_monotonic_within_a_scope() {
    let mut sequences = InMemorySequences::new();
    let tenant = TenantId::new();
    let period = Period::new(2026, 8).unwrap();

    let first = format_document_number("BILL", period, sequences.next(tenant, "BILL", period));
    let second = format_document_number("BILL", period, sequences.next(tenant, "BILL", period));

    assert_eq!(first, "BILL-202608-0001");
    assert_eq!(second, "BILL-202608-0002");
}

#[test]
fn sequences_reset_per_period() {
    let mut sequences = InMemorySequences::new();
    let tenant = TenantId::new();
    let august = Period::new(2026, 8).unwrap();
    let september = august.next();

    sequences.next(tenant, "INV", august);
    sequences.next(tenant, "INV", august);

    assert_eq!(sequences.next(tenant, "INV", september), 1);
}
