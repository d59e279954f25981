//! Comprehensive tests for domain_billing

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{ActorId, Currency, InMemorySequences, NullNotifier, PartyId, TenantId};
use domain_billing::{
    transition, AgingBucket, BillingDocument, BillingError, Counterparty, CreditMemo,
    CreditMemoStatus, DocumentEvent, DocumentKind, DocumentStatus, LineItem, PaymentApplier,
    PaymentMethod,
};
use test_utils::{usd, DocumentBuilder};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn draft_document(kind: DocumentKind) -> BillingDocument {
    let mut sequences = InMemorySequences::new();
    let builder = match kind {
        DocumentKind::Bill => DocumentBuilder::bill(),
        DocumentKind::Invoice => DocumentBuilder::invoice(),
    };
    builder.build(&mut sequences)
}

fn sent_invoice_with_total(subtotal: rust_decimal::Decimal, tax: rust_decimal::Decimal) -> BillingDocument {
    let mut invoice = draft_document(DocumentKind::Invoice);
    invoice
        .add_item(LineItem::new("Custom engagement ring", usd(subtotal)))
        .unwrap();
    invoice.set_tax(usd(tax)).unwrap();
    invoice.send(ActorId::new(), &NullNotifier).unwrap();
    invoice
}

// ============================================================================
// Document creation and totals
// ============================================================================

mod document_tests {
    use super::*;

    #[test]
    fn test_new_document_is_draft_with_generated_number() {
        let bill = draft_document(DocumentKind::Bill);

        assert_eq!(bill.status, DocumentStatus::Draft);
        assert_eq!(bill.document_number, "BILL-202608-0001");
        assert!(bill.items.is_empty());
        assert!(bill.totals_are_consistent());
    }

    #[test]
    fn test_numbers_increment_within_tenant_and_month() {
        let mut sequences = InMemorySequences::new();
        let tenant = TenantId::new();
        let counterparty = Counterparty::new(PartyId::new(), "Regular customer");

        let mut numbers = Vec::new();
        for _ in 0..3 {
            let invoice = BillingDocument::new(
                tenant,
                DocumentKind::Invoice,
                counterparty.clone(),
                date(2026, 8, 1),
                date(2026, 8, 31),
                Currency::USD,
                &mut sequences,
            )
            .unwrap();
            numbers.push(invoice.document_number);
        }

        assert_eq!(
            numbers,
            vec!["INV-202608-0001", "INV-202608-0002", "INV-202608-0003"]
        );
    }

    #[test]
    fn test_due_before_issue_is_rejected() {
        let mut sequences = InMemorySequences::new();
        let result = BillingDocument::new(
            TenantId::new(),
            DocumentKind::Bill,
            Counterparty::new(PartyId::new(), "Clasp supplier"),
            date(2026, 8, 15),
            date(2026, 8, 1),
            Currency::USD,
            &mut sequences,
        );

        assert!(matches!(result, Err(BillingError::DueBeforeIssue { .. })));
    }

    #[test]
    fn test_totals_follow_line_items_and_tax() {
        let mut bill = draft_document(DocumentKind::Bill);
        bill.add_item(LineItem::new("14k gold chain stock", usd(dec!(300.00))).with_quantity(dec!(2)))
            .unwrap();
        bill.add_item(LineItem::new("Shipping", usd(dec!(25.00)))).unwrap();
        bill.set_tax(usd(dec!(62.50))).unwrap();

        assert_eq!(bill.subtotal.amount(), dec!(625.00));
        assert_eq!(bill.total.amount(), dec!(687.50));
        assert!(bill.totals_are_consistent());
    }

    #[test]
    fn test_items_are_frozen_after_draft() {
        let mut invoice = sent_invoice_with_total(dec!(100.00), dec!(0.00));

        let result = invoice.add_item(LineItem::new("Late addition", usd(dec!(10.00))));
        assert!(matches!(result, Err(BillingError::NotEditable(_))));
        assert_eq!(invoice.subtotal.amount(), dec!(100.00));
    }

    #[test]
    fn test_negative_tax_is_rejected() {
        let mut bill = draft_document(DocumentKind::Bill);
        let result = bill.set_tax(usd(dec!(-5.00)));
        assert!(matches!(result, Err(BillingError::InvalidAmount(_))));
    }
}

// ============================================================================
// Status machine
// ============================================================================

mod transition_tests {
    use super::*;

    const ALL_STATUSES: [DocumentStatus; 7] = [
        DocumentStatus::Draft,
        DocumentStatus::Approved,
        DocumentStatus::Sent,
        DocumentStatus::PartiallyPaid,
        DocumentStatus::Paid,
        DocumentStatus::Overdue,
        DocumentStatus::Void,
    ];

    const ALL_EVENTS: [DocumentEvent; 6] = [
        DocumentEvent::Approve,
        DocumentEvent::Send,
        DocumentEvent::RecordPartialPayment,
        DocumentEvent::RecordFullPayment,
        DocumentEvent::FallOverdue,
        DocumentEvent::Void,
    ];

    /// The expected successor for every legal (kind, status, event) triple
    fn expected(
        kind: DocumentKind,
        status: DocumentStatus,
        event: DocumentEvent,
    ) -> Option<DocumentStatus> {
        use DocumentEvent as E;
        use DocumentStatus as S;

        let payable = matches!(
            status,
            S::Approved | S::Sent | S::PartiallyPaid | S::Overdue
        );

        match event {
            E::Approve => {
                (kind == DocumentKind::Bill && status == S::Draft).then_some(S::Approved)
            }
            E::Send => {
                (kind == DocumentKind::Invoice && status == S::Draft).then_some(S::Sent)
            }
            E::RecordPartialPayment => payable.then_some(S::PartiallyPaid),
            E::RecordFullPayment => payable.then_some(S::Paid),
            E::FallOverdue => (kind == DocumentKind::Invoice
                && matches!(status, S::Sent | S::PartiallyPaid | S::Overdue))
            .then_some(S::Overdue),
            E::Void => (!matches!(status, S::Paid | S::Void)).then_some(S::Void),
        }
    }

    #[test]
    fn test_transition_table_is_exactly_the_expected_relation() {
        for kind in [DocumentKind::Bill, DocumentKind::Invoice] {
            for status in ALL_STATUSES {
                for event in ALL_EVENTS {
                    let actual = transition(kind, status, event).ok();
                    assert_eq!(
                        actual,
                        expected(kind, status, event),
                        "mismatch for {:?} {:?} {:?}",
                        kind,
                        status,
                        event
                    );
                }
            }
        }
    }

    #[test]
    fn test_terminal_states_accept_nothing() {
        for kind in [DocumentKind::Bill, DocumentKind::Invoice] {
            for status in [DocumentStatus::Paid, DocumentStatus::Void] {
                for event in ALL_EVENTS {
                    assert!(transition(kind, status, event).is_err());
                }
            }
        }
    }

    #[test]
    fn test_approve_works_once() {
        let mut bill = draft_document(DocumentKind::Bill);
        bill.approve(ActorId::new(), &NullNotifier).unwrap();
        assert_eq!(bill.status, DocumentStatus::Approved);
        assert!(bill.approved_at.is_some());

        let again = bill.approve(ActorId::new(), &NullNotifier);
        assert!(matches!(again, Err(BillingError::InvalidTransition { .. })));
    }

    #[test]
    fn test_invoice_cannot_be_approved_like_a_bill() {
        let mut invoice = draft_document(DocumentKind::Invoice);
        let result = invoice.approve(ActorId::new(), &NullNotifier);
        assert!(matches!(result, Err(BillingError::InvalidTransition { .. })));
        assert_eq!(invoice.status, DocumentStatus::Draft);
    }
}

// ============================================================================
// Payments
// ============================================================================

mod payment_tests {
    use super::*;

    #[test]
    fn test_full_payment_settles_invoice() {
        // subtotal 500.00 + tax 50.00 must total 550.00
        let mut invoice = sent_invoice_with_total(dec!(500.00), dec!(50.00));
        assert_eq!(invoice.total.amount(), dec!(550.00));

        let applier = PaymentApplier::new(&NullNotifier);
        let payment = applier
            .apply(&mut invoice, usd(dec!(550.00)), PaymentMethod::Card, date(2026, 8, 10))
            .unwrap();

        assert!(payment.is_applied());
        assert_eq!(invoice.status, DocumentStatus::Paid);
        assert_eq!(invoice.amount_due().amount(), dec!(0.00));

        // one more cent must be rejected
        let result = applier.apply(
            &mut invoice,
            usd(dec!(0.01)),
            PaymentMethod::Cash,
            date(2026, 8, 11),
        );
        assert!(result.is_err());
        assert_eq!(invoice.amount_paid.amount(), dec!(550.00));
    }

    #[test]
    fn test_partial_payment_transitions_and_invariants_hold() {
        let mut invoice = sent_invoice_with_total(dec!(500.00), dec!(50.00));
        let applier = PaymentApplier::new(&NullNotifier);

        applier
            .apply(&mut invoice, usd(dec!(200.00)), PaymentMethod::Cash, date(2026, 8, 5))
            .unwrap();

        assert_eq!(invoice.status, DocumentStatus::PartiallyPaid);
        assert_eq!(invoice.amount_due().amount(), dec!(350.00));
        assert!(invoice.totals_are_consistent());
        assert!(invoice.amount_paid.amount() <= invoice.total.amount());
    }

    #[test]
    fn test_overpayment_is_rejected_up_front() {
        let mut invoice = sent_invoice_with_total(dec!(500.00), dec!(50.00));
        let applier = PaymentApplier::new(&NullNotifier);

        let result = applier.apply(
            &mut invoice,
            usd(dec!(551.00)),
            PaymentMethod::Card,
            date(2026, 8, 5),
        );

        assert!(matches!(result, Err(BillingError::ExceedsBalanceDue { .. })));
        assert_eq!(invoice.amount_paid.amount(), dec!(0.00));
        assert_eq!(invoice.status, DocumentStatus::Sent);
    }

    #[test]
    fn test_zero_and_negative_amounts_are_rejected() {
        let mut invoice = sent_invoice_with_total(dec!(100.00), dec!(0.00));
        let applier = PaymentApplier::new(&NullNotifier);

        for bad in [dec!(0.00), dec!(-10.00)] {
            let result = applier.apply(&mut invoice, usd(bad), PaymentMethod::Cash, date(2026, 8, 5));
            assert!(matches!(result, Err(BillingError::InvalidAmount(_))));
        }
    }

    #[test]
    fn test_payment_applies_exactly_once() {
        let mut invoice = sent_invoice_with_total(dec!(400.00), dec!(0.00));
        let applier = PaymentApplier::new(&NullNotifier);

        let mut payment = applier
            .apply(&mut invoice, usd(dec!(100.00)), PaymentMethod::Cash, date(2026, 8, 5))
            .unwrap();

        // Re-saving the same record must not re-increment the document
        let again = payment.apply_to(&mut invoice);
        assert!(matches!(again, Err(BillingError::PaymentAlreadyApplied(_))));
        assert_eq!(invoice.amount_paid.amount(), dec!(100.00));
    }

    #[test]
    fn test_draft_documents_do_not_take_payments() {
        let mut draft = draft_document(DocumentKind::Invoice);
        draft
            .add_item(LineItem::new("Pendant", usd(dec!(80.00))))
            .unwrap();

        let applier = PaymentApplier::new(&NullNotifier);
        let result = applier.apply(&mut draft, usd(dec!(80.00)), PaymentMethod::Cash, date(2026, 8, 5));

        assert!(matches!(result, Err(BillingError::InvalidTransition { .. })));
    }

    #[test]
    fn test_late_partial_payment_marks_invoice_overdue() {
        let mut invoice = sent_invoice_with_total(dec!(500.00), dec!(0.00));
        let applier = PaymentApplier::new(&NullNotifier);

        // due 2026-08-31; paying after that leaves the rest overdue
        applier
            .apply(&mut invoice, usd(dec!(100.00)), PaymentMethod::Cash, date(2026, 9, 15))
            .unwrap();

        assert_eq!(invoice.status, DocumentStatus::Overdue);
        assert!(invoice.is_overdue(date(2026, 9, 15)));
    }

    #[test]
    fn test_bills_never_enter_overdue_status() {
        let mut bill = draft_document(DocumentKind::Bill);
        bill.add_item(LineItem::new("Velvet trays", usd(dec!(60.00)))).unwrap();
        bill.approve(ActorId::new(), &NullNotifier).unwrap();

        let applier = PaymentApplier::new(&NullNotifier);
        applier
            .apply(&mut bill, usd(dec!(10.00)), PaymentMethod::BankTransfer, date(2026, 12, 1))
            .unwrap();

        assert_eq!(bill.status, DocumentStatus::PartiallyPaid);
    }
}

// ============================================================================
// Voiding
// ============================================================================

mod void_tests {
    use super::*;

    #[test]
    fn test_void_is_allowed_before_payment_completes() {
        let mut invoice = sent_invoice_with_total(dec!(100.00), dec!(0.00));
        invoice.void(ActorId::new(), "duplicate entry").unwrap();

        assert_eq!(invoice.status, DocumentStatus::Void);
        assert_eq!(invoice.void_reason.as_deref(), Some("duplicate entry"));
    }

    #[test]
    fn test_voiding_a_paid_bill_fails_and_leaves_status() {
        let mut bill = draft_document(DocumentKind::Bill);
        bill.add_item(LineItem::new("Polishing wheel", usd(dec!(75.00)))).unwrap();
        bill.approve(ActorId::new(), &NullNotifier).unwrap();

        let applier = PaymentApplier::new(&NullNotifier);
        applier
            .apply(&mut bill, usd(dec!(75.00)), PaymentMethod::Card, date(2026, 8, 10))
            .unwrap();
        assert_eq!(bill.status, DocumentStatus::Paid);

        let result = bill.void(ActorId::new(), "too late");
        assert!(matches!(result, Err(BillingError::InvalidTransition { .. })));
        assert_eq!(bill.status, DocumentStatus::Paid);
    }
}

// ============================================================================
// Aging
// ============================================================================

mod aging_tests {
    use super::*;

    #[test]
    fn test_aging_buckets() {
        let invoice = sent_invoice_with_total(dec!(100.00), dec!(0.00));
        // due 2026-08-31
        let cases = [
            (date(2026, 8, 31), AgingBucket::Current),
            (date(2026, 9, 1), AgingBucket::Days1To30),
            (date(2026, 9, 30), AgingBucket::Days1To30),
            (date(2026, 10, 1), AgingBucket::Days31To60),
            (date(2026, 10, 30), AgingBucket::Days31To60),
            (date(2026, 11, 15), AgingBucket::Days61To90),
            (date(2027, 1, 1), AgingBucket::Over90),
        ];

        for (as_of, bucket) in cases {
            assert_eq!(invoice.aging_bucket(as_of), bucket, "as of {}", as_of);
        }
    }

    #[test]
    fn test_paid_invoices_age_as_current() {
        let mut invoice = sent_invoice_with_total(dec!(100.00), dec!(0.00));
        let applier = PaymentApplier::new(&NullNotifier);
        applier
            .apply(&mut invoice, usd(dec!(100.00)), PaymentMethod::Card, date(2026, 8, 10))
            .unwrap();

        assert_eq!(invoice.aging_bucket(date(2027, 1, 1)), AgingBucket::Current);
    }
}

// ============================================================================
// Credit memos
// ============================================================================

mod credit_memo_tests {
    use super::*;

    fn open_memo(tenant: TenantId, amount: rust_decimal::Decimal) -> CreditMemo {
        CreditMemo::new(
            tenant,
            Counterparty::new(PartyId::new(), "Returning customer"),
            usd(amount),
        )
    }

    #[test]
    fn test_credit_application_caps_at_available() {
        let mut invoice = sent_invoice_with_total(dec!(300.00), dec!(0.00));
        let mut memo = open_memo(invoice.tenant_id, dec!(120.00));
        let applier = PaymentApplier::new(&NullNotifier);

        let result = applier.apply_credit(&mut invoice, &mut memo, usd(dec!(150.00)), date(2026, 8, 5));
        assert!(matches!(result, Err(BillingError::InsufficientCredit { .. })));
        assert_eq!(invoice.amount_paid.amount(), dec!(0.00));
        assert_eq!(memo.amount_available().amount(), dec!(120.00));
    }

    #[test]
    fn test_fully_consumed_memo_is_marked_applied() {
        let mut invoice = sent_invoice_with_total(dec!(300.00), dec!(0.00));
        let mut memo = open_memo(invoice.tenant_id, dec!(120.00));
        let applier = PaymentApplier::new(&NullNotifier);

        let payment = applier
            .apply_credit(&mut invoice, &mut memo, usd(dec!(120.00)), date(2026, 8, 5))
            .unwrap();

        assert_eq!(payment.method, PaymentMethod::StoreCredit);
        assert_eq!(memo.status, CreditMemoStatus::Applied);
        assert!(memo.amount_available().is_zero());
        assert_eq!(invoice.amount_paid.amount(), dec!(120.00));
    }

    #[test]
    fn test_partial_credit_stays_open() {
        let mut invoice = sent_invoice_with_total(dec!(300.00), dec!(0.00));
        let mut memo = open_memo(invoice.tenant_id, dec!(120.00));
        let applier = PaymentApplier::new(&NullNotifier);

        applier
            .apply_credit(&mut invoice, &mut memo, usd(dec!(50.00)), date(2026, 8, 5))
            .unwrap();

        assert_eq!(memo.status, CreditMemoStatus::Open);
        assert_eq!(memo.amount_available().amount(), dec!(70.00));
    }

    #[test]
    fn test_voiding_a_consumed_memo_fails() {
        let mut invoice = sent_invoice_with_total(dec!(300.00), dec!(0.00));
        let mut memo = open_memo(invoice.tenant_id, dec!(120.00));
        let applier = PaymentApplier::new(&NullNotifier);

        applier
            .apply_credit(&mut invoice, &mut memo, usd(dec!(120.00)), date(2026, 8, 5))
            .unwrap();

        assert!(matches!(memo.void(), Err(BillingError::CreditNotOpen(_))));

        let mut fresh = open_memo(invoice.tenant_id, dec!(40.00));
        fresh.void().unwrap();
        assert_eq!(fresh.status, CreditMemoStatus::Void);
    }

    #[test]
    fn test_cross_tenant_credit_is_rejected() {
        let mut invoice = sent_invoice_with_total(dec!(300.00), dec!(0.00));
        let mut memo = open_memo(TenantId::new(), dec!(120.00));
        let applier = PaymentApplier::new(&NullNotifier);

        let result = applier.apply_credit(&mut invoice, &mut memo, usd(dec!(50.00)), date(2026, 8, 5));
        assert!(matches!(result, Err(BillingError::TenantMismatch { .. })));
    }
}
