//! Comprehensive tests for domain_banking

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{ActorId, NullNotifier, TenantId};
use domain_banking::{
    BankAccount, BankReconciliation, BankTransaction, BankingError, ReconciliationStatus,
};
use test_utils::{usd, BankTransactionBuilder};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn operating_account(tenant: TenantId) -> BankAccount {
    BankAccount::new(tenant, "Operating checking", "000111222", usd(dec!(10000.00)))
}

/// A reconciliation session over some statement lines, all marked reconciled
fn session_with_lines(
    statement_ending: rust_decimal::Decimal,
    book_ending: rust_decimal::Decimal,
) -> (
    BankAccount,
    BankReconciliation,
    Vec<BankTransaction>,
    ActorId,
) {
    let tenant = TenantId::new();
    let account = operating_account(tenant);
    let actor = ActorId::new();

    let reconciliation = BankReconciliation::new(
        &account,
        date(2026, 8, 1),
        date(2026, 8, 31),
        usd(dec!(10000.00)),
        usd(statement_ending),
        usd(dec!(10000.00)),
        usd(book_ending),
    );

    let mut lines = vec![
        BankTransactionBuilder::deposit(account.id, tenant, usd(dec!(1200.00)))
            .on(date(2026, 8, 5))
            .described("Card settlement")
            .build(),
        BankTransactionBuilder::withdrawal(account.id, tenant, usd(dec!(700.00)))
            .on(date(2026, 8, 12))
            .described("Rent")
            .build(),
        BankTransactionBuilder::deposit(account.id, tenant, usd(dec!(15.00)))
            .on(date(2026, 8, 20))
            .described("Bank fee correction")
            .adjustment()
            .build(),
    ];
    for line in &mut lines {
        line.mark_reconciled(reconciliation.id, actor, date(2026, 8, 31))
            .unwrap();
    }

    (account, reconciliation, lines, actor)
}

// ============================================================================
// Variance
// ============================================================================

mod variance_tests {
    use super::*;

    #[test]
    fn test_matching_balances_reconcile_cleanly() {
        let (_, reconciliation, _, _) = session_with_lines(dec!(10500.00), dec!(10500.00));

        assert_eq!(reconciliation.variance().amount(), dec!(0.00));
        assert!(reconciliation.is_balanced());
    }

    #[test]
    fn test_variance_surfaces_the_difference() {
        let (_, reconciliation, _, _) = session_with_lines(dec!(10500.00), dec!(10450.00));

        assert_eq!(reconciliation.variance().amount(), dec!(50.00));
        assert!(!reconciliation.is_balanced());
    }

    #[test]
    fn test_one_cent_variance_is_not_balanced() {
        let (_, reconciliation, _, _) = session_with_lines(dec!(10500.01), dec!(10500.00));

        assert!(!reconciliation.is_balanced());
    }
}

// ============================================================================
// Completion
// ============================================================================

mod completion_tests {
    use super::*;

    #[test]
    fn test_complete_computes_totals_and_stamps_account() {
        let (mut account, mut reconciliation, lines, actor) =
            session_with_lines(dec!(10500.00), dec!(10500.00));

        reconciliation
            .complete(actor, &lines, &mut account, &NullNotifier)
            .unwrap();

        assert_eq!(reconciliation.status, ReconciliationStatus::Completed);
        assert_eq!(reconciliation.total_deposits.amount(), dec!(1200.00));
        assert_eq!(reconciliation.total_withdrawals.amount(), dec!(700.00));
        assert_eq!(reconciliation.total_adjustments.amount(), dec!(15.00));
        assert_eq!(reconciliation.completed_by, Some(actor));
        assert!(reconciliation.completed_at.is_some());

        assert_eq!(account.reconciled_balance.amount(), dec!(10500.00));
        assert_eq!(account.last_reconciled_date, Some(date(2026, 8, 31)));
    }

    #[test]
    fn test_completing_twice_fails() {
        let (mut account, mut reconciliation, lines, actor) =
            session_with_lines(dec!(10500.00), dec!(10500.00));

        reconciliation
            .complete(actor, &lines, &mut account, &NullNotifier)
            .unwrap();

        let again = reconciliation.complete(actor, &lines, &mut account, &NullNotifier);
        assert!(matches!(again, Err(BankingError::AlreadyCompleted(_))));
        assert_eq!(reconciliation.status, ReconciliationStatus::Completed);
    }

    #[test]
    fn test_unreconciled_lines_do_not_count_toward_totals() {
        let (mut account, mut reconciliation, mut lines, actor) =
            session_with_lines(dec!(10500.00), dec!(10500.00));

        // release the deposit before completing
        lines[0].unreconcile(actor, "belongs to September").unwrap();

        reconciliation
            .complete(actor, &lines, &mut account, &NullNotifier)
            .unwrap();

        assert_eq!(reconciliation.total_deposits.amount(), dec!(0.00));
        assert_eq!(reconciliation.total_withdrawals.amount(), dec!(700.00));
    }

    #[test]
    fn test_completing_against_the_wrong_account_fails() {
        let (_, mut reconciliation, lines, actor) =
            session_with_lines(dec!(10500.00), dec!(10500.00));
        let mut other_account = operating_account(TenantId::new());

        let result = reconciliation.complete(actor, &lines, &mut other_account, &NullNotifier);
        assert!(matches!(result, Err(BankingError::AccountNotFound(_))));
        assert_eq!(reconciliation.status, ReconciliationStatus::InProgress);
    }
}

// ============================================================================
// Cancellation
// ============================================================================

mod cancellation_tests {
    use super::*;

    #[test]
    fn test_cancel_releases_every_member_line() {
        let (_, mut reconciliation, mut lines, _) =
            session_with_lines(dec!(10500.00), dec!(10500.00));

        reconciliation
            .cancel("statement import was corrupted", &mut lines)
            .unwrap();

        assert_eq!(reconciliation.status, ReconciliationStatus::Cancelled);
        assert!(reconciliation
            .notes
            .iter()
            .any(|n| n.contains("statement import was corrupted")));
        for line in &lines {
            assert!(!line.is_reconciled);
            assert!(line.reconciliation_id.is_none());
            assert!(line.reconciled_by.is_none());
            assert!(line.reconciled_date.is_none());
        }
    }

    #[test]
    fn test_completed_reconciliation_cannot_be_cancelled() {
        let (mut account, mut reconciliation, mut lines, actor) =
            session_with_lines(dec!(10500.00), dec!(10500.00));

        reconciliation
            .complete(actor, &lines, &mut account, &NullNotifier)
            .unwrap();

        let result = reconciliation.cancel("too late", &mut lines);
        assert!(matches!(result, Err(BankingError::AlreadyCompleted(_))));
        assert!(lines.iter().all(|l| l.is_reconciled));
    }
}
