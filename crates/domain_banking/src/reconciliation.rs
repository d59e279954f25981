//! Bank reconciliation
//!
//! A reconciliation gathers statement lines for a period, compares the
//! statement's ending balance with the books, and either completes
//! (freezing the account's reconciled balance) or cancels (releasing every
//! claimed line). Both end states are terminal.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{
    notify_best_effort, ActorId, BankAccountId, BusinessEvent, Money, Notifier, ReconciliationId,
    TenantId,
};

use crate::account::BankAccount;
use crate::error::BankingError;
use crate::transaction::{BankTransaction, TransactionDirection};

/// Reconciliation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReconciliationStatus {
    /// Lines are being matched
    InProgress,
    /// Completed; the account's reconciled balance was updated (terminal)
    Completed,
    /// Cancelled; every claimed line was released (terminal)
    Cancelled,
}

/// A reconciliation session for one bank account and period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankReconciliation {
    /// Unique identifier
    pub id: ReconciliationId,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Account being reconciled
    pub bank_account_id: BankAccountId,
    /// Period start
    pub period_start: NaiveDate,
    /// Period end
    pub period_end: NaiveDate,
    /// Statement balance at period start
    pub statement_beginning_balance: Money,
    /// Statement balance at period end
    pub statement_ending_balance: Money,
    /// Book balance at period start
    pub book_beginning_balance: Money,
    /// Book balance at period end
    pub book_ending_balance: Money,
    /// Total reconciled deposits, computed at completion
    pub total_deposits: Money,
    /// Total reconciled withdrawals, computed at completion
    pub total_withdrawals: Money,
    /// Signed total of adjustment lines, computed at completion
    pub total_adjustments: Money,
    /// Status
    pub status: ReconciliationStatus,
    /// Who completed the reconciliation
    pub completed_by: Option<ActorId>,
    /// When it was completed
    pub completed_at: Option<DateTime<Utc>>,
    /// Notes, including cancellation reasons
    pub notes: Vec<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl BankReconciliation {
    /// Opens a reconciliation session against an account
    pub fn new(
        account: &BankAccount,
        period_start: NaiveDate,
        period_end: NaiveDate,
        statement_beginning_balance: Money,
        statement_ending_balance: Money,
        book_beginning_balance: Money,
        book_ending_balance: Money,
    ) -> Self {
        let now = Utc::now();
        let zero = Money::zero(account.currency);
        Self {
            id: ReconciliationId::new_v7(),
            tenant_id: account.tenant_id,
            bank_account_id: account.id,
            period_start,
            period_end,
            statement_beginning_balance,
            statement_ending_balance,
            book_beginning_balance,
            book_ending_balance,
            total_deposits: zero,
            total_withdrawals: zero,
            total_adjustments: zero,
            status: ReconciliationStatus::InProgress,
            completed_by: None,
            completed_at: None,
            notes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Statement ending balance minus book ending balance
    pub fn variance(&self) -> Money {
        self.statement_ending_balance - self.book_ending_balance
    }

    /// True when the variance is below one cent
    pub fn is_balanced(&self) -> bool {
        self.variance().abs().amount() < dec!(0.01)
    }

    /// Completes the reconciliation
    ///
    /// Recomputes deposit/withdrawal/adjustment totals from the reconciled
    /// member lines, stamps the account's reconciled balance and date, and
    /// transitions to Completed.
    ///
    /// # Errors
    ///
    /// Fails if already completed or cancelled; nothing is mutated then.
    pub fn complete(
        &mut self,
        actor: ActorId,
        transactions: &[BankTransaction],
        account: &mut BankAccount,
        notifier: &dyn Notifier,
    ) -> Result<(), BankingError> {
        match self.status {
            ReconciliationStatus::Completed => {
                return Err(BankingError::AlreadyCompleted(self.id.to_string()))
            }
            ReconciliationStatus::Cancelled => {
                return Err(BankingError::NotInProgress {
                    reconciliation: self.id.to_string(),
                    status: "cancelled".to_string(),
                    operation: "complete",
                })
            }
            ReconciliationStatus::InProgress => {}
        }
        if account.id != self.bank_account_id {
            return Err(BankingError::AccountNotFound(
                self.bank_account_id.to_string(),
            ));
        }

        let mut deposits = Money::zero(account.currency);
        let mut withdrawals = Money::zero(account.currency);
        let mut adjustments = Money::zero(account.currency);

        for txn in self.members(transactions) {
            if txn.is_adjustment {
                adjustments = adjustments.checked_add(&txn.signed_amount())?;
            } else {
                match txn.direction {
                    TransactionDirection::Credit => {
                        deposits = deposits.checked_add(&txn.amount)?;
                    }
                    TransactionDirection::Debit => {
                        withdrawals = withdrawals.checked_add(&txn.amount)?;
                    }
                }
            }
        }

        self.total_deposits = deposits;
        self.total_withdrawals = withdrawals;
        self.total_adjustments = adjustments;

        account.record_reconciliation(self.statement_ending_balance, self.period_end);

        self.status = ReconciliationStatus::Completed;
        self.completed_by = Some(actor);
        self.completed_at = Some(Utc::now());
        self.touch();

        tracing::info!(
            reconciliation = %self.id,
            account = %account.account_number,
            variance = %self.variance(),
            balanced = self.is_balanced(),
            "reconciliation completed"
        );
        notify_best_effort(
            notifier,
            BusinessEvent::ReconciliationCompleted {
                tenant_id: self.tenant_id,
                reconciliation_id: self.id,
            },
        );

        Ok(())
    }

    /// Cancels the reconciliation, releasing every claimed line
    ///
    /// # Errors
    ///
    /// A completed reconciliation can never be cancelled.
    pub fn cancel(
        &mut self,
        reason: impl Into<String>,
        transactions: &mut [BankTransaction],
    ) -> Result<(), BankingError> {
        match self.status {
            ReconciliationStatus::Completed => {
                return Err(BankingError::AlreadyCompleted(self.id.to_string()))
            }
            ReconciliationStatus::Cancelled => {
                return Err(BankingError::NotInProgress {
                    reconciliation: self.id.to_string(),
                    status: "cancelled".to_string(),
                    operation: "cancel",
                })
            }
            ReconciliationStatus::InProgress => {}
        }

        for txn in transactions.iter_mut() {
            if txn.reconciliation_id == Some(self.id) {
                txn.clear_reconciliation();
            }
        }

        self.notes.push(format!("Cancelled: {}", reason.into()));
        self.status = ReconciliationStatus::Cancelled;
        self.touch();

        Ok(())
    }

    /// The reconciled lines claimed by this session
    fn members<'a>(
        &self,
        transactions: &'a [BankTransaction],
    ) -> impl Iterator<Item = &'a BankTransaction> {
        let id = self.id;
        transactions
            .iter()
            .filter(move |t| t.reconciliation_id == Some(id) && t.is_reconciled)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
