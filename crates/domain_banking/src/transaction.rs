//! Bank transactions
//!
//! Statement lines imported from the bank. Amounts are unsigned; direction
//! carries the sign. Reconciliation history on a transaction is append-only.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{
    ActorId, BankAccountId, BankTransactionId, JournalEntryId, Money, ReconciliationId, TenantId,
};

use crate::error::BankingError;

/// Direction of a bank transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionDirection {
    /// Money leaving the account
    Debit,
    /// Money entering the account
    Credit,
}

/// A single statement line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankTransaction {
    /// Unique identifier
    pub id: BankTransactionId,
    /// Account the line belongs to
    pub bank_account_id: BankAccountId,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Transaction date
    pub date: NaiveDate,
    /// Description from the statement
    pub description: String,
    /// Unsigned amount
    pub amount: Money,
    /// Direction
    pub direction: TransactionDirection,
    /// Whether this is a reconciliation adjustment line
    pub is_adjustment: bool,
    /// Whether the line has been reconciled
    pub is_reconciled: bool,
    /// Reconciliation that claimed this line
    pub reconciliation_id: Option<ReconciliationId>,
    /// Who reconciled it
    pub reconciled_by: Option<ActorId>,
    /// When it was reconciled
    pub reconciled_date: Option<NaiveDate>,
    /// Journal entry matched to this line
    pub matched_entry_id: Option<JournalEntryId>,
    /// Append-only audit history
    pub audit_trail: Vec<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl BankTransaction {
    /// Creates a new unreconciled transaction
    ///
    /// # Errors
    ///
    /// The amount must be non-negative; direction carries the sign.
    pub fn new(
        bank_account_id: BankAccountId,
        tenant_id: TenantId,
        date: NaiveDate,
        description: impl Into<String>,
        amount: Money,
        direction: TransactionDirection,
    ) -> Result<Self, BankingError> {
        if amount.is_negative() {
            return Err(BankingError::NegativeAmount(amount.to_string()));
        }

        Ok(Self {
            id: BankTransactionId::new_v7(),
            bank_account_id,
            tenant_id,
            date,
            description: description.into(),
            amount,
            direction,
            is_adjustment: false,
            is_reconciled: false,
            reconciliation_id: None,
            reconciled_by: None,
            reconciled_date: None,
            matched_entry_id: None,
            audit_trail: Vec::new(),
            created_at: Utc::now(),
        })
    }

    /// Marks this line as a reconciliation adjustment
    pub fn as_adjustment(mut self) -> Self {
        self.is_adjustment = true;
        self
    }

    /// The amount with its sign: negative for debits, positive for credits
    pub fn signed_amount(&self) -> Money {
        match self.direction {
            TransactionDirection::Debit => -self.amount,
            TransactionDirection::Credit => self.amount,
        }
    }

    /// Links this line to a posted journal entry
    pub fn match_journal_entry(&mut self, entry_id: JournalEntryId) {
        self.matched_entry_id = Some(entry_id);
    }

    /// Claims this line for a reconciliation
    ///
    /// # Errors
    ///
    /// Fails if the line is already reconciled.
    pub fn mark_reconciled(
        &mut self,
        reconciliation_id: ReconciliationId,
        actor: ActorId,
        date: NaiveDate,
    ) -> Result<(), BankingError> {
        if self.is_reconciled {
            return Err(BankingError::AlreadyReconciled(self.id.to_string()));
        }

        self.is_reconciled = true;
        self.reconciliation_id = Some(reconciliation_id);
        self.reconciled_by = Some(actor);
        self.reconciled_date = Some(date);
        Ok(())
    }

    /// Releases a reconciled line, recording why
    ///
    /// The reason is mandatory and lands on the append-only audit trail;
    /// prior history is never overwritten.
    pub fn unreconcile(&mut self, actor: ActorId, reason: &str) -> Result<(), BankingError> {
        if !self.is_reconciled {
            return Err(BankingError::NotReconciled(self.id.to_string()));
        }
        if reason.trim().is_empty() {
            return Err(BankingError::ReasonRequired);
        }

        self.audit_trail.push(format!(
            "{} unreconciled by {}: {}",
            Utc::now().to_rfc3339(),
            actor,
            reason
        ));
        self.clear_reconciliation();
        Ok(())
    }

    /// Clears reconciliation state without an audit requirement
    ///
    /// Used when a whole reconciliation is cancelled; the cancellation
    /// itself carries the reason.
    pub(crate) fn clear_reconciliation(&mut self) {
        self.is_reconciled = false;
        self.reconciliation_id = None;
        self.reconciled_by = None;
        self.reconciled_date = None;
    }
}
