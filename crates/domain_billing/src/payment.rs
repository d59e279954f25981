//! Payment application
//!
//! Payments and credit memos are applied to documents through the
//! [`PaymentApplier`], which owns the exactly-once guarantee: a payment
//! record increments its document a single time, and re-applying it is a
//! domain error rather than a silent double count.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{
    notify_best_effort, BusinessEvent, CreditMemoId, DocumentId, Money, Notifier, PaymentId,
    TenantId,
};

use crate::document::{BillingDocument, Counterparty, DocumentStatus};
use crate::error::BillingError;

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Cash over the counter
    Cash,
    /// Credit or debit card
    Card,
    /// Bank transfer
    BankTransfer,
    /// Check/cheque
    Check,
    /// Applied store credit
    StoreCredit,
}

/// A payment record against a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Document being paid
    pub document_id: DocumentId,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Payment amount
    pub amount: Money,
    /// Payment method
    pub method: PaymentMethod,
    /// Payment date
    pub payment_date: NaiveDate,
    /// External reference (bank ref, credit memo number)
    pub reference: Option<String>,
    /// Whether this record has been applied to its document
    applied: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a new, unapplied payment record
    pub fn new(
        document_id: DocumentId,
        tenant_id: TenantId,
        amount: Money,
        method: PaymentMethod,
        payment_date: NaiveDate,
    ) -> Self {
        Self {
            id: PaymentId::new_v7(),
            document_id,
            tenant_id,
            amount,
            method,
            payment_date,
            reference: None,
            applied: false,
            created_at: Utc::now(),
        }
    }

    /// Sets the external reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Whether this record has already incremented its document
    pub fn is_applied(&self) -> bool {
        self.applied
    }

    /// Applies this payment to its document, exactly once
    ///
    /// A second call fails with `PaymentAlreadyApplied` and leaves the
    /// document untouched.
    pub fn apply_to(&mut self, document: &mut BillingDocument) -> Result<(), BillingError> {
        if self.applied {
            return Err(BillingError::PaymentAlreadyApplied(self.id.to_string()));
        }
        if self.document_id != document.id {
            return Err(BillingError::PaymentDocumentMismatch {
                payment: self.id.to_string(),
                document: document.id.to_string(),
            });
        }

        document.add_payment(self.amount, self.payment_date)?;
        self.applied = true;
        Ok(())
    }
}

/// Credit memo status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditMemoStatus {
    /// Credit remains available
    Open,
    /// Fully consumed
    Applied,
    /// Voided before use
    Void,
}

/// Store credit owed to a counterparty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditMemo {
    /// Unique identifier
    pub id: CreditMemoId,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Who holds the credit
    pub counterparty: Counterparty,
    /// Original credit amount
    pub amount: Money,
    /// Amount already applied
    pub amount_applied: Money,
    /// Status
    pub status: CreditMemoStatus,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl CreditMemo {
    /// Creates a new open credit memo
    pub fn new(tenant_id: TenantId, counterparty: Counterparty, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: CreditMemoId::new_v7(),
            tenant_id,
            counterparty,
            amount,
            amount_applied: Money::zero(amount.currency()),
            status: CreditMemoStatus::Open,
            created_at: now,
            updated_at: now,
        }
    }

    /// Credit still available for application
    pub fn amount_available(&self) -> Money {
        self.amount - self.amount_applied
    }

    /// Voids an unused credit
    pub fn void(&mut self) -> Result<(), BillingError> {
        if self.status != CreditMemoStatus::Open {
            return Err(BillingError::CreditNotOpen(self.id.to_string()));
        }
        self.status = CreditMemoStatus::Void;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Consumes part of the credit, flipping to Applied when exhausted
    fn consume(&mut self, amount: Money) -> Result<(), BillingError> {
        if self.status != CreditMemoStatus::Open {
            return Err(BillingError::CreditNotOpen(self.id.to_string()));
        }

        let available = self.amount_available();
        if amount.amount() > available.amount() {
            return Err(BillingError::InsufficientCredit {
                requested: amount.amount(),
                available: available.amount(),
            });
        }

        self.amount_applied = self.amount_applied.checked_add(&amount)?;
        if self.amount_available().is_zero() {
            self.status = CreditMemoStatus::Applied;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Applies payments and credit to documents
///
/// The applier validates against the document's balance at apply time,
/// creates the payment record, and increments the document exactly once.
/// Paid/overdue transitions raise best-effort notifications.
pub struct PaymentApplier<'a> {
    notifier: &'a dyn Notifier,
}

impl<'a> PaymentApplier<'a> {
    pub fn new(notifier: &'a dyn Notifier) -> Self {
        Self { notifier }
    }

    /// Applies a payment to a document
    ///
    /// # Errors
    ///
    /// Rejects non-positive amounts and amounts exceeding the balance due;
    /// the document is left unchanged on failure.
    pub fn apply(
        &self,
        document: &mut BillingDocument,
        amount: Money,
        method: PaymentMethod,
        date: NaiveDate,
    ) -> Result<Payment, BillingError> {
        let mut payment = Payment::new(document.id, document.tenant_id, amount, method, date);
        payment.apply_to(document)?;

        tracing::info!(
            document = %document.document_number,
            amount = %amount,
            ?method,
            "payment applied"
        );
        self.raise_status_events(document);

        Ok(payment)
    }

    /// Applies store credit from a memo to a document
    ///
    /// The amount is capped by both the document's balance due and the
    /// memo's available credit; the memo flips to Applied when fully
    /// consumed.
    pub fn apply_credit(
        &self,
        document: &mut BillingDocument,
        memo: &mut CreditMemo,
        amount: Money,
        date: NaiveDate,
    ) -> Result<Payment, BillingError> {
        if memo.tenant_id != document.tenant_id {
            return Err(BillingError::TenantMismatch {
                expected: document.tenant_id.to_string(),
                actual: memo.tenant_id.to_string(),
            });
        }
        if memo.status != CreditMemoStatus::Open {
            return Err(BillingError::CreditNotOpen(memo.id.to_string()));
        }

        let available = memo.amount_available();
        if amount.amount() > available.amount() {
            return Err(BillingError::InsufficientCredit {
                requested: amount.amount(),
                available: available.amount(),
            });
        }

        let mut payment = Payment::new(
            document.id,
            document.tenant_id,
            amount,
            PaymentMethod::StoreCredit,
            date,
        )
        .with_reference(memo.id.to_string());
        payment.apply_to(document)?;
        memo.consume(amount)?;

        tracing::info!(
            document = %document.document_number,
            memo = %memo.id,
            amount = %amount,
            "credit applied"
        );
        self.raise_status_events(document);

        Ok(payment)
    }

    fn raise_status_events(&self, document: &BillingDocument) {
        match document.status {
            DocumentStatus::Paid => notify_best_effort(
                self.notifier,
                BusinessEvent::DocumentPaid {
                    tenant_id: document.tenant_id,
                    document_id: document.id,
                },
            ),
            DocumentStatus::Overdue => notify_best_effort(
                self.notifier,
                BusinessEvent::DocumentOverdue {
                    tenant_id: document.tenant_id,
                    document_id: document.id,
                },
            ),
            _ => {}
        }
    }
}
