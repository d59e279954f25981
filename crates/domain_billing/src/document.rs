//! Billing documents
//!
//! Bills (payable to a supplier) and invoices (receivable from a customer)
//! share one shape and one status machine. The status machine is a pure
//! transition table; entity methods validate input, call the table, and
//! only then mutate.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{
    format_document_number, ActorId, BusinessEvent, Currency, DocumentId, Money, Notifier,
    PartyId, Period, SequenceProvider, TenantId,
};

use crate::error::BillingError;

/// Whether a document is payable or receivable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Supplier bill (accounts payable)
    Bill,
    /// Customer invoice (accounts receivable)
    Invoice,
}

impl DocumentKind {
    /// Prefix used in generated document numbers
    pub fn number_prefix(&self) -> &'static str {
        match self {
            DocumentKind::Bill => "BILL",
            DocumentKind::Invoice => "INV",
        }
    }
}

/// Document lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Being drafted; lines and tax still editable
    Draft,
    /// Bill approved for payment
    Approved,
    /// Invoice sent to the customer
    Sent,
    /// Partial payment received
    PartiallyPaid,
    /// Fully paid (terminal)
    Paid,
    /// Invoice past its due date and not fully paid
    Overdue,
    /// Voided (terminal)
    Void,
}

impl DocumentStatus {
    /// Paid and Void accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, DocumentStatus::Paid | DocumentStatus::Void)
    }
}

/// Events the status machine responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentEvent {
    /// Approve a drafted bill
    Approve,
    /// Send a drafted invoice
    Send,
    /// A payment arrived but the document is not yet settled
    RecordPartialPayment,
    /// A payment arrived that settles the document
    RecordFullPayment,
    /// An unpaid invoice moved past its due date
    FallOverdue,
    /// Void the document
    Void,
}

/// The status transition table
///
/// Every legal (status, event) pair maps to its successor; everything else
/// is an `InvalidTransition` error. Payments are only accepted once a
/// document has left Draft, and a paid document can never be voided.
pub fn transition(
    kind: DocumentKind,
    status: DocumentStatus,
    event: DocumentEvent,
) -> Result<DocumentStatus, BillingError> {
    use DocumentEvent as E;
    use DocumentStatus as S;

    let next = match (kind, status, event) {
        (DocumentKind::Bill, S::Draft, E::Approve) => Some(S::Approved),
        (DocumentKind::Invoice, S::Draft, E::Send) => Some(S::Sent),

        (_, S::Approved | S::Sent | S::PartiallyPaid | S::Overdue, E::RecordPartialPayment) => {
            Some(S::PartiallyPaid)
        }
        (_, S::Approved | S::Sent | S::PartiallyPaid | S::Overdue, E::RecordFullPayment) => {
            Some(S::Paid)
        }

        (DocumentKind::Invoice, S::Sent | S::PartiallyPaid | S::Overdue, E::FallOverdue) => {
            Some(S::Overdue)
        }

        (_, S::Draft | S::Approved | S::Sent | S::PartiallyPaid | S::Overdue, E::Void) => {
            Some(S::Void)
        }

        _ => None,
    };

    next.ok_or(BillingError::InvalidTransition { status, event })
}

/// The other party on a document
///
/// A plain value struct shared by bills (supplier), invoices (customer),
/// and credit memos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterparty {
    pub id: PartyId,
    pub name: String,
}

impl Counterparty {
    pub fn new(id: PartyId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A line item on a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Item ID
    pub id: Uuid,
    /// Description
    pub description: String,
    /// Quantity
    pub quantity: Decimal,
    /// Unit price
    pub unit_price: Money,
}

impl LineItem {
    /// Creates a new line item with quantity 1
    pub fn new(description: impl Into<String>, unit_price: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            quantity: Decimal::ONE,
            unit_price,
        }
    }

    /// Sets the quantity
    pub fn with_quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = quantity;
        self
    }

    /// The extended amount for this line
    pub fn amount(&self) -> Money {
        self.unit_price * self.quantity
    }
}

/// Receivable aging buckets, by days past due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgingBucket {
    Current,
    Days1To30,
    Days31To60,
    Days61To90,
    Over90,
}

/// A bill or invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingDocument {
    /// Unique identifier
    pub id: DocumentId,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Bill or invoice
    pub kind: DocumentKind,
    /// Supplier or customer
    pub counterparty: Counterparty,
    /// Generated number, unique per tenant
    pub document_number: String,
    /// Issue date
    pub issue_date: NaiveDate,
    /// Due date
    pub due_date: NaiveDate,
    /// Currency
    pub currency: Currency,
    /// Line items
    pub items: Vec<LineItem>,
    /// Subtotal
    pub subtotal: Money,
    /// Tax amount
    pub tax: Money,
    /// Total amount
    pub total: Money,
    /// Amount paid
    pub amount_paid: Money,
    /// Status
    pub status: DocumentStatus,
    /// Who approved/sent the document
    pub approved_by: Option<ActorId>,
    /// When it was approved/sent
    pub approved_at: Option<DateTime<Utc>>,
    /// Who voided the document
    pub voided_by: Option<ActorId>,
    /// When it was voided
    pub voided_at: Option<DateTime<Utc>>,
    /// Why it was voided
    pub void_reason: Option<String>,
    /// Notes
    pub notes: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl BillingDocument {
    /// Creates a new draft document with a generated number
    ///
    /// # Errors
    ///
    /// Returns error if the due date precedes the issue date
    pub fn new(
        tenant_id: TenantId,
        kind: DocumentKind,
        counterparty: Counterparty,
        issue_date: NaiveDate,
        due_date: NaiveDate,
        currency: Currency,
        sequences: &mut dyn SequenceProvider,
    ) -> Result<Self, BillingError> {
        if due_date < issue_date {
            return Err(BillingError::DueBeforeIssue {
                issue: issue_date,
                due: due_date,
            });
        }

        let period = Period::from_date(issue_date);
        let prefix = kind.number_prefix();
        let seq = sequences.next(tenant_id, prefix, period);
        let now = Utc::now();

        Ok(Self {
            id: DocumentId::new_v7(),
            tenant_id,
            kind,
            counterparty,
            document_number: format_document_number(prefix, period, seq),
            issue_date,
            due_date,
            currency,
            items: Vec::new(),
            subtotal: Money::zero(currency),
            tax: Money::zero(currency),
            total: Money::zero(currency),
            amount_paid: Money::zero(currency),
            status: DocumentStatus::Draft,
            approved_by: None,
            approved_at: None,
            voided_by: None,
            voided_at: None,
            void_reason: None,
            notes: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Adds a line item and recalculates totals
    ///
    /// Only drafts are editable.
    pub fn add_item(&mut self, item: LineItem) -> Result<(), BillingError> {
        if self.status != DocumentStatus::Draft {
            return Err(BillingError::NotEditable(self.status));
        }
        if item.unit_price.currency() != self.currency {
            return Err(BillingError::InvalidAmount(format!(
                "line currency {} does not match document currency {}",
                item.unit_price.currency(),
                self.currency
            )));
        }

        self.items.push(item);
        self.calculate_totals();
        self.touch();
        Ok(())
    }

    /// Sets the tax amount and recalculates totals
    ///
    /// Tax is set independently; it is not derived from a tax table here.
    pub fn set_tax(&mut self, tax: Money) -> Result<(), BillingError> {
        if self.status != DocumentStatus::Draft {
            return Err(BillingError::NotEditable(self.status));
        }
        if tax.currency() != self.currency {
            return Err(BillingError::InvalidAmount(format!(
                "tax currency {} does not match document currency {}",
                tax.currency(),
                self.currency
            )));
        }
        if tax.is_negative() {
            return Err(BillingError::InvalidAmount(
                "tax cannot be negative".to_string(),
            ));
        }

        self.tax = tax;
        self.calculate_totals();
        self.touch();
        Ok(())
    }

    /// Recalculates subtotal and total from line items
    pub fn calculate_totals(&mut self) {
        self.subtotal = self
            .items
            .iter()
            .fold(Money::zero(self.currency), |acc, item| acc + item.amount());
        self.total = self.subtotal + self.tax;
    }

    /// Approves a drafted bill
    pub fn approve(
        &mut self,
        actor: ActorId,
        notifier: &dyn Notifier,
    ) -> Result<(), BillingError> {
        self.status = transition(self.kind, self.status, DocumentEvent::Approve)?;
        self.approved_by = Some(actor);
        self.approved_at = Some(Utc::now());
        self.touch();

        tracing::info!(document = %self.document_number, "bill approved");
        core_kernel::notify_best_effort(
            notifier,
            BusinessEvent::DocumentApproved {
                tenant_id: self.tenant_id,
                document_id: self.id,
            },
        );
        Ok(())
    }

    /// Sends a drafted invoice
    pub fn send(&mut self, actor: ActorId, notifier: &dyn Notifier) -> Result<(), BillingError> {
        self.status = transition(self.kind, self.status, DocumentEvent::Send)?;
        self.approved_by = Some(actor);
        self.approved_at = Some(Utc::now());
        self.touch();

        tracing::info!(document = %self.document_number, "invoice sent");
        core_kernel::notify_best_effort(
            notifier,
            BusinessEvent::DocumentSent {
                tenant_id: self.tenant_id,
                document_id: self.id,
            },
        );
        Ok(())
    }

    /// Voids the document
    ///
    /// Paid documents can never be voided.
    pub fn void(&mut self, actor: ActorId, reason: impl Into<String>) -> Result<(), BillingError> {
        self.status = transition(self.kind, self.status, DocumentEvent::Void)?;
        self.voided_by = Some(actor);
        self.voided_at = Some(Utc::now());
        self.void_reason = Some(reason.into());
        self.touch();
        Ok(())
    }

    /// Records a payment amount against the document
    ///
    /// The status is recomputed afterwards: Paid when settled, otherwise
    /// PartiallyPaid, and for invoices Overdue when past due at `as_of`.
    pub fn add_payment(&mut self, amount: Money, as_of: NaiveDate) -> Result<(), BillingError> {
        if amount.currency() != self.currency {
            return Err(BillingError::InvalidAmount(format!(
                "payment currency {} does not match document currency {}",
                amount.currency(),
                self.currency
            )));
        }
        if !amount.is_positive() {
            return Err(BillingError::InvalidAmount(
                "payment amount must be positive".to_string(),
            ));
        }

        let new_paid = self.amount_paid.checked_add(&amount)?;
        if new_paid.amount() > self.total.amount() {
            return Err(BillingError::ExceedsBalanceDue {
                amount: amount.amount(),
                due: self.amount_due().amount(),
            });
        }

        let event = if new_paid.amount() >= self.total.amount() {
            DocumentEvent::RecordFullPayment
        } else {
            DocumentEvent::RecordPartialPayment
        };
        let mut next = transition(self.kind, self.status, event)?;

        // Overdue is a soft state evaluated at recompute time, invoices only
        if self.kind == DocumentKind::Invoice
            && next != DocumentStatus::Paid
            && as_of > self.due_date
        {
            next = transition(self.kind, next, DocumentEvent::FallOverdue)?;
        }

        self.amount_paid = new_paid;
        self.status = next;
        self.touch();
        Ok(())
    }

    /// The remaining balance
    pub fn amount_due(&self) -> Money {
        self.total - self.amount_paid
    }

    /// True when fully paid
    pub fn is_paid(&self) -> bool {
        self.total.is_positive() && self.amount_paid.amount() >= self.total.amount()
    }

    /// True when past due and not settled or voided
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        as_of > self.due_date && !self.status.is_terminal()
    }

    /// Receivable aging bucket at the given date
    pub fn aging_bucket(&self, as_of: NaiveDate) -> AgingBucket {
        if !self.is_overdue(as_of) {
            return AgingBucket::Current;
        }

        let days_overdue = (as_of - self.due_date).num_days();
        match days_overdue {
            1..=30 => AgingBucket::Days1To30,
            31..=60 => AgingBucket::Days31To60,
            61..=90 => AgingBucket::Days61To90,
            _ => AgingBucket::Over90,
        }
    }

    /// Consistency check for reporting: total matches subtotal plus tax
    /// within one cent
    pub fn totals_are_consistent(&self) -> bool {
        let expected = self.subtotal + self.tax;
        self.total.approx_eq(&expected)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
