//! Billing Domain - Bills, Invoices, and Payment Application
//!
//! Bills (payable) and invoices (receivable) share the [`BillingDocument`]
//! shape: line items, independent tax, a generated document number, and a
//! status machine driven by a pure transition table. Payments flow through
//! the [`PaymentApplier`], which guarantees a payment record is applied to
//! its document exactly once.
//!
//! # Invariants
//!
//! - `total` equals `subtotal + tax` within one cent after every mutation
//! - `amount_paid` never exceeds `total`
//! - A paid document cannot be voided
//! - Overdue is a soft state for invoices only, evaluated when status is
//!   recomputed

pub mod document;
pub mod error;
pub mod payment;

pub use document::{
    transition, AgingBucket, BillingDocument, Counterparty, DocumentEvent, DocumentKind,
    DocumentStatus, LineItem,
};
pub use error::BillingError;
pub use payment::{CreditMemo, CreditMemoStatus, Payment, PaymentApplier, PaymentMethod};
