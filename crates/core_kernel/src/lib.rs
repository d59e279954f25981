//! Core Kernel - Foundational types and utilities for the jewelry shop system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Monthly accounting periods
//! - Common identifiers and value objects
//! - Document number sequences and the notification hook

pub mod error;
pub mod identifiers;
pub mod money;
pub mod notify;
pub mod period;
pub mod sequence;

pub use error::CoreError;
pub use identifiers::{
    ActorId, AssetId, BankAccountId, BankTransactionId, CreditMemoId, DisposalId, DocumentId,
    JournalEntryId, LedgerAccountId, PartyId, PaymentId, PostingId, ReconciliationId,
    ScheduleEntryId, TenantId,
};
pub use money::{Currency, Money, MoneyError, Rate};
pub use notify::{notify_best_effort, BusinessEvent, Notifier, NotifyError, NullNotifier};
pub use period::{Period, PeriodError};
pub use sequence::{format_document_number, InMemorySequences, SequenceProvider};
