//! Posting and entry-draft types
//!
//! This module defines the structure of journal entries before they are
//! posted to the double-entry journal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{LedgerAccountId, Money, PostingId};

/// Side of a posting (debit or credit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostingSide {
    /// Debit posting
    Debit,
    /// Credit posting
    Credit,
}

/// A single posting (line item) in a journal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Posting {
    /// Unique posting identifier
    pub id: PostingId,
    /// Account to post to
    pub account_id: LedgerAccountId,
    /// Amount (always positive)
    pub amount: Money,
    /// Debit or credit
    pub side: PostingSide,
    /// Optional description for this line
    pub description: Option<String>,
}

impl Posting {
    /// Creates a new debit posting
    pub fn debit(account_id: LedgerAccountId, amount: Money) -> Self {
        Self {
            id: PostingId::new(),
            account_id,
            amount,
            side: PostingSide::Debit,
            description: None,
        }
    }

    /// Creates a new credit posting
    pub fn credit(account_id: LedgerAccountId, amount: Money) -> Self {
        Self {
            id: PostingId::new(),
            account_id,
            amount,
            side: PostingSide::Credit,
            description: None,
        }
    }

    /// Adds a description to the posting
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An unposted journal entry
///
/// Drafts must always balance before the journal accepts them:
/// total debits = total credits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDraft {
    /// Entry description
    pub description: String,
    /// Business date of the entry
    pub entry_date: Option<NaiveDate>,
    /// Reference type (e.g., "document", "asset")
    pub reference_type: Option<String>,
    /// Reference ID
    pub reference_id: Option<Uuid>,
    /// List of postings
    pub postings: Vec<Posting>,
}

impl EntryDraft {
    /// Creates a new draft
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            entry_date: None,
            reference_type: None,
            reference_id: None,
            postings: Vec::new(),
        }
    }

    /// Sets the business date
    pub fn dated(mut self, date: NaiveDate) -> Self {
        self.entry_date = Some(date);
        self
    }

    /// Sets the reference
    pub fn with_reference(mut self, ref_type: impl Into<String>, ref_id: Uuid) -> Self {
        self.reference_type = Some(ref_type.into());
        self.reference_id = Some(ref_id);
        self
    }

    /// Adds a debit posting
    pub fn debit(mut self, account_id: LedgerAccountId, amount: Money) -> Self {
        self.postings.push(Posting::debit(account_id, amount));
        self
    }

    /// Adds a credit posting
    pub fn credit(mut self, account_id: LedgerAccountId, amount: Money) -> Self {
        self.postings.push(Posting::credit(account_id, amount));
        self
    }

    /// Adds a custom posting
    pub fn posting(mut self, posting: Posting) -> Self {
        self.postings.push(posting);
        self
    }

    /// Checks if the draft is balanced (exact equality, no tolerance)
    pub fn is_balanced(&self) -> bool {
        let mut debits = rust_decimal::Decimal::ZERO;
        let mut credits = rust_decimal::Decimal::ZERO;

        for posting in &self.postings {
            match posting.side {
                PostingSide::Debit => debits += posting.amount.amount(),
                PostingSide::Credit => credits += posting.amount.amount(),
            }
        }

        debits == credits
    }
}
