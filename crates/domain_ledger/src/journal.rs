//! Double-entry journal
//!
//! This module provides the core posting functionality, ensuring that
//! all journal entries are balanced and maintain financial integrity.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

use core_kernel::{Currency, JournalEntryId, LedgerAccountId, Money};

use crate::account::{AccountType, LedgerAccount};
use crate::error::LedgerError;
use crate::posting::{EntryDraft, Posting, PostingSide};

/// The journal of accounts for one tenant
///
/// The Journal enforces double-entry accounting rules: every entry it
/// accepts is balanced (debits = credits, exact decimal equality), has at
/// least two postings, and moves a non-zero amount.
///
/// # Invariants
///
/// - Posted entries are immutable; corrections are new reversing entries
/// - Account balances are always consistent with postings
/// - Validation happens before any mutation, so a rejected entry leaves
///   no partial state
#[derive(Debug)]
pub struct Journal {
    /// Chart of accounts
    accounts: HashMap<LedgerAccountId, LedgerAccount>,
    /// Journal entries
    entries: Vec<JournalEntry>,
    /// Running account balances
    balances: HashMap<LedgerAccountId, Money>,
    /// Journal currency
    currency: Currency,
}

impl Journal {
    /// Creates a new journal with the specified currency
    pub fn new(currency: Currency) -> Self {
        Self {
            accounts: HashMap::new(),
            entries: Vec::new(),
            balances: HashMap::new(),
            currency,
        }
    }

    /// Returns the journal currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Adds an account to the chart of accounts
    ///
    /// # Errors
    ///
    /// Returns error if the account already exists
    pub fn add_account(&mut self, account: LedgerAccount) -> Result<(), LedgerError> {
        if self.accounts.contains_key(&account.id) {
            return Err(LedgerError::AccountAlreadyExists(account.id.to_string()));
        }

        let account_id = account.id;
        self.accounts.insert(account_id, account);
        self.balances.insert(account_id, Money::zero(self.currency));

        Ok(())
    }

    /// Gets an account by ID
    pub fn account(&self, id: &LedgerAccountId) -> Option<&LedgerAccount> {
        self.accounts.get(id)
    }

    /// Gets the current balance of an account
    pub fn balance(&self, id: &LedgerAccountId) -> Option<Money> {
        self.balances.get(id).copied()
    }

    /// Gets a posted entry by ID
    pub fn entry(&self, id: &JournalEntryId) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// Returns all posted entries in posting order
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Posts an entry to the journal
    ///
    /// Validates the draft and, only if every check passes, records the
    /// entry and updates the affected balances.
    ///
    /// # Errors
    ///
    /// - Fewer than two postings
    /// - A zero or negative posting amount
    /// - Debits not exactly equal to credits
    /// - A zero entry total
    /// - A posting referencing an unknown or inactive account
    pub fn post(&mut self, draft: EntryDraft) -> Result<JournalEntryId, LedgerError> {
        self.validate(&draft)?;

        let entry_id = JournalEntryId::new_v7();
        let now = Utc::now();

        let entry = JournalEntry {
            id: entry_id,
            entry_date: draft.entry_date.unwrap_or_else(|| now.date_naive()),
            description: draft.description,
            reference_type: draft.reference_type,
            reference_id: draft.reference_id,
            postings: draft.postings,
            created_at: now,
        };

        for posting in &entry.postings {
            let account = self
                .accounts
                .get(&posting.account_id)
                .expect("accounts checked during validation");
            let change =
                balance_change(account.account_type, posting.side, posting.amount);

            let balance = self
                .balances
                .get_mut(&posting.account_id)
                .expect("balance exists for every account");
            *balance = balance
                .checked_add(&change)
                .map_err(|e| LedgerError::CalculationError(e.to_string()))?;
        }

        tracing::debug!(entry = %entry_id, postings = entry.postings.len(), "posted journal entry");
        self.entries.push(entry);

        Ok(entry_id)
    }

    /// Creates a reversal entry for a previously posted entry
    ///
    /// Posted entries are never edited; a reversal swaps every posting's
    /// debit/credit side in a fresh entry.
    pub fn reverse(
        &mut self,
        entry_id: &JournalEntryId,
        reason: &str,
    ) -> Result<JournalEntryId, LedgerError> {
        let original = self
            .entries
            .iter()
            .find(|e| &e.id == entry_id)
            .ok_or_else(|| LedgerError::EntryNotFound(entry_id.to_string()))?
            .clone();

        let reversed_postings: Vec<Posting> = original
            .postings
            .iter()
            .map(|p| Posting {
                id: core_kernel::PostingId::new(),
                account_id: p.account_id,
                amount: p.amount,
                side: match p.side {
                    PostingSide::Debit => PostingSide::Credit,
                    PostingSide::Credit => PostingSide::Debit,
                },
                description: Some(format!("Reversal: {}", reason)),
            })
            .collect();

        let reversal = EntryDraft {
            description: format!("Reversal of {}: {}", entry_id, reason),
            entry_date: None,
            reference_type: Some("reversal".to_string()),
            reference_id: Some(*entry_id.as_uuid()),
            postings: reversed_postings,
        };

        self.post(reversal)
    }

    /// Generates a trial balance report
    pub fn trial_balance(&self) -> TrialBalance {
        let mut lines = Vec::new();
        let mut total_debits = Money::zero(self.currency);
        let mut total_credits = Money::zero(self.currency);

        for (account_id, balance) in &self.balances {
            if balance.is_zero() {
                continue;
            }

            let account = self
                .accounts
                .get(account_id)
                .expect("every balance has an account");

            let (debit, credit) = if account.account_type.is_debit_normal() {
                (balance.abs(), Money::zero(self.currency))
            } else {
                (Money::zero(self.currency), balance.abs())
            };

            lines.push(TrialBalanceLine {
                account_id: *account_id,
                account_code: account.code.clone(),
                account_name: account.name.clone(),
                debit,
                credit,
            });

            total_debits = total_debits + debit;
            total_credits = total_credits + credit;
        }

        lines.sort_by(|a, b| a.account_code.cmp(&b.account_code));

        TrialBalance {
            is_balanced: total_debits == total_credits,
            lines,
            total_debits,
            total_credits,
        }
    }

    /// Validates a draft before any state changes
    fn validate(&self, draft: &EntryDraft) -> Result<(), LedgerError> {
        if draft.postings.len() < 2 {
            return Err(LedgerError::TooFewPostings(draft.postings.len()));
        }

        let mut total_debits = Money::zero(self.currency);
        let mut total_credits = Money::zero(self.currency);

        for posting in &draft.postings {
            if !posting.amount.is_positive() {
                return Err(LedgerError::NonPositivePosting {
                    account: posting.account_id.to_string(),
                    amount: posting.amount.amount(),
                });
            }

            let account = self
                .accounts
                .get(&posting.account_id)
                .ok_or_else(|| LedgerError::AccountNotFound(posting.account_id.to_string()))?;
            if !account.is_active {
                return Err(LedgerError::AccountInactive(account.code.clone()));
            }

            match posting.side {
                PostingSide::Debit => {
                    total_debits = total_debits
                        .checked_add(&posting.amount)
                        .map_err(|e| LedgerError::CalculationError(e.to_string()))?;
                }
                PostingSide::Credit => {
                    total_credits = total_credits
                        .checked_add(&posting.amount)
                        .map_err(|e| LedgerError::CalculationError(e.to_string()))?;
                }
            }
        }

        // Literal ledger balance: exact equality, never a tolerance
        if total_debits.amount() != total_credits.amount() {
            return Err(LedgerError::UnbalancedEntry {
                debits: total_debits.amount(),
                credits: total_credits.amount(),
            });
        }

        if total_debits.is_zero() {
            return Err(LedgerError::ZeroTotal);
        }

        Ok(())
    }
}

/// Calculates the balance change for a posting
///
/// In double-entry accounting:
/// - Asset & Expense accounts: debits increase, credits decrease
/// - Liability, Equity & Revenue accounts: credits increase, debits decrease
fn balance_change(account_type: AccountType, side: PostingSide, amount: Money) -> Money {
    match (account_type.is_debit_normal(), side) {
        (true, PostingSide::Debit) => amount,
        (true, PostingSide::Credit) => -amount,
        (false, PostingSide::Debit) => -amount,
        (false, PostingSide::Credit) => amount,
    }
}

/// A posted journal entry
#[derive(Debug, Clone)]
pub struct JournalEntry {
    /// Unique entry identifier
    pub id: JournalEntryId,
    /// Business date
    pub entry_date: NaiveDate,
    /// Description
    pub description: String,
    /// Reference type (e.g., "document", "asset")
    pub reference_type: Option<String>,
    /// Reference ID
    pub reference_id: Option<Uuid>,
    /// Individual postings
    pub postings: Vec<Posting>,
    /// When entry was created
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Sum of debit posting amounts
    pub fn total_debits(&self) -> Decimal {
        self.postings
            .iter()
            .filter(|p| p.side == PostingSide::Debit)
            .map(|p| p.amount.amount())
            .sum()
    }

    /// Sum of credit posting amounts
    pub fn total_credits(&self) -> Decimal {
        self.postings
            .iter()
            .filter(|p| p.side == PostingSide::Credit)
            .map(|p| p.amount.amount())
            .sum()
    }
}

/// Trial balance report
#[derive(Debug)]
pub struct TrialBalance {
    /// Whether total debits equal total credits
    pub is_balanced: bool,
    /// Individual account lines, sorted by account code
    pub lines: Vec<TrialBalanceLine>,
    /// Total debits
    pub total_debits: Money,
    /// Total credits
    pub total_credits: Money,
}

/// A single line in the trial balance
#[derive(Debug)]
pub struct TrialBalanceLine {
    /// Account ID
    pub account_id: LedgerAccountId,
    /// Account code
    pub account_code: String,
    /// Account name
    pub account_name: String,
    /// Debit balance
    pub debit: Money,
    /// Credit balance
    pub credit: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn setup_journal() -> (Journal, LedgerAccountId, LedgerAccountId) {
        let mut journal = Journal::new(Currency::USD);

        let cash_id = LedgerAccountId::new();
        let revenue_id = LedgerAccountId::new();

        journal
            .add_account(LedgerAccount::new(cash_id, "1000", "Cash", AccountType::Asset))
            .unwrap();
        journal
            .add_account(LedgerAccount::new(
                revenue_id,
                "4000",
                "Sales Revenue",
                AccountType::Revenue,
            ))
            .unwrap();

        (journal, cash_id, revenue_id)
    }

    #[test]
    fn test_balanced_entry_is_accepted() {
        let (mut journal, cash, revenue) = setup_journal();
        let amount = Money::new(dec!(1000), Currency::USD);

        let draft = EntryDraft::new("Ring sale")
            .debit(cash, amount)
            .credit(revenue, amount);

        assert!(journal.post(draft).is_ok());
        assert_eq!(journal.balance(&cash).unwrap().amount(), dec!(1000));
    }

    #[test]
    fn test_unbalanced_entry_is_rejected() {
        let (mut journal, cash, revenue) = setup_journal();

        let draft = EntryDraft::new("Mismatch")
            .debit(cash, Money::new(dec!(1000), Currency::USD))
            .credit(revenue, Money::new(dec!(500), Currency::USD));

        let result = journal.post(draft);
        assert!(matches!(result, Err(LedgerError::UnbalancedEntry { .. })));
        // No partial state
        assert_eq!(journal.balance(&cash).unwrap().amount(), Decimal::ZERO);
        assert!(journal.entries().is_empty());
    }

    #[test]
    fn test_single_posting_is_rejected() {
        let (mut journal, cash, _) = setup_journal();

        let draft = EntryDraft::new("Lonely").debit(cash, Money::new(dec!(10), Currency::USD));

        assert!(matches!(
            journal.post(draft),
            Err(LedgerError::TooFewPostings(1))
        ));
    }

    #[test]
    fn test_zero_amount_posting_is_rejected() {
        let (mut journal, cash, revenue) = setup_journal();
        let zero = Money::zero(Currency::USD);

        let draft = EntryDraft::new("Nothing").debit(cash, zero).credit(revenue, zero);

        assert!(matches!(
            journal.post(draft),
            Err(LedgerError::NonPositivePosting { .. })
        ));
    }

    #[test]
    fn test_inactive_account_is_rejected() {
        let (mut journal, cash, revenue) = setup_journal();
        let amount = Money::new(dec!(25), Currency::USD);

        journal.accounts.get_mut(&revenue).unwrap().deactivate();

        let draft = EntryDraft::new("Stale account")
            .debit(cash, amount)
            .credit(revenue, amount);

        assert!(matches!(
            journal.post(draft),
            Err(LedgerError::AccountInactive(_))
        ));
    }

    #[test]
    fn test_reverse_restores_balances() {
        let (mut journal, cash, revenue) = setup_journal();
        let amount = Money::new(dec!(1000), Currency::USD);

        let entry_id = journal
            .post(
                EntryDraft::new("Ring sale")
                    .debit(cash, amount)
                    .credit(revenue, amount),
            )
            .unwrap();

        journal.reverse(&entry_id, "Customer returned the ring").unwrap();

        assert_eq!(journal.balance(&cash).unwrap().amount(), Decimal::ZERO);
        assert_eq!(journal.entries().len(), 2);
    }
}
