//! Account model.
//!
//! Maintains the invariants: `balance >= 0` and history timestamps never
//! decrease.

use crate::error::{LedgerError, Result};
use crate::money::Money;
use crate::transaction::Transaction;
use chrono::{DateTime, Utc};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

/// Opaque account identifier assigned by a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Orders ids the way a counter issues them: shorter first, then
    /// lexicographically, so `ACC10` sorts after `ACC9`.
    ///
    /// Repositories lock account pairs in this order, and listings follow it.
    pub fn issue_order(a: &str, b: &str) -> Ordering {
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        AccountId(id.to_string())
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        AccountId(id)
    }
}

impl Borrow<str> for AccountId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named balance holder with an append-only operation history.
///
/// Fields are private: the balance and history change only through
/// [`Ledger`](crate::Ledger) operations, and the id only through a repository's
/// first save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: Option<AccountId>,
    owner: String,
    balance: Money,
    history: Vec<Transaction>,
}

impl Account {
    /// Creates an unsaved account with zero balance and empty history.
    ///
    /// Fails with [`LedgerError::InvalidOwner`] if `owner` is blank.
    pub fn new(owner: impl Into<String>) -> Result<Self> {
        let owner = validate_owner(owner.into())?;
        Ok(Account {
            id: None,
            owner,
            balance: Money::ZERO,
            history: Vec::new(),
        })
    }

    /// Rebuilds a previously stored account, e.g. when a durable backend
    /// reads one back. The history is taken as-is.
    pub fn restore(
        id: AccountId,
        owner: impl Into<String>,
        balance: Money,
        history: Vec<Transaction>,
    ) -> Result<Self> {
        let owner = validate_owner(owner.into())?;
        Ok(Account {
            id: Some(id),
            owner,
            balance,
            history,
        })
    }

    /// Identifier, or `None` until the account is first saved.
    pub fn id(&self) -> Option<&AccountId> {
        self.id.as_ref()
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// History in chronological order.
    pub fn history(&self) -> &[Transaction] {
        &self.history
    }

    /// Id for display purposes; `-` while unsaved.
    pub(crate) fn display_id(&self) -> &str {
        self.id.as_ref().map(AccountId::as_str).unwrap_or("-")
    }

    /// Timestamp of the most recent record.
    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.history.last().map(Transaction::timestamp)
    }

    /// Sets the identifier. Repositories call this once, on first save.
    pub(crate) fn assign_id(&mut self, id: AccountId) {
        debug_assert!(self.id.is_none(), "account id is immutable once assigned");
        self.id = Some(id);
    }

    /// Applies a validated mutation: new balance plus the record describing it.
    ///
    /// Infallible; callers validate and compute `balance` beforehand.
    pub(crate) fn commit(&mut self, balance: Money, record: Transaction) {
        self.balance = balance;
        self.history.push(record);
        debug_assert!(self.check_invariant());
    }

    /// Verifies `balance >= 0` and non-decreasing history timestamps.
    pub fn check_invariant(&self) -> bool {
        !self.balance.is_negative()
            && self
                .history
                .windows(2)
                .all(|pair| pair[0].timestamp() <= pair[1].timestamp())
    }
}

fn validate_owner(owner: String) -> Result<String> {
    let trimmed = owner.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidOwner);
    }
    Ok(trimmed.to_string())
}
