//! Ledger operations bound to a single account.
//!
//! Every operation validates first and mutates last: a rejected operation
//! leaves the bound account (and a transfer's destination) untouched.
//! Validation order is fixed as identity, then amount, then funds, so the
//! reported error is deterministic when several conditions hold. For a
//! transfer, identity covers both sides having been saved.

use crate::account::{Account, AccountId};
use crate::clock::{Clock, SystemClock};
use crate::error::{LedgerError, Result};
use crate::money::Money;
use crate::statement::Statement;
use crate::transaction::Transaction;
use chrono::{DateTime, Utc};
use log::debug;

/// Operation set over one borrowed account.
///
/// The caller owns the [`Account`]; the ledger borrows it mutably for as long
/// as it lives and never stores it anywhere else.
///
/// # Examples
///
/// ```
/// use account_ledger::{Account, Ledger};
///
/// let mut account = Account::new("Anna").unwrap();
/// let mut ledger = Ledger::new(&mut account);
/// ledger.deposit("1000".parse().unwrap()).unwrap();
/// assert_eq!(ledger.balance().to_string(), "1000.00");
/// ```
pub struct Ledger<'a> {
    account: &'a mut Account,
    clock: &'a dyn Clock,
}

impl<'a> Ledger<'a> {
    /// Binds to `account`, stamping records with wall-clock time.
    pub fn new(account: &'a mut Account) -> Self {
        Self::with_clock(account, &SystemClock)
    }

    /// Binds to `account`, stamping records with `clock`.
    pub fn with_clock(account: &'a mut Account, clock: &'a dyn Clock) -> Self {
        Ledger { account, clock }
    }

    /// The bound account.
    pub fn account(&self) -> &Account {
        &*self.account
    }

    /// Credits `amount` and records a `deposit`.
    pub fn deposit(&mut self, amount: Money) -> Result<()> {
        ensure_positive(amount)?;
        let balance = self
            .account
            .balance()
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { amount })?;

        let at = next_timestamp(self.clock, &[&*self.account]);
        self.account
            .commit(balance, Transaction::deposit(amount, at));

        debug!(
            "Deposited {} to account {}",
            amount,
            self.account.display_id()
        );
        Ok(())
    }

    /// Debits `amount` and records a `withdraw`.
    pub fn withdraw(&mut self, amount: Money) -> Result<()> {
        ensure_positive(amount)?;
        let balance = self.debited_balance(amount)?;

        let at = next_timestamp(self.clock, &[&*self.account]);
        self.account
            .commit(balance, Transaction::withdraw(amount, at));

        debug!(
            "Withdrew {} from account {}",
            amount,
            self.account.display_id()
        );
        Ok(())
    }

    /// Moves `amount` from the bound account to `destination`.
    ///
    /// Both balances and both history records are computed up front; they are
    /// applied together only once nothing else can fail. The two records share
    /// one timestamp and name each other's account as counterparty, so both
    /// accounts must already carry an id.
    pub fn transfer(&mut self, destination: &mut Account, amount: Money) -> Result<()> {
        if self.account.id() == destination.id() {
            return Err(LedgerError::SameAccountTransfer {
                id: self.account.display_id().to_string(),
            });
        }
        let source_id = saved_id(&*self.account)?;
        let destination_id = saved_id(&*destination)?;
        ensure_positive(amount)?;

        let source_balance = self.debited_balance(amount)?;
        let destination_balance = destination
            .balance()
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { amount })?;

        let at = next_timestamp(self.clock, &[&*self.account, &*destination]);
        let outgoing = Transaction::transfer_out(amount, at, destination_id);
        let incoming = Transaction::transfer_in(amount, at, source_id);

        self.account.commit(source_balance, outgoing);
        destination.commit(destination_balance, incoming);

        debug!(
            "Transferred {} from account {} to account {}",
            amount,
            self.account.display_id(),
            destination.display_id()
        );
        Ok(())
    }

    pub fn balance(&self) -> Money {
        self.account.balance()
    }

    /// Renders the bound account's statement.
    pub fn statement(&self) -> String {
        Statement::new(&*self.account).to_string()
    }

    /// Balance after removing `amount`, or `InsufficientFunds`.
    fn debited_balance(&self, amount: Money) -> Result<Money> {
        let available = self.account.balance();
        if amount > available {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available,
            });
        }
        available
            .checked_sub(amount)
            .ok_or(LedgerError::BalanceOverflow { amount })
    }
}

fn saved_id(account: &Account) -> Result<AccountId> {
    account
        .id()
        .cloned()
        .ok_or_else(|| LedgerError::UnsavedAccount {
            owner: account.owner().to_string(),
        })
}

fn ensure_positive(amount: Money) -> Result<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount { amount })
    }
}

/// Current time, clamped so it never precedes the last record of any
/// account about to receive a new one.
fn next_timestamp(clock: &dyn Clock, accounts: &[&Account]) -> DateTime<Utc> {
    accounts
        .iter()
        .filter_map(|account| account.last_timestamp())
        .fold(clock.now(), |at, last| at.max(last))
}
