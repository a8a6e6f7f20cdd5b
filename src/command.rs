//! Script command models for CSV parsing.

use crate::money::Money;
use serde::Deserialize;
use std::str::FromStr;

/// Raw command row as read from a script.
///
/// Columns are `command,account,target,amount`. For `open` the `account`
/// column carries the owner name, since the id is not known until the
/// repository assigns it.
#[derive(Debug, Deserialize)]
pub struct CommandRecord {
    /// One of: open, deposit, withdraw, transfer
    pub command: String,

    /// Account id (owner name for `open`)
    #[serde(default)]
    pub account: Option<String>,

    /// Destination account id, only for `transfer`
    #[serde(default)]
    pub target: Option<String>,

    /// Amount, absent for `open`
    #[serde(default)]
    pub amount: Option<String>,
}

impl CommandRecord {
    /// Parses the raw row into a typed command.
    ///
    /// Returns `None` if the row is invalid (unknown command, missing column,
    /// unparseable amount). Amount sign is not checked here; the ledger rejects
    /// non-positive amounts itself.
    pub fn parse(&self) -> Option<Command> {
        let command = self.command.trim().to_lowercase();

        match command.as_str() {
            "open" => Some(Command::Open {
                owner: Self::field(&self.account)?,
            }),
            "deposit" => Some(Command::Deposit {
                account: Self::field(&self.account)?,
                amount: self.parse_amount()?,
            }),
            "withdraw" => Some(Command::Withdraw {
                account: Self::field(&self.account)?,
                amount: self.parse_amount()?,
            }),
            "transfer" => Some(Command::Transfer {
                from: Self::field(&self.account)?,
                to: Self::field(&self.target)?,
                amount: self.parse_amount()?,
            }),
            _ => None,
        }
    }

    fn field(value: &Option<String>) -> Option<String> {
        let trimmed = value.as_deref()?.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(trimmed.to_string())
    }

    fn parse_amount(&self) -> Option<Money> {
        let raw = Self::field(&self.amount)?;
        Money::from_str(&raw).ok()
    }
}

/// A parsed command ready for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create and save a new account.
    Open { owner: String },

    /// Credit an existing account.
    Deposit { account: String, amount: Money },

    /// Debit an existing account.
    Withdraw { account: String, amount: Money },

    /// Move funds between two existing accounts.
    Transfer {
        from: String,
        to: String,
        amount: Money,
    },
}
