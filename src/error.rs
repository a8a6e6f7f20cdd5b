//! Error types for the account ledger.

use crate::money::Money;
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors returned by ledger, repository and driver operations.
///
/// Every business rejection leaves the involved accounts untouched.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Amount was zero or negative
    #[error("Invalid amount {amount}: must be positive")]
    InvalidAmount { amount: Money },

    /// Amount exceeds the current balance
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Money, available: Money },

    /// Transfer source and destination are the same account
    #[error("Cannot transfer from account {id} to itself")]
    SameAccountTransfer { id: String },

    /// Transfer side has no id yet, so it cannot be named as a counterparty
    #[error("Account of {owner} has not been saved yet")]
    UnsavedAccount { owner: String },

    /// Repository lookup had no match
    #[error("Account {id} not found")]
    AccountNotFound { id: String },

    /// Owner name was empty
    #[error("Account owner must not be empty")]
    InvalidOwner,

    /// Resulting balance is not representable
    #[error("Balance overflow while applying {amount}")]
    BalanceOverflow { amount: Money },

    /// Underlying storage failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Failed to open or read the script file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing script file argument
    #[error("Missing script file argument. Usage: account-ledger <script.csv> [--statements]")]
    MissingArgument,
}
