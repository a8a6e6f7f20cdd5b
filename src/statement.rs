//! Human-readable account statements.

use crate::account::{Account, AccountId};
use crate::transaction::{Transaction, TxKind};
use std::fmt;

const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Statement view over a borrowed account.
///
/// Rendering goes through [`fmt::Display`] and cannot fail on any record
/// content; unrecognized kinds get a placeholder line.
pub struct Statement<'a> {
    account: &'a Account,
}

impl<'a> Statement<'a> {
    pub fn new(account: &'a Account) -> Self {
        Statement { account }
    }
}

impl fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let account = self.account;
        writeln!(
            f,
            "Statement for account {} ({}):",
            account.display_id(),
            account.owner()
        )?;
        writeln!(f, "Current balance: {}", account.balance())?;
        writeln!(f, "Operations:")?;

        if account.history().is_empty() {
            return writeln!(f, "  (no operations)");
        }

        for (position, tx) in account.history().iter().enumerate() {
            writeln!(
                f,
                "  {}. [{}] {}",
                position + 1,
                tx.timestamp().format(TIMESTAMP_FORMAT),
                Description(tx)
            )?;
        }
        Ok(())
    }
}

/// Kind-specific description of one record.
struct Description<'a>(&'a Transaction);

impl fmt::Display for Description<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tx = self.0;
        let counterparty = tx.counterparty().map(AccountId::as_str).unwrap_or("-");
        match tx.kind() {
            TxKind::Deposit => write!(f, "Deposit: +{}", tx.amount()),
            TxKind::Withdraw => write!(f, "Withdrawal: -{}", tx.amount()),
            TxKind::TransferOut => {
                write!(f, "Transfer to account {}: -{}", counterparty, tx.amount())
            }
            TxKind::TransferIn => {
                write!(f, "Transfer from account {}: +{}", counterparty, tx.amount())
            }
            TxKind::Unknown(name) => write!(f, "Unknown operation ({})", name),
        }
    }
}
