//! Transaction records kept in an account's history.

use crate::account::AccountId;
use crate::money::Money;
use chrono::{DateTime, Utc};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Kind of balance-affecting event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TxKind {
    /// Funds credited to the account.
    Deposit,

    /// Funds debited from the account.
    Withdraw,

    /// Funds sent to another account.
    TransferOut,

    /// Funds received from another account.
    TransferIn,

    /// A kind this version does not recognize, kept verbatim.
    ///
    /// Only produced when restoring records written elsewhere.
    Unknown(String),
}

impl TxKind {
    /// Returns the snake_case name of the kind.
    pub fn as_str(&self) -> &str {
        match self {
            TxKind::Deposit => "deposit",
            TxKind::Withdraw => "withdraw",
            TxKind::TransferOut => "transfer_out",
            TxKind::TransferIn => "transfer_in",
            TxKind::Unknown(name) => name.as_str(),
        }
    }
}

impl FromStr for TxKind {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let kind = match s.trim().to_lowercase().as_str() {
            "deposit" => TxKind::Deposit,
            "withdraw" => TxKind::Withdraw,
            "transfer_out" => TxKind::TransferOut,
            "transfer_in" => TxKind::TransferIn,
            _ => TxKind::Unknown(s.trim().to_string()),
        };
        Ok(kind)
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable entry in an account's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    kind: TxKind,
    amount: Money,
    timestamp: DateTime<Utc>,
    counterparty: Option<AccountId>,
}

impl Transaction {
    /// Record of a deposit.
    pub fn deposit(amount: Money, timestamp: DateTime<Utc>) -> Self {
        Self::from_parts(TxKind::Deposit, amount, timestamp, None)
    }

    /// Record of a withdrawal.
    pub fn withdraw(amount: Money, timestamp: DateTime<Utc>) -> Self {
        Self::from_parts(TxKind::Withdraw, amount, timestamp, None)
    }

    /// Source-side record of a transfer to `to`.
    pub fn transfer_out(amount: Money, timestamp: DateTime<Utc>, to: AccountId) -> Self {
        Self::from_parts(TxKind::TransferOut, amount, timestamp, Some(to))
    }

    /// Destination-side record of a transfer from `from`.
    pub fn transfer_in(amount: Money, timestamp: DateTime<Utc>, from: AccountId) -> Self {
        Self::from_parts(TxKind::TransferIn, amount, timestamp, Some(from))
    }

    /// Builds a record from raw parts, as a storage backend would when reading one back.
    pub fn from_parts(
        kind: TxKind,
        amount: Money,
        timestamp: DateTime<Utc>,
        counterparty: Option<AccountId>,
    ) -> Self {
        Transaction {
            kind,
            amount,
            timestamp,
            counterparty,
        }
    }

    pub fn kind(&self) -> &TxKind {
        &self.kind
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The other account of a transfer; `None` for deposits and withdrawals.
    pub fn counterparty(&self) -> Option<&AccountId> {
        self.counterparty.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 0).unwrap()
    }

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!("deposit".parse::<TxKind>().unwrap(), TxKind::Deposit);
        assert_eq!("withdraw".parse::<TxKind>().unwrap(), TxKind::Withdraw);
        assert_eq!(
            "transfer_out".parse::<TxKind>().unwrap(),
            TxKind::TransferOut
        );
        assert_eq!("transfer_in".parse::<TxKind>().unwrap(), TxKind::TransferIn);
    }

    #[test]
    fn test_parse_handles_whitespace_and_case() {
        assert_eq!("  Deposit ".parse::<TxKind>().unwrap(), TxKind::Deposit);
    }

    #[test]
    fn test_unknown_kind_is_preserved() {
        let kind = "fee".parse::<TxKind>().unwrap();
        assert_eq!(kind, TxKind::Unknown("fee".to_string()));
        assert_eq!(kind.to_string(), "fee");
    }

    #[test]
    fn test_display_round_trips_name() {
        assert_eq!(TxKind::TransferOut.to_string(), "transfer_out");
    }

    #[test]
    fn test_deposit_has_no_counterparty() {
        let tx = Transaction::deposit("10".parse().unwrap(), at());
        assert_eq!(tx.kind(), &TxKind::Deposit);
        assert_eq!(tx.amount().to_string(), "10.00");
        assert_eq!(tx.timestamp(), at());
        assert!(tx.counterparty().is_none());
    }

    #[test]
    fn test_transfer_records_carry_counterparty() {
        let out = Transaction::transfer_out("5".parse().unwrap(), at(), AccountId::from("ACC0002"));
        assert_eq!(out.kind(), &TxKind::TransferOut);
        assert_eq!(out.counterparty().map(AccountId::as_str), Some("ACC0002"));
    }
}
