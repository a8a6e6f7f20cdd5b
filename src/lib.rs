//! # Account Ledger
//!
//! Named accounts with exact decimal balances and an append-only history of
//! the deposits, withdrawals and transfers that produced them.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: 2 decimal places via `rust_decimal`
//! - **Validate, then commit**: a rejected operation changes nothing
//! - **Strict invariants**: balances never go negative, a transfer never
//!   creates or loses money, history timestamps never go backwards
//! - **Pluggable collaborators**: clock and id generation are injected
//!
//! ## Example
//!
//! ```
//! use account_ledger::{Account, AccountRepository, InMemoryRepository, Ledger};
//!
//! let repo = InMemoryRepository::new();
//!
//! let mut anna = Account::new("Anna").unwrap();
//! let mut boris = Account::new("Boris").unwrap();
//! repo.save(&mut anna).unwrap();
//! repo.save(&mut boris).unwrap();
//!
//! let mut ledger = Ledger::new(&mut anna);
//! ledger.deposit("1000".parse().unwrap()).unwrap();
//! ledger.transfer(&mut boris, "500".parse().unwrap()).unwrap();
//!
//! repo.save(&mut boris).unwrap();
//! repo.save(&mut anna).unwrap();
//!
//! assert_eq!(repo.load("ACC0001").unwrap().balance().to_string(), "500.00");
//! assert_eq!(repo.load("ACC0002").unwrap().balance().to_string(), "500.00");
//! ```

pub mod account;
pub mod clock;
pub mod command;
pub mod error;
pub mod ledger;
pub mod money;
pub mod repository;
pub mod script;
pub mod statement;
pub mod transaction;

pub use account::{Account, AccountId};
pub use clock::{Clock, FixedClock, SystemClock};
pub use command::{Command, CommandRecord};
pub use error::{LedgerError, Result};
pub use ledger::Ledger;
pub use money::{Money, ParseMoneyError};
pub use repository::{AccountRepository, IdGenerator, InMemoryRepository, SequentialIdGenerator};
pub use script::ScriptRunner;
pub use statement::Statement;
pub use transaction::{Transaction, TxKind};
