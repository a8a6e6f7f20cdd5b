//! Batch driver replaying a CSV command script against the ledger.
//!
//! Commands run in file order. Each one loads the accounts it touches from
//! the repository, applies a [`Ledger`] operation, and saves the result back.
//! Rejected or malformed rows are logged and skipped; they never abort a run.

use crate::account::{Account, AccountId};
use crate::clock::{Clock, SystemClock};
use crate::command::{Command, CommandRecord};
use crate::error::Result;
use crate::ledger::Ledger;
use crate::money::Money;
use crate::repository::{AccountRepository, InMemoryRepository};
use crate::statement::Statement;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::{debug, warn};
use serde::Serialize;
use std::io::{Read, Write};

/// One line of the summary output.
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    id: &'a str,
    owner: &'a str,
    balance: Money,
    operations: usize,
}

/// Replays scripts and reports the resulting accounts.
///
/// # Output Ordering
///
/// Summaries and statements follow [`AccountId::issue_order`] so output is
/// reproducible regardless of repository iteration order.
pub struct ScriptRunner<R = InMemoryRepository> {
    repository: R,
    clock: Box<dyn Clock>,
}

impl ScriptRunner {
    /// Runner over a fresh in-memory repository.
    pub fn new() -> Self {
        Self::with_repository(InMemoryRepository::new())
    }
}

impl Default for ScriptRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: AccountRepository> ScriptRunner<R> {
    pub fn with_repository(repository: R) -> Self {
        ScriptRunner {
            repository,
            clock: Box::new(SystemClock),
        }
    }

    /// Replaces the timestamp source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Processes commands from a CSV reader in streaming fashion.
    ///
    /// Invalid rows and rejected operations are logged at warn level and skipped.
    pub fn process_csv<Rd: Read>(&mut self, reader: Rd) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<CommandRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(record) => match record.parse() {
                    Some(command) => {
                        if let Err(e) = self.execute(command, row_num) {
                            warn!("Row {}: {}", row_num, e);
                        }
                    }
                    None => warn!("Row {}: Failed to parse command record", row_num),
                },
                Err(e) => warn!("Row {}: CSV parse error: {}", row_num, e),
            }
        }

        Ok(())
    }

    /// Executes a single parsed command.
    pub fn execute(&mut self, command: Command, row: usize) -> Result<()> {
        let clock = self.clock.as_ref();

        match command {
            Command::Open { owner } => {
                let mut account = Account::new(owner)?;
                let id = self.repository.save(&mut account)?;
                debug!("Row {}: Opened account {} for {}", row, id, account.owner());
            }
            Command::Deposit { account, amount } => {
                let mut target = self.repository.load(&account)?;
                Ledger::with_clock(&mut target, clock).deposit(amount)?;
                self.repository.save(&mut target)?;
            }
            Command::Withdraw { account, amount } => {
                let mut target = self.repository.load(&account)?;
                Ledger::with_clock(&mut target, clock).withdraw(amount)?;
                self.repository.save(&mut target)?;
            }
            Command::Transfer { from, to, amount } => {
                let mut source = self.repository.load(&from)?;
                let mut destination = self.repository.load(&to)?;
                Ledger::with_clock(&mut source, clock).transfer(&mut destination, amount)?;
                self.repository.save(&mut destination)?;
                self.repository.save(&mut source)?;
            }
        }

        Ok(())
    }

    /// Writes a CSV summary of every account: `id,owner,balance,operations`.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

        csv_writer.write_record(["id", "owner", "balance", "operations"])?;

        for account in self.sorted_accounts()? {
            csv_writer.serialize(SummaryRow {
                id: account.id().map(|id| id.as_str()).unwrap_or_default(),
                owner: account.owner(),
                balance: account.balance(),
                operations: account.history().len(),
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Writes the statement of every account, separated by blank lines.
    pub fn write_statements<W: Write>(&self, mut writer: W) -> Result<()> {
        for (idx, account) in self.sorted_accounts()?.iter().enumerate() {
            if idx > 0 {
                writeln!(writer)?;
            }
            write!(writer, "{}", Statement::new(account))?;
        }

        writer.flush()?;
        Ok(())
    }

    fn sorted_accounts(&self) -> Result<Vec<Account>> {
        let mut accounts = self.repository.list_all()?;
        accounts.sort_by(|a, b| AccountId::issue_order(a.display_id(), b.display_id()));
        Ok(accounts)
    }
}
