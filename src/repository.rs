//! Account storage and identity assignment.
//!
//! [`AccountRepository`] is the storage seam: the in-memory implementation
//! below is the only backend shipped, a durable one would implement the same
//! trait and report I/O failures as [`LedgerError::Persistence`].

use crate::account::{Account, AccountId};
use crate::clock::Clock;
use crate::error::{LedgerError, Result};
use crate::ledger::Ledger;
use crate::money::Money;
use log::debug;
use parking_lot::Mutex;
use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

/// Identity assignment, storage and retrieval of accounts.
pub trait AccountRepository {
    /// Stores `account`, assigning it a fresh id first if it has none.
    ///
    /// The assigned id is written back into `account` and returned. Saving an
    /// account that already has an id overwrites the stored copy and never
    /// changes the id.
    fn save(&self, account: &mut Account) -> Result<AccountId>;

    /// Returns a copy of the stored account, or [`LedgerError::AccountNotFound`].
    fn load(&self, id: &str) -> Result<Account>;

    /// Returns every stored account; empty when none exist. Backends are free
    /// to pick the order.
    fn list_all(&self) -> Result<Vec<Account>>;
}

/// Strategy for producing account identifiers.
///
/// Each call must move on to a new value; the repository skips values that are
/// already taken but relies on the generator eventually producing a free one.
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> AccountId;
}

/// Counter-based ids such as `ACC0001`, `ACC0002`, ...
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    width: usize,
    next: u64,
}

impl SequentialIdGenerator {
    /// Ids are `prefix` followed by the counter zero-padded to `width` digits.
    pub fn new(prefix: impl Into<String>, width: usize) -> Self {
        SequentialIdGenerator {
            prefix: prefix.into(),
            width,
            next: 1,
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("ACC", 4)
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> AccountId {
        let id = format!("{}{:0width$}", self.prefix, self.next, width = self.width);
        self.next += 1;
        AccountId::from(id)
    }
}

type Slot = Arc<Mutex<Account>>;

struct Store<G> {
    accounts: HashMap<AccountId, Slot>,
    ids: G,
}

impl<G: IdGenerator> Store<G> {
    fn fresh_id(&mut self) -> AccountId {
        loop {
            let id = self.ids.next_id();
            if !self.accounts.contains_key(&id) {
                return id;
            }
            debug!("Generated id {} is already taken, skipping", id);
        }
    }
}

/// Process-memory repository, safe to share between threads.
///
/// The id map sits behind one lock and every account behind its own, so
/// operations on unrelated accounts do not contend. Locks are always taken
/// map first, then accounts in [`AccountId::issue_order`].
///
/// `load`/`save` work on copies; front ends that mutate concurrently should
/// go through [`with_account`](Self::with_account) and
/// [`transfer`](Self::transfer), which mutate in place under the account locks.
pub struct InMemoryRepository<G = SequentialIdGenerator> {
    store: Mutex<Store<G>>,
}

impl InMemoryRepository {
    /// Repository issuing `ACC0001`-style ids.
    pub fn new() -> Self {
        Self::with_id_generator(SequentialIdGenerator::default())
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> InMemoryRepository<G> {
    pub fn with_id_generator(ids: G) -> Self {
        InMemoryRepository {
            store: Mutex::new(Store {
                accounts: HashMap::new(),
                ids,
            }),
        }
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.store.lock().accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs `f` on the stored account while holding its lock.
    pub fn with_account<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Account) -> Result<T>,
    ) -> Result<T> {
        let slot = self.slot(id)?;
        let mut account = slot.lock();
        f(&mut *account)
    }

    /// Transfers `amount` between two stored accounts in one critical section.
    ///
    /// Both account locks are held, acquired in issue order, until both
    /// balances and both history records are in place.
    pub fn transfer(&self, from: &str, to: &str, amount: Money, clock: &dyn Clock) -> Result<()> {
        if from == to {
            return Err(LedgerError::SameAccountTransfer {
                id: from.to_string(),
            });
        }

        let source = self.slot(from)?;
        let destination = self.slot(to)?;

        let source_first = AccountId::issue_order(from, to) == Ordering::Less;
        let (mut source_guard, mut destination_guard) = if source_first {
            let s = source.lock();
            let d = destination.lock();
            (s, d)
        } else {
            let d = destination.lock();
            let s = source.lock();
            (s, d)
        };

        let mut ledger = Ledger::with_clock(&mut *source_guard, clock);
        ledger.transfer(&mut *destination_guard, amount)
    }

    fn slot(&self, id: &str) -> Result<Slot> {
        self.store
            .lock()
            .accounts
            .get(id)
            .cloned()
            .ok_or_else(|| LedgerError::AccountNotFound { id: id.to_string() })
    }
}

impl<G: IdGenerator> AccountRepository for InMemoryRepository<G> {
    fn save(&self, account: &mut Account) -> Result<AccountId> {
        let mut store = self.store.lock();

        let id = match account.id().cloned() {
            Some(id) => id,
            None => {
                let id = store.fresh_id();
                account.assign_id(id.clone());
                debug!("Assigned id {} to account of {}", id, account.owner());
                id
            }
        };

        match store.accounts.entry(id.clone()) {
            Entry::Occupied(slot) => *slot.get().lock() = account.clone(),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(account.clone())));
            }
        }

        Ok(id)
    }

    fn load(&self, id: &str) -> Result<Account> {
        let slot = self.slot(id)?;
        let account = slot.lock().clone();
        Ok(account)
    }

    fn list_all(&self) -> Result<Vec<Account>> {
        let mut slots: Vec<(AccountId, Slot)> = self
            .store
            .lock()
            .accounts
            .iter()
            .map(|(id, slot)| (id.clone(), Arc::clone(slot)))
            .collect();
        slots.sort_by(|a, b| AccountId::issue_order(a.0.as_str(), b.0.as_str()));

        // Hold every account lock at once so no transfer is seen half-applied.
        let guards: Vec<_> = slots.iter().map(|(_, slot)| slot.lock()).collect();
        Ok(guards.iter().map(|guard| (**guard).clone()).collect())
    }
}
