//! Contract with the record store that owns a user's expenses, plus an
//! in-memory implementation used by the shell and tests.

use std::fmt;

use chrono::Utc;
use spendview_domain::{ExpenseInput, ExpenseRecord, SortKey};
use tracing::debug;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::sort::sort_records;

/// Receives the full, date-descending snapshot after every change.
pub type SnapshotListener = Box<dyn FnMut(&[ExpenseRecord])>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Per-user expense storage with live snapshots.
///
/// Subscribing delivers the current snapshot immediately, then one snapshot
/// per mutation. Snapshots are ordered newest first.
pub trait RecordStore {
    fn snapshot(&self) -> Vec<ExpenseRecord>;

    fn subscribe(&mut self, listener: SnapshotListener) -> SubscriptionId;

    /// Returns `false` when `id` was not subscribed.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;

    /// Stores a new expense and returns its id.
    fn add(&mut self, input: ExpenseInput) -> CoreResult<String>;

    fn update(&mut self, id: &str, input: ExpenseInput) -> CoreResult<()>;

    fn remove(&mut self, id: &str) -> CoreResult<ExpenseRecord>;

    /// Deletes every expense, returning how many were removed.
    fn clear(&mut self) -> usize;

    /// Swaps the whole record set, e.g. after importing a snapshot file.
    fn replace_all(&mut self, records: Vec<ExpenseRecord>);
}

/// Volatile [`RecordStore`] that notifies listeners synchronously.
#[derive(Default)]
pub struct MemoryStore {
    records: Vec<ExpenseRecord>,
    listeners: Vec<(SubscriptionId, SnapshotListener)>,
    next_subscription: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ExpenseRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ExpenseRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    fn position(&self, id: &str) -> CoreResult<usize> {
        self.records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| CoreError::ExpenseNotFound(id.to_string()))
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        debug!(
            records = snapshot.len(),
            listeners = self.listeners.len(),
            "publishing snapshot"
        );
        for (_, listener) in self.listeners.iter_mut() {
            listener(&snapshot);
        }
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("records", &self.records.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl RecordStore for MemoryStore {
    fn snapshot(&self) -> Vec<ExpenseRecord> {
        sort_records(&self.records, SortKey::DateDesc)
    }

    fn subscribe(&mut self, mut listener: SnapshotListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        listener(&self.snapshot());
        self.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        before != self.listeners.len()
    }

    fn add(&mut self, input: ExpenseInput) -> CoreResult<String> {
        let id = Uuid::new_v4().to_string();
        self.records.push(input.into_record(id.clone(), Utc::now()));
        debug!(%id, "expense added");
        self.notify();
        Ok(id)
    }

    fn update(&mut self, id: &str, input: ExpenseInput) -> CoreResult<()> {
        let idx = self.position(id)?;
        input.apply_to(&mut self.records[idx]);
        debug!(%id, "expense updated");
        self.notify();
        Ok(())
    }

    fn remove(&mut self, id: &str) -> CoreResult<ExpenseRecord> {
        let idx = self.position(id)?;
        let removed = self.records.remove(idx);
        debug!(%id, "expense removed");
        self.notify();
        Ok(removed)
    }

    fn clear(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        self.notify();
        removed
    }

    fn replace_all(&mut self, records: Vec<ExpenseRecord>) {
        self.records = records;
        self.notify();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};
    use spendview_domain::Category;
    use std::{cell::RefCell, rc::Rc};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    fn input(amount: f64, d: u32) -> ExpenseInput {
        ExpenseInput {
            amount,
            category: Category::Food,
            note: String::new(),
            date: day(d),
        }
    }

    #[test]
    fn snapshots_are_newest_first() {
        let store = MemoryStore::with_records(vec![
            ExpenseRecord::new("old", 1.0, day(1)),
            ExpenseRecord::new("new", 1.0, day(9)),
            ExpenseRecord::new("mid", 1.0, day(5)),
        ]);
        let ids: Vec<String> = store.snapshot().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn subscribers_see_initial_and_subsequent_snapshots() {
        let seen: Rc<RefCell<Vec<usize>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let mut store = MemoryStore::new();
        let sub = store.subscribe(Box::new(move |snapshot: &[ExpenseRecord]| sink.borrow_mut().push(snapshot.len())));

        let id = store.add(input(5.0, 2)).unwrap();
        store.add(input(7.0, 3)).unwrap();
        store.update(&id, input(6.0, 4)).unwrap();
        store.remove(&id).unwrap();
        assert!(store.unsubscribe(sub));
        store.clear();

        assert_eq!(*seen.borrow(), vec![0, 1, 2, 2, 1]);
        assert!(!store.unsubscribe(sub));
    }

    #[test]
    fn missing_ids_are_reported() {
        let mut store = MemoryStore::new();
        assert_eq!(
            store.update("ghost", input(1.0, 1)),
            Err(CoreError::ExpenseNotFound("ghost".into()))
        );
        assert!(matches!(store.remove("ghost"), Err(CoreError::ExpenseNotFound(_))));
    }

    #[test]
    fn updates_keep_identity_and_audit_time() {
        let mut store = MemoryStore::new();
        let id = store.add(input(5.0, 2)).unwrap();
        let created = store.get(&id).unwrap().created_at;
        store.update(&id, input(9.0, 8)).unwrap();
        let record = store.get(&id).unwrap();
        assert_eq!(record.effective_amount(), 9.0);
        assert_eq!(record.date, day(8));
        assert_eq!(record.created_at, created);
        assert!(created.is_some());
    }
}
