use crate::models::RecordId;
use crate::TRACING_TARGET_STORE;

use super::record::{Filter, Record};
use super::view::{Selection, View};

/// Ordered, in-memory collection of records with store-assigned identity.
///
/// Insertion order is preserved, ids start at 1 and are never handed out twice
/// even after the record carrying them is deleted. Each store also remembers
/// which subset of its records is currently selected for display.
#[derive(Debug, Clone)]
pub struct Store<R: Record> {
    /// Live records in insertion order.
    records: Vec<R>,
    /// Id handed to the next insertion. Only ever grows, which is what keeps
    /// deleted ids from coming back.
    next_id: RecordId,
    /// What the UI is currently asked to show.
    view: View<R>,
}

impl<R: Record> Default for Store<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Store<R> {
    /// Empty store whose first insertion receives id 1. The view starts on
    /// every record.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
            view: View::default(),
        }
    }

    /// Append `record`, stamping it with the next id. Records equal by value
    /// are welcome; only ids are unique.
    pub fn insert(&mut self, mut record: R) -> RecordId {
        let id = self.next_id;
        self.next_id += 1;
        record.assign_id(id);
        tracing::debug!(
            target: TRACING_TARGET_STORE,
            kind = R::KIND,
            id,
            record = %record,
            "record inserted"
        );
        self.records.push(record);
        id
    }

    /// Look up a live record by id. Linear scan; rosters stay small enough
    /// that an index would only add bookkeeping to every mutation.
    pub fn find_by_id(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|record| record.id() == Some(id))
    }

    /// Replace the record stored under `id` with `replacement`, keeping the
    /// id. Returns `false` and leaves the store untouched when no record has
    /// that id.
    pub fn update(&mut self, id: RecordId, mut replacement: R) -> bool {
        let Some(slot) = self
            .records
            .iter_mut()
            .find(|record| record.id() == Some(id))
        else {
            tracing::debug!(target: TRACING_TARGET_STORE, kind = R::KIND, id, "update skipped, no such record");
            return false;
        };

        replacement.assign_id(id);
        tracing::debug!(
            target: TRACING_TARGET_STORE,
            kind = R::KIND,
            id,
            record = %replacement,
            "record updated"
        );
        *slot = replacement;
        true
    }

    /// Permanently remove the record stored under `id`. Returns `false` when
    /// no record has that id.
    pub fn delete(&mut self, id: RecordId) -> bool {
        let Some(idx) = self
            .records
            .iter()
            .position(|record| record.id() == Some(id))
        else {
            tracing::debug!(target: TRACING_TARGET_STORE, kind = R::KIND, id, "delete skipped, no such record");
            return false;
        };

        self.records.remove(idx);
        tracing::debug!(target: TRACING_TARGET_STORE, kind = R::KIND, id, "record deleted");
        true
    }

    /// Every record in insertion order.
    pub fn all(&self) -> &[R] {
        &self.records
    }

    /// Number of live records. Deleted records no longer count.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id the next insertion will receive.
    pub fn next_id(&self) -> RecordId {
        self.next_id
    }

    /// Select what [`Store::current_view`] returns. `Selection::All` follows
    /// the live records; a filter copies the matching records now and keeps
    /// that copy until the view is selected again.
    pub fn set_view(&mut self, selection: Selection<R::Filter>) {
        self.view = View::select(&self.records, selection);
        match self.view.selection() {
            Selection::All => tracing::debug!(
                target: TRACING_TARGET_STORE,
                kind = R::KIND,
                shown = self.records.len(),
                "view reset to all records"
            ),
            Selection::Only(filter) => tracing::debug!(
                target: TRACING_TARGET_STORE,
                kind = R::KIND,
                filter = %filter.describe(),
                shown = self.view.resolve(&self.records).len(),
                "view filtered"
            ),
        }
    }

    /// The selection last passed to [`Store::set_view`].
    pub fn selection(&self) -> &Selection<R::Filter> {
        self.view.selection()
    }

    /// Records the UI should list right now. A filtered view is a snapshot,
    /// so callers reset it after mutating the store.
    pub fn current_view(&self) -> &[R] {
        self.view.resolve(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Student;
    use crate::roster::StudentFilter;

    fn ana() -> Student {
        Student::new("Ana", 20, "JS", 8.5)
    }

    fn bea() -> Student {
        Student::new("Bea", 19, "Python", 5.0)
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let mut store = Store::new();
        assert_eq!(store.insert(ana()), 1);
        assert_eq!(store.insert(bea()), 2);
        assert_eq!(store.len(), 2);
        assert_eq!(store.next_id(), 3);
        let ids: Vec<_> = store.all().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);
    }

    #[test]
    fn duplicates_by_value_are_kept() {
        let mut store = Store::new();
        let first = store.insert(ana());
        let second = store.insert(ana());
        assert_ne!(first, second);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn find_by_id_returns_inserted_record() {
        let mut store = Store::new();
        let id = store.insert(ana());
        let found = store.find_by_id(id).cloned();
        let mut expected = ana();
        expected.id = Some(id);
        assert_eq!(found, Some(expected));
        assert!(store.find_by_id(99).is_none());
    }

    #[test]
    fn update_replaces_slot_and_keeps_id() {
        let mut store = Store::new();
        store.insert(ana());
        let id = store.insert(bea());

        let mut replacement = Student::new("Bia", 21, "Java", 9.0);
        replacement.id = Some(42);
        assert!(store.update(id, replacement));

        let updated = store.find_by_id(id).cloned();
        assert_eq!(updated.as_ref().map(|s| s.name.as_str()), Some("Bia"));
        assert_eq!(updated.and_then(|s| s.id), Some(id));
        assert_eq!(store.all()[1].id, Some(id));
        assert!(store.find_by_id(42).is_none());
    }

    #[test]
    fn update_of_missing_id_is_a_noop() {
        let mut store = Store::new();
        store.insert(ana());
        let before = store.all().to_vec();
        assert!(!store.update(7, bea()));
        assert_eq!(store.all(), before.as_slice());
        assert_eq!(store.next_id(), 2);
    }

    #[test]
    fn delete_removes_and_never_reuses_ids() {
        let mut store = Store::new();
        store.insert(ana());
        store.insert(bea());
        assert!(store.delete(1));
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].name, "Bea");
        assert_eq!(store.insert(ana()), 3);
    }

    #[test]
    fn delete_of_missing_id_is_a_noop() {
        let mut store = Store::new();
        store.insert(ana());
        assert!(!store.delete(5));
        assert_eq!(store.len(), 1);
        assert_eq!(store.next_id(), 2);
    }

    #[test]
    fn view_defaults_to_live_records() {
        let mut store = Store::new();
        store.insert(ana());
        assert_eq!(store.current_view().len(), 1);
        store.insert(bea());
        assert_eq!(store.current_view().len(), 2);
        assert_eq!(store.selection(), &Selection::All);
    }

    #[test]
    fn filtered_view_is_a_snapshot_until_reset() {
        let mut store = Store::new();
        store.insert(ana());
        store.insert(bea());

        store.set_view(Selection::Only(StudentFilter::Approved));
        let names: Vec<_> = store.current_view().iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, vec!["Ana"]);

        store.insert(Student::new("Caio", 22, "Java", 9.5));
        assert_eq!(store.current_view().len(), 1);
        assert_eq!(store.len(), 3);

        store.set_view(Selection::All);
        assert_eq!(store.current_view().len(), 3);
        assert_eq!(store.next_id(), 4);
    }
}
