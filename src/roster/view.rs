use super::record::{Filter, Record};

/// Which records a view shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<F> {
    /// Every record in the store, tracking later mutations.
    All,
    /// Only the records accepted by the filter when the view was selected.
    Only(F),
}

/// The subset of a store's records currently selected for display.
///
/// A filtered view holds its own copy of the matching records and does not
/// refresh itself; callers select the view again after mutating the store.
#[derive(Debug, Clone)]
pub struct View<R: Record> {
    selection: Selection<R::Filter>,
    filtered: Vec<R>,
}

impl<R: Record> Default for View<R> {
    fn default() -> Self {
        Self {
            selection: Selection::All,
            filtered: Vec::new(),
        }
    }
}

impl<R: Record> View<R> {
    /// Derive a view over `records`.
    pub fn select(records: &[R], selection: Selection<R::Filter>) -> Self {
        let filtered = match &selection {
            Selection::All => Vec::new(),
            Selection::Only(filter) => records
                .iter()
                .filter(|record| filter.accepts(record))
                .cloned()
                .collect(),
        };
        Self {
            selection,
            filtered,
        }
    }

    pub fn selection(&self) -> &Selection<R::Filter> {
        &self.selection
    }

    /// The records to display, given the store's live records.
    pub fn resolve<'a>(&'a self, live: &'a [R]) -> &'a [R] {
        match self.selection {
            Selection::All => live,
            Selection::Only(_) => &self.filtered,
        }
    }
}
