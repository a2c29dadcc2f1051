use std::fmt;

use crate::models::RecordId;

/// Schema shared by every record kind a [`super::Store`] can hold.
///
/// The associated field enums name the numeric and categorical columns the
/// reports are allowed to aggregate, so a report can never ask a student for a
/// salary.
pub trait Record: Clone + fmt::Debug + fmt::Display {
    /// Singular label used in logs and status messages.
    const KIND: &'static str;

    /// Numeric columns, averaged by [`super::average`].
    type Numeric: Copy + fmt::Debug;
    /// Categorical columns, grouped by [`super::count_by_category`].
    type Category: Copy + fmt::Debug;
    /// Display filters available for this kind.
    type Filter: Filter<Self>;

    fn id(&self) -> Option<RecordId>;

    /// Attach the store-assigned identifier. Only the store calls this.
    fn assign_id(&mut self, id: RecordId);

    fn name(&self) -> &str;

    /// Value of a numeric column, NaN when the input was not a number.
    fn numeric(&self, field: Self::Numeric) -> f64;

    fn category(&self, field: Self::Category) -> &str;
}

/// Predicate selecting which records a filtered [`super::View`] keeps.
pub trait Filter<R>: Clone + fmt::Debug {
    fn accepts(&self, record: &R) -> bool;

    /// Short description for the status footer.
    fn describe(&self) -> String;
}
