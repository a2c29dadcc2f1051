//! In-memory rosters split across logical submodules: the generic record
//! store with its display view, the report aggregations, and the per-kind
//! glue for students and employees.

mod employees;
mod record;
mod reports;
mod store;
mod students;
mod view;

pub use employees::{EmployeeCategory, EmployeeFilter, EmployeeNumeric, EmployeeSummary};
pub use record::{Filter, Record};
pub use reports::{
    average, count_by_category, distinct_values, locale_cmp, sorted_names, upper_case_names,
    CategoryCounts,
};
pub use store::Store;
pub use students::{StudentCategory, StudentFilter, StudentNumeric, StudentSummary, KNOWN_COURSES};
pub use view::{Selection, View};
