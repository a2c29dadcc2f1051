use ratatui::layout::Constraint;
use ratatui::style::{Color, Style};
use ratatui::widgets::Cell;

use crate::config::RosterKind;
use crate::models::{Employee, Student};
use crate::numeric::{display_integer, display_number};
use crate::roster::{Filter, Record, Selection, Store};

/// Column widths shared by both roster tables.
pub(crate) const COLUMN_WIDTHS: [Constraint; 5] = [
    Constraint::Length(5),
    Constraint::Min(12),
    Constraint::Length(5),
    Constraint::Min(10),
    Constraint::Length(16),
];

/// How a record kind lays itself out as a table row.
pub(crate) trait TableRow: Record {
    const HEADERS: [&'static str; 5];
    /// Plural title shown on the tab and the table border.
    const TITLE: &'static str;

    fn cells(&self) -> Vec<Cell<'static>>;
}

impl TableRow for Student {
    const HEADERS: [&'static str; 5] = ["ID", "Name", "Age", "Course", "Final grade"];
    const TITLE: &'static str = "Students";

    fn cells(&self) -> Vec<Cell<'static>> {
        let grade_style = if self.is_approved() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Red)
        };
        vec![
            Cell::from(id_cell(self)),
            Cell::from(self.name.clone()),
            Cell::from(display_integer(self.age)),
            Cell::from(self.course.clone()),
            Cell::from(display_number(self.final_grade)).style(grade_style),
        ]
    }
}

impl TableRow for Employee {
    const HEADERS: [&'static str; 5] = ["ID", "Name", "Age", "Role", "Salary"];
    const TITLE: &'static str = "Employees";

    fn cells(&self) -> Vec<Cell<'static>> {
        vec![
            Cell::from(id_cell(self)),
            Cell::from(self.name().to_string()),
            Cell::from(display_integer(self.age())),
            Cell::from(self.role().to_string()),
            Cell::from(self.formatted_salary()),
        ]
    }
}

/// Tab titles in screen order.
pub(crate) fn tab_titles() -> [&'static str; 2] {
    [Student::TITLE, Employee::TITLE]
}

pub(crate) fn tab_index(kind: RosterKind) -> usize {
    match kind {
        RosterKind::Students => 0,
        RosterKind::Employees => 1,
    }
}

/// The other roster, for Tab switching.
pub(crate) fn other_screen(kind: RosterKind) -> RosterKind {
    match kind {
        RosterKind::Students => RosterKind::Employees,
        RosterKind::Employees => RosterKind::Students,
    }
}

/// Border title for a roster table, naming the active filter.
pub(crate) fn table_title<R: TableRow>(store: &Store<R>) -> String {
    let shown = store.current_view().len();
    match store.selection() {
        Selection::All => format!("{} ({} total)", R::TITLE, store.len()),
        Selection::Only(filter) => {
            format!("{} - {} ({shown} shown)", R::TITLE, filter.describe())
        }
    }
}

fn id_cell<R: Record>(record: &R) -> String {
    record.id().map(|id| id.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::StudentFilter;

    #[test]
    fn table_title_names_the_filter() {
        let mut store = Store::new();
        store.insert(Student::new("Ana", 20, "JS", 8.5));
        store.insert(Student::new("Bea", 19, "Python", 5.0));
        assert_eq!(table_title(&store), "Students (2 total)");

        store.set_view(Selection::Only(StudentFilter::Approved));
        assert_eq!(table_title(&store), "Students - approved students (1 shown)");
    }

    #[test]
    fn rows_have_one_cell_per_header() {
        let student = Student::new("Ana", 20, "JS", 8.5);
        assert_eq!(student.cells().len(), Student::HEADERS.len());
        let employee = Employee::new("Rui", 40, "Dev", 3500.0);
        assert_eq!(employee.cells().len(), Employee::HEADERS.len());
    }

    #[test]
    fn screens_alternate() {
        assert_eq!(other_screen(RosterKind::Students), RosterKind::Employees);
        assert_eq!(tab_index(other_screen(RosterKind::Employees)), 0);
        assert_eq!(tab_titles(), ["Students", "Employees"]);
    }
}
