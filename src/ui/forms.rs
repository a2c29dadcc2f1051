use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::config::RosterKind;
use crate::models::{Employee, RecordId, Student};
use crate::numeric::display_number;
use crate::roster::Record;

/// Form labels for students, in field order.
const STUDENT_LABELS: [&str; 4] = ["Name", "Age", "Course", "Final grade"];
/// Form labels for employees, in field order.
const EMPLOYEE_LABELS: [&str; 4] = ["Name", "Age", "Role", "Salary"];

/// Fields of the record form. Both record kinds share the same shape: a name,
/// an age, a category and an amount.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum FormField {
    #[default]
    Name,
    Age,
    Category,
    Amount,
}

impl FormField {
    const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Age,
        FormField::Category,
        FormField::Amount,
    ];

    fn index(self) -> usize {
        match self {
            FormField::Name => 0,
            FormField::Age => 1,
            FormField::Category => 2,
            FormField::Amount => 3,
        }
    }
}

/// Raw text typed into the add/edit form. Values are handed to the record
/// constructors untouched, so malformed numbers end up as not-a-number
/// instead of being rejected here.
#[derive(Clone, Debug)]
pub(crate) struct RecordForm {
    pub(crate) kind: RosterKind,
    pub(crate) values: [String; 4],
    pub(crate) active: FormField,
}

impl RecordForm {
    /// Blank form for a new record of `kind`.
    pub(crate) fn new(kind: RosterKind) -> Self {
        Self {
            kind,
            values: Default::default(),
            active: FormField::Name,
        }
    }

    /// Populate the form from an existing student when editing.
    pub(crate) fn from_student(student: &Student) -> Self {
        Self {
            kind: RosterKind::Students,
            values: [
                student.name.clone(),
                prefill_integer(student.age),
                student.course.clone(),
                prefill_float(student.final_grade),
            ],
            active: FormField::Name,
        }
    }

    /// Populate the form from an existing employee when editing.
    pub(crate) fn from_employee(employee: &Employee) -> Self {
        Self {
            kind: RosterKind::Employees,
            values: [
                employee.name().to_string(),
                prefill_integer(employee.age()),
                employee.role().to_string(),
                prefill_float(employee.salary()),
            ],
            active: FormField::Name,
        }
    }

    pub(crate) fn labels(&self) -> [&'static str; 4] {
        match self.kind {
            RosterKind::Students => STUDENT_LABELS,
            RosterKind::Employees => EMPLOYEE_LABELS,
        }
    }

    /// Move focus to the next field, wrapping around.
    pub(crate) fn next_field(&mut self) {
        let next = (self.active.index() + 1) % FormField::ALL.len();
        self.active = FormField::ALL[next];
    }

    /// Move focus to the previous field, wrapping around.
    pub(crate) fn previous_field(&mut self) {
        let len = FormField::ALL.len();
        let previous = (self.active.index() + len - 1) % len;
        self.active = FormField::ALL[previous];
    }

    /// Append a character to the active field. Control characters are
    /// ignored.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.values[self.active.index()].push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.values[self.active.index()].pop();
    }

    pub(crate) fn value(&self, field: FormField) -> &str {
        &self.values[field.index()]
    }

    pub(crate) fn to_student(&self) -> Student {
        Student::new(
            self.value(FormField::Name),
            self.value(FormField::Age),
            self.value(FormField::Category),
            self.value(FormField::Amount),
        )
    }

    pub(crate) fn to_employee(&self) -> Employee {
        Employee::new(
            self.value(FormField::Name),
            self.value(FormField::Age),
            self.value(FormField::Category),
            self.value(FormField::Amount),
        )
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: FormField) -> Line<'static> {
        let label = self.labels()[field.index()];
        let value = self.value(field);
        let is_active = self.active == field;

        let display = if value.is_empty() {
            "<empty>".to_string()
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(display, style),
        ])
    }

    /// Column where the cursor sits for the active field.
    pub(crate) fn cursor_offset(&self) -> usize {
        let label = self.labels()[self.active.index()];
        label.len() + 2 + self.value(self.active).chars().count()
    }

    /// Row of the active field within the form body.
    pub(crate) fn cursor_row(&self) -> usize {
        self.active.index()
    }
}

/// Pending deletion awaiting a Y/N answer.
#[derive(Clone, Debug)]
pub(crate) struct ConfirmDelete {
    pub(crate) id: RecordId,
    pub(crate) kind: &'static str,
    pub(crate) summary: String,
}

impl ConfirmDelete {
    /// Build the confirmation state from the record being considered. Returns
    /// `None` for records that were never stored.
    pub(crate) fn from_record<R: Record>(record: &R) -> Option<Self> {
        Some(Self {
            id: record.id()?,
            kind: R::KIND,
            summary: record.to_string(),
        })
    }
}

fn prefill_integer(value: Option<i64>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

fn prefill_float(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        display_number(value)
    }
}
