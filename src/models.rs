//! Domain records managed by the rosters. Both types stay plain value holders:
//! numeric input is normalised once at construction, and every derived value
//! (approval, formatted salary, display line) is recomputed from the stored
//! fields on demand.

use std::fmt;

use crate::numeric::{display_integer, display_number, format_brl, NumericInput};

/// Identifier handed out by a [`crate::roster::Store`] on insertion.
pub type RecordId = u64;

/// Minimum final grade a student needs to pass.
pub const APPROVAL_GRADE: f64 = 7.0;

#[derive(Debug, Clone, PartialEq)]
/// A student enrolled in one course with a single final grade.
pub struct Student {
    /// Assigned by the store; `None` until the student is inserted.
    pub id: Option<RecordId>,
    pub name: String,
    /// `None` when the age input held no digits.
    pub age: Option<i64>,
    pub course: String,
    /// NaN when the grade input held no number.
    pub final_grade: f64,
}

impl Student {
    /// Build a student from raw or typed inputs. Numeric fields keep their
    /// leading numeric prefix; anything else becomes not-a-number.
    pub fn new(
        name: impl Into<String>,
        age: impl NumericInput,
        course: impl Into<String>,
        final_grade: impl NumericInput,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            age: age.to_integer(),
            course: course.into(),
            final_grade: final_grade.to_float(),
        }
    }

    /// Whether the final grade reaches [`APPROVAL_GRADE`]. A NaN grade never
    /// passes.
    pub fn is_approved(&self) -> bool {
        self.final_grade >= APPROVAL_GRADE
    }

    /// Human-readable approval status.
    pub fn status(&self) -> &'static str {
        if self.is_approved() {
            "Approved"
        } else {
            "Failed"
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "[ID: {id}] ")?,
            None => write!(f, "[New Student] ")?,
        }
        write!(
            f,
            "{} ({} years) - Course: {}, Grade: {} ({})",
            self.name,
            display_integer(self.age),
            self.course,
            display_number(self.final_grade),
            self.status()
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
/// An employee holding a role and a monthly salary in reais.
///
/// Fields are private so every write goes through a setter that normalises
/// numeric input the same way the constructor does.
pub struct Employee {
    /// Store-assigned id, `None` until the employee is inserted.
    id: Option<RecordId>,
    name: String,
    /// Whole years. `None` when the input had no leading integer.
    age: Option<i64>,
    /// Free-text job title. Reports group on exact equality, so `Dev` and
    /// `dev` count as two roles.
    role: String,
    /// Monthly salary. NaN when the input had no leading number, which keeps
    /// the employee out of salary filters and turns averages into NaN.
    salary: f64,
}

impl Employee {
    /// Build an employee from raw or typed inputs, normalising age and salary
    /// the same way [`Student::new`] does.
    pub fn new(
        name: impl Into<String>,
        age: impl NumericInput,
        role: impl Into<String>,
        salary: impl NumericInput,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            age: age.to_integer(),
            role: role.into(),
            salary: salary.to_float(),
        }
    }

    /// Store-assigned id, if the employee has been inserted.
    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Age in whole years, `None` for not-a-number.
    pub fn age(&self) -> Option<i64> {
        self.age
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    /// Raw salary value. Use [`Employee::formatted_salary`] for display.
    pub fn salary(&self) -> f64 {
        self.salary
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replace the age, re-reading `age` with the lenient integer rules.
    pub fn set_age(&mut self, age: impl NumericInput) {
        self.age = age.to_integer();
    }

    pub fn set_role(&mut self, role: impl Into<String>) {
        self.role = role.into();
    }

    /// Replace the salary, re-reading `salary` with the lenient float rules.
    /// Text such as `"7100"` is accepted as-is.
    pub fn set_salary(&mut self, salary: impl NumericInput) {
        self.salary = salary.to_float();
    }

    /// Salary rendered as Brazilian currency, e.g. `R$ 3.500,00`.
    pub fn formatted_salary(&self) -> String {
        format_brl(self.salary)
    }

    pub(crate) fn assign_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "[ID: {id}] ")?,
            None => write!(f, "[New] ")?,
        }
        write!(
            f,
            "{}, {} years - Role: {}, Salary: {}",
            self.name,
            display_integer(self.age),
            self.role,
            self.formatted_salary()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_normalises_text_input() {
        let student = Student::new("Ana", "20", "JS", "8.5");
        assert_eq!(student.age, Some(20));
        assert_eq!(student.final_grade, 8.5);
        assert_eq!(student.id, None);
    }

    #[test]
    fn malformed_numbers_become_not_a_number() {
        let student = Student::new("Caio", "twenty", "Java", "ten");
        assert_eq!(student.age, None);
        assert!(student.final_grade.is_nan());
        assert!(!student.is_approved());
    }

    #[test]
    fn approval_boundary_is_inclusive() {
        assert!(Student::new("A", 20, "JS", 7.0).is_approved());
        assert!(!Student::new("B", 20, "JS", 6.999).is_approved());
        assert!(Student::new("C", 20, "JS", "7").is_approved());
    }

    #[test]
    fn derived_values_are_repeatable() {
        let student = Student::new("Ana", 20, "JS", 8.5);
        assert_eq!(student.is_approved(), student.is_approved());
        assert_eq!(student.to_string(), student.to_string());
    }

    #[test]
    fn student_display_line() {
        let mut student = Student::new("Ana", 20, "JS", 8.5);
        assert_eq!(
            student.to_string(),
            "[New Student] Ana (20 years) - Course: JS, Grade: 8.5 (Approved)"
        );
        student.id = Some(3);
        student.final_grade = 5.0;
        assert_eq!(
            student.to_string(),
            "[ID: 3] Ana (20 years) - Course: JS, Grade: 5 (Failed)"
        );
    }

    #[test]
    fn employee_setters_renormalise() {
        let mut employee = Employee::new("Rui", "40", "Dev", "3500");
        employee.set_age("41 years");
        employee.set_salary("4200.5");
        employee.set_role("Lead");
        employee.set_name("Rui Costa");
        assert_eq!(employee.age(), Some(41));
        assert_eq!(employee.salary(), 4200.5);
        assert_eq!(employee.role(), "Lead");
        assert_eq!(employee.name(), "Rui Costa");

        employee.set_salary("n/a");
        assert!(employee.salary().is_nan());
    }

    #[test]
    fn employee_display_line() {
        let mut employee = Employee::new("Rui", 40, "Dev", 1234.56);
        assert_eq!(
            employee.to_string(),
            "[New] Rui, 40 years - Role: Dev, Salary: R$\u{a0}1.234,56"
        );
        employee.assign_id(7);
        assert_eq!(employee.id(), Some(7));
        assert!(employee.to_string().starts_with("[ID: 7] Rui"));
    }
}
