use crate::models::{Employee, RecordId};
use crate::numeric::{format_average, format_brl};

use super::record::{Filter, Record};
use super::reports::{average, distinct_values, upper_case_names};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeNumeric {
    Age,
    Salary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeCategory {
    Role,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EmployeeFilter {
    /// Employees earning strictly more than the threshold.
    SalaryAbove(f64),
}

impl Filter<Employee> for EmployeeFilter {
    fn accepts(&self, record: &Employee) -> bool {
        match self {
            EmployeeFilter::SalaryAbove(threshold) => record.salary() > *threshold,
        }
    }

    fn describe(&self) -> String {
        match self {
            EmployeeFilter::SalaryAbove(threshold) => {
                format!("salaries above {}", format_brl(*threshold))
            }
        }
    }
}

impl Record for Employee {
    const KIND: &'static str = "Employee";

    type Numeric = EmployeeNumeric;
    type Category = EmployeeCategory;
    type Filter = EmployeeFilter;

    fn id(&self) -> Option<RecordId> {
        Employee::id(self)
    }

    fn assign_id(&mut self, id: RecordId) {
        Employee::assign_id(self, id);
    }

    fn name(&self) -> &str {
        Employee::name(self)
    }

    fn numeric(&self, field: EmployeeNumeric) -> f64 {
        match field {
            EmployeeNumeric::Age => self.age().map_or(f64::NAN, |age| age as f64),
            EmployeeNumeric::Salary => self.salary(),
        }
    }

    fn category(&self, field: EmployeeCategory) -> &str {
        match field {
            EmployeeCategory::Role => self.role(),
        }
    }
}

/// Everything the employee report panel shows, computed from the full roster.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeSummary {
    pub total: usize,
    pub average_salary: f64,
    pub average_age: f64,
    /// Distinct roles in order of first appearance.
    pub roles: Vec<String>,
    /// Names upper-cased, in insertion order.
    pub upper_names: Vec<String>,
}

impl EmployeeSummary {
    /// Run every employee report over `records`.
    pub fn compute(records: &[Employee]) -> Self {
        Self {
            total: records.len(),
            average_salary: average(records, EmployeeNumeric::Salary),
            average_age: average(records, EmployeeNumeric::Age),
            roles: distinct_values(records, EmployeeCategory::Role),
            upper_names: upper_case_names(records),
        }
    }

    /// Report panel lines. The salary is shown as currency and the age with
    /// two decimals, or a bare `0` for an empty roster.
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Total employees: {}", self.total),
            format!("Average salary: {}", format_brl(self.average_salary)),
            format!("Average age: {}", format_average(self.average_age, self.total)),
            String::new(),
            format!("Roles: {}", self.roles.join(", ")),
            String::new(),
            format!("Names: {}", self.upper_names.join(", ")),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_collects_roles_and_names() {
        let staff = vec![
            Employee::new("Rui", 40, "Dev", 3000.0),
            Employee::new("Lia", 30, "QA", 5000.0),
            Employee::new("Teo", 29, "Dev", 4000.0),
        ];
        let summary = EmployeeSummary::compute(&staff);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.average_salary, 4000.0);
        assert_eq!(summary.average_age, 33.0);
        assert_eq!(summary.roles, vec!["Dev", "QA"]);
        assert_eq!(summary.upper_names, vec!["RUI", "LIA", "TEO"]);
        assert_eq!(summary.lines()[1], "Average salary: R$\u{a0}4.000,00");
    }

    #[test]
    fn empty_summary_shows_bare_zero_age() {
        let lines = EmployeeSummary::compute(&[]).lines();
        assert_eq!(lines[1], "Average salary: R$\u{a0}0,00");
        assert_eq!(lines[2], "Average age: 0");
    }

    #[test]
    fn salary_filter_is_strict() {
        let filter = EmployeeFilter::SalaryAbove(5000.0);
        assert!(!filter.accepts(&Employee::new("A", 1, "Dev", 5000.0)));
        assert!(filter.accepts(&Employee::new("B", 1, "Dev", 5000.01)));
        assert!(!filter.accepts(&Employee::new("C", 1, "Dev", "unknown")));
    }
}
