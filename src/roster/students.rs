use crate::models::{RecordId, Student};
use crate::numeric::format_average;

use super::record::{Filter, Record};
use super::reports::{average, count_by_category, sorted_names, CategoryCounts};

/// Courses the per-course report always lists, even when nobody is enrolled.
pub const KNOWN_COURSES: [&str; 3] = ["JavaScript", "Python", "Java"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentNumeric {
    Age,
    FinalGrade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentCategory {
    Course,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StudentFilter {
    /// Students whose final grade passes.
    Approved,
}

impl Filter<Student> for StudentFilter {
    fn accepts(&self, record: &Student) -> bool {
        match self {
            StudentFilter::Approved => record.is_approved(),
        }
    }

    fn describe(&self) -> String {
        match self {
            StudentFilter::Approved => "approved students".to_string(),
        }
    }
}

impl Record for Student {
    const KIND: &'static str = "Student";

    type Numeric = StudentNumeric;
    type Category = StudentCategory;
    type Filter = StudentFilter;

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn numeric(&self, field: StudentNumeric) -> f64 {
        match field {
            StudentNumeric::Age => self.age.map_or(f64::NAN, |age| age as f64),
            StudentNumeric::FinalGrade => self.final_grade,
        }
    }

    fn category(&self, field: StudentCategory) -> &str {
        match field {
            StudentCategory::Course => &self.course,
        }
    }
}

/// Everything the student report panel shows, computed from the full roster.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentSummary {
    pub total: usize,
    /// Students at or above the approval grade.
    pub approved: usize,
    /// Mean final grade; 0 for an empty roster, NaN if any grade is NaN.
    pub average_grade: f64,
    pub average_age: f64,
    /// Known courses first, then any other course typed into a form.
    pub per_course: CategoryCounts,
    pub sorted_names: Vec<String>,
}

impl StudentSummary {
    /// Run every student report over `records`. `known_courses` decides which
    /// courses appear with a zero count.
    pub fn compute<S: AsRef<str>>(records: &[Student], known_courses: &[S]) -> Self {
        Self {
            total: records.len(),
            approved: records.iter().filter(|s| s.is_approved()).count(),
            average_grade: average(records, StudentNumeric::FinalGrade),
            average_age: average(records, StudentNumeric::Age),
            per_course: count_by_category(records, StudentCategory::Course, known_courses),
            sorted_names: sorted_names(records),
        }
    }

    /// Report panel lines. Averages use two decimals, or a bare `0` for an empty
    /// roster.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Total students: {}", self.total),
            format!("Approved: {}", self.approved),
            format!(
                "Average grade: {}",
                format_average(self.average_grade, self.total)
            ),
            format!("Average age: {}", format_average(self.average_age, self.total)),
            String::new(),
            "Students per course:".to_string(),
        ];
        lines.extend(
            self.per_course
                .iter()
                .map(|(course, count)| format!("  {course}: {count}")),
        );
        lines.push(String::new());
        lines.push(format!("Names: {}", self.sorted_names.join(", ")));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_matches_classroom_example() {
        let mut ana = Student::new("Ana", 20, "JavaScript", 8.5);
        ana.id = Some(1);
        let records = vec![ana, Student::new("Bea", 19, "Python", 5.0)];

        let summary = StudentSummary::compute(&records, &KNOWN_COURSES);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.approved, 1);
        assert_eq!(summary.average_grade, 6.75);
        assert_eq!(summary.average_age, 19.5);
        assert_eq!(summary.per_course.get("JavaScript"), 1);
        assert_eq!(summary.per_course.get("Java"), 0);
        assert_eq!(summary.sorted_names, vec!["Ana", "Bea"]);

        let lines = summary.lines();
        assert!(lines.contains(&"Average grade: 6.75".to_string()));
        assert!(lines.contains(&"Average age: 19.50".to_string()));
        assert!(lines.contains(&"  Java: 0".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("Names: Ana, Bea"));
    }

    #[test]
    fn empty_summary_averages_to_zero() {
        let summary = StudentSummary::compute(&[], &KNOWN_COURSES);
        assert_eq!(summary.average_grade, 0.0);
        assert_eq!(summary.per_course.len(), 3);
        let lines = summary.lines();
        assert!(lines.contains(&"Average grade: 0".to_string()));
        assert!(lines.contains(&"Average age: 0".to_string()));
    }

    #[test]
    fn average_grade_ties_round_up() {
        let records = vec![
            Student::new("Ana", 20, "JavaScript", 8.25),
            Student::new("Bea", 19, "Python", 4.0),
        ];
        let lines = StudentSummary::compute(&records, &KNOWN_COURSES).lines();
        assert_eq!(lines.get(2).map(String::as_str), Some("Average grade: 6.13"));
    }

    #[test]
    fn approved_filter_uses_grade_boundary() {
        assert!(StudentFilter::Approved.accepts(&Student::new("A", 1, "JS", 7.0)));
        assert!(!StudentFilter::Approved.accepts(&Student::new("B", 1, "JS", 6.999)));
    }
}
