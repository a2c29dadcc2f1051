use roster_manager::roster::{
    average, EmployeeFilter, EmployeeSummary, StudentFilter, StudentNumeric, StudentSummary,
    KNOWN_COURSES,
};
use roster_manager::{Employee, Record, RosterError, Selection, Store, Student};

#[test]
fn student_session_end_to_end() {
    let mut store = Store::new();
    let ana = store.insert(Student::new("Ana", 20, "JavaScript", 8.5));
    let bea = store.insert(Student::new("Bea", "19", "Python", "5"));
    assert_eq!((ana, bea), (1, 2));

    let summary = StudentSummary::compute(store.all(), &KNOWN_COURSES);
    assert_eq!(summary.sorted_names, vec!["Ana", "Bea"]);
    assert_eq!(summary.average_grade, 6.75);
    assert_eq!(summary.approved, 1);
    assert_eq!(summary.per_course.get("Java"), 0);

    store.set_view(Selection::Only(StudentFilter::Approved));
    let shown: Vec<_> = store.current_view().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(shown, vec!["Ana"]);

    assert!(store.delete(1));
    assert!(store.find_by_id(1).is_none());
    // The filtered snapshot is only refreshed when the view is reset.
    assert_eq!(store.current_view().len(), 1);
    store.set_view(Selection::All);
    assert_eq!(store.current_view().len(), 1);

    let caio = store.insert(Student::new("Caio", 22, "Java", 7));
    assert_eq!(caio, 3);
    assert_eq!(average(store.all(), StudentNumeric::FinalGrade), 6.0);
}

#[test]
fn employee_session_end_to_end() {
    let mut store = Store::new();
    store.insert(Employee::new("rui", 40, "Dev", 3500));
    store.insert(Employee::new("Lia", "31", "QA", "5200.50"));
    store.insert(Employee::new("Téo", 28, "Dev", 6000));

    let summary = EmployeeSummary::compute(store.all());
    assert_eq!(summary.roles, vec!["Dev", "QA"]);
    assert_eq!(summary.upper_names, vec!["RUI", "LIA", "TÉO"]);
    assert_eq!(summary.average_age, 33.0);

    store.set_view(Selection::Only(EmployeeFilter::SalaryAbove(5000.0)));
    let shown: Vec<_> = store.current_view().iter().map(|e| e.name()).collect();
    assert_eq!(shown, vec!["Lia", "Téo"]);

    let mut promoted = Employee::new("Rui", 41, "Lead", 7000);
    promoted.set_salary("7100");
    assert!(store.update(1, promoted));
    let rui = store.find_by_id(1).map(|e| e.to_string());
    assert_eq!(
        rui.as_deref(),
        Some("[ID: 1] Rui, 41 years - Role: Lead, Salary: R$\u{a0}7.100,00")
    );
}

#[test]
fn missing_ids_surface_as_not_found() {
    let mut store: Store<Student> = Store::new();
    let replacement = Student::new("Ghost", 0, "Java", 0);
    assert!(!store.update(42, replacement));
    assert!(!store.delete(42));

    let err = RosterError::NotFound {
        kind: Student::KIND,
        id: 42,
    };
    assert_eq!(err.to_string(), "Student with ID 42 not found.");
}
