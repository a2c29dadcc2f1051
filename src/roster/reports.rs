//! Aggregations over a slice of records. Every function recomputes from
//! scratch; callers pass the full store contents, never a filtered view.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::record::Record;

/// Arithmetic mean of a numeric column. An empty slice averages to 0, and a
/// single NaN value makes the whole mean NaN.
pub fn average<R: Record>(records: &[R], field: R::Numeric) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let sum: f64 = records.iter().map(|record| record.numeric(field)).sum();
    sum / records.len() as f64
}

/// Record counts per category, in presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryCounts {
    /// Category name and count pairs. A `Vec` rather than a map so the
    /// presentation order survives.
    entries: Vec<(String, usize)>,
}

impl CategoryCounts {
    /// Count for `category`, 0 when it never occurred.
    pub fn get(&self, category: &str) -> usize {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map_or(0, |(_, count)| *count)
    }

    /// Categories with their counts, known categories first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
    }

    /// Number of distinct categories reported, zero-count ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Group records by exact equality on a categorical column.
///
/// Every category listed in `known` is reported, with a count of 0 when no
/// record carries it, in the order given. Categories outside `known` follow in
/// order of first occurrence.
pub fn count_by_category<R, S>(records: &[R], field: R::Category, known: &[S]) -> CategoryCounts
where
    R: Record,
    S: AsRef<str>,
{
    let mut entries: Vec<(String, usize)> = Vec::with_capacity(known.len());
    for category in known {
        let category = category.as_ref();
        if !entries.iter().any(|(name, _)| name == category) {
            entries.push((category.to_string(), 0));
        }
    }

    for record in records {
        let category = record.category(field);
        match entries.iter_mut().find(|(name, _)| name == category) {
            Some((_, count)) => *count += 1,
            None => entries.push((category.to_string(), 1)),
        }
    }

    CategoryCounts { entries }
}

/// Distinct values of a categorical column in order of first occurrence.
pub fn distinct_values<R: Record>(records: &[R], field: R::Category) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for record in records {
        let value = record.category(field);
        if !values.iter().any(|seen| seen == value) {
            values.push(value.to_string());
        }
    }
    values
}

/// Every name, alphabetically ordered with [`locale_cmp`].
pub fn sorted_names<R: Record>(records: &[R]) -> Vec<String> {
    let mut names: Vec<String> = records
        .iter()
        .map(|record| record.name().to_string())
        .collect();
    names.sort_by(|a, b| locale_cmp(a, b));
    names
}

/// Every name upper-cased, keeping insertion order.
pub fn upper_case_names<R: Record>(records: &[R]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.name().to_uppercase())
        .collect()
}

/// Natural-language ordering for names.
///
/// The primary comparison ignores accents and case, so `"álvaro"` sits next to
/// `"Alvaro"` rather than after `"Zeca"`. Letters without a decomposition
/// (`ø`, `ł`, `ß`, `æ`) fold to their Latin base letters. Punctuation sorts
/// before symbols, symbols before digits, and digits before letters. Ties are
/// broken by accent (plain letters first), then by case (lower case first),
/// then by code point.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let secondary = |s: &str| -> Vec<char> { s.chars().flat_map(char::to_lowercase).collect() };
    let tertiary = |s: &str| -> Vec<bool> { s.chars().map(char::is_uppercase).collect() };

    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary(a).cmp(&secondary(b)))
        .then_with(|| tertiary(a).cmp(&tertiary(b)))
        .then_with(|| a.cmp(b))
}

/// Broad collation groups, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Punctuation,
    Symbol,
    Digit,
    Letter,
}

impl CharClass {
    fn of(ch: char) -> Self {
        if ch.is_whitespace() {
            CharClass::Whitespace
        } else if ch.is_numeric() {
            CharClass::Digit
        } else if ch.is_alphabetic() {
            CharClass::Letter
        } else if matches!(ch, '$' | '+' | '<' | '=' | '>' | '^' | '`' | '|' | '~')
            || ('\u{a2}'..='\u{a9}').contains(&ch)
        {
            CharClass::Symbol
        } else {
            CharClass::Punctuation
        }
    }
}

/// Accent- and case-free sort key: canonical decomposition with the
/// combining marks dropped, then lower-cased and folded.
fn primary_key(s: &str) -> Vec<(CharClass, char)> {
    let mut folded = Vec::with_capacity(s.len());
    for ch in s.nfd().filter(|ch| !is_combining_mark(*ch)) {
        for lower in ch.to_lowercase() {
            fold_letter(lower, &mut folded);
        }
    }
    folded
        .into_iter()
        .map(|ch| (CharClass::of(ch), ch))
        .collect()
}

/// Letters that carry their diacritic in the base code point, so NFD leaves
/// them intact.
fn fold_letter(ch: char, out: &mut Vec<char>) {
    match ch {
        'ø' => out.push('o'),
        'ł' => out.push('l'),
        'đ' | 'ð' => out.push('d'),
        'ı' => out.push('i'),
        'ß' => out.extend(['s', 's']),
        'æ' => out.extend(['a', 'e']),
        'œ' => out.extend(['o', 'e']),
        'þ' => out.extend(['t', 'h']),
        other => out.push(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, Student};
    use crate::roster::{EmployeeCategory, EmployeeNumeric, StudentCategory, StudentNumeric};

    fn students() -> Vec<Student> {
        vec![
            Student::new("Ana", 20, "JS", 10.0),
            Student::new("Bea", 22, "JS", 4.0),
            Student::new("Caio", 21, "Python", 7.0),
        ]
    }

    #[test]
    fn average_of_empty_slice_is_zero() {
        let empty: Vec<Student> = Vec::new();
        assert_eq!(average(&empty, StudentNumeric::FinalGrade), 0.0);
    }

    #[test]
    fn average_of_grades() {
        let pair = vec![
            Student::new("Ana", 20, "JS", 10.0),
            Student::new("Bea", 22, "JS", 4.0),
        ];
        assert_eq!(average(&pair, StudentNumeric::FinalGrade), 7.0);
        assert_eq!(average(&students(), StudentNumeric::Age), 21.0);
    }

    #[test]
    fn average_propagates_not_a_number() {
        let mut records = students();
        records.push(Student::new("Duda", "?", "Java", "?"));
        assert!(average(&records, StudentNumeric::FinalGrade).is_nan());
        assert!(average(&records, StudentNumeric::Age).is_nan());
    }

    #[test]
    fn count_by_category_reports_known_zero_categories() {
        let counts = count_by_category(&students(), StudentCategory::Course, &["JS", "Python", "Java"]);
        let listed: Vec<_> = counts.iter().collect();
        assert_eq!(listed, vec![("JS", 2), ("Python", 1), ("Java", 0)]);
        assert_eq!(counts.get("Java"), 0);
        assert_eq!(counts.get("Rust"), 0);
    }

    #[test]
    fn count_by_category_appends_unlisted_categories() {
        let counts = count_by_category(&students(), StudentCategory::Course, &["Java"]);
        let listed: Vec<_> = counts.iter().collect();
        assert_eq!(listed, vec![("Java", 0), ("JS", 2), ("Python", 1)]);

        let none: &[&str] = &[];
        let counts = count_by_category(&students(), StudentCategory::Course, none);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn distinct_values_keep_first_occurrence_order() {
        let staff = vec![
            Employee::new("Rui", 40, "Dev", 1.0),
            Employee::new("Lia", 31, "QA", 1.0),
            Employee::new("Teo", 29, "Dev", 1.0),
        ];
        assert_eq!(distinct_values(&staff, EmployeeCategory::Role), vec!["Dev", "QA"]);
        assert_eq!(average(&staff, EmployeeNumeric::Salary), 1.0);
    }

    #[test]
    fn sorted_names_are_alphabetical_and_leave_input_alone() {
        let records = vec![
            Student::new("Bea", 19, "JS", 5.0),
            Student::new("ana", 20, "JS", 5.0),
            Student::new("Álvaro", 20, "JS", 5.0),
            Student::new("Ana", 20, "JS", 5.0),
            Student::new("Zeca", 20, "JS", 5.0),
        ];
        assert_eq!(
            sorted_names(&records),
            vec!["Álvaro", "ana", "Ana", "Bea", "Zeca"]
        );
        assert_eq!(records[0].name, "Bea");
    }

    #[test]
    fn upper_case_names_keep_insertion_order() {
        assert_eq!(upper_case_names(&students()), vec!["ANA", "BEA", "CAIO"]);
    }

    #[test]
    fn locale_cmp_orders_accents_after_plain_letters() {
        assert_eq!(locale_cmp("Ana", "Ána"), Ordering::Less);
        assert_eq!(locale_cmp("ana", "Ana"), Ordering::Less);
        assert_eq!(locale_cmp("Ana", "Ana"), Ordering::Equal);
    }

    #[test]
    fn locale_cmp_folds_letters_without_decomposition() {
        let mut names = vec![
            "Zoe", "Łukasz", "Øscar", "ßara", "Sara", "Oscar", "Lucas", "Émile", "Eva",
        ];
        names.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(
            names,
            vec!["Émile", "Eva", "Lucas", "Łukasz", "Oscar", "Øscar", "Sara", "ßara", "Zoe"]
        );
    }

    #[test]
    fn locale_cmp_ranks_punctuation_then_digits_then_letters() {
        let mut names = vec!["Zoe", "1Ana", "{y", "Ana", "_x", " lead"];
        names.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(names, vec![" lead", "_x", "{y", "1Ana", "Ana", "Zoe"]);
    }
}
