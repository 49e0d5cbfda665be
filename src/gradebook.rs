// 📒 Gradebook - In-memory subject list + grade mutations
//
// Subjects are looked up by name. Every subject whose name matches is
// affected, so duplicate names behave as one subject for mutation purposes.
// Each mutation builds a new grade list and swaps it in; a failed mutation
// leaves every subject untouched.

use crate::aggregate;
use crate::error::GradebookError;
use crate::grades::{seed_subjects, Grade, Subject};
use tracing::{debug, info};

pub type Result<T> = std::result::Result<T, GradebookError>;

#[derive(Debug, Clone, PartialEq)]
pub struct Gradebook {
    subjects: Vec<Subject>,
}

impl Gradebook {
    pub fn new(subjects: Vec<Subject>) -> Self {
        Gradebook { subjects }
    }

    /// Gradebook populated with the startup subjects
    pub fn seeded() -> Self {
        Gradebook::new(seed_subjects())
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn subject(&self, name: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn overall_average(&self) -> f64 {
        aggregate::overall_average(&self.subjects)
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    /// Append `grade` to the matching subject(s).
    ///
    /// Returns how many subjects were touched; 0 means no name matched.
    pub fn add_grade(&mut self, subject_name: &str, grade: Grade) -> usize {
        let touched = self.replace_grades(subject_name, |grades| {
            let mut next = grades.to_vec();
            next.push(grade.clone());
            next
        });

        info!(subject = subject_name, assignment = %grade.assignment, touched, "grade added");
        touched
    }

    /// Replace the grade at `index` in the matching subject(s).
    pub fn update_grade(&mut self, subject_name: &str, grade: Grade, index: usize) -> Result<usize> {
        self.check_index(subject_name, index)?;

        let touched = self.replace_grades(subject_name, |grades| {
            let mut next = grades.to_vec();
            next[index] = grade.clone();
            next
        });

        info!(subject = subject_name, index, assignment = %grade.assignment, touched, "grade updated");
        Ok(touched)
    }

    /// Remove the grade at `index`, shifting later grades down by one.
    pub fn delete_grade(&mut self, subject_name: &str, index: usize) -> Result<usize> {
        self.check_index(subject_name, index)?;

        let touched = self.replace_grades(subject_name, |grades| {
            grades
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, g)| g.clone())
                .collect()
        });

        info!(subject = subject_name, index, touched, "grade deleted");
        Ok(touched)
    }

    /// Every matching subject must hold `index`, otherwise nothing changes.
    fn check_index(&self, subject_name: &str, index: usize) -> Result<()> {
        for subject in self.subjects.iter().filter(|s| s.name == subject_name) {
            if index >= subject.grades.len() {
                return Err(GradebookError::IndexOutOfRange {
                    subject: subject.name.clone(),
                    index,
                    len: subject.grades.len(),
                });
            }
        }
        Ok(())
    }

    fn replace_grades<F>(&mut self, subject_name: &str, build: F) -> usize
    where
        F: Fn(&[Grade]) -> Vec<Grade>,
    {
        let mut touched = 0;
        for subject in self.subjects.iter_mut().filter(|s| s.name == subject_name) {
            subject.grades = build(&subject.grades);
            touched += 1;
        }

        if touched == 0 {
            debug!(subject = subject_name, "no subject with that name");
        }
        touched
    }
}

impl Default for Gradebook {
    fn default() -> Self {
        Self::seeded()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_grade_appends() {
        let mut book = Gradebook::seeded();
        let touched = book.add_grade("Science", Grade::new("Quiz", 4.0, 0.1));

        assert_eq!(touched, 1);
        let science = book.subject("Science").unwrap();
        assert_eq!(science.grades.len(), 3);
        assert_eq!(science.grades[2], Grade::new("Quiz", 4.0, 0.1));
    }

    #[test]
    fn test_add_grade_unknown_subject_is_noop() {
        let mut book = Gradebook::seeded();
        let before = book.clone();

        assert_eq!(book.add_grade("Latin", Grade::new("Quiz", 4.0, 0.1)), 0);
        assert_eq!(book, before);
    }

    #[test]
    fn test_update_replaces_only_target() {
        let mut book = Gradebook::seeded();
        let before = book.subject("Mathematics").unwrap().grades.clone();

        let touched = book
            .update_grade("Mathematics", Grade::new("Final (retake)", 6.0, 0.5), 1)
            .unwrap();

        assert_eq!(touched, 1);
        let after = &book.subject("Mathematics").unwrap().grades;
        assert_eq!(after.len(), before.len());
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1], Grade::new("Final (retake)", 6.0, 0.5));
        assert_eq!(after[2], before[2]);
    }

    #[test]
    fn test_update_out_of_range() {
        let mut book = Gradebook::seeded();
        let before = book.clone();

        let err = book
            .update_grade("Science", Grade::default(), 2)
            .unwrap_err();

        assert_eq!(
            err,
            GradebookError::IndexOutOfRange {
                subject: "Science".to_string(),
                index: 2,
                len: 2,
            }
        );
        assert_eq!(book, before);
    }

    #[test]
    fn test_delete_keeps_relative_order() {
        let mut book = Gradebook::seeded();

        book.delete_grade("History", 1).unwrap();

        let names: Vec<&str> = book
            .subject("History")
            .unwrap()
            .grades
            .iter()
            .map(|g| g.assignment.as_str())
            .collect();
        assert_eq!(names, vec!["Essay", "Final Exam"]);
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut book = Gradebook::seeded();
        let before = book.clone();

        assert!(book.delete_grade("History", 3).is_err());
        assert_eq!(book, before);
    }

    #[test]
    fn test_unknown_subject_update_and_delete_are_noops() {
        let mut book = Gradebook::seeded();
        let before = book.clone();

        assert_eq!(book.update_grade("Latin", Grade::default(), 0), Ok(0));
        assert_eq!(book.delete_grade("Latin", 7), Ok(0));
        assert_eq!(book, before);
    }

    #[test]
    fn test_duplicate_names_are_mutated_together() {
        let mut book = Gradebook::new(vec![
            Subject::new("Art", vec![Grade::new("Sketch", 5.0, 1.0)]),
            Subject::new("Art", vec![Grade::new("Painting", 4.0, 1.0)]),
        ]);

        assert_eq!(book.delete_grade("Art", 0), Ok(2));
        assert!(book.subjects().iter().all(|s| s.grades.is_empty()));
    }

    #[test]
    fn test_overall_average_tracks_mutations() {
        let mut book = Gradebook::seeded();
        assert_eq!(book.overall_average(), 5.3);

        // History: 4.6*0.3 + 6.0*0.3 + 5.4*0.4 = 5.34 -> 5.5
        book.update_grade("History", Grade::new("Presentation", 6.0, 0.3), 1)
            .unwrap();
        assert_eq!(book.overall_average(), 5.5);
    }
}
