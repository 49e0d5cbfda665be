// 📚 Grade Model - Subjects and their weighted assignments
// A subject is identified by its name; grades are an ordered list

use serde::{Deserialize, Serialize};

// ============================================================================
// GRADE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    /// Assignment name (free text)
    pub assignment: String,

    /// Score on the 1-6 scale (not range-checked)
    pub score: f64,

    /// Weight, conventionally 0-1 (weights of a subject are not required to sum to 1)
    pub weight: f64,
}

impl Grade {
    pub fn new(assignment: impl Into<String>, score: f64, weight: f64) -> Self {
        Grade {
            assignment: assignment.into(),
            score,
            weight,
        }
    }

    /// Contribution of this grade to the subject total
    pub fn weighted_score(&self) -> f64 {
        self.score * self.weight
    }
}

impl Default for Grade {
    fn default() -> Self {
        Grade::new("", 0.0, 0.0)
    }
}

// ============================================================================
// SUBJECT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Display name, also the lookup key for mutations
    pub name: String,

    pub grades: Vec<Grade>,
}

impl Subject {
    pub fn new(name: impl Into<String>, grades: Vec<Grade>) -> Self {
        Subject {
            name: name.into(),
            grades,
        }
    }

    pub fn total(&self) -> f64 {
        crate::aggregate::subject_total(&self.grades)
    }
}

// ============================================================================
// SEED DATA
// ============================================================================

/// Subjects every session starts with
pub fn seed_subjects() -> Vec<Subject> {
    vec![
        Subject::new(
            "Mathematics",
            vec![
                Grade::new("Midterm", 5.2, 0.3),
                Grade::new("Final", 5.7, 0.5),
                Grade::new("Homework", 5.9, 0.2),
            ],
        ),
        Subject::new(
            "Science",
            vec![
                Grade::new("Lab Report", 5.4, 0.4),
                Grade::new("Final Exam", 5.8, 0.6),
            ],
        ),
        Subject::new(
            "History",
            vec![
                Grade::new("Essay", 4.6, 0.3),
                Grade::new("Presentation", 5.2, 0.3),
                Grade::new("Final Exam", 5.4, 0.4),
            ],
        ),
    ]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_layout() {
        let subjects = seed_subjects();
        let names: Vec<&str> = subjects.iter().map(|s| s.name.as_str()).collect();

        assert_eq!(names, vec!["Mathematics", "Science", "History"]);
        assert_eq!(subjects[0].grades.len(), 3);
        assert_eq!(subjects[1].grades.len(), 2);
        assert_eq!(subjects[2].grades[1], Grade::new("Presentation", 5.2, 0.3));
    }

    #[test]
    fn test_default_grade_is_blank() {
        let grade = Grade::default();
        assert!(grade.assignment.is_empty());
        assert_eq!(grade.score, 0.0);
        assert_eq!(grade.weight, 0.0);
    }

    #[test]
    fn test_subject_serializes_to_json() {
        let subject = Subject::new("Art", vec![Grade::new("Sketch", 6.0, 1.0)]);
        let json = serde_json::to_value(&subject).unwrap();

        assert_eq!(json["name"], "Art");
        assert_eq!(json["grades"][0]["assignment"], "Sketch");
        assert_eq!(json["grades"][0]["score"], 6.0);
    }
}
