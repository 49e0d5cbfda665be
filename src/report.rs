// 📊 Grade Report - Snapshot of a gradebook for the summary command

use crate::aggregate::{display_value, to_percentage};
use crate::form::format_number;
use crate::gradebook::Gradebook;
use crate::grades::Grade;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SubjectReport {
    pub name: String,
    pub total: f64,
    pub percentage: f64,
    pub grades: Vec<Grade>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeReport {
    pub subjects: Vec<SubjectReport>,
    pub overall_average: f64,
    pub overall_percentage: f64,
}

impl GradeReport {
    pub fn from_gradebook(book: &Gradebook) -> Self {
        let subjects = book
            .subjects()
            .iter()
            .map(|subject| {
                let total = subject.total();
                SubjectReport {
                    name: subject.name.clone(),
                    total: display_value(total),
                    percentage: to_percentage(total),
                    grades: subject.grades.clone(),
                }
            })
            .collect();

        let overall_average = book.overall_average();
        GradeReport {
            subjects,
            overall_average: display_value(overall_average),
            overall_percentage: to_percentage(overall_average),
        }
    }

    /// Plain-text table, one line per subject plus the overall line
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{:<20} {:>7} {:>8}\n", "Subject", "Grade", "Percent"));
        out.push_str(&format!("{}\n", "─".repeat(37)));

        for subject in &self.subjects {
            out.push_str(&format!(
                "{:<20} {:>7} {:>7.0}%\n",
                subject.name,
                format_number(subject.total),
                subject.percentage
            ));
        }

        out.push_str(&format!("{}\n", "─".repeat(37)));
        out.push_str(&format!(
            "{:<20} {:>7} {:>7.0}%\n",
            "Overall average",
            format_number(self.overall_average),
            self.overall_percentage
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grades::Subject;

    #[test]
    fn test_report_from_seed() {
        let report = GradeReport::from_gradebook(&Gradebook::seeded());

        assert_eq!(report.subjects.len(), 3);
        assert_eq!(report.subjects[0].total, 5.5);
        assert_eq!(report.subjects[0].percentage, 90.0);
        assert_eq!(report.subjects[2].total, 5.0);
        assert_eq!(report.overall_average, 5.3);
    }

    #[test]
    fn test_report_guards_nan() {
        let book = Gradebook::new(vec![Subject::new(
            "Broken",
            vec![Grade::new("Exam", f64::NAN, 1.0)],
        )]);
        let report = GradeReport::from_gradebook(&book);

        assert_eq!(report.subjects[0].total, 0.0);
        assert_eq!(report.subjects[0].percentage, 0.0);
        assert_eq!(report.overall_average, 0.0);
    }

    #[test]
    fn test_report_text_and_json() {
        let report = GradeReport::from_gradebook(&Gradebook::seeded());

        let text = report.to_text();
        assert!(text.contains("Mathematics"));
        assert!(text.contains("Overall average"));
        assert!(text.contains("5.3"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["overall_average"], 5.3);
        assert_eq!(json["subjects"][1]["name"], "Science");
        assert_eq!(json["subjects"][1]["grades"][0]["assignment"], "Lab Report");
    }
}
