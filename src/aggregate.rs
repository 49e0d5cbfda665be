// 🧮 Grade Aggregation - Weighted totals, averages, percentages
//
// Subject total:   weighted sum of scores, rounded to the nearest 0.5
// Overall average: mean of subject totals, rounded to the nearest 0.1
// Percentage:      1-6 scale mapped linearly onto 0-100
//
// Weights are taken as-is. A subject whose weights don't add up to 1 gets
// whatever its raw weighted sum rounds to.

use crate::grades::{Grade, Subject};

/// Lowest value on the grading scale
pub const SCALE_MIN: f64 = 1.0;

/// Highest value on the grading scale
pub const SCALE_MAX: f64 = 6.0;

/// Round half-up to the nearest multiple of `step` (2.25 -> 2.5, -0.25 -> 0).
fn round_to_step(value: f64, step: f64) -> f64 {
    let inverse = 1.0 / step;
    (value * inverse + 0.5).floor() / inverse
}

/// Weighted sum of `score * weight`, rounded to the nearest 0.5.
///
/// An empty list yields 0. NaN scores or weights propagate.
pub fn subject_total(grades: &[Grade]) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }

    let total: f64 = grades.iter().map(Grade::weighted_score).sum();
    round_to_step(total, 0.5)
}

/// Mean of every subject's total, rounded to the nearest 0.1.
///
/// NaN totals count as 0 but still count towards the divisor.
pub fn overall_average(subjects: &[Subject]) -> f64 {
    if subjects.is_empty() {
        return 0.0;
    }

    let sum: f64 = subjects
        .iter()
        .map(|subject| display_value(subject_total(&subject.grades)))
        .sum();

    round_to_step(sum / subjects.len() as f64, 0.1)
}

/// Map a 1-6 grade onto 0-100. NaN and anything below 1 map to 0.
pub fn to_percentage(grade: f64) -> f64 {
    if grade.is_nan() || grade < SCALE_MIN {
        return 0.0;
    }

    let percent = (grade - SCALE_MIN) / (SCALE_MAX - SCALE_MIN) * 100.0;
    percent.clamp(0.0, 100.0)
}

/// Sum of the weights in a subject
pub fn weight_sum(grades: &[Grade]) -> f64 {
    grades.iter().map(|g| g.weight).sum()
}

/// NaN guard for anything shown on screen
pub fn display_value(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

// ============================================================================
// TESTS
// ============================================================================
