// ✏️ Grade Form - Text buffers behind the add dialog and inline row edits
//
// Numbers are parsed leniently: the longest numeric prefix wins and anything
// unparseable becomes NaN. Ranges (score 1-6, weight 0-1) are hints only.

use crate::grades::Grade;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Assignment,
    Score,
    Weight,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Assignment => FormField::Score,
            FormField::Score => FormField::Weight,
            FormField::Weight => FormField::Assignment,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            FormField::Assignment => FormField::Weight,
            FormField::Score => FormField::Assignment,
            FormField::Weight => FormField::Score,
        }
    }

    /// Placeholder / hint shown next to the input
    pub fn hint(&self) -> &'static str {
        match self {
            FormField::Assignment => "Assignment name",
            FormField::Score => "Score (1-6)",
            FormField::Weight => "Weight (0-1)",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradeForm {
    pub assignment: String,
    pub score: String,
    pub weight: String,
    pub focus: FormField,
}

impl GradeForm {
    /// Empty form for a new grade (score and weight start at 0)
    pub fn blank() -> Self {
        GradeForm::from_grade(&Grade::default())
    }

    /// Form pre-filled with an existing grade. Buffers hold the exact value,
    /// so saving without changes writes back the same grade.
    pub fn from_grade(grade: &Grade) -> Self {
        GradeForm {
            assignment: grade.assignment.clone(),
            score: grade.score.to_string(),
            weight: grade.weight.to_string(),
            focus: FormField::Assignment,
        }
    }

    pub fn to_grade(&self) -> Grade {
        Grade::new(
            self.assignment.clone(),
            parse_number(&self.score),
            parse_number(&self.weight),
        )
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Assignment => &self.assignment,
            FormField::Score => &self.score,
            FormField::Weight => &self.weight,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Assignment => &mut self.assignment,
            FormField::Score => &mut self.score,
            FormField::Weight => &mut self.weight,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        self.focused_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }
}

impl Default for GradeForm {
    fn default() -> Self {
        Self::blank()
    }
}

/// Parse the longest numeric prefix of `input` (after leading whitespace).
///
/// "5.2abc" -> 5.2, "  3" -> 3, "-inf" -> -inf, "abc" / "" / "." -> NaN
pub fn parse_number(input: &str) -> f64 {
    let trimmed = input.trim_start();
    if let Some(infinity) = parse_infinity(trimmed) {
        return infinity;
    }

    let candidate_len = trimmed
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(trimmed.len());
    let candidate = &trimmed[..candidate_len];

    // Candidate is pure ASCII, so every byte offset is a char boundary
    (1..=candidate.len())
        .rev()
        .find_map(|end| candidate[..end].parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Signed "inf" / "infinity" prefix, case-insensitive
fn parse_infinity(input: &str) -> Option<f64> {
    let (sign, rest) = match input.as_bytes().first() {
        Some(b'-') => (-1.0, &input[1..]),
        Some(b'+') => (1.0, &input[1..]),
        _ => (1.0, input),
    };

    let starts_with_inf = rest
        .get(..3)
        .map(|head| head.eq_ignore_ascii_case("inf"))
        .unwrap_or(false);
    starts_with_inf.then_some(sign * f64::INFINITY)
}

/// Shortest readable rendering, for display only: 5.0 -> "5", 0.30000000000000004 -> "0.3"
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }

    let rounded = (value * 1e6).round() / 1e6;
    format!("{}", rounded)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_plain() {
        assert_eq!(parse_number("5.2"), 5.2);
        assert_eq!(parse_number("  3"), 3.0);
        assert_eq!(parse_number("-1.5"), -1.5);
        assert_eq!(parse_number("1e1"), 10.0);
    }

    #[test]
    fn test_parse_number_prefix() {
        assert_eq!(parse_number("5.2abc"), 5.2);
        assert_eq!(parse_number("4.5.6"), 4.5);
        assert_eq!(parse_number("7e"), 7.0);
    }

    #[test]
    fn test_parse_number_garbage_is_nan() {
        assert!(parse_number("").is_nan());
        assert!(parse_number("abc").is_nan());
        assert!(parse_number(".").is_nan());
        assert!(parse_number("in").is_nan());
    }

    #[test]
    fn test_parse_number_infinity() {
        assert_eq!(parse_number("inf"), f64::INFINITY);
        assert_eq!(parse_number("Infinity"), f64::INFINITY);
        assert_eq!(parse_number("-inf"), f64::NEG_INFINITY);
        assert_eq!(parse_number(" +INF"), f64::INFINITY);
    }

    #[test]
    fn test_from_grade_is_lossless() {
        let grades = vec![
            Grade::new("Sketch", 5.00000012, 0.1234567),
            Grade::new("Big", f64::INFINITY, 0.5),
            Grade::new("Sum", 0.1 + 0.2, -0.0),
        ];

        for grade in grades {
            assert_eq!(GradeForm::from_grade(&grade).to_grade(), grade);
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(5.5), "5.5");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_blank_form() {
        let form = GradeForm::blank();
        assert_eq!(form.assignment, "");
        assert_eq!(form.score, "0");
        assert_eq!(form.weight, "0");
        assert_eq!(form.focus, FormField::Assignment);
        assert_eq!(form.to_grade(), Grade::default());
    }

    #[test]
    fn test_typing_into_fields() {
        let mut form = GradeForm::blank();
        for c in "Quiz".chars() {
            form.push_char(c);
        }
        form.focus_next();
        form.backspace();
        for c in "4.8".chars() {
            form.push_char(c);
        }
        form.focus_next();
        form.backspace();
        for c in "0.25".chars() {
            form.push_char(c);
        }

        assert_eq!(form.to_grade(), Grade::new("Quiz", 4.8, 0.25));
    }

    #[test]
    fn test_malformed_score_becomes_nan() {
        let mut form = GradeForm::from_grade(&Grade::new("Essay", 4.6, 0.3));
        form.focus = FormField::Score;
        form.backspace();
        form.backspace();
        form.backspace();

        let grade = form.to_grade();
        assert!(grade.score.is_nan());
        assert_eq!(grade.weight, 0.3);
    }

    #[test]
    fn test_focus_cycles() {
        let mut form = GradeForm::blank();
        form.focus_previous();
        assert_eq!(form.focus, FormField::Weight);
        form.focus_next();
        assert_eq!(form.focus, FormField::Assignment);
    }
}
