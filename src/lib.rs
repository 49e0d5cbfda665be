// Grade Tracker - Core Library
// Grade model, weighted aggregation and in-memory gradebook used by the TUI and summary mode

pub mod grades;
pub mod aggregate;
pub mod gradebook;
pub mod error;
pub mod form;
pub mod report;
pub mod theme;
pub mod config;
pub mod logging;

// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use grades::{Grade, Subject, seed_subjects};
pub use aggregate::{
    subject_total, overall_average, to_percentage, weight_sum, display_value,
};
pub use gradebook::Gradebook;
pub use error::GradebookError;
pub use form::{GradeForm, FormField, parse_number, format_number};
pub use theme::{Theme, ThemeMode};
pub use config::Config;
pub use report::{GradeReport, SubjectReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
