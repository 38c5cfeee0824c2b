//! Input validation.
//!
//! Every record is checked independently and every problem is reported, in
//! discovery order. Validation never coerces: see
//! [`crate::statistics::normalize`] for the defaulting path.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Gradebook, RawInput, SubjectRecord, DEFAULT_KKM, MAX_SCORE, MIN_SCORE};

/// Longest accepted subject name, in characters, after trimming.
pub const MAX_NAME_LEN: usize = 50;

/// The input field a validation issue refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Score,
    Kkm,
    TargetAverage,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Score => write!(f, "score"),
            Field::Kkm => write!(f, "kkm"),
            Field::TargetAverage => write!(f, "target_average"),
        }
    }
}

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Position of the offending record (`None` for global settings).
    pub index: Option<usize>,
    /// Which field failed.
    pub field: Field,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn in_range(value: f64) -> bool {
    (MIN_SCORE..=MAX_SCORE).contains(&value)
}

pub fn is_valid_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= MAX_NAME_LEN
}

pub fn is_valid_score(score: &RawInput) -> bool {
    score.as_f64().is_some_and(in_range)
}

/// A KKM is valid once malformed input has been replaced by the default.
pub fn is_valid_kkm(kkm: &RawInput) -> bool {
    in_range(kkm.as_i64().unwrap_or(DEFAULT_KKM) as f64)
}

/// Validate a record list and an optional target average.
///
/// Returns an empty list when the input is valid.
pub fn validate(records: &[SubjectRecord], target_average: &RawInput) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let issue = |field, message| ValidationIssue {
            index: Some(index),
            field,
            message,
        };

        let name = record.name.trim();
        if name.is_empty() {
            issues.push(issue(
                Field::Name,
                format!("Subject name #{} cannot be empty", index + 1),
            ));
        } else if name.chars().count() > MAX_NAME_LEN {
            issues.push(issue(
                Field::Name,
                format!(
                    "Subject name #{} must be at most {MAX_NAME_LEN} characters",
                    index + 1
                ),
            ));
        }

        match record.score.as_f64() {
            None => issues.push(issue(
                Field::Score,
                format!("Score for \"{}\" must be a number", record.name),
            )),
            Some(score) if !in_range(score) => issues.push(issue(
                Field::Score,
                format!("Score for \"{}\" must be between 0-100", record.name),
            )),
            Some(_) => {}
        }

        if !is_valid_kkm(&record.kkm) {
            issues.push(issue(
                Field::Kkm,
                format!("KKM for \"{}\" must be between 0-100", record.name),
            ));
        }
    }

    if !target_average.is_empty() {
        let message = match target_average.as_f64() {
            None => Some("Target average must be a number"),
            Some(target) if !in_range(target) => Some("Target average must be between 0-100"),
            Some(_) => None,
        };
        if let Some(message) = message {
            issues.push(ValidationIssue {
                index: None,
                field: Field::TargetAverage,
                message: message.to_string(),
            });
        }
    }

    issues
}

/// Validate a whole gradebook.
pub fn validate_gradebook(gradebook: &Gradebook) -> Vec<ValidationIssue> {
    validate(gradebook.subjects(), gradebook.target_average())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, name: &str, score: &str, kkm: i64) -> SubjectRecord {
        SubjectRecord::new(id, name).with_score(score).with_kkm(kkm)
    }

    #[test]
    fn valid_input_has_no_issues() {
        let records = vec![
            record(1, "Mathematics", "80", 75),
            record(2, "Physics", "60.5", 70),
        ];
        assert!(validate(&records, &RawInput::from("80")).is_empty());
        assert!(validate(&records, &RawInput::Empty).is_empty());
    }

    #[test]
    fn blank_name_rejected() {
        let issues = validate(&[record(1, "   ", "80", 75)], &RawInput::Empty);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, Field::Name);
        assert_eq!(issues[0].message, "Subject name #1 cannot be empty");
    }

    #[test]
    fn overlong_name_rejected() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        let issues = validate(&[record(1, &long, "80", 75)], &RawInput::Empty);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("at most 50"));

        // Surrounding whitespace does not count.
        let padded = format!("  {}  ", "x".repeat(MAX_NAME_LEN));
        assert!(validate(&[record(1, &padded, "80", 75)], &RawInput::Empty).is_empty());
    }

    #[test]
    fn score_must_be_number_in_range() {
        let issues = validate(
            &[
                record(1, "Empty", "", 75),
                record(2, "Text", "abc", 75),
                record(3, "High", "100.5", 75),
                record(4, "Low", "-1", 75),
                record(5, "Edge", "100", 75),
            ],
            &RawInput::Empty,
        );
        let messages: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Score for \"Empty\" must be a number",
                "Score for \"Text\" must be a number",
                "Score for \"High\" must be between 0-100",
                "Score for \"Low\" must be between 0-100",
            ]
        );
    }

    #[test]
    fn malformed_kkm_is_defaulted_not_rejected() {
        let r = SubjectRecord::new(1, "Art").with_score(80.0).with_kkm("abc");
        assert!(validate(&[r], &RawInput::Empty).is_empty());

        let r = SubjectRecord::new(1, "Art").with_score(80.0).with_kkm(150);
        let issues = validate(&[r], &RawInput::Empty);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, Field::Kkm);
        assert_eq!(issues[0].message, "KKM for \"Art\" must be between 0-100");
    }

    #[test]
    fn target_average_checked_only_when_present() {
        let records = vec![record(1, "Mathematics", "80", 75)];
        assert!(validate(&records, &RawInput::from("  ")).is_empty());

        let issues = validate(&records, &RawInput::from("high"));
        assert_eq!(issues[0].message, "Target average must be a number");
        assert_eq!(issues[0].index, None);

        let issues = validate(&records, &RawInput::from(120.0));
        assert_eq!(issues[0].message, "Target average must be between 0-100");
    }

    #[test]
    fn collects_every_issue_in_order() {
        let records = vec![
            record(1, "", "x", 75),
            record(2, "Physics", "101", 200),
            record(3, "Chemistry", "", 75),
        ];
        let issues = validate(&records, &RawInput::from("nope"));
        assert!(issues.len() >= records.len());
        let fields: Vec<(Option<usize>, Field)> =
            issues.iter().map(|i| (i.index, i.field)).collect();
        assert_eq!(
            fields,
            vec![
                (Some(0), Field::Name),
                (Some(0), Field::Score),
                (Some(1), Field::Score),
                (Some(1), Field::Kkm),
                (Some(2), Field::Score),
                (None, Field::TargetAverage),
            ]
        );
    }

    #[test]
    fn single_field_predicates() {
        assert!(is_valid_name("Biology"));
        assert!(!is_valid_name(""));
        assert!(is_valid_score(&RawInput::from("0")));
        assert!(!is_valid_score(&RawInput::Empty));
        assert!(is_valid_kkm(&RawInput::Empty));
        assert!(!is_valid_kkm(&RawInput::from(-5)));
    }
}
