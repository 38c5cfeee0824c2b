//! Core data model types for gradekit.
//!
//! A [`Gradebook`] pairs the editable list of [`SubjectRecord`]s with the
//! [`GlobalSettings`] that apply to all of them. Raw user input is kept as
//! [`RawInput`] until validation or normalization decides what it means.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GradebookError;

/// KKM used when none is given or the given value is malformed.
pub const DEFAULT_KKM: i64 = 75;

/// Lowest accepted score, KKM or target average.
pub const MIN_SCORE: f64 = 0.0;

/// Highest accepted score, KKM or target average.
pub const MAX_SCORE: f64 = 100.0;

/// A numeric field exactly as the user entered it.
///
/// Accepts numbers and numeric strings alike so that `score = 84.5` and
/// `score = "84.5"` mean the same thing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInput {
    /// Nothing entered yet.
    #[default]
    Empty,
    /// A numeric literal.
    Number(f64),
    /// Free text, possibly numeric.
    Text(String),
}

impl RawInput {
    /// Returns `true` if nothing (or only whitespace) was entered.
    pub fn is_empty(&self) -> bool {
        match self {
            RawInput::Empty => true,
            RawInput::Number(_) => false,
            RawInput::Text(s) => s.trim().is_empty(),
        }
    }

    /// Parse as a finite floating-point number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawInput::Empty => None,
            RawInput::Number(n) => Some(*n),
            RawInput::Text(s) => s.trim().parse::<f64>().ok(),
        }
        .filter(|n| n.is_finite())
    }

    /// Parse as an integer, truncating fractional values toward zero.
    pub fn as_i64(&self) -> Option<i64> {
        if let RawInput::Text(s) = self {
            if let Ok(n) = s.trim().parse::<i64>() {
                return Some(n);
            }
        }
        self.as_f64().map(|n| n.trunc() as i64)
    }
}

impl fmt::Display for RawInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawInput::Empty => Ok(()),
            RawInput::Number(n) => write!(f, "{n}"),
            RawInput::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for RawInput {
    fn from(n: f64) -> Self {
        RawInput::Number(n)
    }
}

impl From<i64> for RawInput {
    fn from(n: i64) -> Self {
        RawInput::Number(n as f64)
    }
}

impl From<i32> for RawInput {
    fn from(n: i32) -> Self {
        RawInput::Number(n as f64)
    }
}

impl From<&str> for RawInput {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            RawInput::Empty
        } else {
            RawInput::Text(s.to_string())
        }
    }
}

impl From<String> for RawInput {
    fn from(s: String) -> Self {
        RawInput::from(s.as_str())
    }
}

impl<T: Into<RawInput>> From<Option<T>> for RawInput {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// One gradable subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRecord {
    /// Stable identity, unique within a gradebook.
    pub id: u32,
    /// Display name. Mutable and not unique.
    #[serde(default)]
    pub name: String,
    /// Score in [0, 100], or empty until entered.
    #[serde(default, skip_serializing_if = "RawInput::is_empty")]
    pub score: RawInput,
    /// Minimum passing threshold for this subject.
    #[serde(default = "default_kkm_input", skip_serializing_if = "RawInput::is_empty")]
    pub kkm: RawInput,
}

impl SubjectRecord {
    /// Create a record with no score and the default KKM.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            score: RawInput::Empty,
            kkm: default_kkm_input(),
        }
    }

    pub fn with_score(mut self, score: impl Into<RawInput>) -> Self {
        self.score = score.into();
        self
    }

    pub fn with_kkm(mut self, kkm: impl Into<RawInput>) -> Self {
        self.kkm = kkm.into();
        self
    }
}

fn default_kkm_input() -> RawInput {
    RawInput::from(DEFAULT_KKM)
}

/// Settings shared by every subject in a gradebook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Optional target average in [0, 100].
    #[serde(default, skip_serializing_if = "RawInput::is_empty")]
    pub target_average: RawInput,
    /// KKM applied to every subject while `use_global_kkm` is set.
    #[serde(default = "default_kkm")]
    pub global_kkm: i64,
    /// When set, per-subject KKM values are overwritten by `global_kkm`.
    #[serde(default)]
    pub use_global_kkm: bool,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            target_average: RawInput::Empty,
            global_kkm: DEFAULT_KKM,
            use_global_kkm: false,
        }
    }
}

fn default_kkm() -> i64 {
    DEFAULT_KKM
}

/// The editable record list together with its global settings.
///
/// Always holds at least one subject, and subject ids are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradebook {
    settings: GlobalSettings,
    subjects: Vec<SubjectRecord>,
}

impl Gradebook {
    /// Build a gradebook, checking the at-least-one and unique-id invariants.
    ///
    /// If `use_global_kkm` is set, the global KKM is applied to every subject.
    pub fn new(
        settings: GlobalSettings,
        subjects: Vec<SubjectRecord>,
    ) -> Result<Self, GradebookError> {
        if subjects.is_empty() {
            return Err(GradebookError::Empty);
        }
        check_kkm_range(settings.global_kkm)?;

        let mut seen = std::collections::HashSet::new();
        for subject in &subjects {
            if !seen.insert(subject.id) {
                return Err(GradebookError::DuplicateId(subject.id));
            }
        }

        let mut gradebook = Self { settings, subjects };
        if gradebook.settings.use_global_kkm {
            gradebook.apply_global_kkm();
        }
        Ok(gradebook)
    }

    pub fn settings(&self) -> &GlobalSettings {
        &self.settings
    }

    pub fn subjects(&self) -> &[SubjectRecord] {
        &self.subjects
    }

    pub fn subject(&self, id: u32) -> Option<&SubjectRecord> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn target_average(&self) -> &RawInput {
        &self.settings.target_average
    }

    pub fn global_kkm(&self) -> i64 {
        self.settings.global_kkm
    }

    pub fn use_global_kkm(&self) -> bool {
        self.settings.use_global_kkm
    }

    /// The id the next added subject will get: one past the largest id.
    ///
    /// Fails once the largest id is `u32::MAX`.
    pub fn next_id(&self) -> Result<u32, GradebookError> {
        match self.subjects.iter().map(|s| s.id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or(GradebookError::IdSpaceExhausted),
        }
    }

    /// Append a new subject that inherits the current global KKM.
    pub fn add_subject(&mut self) -> Result<u32, GradebookError> {
        let id = self.next_id()?;
        self.subjects.push(
            SubjectRecord::new(id, format!("Subject {id}")).with_kkm(self.settings.global_kkm),
        );
        tracing::debug!(id, "added subject");
        Ok(id)
    }

    /// Remove a subject by id.
    ///
    /// Removing the only remaining subject is rejected and leaves the list
    /// unchanged.
    pub fn remove_subject(&mut self, id: u32) -> Result<SubjectRecord, GradebookError> {
        let index = self
            .subjects
            .iter()
            .position(|s| s.id == id)
            .ok_or(GradebookError::UnknownSubject(id))?;
        if self.subjects.len() == 1 {
            return Err(GradebookError::LastSubject);
        }
        tracing::debug!(id, "removed subject");
        Ok(self.subjects.remove(index))
    }

    pub fn rename_subject(&mut self, id: u32, name: impl Into<String>) -> Result<(), GradebookError> {
        self.subject_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn set_score(&mut self, id: u32, score: impl Into<RawInput>) -> Result<(), GradebookError> {
        self.subject_mut(id)?.score = score.into();
        Ok(())
    }

    /// Override one subject's KKM. Rejected while the global KKM is in force.
    pub fn set_kkm(&mut self, id: u32, kkm: impl Into<RawInput>) -> Result<(), GradebookError> {
        if self.settings.use_global_kkm {
            return Err(GradebookError::KkmLocked(id));
        }
        self.subject_mut(id)?.kkm = kkm.into();
        Ok(())
    }

    pub fn set_target_average(&mut self, target: impl Into<RawInput>) {
        self.settings.target_average = target.into();
    }

    /// Toggle the global KKM. Turning it on overwrites every subject's KKM.
    pub fn set_use_global_kkm(&mut self, enabled: bool) {
        self.settings.use_global_kkm = enabled;
        if enabled {
            self.apply_global_kkm();
        }
    }

    /// Change the global KKM, propagating it to every subject if it is in force.
    pub fn set_global_kkm(&mut self, kkm: i64) -> Result<(), GradebookError> {
        check_kkm_range(kkm)?;
        self.settings.global_kkm = kkm;
        if self.settings.use_global_kkm {
            self.apply_global_kkm();
        }
        Ok(())
    }

    fn apply_global_kkm(&mut self) {
        let kkm = RawInput::from(self.settings.global_kkm);
        for subject in &mut self.subjects {
            subject.kkm = kkm.clone();
        }
    }

    fn subject_mut(&mut self, id: u32) -> Result<&mut SubjectRecord, GradebookError> {
        self.subjects
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(GradebookError::UnknownSubject(id))
    }
}

impl Default for Gradebook {
    /// The starter sheet: four science subjects, no scores, global KKM on.
    fn default() -> Self {
        let subjects = vec![
            SubjectRecord::new(1, "Mathematics").with_kkm(75),
            SubjectRecord::new(2, "Physics").with_kkm(70),
            SubjectRecord::new(3, "Chemistry").with_kkm(70),
            SubjectRecord::new(4, "Biology").with_kkm(70),
        ];
        let mut gradebook = Self {
            settings: GlobalSettings::default(),
            subjects,
        };
        gradebook.set_use_global_kkm(true);
        gradebook
    }
}

fn check_kkm_range(kkm: i64) -> Result<(), GradebookError> {
    if (MIN_SCORE as i64..=MAX_SCORE as i64).contains(&kkm) {
        Ok(())
    } else {
        Err(GradebookError::KkmOutOfRange(kkm))
    }
}
