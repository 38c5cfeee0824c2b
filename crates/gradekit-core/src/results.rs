//! Computed results types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::grade::{Grade, GradeDistribution, StatusMark};

/// A subject after numeric coercion: always has a concrete score and KKM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSubject {
    pub id: u32,
    pub name: String,
    pub score: f64,
    pub kkm: i64,
}

impl NormalizedSubject {
    /// Score minus KKM; negative when the subject failed.
    pub fn difference(&self) -> f64 {
        self.score - self.kkm as f64
    }

    pub fn passed(&self) -> bool {
        self.score >= self.kkm as f64
    }

    pub fn grade(&self) -> Grade {
        Grade::classify(self.score, self.kkm)
    }

    pub fn status_mark(&self) -> StatusMark {
        StatusMark::classify(self.score, self.kkm)
    }
}

/// The output of one statistics run.
///
/// Never updated in place: a new calculation produces a new summary that
/// replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsSummary {
    /// Arithmetic mean of all scores.
    pub average: f64,
    /// Target average, if one was given and parsed.
    pub target: Option<f64>,
    /// `average - target`, or 0 without a target.
    pub difference: f64,
    pub highest: f64,
    pub lowest: f64,
    /// Population standard deviation.
    pub stddev: f64,
    /// Number of subjects analysed.
    pub count: usize,
    /// Sum of all scores.
    pub total: f64,
    /// Subjects with `score >= kkm`.
    pub passed_count: usize,
    /// `passed_count / count * 100`.
    pub pass_percentage: f64,
    /// `highest - lowest`.
    pub range: f64,
    /// The normalized subjects, in input order.
    pub subjects: Vec<NormalizedSubject>,
    /// Narrative analysis.
    pub analysis_note: String,
    /// Ordered recommendations.
    pub recommendations: Vec<String>,
    /// When the summary was generated.
    pub timestamp: DateTime<Utc>,
}

impl ResultsSummary {
    /// Returns true if there was no valid data to analyse.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn failed_count(&self) -> usize {
        self.count - self.passed_count
    }

    /// Whether the target average was reached, if a target was set.
    pub fn met_target(&self) -> Option<bool> {
        self.target.map(|_| self.difference >= 0.0)
    }

    pub fn failed_subjects(&self) -> impl Iterator<Item = &NormalizedSubject> {
        self.subjects.iter().filter(|s| !s.passed())
    }

    pub fn grade_distribution(&self) -> GradeDistribution {
        GradeDistribution::from_grades(self.subjects.iter().map(NormalizedSubject::grade))
    }
}
