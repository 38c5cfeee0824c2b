//! Grade statistics engine.
//!
//! [`compute_statistics`] is a pure function from a record list and an
//! optional target average to a [`ResultsSummary`]. It never fails: fields
//! that do not parse are coerced by [`normalize`] instead of rejected, so
//! callers are expected to run [`crate::validate::validate`] first.

use chrono::{DateTime, Utc};

use crate::analysis::{generate_analysis, AnalysisInput};
use crate::model::{RawInput, SubjectRecord, DEFAULT_KKM};
use crate::results::{NormalizedSubject, ResultsSummary};

/// Note used when there is nothing to analyse.
pub const NO_DATA_NOTE: &str = "No valid score data to analyze.";

/// Recommendations used when there is nothing to analyse.
pub const NO_DATA_RECOMMENDATIONS: [&str; 2] = [
    "Enter a score for at least one subject",
    "Make sure scores are numbers between 0 and 100",
];

/// Coerce a raw record into concrete numbers.
///
/// A score that does not parse becomes `0.0`; a KKM that does not parse
/// becomes [`DEFAULT_KKM`].
pub fn normalize(record: &SubjectRecord) -> NormalizedSubject {
    NormalizedSubject {
        id: record.id,
        name: record.name.clone(),
        score: record.score.as_f64().unwrap_or(0.0),
        kkm: record.kkm.as_i64().unwrap_or(DEFAULT_KKM),
    }
}

/// Compute a results summary stamped with the current time.
pub fn compute_statistics(records: &[SubjectRecord], target_average: &RawInput) -> ResultsSummary {
    compute_statistics_at(records, target_average, Utc::now())
}

/// Compute a results summary with an explicit timestamp.
pub fn compute_statistics_at(
    records: &[SubjectRecord],
    target_average: &RawInput,
    timestamp: DateTime<Utc>,
) -> ResultsSummary {
    let subjects: Vec<NormalizedSubject> = records
        .iter()
        .map(normalize)
        .filter(|s| s.score.is_finite())
        .collect();
    let target = target_average.as_f64();

    if subjects.is_empty() {
        return empty_summary(target, timestamp);
    }

    let count = subjects.len();
    let n = count as f64;

    let total: f64 = subjects.iter().map(|s| s.score).sum();
    let average = total / n;

    let highest = subjects
        .iter()
        .map(|s| s.score)
        .fold(f64::NEG_INFINITY, f64::max);
    let lowest = subjects
        .iter()
        .map(|s| s.score)
        .fold(f64::INFINITY, f64::min);
    let range = highest - lowest;

    let variance = subjects
        .iter()
        .map(|s| (s.score - average).powi(2))
        .sum::<f64>()
        / n;
    let stddev = variance.sqrt();

    let passed_count = subjects.iter().filter(|s| s.passed()).count();
    let pass_percentage = passed_count as f64 / n * 100.0;

    let difference = target.map_or(0.0, |t| average - t);

    let analysis = generate_analysis(&AnalysisInput {
        average,
        target,
        difference,
        stddev,
        count,
        passed_count,
        pass_percentage,
        range,
        subjects: &subjects,
    });

    tracing::debug!(
        count,
        average,
        passed_count,
        stddev,
        "computed grade statistics"
    );

    ResultsSummary {
        average,
        target,
        difference,
        highest,
        lowest,
        stddev,
        count,
        total,
        passed_count,
        pass_percentage,
        range,
        subjects,
        analysis_note: analysis.note,
        recommendations: analysis.recommendations,
        timestamp,
    }
}

fn empty_summary(target: Option<f64>, timestamp: DateTime<Utc>) -> ResultsSummary {
    ResultsSummary {
        average: 0.0,
        target,
        difference: 0.0,
        highest: 0.0,
        lowest: 0.0,
        stddev: 0.0,
        count: 0,
        total: 0.0,
        passed_count: 0,
        pass_percentage: 0.0,
        range: 0.0,
        subjects: Vec::new(),
        analysis_note: NO_DATA_NOTE.to_string(),
        recommendations: NO_DATA_RECOMMENDATIONS.iter().map(|r| r.to_string()).collect(),
        timestamp,
    }
}
