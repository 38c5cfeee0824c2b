//! Rule-based narrative analysis and recommendations.
//!
//! Each [`Rule`] looks at the computed statistics and contributes zero or
//! more note fragments and recommendations. Rules run in the fixed order of
//! [`RULES`] and never see each other's output.

use crate::results::NormalizedSubject;

/// How many subject names a list recommendation mentions.
const MAX_NAMED_SUBJECTS: usize = 3;

/// Statistics the rules read.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisInput<'a> {
    pub average: f64,
    pub target: Option<f64>,
    pub difference: f64,
    pub stddev: f64,
    pub count: usize,
    pub passed_count: usize,
    pub pass_percentage: f64,
    pub range: f64,
    pub subjects: &'a [NormalizedSubject],
}

/// What a single rule contributed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    pub notes: Vec<String>,
    pub recommendations: Vec<String>,
}

impl Findings {
    fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    fn recommend(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendations.push(recommendation.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.recommendations.is_empty()
    }
}

/// A named, independent analysis rule.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub evaluate: fn(&AnalysisInput<'_>) -> Findings,
}

/// All rules, in evaluation order.
pub const RULES: [Rule; 7] = [
    Rule {
        name: "average_tier",
        evaluate: average_tier,
    },
    Rule {
        name: "pass_rate_tier",
        evaluate: pass_rate_tier,
    },
    Rule {
        name: "dispersion",
        evaluate: dispersion,
    },
    Rule {
        name: "target",
        evaluate: target,
    },
    Rule {
        name: "range",
        evaluate: range,
    },
    Rule {
        name: "failing_subjects",
        evaluate: failing_subjects,
    },
    Rule {
        name: "excelling_subjects",
        evaluate: excelling_subjects,
    },
];

/// The combined output of every rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    /// Note fragments joined by a single space.
    pub note: String,
    pub recommendations: Vec<String>,
}

/// Run every rule in order and merge their findings.
pub fn generate_analysis(input: &AnalysisInput<'_>) -> Analysis {
    let mut notes = Vec::new();
    let mut recommendations = Vec::new();

    for rule in &RULES {
        let findings = (rule.evaluate)(input);
        tracing::trace!(
            rule = rule.name,
            notes = findings.notes.len(),
            recommendations = findings.recommendations.len(),
            "analysis rule evaluated"
        );
        notes.extend(findings.notes);
        recommendations.extend(findings.recommendations);
    }

    Analysis {
        note: notes.join(" "),
        recommendations,
    }
}

fn average_tier(input: &AnalysisInput<'_>) -> Findings {
    let findings = Findings::default();
    if input.average >= 85.0 {
        findings
            .note("OUTSTANDING PERFORMANCE! The average is in the A category (Excellent).")
            .recommend("Keep up the consistency and focus on personal growth")
    } else if input.average >= 75.0 {
        findings
            .note("GOOD performance. The average meets the common KKM standard.")
            .recommend("Identify the lowest-scoring subjects to improve")
    } else if input.average >= 65.0 {
        findings
            .note("FAIR performance. Some subjects may need special attention.")
            .recommend("Focus on the subjects with the largest negative gap to their KKM")
    } else {
        findings
            .note("SIGNIFICANT IMPROVEMENT needed. The average is below the minimum standard.")
            .recommend("Consult your teachers for an intensive study plan")
    }
}

fn pass_rate_tier(input: &AnalysisInput<'_>) -> Findings {
    let findings = Findings::default();
    let pct = input.pass_percentage;
    let failing = input.count - input.passed_count;
    if pct >= 90.0 {
        findings
            .note(format!("VERY HIGH PASS RATE ({pct:.1}%)."))
            .recommend("Keep focusing on every subject")
    } else if pct >= 70.0 {
        findings
            .note(format!("ADEQUATE pass rate ({pct:.1}%)."))
            .recommend(format!(
                "Improve the {failing} subject(s) that have not passed yet"
            ))
    } else {
        findings
            .note(format!("LOW PASS RATE ({pct:.1}%)."))
            .recommend(format!("Prioritize remedial work for {failing} subject(s)"))
    }
}

fn dispersion(input: &AnalysisInput<'_>) -> Findings {
    let findings = Findings::default();
    if input.stddev > 15.0 {
        findings
            .note("HIGH VARIANCE: scores differ significantly between subjects.")
            .recommend("Balance study time across all subjects")
    } else if input.stddev < 5.0 {
        findings
            .note("GOOD CONSISTENCY: scores are spread evenly across subjects.")
            .recommend("Maintain the current study balance")
    } else {
        findings
    }
}

fn target(input: &AnalysisInput<'_>) -> Findings {
    let findings = Findings::default();
    if input.target.is_none() {
        return findings;
    }
    let diff = input.difference;
    if diff >= 5.0 {
        findings
            .note(format!("TARGET EXCEEDED! Above target by {diff:.1} points."))
            .recommend("Set a higher target for extra motivation")
    } else if diff >= 0.0 {
        findings
            .note(format!("Target met with a margin of {diff:.1} points."))
            .recommend("Hold steady and raise the next target slightly")
    } else {
        findings
            .note(format!("Target not met yet. Short by {:.1} points.", diff.abs()))
            .recommend("Review your study strategy to reach the target")
    }
}

fn range(input: &AnalysisInput<'_>) -> Findings {
    let findings = Findings::default();
    if input.range > 40.0 {
        findings
            .note("VERY WIDE SCORE RANGE: the gap between the highest and lowest score is significant.")
            .recommend("Focus on the lowest-scoring subjects")
    } else {
        findings
    }
}

fn failing_subjects(input: &AnalysisInput<'_>) -> Findings {
    let names = first_names(input.subjects.iter().filter(|s| !s.passed()));
    if names.is_empty() {
        Findings::default()
    } else {
        Findings::default().recommend(format!("Prioritize remedial work for: {names}"))
    }
}

fn excelling_subjects(input: &AnalysisInput<'_>) -> Findings {
    let names = first_names(input.subjects.iter().filter(|s| s.score >= 90.0));
    if names.is_empty() {
        Findings::default()
    } else {
        Findings::default().recommend(format!("Keep excelling in: {names}"))
    }
}

fn first_names<'a>(subjects: impl Iterator<Item = &'a NormalizedSubject>) -> String {
    subjects
        .take(MAX_NAMED_SUBJECTS)
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
