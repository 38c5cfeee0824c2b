//! Per-subject grade categories and status marks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Letter category of a single subject's score relative to its KKM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    C,
    D,
}

impl Grade {
    /// All grades, best first.
    pub const ALL: [Grade; 5] = [Grade::A, Grade::BPlus, Grade::B, Grade::C, Grade::D];

    /// Classify a score against its KKM. The first matching tier wins.
    pub fn classify(score: f64, kkm: i64) -> Self {
        let kkm = kkm as f64;
        if score >= 85.0 {
            Grade::A
        } else if score >= kkm + 15.0 {
            Grade::BPlus
        } else if score >= kkm {
            Grade::B
        } else if score >= kkm - 10.0 {
            Grade::C
        } else {
            Grade::D
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Grade::A => "Excellent",
            Grade::BPlus => "Very Good",
            Grade::B => "Good",
            Grade::C => "Fair",
            Grade::D => "Needs Remedial",
        }
    }

    fn index(self) -> usize {
        match self {
            Grade::A => 0,
            Grade::BPlus => 1,
            Grade::B => 2,
            Grade::C => 3,
            Grade::D => 4,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::BPlus => write!(f, "B+"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
        }
    }
}

/// How far above or below its KKM a subject landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusMark {
    /// At least 20 points above KKM.
    Outstanding,
    /// At least 10 points above KKM.
    Strong,
    Passed,
    /// Less than 5 points below KKM.
    Borderline,
    Failed,
}

impl StatusMark {
    pub fn classify(score: f64, kkm: i64) -> Self {
        let kkm = kkm as f64;
        if score >= kkm + 20.0 {
            StatusMark::Outstanding
        } else if score >= kkm + 10.0 {
            StatusMark::Strong
        } else if score >= kkm {
            StatusMark::Passed
        } else if score >= kkm - 5.0 {
            StatusMark::Borderline
        } else {
            StatusMark::Failed
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            StatusMark::Outstanding => "🏆",
            StatusMark::Strong => "⭐",
            StatusMark::Passed => "✅",
            StatusMark::Borderline => "⚠️",
            StatusMark::Failed => "❌",
        }
    }
}

/// Number of subjects in each grade category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeDistribution {
    counts: [usize; 5],
}

impl GradeDistribution {
    pub fn from_grades(grades: impl IntoIterator<Item = Grade>) -> Self {
        let mut dist = Self::default();
        for grade in grades {
            dist.counts[grade.index()] += 1;
        }
        dist
    }

    pub fn count(&self, grade: Grade) -> usize {
        self.counts[grade.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(grade, count)` pairs, best grade first.
    pub fn iter(&self) -> impl Iterator<Item = (Grade, usize)> + '_ {
        Grade::ALL.iter().map(|g| (*g, self.count(*g)))
    }
}
