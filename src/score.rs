//! RYG scoring: six fixed axes rolled up to a worst-color overall.

use crate::models::source::SourceFile;
use crate::models::Grade;

/// Axis labels in report order. Axis meanings: 1 mechanical executability,
/// 2 contract completeness, 3 dependency closure, 4 determinism and data
/// integrity, 5 operability, 6 security and trust boundaries.
pub const PASS_LABELS: [&str; 6] = [
    "Pass 1", "Pass 2", "Pass 3", "Pass 4", "Pass 5", "Pass 6",
];

#[derive(Debug, Clone, Copy, Default)]
/// Presence flags for the card sections that feed scoring.
pub struct SectionPresence {
    pub purpose: bool,
    pub produces: bool,
    pub consumes: bool,
}

#[derive(Debug, Clone, Copy)]
/// Grades for the six axes of one runbook, in `PASS_LABELS` order.
pub struct PassScores(pub [Grade; 6]);

impl PassScores {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Grade)> + '_ {
        PASS_LABELS.iter().copied().zip(self.0)
    }
}

/// Evaluate the six axes from detection and section presence flags.
pub fn compute_passes(fd: &SourceFile, sections: SectionPresence) -> PassScores {
    let has_verification = !fd.verifications.is_empty();
    let has_rest_or_ipc = !fd.rest.is_empty() || !fd.ipc.is_empty();
    let has_schema = !fd.schemas.is_empty();

    // Pass 1: mechanical executability.
    let p1 = if !has_verification {
        Grade::Red
    } else if !(sections.purpose && sections.produces && sections.consumes) {
        Grade::Yellow
    } else {
        Grade::Green
    };

    // Pass 2: contract completeness. The non-red branches both land on
    // yellow — the schema-present case is not differentiated yet.
    let p2 = if has_rest_or_ipc && !has_schema {
        Grade::Red
    } else {
        Grade::Yellow
    };

    // Pass 3: dependency closure.
    let p3 = if !sections.consumes {
        Grade::Red
    } else if !sections.produces {
        Grade::Yellow
    } else {
        Grade::Green
    };

    // Pass 4: determinism and data integrity. No differentiating signal is
    // wired up yet; every input lands on yellow.
    let p4 = Grade::Yellow;

    // Pass 5: operability.
    let p5 = if !has_verification {
        Grade::Red
    } else {
        Grade::Yellow
    };

    // Pass 6: security and trust boundaries. Same placeholder state as
    // pass 4.
    let p6 = Grade::Yellow;

    PassScores([p1, p2, p3, p4, p5, p6])
}

/// Worst color across the axes; UNSPECIFIED only when nothing is graded.
pub fn overall(scores: &PassScores) -> Grade {
    let colors = &scores.0;
    if colors.contains(&Grade::Red) {
        Grade::Red
    } else if colors.contains(&Grade::Yellow) {
        Grade::Yellow
    } else if colors.contains(&Grade::Green) {
        Grade::Green
    } else {
        Grade::Unspecified
    }
}
