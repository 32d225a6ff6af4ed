use std::collections::HashMap;

use uuid::Uuid;

use riskform_core::models::{
    GroupScore, OverallScore, RiskRating, ScoreSet, Snapshot, SnapshotGroup, SnapshotType,
    TypeScore,
};

/// Thresholds applied to the overall percentage. No "overall type" record
/// exists to carry configurable ones.
pub const OVERALL_THRESHOLD_HIGH: i64 = 80;
pub const OVERALL_THRESHOLD_MEDIUM: i64 = 50;

/// Round half-up to two decimal places. Applied at every level before the
/// value feeds the next aggregation up, so rounding drift compounds in a
/// fixed, reproducible order.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// LOW when at or above the high threshold, MEDIUM at or above the medium
/// threshold, HIGH below both.
pub fn calculate_risk_rating(
    percentage: f64,
    threshold_high: i64,
    threshold_medium: i64,
) -> RiskRating {
    if percentage >= threshold_high as f64 {
        RiskRating::Low
    } else if percentage >= threshold_medium as f64 {
        RiskRating::Medium
    } else {
        RiskRating::High
    }
}

/// Score one group from the awarded answer scores.
///
/// The max contribution of a question is the larger of its two option scores;
/// an unanswered question contributes zero raw points. Group risk rating
/// reuses the owning type's thresholds — groups carry no thresholds of their
/// own, by design.
pub fn score_group(
    group: &SnapshotGroup,
    answers: &HashMap<Uuid, i64>,
    threshold_high: i64,
    threshold_medium: i64,
) -> GroupScore {
    let mut raw_score = 0;
    let mut max_score = 0;

    for question in &group.questions {
        max_score += question.max_score();
        if let Some(awarded) = answers.get(&question.id) {
            raw_score += awarded;
        }
    }

    let percentage = if max_score > 0 {
        round2(raw_score as f64 / max_score as f64 * 100.0)
    } else {
        0.0
    };

    GroupScore {
        group_id: group.id,
        group_name: group.name.clone(),
        raw_score,
        max_score,
        percentage,
        risk_rating: calculate_risk_rating(percentage, threshold_high, threshold_medium),
        weight: group.weight,
    }
}

/// Score one questionnaire type by aggregating its groups.
///
/// Raw and max scores are plain sums (display values); the percentage is the
/// weighted average of the already-rounded group percentages. A type with no
/// groups scores zero.
pub fn score_type(stype: &SnapshotType, answers: &HashMap<Uuid, i64>) -> TypeScore {
    let groups: Vec<GroupScore> = stype
        .groups
        .iter()
        .map(|g| score_group(g, answers, stype.threshold_high, stype.threshold_medium))
        .collect();

    let raw_score = groups.iter().map(|g| g.raw_score).sum();
    let max_score = groups.iter().map(|g| g.max_score).sum();
    let percentage = round2(weighted_average(
        groups.iter().map(|g| (g.percentage, g.weight)),
    ));

    TypeScore {
        type_id: stype.id,
        type_name: stype.name.clone(),
        raw_score,
        max_score,
        percentage,
        risk_rating: calculate_risk_rating(
            percentage,
            stype.threshold_high,
            stype.threshold_medium,
        ),
        weight: stype.weight,
        groups,
    }
}

/// Aggregate all type scores into the overall result, weighted by type
/// weight, rated against the fixed 80/50 thresholds.
pub fn score_overall(type_scores: &[TypeScore]) -> OverallScore {
    let raw_score = type_scores.iter().map(|t| t.raw_score).sum();
    let max_score = type_scores.iter().map(|t| t.max_score).sum();
    let percentage = round2(weighted_average(
        type_scores.iter().map(|t| (t.percentage, t.weight)),
    ));

    OverallScore {
        raw_score,
        max_score,
        percentage,
        risk_rating: calculate_risk_rating(
            percentage,
            OVERALL_THRESHOLD_HIGH,
            OVERALL_THRESHOLD_MEDIUM,
        ),
    }
}

/// Score a full snapshot against a map of question_id → score_awarded.
/// Pure function of its inputs; scoring twice yields identical results.
pub fn score_snapshot(snapshot: &Snapshot, answers: &HashMap<Uuid, i64>) -> ScoreSet {
    let types: Vec<TypeScore> = snapshot
        .types
        .iter()
        .map(|t| score_type(t, answers))
        .collect();
    let overall = score_overall(&types);
    ScoreSet { types, overall }
}

fn weighted_average(values: impl Iterator<Item = (f64, f64)>) -> f64 {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for (value, weight) in values {
        weighted_sum += value * weight;
        total_weight += weight;
    }
    if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    }
}
