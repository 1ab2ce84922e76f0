use models::{CostModel, ScoringWeights, ValueAssessment};
use tracing::debug;

/// Score returned when the inputs cannot be scored
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Recommendation on a 0-100 scale, 50 being neutral.
///
/// Each factor contributes a capped term; the sum is clamped then rounded to one decimal.
pub fn recommendation_score(
    cost_delta: f64,
    life_exp_delta: f64,
    aqi_delta: f64,
    w: &ScoringWeights,
) -> f64 {
    if cost_delta.is_nan() || life_exp_delta.is_nan() || aqi_delta.is_nan() {
        debug!("NaN delta, returning neutral score");
        return NEUTRAL_SCORE;
    }

    let mut score = w.baseline;

    score += if life_exp_delta > 0.0 {
        (life_exp_delta * w.life_exp_points_per_year).min(w.life_exp_cap)
    } else {
        (life_exp_delta * w.life_exp_points_per_year).max(-w.life_exp_cap)
    };

    score += if cost_delta < 0.0 {
        (cost_delta.abs() * w.cost_savings_weight).min(w.cost_savings_cap)
    } else {
        -(cost_delta * w.cost_increase_weight).min(w.cost_increase_cap)
    };

    score += if aqi_delta < 0.0 {
        (aqi_delta.abs() * w.aqi_improvement_weight).min(w.aqi_improvement_cap)
    } else {
        -(aqi_delta * w.aqi_deterioration_weight).min(w.aqi_deterioration_cap)
    };

    if score.is_nan() {
        return NEUTRAL_SCORE;
    }
    round1(score.clamp(0.0, 100.0))
}

/// Annual cost proxy per year of life gained (negative: savings per year lost).
/// Undefined when the life-expectancy delta is too close to zero.
pub fn cost_per_life_year(cost_delta: f64, life_exp_delta: f64, model: &CostModel) -> Option<f64> {
    if !(life_exp_delta.abs() >= model.min_life_exp_delta) {
        debug!(life_exp_delta, "life-expectancy delta near zero, ratio undefined");
        return None;
    }
    let annual_cost_impact = cost_delta * model.annual_cost_multiplier;
    let ratio = round2(annual_cost_impact / life_exp_delta);
    ratio.is_finite().then_some(ratio)
}

/// Cost-effectiveness band of a life-expectancy gain.
///
/// The ratio is in hundreds of dollars per life year. Losses are not assessed.
pub fn value_assessment(
    cost_per_life_year: Option<f64>,
    cost_delta: f64,
    life_exp_delta: f64,
) -> Option<ValueAssessment> {
    if !(life_exp_delta > 0.0) {
        return None;
    }
    let ratio = cost_per_life_year?;
    if cost_delta <= 0.0 {
        return Some(ValueAssessment::Excellent);
    }

    let dollars = ratio * 100.0;
    Some(if dollars < 10_000.0 {
        ValueAssessment::Excellent
    } else if dollars < 50_000.0 {
        ValueAssessment::Good
    } else if dollars < 100_000.0 {
        ValueAssessment::Fair
    } else {
        ValueAssessment::Poor
    })
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
