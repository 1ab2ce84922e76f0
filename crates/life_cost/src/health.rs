//! Air-quality correction of the life-expectancy delta (AQLI dose-response).

use models::{CityRecord, DataQuality, HealthModel};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthAdjustment {
    pub delta: f64,
    pub quality: DataQuality,
}

/// Diminishing marginal benefit in already polluted areas, keyed to the dirtier city
pub fn risk_adjustment(max_pm25: f64, model: &HealthModel) -> f64 {
    model
        .risk_tiers
        .iter()
        .find(|tier| max_pm25 <= tier.max_pm25)
        .map(|tier| tier.factor)
        .unwrap_or(model.high_exposure_factor)
}

/// Inverse of the EPA PM2.5 table, µg/m³
pub fn aqi_to_pm25_estimate(aqi: f64) -> f64 {
    if aqi <= 50.0 {
        aqi * 0.24
    } else if aqi <= 100.0 {
        12.0 + (aqi - 50.0) * 0.468
    } else if aqi <= 150.0 {
        35.4 + (aqi - 100.0) * 0.398
    } else if aqi <= 200.0 {
        55.4 + (aqi - 150.0) * 1.898
    } else {
        150.4 + (aqi - 200.0)
    }
}

/// Base life-expectancy delta plus the PM2.5-driven correction, rounded to 3 decimals.
///
/// With both PM2.5 values known the risk-adjusted coefficient applies. Otherwise
/// PM2.5 is estimated from AQI and `aqi_fallback_coefficient` is used without
/// risk adjustment. A non-finite correction leaves the base delta untouched.
pub fn health_adjusted_life_exp_delta(
    origin: &CityRecord,
    destination: &CityRecord,
    model: &HealthModel,
) -> HealthAdjustment {
    let base_delta = destination.life_expectancy - origin.life_expectancy;

    let (life_impact, quality) = match (origin.known_pm25(), destination.known_pm25()) {
        (Some(origin_pm25), Some(dest_pm25)) => {
            // positive when the destination is cleaner
            let pm25_delta = origin_pm25 - dest_pm25;
            let risk = risk_adjustment(origin_pm25.max(dest_pm25), model);
            (
                pm25_delta * model.pm25_life_coefficient * risk,
                DataQuality::Measured,
            )
        }
        _ => {
            debug!(
                origin = %origin.city_name,
                destination = %destination.city_name,
                "PM2.5 missing, estimating from AQI"
            );
            let origin_est = aqi_to_pm25_estimate(origin.standardized_aqi);
            let dest_est = aqi_to_pm25_estimate(destination.standardized_aqi);
            let pm25_delta = dest_est - origin_est;
            (
                -pm25_delta * model.aqi_fallback_coefficient,
                DataQuality::EstimatedFromAqi,
            )
        }
    };

    let total = base_delta + life_impact;
    if !life_impact.is_finite() || !total.is_finite() {
        debug!(life_impact, "health correction unavailable, using base delta");
        return HealthAdjustment {
            delta: base_delta,
            quality: DataQuality::Unadjusted,
        };
    }

    HealthAdjustment {
        delta: round3(total),
        quality,
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
