//! EPA-based standardization of air-quality measurements.

pub mod breakpoints;
pub mod health;
pub mod standards;

use models::{Pollutant, PollutantReading};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use breakpoints::{Breakpoint, MAX_AQI, native_unit_factor, pollutant_aqi, table_for};
pub use health::{calculate_health_impact_score, get_aqi_category};
pub use standards::{AqiStandard, normalize_existing_aqi};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutantAqi {
    pub pollutant: Pollutant,
    pub aqi: f64,
}

/// Overall AQI together with the individual index of every pollutant that produced one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AqiBreakdown {
    pub aqi: f64,
    pub dominant: Pollutant,
    pub individual: Vec<PollutantAqi>,
}

/// Individual AQI for a raw concentration in µg/m³, converted to the table's unit first
pub fn individual_aqi(pollutant: Pollutant, concentration_ugm3: f64) -> Option<f64> {
    let native = concentration_ugm3 * native_unit_factor(pollutant);
    let aqi = pollutant_aqi(native, table_for(pollutant));
    if aqi.is_none() {
        debug!(pollutant = %pollutant, concentration_ugm3, "pollutant skipped");
    }
    aqi
}

/// Computes every available individual AQI; the worst pollutant governs.
/// Ties keep the pollutant that comes first in evaluation order.
pub fn calculate_pollutant_breakdown(reading: &PollutantReading) -> Option<AqiBreakdown> {
    let individual: Vec<PollutantAqi> = reading
        .present()
        .filter_map(|(pollutant, value)| {
            individual_aqi(pollutant, value).map(|aqi| PollutantAqi { pollutant, aqi })
        })
        .collect();

    let mut worst = individual.first()?;
    for entry in &individual[1..] {
        if entry.aqi > worst.aqi {
            worst = entry;
        }
    }

    Some(AqiBreakdown {
        aqi: worst.aqi,
        dominant: worst.pollutant,
        individual,
    })
}

/// Standardized AQI: the maximum individual AQI, or `None` when no pollutant yielded one
pub fn calculate_standardized_aqi(reading: &PollutantReading) -> Option<f64> {
    calculate_pollutant_breakdown(reading).map(|b| b.aqi)
}
