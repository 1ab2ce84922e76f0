//! Life-cost trade-off between two cities: deltas, health-adjusted life
//! expectancy, cost per life year and a bounded recommendation score.

pub mod analysis;
pub mod error;
pub mod health;
pub mod scoring;

use std::fmt;
use std::sync::Arc;

use models::{CityRecord, ComparisonResult, Settings};
use tracing::{debug, warn};

pub use error::{CalculatorError, Result};
pub use health::{HealthAdjustment, aqi_to_pm25_estimate, health_adjusted_life_exp_delta};
pub use scoring::{NEUTRAL_SCORE, cost_per_life_year, recommendation_score, value_assessment};

/// A city lookup key: `"City"` or `"City, Country"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityKey {
    pub city_name: String,
    pub country: Option<String>,
}

impl CityKey {
    /// Splits on the first comma; both parts are trimmed and an empty country is dropped
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(',') {
            Some((city, country)) => {
                let country = country.trim();
                Self {
                    city_name: city.trim().to_string(),
                    country: (!country.is_empty()).then(|| country.to_string()),
                }
            }
            None => Self {
                city_name: raw.trim().to_string(),
                country: None,
            },
        }
    }

    /// Case-insensitive match on city name and, when given, country
    pub fn matches(&self, record: &CityRecord) -> bool {
        let same = |a: &str, b: &str| a.to_lowercase() == b.to_lowercase();
        same(&self.city_name, &record.city_name)
            && self
                .country
                .as_deref()
                .is_none_or(|country| same(country, &record.country))
    }
}

impl fmt::Display for CityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.country {
            Some(country) => write!(f, "{}, {}", self.city_name, country),
            None => f.write_str(&self.city_name),
        }
    }
}

/// Read access to city records owned by the persistence layer
pub trait CityLookup: Send + Sync {
    /// First record matching the key, if any
    fn get_city_record(&self, key: &CityKey) -> Option<CityRecord>;
}

impl<T: CityLookup + ?Sized> CityLookup for Arc<T> {
    fn get_city_record(&self, key: &CityKey) -> Option<CityRecord> {
        (**self).get_city_record(key)
    }
}

impl<T: CityLookup + ?Sized> CityLookup for &T {
    fn get_city_record(&self, key: &CityKey) -> Option<CityRecord> {
        (**self).get_city_record(key)
    }
}

pub struct LifeCostCalculator<L> {
    lookup: L,
    settings: Settings,
}

impl<L: CityLookup> LifeCostCalculator<L> {
    pub fn new(lookup: L) -> Self {
        Self::with_settings(lookup, Settings::default())
    }

    pub fn with_settings(lookup: L, settings: Settings) -> Self {
        Self { lookup, settings }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Full comparison for a move from `origin` to `destination`.
    ///
    /// Fails only when either city has no record.
    pub fn calculate_comparison(&self, origin: &str, destination: &str) -> Result<ComparisonResult> {
        let origin_record = self.resolve(origin)?;
        let destination_record = self.resolve(destination)?;
        Ok(self.compare_records(&origin_record, &destination_record))
    }

    /// Comparison of two already resolved records
    pub fn compare_records(&self, origin: &CityRecord, destination: &CityRecord) -> ComparisonResult {
        let s = &self.settings;

        let cost_delta = destination.cost_of_living_index - origin.cost_of_living_index;
        let aqi_delta = destination.standardized_aqi - origin.standardized_aqi;
        let life_expectancy_delta = destination.life_expectancy - origin.life_expectancy;

        let health = health_adjusted_life_exp_delta(origin, destination, &s.health);
        let cost_per_life_year = cost_per_life_year(cost_delta, health.delta, &s.cost);
        let recommendation_score =
            recommendation_score(cost_delta, health.delta, aqi_delta, &s.scoring);
        let value_assessment = value_assessment(cost_per_life_year, cost_delta, health.delta);
        let analysis_details = analysis::generate_analysis_details(
            cost_delta,
            aqi_delta,
            health.delta,
            recommendation_score,
            &s.analysis,
        );

        debug!(
            origin = %origin.display_name(),
            destination = %destination.display_name(),
            recommendation_score,
            quality = ?health.quality,
            "comparison computed"
        );

        ComparisonResult {
            origin_city: origin.display_name(),
            destination_city: destination.display_name(),
            origin_aqi: origin.standardized_aqi,
            destination_aqi: destination.standardized_aqi,
            origin_cost: origin.cost_of_living_index,
            destination_cost: destination.cost_of_living_index,
            origin_life_exp: origin.life_expectancy,
            destination_life_exp: destination.life_expectancy,
            cost_delta,
            aqi_delta,
            life_expectancy_delta,
            health_adjusted_life_exp_delta: health.delta,
            cost_per_life_year,
            value_assessment,
            recommendation_score,
            data_quality: health.quality,
            analysis_details,
        }
    }

    fn resolve(&self, raw: &str) -> Result<CityRecord> {
        let key = CityKey::parse(raw);
        self.lookup.get_city_record(&key).ok_or_else(|| {
            warn!(city = %key, "city not found");
            CalculatorError::CityNotFound(raw.to_string())
        })
    }
}
