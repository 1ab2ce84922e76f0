
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// Pollutants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
	Pm25,
	Pm10,
	No2,
	So2,
	Co,
	O3,
}

impl Pollutant {
	/// Every pollutant in evaluation order
	pub const ALL: [Pollutant; 6] = [
		Pollutant::Pm25,
		Pollutant::Pm10,
		Pollutant::No2,
		Pollutant::So2,
		Pollutant::Co,
		Pollutant::O3,
	];

	pub fn key(&self) -> &'static str {
		match self {
			Pollutant::Pm25 => "pm25",
			Pollutant::Pm10 => "pm10",
			Pollutant::No2 => "no2",
			Pollutant::So2 => "so2",
			Pollutant::Co => "co",
			Pollutant::O3 => "o3",
		}
	}
}

impl fmt::Display for Pollutant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.pad(self.key())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pollutant key: {0}")]
pub struct UnknownPollutant(pub String);

impl FromStr for Pollutant {
	type Err = UnknownPollutant;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"pm25" | "pm2.5" | "pm2_5" => Ok(Pollutant::Pm25),
			"pm10" => Ok(Pollutant::Pm10),
			"no2" => Ok(Pollutant::No2),
			"so2" => Ok(Pollutant::So2),
			"co" => Ok(Pollutant::Co),
			"o3" => Ok(Pollutant::O3),
			_ => Err(UnknownPollutant(s.to_string())),
		}
	}
}

/// Raw concentrations in µg/m³, one optional value per pollutant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PollutantReading {
	#[serde(default, alias = "pm2_5", alias = "pm2.5")]
	pub pm25: Option<f64>,
	#[serde(default)]
	pub pm10: Option<f64>,
	#[serde(default)]
	pub no2: Option<f64>,
	#[serde(default)]
	pub so2: Option<f64>,
	#[serde(default)]
	pub co: Option<f64>,
	#[serde(default)]
	pub o3: Option<f64>,
}

impl PollutantReading {
	/// Builds a reading from `(key, concentration)` pairs, skipping unknown keys
	pub fn from_pairs<I, K>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, f64)>,
		K: AsRef<str>,
	{
		let mut reading = Self::default();
		for (key, value) in pairs {
			if let Ok(pollutant) = key.as_ref().parse::<Pollutant>() {
				reading.set(pollutant, value);
			}
		}
		reading
	}

	pub fn get(&self, pollutant: Pollutant) -> Option<f64> {
		match pollutant {
			Pollutant::Pm25 => self.pm25,
			Pollutant::Pm10 => self.pm10,
			Pollutant::No2 => self.no2,
			Pollutant::So2 => self.so2,
			Pollutant::Co => self.co,
			Pollutant::O3 => self.o3,
		}
	}

	pub fn set(&mut self, pollutant: Pollutant, value: f64) {
		let slot = match pollutant {
			Pollutant::Pm25 => &mut self.pm25,
			Pollutant::Pm10 => &mut self.pm10,
			Pollutant::No2 => &mut self.no2,
			Pollutant::So2 => &mut self.so2,
			Pollutant::Co => &mut self.co,
			Pollutant::O3 => &mut self.o3,
		};
		*slot = Some(value);
	}

	pub fn with(mut self, pollutant: Pollutant, value: f64) -> Self {
		self.set(pollutant, value);
		self
	}

	/// Present values in evaluation order
	pub fn present(&self) -> impl Iterator<Item = (Pollutant, f64)> + '_ {
		Pollutant::ALL
			.into_iter()
			.filter_map(|p| self.get(p).map(|v| (p, v)))
	}

	pub fn is_empty(&self) -> bool {
		self.present().next().is_none()
	}
}

// AQI categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiCategory {
	Good,
	Moderate,
	UnhealthyForSensitiveGroups,
	Unhealthy,
	VeryUnhealthy,
	Hazardous,
}

impl AqiCategory {
	pub fn label(&self) -> &'static str {
		match self {
			AqiCategory::Good => "Good",
			AqiCategory::Moderate => "Moderate",
			AqiCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
			AqiCategory::Unhealthy => "Unhealthy",
			AqiCategory::VeryUnhealthy => "Very Unhealthy",
			AqiCategory::Hazardous => "Hazardous",
		}
	}

	pub fn color(&self) -> &'static str {
		match self {
			AqiCategory::Good => "green",
			AqiCategory::Moderate => "yellow",
			AqiCategory::UnhealthyForSensitiveGroups => "orange",
			AqiCategory::Unhealthy => "red",
			AqiCategory::VeryUnhealthy => "purple",
			AqiCategory::Hazardous => "maroon",
		}
	}

	/// Map-layer fill color, RGBA
	pub fn rgba(&self) -> [u8; 4] {
		match self {
			AqiCategory::Good => [0, 255, 0, 160],
			AqiCategory::Moderate => [255, 255, 0, 160],
			AqiCategory::UnhealthyForSensitiveGroups => [255, 165, 0, 160],
			AqiCategory::Unhealthy => [255, 0, 0, 160],
			AqiCategory::VeryUnhealthy => [128, 0, 128, 160],
			AqiCategory::Hazardous => [128, 0, 0, 160],
		}
	}

	pub fn health_message(&self) -> &'static str {
		match self {
			AqiCategory::Good => "Air quality is satisfactory for most people",
			AqiCategory::Moderate => {
				"Acceptable for most, but sensitive people may experience minor issues"
			}
			AqiCategory::UnhealthyForSensitiveGroups => {
				"Sensitive people should reduce outdoor activities"
			}
			AqiCategory::Unhealthy => "Everyone may experience health effects",
			AqiCategory::VeryUnhealthy => {
				"Health alert: everyone may experience serious health effects"
			}
			AqiCategory::Hazardous => {
				"Emergency conditions: entire population likely to be affected"
			}
		}
	}
}

/// Display form of a category, as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInfo {
	pub category: String,
	pub color: String,
	/// Map-layer fill, RGBA
	pub rgba: [u8; 4],
	pub health_message: String,
}

impl From<AqiCategory> for CategoryInfo {
	fn from(category: AqiCategory) -> Self {
		Self {
			category: category.label().to_string(),
			color: category.color().to_string(),
			rgba: category.rgba(),
			health_message: category.health_message().to_string(),
		}
	}
}

// City records, as supplied by the persistence layer
fn default_cost_index() -> f64 {
	100.0
}

fn default_life_expectancy() -> f64 {
	75.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
	pub city_name: String,
	pub country: String,
	#[serde(default)]
	pub standardized_aqi: f64,
	#[serde(default = "default_cost_index")]
	pub cost_of_living_index: f64,
	#[serde(default = "default_life_expectancy")]
	pub life_expectancy: f64,
	#[serde(default)]
	pub pm25_concentration: Option<f64>,
	#[serde(default)]
	pub latitude: f64,
	#[serde(default)]
	pub longitude: f64,
}

impl CityRecord {
	pub fn display_name(&self) -> String {
		format!("{}, {}", self.city_name, self.country)
	}

	/// PM2.5 when it is a usable measurement (strictly positive)
	pub fn known_pm25(&self) -> Option<f64> {
		self.pm25_concentration.filter(|v| *v > 0.0)
	}
}

// Comparison output
/// How the health-adjusted delta was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataQuality {
	/// Both PM2.5 concentrations known, risk-adjusted dose-response applied
	Measured,
	/// PM2.5 estimated from standardized AQI, no risk adjustment
	EstimatedFromAqi,
	/// Air-quality correction unavailable, base life-expectancy delta only
	Unadjusted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueAssessment {
	Excellent,
	Good,
	Fair,
	Poor,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDetails {
	pub primary_factors: Vec<String>,
	pub trade_offs: Vec<String>,
	pub recommendations: Vec<String>,
	pub risk_factors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
	pub origin_city: String,
	pub destination_city: String,
	pub origin_aqi: f64,
	pub destination_aqi: f64,
	pub origin_cost: f64,
	pub destination_cost: f64,
	pub origin_life_exp: f64,
	pub destination_life_exp: f64,
	pub cost_delta: f64,
	pub aqi_delta: f64,
	pub life_expectancy_delta: f64,
	pub health_adjusted_life_exp_delta: f64,
	pub cost_per_life_year: Option<f64>,
	pub value_assessment: Option<ValueAssessment>,
	pub recommendation_score: f64,
	pub data_quality: DataQuality,
	pub analysis_details: AnalysisDetails,
}

// Settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub settings_version: u32,
	pub cities_file: Option<String>,
	pub scoring: ScoringWeights,
	pub health: HealthModel,
	pub cost: CostModel,
	pub analysis: AnalysisThresholds,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			settings_version: 1,
			cities_file: None,
			scoring: ScoringWeights::default(),
			health: HealthModel::default(),
			cost: CostModel::default(),
			analysis: AnalysisThresholds::default(),
		}
	}
}

/// Points awarded per unit of delta, and the cap on each term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
	pub baseline: f64,
	pub life_exp_points_per_year: f64,
	pub life_exp_cap: f64,
	pub cost_savings_weight: f64,
	pub cost_savings_cap: f64,
	pub cost_increase_weight: f64,
	pub cost_increase_cap: f64,
	pub aqi_improvement_weight: f64,
	pub aqi_improvement_cap: f64,
	pub aqi_deterioration_weight: f64,
	pub aqi_deterioration_cap: f64,
}

impl Default for ScoringWeights {
	fn default() -> Self {
		Self {
			baseline: 50.0,
			life_exp_points_per_year: 10.0,
			life_exp_cap: 30.0,
			cost_savings_weight: 0.3,
			cost_savings_cap: 20.0,
			cost_increase_weight: 0.2,
			cost_increase_cap: 25.0,
			aqi_improvement_weight: 0.15,
			aqi_improvement_cap: 25.0,
			aqi_deterioration_weight: 0.15,
			aqi_deterioration_cap: 20.0,
		}
	}
}

/// Upper PM2.5 bound (inclusive) of a baseline-risk tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskTier {
	pub max_pm25: f64,
	pub factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthModel {
	/// Years of life per µg/m³ of PM2.5 (Pope et al.)
	pub pm25_life_coefficient: f64,
	/// Coefficient used when PM2.5 has to be estimated from AQI
	pub aqi_fallback_coefficient: f64,
	pub risk_tiers: Vec<RiskTier>,
	/// Factor above the last tier
	pub high_exposure_factor: f64,
}

impl Default for HealthModel {
	fn default() -> Self {
		Self {
			pm25_life_coefficient: 0.098,
			aqi_fallback_coefficient: 0.1,
			risk_tiers: vec![
				RiskTier { max_pm25: 12.0, factor: 1.0 },
				RiskTier { max_pm25: 25.0, factor: 0.9 },
				RiskTier { max_pm25: 50.0, factor: 0.7 },
			],
			high_exposure_factor: 0.5,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
	/// Index points to annual cost proxy (hundreds of dollars)
	pub annual_cost_multiplier: f64,
	/// Below this absolute life-expectancy delta the ratio is undefined
	pub min_life_exp_delta: f64,
}

impl Default for CostModel {
	fn default() -> Self {
		Self {
			annual_cost_multiplier: 10.0,
			min_life_exp_delta: 0.01,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisThresholds {
	pub life_exp_factor: f64,
	pub cost_factor: f64,
	pub aqi_factor: f64,
	pub aqi_risk: f64,
	pub cost_risk: f64,
	pub life_exp_risk: f64,
	pub highly_recommended: f64,
	pub generally_positive: f64,
	pub mixed: f64,
	pub consider_alternatives: f64,
}

impl Default for AnalysisThresholds {
	fn default() -> Self {
		Self {
			life_exp_factor: 1.0,
			cost_factor: 20.0,
			aqi_factor: 25.0,
			aqi_risk: 50.0,
			cost_risk: 50.0,
			life_exp_risk: -1.0,
			highly_recommended: 75.0,
			generally_positive: 60.0,
			mixed: 40.0,
			consider_alternatives: 25.0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_pollutant_parse_accepts_aliases() {
		assert_eq!("PM2.5".parse::<Pollutant>().unwrap(), Pollutant::Pm25);
		assert_eq!("pm2_5".parse::<Pollutant>().unwrap(), Pollutant::Pm25);
		assert_eq!(" O3 ".parse::<Pollutant>().unwrap(), Pollutant::O3);
		let err = "nh3".parse::<Pollutant>().unwrap_err();
		assert_eq!(err.to_string(), "unknown pollutant key: nh3");
	}

	#[test]
	fn test_reading_from_pairs_skips_unknown_keys() {
		let reading = PollutantReading::from_pairs([("pm25", 12.0), ("nh3", 4.0), ("co", 300.0)]);
		assert_eq!(reading.pm25, Some(12.0));
		assert_eq!(reading.co, Some(300.0));
		let present: Vec<_> = reading.present().collect();
		assert_eq!(present, vec![(Pollutant::Pm25, 12.0), (Pollutant::Co, 300.0)]);
	}

	#[test]
	fn test_reading_deserializes_with_missing_keys() {
		let reading: PollutantReading = serde_json::from_str(r#"{"pm10": 40.0, "no2": null}"#).unwrap();
		assert_eq!(reading.pm10, Some(40.0));
		assert_eq!(reading.no2, None);
		assert!(!reading.is_empty());
		assert!(PollutantReading::default().is_empty());
	}

	#[test]
	fn test_city_record_applies_persistence_defaults() {
		let record: CityRecord =
			serde_json::from_str(r#"{"city_name": "Kelowna", "country": "Canada"}"#).unwrap();
		assert_eq!(record.standardized_aqi, 0.0);
		assert_eq!(record.cost_of_living_index, 100.0);
		assert_eq!(record.life_expectancy, 75.0);
		assert_eq!(record.known_pm25(), None);
		assert_eq!(record.display_name(), "Kelowna, Canada");
	}

	#[test]
	fn test_known_pm25_ignores_zero() {
		let record: CityRecord = serde_json::from_str(
			r#"{"city_name": "A", "country": "B", "pm25_concentration": 0.0}"#,
		)
		.unwrap();
		assert_eq!(record.known_pm25(), None);
	}

	#[test]
	fn test_empty_settings_use_defaults() {
		let settings: Settings = serde_json::from_str("{}").unwrap();
		assert_eq!(settings, Settings::default());
		assert_eq!(settings.health.pm25_life_coefficient, 0.098);
		assert_eq!(settings.health.risk_tiers.len(), 3);
	}

	#[test]
	fn test_partial_scoring_section_keeps_other_defaults() {
		let settings: Settings =
			serde_json::from_str(r#"{"scoring": {"baseline": 40.0}}"#).unwrap();
		assert_eq!(settings.scoring.baseline, 40.0);
		assert_eq!(settings.scoring.life_exp_cap, 30.0);
	}

	#[test]
	fn test_category_info_from_enum() {
		let info = CategoryInfo::from(AqiCategory::Hazardous);
		assert_eq!(info.category, "Hazardous");
		assert_eq!(info.color, "maroon");
		assert_eq!(info.rgba, [128, 0, 0, 160]);
	}

	#[test]
	fn test_category_rgba_serializes() {
		let good = CategoryInfo::from(AqiCategory::Good);
		assert_eq!(good.rgba, [0, 255, 0, 160]);
		let json = serde_json::to_value(&good).unwrap();
		assert_eq!(json["rgba"], serde_json::json!([0, 255, 0, 160]));
	}
}
