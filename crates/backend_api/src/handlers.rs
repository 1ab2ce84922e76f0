use aqi_normalization::{
    calculate_health_impact_score, calculate_pollutant_breakdown, get_aqi_category,
    normalize_existing_aqi, AqiStandard, PollutantAqi,
};
use axum::{
    extract::{Query, State},
    http::{header, HeaderValue},
    response::IntoResponse,
    Json,
};
use models::{CategoryInfo, Pollutant, PollutantReading};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, state::SharedState, Result};

/// GET /api/cities
/// Returns every city record
pub async fn list_cities(State(state): State<SharedState>) -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, HeaderValue::from_static("public, max-age=60"))],
        Json(state.cities().records().to_vec()),
    )
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub origin: String,
    pub destination: String,
}

/// GET /api/compare?origin=..&destination=..
/// Life-cost comparison for a move from origin to destination
pub async fn compare_cities(
    State(state): State<SharedState>,
    Query(query): Query<CompareQuery>,
) -> Result<impl IntoResponse> {
    if query.origin.trim().is_empty() || query.destination.trim().is_empty() {
        return Err(ApiError::InvalidQuery(
            "origin and destination must not be empty".to_string(),
        ));
    }

    let result = state
        .calculator
        .calculate_comparison(&query.origin, &query.destination)?;
    Ok(Json(result))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AqiResponse {
    pub aqi: Option<f64>,
    pub dominant: Option<Pollutant>,
    pub individual: Vec<PollutantAqi>,
    pub category: Option<CategoryInfo>,
    pub health_impact_score: Option<f64>,
}

/// POST /api/aqi
/// Standardized AQI from raw concentrations in µg/m³
pub async fn standardize_aqi(Json(reading): Json<PollutantReading>) -> impl IntoResponse {
    let response = match calculate_pollutant_breakdown(&reading) {
        Some(breakdown) => AqiResponse {
            aqi: Some(breakdown.aqi),
            dominant: Some(breakdown.dominant),
            category: Some(get_aqi_category(breakdown.aqi).into()),
            health_impact_score: Some(calculate_health_impact_score(breakdown.aqi)),
            individual: breakdown.individual,
        },
        None => AqiResponse {
            aqi: None,
            dominant: None,
            individual: Vec::new(),
            category: None,
            health_impact_score: None,
        },
    };
    Json(response)
}

fn default_standard() -> String {
    "epa".to_string()
}

#[derive(Debug, Deserialize)]
pub struct NormalizeQuery {
    pub value: f64,
    #[serde(default = "default_standard")]
    pub standard: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NormalizeResponse {
    pub source_value: f64,
    pub source_standard: AqiStandard,
    pub epa_aqi: f64,
    pub category: CategoryInfo,
}

/// GET /api/aqi/normalize?value=..&standard=..
/// Converts an AQI from another national scale to the EPA scale
pub async fn normalize_aqi(Query(query): Query<NormalizeQuery>) -> impl IntoResponse {
    let epa_aqi = normalize_existing_aqi(query.value, &query.standard);
    Json(NormalizeResponse {
        source_value: query.value,
        source_standard: AqiStandard::parse(&query.standard),
        epa_aqi,
        category: get_aqi_category(epa_aqi).into(),
    })
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "true-cost-api"
    }))
}
