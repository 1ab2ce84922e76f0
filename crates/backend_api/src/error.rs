use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use life_cost::CalculatorError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl From<CalculatorError> for ApiError {
    fn from(err: CalculatorError) -> Self {
        match err {
            CalculatorError::CityNotFound(city) => ApiError::CityNotFound(city),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::CityNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
