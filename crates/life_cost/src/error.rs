use thiserror::Error;

pub type Result<T> = std::result::Result<T, CalculatorError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculatorError {
    #[error("City not found: {0}")]
    CityNotFound(String),
}
