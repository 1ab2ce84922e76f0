use city_store::CityStore;
use life_cost::LifeCostCalculator;
use models::Settings;
use std::sync::Arc;

/// Shared, read-only state behind every handler
pub struct AppState {
    pub calculator: LifeCostCalculator<Arc<CityStore>>,
}

impl AppState {
    pub fn new(cities: CityStore, settings: Settings) -> Self {
        Self {
            calculator: LifeCostCalculator::with_settings(Arc::new(cities), settings),
        }
    }

    pub fn cities(&self) -> &CityStore {
        self.calculator.lookup()
    }
}

pub type SharedState = Arc<AppState>;
