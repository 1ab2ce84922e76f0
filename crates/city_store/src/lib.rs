use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use life_cost::{CityKey, CityLookup};
use models::CityRecord;
use tracing::info;

/// In-memory, read-only city records standing in for the database
#[derive(Debug, Clone, Default)]
pub struct CityStore {
    records: Vec<CityRecord>,
}

impl CityStore {
    pub fn from_records(records: Vec<CityRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CityLookup for CityStore {
    fn get_city_record(&self, key: &CityKey) -> Option<CityRecord> {
        self.records.iter().find(|r| key.matches(r)).cloned()
    }
}

/// Loads a JSON array of city records
pub fn load_cities<P: AsRef<Path>>(path: P) -> Result<CityStore> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading cities file: {}", path.display()))?;
    let records: Vec<CityRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing cities JSON in {}", path.display()))?;
    info!(count = records.len(), path = %path.display(), "loaded city records");
    Ok(CityStore::from_records(records))
}
