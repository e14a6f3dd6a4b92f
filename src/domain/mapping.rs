use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::{AppError, AppResult};

/// Target repository for one product. `skip` is stored as the string
/// `"true"` in the mapping file; any other value means false.
#[derive(Debug, Clone, Deserialize)]
pub struct MappingRecord {
    pub repo: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub skip: bool,
}

/// Static lookup table from lowercase product name to its repository,
/// loaded once at startup and never written back.
#[derive(Debug, Clone)]
pub struct ProductMappings {
    records: HashMap<String, MappingRecord>,
}

impl ProductMappings {
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|err| {
            AppError::Mapping(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::from_json_str(&contents)
            .map_err(|err| AppError::Mapping(format!("{}: {err}", path.display())))
    }

    pub fn from_json_str(contents: &str) -> Result<Self, serde_json::Error> {
        let records: HashMap<String, MappingRecord> = serde_json::from_str(contents)?;
        Ok(Self { records })
    }

    pub fn get(&self, product: &str) -> Option<&MappingRecord> {
        self.records.get(product)
    }

    pub fn contains(&self, product: &str) -> bool {
        self.records.contains_key(product)
    }
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value == "true")
}
