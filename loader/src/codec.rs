//! JSON encoding of cache documents.

use world_core::types::CityCountry;

use crate::error::{LoaderError, Result};

pub fn encode(record: &CityCountry) -> Result<String> {
    serde_json::to_string(record).map_err(|source| LoaderError::Serialization {
        key: record.cache_key(),
        source,
    })
}

/// Decode the value stored under `key`.
pub fn decode(key: &str, value: &str) -> Result<CityCountry> {
    serde_json::from_str(value).map_err(|source| LoaderError::Serialization {
        key: key.to_string(),
        source,
    })
}
