use std::fmt;

/// Which of the two stores an error or a timing refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Relational,
    Cache,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Relational => f.write_str("relational store"),
            StoreKind::Cache => f.write_str("key-value cache"),
        }
    }
}

/// Every way a load or benchmark run can fail. All of them abort the run.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// A city whose country could not be resolved at extraction time.
    #[error("city {city_id} references country {country_id:?}, which does not resolve")]
    Integrity {
        city_id: i32,
        country_id: Option<i32>,
    },

    #[error("JSON codec failed for cache key {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{store} unavailable: {reason}")]
    StoreUnavailable { store: StoreKind, reason: String },

    #[error("id {id} not found in the {store}")]
    LookupMiss { store: StoreKind, id: i32 },

    #[error("relational query failed: {0}")]
    Relational(#[from] rusqlite::Error),

    #[error("KeyDB command failed: {0}")]
    KeyValue(#[from] redis::RedisError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LoaderError>;
