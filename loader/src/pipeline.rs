//! One full run: extract, flatten, populate, then compare lookups.

use crate::benchmark::{self, LookupTimings};
use crate::config::LoaderConfig;
use crate::denormalize::flatten_all;
use crate::error::Result;
use crate::extract::PaginatedExtractor;
use crate::keydb::{KeyDb, KeyValueStore};
use crate::populate::populate;
use crate::relational::WorldDb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub extracted: usize,
    pub written: usize,
    pub timings: LookupTimings,
}

/// Run against the stores named in `config`.
///
/// Both stores are opened here and closed when this returns, on success
/// and on every error path.
pub fn run(config: &LoaderConfig) -> Result<RunSummary> {
    config.validate()?;
    let mut db = WorldDb::open(&config.database_path)?;
    let keydb = KeyDb::open(&config.keydb_url)?;

    let extractor = PaginatedExtractor::new(config.page_size)?;
    log::info!(
        "Loading {} into {} in pages of {}",
        config.database_path.display(),
        config.keydb_url,
        extractor.page_size()
    );
    let (extracted, written) = extract_and_load(&extractor, &mut db, || keydb.connect())?;

    let mut con = keydb.connect()?;
    let timings = benchmark::compare(&mut db, &mut con, &config.benchmark_ids)?;

    Ok(RunSummary {
        extracted,
        written,
        timings,
    })
}

/// Extract every city, flatten, and write the documents through a store
/// obtained from `connect` once the batch is ready.
///
/// Returns `(extracted, written)`. The store is only opened after every
/// city has flattened, so an integrity error writes nothing.
pub fn extract_and_load<S, F>(
    extractor: &PaginatedExtractor,
    db: &mut WorldDb,
    connect: F,
) -> Result<(usize, usize)>
where
    S: KeyValueStore,
    F: FnOnce() -> Result<S>,
{
    let cities = extractor.extract_all(db)?;
    let records = flatten_all(&cities)?;
    drop(cities);

    let mut store = connect()?;
    let written = populate(&mut store, &records)?;
    Ok((records.len(), written))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoaderError;
    use crate::keydb::MemoryStore;
    use crate::synthetic::{generate_synthetic, seed_world, WorldParams};

    #[test]
    fn extract_and_load_writes_every_city() {
        let mut db = WorldDb::open_in_memory().unwrap();
        let world = generate_synthetic(&WorldParams {
            countries: 5,
            cities: 40,
            max_languages: 3,
        });
        seed_world(&mut db, &world).unwrap();

        let mut store = MemoryStore::new();
        let extractor = PaginatedExtractor::new(7).unwrap();
        let (extracted, written) =
            extract_and_load(&extractor, &mut db, || Ok(&mut store)).unwrap();

        assert_eq!(extracted, 40);
        assert_eq!(written, 40);
        assert_eq!(store.len(), 40);
    }

    #[test]
    fn missing_database_aborts_the_run() {
        let config = LoaderConfig {
            database_path: std::env::temp_dir().join("world-loader-missing.db"),
            ..LoaderConfig::default()
        };
        assert!(matches!(
            run(&config),
            Err(LoaderError::StoreUnavailable { .. })
        ));
    }
}
