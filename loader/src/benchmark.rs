//! Point-lookup latency comparison between the relational store and the
//! cache.
//!
//! The two passes run one after the other and never overlap, so neither
//! store competes with the other for CPU or I/O while being timed.

use std::time::{Duration, Instant};

use world_core::types::{City, CityCountry};

use crate::codec;
use crate::error::{LoaderError, Result, StoreKind};
use crate::keydb::KeyValueStore;
use crate::relational::{CityDao, WorldDb};

/// Total wall-clock time of each pass over the same id list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTimings {
    pub relational: Duration,
    pub cache: Duration,
    /// Ids looked up per pass, repeats included.
    pub lookups: usize,
}

/// Time the relational pass, then the cache pass, over `ids`.
///
/// A miss in either store aborts the comparison.
pub fn compare<S>(db: &mut WorldDb, store: &mut S, ids: &[i32]) -> Result<LookupTimings>
where
    S: KeyValueStore + ?Sized,
{
    log::info!("Timing {} relational lookups...", ids.len());
    let relational = time_relational(db, ids)?;

    log::info!("Timing {} cache lookups...", ids.len());
    let cache = time_cache(store, ids)?;

    Ok(LookupTimings {
        relational,
        cache,
        lookups: ids.len(),
    })
}

fn time_relational(db: &mut WorldDb, ids: &[i32]) -> Result<Duration> {
    let started = Instant::now();
    let tx = db.read_transaction()?;
    let dao = CityDao::new(&tx);
    for &id in ids {
        let city = fetch_city(&dao, id)?;
        let languages = city.country.as_ref().map_or(0, |c| c.languages.len());
        log::debug!("  city {id}: {languages} languages");
    }
    tx.commit()?;
    Ok(started.elapsed())
}

fn time_cache<S>(store: &mut S, ids: &[i32]) -> Result<Duration>
where
    S: KeyValueStore + ?Sized,
{
    let started = Instant::now();
    for &id in ids {
        let record = read_cached(store, id)?;
        log::debug!("  cached city {id}: {} languages", record.languages.len());
    }
    Ok(started.elapsed())
}

fn fetch_city(dao: &CityDao<'_>, id: i32) -> Result<City> {
    dao.get_by_id(id)?.ok_or(LoaderError::LookupMiss {
        store: StoreKind::Relational,
        id,
    })
}

/// One relational point read with the country and languages joined in.
pub fn read_relational(db: &WorldDb, id: i32) -> Result<City> {
    fetch_city(&CityDao::new(db.connection()), id)
}

/// One cache point read, decoded.
pub fn read_cached<S>(store: &mut S, id: i32) -> Result<CityCountry>
where
    S: KeyValueStore + ?Sized,
{
    let key = id.to_string();
    let value = store.get(&key)?.ok_or(LoaderError::LookupMiss {
        store: StoreKind::Cache,
        id,
    })?;
    codec::decode(&key, &value)
}
