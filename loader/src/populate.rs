//! Writes flattened documents into the key-value cache.

use std::time::Instant;

use world_core::types::CityCountry;

use crate::codec;
use crate::error::Result;
use crate::keydb::KeyValueStore;

/// Progress is logged every this many records.
const PROGRESS_INTERVAL: usize = 1000;

/// `SET` every record under its decimal id and return how many were written.
///
/// Each record is its own write. If one fails, the records before it stay
/// written and the error is returned; nothing is rolled back.
pub fn populate<S>(store: &mut S, records: &[CityCountry]) -> Result<usize>
where
    S: KeyValueStore + ?Sized,
{
    log::info!("Writing {} cache records...", records.len());
    let started = Instant::now();

    let mut written = 0;
    for record in records {
        let value = codec::encode(record)?;
        store.set(&record.cache_key(), &value)?;
        written += 1;

        if written % PROGRESS_INTERVAL == 0 {
            log::debug!("  {written}/{} records written", records.len());
        }
    }

    log::info!(
        "Wrote {written} cache records ({:.2?}).",
        started.elapsed()
    );
    Ok(written)
}
