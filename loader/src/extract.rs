//! Paged bulk extraction of cities from the world database.

use world_core::constants::PAGE_SIZE;
use world_core::types::City;

use crate::error::{LoaderError, Result};
use crate::relational::{CityDao, WorldDb};

/// Reads every city with its country and languages, `page_size` cities per
/// query.
#[derive(Debug, Clone, Copy)]
pub struct PaginatedExtractor {
    page_size: usize,
}

impl Default for PaginatedExtractor {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
        }
    }
}

impl PaginatedExtractor {
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(LoaderError::Config("page size must be at least 1".into()));
        }
        Ok(Self { page_size })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fetch all cities inside one read transaction.
    ///
    /// The count is taken once, then pages at offsets `0, P, 2P, ...` are
    /// fetched in order until the count is covered.
    pub fn extract_all(&self, db: &mut WorldDb) -> Result<Vec<City>> {
        let tx = db.read_transaction()?;
        let dao = CityDao::new(&tx);

        let total = dao.get_total_count()?;
        log::info!(
            "Extracting {total} cities in pages of {}...",
            self.page_size
        );

        let mut cities = Vec::with_capacity(total);
        for offset in (0..total).step_by(self.page_size) {
            let page = dao.get_items(offset, self.page_size)?;
            log::debug!("  Page at offset {offset}: {} cities", page.len());
            cities.extend(page);
        }

        tx.commit()?;

        if cities.len() != total {
            log::warn!(
                "Extracted {} cities but counted {total} at start",
                cities.len()
            );
        }
        log::info!("Extracted {} cities.", cities.len());
        Ok(cities)
    }
}
