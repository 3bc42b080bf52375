use std::sync::Arc;

use super::Country;

/// A row of the `city` table with its country eagerly resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub id: i32,
    pub name: String,
    pub district: String,
    pub population: i32,
    /// Raw foreign key as stored. `None` when the column is NULL.
    pub country_id: Option<i32>,
    /// The joined country, or `None` when the key is NULL or dangling.
    ///
    /// Cities of the same page that share a country share one allocation.
    pub country: Option<Arc<Country>>,
}
