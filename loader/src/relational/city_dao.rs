use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use world_core::types::{City, Continent, Country, CountryLanguage};

use crate::error::Result;

/// Page of cities, each joined to its country and the country's languages.
///
/// The inner select pages on `city` alone so LIMIT/OFFSET count cities, not
/// joined rows.
const PAGE_SQL: &str = "
    SELECT c.id, c.name, c.district, c.population, c.country_id,
           co.id, co.code, co.code_2, co.name, co.continent, co.region,
           co.surface_area, co.population,
           cl.language, cl.is_official, cl.percentage
    FROM (SELECT id, name, district, population, country_id
          FROM city ORDER BY id LIMIT ?1 OFFSET ?2) AS c
    LEFT JOIN country AS co ON co.id = c.country_id
    LEFT JOIN country_language AS cl ON cl.country_id = co.id
    ORDER BY c.id, cl.language";

const BY_ID_SQL: &str = "
    SELECT c.id, c.name, c.district, c.population, c.country_id,
           co.id, co.code, co.code_2, co.name, co.continent, co.region,
           co.surface_area, co.population,
           cl.language, cl.is_official, cl.percentage
    FROM city AS c
    LEFT JOIN country AS co ON co.id = c.country_id
    LEFT JOIN country_language AS cl ON cl.country_id = co.id
    WHERE c.id = ?1
    ORDER BY cl.language";

/// Read access to cities. Every query join-fetches the country and its
/// languages, so callers never go back to the database per city.
pub struct CityDao<'a> {
    conn: &'a Connection,
}

impl<'a> CityDao<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn get_total_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM city", [], |r| r.get(0))?;
        Ok(count as usize)
    }

    /// Cities `[offset, offset + count)` in id order.
    pub fn get_items(&self, offset: usize, count: usize) -> Result<Vec<City>> {
        let mut stmt = self.conn.prepare_cached(PAGE_SQL)?;
        let rows = stmt.query_map(params![count as i64, offset as i64], joined_row)?;
        assemble(rows)
    }

    pub fn get_by_id(&self, id: i32) -> Result<Option<City>> {
        let mut stmt = self.conn.prepare_cached(BY_ID_SQL)?;
        let rows = stmt.query_map(params![id], joined_row)?;
        Ok(assemble(rows)?.into_iter().next())
    }
}

/// One result row: a city, its country if the join hit, and at most one
/// language of that country.
struct JoinedRow {
    city: City,
    country: Option<Country>,
    language: Option<CountryLanguage>,
}

fn joined_row(row: &Row<'_>) -> rusqlite::Result<JoinedRow> {
    let city = City {
        id: row.get(0)?,
        name: row.get(1)?,
        district: row.get(2)?,
        population: row.get(3)?,
        country_id: row.get(4)?,
        country: None,
    };

    let country = match row.get::<_, Option<i32>>(5)? {
        Some(id) => Some(Country {
            id,
            code: row.get(6)?,
            alternative_code: row.get(7)?,
            name: row.get(8)?,
            continent: continent_at(row, 9)?,
            region: row.get(10)?,
            surface_area: row.get(11)?,
            population: row.get(12)?,
            languages: Vec::new(),
        }),
        None => None,
    };

    let language = match row.get::<_, Option<String>>(13)? {
        Some(language) => Some(CountryLanguage {
            language,
            is_official: row.get(14)?,
            percentage: row.get(15)?,
        }),
        None => None,
    };

    Ok(JoinedRow {
        city,
        country,
        language,
    })
}

fn continent_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Continent> {
    let label: String = row.get(idx)?;
    label
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Fold joined rows (ordered by city id) into cities.
///
/// Each country is built once per call and shared between its cities; its
/// language list is deduplicated by name.
fn assemble<I>(rows: I) -> Result<Vec<City>>
where
    I: Iterator<Item = rusqlite::Result<JoinedRow>>,
{
    let mut cities: Vec<City> = Vec::new();
    let mut countries: HashMap<i32, (Country, BTreeMap<String, CountryLanguage>)> =
        HashMap::new();

    for row in rows {
        let JoinedRow {
            city,
            country,
            language,
        } = row?;

        if cities.last().map(|c| c.id) != Some(city.id) {
            cities.push(city);
        }

        if let Some(country) = country {
            let (_, languages) = countries
                .entry(country.id)
                .or_insert_with(|| (country, BTreeMap::new()));
            if let Some(language) = language {
                languages.insert(language.language.clone(), language);
            }
        }
    }

    let resolved: HashMap<i32, Arc<Country>> = countries
        .into_iter()
        .map(|(id, (mut country, languages))| {
            country.languages = languages.into_values().collect();
            (id, Arc::new(country))
        })
        .collect();

    for city in &mut cities {
        city.country = city.country_id.and_then(|id| resolved.get(&id).cloned());
    }

    Ok(cities)
}
