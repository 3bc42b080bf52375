//! Table layout of the world database and the insert helpers used to seed it.
//!
//! - `country`: one row per country
//! - `country_language`: languages per country, unique by (country_id, language)
//! - `city`: one row per city, `country_id` nullable and unenforced

use rusqlite::{params, Connection};
use world_core::types::Country;

use crate::error::Result;

/// A city row to insert. `id: None` lets SQLite assign the key.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCity {
    pub id: Option<i32>,
    pub name: String,
    pub district: String,
    pub population: i32,
    pub country_id: Option<i32>,
}

pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS country (
            id              INTEGER PRIMARY KEY,
            code            TEXT NOT NULL UNIQUE,
            code_2          TEXT NOT NULL,
            name            TEXT NOT NULL,
            continent       TEXT NOT NULL,
            region          TEXT NOT NULL,
            surface_area    REAL NOT NULL,
            population      INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS country_language (
            id              INTEGER PRIMARY KEY,
            country_id      INTEGER NOT NULL REFERENCES country(id),
            language        TEXT NOT NULL,
            is_official     INTEGER NOT NULL,
            percentage      REAL NOT NULL,
            UNIQUE (country_id, language)
        );

        CREATE TABLE IF NOT EXISTS city (
            id              INTEGER PRIMARY KEY,
            name            TEXT NOT NULL,
            district        TEXT NOT NULL,
            population      INTEGER NOT NULL,
            country_id      INTEGER REFERENCES country(id)
        );

        CREATE INDEX IF NOT EXISTS idx_city_country ON city (country_id);
        ",
    )?;
    Ok(())
}

/// True once all three world tables exist.
pub fn has_world_tables(conn: &Connection) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master
         WHERE type = 'table' AND name IN ('country', 'country_language', 'city')",
        [],
        |r| r.get(0),
    )?;
    Ok(count == 3)
}

/// Insert a country and all of its languages.
pub fn insert_country(conn: &Connection, country: &Country) -> Result<()> {
    let mut country_stmt = conn.prepare_cached(
        "INSERT INTO country (id, code, code_2, name, continent, region, surface_area, population)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;
    country_stmt.execute(params![
        country.id,
        country.code,
        country.alternative_code,
        country.name,
        country.continent.as_str(),
        country.region,
        country.surface_area,
        country.population,
    ])?;

    let mut language_stmt = conn.prepare_cached(
        "INSERT INTO country_language (country_id, language, is_official, percentage)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    for language in &country.languages {
        language_stmt.execute(params![
            country.id,
            language.language,
            language.is_official,
            language.percentage,
        ])?;
    }
    Ok(())
}

/// Insert a city and return the id it was stored under.
pub fn insert_city(conn: &Connection, city: &NewCity) -> Result<i32> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO city (id, name, district, population, country_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    stmt.execute(params![
        city.id,
        city.name,
        city.district,
        city.population,
        city.country_id,
    ])?;

    let id = match city.id {
        Some(id) => id,
        None => conn.last_insert_rowid() as i32,
    };
    Ok(id)
}
