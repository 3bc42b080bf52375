//! Deterministic synthetic world data for seeding and benchmarking.
//!
//! Sizes default to those of the classic `world` sample database, so every
//! id in the benchmark list exists after seeding.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use world_core::types::{Continent, Country, CountryLanguage};

use crate::error::Result;
use crate::relational::schema::{insert_city, insert_country, NewCity};
use crate::relational::WorldDb;

const SEED: u64 = 0x0057_0031_D000_CAFE;

const LANGUAGE_POOL: [&str; 24] = [
    "Arabic", "Bengali", "Catalan", "Dutch", "English", "French", "German", "Greek", "Hindi",
    "Italian", "Japanese", "Korean", "Malay", "Mandarin", "Persian", "Polish", "Portuguese",
    "Quechua", "Russian", "Spanish", "Swahili", "Turkish", "Urdu", "Wolof",
];

#[derive(Debug, Clone, Copy)]
pub struct WorldParams {
    pub countries: usize,
    pub cities: usize,
    /// Upper bound on languages per country (at least one is always given).
    pub max_languages: usize,
}

impl WorldParams {
    /// 239 countries and 4,079 cities.
    pub fn standard() -> Self {
        Self {
            countries: 239,
            cities: 4_079,
            max_languages: 6,
        }
    }
}

/// Generated rows, ids assigned from 1 in order.
pub struct SyntheticWorld {
    pub countries: Vec<Country>,
    pub cities: Vec<NewCity>,
}

pub fn generate_synthetic(params: &WorldParams) -> SyntheticWorld {
    let mut rng = StdRng::seed_from_u64(SEED);
    let max_languages = params.max_languages.clamp(1, LANGUAGE_POOL.len());

    let countries: Vec<Country> = (1..=params.countries)
        .map(|n| {
            let id = n as i32;
            let code = alpha_code(n, 3);
            let language_count = rng.gen_range(1..=max_languages);
            let mut share_left = 100.0_f64;
            let languages = LANGUAGE_POOL
                .choose_multiple(&mut rng, language_count)
                .enumerate()
                .map(|(i, &language)| {
                    let percentage = if i + 1 == language_count {
                        share_left
                    } else {
                        (share_left * rng.gen_range(0.3..0.9) * 10.0).round() / 10.0
                    };
                    share_left = ((share_left - percentage) * 10.0).round() / 10.0;
                    CountryLanguage {
                        language: language.to_string(),
                        is_official: i == 0,
                        percentage,
                    }
                })
                .collect();

            Country {
                id,
                alternative_code: code[..2].to_string(),
                name: format!("Country {code}"),
                code,
                continent: *Continent::ALL.choose(&mut rng).unwrap_or(&Continent::Asia),
                region: format!("Region {}", n % 25 + 1),
                surface_area: (rng.gen_range(100.0..5_000_000.0_f64) * 10.0).round() / 10.0,
                population: rng.gen_range(10_000..200_000_000),
                languages,
            }
        })
        .collect();

    let cities = (1..=params.cities)
        .map(|n| {
            let country_id = if countries.is_empty() {
                None
            } else {
                Some(rng.gen_range(1..=countries.len()) as i32)
            };
            NewCity {
                id: Some(n as i32),
                name: format!("City {n:04}"),
                district: format!("District {}", n % 97 + 1),
                population: rng.gen_range(1_000..10_000_000),
                country_id,
            }
        })
        .collect();

    SyntheticWorld { countries, cities }
}

/// Insert a generated world in one transaction. Returns the city count.
pub fn seed_world(db: &mut WorldDb, world: &SyntheticWorld) -> Result<usize> {
    let tx = db.write_transaction()?;
    for country in &world.countries {
        insert_country(&tx, country)?;
    }
    for city in &world.cities {
        insert_city(&tx, city)?;
    }
    tx.commit()?;

    log::info!(
        "Seeded {} countries and {} cities.",
        world.countries.len(),
        world.cities.len()
    );
    Ok(world.cities.len())
}

/// Upper-case letter code for `n` (1 -> "AAA", 2 -> "AAB", ...).
fn alpha_code(n: usize, width: usize) -> String {
    let mut rest = n - 1;
    let mut letters = vec![b'A'; width];
    for slot in letters.iter_mut().rev() {
        *slot = b'A' + (rest % 26) as u8;
        rest /= 26;
    }
    String::from_utf8_lossy(&letters).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn small() -> WorldParams {
        WorldParams {
            countries: 30,
            cities: 200,
            max_languages: 4,
        }
    }

    #[test]
    fn alpha_codes_are_sequential() {
        assert_eq!(alpha_code(1, 3), "AAA");
        assert_eq!(alpha_code(2, 3), "AAB");
        assert_eq!(alpha_code(27, 3), "ABA");
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate_synthetic(&small());
        let b = generate_synthetic(&small());
        assert_eq!(a.countries, b.countries);
        assert_eq!(a.cities, b.cities);
    }

    #[test]
    fn countries_have_unique_codes_and_languages() {
        let world = generate_synthetic(&small());
        let codes: HashSet<&str> = world.countries.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes.len(), world.countries.len());

        for country in &world.countries {
            let names: HashSet<&str> =
                country.languages.iter().map(|l| l.language.as_str()).collect();
            assert_eq!(names.len(), country.languages.len());
            assert!(!country.languages.is_empty());
            let total: f64 = country.languages.iter().map(|l| l.percentage).sum();
            assert!(total <= 100.0 + 1e-6, "{} sums to {total}", country.code);
        }
    }

    #[test]
    fn every_city_references_a_generated_country() {
        let world = generate_synthetic(&small());
        for city in &world.cities {
            let id = city.country_id.unwrap();
            assert!(id >= 1 && id as usize <= world.countries.len());
        }
    }

    #[test]
    fn seeding_writes_every_city() {
        let mut db = WorldDb::open_in_memory().unwrap();
        let world = generate_synthetic(&small());
        assert_eq!(seed_world(&mut db, &world).unwrap(), 200);

        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM city", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 200);
    }
}
