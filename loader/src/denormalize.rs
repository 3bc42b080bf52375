//! Flattening of a city and its country into one cache document.

use world_core::types::{City, CityCountry, Language, LanguageSet};

use crate::error::{LoaderError, Result};

/// Build the cache document for `city`.
///
/// Pure: no I/O, and `city` is only read. Languages are copied into fresh
/// values so the document does not borrow from the relational model.
pub fn flatten(city: &City) -> Result<CityCountry> {
    let country = city.country.as_deref().ok_or(LoaderError::Integrity {
        city_id: city.id,
        country_id: city.country_id,
    })?;

    let languages: LanguageSet = country
        .languages
        .iter()
        .map(|l| Language {
            language: l.language.clone(),
            is_official: l.is_official,
            percentage: l.percentage,
        })
        .collect();

    Ok(CityCountry {
        id: city.id,
        name: city.name.clone(),
        district: city.district.clone(),
        population: city.population,
        country_code: country.code.clone(),
        alternative_country_code: country.alternative_code.clone(),
        country_name: country.name.clone(),
        continent: country.continent,
        country_region: country.region.clone(),
        country_surface_area: country.surface_area,
        country_population: country.population,
        languages,
    })
}

/// Flatten a whole extraction, stopping at the first city without a country.
///
/// Nothing is returned for a batch that fails, so an integrity error never
/// lets part of the batch reach the cache.
pub fn flatten_all(cities: &[City]) -> Result<Vec<CityCountry>> {
    let records = cities.iter().map(flatten).collect::<Result<Vec<_>>>()?;
    log::info!("Flattened {} cities.", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use world_core::types::{Continent, Country, CountryLanguage};

    fn france() -> Arc<Country> {
        Arc::new(Country {
            id: 73,
            code: "FRA".into(),
            alternative_code: "FR".into(),
            name: "France".into(),
            continent: Continent::Europe,
            region: "Western Europe".into(),
            surface_area: 551_500.0,
            population: 59_225_700,
            languages: vec![
                CountryLanguage {
                    language: "French".into(),
                    is_official: true,
                    percentage: 93.6,
                },
                CountryLanguage {
                    language: "Arabic".into(),
                    is_official: false,
                    percentage: 2.5,
                },
            ],
        })
    }

    fn toulouse(country: Option<Arc<Country>>) -> City {
        City {
            id: 9,
            name: "Toulouse".into(),
            district: "Midi-Pyrénées".into(),
            population: 390_350,
            country_id: Some(73),
            country,
        }
    }

    #[test]
    fn scalar_fields_are_copied_exactly() {
        let city = toulouse(Some(france()));
        let record = flatten(&city).unwrap();

        assert_eq!(record.id, 9);
        assert_eq!(record.name, "Toulouse");
        assert_eq!(record.district, "Midi-Pyrénées");
        assert_eq!(record.population, 390_350);
        assert_eq!(record.country_code, "FRA");
        assert_eq!(record.alternative_country_code, "FR");
        assert_eq!(record.country_name, "France");
        assert_eq!(record.continent, Continent::Europe);
        assert_eq!(record.country_region, "Western Europe");
        assert_eq!(record.country_surface_area, 551_500.0);
        assert_eq!(record.country_population, 59_225_700);
    }

    #[test]
    fn languages_match_as_a_set() {
        let city = toulouse(Some(france()));
        let record = flatten(&city).unwrap();

        let expected: LanguageSet = vec![
            Language {
                language: "Arabic".into(),
                is_official: false,
                percentage: 2.5,
            },
            Language {
                language: "French".into(),
                is_official: true,
                percentage: 93.6,
            },
        ]
        .into();
        assert_eq!(record.languages, expected);
    }

    #[test]
    fn input_is_left_untouched() {
        let city = toulouse(Some(france()));
        let before = city.clone();
        flatten(&city).unwrap();
        assert_eq!(city, before);
    }

    #[test]
    fn document_outlives_the_country() {
        let country = france();
        let record = {
            let city = toulouse(Some(Arc::clone(&country)));
            flatten(&city).unwrap()
        };
        drop(country);
        assert!(record.languages.contains("French"));
    }

    #[test]
    fn unresolved_country_is_an_integrity_error() {
        let city = toulouse(None);
        match flatten(&city) {
            Err(LoaderError::Integrity {
                city_id,
                country_id,
            }) => {
                assert_eq!(city_id, 9);
                assert_eq!(country_id, Some(73));
            }
            other => panic!("expected integrity error, got {other:?}"),
        }
    }

    #[test]
    fn flatten_all_aborts_on_first_unresolved_city() {
        let mut orphan = toulouse(None);
        orphan.id = 10;
        let cities = vec![toulouse(Some(france())), orphan];

        assert!(matches!(
            flatten_all(&cities),
            Err(LoaderError::Integrity { city_id: 10, .. })
        ));
    }

    #[test]
    fn flatten_all_keeps_one_record_per_city() {
        let country = france();
        let cities: Vec<City> = (1..=3)
            .map(|id| City {
                id,
                ..toulouse(Some(Arc::clone(&country)))
            })
            .collect();

        let records = flatten_all(&cities).unwrap();
        let ids: Vec<i32> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
