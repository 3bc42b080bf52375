//! Entity types: the relational city/country model and the flattened cache
//! document built from it.

mod city;
mod city_country;
mod country;

pub use city::City;
pub use city_country::{CityCountry, Language, LanguageSet};
pub use country::{Continent, Country, CountryLanguage, UnknownContinent};
