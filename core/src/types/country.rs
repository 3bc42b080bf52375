use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Continent label of a country, stored as text in the `country` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Continent {
    Asia,
    Europe,
    #[serde(rename = "North America")]
    NorthAmerica,
    Africa,
    Oceania,
    Antarctica,
    #[serde(rename = "South America")]
    SouthAmerica,
}

impl Continent {
    pub const ALL: [Continent; 7] = [
        Continent::Asia,
        Continent::Europe,
        Continent::NorthAmerica,
        Continent::Africa,
        Continent::Oceania,
        Continent::Antarctica,
        Continent::SouthAmerica,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Continent::Asia => "Asia",
            Continent::Europe => "Europe",
            Continent::NorthAmerica => "North America",
            Continent::Africa => "Africa",
            Continent::Oceania => "Oceania",
            Continent::Antarctica => "Antarctica",
            Continent::SouthAmerica => "South America",
        }
    }
}

/// Returned when a continent column holds a label outside [`Continent::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownContinent(pub String);

impl fmt::Display for UnknownContinent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown continent label {:?}", self.0)
    }
}

impl std::error::Error for UnknownContinent {}

impl FromStr for Continent {
    type Err = UnknownContinent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Continent::ALL
            .into_iter()
            .find(|continent| continent.as_str() == s)
            .ok_or_else(|| UnknownContinent(s.to_string()))
    }
}

/// One row of `country_language`.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryLanguage {
    pub language: String,
    pub is_official: bool,
    /// Share of speakers, 0 to 100.
    pub percentage: f64,
}

/// A row of the `country` table together with all of its languages.
#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub id: i32,
    /// ISO 3166-1 alpha-3 code.
    pub code: String,
    /// ISO 3166-1 alpha-2 code.
    pub alternative_code: String,
    pub name: String,
    pub continent: Continent,
    pub region: String,
    pub surface_area: f64,
    pub population: i32,
    /// Unique by `language`; order carries no meaning.
    pub languages: Vec<CountryLanguage>,
}
