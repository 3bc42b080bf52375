use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

use super::Continent;

/// A city joined with its country, as stored in the key-value cache.
///
/// Everything needed to render the city is inlined; nothing refers back to
/// the relational rows it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityCountry {
    pub id: i32,
    pub name: String,
    pub district: String,
    pub population: i32,
    pub country_code: String,
    pub alternative_country_code: String,
    pub country_name: String,
    pub continent: Continent,
    pub country_region: String,
    pub country_surface_area: f64,
    pub country_population: i32,
    pub languages: LanguageSet,
}

impl CityCountry {
    pub fn cache_key(&self) -> String {
        self.id.to_string()
    }
}

/// A language spoken in the city's country, copied by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub language: String,
    pub is_official: bool,
    pub percentage: f64,
}

/// Set of languages keyed by language name.
///
/// Two sets are equal when they hold the same languages, regardless of the
/// order they were inserted in. Serialized as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Language>", into = "Vec<Language>")]
pub struct LanguageSet {
    by_name: BTreeMap<String, Language>,
}

impl LanguageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `language`, returning the entry it replaced if the name was
    /// already present.
    pub fn insert(&mut self, language: Language) -> Option<Language> {
        self.by_name.insert(language.language.clone(), language)
    }

    pub fn get(&self, name: &str) -> Option<&Language> {
        self.by_name.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn iter(&self) -> btree_map::Values<'_, String, Language> {
        self.by_name.values()
    }
}

impl FromIterator<Language> for LanguageSet {
    fn from_iter<I: IntoIterator<Item = Language>>(iter: I) -> Self {
        let mut set = LanguageSet::new();
        for language in iter {
            set.insert(language);
        }
        set
    }
}

impl From<Vec<Language>> for LanguageSet {
    fn from(languages: Vec<Language>) -> Self {
        languages.into_iter().collect()
    }
}

impl From<LanguageSet> for Vec<Language> {
    fn from(set: LanguageSet) -> Self {
        set.by_name.into_values().collect()
    }
}

impl<'a> IntoIterator for &'a LanguageSet {
    type Item = &'a Language;
    type IntoIter = btree_map::Values<'a, String, Language>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn language(name: &str, is_official: bool, percentage: f64) -> Language {
        Language {
            language: name.to_string(),
            is_official,
            percentage,
        }
    }

    #[test]
    fn insertion_order_does_not_affect_equality() {
        let a: LanguageSet = vec![
            language("Basque", false, 0.4),
            language("French", true, 93.6),
            language("Arabic", false, 2.5),
        ]
        .into();
        let b: LanguageSet = vec![
            language("Arabic", false, 2.5),
            language("Basque", false, 0.4),
            language("French", true, 93.6),
        ]
        .into();
        assert_eq!(a, b);
    }

    #[test]
    fn same_name_replaces_previous_entry() {
        let mut set = LanguageSet::new();
        assert!(set.insert(language("French", false, 10.0)).is_none());
        let replaced = set.insert(language("French", true, 100.0));

        assert_eq!(replaced, Some(language("French", false, 10.0)));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("French"), Some(&language("French", true, 100.0)));
    }

    #[test]
    fn differing_percentage_breaks_equality() {
        let a: LanguageSet = vec![language("French", true, 100.0)].into();
        let b: LanguageSet = vec![language("French", true, 99.0)].into();
        assert_ne!(a, b);
    }

    #[test]
    fn serializes_as_array() {
        let set: LanguageSet = vec![language("French", true, 100.0)].into();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(
            json,
            r#"[{"language":"French","isOfficial":true,"percentage":100.0}]"#
        );
    }
}
