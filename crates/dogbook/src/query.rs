//! Filtering and sorting for dog lists.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::dog::DogRecord;

/// Order in which a list is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most recent first
    #[default]
    Newest,
    /// Earliest first
    Oldest,
}

/// Which timestamp a list is sorted by.
///
/// Lists of met dogs go by the day the dog was met; the user's own dogs
/// go by when they were added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// `metAt`
    #[default]
    MetAt,
    /// `createdAt`
    CreatedAt,
}

impl SortKey {
    fn of(self, dog: &DogRecord) -> DateTime<Utc> {
        match self {
            Self::MetAt => dog.met_at,
            Self::CreatedAt => dog.created_at,
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Newest => write!(f, "newest"),
            Self::Oldest => write!(f, "oldest"),
        }
    }
}

/// Breed filter, name search and sort order for a list of dogs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DogQuery {
    /// Only keep dogs of exactly this breed. `None` keeps all breeds.
    pub breed: Option<String>,
    /// Case-insensitive substring of the name. Blank matches everything.
    pub search: Option<String>,
    /// Sort direction.
    pub sort: SortOrder,
    /// Timestamp to sort by.
    pub sort_key: SortKey,
}

impl DogQuery {
    /// A query that keeps everything, newest first.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one breed.
    #[must_use]
    pub fn breed(mut self, breed: impl Into<String>) -> Self {
        self.breed = Some(breed.into());
        self
    }

    /// Search names.
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Set the sort order.
    #[must_use]
    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Set the timestamp to sort by.
    #[must_use]
    pub fn sort_key(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }

    /// Whether a single record passes the breed and name filters.
    #[must_use]
    pub fn matches(&self, dog: &DogRecord) -> bool {
        if let Some(breed) = &self.breed {
            if dog.breed != *breed {
                return false;
            }
        }

        // Blank queries match everything; others are matched as typed,
        // surrounding spaces included.
        match self.search.as_deref() {
            Some(text) if !text.trim().is_empty() => dog
                .name
                .to_lowercase()
                .contains(&text.to_lowercase()),
            _ => true,
        }
    }

    /// Filter and sort a list. Dogs with equal timestamps keep their
    /// relative order.
    #[must_use]
    pub fn apply(&self, dogs: &[DogRecord]) -> Vec<DogRecord> {
        let mut result: Vec<DogRecord> =
            dogs.iter().filter(|dog| self.matches(dog)).cloned().collect();

        let key = self.sort_key;
        match self.sort {
            SortOrder::Newest => result.sort_by(|a, b| key.of(b).cmp(&key.of(a))),
            SortOrder::Oldest => result.sort_by(|a, b| key.of(a).cmp(&key.of(b))),
        }
        result
    }
}

/// Distinct breeds present in a list, sorted.
#[must_use]
pub fn breeds(dogs: &[DogRecord]) -> Vec<String> {
    dogs.iter()
        .map(|dog| dog.breed.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dog::NewDog;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn dog(id: &str, name: &str, breed: &str, met_at: &str) -> DogRecord {
        NewDog::new(name, breed)
            .into_record_at(id.to_string(), at(met_at))
            .unwrap()
    }

    fn sample() -> Vec<DogRecord> {
        vec![
            dog("1", "Rex", "Lab", "2024-03-01T00:00:00Z"),
            dog("2", "Bella", "Poodle", "2024-01-01T00:00:00Z"),
            dog("3", "Rexford", "Beagle", "2024-02-01T00:00:00Z"),
            dog("4", "Max", "Lab", "2024-04-01T00:00:00Z"),
        ]
    }

    fn ids(dogs: &[DogRecord]) -> Vec<&str> {
        dogs.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_default_sorts_newest_first() {
        let result = DogQuery::new().apply(&sample());
        assert_eq!(ids(&result), vec!["4", "1", "3", "2"]);
    }

    #[test]
    fn test_oldest_first() {
        let result = DogQuery::new().sort(SortOrder::Oldest).apply(&sample());
        assert_eq!(ids(&result), vec!["2", "3", "1", "4"]);
    }

    #[test]
    fn test_breed_filter() {
        let result = DogQuery::new().breed("Lab").apply(&sample());
        assert_eq!(ids(&result), vec!["4", "1"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let result = DogQuery::new().search("REX").apply(&sample());
        assert_eq!(ids(&result), vec!["1", "3"]);
    }

    #[test]
    fn test_blank_search_matches_all() {
        let result = DogQuery::new().search("   ").apply(&sample());
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_search_keeps_surrounding_spaces() {
        assert!(DogQuery::new().search(" rex").apply(&sample()).is_empty());
        assert_eq!(ids(&DogQuery::new().search("rex").apply(&sample())), vec!["1", "3"]);
    }

    #[test]
    fn test_sort_by_created_at() {
        let mut early = dog("early", "Early", "Lab", "2024-05-01T00:00:00Z");
        early.created_at = at("2024-01-01T00:00:00Z");
        let mut late = dog("late", "Late", "Lab", "2024-01-01T00:00:00Z");
        late.created_at = at("2024-06-01T00:00:00Z");
        let dogs = vec![early, late];

        assert_eq!(ids(&DogQuery::new().apply(&dogs)), vec!["early", "late"]);
        assert_eq!(
            ids(&DogQuery::new().sort_key(SortKey::CreatedAt).apply(&dogs)),
            vec!["late", "early"]
        );
        assert_eq!(
            ids(&DogQuery::new()
                .sort_key(SortKey::CreatedAt)
                .sort(SortOrder::Oldest)
                .apply(&dogs)),
            vec!["early", "late"]
        );
    }

    #[test]
    fn test_combined_filters() {
        let result = DogQuery::new()
            .breed("Lab")
            .search("ma")
            .sort(SortOrder::Oldest)
            .apply(&sample());
        assert_eq!(ids(&result), vec!["4"]);
    }

    #[test]
    fn test_equal_dates_keep_input_order() {
        let dogs = vec![
            dog("a", "A", "Lab", "2024-01-01T00:00:00Z"),
            dog("b", "B", "Lab", "2024-01-01T00:00:00Z"),
        ];
        assert_eq!(ids(&DogQuery::new().apply(&dogs)), vec!["a", "b"]);
        assert_eq!(
            ids(&DogQuery::new().sort(SortOrder::Oldest).apply(&dogs)),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_breeds_are_distinct_and_sorted() {
        assert_eq!(breeds(&sample()), vec!["Beagle", "Lab", "Poodle"]);
        assert!(breeds(&[]).is_empty());
    }

    #[test]
    fn test_sort_order_display_and_parse() {
        assert_eq!(SortOrder::default().to_string(), "newest");
        assert_eq!(SortOrder::from_str("oldest", true), Ok(SortOrder::Oldest));
        assert!(SortOrder::from_str("sideways", true).is_err());
    }
}
