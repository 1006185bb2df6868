//! Catalog query engine: free-text search, a named filter and a named sort
//! over the static monastery collection.
//!
//! Evaluation is a pure function of its inputs. Unknown filter or sort keys
//! degrade to `all` / unsorted through [`FilterKey::parse_lenient`] and
//! [`SortKey::parse_lenient`]; the `FromStr` impls are the strict variants.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::model::{Category, Difficulty, MonasteryRecord};
use crate::utils::error::{CatalogError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterKey {
    #[default]
    All,
    Featured,
    Category(Category),
    Difficulty(Difficulty),
}

impl FilterKey {
    pub const KEYS: [&'static str; 9] = [
        "all",
        "featured",
        "ancient",
        "modern",
        "small",
        "large",
        "easy",
        "moderate",
        "challenging",
    ];

    /// Parse a key, falling back to [`FilterKey::All`] when it is unknown.
    pub fn parse_lenient(key: &str) -> Self {
        key.parse().unwrap_or_else(|_| {
            tracing::debug!("Unknown filter key '{}', using 'all'", key);
            FilterKey::All
        })
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            FilterKey::All => "all",
            FilterKey::Featured => "featured",
            FilterKey::Category(Category::Ancient) => "ancient",
            FilterKey::Category(Category::Modern) => "modern",
            FilterKey::Category(Category::Small) => "small",
            FilterKey::Category(Category::Large) => "large",
            FilterKey::Difficulty(Difficulty::Easy) => "easy",
            FilterKey::Difficulty(Difficulty::Moderate) => "moderate",
            FilterKey::Difficulty(Difficulty::Challenging) => "challenging",
        }
    }

    pub fn matches(&self, record: &MonasteryRecord) -> bool {
        match self {
            FilterKey::All => true,
            FilterKey::Featured => record.featured,
            FilterKey::Category(category) => record.category == Some(*category),
            FilterKey::Difficulty(difficulty) => record.difficulty == Some(*difficulty),
        }
    }
}

impl FromStr for FilterKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        let key = match s.trim().to_ascii_lowercase().as_str() {
            "all" => FilterKey::All,
            "featured" => FilterKey::Featured,
            "ancient" => FilterKey::Category(Category::Ancient),
            "modern" => FilterKey::Category(Category::Modern),
            "small" => FilterKey::Category(Category::Small),
            "large" => FilterKey::Category(Category::Large),
            "easy" => FilterKey::Difficulty(Difficulty::Easy),
            "moderate" => FilterKey::Difficulty(Difficulty::Moderate),
            "challenging" => FilterKey::Difficulty(Difficulty::Challenging),
            _ => {
                return Err(CatalogError::UnknownFilterKeyError { key: s.to_string() });
            }
        };
        Ok(key)
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Rating,
    Founded,
    Difficulty,
    Reviews,
    /// Keep collection order.
    Unsorted,
}

impl SortKey {
    pub const KEYS: [&'static str; 5] = ["name", "rating", "founded", "difficulty", "reviews"];

    /// Parse a key, falling back to [`SortKey::Unsorted`] when it is unknown.
    pub fn parse_lenient(key: &str) -> Self {
        key.parse().unwrap_or_else(|_| {
            tracing::debug!("Unknown sort key '{}', keeping catalog order", key);
            SortKey::Unsorted
        })
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Rating => "rating",
            SortKey::Founded => "founded",
            SortKey::Difficulty => "difficulty",
            SortKey::Reviews => "reviews",
            SortKey::Unsorted => "none",
        }
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        let key = match s.trim().to_ascii_lowercase().as_str() {
            "name" => SortKey::Name,
            "rating" => SortKey::Rating,
            "founded" => SortKey::Founded,
            "difficulty" => SortKey::Difficulty,
            "reviews" => SortKey::Reviews,
            _ => return Err(CatalogError::UnknownSortKeyError { key: s.to_string() }),
        };
        Ok(key)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: String,
    pub filter: FilterKey,
    pub sort: SortKey,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// 寬鬆模式：未知的 key 回退為預設值
    pub fn from_keys(search: &str, filter: &str, sort: &str) -> Self {
        Self {
            search: search.to_string(),
            filter: FilterKey::parse_lenient(filter),
            sort: SortKey::parse_lenient(sort),
        }
    }

    /// 嚴格模式：未知的 key 直接回報錯誤
    pub fn from_keys_strict(search: &str, filter: &str, sort: &str) -> Result<Self> {
        Ok(Self {
            search: search.to_string(),
            filter: filter.parse()?,
            sort: sort.parse()?,
        })
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_filter(mut self, filter: FilterKey) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }
}

/// Ordered, filtered borrow of the collection.
#[derive(Debug, Clone)]
pub struct QueryView<'a> {
    pub records: Vec<&'a MonasteryRecord>,
    pub total: usize,
    pub sort: SortKey,
}

impl<'a> QueryView<'a> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> Vec<&'a str> {
        self.records.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn summary(&self) -> String {
        format!("{} of {} monasteries", self.records.len(), self.total)
    }
}

fn matches_search(record: &MonasteryRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [
        &record.name,
        &record.name_local,
        &record.description,
        &record.location,
        &record.tradition,
    ]
    .into_iter()
    .any(|field| field.to_lowercase().contains(needle))
}

pub fn filter_records<'a, I>(records: I, search: &str, filter: FilterKey) -> Vec<&'a MonasteryRecord>
where
    I: IntoIterator<Item = &'a MonasteryRecord>,
{
    let needle = search.to_lowercase();
    records
        .into_iter()
        .filter(|record| matches_search(record, &needle) && filter.matches(record))
        .collect()
}

/// Stable sort; ties keep their relative input order.
pub fn sort_records(records: &mut [&MonasteryRecord], sort: SortKey) {
    match sort {
        SortKey::Name => records.sort_by_cached_key(|r| r.name.to_lowercase()),
        SortKey::Rating => records.sort_by(|a, b| {
            b.rating_or_zero()
                .partial_cmp(&a.rating_or_zero())
                .unwrap_or(Ordering::Equal)
        }),
        SortKey::Founded => records.sort_by_key(|r| r.founded_or_zero()),
        SortKey::Difficulty => records.sort_by_key(|r| r.difficulty_or_easy()),
        SortKey::Reviews => {
            records.sort_by(|a, b| b.review_count_or_zero().cmp(&a.review_count_or_zero()))
        }
        SortKey::Unsorted => {}
    }
}

pub fn run_query<'a>(records: &'a [MonasteryRecord], query: &CatalogQuery) -> QueryView<'a> {
    let mut matched = filter_records(records, &query.search, query.filter);
    sort_records(&mut matched, query.sort);

    tracing::debug!(
        "Query search='{}' filter={} sort={} matched {} of {}",
        query.search,
        query.filter,
        query.sort,
        matched.len(),
        records.len()
    );

    QueryView {
        records: matched,
        total: records.len(),
        sort: query.sort,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, rating: Option<f64>) -> MonasteryRecord {
        let mut r = MonasteryRecord::new(id, name);
        r.rating = rating;
        r
    }

    fn sample() -> Vec<MonasteryRecord> {
        let mut rumtek = record("1", "Rumtek", Some(4.8));
        rumtek.featured = true;
        rumtek.location = "Gangtok, East Sikkim".to_string();
        rumtek.tradition = "Karma Kagyu".to_string();
        rumtek.founded = Some(1966);
        rumtek.review_count = Some(1247);
        rumtek.difficulty = Some(Difficulty::Easy);

        let mut dubdi = record("2", "Dubdi", Some(4.6));
        dubdi.category = Some(Category::Ancient);
        dubdi.description = "The oldest monastery in Sikkim".to_string();
        dubdi.founded = Some(1701);
        dubdi.review_count = Some(298);
        dubdi.difficulty = Some(Difficulty::Moderate);

        let mut enchey = record("3", "enchey", Some(4.6));
        enchey.tradition = "Nyingma".to_string();
        enchey.difficulty = Some(Difficulty::Challenging);

        let unrated = record("4", "Lingdum", None);

        vec![rumtek, dubdi, enchey, unrated]
    }

    fn ids(view: &QueryView<'_>) -> Vec<String> {
        view.ids().into_iter().map(str::to_string).collect()
    }

    #[test]
    fn test_rating_sort_example() {
        let records = vec![record("A", "Rumtek", Some(4.8)), record("B", "Dubdi", Some(4.6))];
        let view = run_query(&records, &CatalogQuery::from_keys("", "all", "rating"));
        assert_eq!(ids(&view), vec!["A", "B"]);

        let view = run_query(&records, &CatalogQuery::from_keys("rum", "all", "rating"));
        assert_eq!(ids(&view), vec!["A"]);
    }

    #[test]
    fn test_category_filter_example() {
        let mut records = vec![record("A", "Rumtek", Some(4.8)), record("B", "Dubdi", Some(4.6))];
        records[1].category = Some(Category::Ancient);

        let view = run_query(&records, &CatalogQuery::from_keys("", "ancient", "name"));
        assert_eq!(ids(&view), vec!["B"]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let records = sample();
        let by_location = run_query(&records, &CatalogQuery::new().with_search("GANGTOK"));
        assert_eq!(ids(&by_location), vec!["1"]);

        let by_tradition = run_query(&records, &CatalogQuery::new().with_search("nyingma"));
        assert_eq!(ids(&by_tradition), vec!["3"]);

        let by_description = run_query(&records, &CatalogQuery::new().with_search("Oldest"));
        assert_eq!(ids(&by_description), vec!["2"]);
    }

    #[test]
    fn test_empty_search_matches_all() {
        let records = sample();
        let view = run_query(&records, &CatalogQuery::from_keys("", "all", "none-such"));
        assert_eq!(ids(&view), vec!["1", "2", "3", "4"]);
        assert_eq!(view.summary(), "4 of 4 monasteries");
    }

    #[test]
    fn test_filter_is_idempotent() {
        let records = sample();
        let once = filter_records(&records, "i", FilterKey::All);
        let twice = filter_records(once.iter().copied(), "i", FilterKey::All);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_featured_filter_counts_flags() {
        let records = sample();
        let view = run_query(&records, &CatalogQuery::new().with_filter(FilterKey::Featured));
        let flagged = records.iter().filter(|r| r.featured).count();
        assert_eq!(view.len(), flagged);
        assert!(view.records.iter().all(|r| r.featured));
    }

    #[test]
    fn test_name_sort_is_case_insensitive_and_non_decreasing() {
        let records = sample();
        let view = run_query(&records, &CatalogQuery::new().with_sort(SortKey::Name));
        assert_eq!(ids(&view), vec!["2", "3", "4", "1"]);

        let names: Vec<String> = view.records.iter().map(|r| r.name.to_lowercase()).collect();
        assert!(names.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_rating_sort_is_stable_and_treats_missing_as_zero() {
        let records = sample();
        let view = run_query(&records, &CatalogQuery::new().with_sort(SortKey::Rating));
        // Dubdi and enchey tie at 4.6 and keep their input order.
        assert_eq!(ids(&view), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_founded_difficulty_and_reviews_sorts() {
        let records = sample();

        let founded = run_query(&records, &CatalogQuery::new().with_sort(SortKey::Founded));
        assert_eq!(ids(&founded), vec!["3", "4", "2", "1"]);

        let difficulty = run_query(&records, &CatalogQuery::new().with_sort(SortKey::Difficulty));
        assert_eq!(ids(&difficulty), vec!["1", "4", "2", "3"]);

        let reviews = run_query(&records, &CatalogQuery::new().with_sort(SortKey::Reviews));
        assert_eq!(ids(&reviews), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_sort_is_a_permutation() {
        let records = sample();
        for key in SortKey::KEYS {
            let view = run_query(&records, &CatalogQuery::from_keys("", "all", key));
            let mut sorted = ids(&view);
            sorted.sort();
            assert_eq!(sorted, vec!["1", "2", "3", "4"], "sort key {}", key);
        }
    }

    #[test]
    fn test_unknown_keys_fall_back() {
        assert_eq!(FilterKey::parse_lenient("popular"), FilterKey::All);
        assert_eq!(SortKey::parse_lenient("distance"), SortKey::Unsorted);
        assert_eq!(FilterKey::parse_lenient("Ancient"), FilterKey::Category(Category::Ancient));
    }

    #[test]
    fn test_strict_keys_report_errors() {
        assert!(matches!(
            CatalogQuery::from_keys_strict("", "popular", "name"),
            Err(CatalogError::UnknownFilterKeyError { .. })
        ));
        assert!(matches!(
            CatalogQuery::from_keys_strict("", "all", "distance"),
            Err(CatalogError::UnknownSortKeyError { .. })
        ));
        assert!(CatalogQuery::from_keys_strict("", "easy", "founded").is_ok());
    }

    #[test]
    fn test_filter_keys_round_trip_through_as_key() {
        for key in FilterKey::KEYS {
            let parsed: FilterKey = key.parse().unwrap();
            assert_eq!(parsed.as_key(), key);
        }
    }
}
