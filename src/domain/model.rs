use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::CatalogError;

/// 參訪難度，宣告順序即排序順序 (Easy < Moderate < Challenging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Moderate,
    Challenging,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Challenging => "Challenging",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Ancient,
    Modern,
    Small,
    Large,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Ancient => "Ancient",
            Category::Modern => "Modern",
            Category::Small => "Small",
            Category::Large => "Large",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccommodationType {
    Hotel,
    Guesthouse,
    Homestay,
    Resort,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accommodation {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccommodationType,
    pub distance: String,
    pub rating: f64,
    pub price_range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    pub cuisine: String,
    pub distance: String,
    pub rating: f64,
    pub price_range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub author: String,
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub helpful: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonasteryRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub name_local: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub history: String,
    #[serde(default)]
    pub significance: String,
    #[serde(default)]
    pub founded: Option<i32>,
    #[serde(default)]
    pub tradition: String,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub visiting_hours: String,
    #[serde(default)]
    pub entry_fee: String,
    #[serde(default)]
    pub best_time_to_visit: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub altitude: String,
    #[serde(default)]
    pub nearby_attractions: Vec<String>,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub accommodations: Vec<Accommodation>,
    #[serde(default)]
    pub restaurants: Vec<Restaurant>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl MonasteryRecord {
    /// Minimal record with only identity and name set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            name_local: String::new(),
            location: String::new(),
            coordinates: None,
            description: String::new(),
            history: String::new(),
            significance: String::new(),
            founded: None,
            tradition: String::new(),
            difficulty: None,
            rating: None,
            review_count: None,
            visiting_hours: String::new(),
            entry_fee: String::new(),
            best_time_to_visit: String::new(),
            duration: String::new(),
            altitude: String::new(),
            nearby_attractions: Vec::new(),
            facilities: Vec::new(),
            images: Vec::new(),
            featured: false,
            category: None,
            accommodations: Vec::new(),
            restaurants: Vec::new(),
            reviews: Vec::new(),
        }
    }

    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    pub fn review_count_or_zero(&self) -> u32 {
        self.review_count.unwrap_or(0)
    }

    pub fn founded_or_zero(&self) -> i32 {
        self.founded.unwrap_or(0)
    }

    pub fn difficulty_or_easy(&self) -> Difficulty {
        self.difficulty.unwrap_or(Difficulty::Easy)
    }

    /// 依語言偏好挑選顯示名稱；藏語與錫金語使用在地名稱
    pub fn display_name(&self, language: Language) -> &str {
        if language.prefers_local_names() && !self.name_local.is_empty() {
            &self.name_local
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "ne")]
    Nepali,
    #[serde(rename = "si")]
    Sikkimese,
    #[serde(rename = "bo")]
    Tibetan,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Hindi,
        Language::Nepali,
        Language::Sikkimese,
        Language::Tibetan,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Nepali => "ne",
            Language::Sikkimese => "si",
            Language::Tibetan => "bo",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Nepali => "Nepali",
            Language::Sikkimese => "Sikkimese",
            Language::Tibetan => "Tibetan",
        }
    }

    pub fn native_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "हिन्दी",
            Language::Nepali => "नेपाली",
            Language::Sikkimese => "སུ་ཁིམ་སྐད།",
            Language::Tibetan => "བོད་སྐད།",
        }
    }

    pub fn prefers_local_names(self) -> bool {
        matches!(self, Language::Sikkimese | Language::Tibetan)
    }
}

impl FromStr for Language {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == code)
            .ok_or(CatalogError::UnknownLanguageError { code })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_order() {
        assert!(Difficulty::Easy < Difficulty::Moderate);
        assert!(Difficulty::Moderate < Difficulty::Challenging);
    }

    #[test]
    fn test_record_defaults_from_sparse_json() {
        let record: MonasteryRecord =
            serde_json::from_str(r#"{"id": "7", "name": "Ralang Monastery"}"#).unwrap();

        assert_eq!(record.rating_or_zero(), 0.0);
        assert_eq!(record.review_count_or_zero(), 0);
        assert_eq!(record.difficulty_or_easy(), Difficulty::Easy);
        assert!(!record.featured);
        assert!(record.category.is_none());
    }

    #[test]
    fn test_accommodation_type_field_name() {
        let json = r#"{"name": "Hotel Garuda", "type": "Hotel", "distance": "2 km", "rating": 4.1, "price_range": "x"}"#;
        let stay: Accommodation = serde_json::from_str(json).unwrap();
        assert_eq!(stay.kind, AccommodationType::Hotel);
    }

    #[test]
    fn test_language_parsing_and_display_name() {
        assert_eq!("BO".parse::<Language>().unwrap(), Language::Tibetan);
        assert!("fr".parse::<Language>().is_err());

        let mut record = MonasteryRecord::new("1", "Rumtek Monastery");
        record.name_local = "རུམ་ཐེག་དགོན་པ།".to_string();
        assert_eq!(record.display_name(Language::English), "Rumtek Monastery");
        assert_eq!(record.display_name(Language::Tibetan), "རུམ་ཐེག་དགོན་པ།");
    }
}
