use serde::Serialize;
use std::str::FromStr;

use crate::domain::model::{MonasteryRecord, Review};
use crate::utils::error::{CatalogError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewSort {
    #[default]
    Recent,
    Helpful,
    Rating,
    Unsorted,
}

impl ReviewSort {
    pub fn parse_lenient(key: &str) -> Self {
        key.parse().unwrap_or_else(|_| {
            tracing::debug!("Unknown review sort '{}', keeping listed order", key);
            ReviewSort::Unsorted
        })
    }
}

impl FromStr for ReviewSort {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recent" => Ok(ReviewSort::Recent),
            "helpful" => Ok(ReviewSort::Helpful),
            "rating" => Ok(ReviewSort::Rating),
            _ => Err(CatalogError::UnknownSortKeyError { key: s.to_string() }),
        }
    }
}

/// `None` keeps every rating; `Some(n)` keeps exact n-star reviews.
pub fn parse_star_filter(key: &str) -> Option<u8> {
    match key.trim().parse::<u8>() {
        Ok(stars @ 1..=5) => Some(stars),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StarBucket {
    pub stars: u8,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSummary {
    pub average: f64,
    pub total_reviews: u32,
    pub distribution: Vec<StarBucket>,
}

/// 評分摘要：平均分與總數取自寺院資料，分布則統計已列出的評論
pub fn rating_summary(record: &MonasteryRecord) -> RatingSummary {
    let total = record.review_count_or_zero();
    let distribution = (1..=5u8)
        .rev()
        .map(|stars| {
            let count = record.reviews.iter().filter(|r| r.rating == stars).count();
            let percentage = if total > 0 {
                count as f64 / f64::from(total) * 100.0
            } else {
                0.0
            };
            StarBucket {
                stars,
                count,
                percentage,
            }
        })
        .collect();

    RatingSummary {
        average: record.rating_or_zero(),
        total_reviews: total,
        distribution,
    }
}

pub fn select_reviews(reviews: &[Review], stars: Option<u8>, sort: ReviewSort) -> Vec<&Review> {
    let mut selected: Vec<&Review> = reviews
        .iter()
        .filter(|r| stars.map_or(true, |s| r.rating == s))
        .collect();

    match sort {
        ReviewSort::Recent => selected.sort_by(|a, b| b.date.cmp(&a.date)),
        ReviewSort::Helpful => selected.sort_by(|a, b| b.helpful.cmp(&a.helpful)),
        ReviewSort::Rating => selected.sort_by(|a, b| b.rating.cmp(&a.rating)),
        ReviewSort::Unsorted => {}
    }
    selected
}
