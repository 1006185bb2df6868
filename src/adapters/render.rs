//! Text, JSON and CSV presentation of catalog views.

use serde::Serialize;
use std::fmt::Write as _;
use std::str::FromStr;

use crate::config::DisplayPreferences;
use crate::core::guide::GuideReply;
use crate::core::query::QueryView;
use crate::core::reviews::{RatingSummary, StarBucket};
use crate::domain::model::{Category, Difficulty, MonasteryRecord, Review};
use crate::utils::error::{CatalogError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 3] = ["table", "json", "csv"];
}

impl FromStr for OutputFormat {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(CatalogError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: format!("Valid formats: {}", OutputFormat::NAMES.join(", ")),
            }),
        }
    }
}

/// Flat listing row shared by the JSON and CSV outputs.
#[derive(Debug, Clone, Serialize)]
pub struct ListingRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub location: &'a str,
    pub tradition: &'a str,
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub founded: Option<i32>,
    pub featured: bool,
}

impl<'a> ListingRow<'a> {
    pub fn new(record: &'a MonasteryRecord, prefs: &DisplayPreferences) -> Self {
        Self {
            id: &record.id,
            name: record.display_name(prefs.language),
            location: &record.location,
            tradition: &record.tradition,
            category: record.category,
            difficulty: record.difficulty,
            rating: record.rating,
            review_count: record.review_count,
            founded: record.founded,
            featured: record.featured,
        }
    }
}

fn to_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CatalogError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| CatalogError::ConfigError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

pub fn render_list(view: &QueryView<'_>, prefs: &DisplayPreferences) -> Result<String> {
    let rows: Vec<ListingRow<'_>> = view
        .records
        .iter()
        .map(|record| ListingRow::new(record, prefs))
        .collect();

    match prefs.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
        OutputFormat::Csv => to_csv(&rows),
        OutputFormat::Table => {
            let mut out = String::new();
            if rows.is_empty() {
                out.push_str("No monasteries found matching your criteria.\n");
            }
            for row in &rows {
                let featured = if row.featured { " [Featured]" } else { "" };
                let _ = writeln!(
                    out,
                    "{:>3}  {}{}  ({})",
                    row.id,
                    row.name,
                    featured,
                    or_dash(row.category)
                );
                let _ = writeln!(
                    out,
                    "     {} | {} | rating {} ({} reviews) | founded {} | {} access",
                    row.location,
                    row.tradition,
                    row.rating.map_or_else(|| "-".to_string(), |r| format!("{:.1}", r)),
                    row.review_count.unwrap_or(0),
                    or_dash(row.founded),
                    or_dash(row.difficulty)
                );
            }
            let _ = writeln!(out, "{}, sorted by {}", view.summary(), view.sort);
            Ok(out)
        }
    }
}

pub fn render_detail(record: &MonasteryRecord, prefs: &DisplayPreferences) -> Result<String> {
    match prefs.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => to_csv(&[ListingRow::new(record, prefs)]),
        OutputFormat::Table => {
            let mut out = String::new();
            let _ = writeln!(out, "{}", record.display_name(prefs.language));
            if !prefs.language.prefers_local_names() && !record.name_local.is_empty() {
                let _ = writeln!(out, "{}", record.name_local);
            }
            let _ = writeln!(out, "{}\n", record.location);
            for (label, text) in [
                ("About", &record.description),
                ("History", &record.history),
                ("Significance", &record.significance),
            ] {
                if !text.is_empty() {
                    let _ = writeln!(out, "{}: {}", label, text);
                }
            }
            let _ = writeln!(out);
            for (label, value) in [
                ("Tradition", record.tradition.clone()),
                ("Founded", or_dash(record.founded)),
                ("Difficulty", or_dash(record.difficulty)),
                ("Visiting hours", record.visiting_hours.clone()),
                ("Entry fee", record.entry_fee.clone()),
                ("Best time to visit", record.best_time_to_visit.clone()),
                ("Duration", record.duration.clone()),
                ("Altitude", record.altitude.clone()),
            ] {
                if !value.is_empty() {
                    let _ = writeln!(out, "{:<20}{}", label, value);
                }
            }
            if let Some(coords) = record.coordinates {
                let _ = writeln!(out, "{:<20}{:.4}, {:.4}", "Coordinates", coords.lat, coords.lng);
            }
            if !record.facilities.is_empty() {
                let _ = writeln!(out, "{:<20}{}", "Facilities", record.facilities.join(", "));
            }
            if !record.nearby_attractions.is_empty() {
                let _ = writeln!(out, "{:<20}{}", "Nearby", record.nearby_attractions.join(", "));
            }
            if !record.accommodations.is_empty() {
                let _ = writeln!(out, "\nPlaces to stay:");
                for stay in &record.accommodations {
                    let _ = writeln!(
                        out,
                        "  {} ({:?}, {}) rating {:.1}, {}",
                        stay.name, stay.kind, stay.distance, stay.rating, stay.price_range
                    );
                }
            }
            if !record.restaurants.is_empty() {
                let _ = writeln!(out, "\nDining:");
                for place in &record.restaurants {
                    let _ = writeln!(
                        out,
                        "  {} ({}, {}) rating {:.1}, {}",
                        place.name, place.cuisine, place.distance, place.rating, place.price_range
                    );
                }
            }
            Ok(out)
        }
    }
}

#[derive(Serialize)]
struct ReviewDigest<'a> {
    id: &'a str,
    average: f64,
    total_reviews: u32,
    distribution: &'a [StarBucket],
    reviews: &'a [&'a Review],
}

pub fn render_reviews(
    record: &MonasteryRecord,
    summary: &RatingSummary,
    reviews: &[&Review],
    prefs: &DisplayPreferences,
) -> Result<String> {
    match prefs.format {
        OutputFormat::Json => {
            let digest = ReviewDigest {
                id: &record.id,
                average: summary.average,
                total_reviews: summary.total_reviews,
                distribution: &summary.distribution,
                reviews,
            };
            Ok(serde_json::to_string_pretty(&digest)?)
        }
        OutputFormat::Csv => to_csv(reviews),
        OutputFormat::Table => {
            let mut out = String::new();
            let _ = writeln!(
                out,
                "{}: {:.1} average from {} reviews",
                record.display_name(prefs.language),
                summary.average,
                summary.total_reviews
            );
            for bucket in &summary.distribution {
                let _ = writeln!(
                    out,
                    "  {} star  {:>3}  {:>5.1}%",
                    bucket.stars, bucket.count, bucket.percentage
                );
            }
            let _ = writeln!(out);
            for review in reviews {
                let _ = writeln!(
                    out,
                    "{} - {} ({} stars, {} found helpful)",
                    review.date, review.author, review.rating, review.helpful
                );
                let _ = writeln!(out, "  {}", review.comment);
            }
            Ok(out)
        }
    }
}

/// Guide replies have no tabular shape, so csv is refused.
pub fn render_guide_reply(reply: &GuideReply, prefs: &DisplayPreferences) -> Result<String> {
    match prefs.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(reply)?),
        OutputFormat::Table => Ok(format!("{}\n", reply.message)),
        OutputFormat::Csv => Err(CatalogError::InvalidConfigValueError {
            field: "format".to_string(),
            value: "csv".to_string(),
            reason: "Guide replies support table or json".to_string(),
        }),
    }
}
