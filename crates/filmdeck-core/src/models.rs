//! Shared typed models used across the catalog and query layers.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Source column names
// ---------------------------------------------------------------------------

pub const COL_TITLE: &str = "Series_Title";
pub const COL_GENRE: &str = "Genre";
pub const COL_DIRECTOR: &str = "Director";

// ---------------------------------------------------------------------------
// 1. RawFilmRow
// ---------------------------------------------------------------------------

/// One undecoded row of the source table.
///
/// Every field is kept as text; empty cells decode to `None`. Columns not
/// listed here (poster link, certificate, overview, stars) are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawFilmRow {
    #[serde(rename = "Series_Title")]
    pub title: Option<String>,
    #[serde(rename = "Released_Year")]
    pub released_year: Option<String>,
    #[serde(rename = "Runtime")]
    pub runtime: Option<String>,
    #[serde(rename = "Genre")]
    pub genre: Option<String>,
    #[serde(rename = "Director")]
    pub director: Option<String>,
    #[serde(rename = "IMDB_Rating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Meta_score")]
    pub meta_score: Option<String>,
    #[serde(rename = "No_of_Votes")]
    pub no_of_votes: Option<String>,
    #[serde(rename = "Gross")]
    pub gross: Option<String>,
}

// ---------------------------------------------------------------------------
// 2. RatingCategory
// ---------------------------------------------------------------------------

/// Coarse rating band derived from the IMDB rating.
///
/// Bands are right-closed: `(.., 7]`, `(7, 8]`, `(8, 9]`, `(9, 10]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RatingCategory {
    Low,
    Good,
    VeryGood,
    Excellent,
}

impl RatingCategory {
    pub fn from_rating(rating: f64) -> Self {
        if rating <= 7.0 {
            Self::Low
        } else if rating <= 8.0 {
            Self::Good
        } else if rating <= 9.0 {
            Self::VeryGood
        } else {
            Self::Excellent
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low (<7)",
            Self::Good => "Good (7-8)",
            Self::VeryGood => "Very Good (8-9)",
            Self::Excellent => "Excellent (9+)",
        }
    }
}

impl fmt::Display for RatingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// 3. Film
// ---------------------------------------------------------------------------

/// A normalized catalog record.
///
/// Built only by the catalog normalizer; every field is populated and the
/// derived fields (`decade`, `rating_category`, `revenue_per_vote`) agree
/// with the source fields.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Film {
    pub title: String,
    pub released_year: i32,
    pub runtime_minutes: u32,
    pub genres: Vec<String>,
    pub director: String,
    pub imdb_rating: f64,
    pub meta_score: f64,
    pub no_of_votes: u64,
    pub gross: f64,
    pub decade: i32,
    pub rating_category: RatingCategory,
    pub revenue_per_vote: f64,
}

impl Film {
    /// Exact, case-sensitive genre membership.
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

/// `(year / 10) * 10`, flooring toward negative infinity.
pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

/// Gross revenue per vote; zero when there are no votes or no gross.
pub fn revenue_per_vote(gross: Option<f64>, votes: u64) -> f64 {
    match gross {
        Some(g) if votes > 0 && g.is_finite() => g / votes as f64,
        _ => 0.0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
