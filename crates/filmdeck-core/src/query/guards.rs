//! Shared guardrails for query bounds and view sizes.

// Rating scale
pub const RATING_SCALE_MIN: f64 = 0.0;
pub const RATING_SCALE_MAX: f64 = 10.0;
pub const DEFAULT_RATING_FLOOR: f64 = 5.0;
pub const MAX_META_SCORE: f64 = 100.0;
/// Parsed years beyond this magnitude are treated as unparseable.
pub const MAX_ABS_YEAR: f64 = 9999.0;

// View sizes
pub const TOP_GENRES: usize = 10;
pub const TOP_DIRECTORS: usize = 10;
pub const MIN_DIRECTOR_FILMS: usize = 2;
pub const MOST_VOTED_LIMIT: usize = 30;
pub const RATING_HISTOGRAM_BINS: usize = 20;

// Upper bounds for configurable view sizes
pub const MAX_VIEW_LIMIT: usize = 1000;
pub const MAX_HISTOGRAM_BINS: usize = 200;

/// Genre selection value that means "no genre restriction".
pub const MATCH_ALL_GENRES: &str = "all";

pub fn clamp_int(value: i64, minimum: i64, maximum: i64) -> i64 {
    value.max(minimum).min(maximum)
}

pub fn clamp_limit(value: i64, maximum: usize) -> usize {
    clamp_int(value, 1, maximum as i64) as usize
}

/// Clamp a rating into `[floor, RATING_SCALE_MAX]`. NaN maps to `floor`.
pub fn clamp_rating(value: f64, floor: f64) -> f64 {
    if value.is_nan() {
        return floor;
    }
    value.max(floor).min(RATING_SCALE_MAX)
}

pub fn clamp_year(value: i32, year_min: i32, year_max: i32) -> i32 {
    value.max(year_min).min(year_max)
}

/// Size limits for the aggregation views.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewLimits {
    pub top_genres: usize,
    pub top_directors: usize,
    pub min_director_films: usize,
    pub most_voted: usize,
    pub histogram_bins: usize,
}

impl Default for ViewLimits {
    fn default() -> Self {
        Self {
            top_genres: TOP_GENRES,
            top_directors: TOP_DIRECTORS,
            min_director_films: MIN_DIRECTOR_FILMS,
            most_voted: MOST_VOTED_LIMIT,
            histogram_bins: RATING_HISTOGRAM_BINS,
        }
    }
}
