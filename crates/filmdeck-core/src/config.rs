//! Environment-driven configuration.

use std::path::PathBuf;

use crate::errors::{FilmdeckError, FilmdeckResult};
use crate::query::guards::{
    clamp_limit, clamp_rating, ViewLimits, DEFAULT_RATING_FLOOR, MAX_HISTOGRAM_BINS,
    MAX_VIEW_LIMIT, RATING_SCALE_MIN,
};

pub const ENV_DATA: &str = "FILMDECK_DATA";
pub const ENV_RATING_FLOOR: &str = "FILMDECK_RATING_FLOOR";
pub const ENV_TOP_GENRES: &str = "FILMDECK_TOP_GENRES";
pub const ENV_TOP_DIRECTORS: &str = "FILMDECK_TOP_DIRECTORS";
pub const ENV_MIN_DIRECTOR_FILMS: &str = "FILMDECK_MIN_DIRECTOR_FILMS";
pub const ENV_MOST_VOTED: &str = "FILMDECK_MOST_VOTED";
pub const ENV_HISTOGRAM_BINS: &str = "FILMDECK_HISTOGRAM_BINS";

pub const DEFAULT_DATA_PATH: &str = "imdb_top_1000.csv";

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    /// Lowest value the rating control offers, and its reset value.
    pub rating_floor: f64,
    pub limits: ViewLimits,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            rating_floor: DEFAULT_RATING_FLOOR,
            limits: ViewLimits::default(),
        }
    }
}

fn read_limit<F>(lookup: &F, key: &str, default: usize, maximum: usize) -> FilmdeckResult<usize>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => {
            let parsed: i64 = val
                .trim()
                .parse()
                .map_err(|_| FilmdeckError::Config(format!("{key}={val:?} is not an integer")))?;
            Ok(clamp_limit(parsed, maximum))
        }
        None => Ok(default),
    }
}

impl DashboardConfig {
    pub fn from_env() -> FilmdeckResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> FilmdeckResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_path = lookup(ENV_DATA)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        let rating_floor = match lookup(ENV_RATING_FLOOR) {
            Some(val) => {
                let parsed: f64 = val
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| {
                        FilmdeckError::Config(format!("{ENV_RATING_FLOOR}={val:?} is not a number"))
                    })?;
                clamp_rating(parsed, RATING_SCALE_MIN)
            }
            None => defaults.rating_floor,
        };

        let base = defaults.limits;
        let limits = ViewLimits {
            top_genres: read_limit(&lookup, ENV_TOP_GENRES, base.top_genres, MAX_VIEW_LIMIT)?,
            top_directors: read_limit(
                &lookup,
                ENV_TOP_DIRECTORS,
                base.top_directors,
                MAX_VIEW_LIMIT,
            )?,
            min_director_films: read_limit(
                &lookup,
                ENV_MIN_DIRECTOR_FILMS,
                base.min_director_films,
                MAX_VIEW_LIMIT,
            )?,
            most_voted: read_limit(&lookup, ENV_MOST_VOTED, base.most_voted, MAX_VIEW_LIMIT)?,
            histogram_bins: read_limit(
                &lookup,
                ENV_HISTOGRAM_BINS,
                base.histogram_bins,
                MAX_HISTOGRAM_BINS,
            )?,
        };

        Ok(Self {
            data_path,
            rating_floor,
            limits,
        })
    }
}
