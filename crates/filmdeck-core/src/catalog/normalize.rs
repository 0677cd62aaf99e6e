//! Per-field parsing and missing-value policies for raw film rows.
//!
//! Each nullable column has exactly one imputation policy, implemented as a
//! named function below:
//!
//! * release year: median of the years that parsed ([`impute_years`]),
//! * gross: zero ([`fill_gross`]),
//! * meta score: mean of the scores that parsed ([`impute_meta_scores`]).
//!
//! Runtime, rating, votes, genres, title and director have no fallback; a
//! bad value there fails the whole load.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::{FilmdeckError, FilmdeckResult};
use crate::models::{
    decade_of, revenue_per_vote, Film, RatingCategory, RawFilmRow, COL_DIRECTOR, COL_GENRE,
    COL_TITLE,
};
use crate::query::guards::{MAX_ABS_YEAR, MAX_META_SCORE, RATING_SCALE_MAX};

static RUNTIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*(?:min)?\s*$").unwrap());

static GENRE_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*,\s*").unwrap());

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a release year; `None` when the cell is empty, not numeric, or
/// outside `[-MAX_ABS_YEAR, MAX_ABS_YEAR]`.
pub fn parse_year(raw: Option<&str>) -> Option<f64> {
    non_empty(raw)
        .and_then(parse_finite)
        .filter(|y| y.abs() <= MAX_ABS_YEAR)
}

/// Parse `"142 min"` (or a bare `"142"`) into minutes.
pub fn parse_runtime(row: usize, raw: Option<&str>) -> FilmdeckResult<u32> {
    let value = raw.unwrap_or_default();
    RUNTIME_RE
        .captures(value)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .ok_or_else(|| FilmdeckError::InvalidRuntime {
            row,
            value: value.to_string(),
        })
}

/// Parse `"28,341,469"` into a gross amount. Negative or non-numeric values
/// count as missing.
pub fn parse_gross(raw: Option<&str>) -> Option<f64> {
    let cleaned = non_empty(raw)?.replace(',', "");
    parse_finite(&cleaned).filter(|g| *g >= 0.0)
}

/// Parse a meta score; anything outside `[0, 100]` counts as missing.
pub fn parse_meta_score(raw: Option<&str>) -> Option<f64> {
    non_empty(raw)
        .and_then(parse_finite)
        .filter(|m| (0.0..=MAX_META_SCORE).contains(m))
}

pub fn parse_rating(row: usize, raw: Option<&str>) -> FilmdeckResult<f64> {
    non_empty(raw)
        .and_then(parse_finite)
        .filter(|r| (0.0..=RATING_SCALE_MAX).contains(r))
        .ok_or_else(|| FilmdeckError::InvalidRating {
            row,
            value: raw.unwrap_or_default().to_string(),
        })
}

/// Vote counts may carry thousands separators.
pub fn parse_votes(row: usize, raw: Option<&str>) -> FilmdeckResult<u64> {
    non_empty(raw)
        .and_then(|v| v.replace(',', "").parse::<u64>().ok())
        .ok_or_else(|| FilmdeckError::InvalidVotes {
            row,
            value: raw.unwrap_or_default().to_string(),
        })
}

/// Split `"Crime, Drama"` into `["Crime", "Drama"]`, keeping source order.
pub fn split_genres(row: usize, raw: Option<&str>) -> FilmdeckResult<Vec<String>> {
    let genres: Vec<String> = non_empty(raw)
        .map(|value| {
            GENRE_SPLIT_RE
                .split(value)
                .filter(|g| !g.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    if genres.is_empty() {
        return Err(FilmdeckError::EmptyGenres { row });
    }
    Ok(genres)
}

fn required_text(row: usize, raw: Option<&str>, column: &'static str) -> FilmdeckResult<String> {
    non_empty(raw)
        .map(str::to_string)
        .ok_or(FilmdeckError::MissingColumn { row, column })
}

// ---------------------------------------------------------------------------
// Imputation policies
// ---------------------------------------------------------------------------

/// Median of `values`, averaging the two middle values for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Fill missing years with the median of the parsed ones, then truncate every
/// year to an integer.
///
/// Fails with [`FilmdeckError::NoReleaseYears`] when nothing parsed.
pub fn impute_years(parsed: &[Option<f64>]) -> FilmdeckResult<Vec<i32>> {
    let known: Vec<f64> = parsed.iter().flatten().copied().collect();
    let fill = median(&known).ok_or(FilmdeckError::NoReleaseYears)?;
    Ok(parsed
        .iter()
        .map(|year| year.unwrap_or(fill).trunc() as i32)
        .collect())
}

/// Missing gross becomes zero.
pub fn fill_gross(gross: Option<f64>) -> f64 {
    gross.unwrap_or(0.0)
}

/// Fill missing meta scores with the mean of the parsed ones.
///
/// When no score parsed at all the fill value is `0.0`.
pub fn impute_meta_scores(parsed: &[Option<f64>]) -> Vec<f64> {
    let known: Vec<f64> = parsed.iter().flatten().copied().collect();
    let fill = mean(&known).unwrap_or_else(|| {
        if !parsed.is_empty() {
            warn!("no meta score parsed; filling {} rows with 0.0", parsed.len());
        }
        0.0
    });
    parsed.iter().map(|score| score.unwrap_or(fill)).collect()
}

// ---------------------------------------------------------------------------
// Row normalization
// ---------------------------------------------------------------------------

/// How many cells each imputation policy filled during a load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ImputationReport {
    pub years_imputed: usize,
    pub gross_filled: usize,
    pub meta_scores_imputed: usize,
}

/// Fields that parse row by row, before the catalog-wide fill pass.
struct PartialFilm {
    title: String,
    year: Option<f64>,
    runtime_minutes: u32,
    genres: Vec<String>,
    director: String,
    imdb_rating: f64,
    meta_score: Option<f64>,
    no_of_votes: u64,
    gross: Option<f64>,
}

fn parse_row(row: usize, raw: &RawFilmRow) -> FilmdeckResult<PartialFilm> {
    let year = parse_year(raw.released_year.as_deref());
    if year.is_none() {
        debug!(row, value = ?raw.released_year, "release year unparseable; imputing median");
    }
    let gross = parse_gross(raw.gross.as_deref());
    if gross.is_none() {
        debug!(row, value = ?raw.gross, "gross unparseable; filling 0");
    }
    let meta_score = parse_meta_score(raw.meta_score.as_deref());
    if meta_score.is_none() {
        debug!(row, value = ?raw.meta_score, "meta score unparseable; imputing mean");
    }

    let title = required_text(row, raw.title.as_deref(), COL_TITLE)?;
    let genre_text = required_text(row, raw.genre.as_deref(), COL_GENRE)?;

    Ok(PartialFilm {
        title,
        year,
        runtime_minutes: parse_runtime(row, raw.runtime.as_deref())?,
        genres: split_genres(row, Some(genre_text.as_str()))?,
        director: required_text(row, raw.director.as_deref(), COL_DIRECTOR)?,
        imdb_rating: parse_rating(row, raw.imdb_rating.as_deref())?,
        meta_score,
        no_of_votes: parse_votes(row, raw.no_of_votes.as_deref())?,
        gross,
    })
}

/// Normalize every raw row into a [`Film`].
///
/// Parsing is row-local; the year and meta-score fills need catalog-wide
/// statistics and run afterwards over the whole column.
pub fn normalize_rows(rows: &[RawFilmRow]) -> FilmdeckResult<(Vec<Film>, ImputationReport)> {
    if rows.is_empty() {
        return Err(FilmdeckError::EmptyCatalog);
    }

    let partials: Vec<PartialFilm> = rows
        .iter()
        .enumerate()
        .map(|(idx, raw)| parse_row(idx + 1, raw))
        .collect::<FilmdeckResult<_>>()?;

    let parsed_years: Vec<Option<f64>> = partials.iter().map(|p| p.year).collect();
    let parsed_meta: Vec<Option<f64>> = partials.iter().map(|p| p.meta_score).collect();

    let report = ImputationReport {
        years_imputed: parsed_years.iter().filter(|y| y.is_none()).count(),
        gross_filled: partials.iter().filter(|p| p.gross.is_none()).count(),
        meta_scores_imputed: parsed_meta.iter().filter(|m| m.is_none()).count(),
    };

    let years = impute_years(&parsed_years)?;
    let meta_scores = impute_meta_scores(&parsed_meta);

    let films: Vec<Film> = partials
        .into_iter()
        .zip(years)
        .zip(meta_scores)
        .map(|((partial, released_year), meta_score)| Film {
            decade: decade_of(released_year),
            rating_category: RatingCategory::from_rating(partial.imdb_rating),
            revenue_per_vote: revenue_per_vote(partial.gross, partial.no_of_votes),
            gross: fill_gross(partial.gross),
            title: partial.title,
            released_year,
            runtime_minutes: partial.runtime_minutes,
            genres: partial.genres,
            director: partial.director,
            imdb_rating: partial.imdb_rating,
            meta_score,
            no_of_votes: partial.no_of_votes,
        })
        .collect();

    info!(
        films = films.len(),
        years_imputed = report.years_imputed,
        gross_filled = report.gross_filled,
        meta_scores_imputed = report.meta_scores_imputed,
        "normalized film rows"
    );

    Ok((films, report))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
