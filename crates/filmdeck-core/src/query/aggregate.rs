//! Derived views over a filtered subset.
//!
//! Every view is computed independently from the same subset; none of them
//! fails on an empty subset, they just come back empty.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::models::Film;
use crate::query::guards::ViewLimits;

// ---------------------------------------------------------------------------
// View rows
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct YearlyTrendRow {
    pub year: i32,
    pub average_rating: f64,
    pub film_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DirectorStanding {
    pub director: String,
    pub average_rating: f64,
    pub film_count: usize,
}

/// One rating-histogram bucket, `[lower, upper)` except the last, which is
/// closed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// All views derived from one subset.
#[derive(Clone, Debug, Serialize)]
pub struct Aggregations<'a> {
    pub yearly_trend: Vec<YearlyTrendRow>,
    pub top_genres: Vec<GenreCount>,
    pub top_directors: Vec<DirectorStanding>,
    pub revenue_films: Vec<&'a Film>,
    pub most_voted: Vec<&'a Film>,
    pub rating_histogram: Vec<HistogramBin>,
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Mean rating and film count per release year, oldest year first.
pub fn yearly_trend(subset: &[&Film]) -> Vec<YearlyTrendRow> {
    let mut by_year: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for film in subset {
        let entry = by_year.entry(film.released_year).or_insert((0.0, 0));
        entry.0 += film.imdb_rating;
        entry.1 += 1;
    }
    by_year
        .into_iter()
        .map(|(year, (sum, count))| YearlyTrendRow {
            year,
            average_rating: sum / count as f64,
            film_count: count,
        })
        .collect()
}

/// The `limit` most frequent genres. A film counts once toward each of its
/// genres; ties keep first-seen order.
pub fn genre_frequency(subset: &[&Film], limit: usize) -> Vec<GenreCount> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for film in subset {
        for genre in &film.genres {
            *counts.entry(genre.as_str()).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<GenreCount> = counts
        .into_iter()
        .map(|(genre, count)| GenreCount {
            genre: genre.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}

/// Directors with at least `min_films` films, best mean rating first, at most
/// `limit` of them. Ties keep first-seen order.
pub fn director_leaderboard(
    subset: &[&Film],
    min_films: usize,
    limit: usize,
) -> Vec<DirectorStanding> {
    let mut groups: IndexMap<&str, (f64, usize)> = IndexMap::new();
    for film in subset {
        let entry = groups.entry(film.director.as_str()).or_insert((0.0, 0));
        entry.0 += film.imdb_rating;
        entry.1 += 1;
    }
    let mut standings: Vec<DirectorStanding> = groups
        .into_iter()
        .filter(|(_, (_, count))| *count >= min_films)
        .map(|(director, (sum, count))| DirectorStanding {
            director: director.to_string(),
            average_rating: sum / count as f64,
            film_count: count,
        })
        .collect();
    standings.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating));
    standings.truncate(limit);
    standings
}

/// Films with strictly positive gross, for a log-scaled revenue axis.
pub fn revenue_subset<'a>(subset: &[&'a Film]) -> Vec<&'a Film> {
    subset.iter().copied().filter(|film| film.gross > 0.0).collect()
}

/// The `limit` most-voted films, returned in ascending vote order.
pub fn most_voted<'a>(subset: &[&'a Film], limit: usize) -> Vec<&'a Film> {
    let mut ranked: Vec<&'a Film> = subset.to_vec();
    ranked.sort_by(|a, b| b.no_of_votes.cmp(&a.no_of_votes));
    ranked.truncate(limit);
    ranked.sort_by_key(|film| film.no_of_votes);
    ranked
}

/// Equal-width rating histogram spanning the subset's own rating range.
pub fn rating_histogram(subset: &[&Film], bins: usize) -> Vec<HistogramBin> {
    let Some(first) = subset.first() else {
        return Vec::new();
    };
    let (lo, hi) = subset.iter().fold(
        (first.imdb_rating, first.imdb_rating),
        |(lo, hi), film| (lo.min(film.imdb_rating), hi.max(film.imdb_rating)),
    );
    let bins = bins.max(1);
    let width = (hi - lo) / bins as f64;
    if width <= 0.0 {
        return vec![HistogramBin {
            lower: lo,
            upper: hi,
            count: subset.len(),
        }];
    }

    let mut counts = vec![0usize; bins];
    for film in subset {
        let idx = (((film.imdb_rating - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + i as f64 * width,
            upper: if i + 1 == bins {
                hi
            } else {
                lo + (i + 1) as f64 * width
            },
            count,
        })
        .collect()
}

pub fn aggregate<'a>(subset: &[&'a Film], limits: &ViewLimits) -> Aggregations<'a> {
    Aggregations {
        yearly_trend: yearly_trend(subset),
        top_genres: genre_frequency(subset, limits.top_genres),
        top_directors: director_leaderboard(
            subset,
            limits.min_director_films,
            limits.top_directors,
        ),
        revenue_films: revenue_subset(subset),
        most_voted: most_voted(subset, limits.most_voted),
        rating_histogram: rating_histogram(subset, limits.histogram_bins),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
