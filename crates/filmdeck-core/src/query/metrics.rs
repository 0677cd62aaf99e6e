//! Scalar summaries of a filtered subset.

use serde::Serialize;

use crate::models::Film;

/// Headline numbers for a subset.
///
/// `avg_rating` is `None` for an empty subset ("no data"); it serializes as
/// JSON `null` rather than a NaN or a misleading zero.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Metrics {
    pub count: usize,
    pub avg_rating: Option<f64>,
    pub total_votes: u64,
    pub total_gross: f64,
}

pub fn summarize(subset: &[&Film]) -> Metrics {
    let count = subset.len();
    let avg_rating = (count > 0)
        .then(|| subset.iter().map(|f| f.imdb_rating).sum::<f64>() / count as f64);
    Metrics {
        count,
        avg_rating,
        total_votes: subset
            .iter()
            .fold(0u64, |acc, f| acc.saturating_add(f.no_of_votes)),
        total_gross: subset.iter().map(|f| f.gross).sum(),
    }
}
