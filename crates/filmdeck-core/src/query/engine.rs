//! Query → subset → views + metrics, as one result bundle.

use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::errors::FilmdeckResult;
use crate::models::Film;
use crate::query::aggregate::{aggregate, Aggregations};
use crate::query::filter::{filter, Query};
use crate::query::guards::ViewLimits;
use crate::query::metrics::{summarize, Metrics};

/// Everything the view layer renders for one query.
#[derive(Clone, Debug, Serialize)]
pub struct QueryResult<'a> {
    pub query: Query,
    /// Digest of the catalog source, when known.
    pub version_token: Option<&'a str>,
    pub films: Vec<&'a Film>,
    pub views: Aggregations<'a>,
    pub metrics: Metrics,
}

impl QueryResult<'_> {
    pub fn to_json(&self) -> FilmdeckResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Run one query against the full catalog. Nothing is cached between calls.
pub fn run_query<'a>(catalog: &'a Catalog, query: &Query, limits: &ViewLimits) -> QueryResult<'a> {
    let started = Instant::now();
    let films = filter(catalog, query);
    let views = aggregate(&films, limits);
    let metrics = summarize(&films);

    debug!(
        year_min = query.year_min(),
        year_max = query.year_max(),
        genre = query.genre().as_selection(),
        min_rating = query.min_rating(),
        matched = films.len(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "query evaluated"
    );

    QueryResult {
        query: query.clone(),
        version_token: catalog.version_token(),
        films,
        views,
        metrics,
    }
}

/// Evaluate independent queries in parallel over the shared catalog.
/// Results come back in input order.
pub fn run_batch<'a>(
    catalog: &'a Catalog,
    queries: &[Query],
    limits: &ViewLimits,
) -> Vec<QueryResult<'a>> {
    queries
        .par_iter()
        .map(|query| run_query(catalog, query, limits))
        .collect()
}
