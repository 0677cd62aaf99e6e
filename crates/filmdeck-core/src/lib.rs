//! filmdeck core library: the query backend of the film catalog dashboard.
//!
//! The catalog is loaded and normalized once ([`catalog::Catalog`]); every
//! query then filters it ([`query::filter`]), derives the chart views
//! ([`query::aggregate`]) and the headline numbers ([`query::metrics`]).
//! Rendering is left to the caller. With the `python` feature the crate also
//! builds as the `_filmdeck_core` Python extension module.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod models;
pub mod query;

#[cfg(feature = "python")]
pub mod python;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::{Catalog, CatalogSummary};
pub use config::DashboardConfig;
pub use errors::{FilmdeckError, FilmdeckResult};
pub use models::{Film, RatingCategory, RawFilmRow};
pub use query::controls::{ControlBounds, Controls};
pub use query::engine::{run_batch, run_query, QueryResult};
pub use query::filter::{filter, GenreFilter, Query};
pub use query::guards::ViewLimits;

#[cfg(feature = "python")]
use pyo3::prelude::*;

// ---------------------------------------------------------------------------
// Top-level Python module: _filmdeck_core
// ---------------------------------------------------------------------------

#[cfg(feature = "python")]
#[pymodule]
fn _filmdeck_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python::register(m)
}
