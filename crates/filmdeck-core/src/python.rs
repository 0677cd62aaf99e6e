//! Python bindings for the dashboard view layer.
//!
//! Results cross the boundary as JSON strings; the dashboard decodes them
//! with `json.loads` and owns all formatting.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use pyo3::prelude::*;

use crate::catalog::Catalog;
use crate::config::DashboardConfig;
use crate::errors::FilmdeckError;
use crate::query::controls::Controls;
use crate::query::engine::run_query;
use crate::query::filter::{GenreFilter, Query};
use crate::query::guards::{ViewLimits, MATCH_ALL_GENRES};

// ---------------------------------------------------------------------------
// FilmCatalog
// ---------------------------------------------------------------------------

/// A loaded, read-only catalog plus the config it was loaded with.
#[pyclass(frozen)]
pub struct FilmCatalog {
    catalog: Arc<Catalog>,
    config: DashboardConfig,
}

#[pymethods]
impl FilmCatalog {
    /// Load the catalog named by `path`, or by `FILMDECK_DATA` when omitted.
    #[staticmethod]
    #[pyo3(signature = (path=None))]
    fn load(py: Python<'_>, path: Option<PathBuf>) -> PyResult<Self> {
        let mut config = DashboardConfig::from_env()?;
        if let Some(path) = path {
            config.data_path = path;
        }
        let data_path = config.data_path.clone();
        let catalog = py.allow_threads(move || Catalog::load(&data_path))?;
        Ok(Self {
            catalog: Arc::new(catalog),
            config,
        })
    }

    fn __len__(&self) -> usize {
        self.catalog.len()
    }

    /// Year bounds, genre options, digest and imputation counts as JSON.
    fn summary(&self) -> PyResult<String> {
        Ok(serde_json::to_string(&self.catalog.summary()).map_err(FilmdeckError::from)?)
    }

    /// Run one query; omitted arguments fall back to the control defaults.
    #[pyo3(signature = (year_min=None, year_max=None, genre=None, min_rating=None))]
    fn query(
        &self,
        py: Python<'_>,
        year_min: Option<i32>,
        year_max: Option<i32>,
        genre: Option<&str>,
        min_rating: Option<f64>,
    ) -> PyResult<String> {
        let (lo, hi) = self.catalog.year_range();
        let query = Query::new(
            year_min.unwrap_or(lo),
            year_max.unwrap_or(hi),
            GenreFilter::from_selection(genre.unwrap_or(MATCH_ALL_GENRES)),
            min_rating.unwrap_or(self.config.rating_floor),
        )?;
        let catalog = Arc::clone(&self.catalog);
        let limits = self.config.limits;
        let json = py.allow_threads(move || run_query(&catalog, &query, &limits).to_json())?;
        Ok(json)
    }

    /// A new control session starting from the default selection.
    fn session(&self) -> DashboardSession {
        DashboardSession {
            catalog: Arc::clone(&self.catalog),
            limits: self.config.limits,
            controls: Mutex::new(Controls::for_catalog(
                &self.catalog,
                self.config.rating_floor,
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// DashboardSession
// ---------------------------------------------------------------------------

/// Current control selection for one dashboard client.
#[pyclass(frozen)]
pub struct DashboardSession {
    catalog: Arc<Catalog>,
    limits: ViewLimits,
    controls: Mutex<Controls>,
}

#[pymethods]
impl DashboardSession {
    fn set_year_range(&self, year_min: i32, year_max: i32) {
        self.controls.lock().set_year_range(year_min, year_max);
    }

    fn set_genre(&self, selection: &str) -> PyResult<()> {
        self.controls.lock().set_genre(selection)?;
        Ok(())
    }

    fn set_min_rating(&self, min_rating: f64) -> PyResult<()> {
        self.controls.lock().set_min_rating(min_rating)?;
        Ok(())
    }

    fn reset(&self) {
        self.controls.lock().reset();
    }

    /// Control bounds as JSON.
    fn bounds(&self) -> PyResult<String> {
        let bounds = self.controls.lock().bounds().clone();
        Ok(serde_json::to_string(&bounds).map_err(FilmdeckError::from)?)
    }

    /// Recompute every view for the current selection.
    fn refresh(&self, py: Python<'_>) -> PyResult<String> {
        let query = self.controls.lock().query().clone();
        let catalog = Arc::clone(&self.catalog);
        let limits = self.limits;
        let json = py.allow_threads(move || run_query(&catalog, &query, &limits).to_json())?;
        Ok(json)
    }
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("MATCH_ALL_GENRES", MATCH_ALL_GENRES)?;
    m.add_class::<FilmCatalog>()?;
    m.add_class::<DashboardSession>()?;
    Ok(())
}
