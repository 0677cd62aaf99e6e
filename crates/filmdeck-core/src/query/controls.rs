//! The control surface offered to the view layer.
//!
//! [`ControlBounds`] describes what the controls may show (year slider range,
//! genre options, rating slider range). [`Controls`] holds the current
//! selection, keeps it inside those bounds, and can reset it.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::errors::{FilmdeckError, FilmdeckResult};
use crate::query::filter::{GenreFilter, Query};
use crate::query::guards::{clamp_rating, clamp_year, RATING_SCALE_MAX, RATING_SCALE_MIN};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ControlBounds {
    pub year_min: i32,
    pub year_max: i32,
    /// Selectable genres, sorted; the match-all option is implied.
    pub genres: Vec<String>,
    pub rating_min: f64,
    pub rating_max: f64,
}

impl ControlBounds {
    pub fn from_catalog(catalog: &Catalog, rating_floor: f64) -> Self {
        let (year_min, year_max) = catalog.year_range();
        Self {
            year_min,
            year_max,
            genres: catalog.genres().to_vec(),
            rating_min: clamp_rating(rating_floor, RATING_SCALE_MIN),
            rating_max: RATING_SCALE_MAX,
        }
    }

    /// Full year range, every genre, lowest rating.
    pub fn default_query(&self) -> Query {
        Query::match_all_years(self.year_min, self.year_max, self.rating_min)
    }
}

#[derive(Clone, Debug)]
pub struct Controls {
    bounds: ControlBounds,
    current: Query,
}

impl Controls {
    pub fn new(bounds: ControlBounds) -> Self {
        let current = bounds.default_query();
        Self { bounds, current }
    }

    pub fn for_catalog(catalog: &Catalog, rating_floor: f64) -> Self {
        Self::new(ControlBounds::from_catalog(catalog, rating_floor))
    }

    pub fn bounds(&self) -> &ControlBounds {
        &self.bounds
    }

    pub fn query(&self) -> &Query {
        &self.current
    }

    /// Both ends are clamped into the catalog's year range.
    pub fn set_year_range(&mut self, year_min: i32, year_max: i32) -> &Query {
        let (lo, hi) = (self.bounds.year_min, self.bounds.year_max);
        self.current = self
            .current
            .with_year_range(clamp_year(year_min, lo, hi), clamp_year(year_max, lo, hi));
        &self.current
    }

    /// `"all"` or one of the catalog's genres; anything else is rejected and
    /// leaves the selection unchanged.
    pub fn set_genre(&mut self, selection: &str) -> FilmdeckResult<&Query> {
        let genre = GenreFilter::from_selection(selection);
        if let GenreFilter::Genre(name) = &genre {
            if self.bounds.genres.binary_search(name).is_err() {
                return Err(FilmdeckError::InvalidQuery(format!(
                    "unknown genre {name:?}"
                )));
            }
        }
        self.current = self.current.with_genre(genre);
        Ok(&self.current)
    }

    /// Clamped into `[rating_min, rating_max]`; NaN is rejected.
    pub fn set_min_rating(&mut self, min_rating: f64) -> FilmdeckResult<&Query> {
        if min_rating.is_nan() {
            return Err(FilmdeckError::InvalidQuery(
                "min_rating must be a number".to_string(),
            ));
        }
        let clamped = clamp_rating(min_rating, self.bounds.rating_min);
        self.current = Query::new(
            self.current.year_min(),
            self.current.year_max(),
            self.current.genre().clone(),
            clamped,
        )?;
        Ok(&self.current)
    }

    pub fn reset(&mut self) -> &Query {
        self.current = self.bounds.default_query();
        &self.current
    }
}
