//! The immutable, normalized film catalog.
//!
//! A [`Catalog`] is built once from raw rows and never changes afterwards.
//! Queries borrow it; share it across threads behind an `Arc` when needed.

pub mod normalize;
pub mod reader;

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::errors::FilmdeckResult;
use crate::models::{Film, RawFilmRow};

pub use normalize::ImputationReport;

/// SHA-256 hex digest of the catalog source bytes.
pub fn compute_content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Catalog-wide facts the view layer needs to build its controls.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub film_count: usize,
    pub year_min: i32,
    pub year_max: i32,
    pub genres: Vec<String>,
    pub version_token: Option<String>,
    pub imputation: ImputationReport,
}

#[derive(Debug)]
pub struct Catalog {
    films: Vec<Film>,
    year_min: i32,
    year_max: i32,
    genres: Vec<String>,
    version_token: Option<String>,
    imputation: ImputationReport,
}

impl Catalog {
    /// Normalize raw rows into a catalog. Fails on the first fatal row.
    pub fn from_rows(rows: &[RawFilmRow]) -> FilmdeckResult<Self> {
        let (films, imputation) = normalize::normalize_rows(rows)?;
        // normalize_rows rejects empty input, so the folds below see data.
        let year_min = films.iter().map(|f| f.released_year).min().unwrap_or_default();
        let year_max = films.iter().map(|f| f.released_year).max().unwrap_or_default();
        let genres: Vec<String> = films
            .iter()
            .flat_map(|f| f.genres.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        info!(
            films = films.len(),
            year_min,
            year_max,
            genres = genres.len(),
            "catalog loaded"
        );

        Ok(Self {
            films,
            year_min,
            year_max,
            genres,
            version_token: None,
            imputation,
        })
    }

    pub fn from_reader<R: Read>(source: R) -> FilmdeckResult<Self> {
        let rows = reader::read_rows(source)?;
        Self::from_rows(&rows)
    }

    /// Build from CSV bytes and stamp the catalog with their digest.
    pub fn from_bytes(bytes: &[u8]) -> FilmdeckResult<Self> {
        let mut catalog = Self::from_reader(bytes)?;
        catalog.version_token = Some(compute_content_hash(bytes));
        Ok(catalog)
    }

    pub fn load(path: &Path) -> FilmdeckResult<Self> {
        let bytes = std::fs::read(path)?;
        info!(path = %path.display(), bytes = bytes.len(), "reading film catalog");
        Self::from_bytes(&bytes)
    }

    pub fn films(&self) -> &[Film] {
        &self.films
    }

    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }

    /// Observed `(min, max)` release year.
    pub fn year_range(&self) -> (i32, i32) {
        (self.year_min, self.year_max)
    }

    /// Distinct genres, sorted.
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.binary_search_by(|g| g.as_str().cmp(genre)).is_ok()
    }

    pub fn version_token(&self) -> Option<&str> {
        self.version_token.as_deref()
    }

    pub fn imputation(&self) -> ImputationReport {
        self.imputation
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            film_count: self.films.len(),
            year_min: self.year_min,
            year_max: self.year_max,
            genres: self.genres.clone(),
            version_token: self.version_token.clone(),
            imputation: self.imputation,
        }
    }
}
