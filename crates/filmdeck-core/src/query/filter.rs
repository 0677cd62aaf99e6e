//! Query values and the filter engine.

use serde::{Serialize, Serializer};

use crate::catalog::Catalog;
use crate::errors::{FilmdeckError, FilmdeckResult};
use crate::models::Film;
use crate::query::guards::{MATCH_ALL_GENRES, RATING_SCALE_MIN};

/// Genre restriction of a query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GenreFilter {
    All,
    Genre(String),
}

impl GenreFilter {
    /// Interpret a dropdown value: `"all"` is match-all, anything else is an
    /// exact genre name.
    pub fn from_selection(selection: &str) -> Self {
        if selection == MATCH_ALL_GENRES {
            Self::All
        } else {
            Self::Genre(selection.to_string())
        }
    }

    pub fn as_selection(&self) -> &str {
        match self {
            Self::All => MATCH_ALL_GENRES,
            Self::Genre(genre) => genre,
        }
    }

    pub fn matches(&self, film: &Film) -> bool {
        match self {
            Self::All => true,
            Self::Genre(genre) => film.has_genre(genre),
        }
    }
}

impl Serialize for GenreFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_selection())
    }
}

/// An immutable request for a view of the catalog.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Query {
    year_min: i32,
    year_max: i32,
    genre: GenreFilter,
    min_rating: f64,
}

impl Query {
    /// Any finite `min_rating` is accepted, including values above the
    /// rating scale (which simply match nothing). An inverted year range is
    /// accepted and matches nothing.
    pub fn new(
        year_min: i32,
        year_max: i32,
        genre: GenreFilter,
        min_rating: f64,
    ) -> FilmdeckResult<Self> {
        if !min_rating.is_finite() {
            return Err(FilmdeckError::InvalidQuery(format!(
                "min_rating must be finite, got {min_rating}"
            )));
        }
        Ok(Self {
            year_min,
            year_max,
            genre,
            min_rating,
        })
    }

    /// Match every film in the catalog.
    pub fn match_all(catalog: &Catalog) -> Self {
        let (year_min, year_max) = catalog.year_range();
        Self::match_all_years(year_min, year_max, RATING_SCALE_MIN)
    }

    /// Every genre within `[year_min, year_max]`, ratings from `min_rating` up.
    pub(crate) fn match_all_years(year_min: i32, year_max: i32, min_rating: f64) -> Self {
        Self {
            year_min,
            year_max,
            genre: GenreFilter::All,
            min_rating,
        }
    }

    /// Copy of this query with a different year range.
    pub fn with_year_range(&self, year_min: i32, year_max: i32) -> Self {
        Self {
            year_min,
            year_max,
            ..self.clone()
        }
    }

    pub fn with_genre(&self, genre: GenreFilter) -> Self {
        Self {
            genre,
            ..self.clone()
        }
    }

    pub fn year_min(&self) -> i32 {
        self.year_min
    }

    pub fn year_max(&self) -> i32 {
        self.year_max
    }

    pub fn genre(&self) -> &GenreFilter {
        &self.genre
    }

    pub fn min_rating(&self) -> f64 {
        self.min_rating
    }

    pub fn matches(&self, film: &Film) -> bool {
        (self.year_min..=self.year_max).contains(&film.released_year)
            && self.genre.matches(film)
            && film.imdb_rating >= self.min_rating
    }
}

/// Films matching `query`, in catalog order. Never fails; no match yields an
/// empty subset.
pub fn filter<'a>(catalog: &'a Catalog, query: &Query) -> Vec<&'a Film> {
    catalog.films().iter().filter(|film| query.matches(film)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_catalog;

    fn query(year_min: i32, year_max: i32, genre: &str, min_rating: f64) -> Query {
        Query::new(
            year_min,
            year_max,
            GenreFilter::from_selection(genre),
            min_rating,
        )
        .unwrap()
    }

    fn titles<'a>(films: &[&'a Film]) -> Vec<&'a str> {
        films.iter().map(|f| f.title.as_str()).collect()
    }

    #[test]
    fn test_drama_2000s_high_rating() {
        let catalog = sample_catalog();
        let subset = filter(&catalog, &query(2000, 2010, "Drama", 8.0));
        assert_eq!(titles(&subset), vec!["Memento", "The Dark Knight"]);
        for film in &subset {
            assert!((2000..=2010).contains(&film.released_year));
            assert!(film.has_genre("Drama"));
            assert!(film.imdb_rating >= 8.0);
        }
    }

    #[test]
    fn test_filter_is_complete() {
        let catalog = sample_catalog();
        let q = query(1999, 2008, "Crime", 7.9);
        let subset = filter(&catalog, &q);
        for film in catalog.films() {
            let included = subset.iter().any(|f| std::ptr::eq(*f, film));
            let satisfies = (1999..=2008).contains(&film.released_year)
                && film.genres.iter().any(|g| g == "Crime")
                && film.imdb_rating >= 7.9;
            assert_eq!(included, satisfies, "{}", film.title);
        }
    }

    #[test]
    fn test_year_bounds_are_inclusive() {
        let catalog = sample_catalog();
        let subset = filter(&catalog, &query(1994, 1994, "all", 0.0));
        assert_eq!(titles(&subset), vec!["The Shawshank Redemption", "Pulp Fiction"]);
    }

    #[test]
    fn test_genre_match_is_case_sensitive() {
        let catalog = sample_catalog();
        assert!(filter(&catalog, &query(1900, 2100, "drama", 0.0)).is_empty());
        assert_eq!(filter(&catalog, &query(1900, 2100, "Sci-Fi", 0.0)).len(), 2);
    }

    #[test]
    fn test_rating_above_scale_matches_nothing() {
        let catalog = sample_catalog();
        assert!(filter(&catalog, &query(1900, 2100, "all", 10.1)).is_empty());
    }

    #[test]
    fn test_inverted_year_range_matches_nothing() {
        let catalog = sample_catalog();
        assert!(filter(&catalog, &query(2010, 2000, "all", 0.0)).is_empty());
    }

    #[test]
    fn test_filter_is_monotonic() {
        let catalog = sample_catalog();
        let narrow = filter(&catalog, &query(2000, 2008, "all", 8.3));
        let wider_years = filter(&catalog, &query(1995, 2010, "all", 8.3));
        let lower_rating = filter(&catalog, &query(2000, 2008, "all", 7.0));
        assert_eq!(narrow.len(), 3);
        for film in &narrow {
            assert!(wider_years.iter().any(|f| std::ptr::eq(*f, *film)));
            assert!(lower_rating.iter().any(|f| std::ptr::eq(*f, *film)));
        }
        assert!(wider_years.len() >= narrow.len());
        assert!(lower_rating.len() >= narrow.len());
    }

    #[test]
    fn test_match_all_query_returns_catalog() {
        let catalog = sample_catalog();
        assert_eq!(filter(&catalog, &Query::match_all(&catalog)).len(), catalog.len());
    }

    #[test]
    fn test_non_finite_min_rating_rejected() {
        let err = Query::new(2000, 2010, GenreFilter::All, f64::NAN).unwrap_err();
        assert!(matches!(err, FilmdeckError::InvalidQuery(_)));
    }

    #[test]
    fn test_genre_selection_sentinel() {
        assert_eq!(GenreFilter::from_selection("all"), GenreFilter::All);
        assert_eq!(
            GenreFilter::from_selection("Drama"),
            GenreFilter::Genre("Drama".to_string())
        );
        assert_eq!(GenreFilter::All.as_selection(), "all");
    }
}
