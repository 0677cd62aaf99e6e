//! Shared fixtures for unit tests.

use crate::catalog::Catalog;
use crate::models::RawFilmRow;

/// A well-formed raw row: 120 minutes, 100 votes, meta score 75.
pub fn raw_row(
    title: &str,
    year: &str,
    genre: &str,
    director: &str,
    rating: &str,
    gross: &str,
) -> RawFilmRow {
    RawFilmRow {
        title: Some(title.to_string()),
        released_year: Some(year.to_string()),
        runtime: Some("120 min".to_string()),
        genre: Some(genre.to_string()),
        director: Some(director.to_string()),
        imdb_rating: Some(rating.to_string()),
        meta_score: Some("75".to_string()),
        no_of_votes: Some("100".to_string()),
        gross: (!gross.is_empty()).then(|| gross.to_string()),
    }
}

fn film_row(
    title: &str,
    year: &str,
    genre: &str,
    director: &str,
    rating: &str,
    votes: &str,
    gross: &str,
) -> RawFilmRow {
    RawFilmRow {
        no_of_votes: Some(votes.to_string()),
        ..raw_row(title, year, genre, director, rating, gross)
    }
}

/// Eleven films released 1994-2020.
///
/// Directors with two or more films: Frank Darabont (mean 8.95), Quentin
/// Tarantino (8.5), Christopher Nolan (8.425). Two films have no gross.
pub fn sample_rows() -> Vec<RawFilmRow> {
    vec![
        film_row("The Shawshank Redemption", "1994", "Drama", "Frank Darabont", "9.3", "2343110", "28,341,469"),
        film_row("Pulp Fiction", "1994", "Crime, Drama", "Quentin Tarantino", "8.9", "1826188", "107,928,762"),
        film_row("The Green Mile", "1999", "Crime, Drama", "Frank Darabont", "8.6", "1147794", "136,801,374"),
        film_row("Memento", "2000", "Drama", "Christopher Nolan", "8.4", "1125712", "25,544,867"),
        film_row("The Dark Knight", "2008", "Action, Crime, Drama", "Christopher Nolan", "9.0", "2303232", "534,858,444"),
        film_row("Inception", "2010", "Action, Sci-Fi", "Christopher Nolan", "8.8", "2067042", "292,576,195"),
        film_row("Kill Bill: Vol. 1", "2003", "Action, Crime", "Quentin Tarantino", "8.1", "1000639", "70,099,045"),
        film_row("Amelie", "2001", "Comedy", "Jean-Pierre Jeunet", "8.3", "703810", "33,225,499"),
        film_row("Little Miss Sunshine", "2006", "Comedy, Drama", "Jonathan Dayton", "7.8", "450000", ""),
        film_row("Tenet", "2020", "Action, Sci-Fi", "Christopher Nolan", "7.5", "400000", ""),
        film_row("Zodiac", "2007", "Crime, Drama", "David Fincher", "7.7", "500000", "33,080,084"),
    ]
}

pub fn sample_catalog() -> Catalog {
    Catalog::from_rows(&sample_rows()).expect("sample rows are well formed")
}
