//! End-to-end: CSV file → catalog → queries → result bundles.

use std::io::Write;

use _filmdeck_core::catalog::compute_content_hash;
use _filmdeck_core::{
    run_batch, run_query, Catalog, Controls, FilmdeckError, GenreFilter, Query, RatingCategory,
    ViewLimits,
};
use tempfile::NamedTempFile;

const HEADER: &str = "Poster_Link,Series_Title,Released_Year,Certificate,Runtime,Genre,IMDB_Rating,Overview,Meta_score,Director,Star1,Star2,Star3,Star4,No_of_Votes,Gross";

const ROWS: &[&str] = &[
    "p,The Shawshank Redemption,1994,A,142 min,Drama,9.3,o,80,Frank Darabont,a,b,c,d,2343110,\"28,341,469\"",
    "p,The Godfather,1972,A,175 min,\"Crime, Drama\",9.2,o,100,Francis Ford Coppola,a,b,c,d,1620367,\"134,966,411\"",
    "p,The Godfather: Part II,1974,A,202 min,\"Crime, Drama\",9.0,o,90,Francis Ford Coppola,a,b,c,d,1129952,\"57,300,000\"",
    "p,12 Angry Men,1957,U,96 min,\"Crime, Drama\",9.0,o,96,Sidney Lumet,a,b,c,d,689845,\"4,360,000\"",
    "p,Apollo 13,PG,U,140 min,\"Adventure, Drama, History\",7.6,o,77,Ron Howard,a,b,c,d,269197,\"173,837,933\"",
    "p,Spirited Away,2001,U,125 min,\"Animation, Adventure, Family\",8.6,o,96,Hayao Miyazaki,a,b,c,d,665061,\"10,055,859\"",
    "p,Dil Bechara,2020,UA,101 min,\"Comedy, Drama, Romance\",5.6,o,,Mukesh Chhabra,a,b,c,d,111189,",
    "p,Drishyam,2013,U,160 min,\"Crime, Drama, Thriller\",8.3,o,,Jeethu Joseph,a,b,c,d,30722,",
];

fn write_csv(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}

fn load() -> Catalog {
    let file = write_csv(ROWS);
    Catalog::load(file.path()).unwrap()
}

#[test]
fn test_load_normalizes_and_imputes() {
    let file = write_csv(ROWS);
    let catalog = Catalog::load(file.path()).unwrap();
    assert_eq!(catalog.len(), ROWS.len());
    assert_eq!(catalog.year_range(), (1957, 2020));

    let bytes = std::fs::read(file.path()).unwrap();
    assert_eq!(
        catalog.version_token(),
        Some(compute_content_hash(&bytes).as_str())
    );

    let apollo = catalog
        .films()
        .iter()
        .find(|f| f.title == "Apollo 13")
        .unwrap();
    // Median of the seven parsed years: 1957 1972 1974 1994 2001 2013 2020.
    assert_eq!(apollo.released_year, 1994);
    assert_eq!(apollo.decade, 1990);

    let drishyam = catalog
        .films()
        .iter()
        .find(|f| f.title == "Drishyam")
        .unwrap();
    assert_eq!(drishyam.gross, 0.0);
    assert_eq!(drishyam.revenue_per_vote, 0.0);
    // Mean of the six parsed meta scores.
    let expected_meta = (80.0 + 100.0 + 90.0 + 96.0 + 77.0 + 96.0) / 6.0;
    assert!((drishyam.meta_score - expected_meta).abs() < 1e-9);
    assert_eq!(drishyam.rating_category, RatingCategory::VeryGood);

    let report = catalog.imputation();
    assert_eq!(report.years_imputed, 1);
    assert_eq!(report.gross_filled, 2);
    assert_eq!(report.meta_scores_imputed, 2);
}

#[test]
fn test_malformed_runtime_fails_load() {
    let bad = "p,Broken,2000,U,two hours,Drama,7.0,o,50,Someone,a,b,c,d,10,\"1,000\"";
    let file = write_csv(&[ROWS[0], bad]);
    let err = Catalog::load(file.path()).unwrap_err();
    assert!(matches!(err, FilmdeckError::InvalidRuntime { row: 2, .. }));
}

#[test]
fn test_drama_query_scenario() {
    let catalog = load();
    let query = Query::new(1970, 2000, GenreFilter::from_selection("Drama"), 9.0).unwrap();
    let result = run_query(&catalog, &query, &ViewLimits::default());

    let titles: Vec<&str> = result.films.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["The Shawshank Redemption", "The Godfather", "The Godfather: Part II"]
    );
    assert_eq!(result.metrics.count, 3);
    assert_eq!(result.views.top_directors.len(), 1);
    assert_eq!(result.views.top_directors[0].director, "Francis Ford Coppola");
    assert_eq!(result.views.top_directors[0].film_count, 2);
    assert_eq!(result.views.yearly_trend.len(), 3);
    assert_eq!(result.views.most_voted.last().unwrap().title, "The Shawshank Redemption");
}

#[test]
fn test_empty_result_is_renderable() {
    let catalog = load();
    let query = Query::new(1957, 2020, GenreFilter::All, 10.1).unwrap();
    let result = run_query(&catalog, &query, &ViewLimits::default());
    assert_eq!(result.metrics.count, 0);
    assert!(result.metrics.avg_rating.is_none());

    let value: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    assert_eq!(value["films"], serde_json::json!([]));
    assert!(value["metrics"]["avg_rating"].is_null());
}

#[test]
fn test_revenue_view_is_strictly_positive() {
    let catalog = load();
    let result = run_query(&catalog, &Query::match_all(&catalog), &ViewLimits::default());
    assert_eq!(result.views.revenue_films.len(), ROWS.len() - 2);
    assert!(result.views.revenue_films.iter().all(|f| f.gross > 0.0));
}

#[test]
fn test_controls_then_reset() {
    let catalog = load();
    let mut controls = Controls::for_catalog(&catalog, 5.0);
    let defaults = controls.query().clone();

    controls.set_year_range(2000, 2030);
    controls.set_genre("Crime").unwrap();
    controls.set_min_rating(8.0).unwrap();
    let narrowed = run_query(&catalog, controls.query(), &ViewLimits::default());
    assert_eq!(narrowed.query.year_max(), 2020);
    assert_eq!(narrowed.films.len(), 1);
    assert_eq!(narrowed.films[0].title, "Drishyam");

    let reset = controls.reset().clone();
    assert_eq!(reset, defaults);
    let full = run_query(&catalog, &reset, &ViewLimits::default());
    assert_eq!(full.metrics.count, ROWS.len());
}

#[test]
fn test_batch_over_shared_catalog() {
    let catalog = load();
    let queries: Vec<Query> = (1950..2020)
        .step_by(10)
        .map(|start| Query::new(start, start + 9, GenreFilter::All, 0.0).unwrap())
        .collect();
    let results = run_batch(&catalog, &queries, &ViewLimits::default());
    let total: usize = results.iter().map(|r| r.metrics.count).sum();
    // Every film falls in exactly one decade window except 2020.
    assert_eq!(total, ROWS.len() - 1);
}
