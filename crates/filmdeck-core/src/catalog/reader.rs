//! CSV decoding of the raw film table.

use std::io::Read;
use std::path::Path;

use crate::errors::FilmdeckResult;
use crate::models::RawFilmRow;

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(false);
    builder
}

/// Decode every data row from a CSV stream with a header line.
pub fn read_rows<R: Read>(source: R) -> FilmdeckResult<Vec<RawFilmRow>> {
    let mut reader = reader_builder().from_reader(source);
    let mut rows = Vec::new();
    for record in reader.deserialize::<RawFilmRow>() {
        rows.push(record?);
    }
    Ok(rows)
}

pub fn read_rows_from_path(path: &Path) -> FilmdeckResult<Vec<RawFilmRow>> {
    let file = std::fs::File::open(path)?;
    read_rows(std::io::BufReader::new(file))
}
