use crate::adapters::memory::{InMemoryCityRepository, InMemoryWordRepository};
use crate::domain::model::City;
use crate::utils::error::Result;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct NamedRow {
    id: i64,
    name: String,
}

fn read_rows<R: Read>(reader: R) -> Result<Vec<NamedRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Reads an `id,name` CSV into a city repository.
pub fn cities_from_reader<R: Read>(reader: R) -> Result<InMemoryCityRepository> {
    let cities = read_rows(reader)?
        .into_iter()
        .map(|row| City::new(row.id, row.name))
        .collect();
    Ok(InMemoryCityRepository::new(cities))
}

/// Reads an `id,name` CSV into a word dictionary. Ids are only checked for shape.
pub fn words_from_reader<R: Read>(reader: R) -> Result<InMemoryWordRepository> {
    let words = read_rows(reader)?.into_iter().map(|row| row.name).collect();
    Ok(InMemoryWordRepository::new(words))
}

pub fn load_cities<P: AsRef<Path>>(path: P) -> Result<InMemoryCityRepository> {
    let file = std::fs::File::open(path.as_ref())?;
    let repository = cities_from_reader(file)?;
    tracing::info!(
        "Loaded {} cities from {}",
        repository.len(),
        path.as_ref().display()
    );
    Ok(repository)
}

pub fn load_words<P: AsRef<Path>>(path: P) -> Result<InMemoryWordRepository> {
    let file = std::fs::File::open(path.as_ref())?;
    let repository = words_from_reader(file)?;
    tracing::info!(
        "Loaded {} dictionary words from {}",
        repository.len(),
        path.as_ref().display()
    );
    Ok(repository)
}
