use std::fmt;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog is not valid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// MPAA classification, ordered from most to least permissive audience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
pub enum MpaaRating {
    G,
    #[serde(rename = "PG")]
    Pg,
    #[serde(rename = "PG-13")]
    Pg13,
    R,
}

impl fmt::Display for MpaaRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MpaaRating::G => "G",
            MpaaRating::Pg => "PG",
            MpaaRating::Pg13 => "PG-13",
            MpaaRating::R => "R",
        };
        write!(f, "{}", label)
    }
}

/// One catalog entry. `director` and `release_date` may be absent in the
/// source data (uncredited director, unannounced release).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub director: Option<String>,
    pub genre: String,
    pub mpaa_rating: MpaaRating,
    pub score: f64,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
}

/// Loads a catalog file: a YAML sequence of movies.
pub fn load(path: &Path) -> Result<Vec<Movie>, CatalogError> {
    let content = fs::read_to_string(path)?;
    let movies = serde_yaml::from_str(&content)?;
    Ok(movies)
}
