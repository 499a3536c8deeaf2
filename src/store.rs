use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;

use crate::catalog::{self, CatalogError, Movie};
use crate::spec::expr::{CompareOp, Field, QueryExpr, Value};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("cannot filter on `{field}`: {reason}")]
    FieldUnset { field: Field, reason: &'static str },
    #[error("filter compares `{field}` against an incompatible value")]
    TypeMismatch { field: Field },
}

/// Lightweight projection returned by list queries.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    pub director: Option<String>,
    pub genre: String,
    pub mpaa_rating: String,
    pub score: f64,
    pub release_date: Option<NaiveDate>,
}

impl From<&Movie> for MovieSummary {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            director: movie.director.clone(),
            genre: movie.genre.clone(),
            mpaa_rating: movie.mpaa_rating.to_string(),
            score: movie.score,
            release_date: movie.release_date,
        }
    }
}

/// In-memory store over a loaded catalog. Interprets the abstract filter
/// tree directly, so it serves as the query executor for specifications.
pub struct CatalogStore {
    movies: Vec<Movie>,
}

impl CatalogStore {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        Ok(Self::new(catalog::load(path)?))
    }

    pub fn get_one(&self, id: u64) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Runs a filter over the catalog with a minimum-score threshold and
    /// offset/limit paging, projecting summaries for the matching window.
    /// The threshold is folded into the filter tree before interpretation.
    pub fn get_list(
        &self,
        filter: &QueryExpr,
        minimum_score: f64,
        page: usize,
        page_size: usize,
    ) -> Result<Vec<MovieSummary>, QueryError> {
        let filter = QueryExpr::And(
            Box::new(filter.clone()),
            Box::new(QueryExpr::Compare {
                field: Field::Score,
                op: CompareOp::Ge,
                value: Value::Number(minimum_score),
            }),
        );

        let mut matched = Vec::new();
        for movie in &self.movies {
            if matches(&filter, movie)? {
                matched.push(movie);
            }
        }

        Ok(matched
            .into_iter()
            .skip(page * page_size)
            .take(page_size)
            .map(MovieSummary::from)
            .collect())
    }
}

/// Interprets a filter tree against one movie. Logic nodes short-circuit
/// the same way [`Spec::evaluate`](crate::spec::Spec::evaluate) does, so
/// the two representations agree on every input.
pub fn matches(expr: &QueryExpr, movie: &Movie) -> Result<bool, QueryError> {
    match expr {
        QueryExpr::All => Ok(true),
        QueryExpr::Compare { field, op, value } => compare_field(movie, *field, *op, value),
        QueryExpr::And(left, right) => {
            if !matches(left, movie)? {
                return Ok(false);
            }
            matches(right, movie)
        }
        QueryExpr::Or(left, right) => {
            if matches(left, movie)? {
                return Ok(true);
            }
            matches(right, movie)
        }
        QueryExpr::Not(inner) => Ok(!matches(inner, movie)?),
    }
}

fn compare_field(
    movie: &Movie,
    field: Field,
    op: CompareOp,
    value: &Value,
) -> Result<bool, QueryError> {
    match (field, value) {
        // an unset director never matches; negation happens at tree level
        (Field::Director, Value::Text(name)) => match &movie.director {
            Some(director) => Ok(compare_ord(director.as_str(), name.as_str(), op)),
            None => Ok(false),
        },
        (Field::MpaaRating, Value::Rating(rating)) => {
            Ok(compare_ord(&movie.mpaa_rating, rating, op))
        }
        (Field::Score, Value::Number(number)) => Ok(compare_float(movie.score, *number, op)),
        (Field::ReleaseDate, Value::Date(date)) => {
            let release = movie.release_date.ok_or(QueryError::FieldUnset {
                field: Field::ReleaseDate,
                reason: "release date is not announced",
            })?;
            Ok(compare_ord(&release, date, op))
        }
        (field, _) => Err(QueryError::TypeMismatch { field }),
    }
}

fn compare_ord<T: Ord + ?Sized>(a: &T, b: &T, op: CompareOp) -> bool {
    match op {
        CompareOp::Eq => a == b,
        CompareOp::Ne => a != b,
        CompareOp::Gt => a > b,
        CompareOp::Lt => a < b,
        CompareOp::Ge => a >= b,
        CompareOp::Le => a <= b,
    }
}

fn compare_float(a: f64, b: f64, op: CompareOp) -> bool {
    match op {
        CompareOp::Eq => (a - b).abs() < f64::EPSILON,
        CompareOp::Ne => (a - b).abs() >= f64::EPSILON,
        CompareOp::Gt => a > b,
        CompareOp::Lt => a < b,
        CompareOp::Ge => a >= b,
        CompareOp::Le => a <= b,
    }
}
