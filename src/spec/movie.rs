use chrono::{Months, NaiveDate};

use super::engine::{EvalError, Predicate, TranslateError};
use super::expr::{CompareOp, Field, QueryExpr, Value};
use crate::catalog::{Movie, MpaaRating};

/// Physical-media releases trail the theatrical release by this many months.
pub const DISC_RELEASE_LAG_MONTHS: u32 = 6;

/// Domain conditions over movies. Each variant owns the parameters it needs;
/// construction is infallible and the tree never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum MoviePredicate {
    /// MPAA rating suitable for children (G or PG).
    ForKids,
    /// Released long enough ago for a physical-media edition to exist.
    /// The cutoff is fixed at construction so evaluation stays pure.
    AvailableOnDisc { cutoff: NaiveDate },
    /// Case-sensitive exact match on the director's name.
    DirectedBy(String),
}

impl MoviePredicate {
    /// Builds the disc-availability condition relative to `as_of`
    /// (normally today): true for releases at least
    /// [`DISC_RELEASE_LAG_MONTHS`] before that date.
    pub fn available_on_disc(as_of: NaiveDate) -> Self {
        let cutoff = as_of
            .checked_sub_months(Months::new(DISC_RELEASE_LAG_MONTHS))
            .unwrap_or(NaiveDate::MIN);
        MoviePredicate::AvailableOnDisc { cutoff }
    }
}

impl Predicate for MoviePredicate {
    type Entity = Movie;

    fn evaluate(&self, movie: &Movie) -> Result<bool, EvalError> {
        match self {
            MoviePredicate::ForKids => Ok(movie.mpaa_rating <= MpaaRating::Pg),
            MoviePredicate::AvailableOnDisc { cutoff } => {
                let release = movie.release_date.ok_or(EvalError {
                    field: "release_date",
                    reason: "release date is not announced",
                })?;
                Ok(release <= *cutoff)
            }
            // an unset director is a non-match, not an error
            MoviePredicate::DirectedBy(name) => {
                Ok(movie.director.as_deref() == Some(name.as_str()))
            }
        }
    }

    fn to_query(&self) -> Result<QueryExpr, TranslateError> {
        let expr = match self {
            MoviePredicate::ForKids => QueryExpr::Compare {
                field: Field::MpaaRating,
                op: CompareOp::Le,
                value: Value::Rating(MpaaRating::Pg),
            },
            MoviePredicate::AvailableOnDisc { cutoff } => QueryExpr::Compare {
                field: Field::ReleaseDate,
                op: CompareOp::Le,
                value: Value::Date(*cutoff),
            },
            MoviePredicate::DirectedBy(name) => QueryExpr::Compare {
                field: Field::Director,
                op: CompareOp::Eq,
                value: Value::Text(name.clone()),
            },
        };
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Spec;
    use chrono::Days;

    fn movie(rating: MpaaRating, release_date: Option<NaiveDate>) -> Movie {
        Movie {
            id: 1,
            title: "Test Movie".to_string(),
            director: Some("Jane Doe".to_string()),
            genre: "Drama".to_string(),
            mpaa_rating: rating,
            score: 7.0,
            release_date,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_for_kids_accepts_g_and_pg_only() {
        let ratings = [
            (MpaaRating::G, true),
            (MpaaRating::Pg, true),
            (MpaaRating::Pg13, false),
            (MpaaRating::R, false),
        ];
        for (rating, expected) in ratings {
            let m = movie(rating, None);
            assert_eq!(
                MoviePredicate::ForKids.evaluate(&m),
                Ok(expected),
                "rating {}",
                rating
            );
        }
    }

    #[test]
    fn test_on_disc_six_months_and_a_day_ago() {
        let today = date(2026, 8, 24);
        let spec = MoviePredicate::available_on_disc(today);

        let released = today
            .checked_sub_months(Months::new(6))
            .unwrap()
            .checked_sub_days(Days::new(1))
            .unwrap();
        let m = movie(MpaaRating::Pg, Some(released));
        assert_eq!(spec.evaluate(&m), Ok(true));
    }

    #[test]
    fn test_on_disc_five_months_ago_is_too_recent() {
        let today = date(2026, 8, 24);
        let spec = MoviePredicate::available_on_disc(today);

        let released = today.checked_sub_months(Months::new(5)).unwrap();
        let m = movie(MpaaRating::Pg, Some(released));
        assert_eq!(spec.evaluate(&m), Ok(false));
    }

    #[test]
    fn test_on_disc_unannounced_release_is_an_error() {
        let spec = MoviePredicate::available_on_disc(date(2026, 8, 24));
        let m = movie(MpaaRating::Pg, None);
        let err = spec.evaluate(&m).unwrap_err();
        assert_eq!(err.field, "release_date");
    }

    #[test]
    fn test_directed_by_exact_match() {
        let m = movie(MpaaRating::R, None);
        assert_eq!(
            MoviePredicate::DirectedBy("Jane Doe".to_string()).evaluate(&m),
            Ok(true)
        );
        // case-sensitive
        assert_eq!(
            MoviePredicate::DirectedBy("jane doe".to_string()).evaluate(&m),
            Ok(false)
        );
        assert_eq!(
            MoviePredicate::DirectedBy("John Doe".to_string()).evaluate(&m),
            Ok(false)
        );
    }

    #[test]
    fn test_directed_by_uncredited_is_false_not_error() {
        let mut m = movie(MpaaRating::R, None);
        m.director = None;
        assert_eq!(
            MoviePredicate::DirectedBy("Jane Doe".to_string()).evaluate(&m),
            Ok(false)
        );
    }

    #[test]
    fn test_kids_and_on_disc_composite() {
        let today = date(2026, 8, 24);
        let spec = Spec::leaf(MoviePredicate::ForKids)
            .and(Spec::leaf(MoviePredicate::available_on_disc(today)));

        let old = Some(date(2020, 1, 1));
        let recent = Some(date(2026, 8, 1));

        assert_eq!(spec.evaluate(&movie(MpaaRating::Pg, old)), Ok(true));
        assert_eq!(spec.evaluate(&movie(MpaaRating::Pg13, old)), Ok(false));
        assert_eq!(spec.evaluate(&movie(MpaaRating::G, recent)), Ok(false));
    }

    #[test]
    fn test_translation_shapes() {
        let kids = MoviePredicate::ForKids.to_query().unwrap();
        assert_eq!(kids.to_string(), "mpaa_rating <= PG");

        let directed = MoviePredicate::DirectedBy("Bong Joon-ho".to_string())
            .to_query()
            .unwrap();
        assert_eq!(directed.to_string(), "director = \"Bong Joon-ho\"");

        let disc = MoviePredicate::available_on_disc(date(2026, 8, 24))
            .to_query()
            .unwrap();
        assert_eq!(disc.to_string(), "release_date <= 2026-02-24");
    }
}
