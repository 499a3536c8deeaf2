use std::fmt;

use chrono::NaiveDate;

use crate::catalog::MpaaRating;

/// Abstract filter tree produced by [`Spec::to_query`](super::Spec::to_query).
///
/// Any store adapter can interpret this without walking native closures;
/// the in-memory interpreter lives in the store module.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryExpr {
    /// Matches every entity.
    All,
    Compare {
        field: Field,
        op: CompareOp,
        value: Value,
    },
    And(Box<QueryExpr>, Box<QueryExpr>),
    Or(Box<QueryExpr>, Box<QueryExpr>),
    Not(Box<QueryExpr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Director,
    MpaaRating,
    Score,
    ReleaseDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Rating(MpaaRating),
    Date(NaiveDate),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Director => "director",
            Field::MpaaRating => "mpaa_rating",
            Field::Score => "score",
            Field::ReleaseDate => "release_date",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
            CompareOp::Ge => ">=",
            CompareOp::Le => "<=",
        };
        write!(f, "{}", sym)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "\"{}\"", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Rating(r) => write!(f, "{}", r),
            Value::Date(d) => write!(f, "{}", d),
        }
    }
}

impl fmt::Display for QueryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryExpr::All => write!(f, "*"),
            QueryExpr::Compare { field, op, value } => {
                write!(f, "{} {} {}", field, op, value)
            }
            QueryExpr::And(left, right) => write!(f, "({} AND {})", left, right),
            QueryExpr::Or(left, right) => write!(f, "({} OR {})", left, right),
            QueryExpr::Not(inner) => write!(f, "NOT {}", inner),
        }
    }
}
