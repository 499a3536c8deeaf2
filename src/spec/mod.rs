pub mod engine;
pub mod expr;
pub mod movie;

pub use engine::{EvalError, Predicate, Spec, TranslateError};
pub use expr::QueryExpr;
pub use movie::MoviePredicate;
