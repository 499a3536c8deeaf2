use thiserror::Error;

use super::expr::QueryExpr;

/// A comparison was undefined for the entity it ran against, e.g. a field
/// the leaf needs is not set. Distinct from the condition being false.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot test `{field}`: {reason}")]
pub struct EvalError {
    pub field: &'static str,
    pub reason: &'static str,
}

/// A leaf has no queryable form. Raised at translation time so the failure
/// never reaches the query executor as an opaque backend error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("predicate `{predicate}` cannot be translated into a query filter")]
pub struct TranslateError {
    pub predicate: &'static str,
}

/// A domain leaf: owns its parameters, knows how to test one entity in
/// memory and how to express the same condition as a query filter. The two
/// forms must agree on every input.
pub trait Predicate {
    type Entity;

    fn evaluate(&self, entity: &Self::Entity) -> Result<bool, EvalError>;

    fn to_query(&self) -> Result<QueryExpr, TranslateError>;
}

/// A composable specification over entities of the leaf type `P::Entity`.
///
/// Trees are immutable once built; the combinators consume their operands
/// and return a new tree. `All` is the identity element: `and` drops it,
/// `or` absorbs into it (the absorbing `or` mirrors the behavior this
/// pattern is usually taught with, quirk and all).
#[derive(Debug, Clone, PartialEq)]
pub enum Spec<P> {
    All,
    Leaf(P),
    And(Box<Spec<P>>, Box<Spec<P>>),
    Or(Box<Spec<P>>, Box<Spec<P>>),
    Not(Box<Spec<P>>),
}

impl<P> Spec<P> {
    pub fn leaf(predicate: P) -> Self {
        Spec::Leaf(predicate)
    }

    pub fn and(self, other: Spec<P>) -> Spec<P> {
        match (self, other) {
            (Spec::All, other) => other,
            (this, Spec::All) => this,
            (this, other) => Spec::And(Box::new(this), Box::new(other)),
        }
    }

    pub fn or(self, other: Spec<P>) -> Spec<P> {
        match (self, other) {
            (Spec::All, _) | (_, Spec::All) => Spec::All,
            (this, other) => Spec::Or(Box::new(this), Box::new(other)),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Spec<P> {
        Spec::Not(Box::new(self))
    }
}

impl<P: Predicate> Spec<P> {
    /// Tests one in-memory entity. Short-circuits like `&&`/`||`, so an
    /// error on a right arm is only surfaced when the left arm did not
    /// already decide the result.
    pub fn evaluate(&self, entity: &P::Entity) -> Result<bool, EvalError> {
        match self {
            Spec::All => Ok(true),
            Spec::Leaf(predicate) => predicate.evaluate(entity),
            Spec::And(left, right) => {
                if !left.evaluate(entity)? {
                    return Ok(false);
                }
                right.evaluate(entity)
            }
            Spec::Or(left, right) => {
                if left.evaluate(entity)? {
                    return Ok(true);
                }
                right.evaluate(entity)
            }
            Spec::Not(inner) => Ok(!inner.evaluate(entity)?),
        }
    }

    /// Translates the whole tree into the queryable form.
    pub fn to_query(&self) -> Result<QueryExpr, TranslateError> {
        match self {
            Spec::All => Ok(QueryExpr::All),
            Spec::Leaf(predicate) => predicate.to_query(),
            Spec::And(left, right) => Ok(QueryExpr::And(
                Box::new(left.to_query()?),
                Box::new(right.to_query()?),
            )),
            Spec::Or(left, right) => Ok(QueryExpr::Or(
                Box::new(left.to_query()?),
                Box::new(right.to_query()?),
            )),
            Spec::Not(inner) => Ok(QueryExpr::Not(Box::new(inner.to_query()?))),
        }
    }
}
