// library crate for movq
// exposes the specification engine and catalog store to the CLI and tests

pub mod catalog;
pub mod directors;
pub mod spec;
pub mod store;
