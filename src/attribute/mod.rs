//! Attribute values supplied at evaluation time
//!
//! An attribute set is a flat mapping from attribute name to a number or a
//! string, built fresh for every evaluation call.

mod set;
mod value;

pub use set::*;
pub use value::*;
