//! Expression parsing and evaluation module
//!
//! This module turns text like "age > 30 AND department = 'HR'" into a tree
//! and evaluates trees against an attribute set.

mod ast;
pub mod cache;
mod combinator;
mod evaluator;
pub mod operand;
pub mod parser;
pub mod tokenizer;


pub use ast::*;
pub use cache::*;
pub use combinator::*;
pub use evaluator::*;
pub use operand::{Comparator, Condition, Literal};
pub use parser::*;
pub use tokenizer::{tokenize, Token};
