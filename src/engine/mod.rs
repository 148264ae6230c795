//! Rule engine module

mod evaluation;
mod rule_engine;


pub use evaluation::*;
pub use rule_engine::*;
