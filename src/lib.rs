pub mod cmdline;
pub mod core;
pub mod environment;
pub mod evaluator;
pub mod grammar;
pub mod interpreter;
pub mod printer;
pub mod reader;
pub mod syntax;
pub mod types;

#[macro_use]
extern crate lazy_static;

mod tokens;

pub use types::LispObject;
