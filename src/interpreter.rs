use crate::environment::Environment;
use crate::grammar::ParseError;
use crate::{evaluator, grammar, printer, reader, LispObject};
use std::fmt;

pub type Result = std::result::Result<LispObject, Error>;

#[derive(Debug)]
pub enum Error {
    Parse(ParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "{}", e),
        }
    }
}

pub fn read(line: &str) -> Result {
    grammar::parse(line)
        .map(|tree| reader::read(&tree))
        .map_err(Error::Parse)
}

pub fn eval(obj: LispObject, env: &mut Environment) -> LispObject {
    evaluator::eval(env, obj)
}

/// Ok holds the printed value, which may itself be a printed `Error` value.
/// Err holds a diagnostic for input that never made it to the evaluator.
pub fn rep(line: &str, env: &mut Environment) -> std::result::Result<String, String> {
    let obj = read(line).map_err(|e| e.to_string())?;
    log::debug!("read {}", obj);
    Ok(printer::pr_str(&eval(obj, env)))
}
