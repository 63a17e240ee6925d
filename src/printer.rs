use crate::types::{LispList, LispObject};
use itertools::Itertools;
use std::fmt;

pub fn pr_str(object: &LispObject) -> String {
    match object {
        LispObject::Number(value) => value.to_string(),
        LispObject::Symbol(name) => name.to_string(),
        LispObject::Error(message) => format!("Error: {}", message),
        LispObject::Function(_) => String::from("<function>"),
        LispObject::SExpr(elements) => expr_str(elements, '(', ')'),
        LispObject::QExpr(elements) => expr_str(elements, '{', '}'),
    }
}

fn expr_str(elements: &LispList, open: char, close: char) -> String {
    format!("{}{}{}", open, elements.iter().map(pr_str).join(" "), close)
}

impl fmt::Display for LispObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", pr_str(self))
    }
}
