extern crate derive_more;
use crate::core::Builtin;
use derive_more::{Deref, DerefMut};
use std::fmt;
use std::fmt::Formatter;
use std::ops::{RangeFrom, RangeInclusive};

pub type LispInt = i64;

#[derive(Deref, DerefMut, Debug, Clone, PartialEq, Eq, Default)]
pub struct LispList(pub Vec<LispObject>);

#[derive(Deref, Debug, PartialEq, Eq, Hash, Clone)]
pub struct LispSymbol(pub String);

impl From<&str> for LispSymbol {
    fn from(name: &str) -> Self {
        LispSymbol(String::from(name))
    }
}

impl fmt::Display for LispSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub enum Arity {
    Between(RangeInclusive<usize>),
    AtLeast(RangeFrom<usize>),
}

#[derive(Debug)]
pub struct BadArgCount {
    name: &'static str,
    expected: Arity,
    got: usize,
}

impl fmt::Display for BadArgCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Function '{}' passed incorrect number of arguments. Got {}, Expected {}.",
            self.name, self.got, self.expected
        )
    }
}

impl Arity {
    pub(crate) const fn exactly(n: usize) -> Self {
        Self::Between(n..=n)
    }

    pub(crate) const fn at_least(n: usize) -> Self {
        Self::AtLeast(n..)
    }

    pub(crate) fn contains(&self, n: usize) -> bool {
        match self {
            Self::Between(range) => range.contains(&n),
            Self::AtLeast(range) => range.contains(&n),
        }
    }

    pub(crate) fn validate_for(&self, n: usize, name: &'static str) -> Result<(), BadArgCount> {
        match self.contains(n) {
            true => Ok(()),
            false => Err(BadArgCount {
                name,
                expected: self.clone(),
                got: n,
            }),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Between(r) => {
                if r.start() == r.end() {
                    write!(f, "exactly {}", r.start())
                } else {
                    write!(f, "from {} to {}", r.start(), r.end())
                }
            }
            Arity::AtLeast(r) => write!(f, "at least {}", r.start),
        }
    }
}

/// A node of the value tree. Every node is owned by exactly one parent (or by
/// the caller holding the root), so `Clone` is a deep copy and `Drop` releases
/// the whole subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LispObject {
    Number(LispInt),
    Symbol(LispSymbol),
    Error(String),
    Function(Builtin),
    SExpr(LispList),
    QExpr(LispList),
}

impl LispObject {
    pub fn new_sexpr() -> Self {
        Self::SExpr(LispList::default())
    }

    pub fn new_qexpr() -> Self {
        Self::QExpr(LispList::default())
    }

    pub fn wrap_sexpr(elements: Vec<LispObject>) -> Self {
        Self::SExpr(LispList(elements))
    }

    pub fn wrap_qexpr(elements: Vec<LispObject>) -> Self {
        Self::QExpr(LispList(elements))
    }

    pub fn new_symbol(name: &str) -> Self {
        Self::Symbol(LispSymbol::from(name))
    }

    pub fn error<T: Into<String>>(message: T) -> Self {
        Self::Error(message.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            LispObject::Number(_) => "Number",
            LispObject::Symbol(_) => "Symbol",
            LispObject::Error(_) => "Error",
            LispObject::Function(_) => "Function",
            LispObject::SExpr(_) => "S-Expression",
            LispObject::QExpr(_) => "Q-Expression",
        }
    }

    pub fn is_error(&self) -> bool {
        match self {
            LispObject::Error(_) => true,
            _ => false,
        }
    }

    /// Appends `child` to a composite value. Leaves are returned unchanged.
    pub fn add(mut self, child: LispObject) -> Self {
        if let LispObject::SExpr(list) | LispObject::QExpr(list) = &mut self {
            list.push(child);
        }
        self
    }
}

impl LispList {
    /// Removes the child at `index`, shifting the rest down.
    pub fn pop(&mut self, index: usize) -> Option<LispObject> {
        match index < self.len() {
            true => Some(self.0.remove(index)),
            false => None,
        }
    }

    /// Removes the child at `index` and drops everything else.
    pub fn take(mut self, index: usize) -> Option<LispObject> {
        self.pop(index)
    }
}
