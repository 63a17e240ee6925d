use crate::environment::Environment;
use crate::evaluator;
use crate::types::{Arity, BadArgCount, LispInt, LispList, LispObject, LispSymbol};
use std::fmt;
use std::str::FromStr;

type Outcome = Result<LispObject, BuiltinError>;

#[derive(Debug)]
pub enum BuiltinError {
    BadArgCount(BadArgCount),
    WrongType {
        name: &'static str,
        index: usize,
        got: &'static str,
        expected: &'static str,
    },
    EmptyList {
        name: &'static str,
        index: usize,
    },
    NotANumber,
    DivideByZero,
    DefineNonSymbol(&'static str),
    DefineCountMismatch {
        symbols: usize,
        values: usize,
    },
    UnknownFunction,
}

impl fmt::Display for BuiltinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuiltinError::BadArgCount(e) => write!(f, "{}", e),
            BuiltinError::WrongType {
                name,
                index,
                got,
                expected,
            } => write!(
                f,
                "Function '{}' passed incorrect type for argument {}. Got {}, Expected {}.",
                name, index, got, expected
            ),
            BuiltinError::EmptyList { name, index } => {
                write!(f, "Function '{}' passed {{}} for argument {}.", name, index)
            }
            BuiltinError::NotANumber => write!(f, "Cannot operate on non-number"),
            BuiltinError::DivideByZero => write!(f, "Division by zero"),
            BuiltinError::DefineNonSymbol(got) => write!(
                f,
                "Function 'def' cannot define non-symbol. Got {}, Expected Symbol.",
                got
            ),
            BuiltinError::DefineCountMismatch { symbols, values } => write!(
                f,
                "Function 'def' passed incorrect number of values for symbols. Got {}, Expected {}.",
                values, symbols
            ),
            BuiltinError::UnknownFunction => write!(f, "Unknown function"),
        }
    }
}

impl From<BadArgCount> for BuiltinError {
    fn from(e: BadArgCount) -> Self {
        Self::BadArgCount(e)
    }
}

impl From<BuiltinError> for LispObject {
    fn from(e: BuiltinError) -> Self {
        LispObject::Error(e.to_string())
    }
}

pub struct PrimitiveFn {
    pub name: &'static str,
    pub arity: Arity,
    pub fn_ptr: fn(&mut Environment, LispList) -> Outcome,
}

impl fmt::Debug for PrimitiveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "primitive function #<{}>", self.name)
    }
}

/// The complete builtin vocabulary. A `Function` value holds one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    List,
    Head,
    Tail,
    Join,
    Eval,
    Def,
    Add,
    Sub,
    Mul,
    Div,
}

impl Builtin {
    pub const ALL: [Builtin; 10] = [
        Builtin::List,
        Builtin::Head,
        Builtin::Tail,
        Builtin::Join,
        Builtin::Eval,
        Builtin::Def,
        Builtin::Add,
        Builtin::Sub,
        Builtin::Mul,
        Builtin::Div,
    ];

    pub fn primitive(self) -> PrimitiveFn {
        match self {
            Builtin::List => LIST,
            Builtin::Head => HEAD,
            Builtin::Tail => TAIL,
            Builtin::Join => JOIN,
            Builtin::Eval => EVAL,
            Builtin::Def => DEF,
            Builtin::Add => ADD,
            Builtin::Sub => SUB,
            Builtin::Mul => MUL,
            Builtin::Div => DIV,
        }
    }

    pub fn name(self) -> &'static str {
        self.primitive().name
    }

    /// Consumes `args`, which must already be evaluated.
    pub fn apply(self, env: &mut Environment, args: LispList) -> LispObject {
        let func = self.primitive();
        log::trace!(
            "Call {} with {}",
            func.name,
            evaluator::pretty_print_args(&args)
        );
        let result = func
            .arity
            .validate_for(args.len(), func.name)
            .map_err(BuiltinError::from)
            .and_then(|()| (func.fn_ptr)(env, args));
        match result {
            Ok(val) => {
                log::trace!("Call to {} resulted in {}", func.name, val);
                val
            }
            Err(e) => {
                log::trace!("Call to {} failed: {}", func.name, e);
                e.into()
            }
        }
    }
}

impl FromStr for Builtin {
    type Err = BuiltinError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Builtin::ALL
            .iter()
            .copied()
            .find(|builtin| builtin.name() == name)
            .ok_or(BuiltinError::UnknownFunction)
    }
}

/// Dispatches on a selector name rather than a `Function` value.
pub fn call(env: &mut Environment, name: &str, args: LispList) -> LispObject {
    match name.parse::<Builtin>() {
        Ok(builtin) => builtin.apply(env, args),
        Err(e) => e.into(),
    }
}

fn qexpr_arg(
    name: &'static str,
    arg: Option<LispObject>,
    index: usize,
) -> Result<LispList, BuiltinError> {
    match arg {
        Some(LispObject::QExpr(list)) => Ok(list),
        Some(other) => Err(BuiltinError::WrongType {
            name,
            index,
            got: other.type_name(),
            expected: "Q-Expression",
        }),
        None => unreachable!("arity is checked before dispatch"),
    }
}

fn non_empty_qexpr(name: &'static str, args: LispList) -> Result<LispList, BuiltinError> {
    let list = qexpr_arg(name, args.take(0), 0)?;
    match list.is_empty() {
        true => Err(BuiltinError::EmptyList { name, index: 0 }),
        false => Ok(list),
    }
}

const LIST: PrimitiveFn = PrimitiveFn {
    name: "list",
    fn_ptr: list_,
    arity: Arity::at_least(0),
};

fn list_(_env: &mut Environment, args: LispList) -> Outcome {
    Ok(LispObject::QExpr(args))
}

const HEAD: PrimitiveFn = PrimitiveFn {
    name: "head",
    fn_ptr: head_,
    arity: Arity::exactly(1),
};

fn head_(_env: &mut Environment, args: LispList) -> Outcome {
    let mut list = non_empty_qexpr("head", args)?;
    list.truncate(1);
    Ok(LispObject::QExpr(list))
}

const TAIL: PrimitiveFn = PrimitiveFn {
    name: "tail",
    fn_ptr: tail_,
    arity: Arity::exactly(1),
};

fn tail_(_env: &mut Environment, args: LispList) -> Outcome {
    let mut list = non_empty_qexpr("tail", args)?;
    list.pop(0);
    Ok(LispObject::QExpr(list))
}

const JOIN: PrimitiveFn = PrimitiveFn {
    name: "join",
    fn_ptr: join_,
    arity: Arity::at_least(1),
};

fn join_(_env: &mut Environment, args: LispList) -> Outcome {
    let lists: Result<Vec<LispList>, _> = args
        .0
        .into_iter()
        .enumerate()
        .map(|(index, arg)| qexpr_arg("join", Some(arg), index))
        .collect();
    let joined = lists?.into_iter().flat_map(|list| list.0).collect();
    Ok(LispObject::wrap_qexpr(joined))
}

const EVAL: PrimitiveFn = PrimitiveFn {
    name: "eval",
    fn_ptr: eval_,
    arity: Arity::exactly(1),
};

fn eval_(env: &mut Environment, args: LispList) -> Outcome {
    let list = qexpr_arg("eval", args.take(0), 0)?;
    Ok(evaluator::eval(env, LispObject::SExpr(list)))
}

const DEF: PrimitiveFn = PrimitiveFn {
    name: "def",
    fn_ptr: def_,
    arity: Arity::at_least(1),
};

fn def_(env: &mut Environment, mut args: LispList) -> Outcome {
    let names = qexpr_arg("def", args.pop(0), 0)?;
    let symbols: Result<Vec<LispSymbol>, _> = names
        .0
        .into_iter()
        .map(|name| match name {
            LispObject::Symbol(s) => Ok(s),
            other => Err(BuiltinError::DefineNonSymbol(other.type_name())),
        })
        .collect();
    let symbols = symbols?;
    if symbols.len() != args.len() {
        return Err(BuiltinError::DefineCountMismatch {
            symbols: symbols.len(),
            values: args.len(),
        });
    }
    for (symbol, value) in symbols.into_iter().zip(args.iter()) {
        log::debug!("define {} as {}", symbol, value);
        env.put(symbol, value);
    }
    Ok(LispObject::new_sexpr())
}

fn grab_ints(args: LispList) -> Result<Vec<LispInt>, BuiltinError> {
    args.0
        .into_iter()
        .map(|arg| match arg {
            LispObject::Number(x) => Ok(x),
            _ => Err(BuiltinError::NotANumber),
        })
        .collect()
}

/// Folds left from the first argument; stops at the first failing step.
fn fold_ints(
    args: LispList,
    combine: fn(LispInt, LispInt) -> Result<LispInt, BuiltinError>,
) -> Outcome {
    let ints = grab_ints(args)?;
    match ints.split_first() {
        Some((&first, rest)) => rest
            .iter()
            .try_fold(first, |acc, &x| combine(acc, x))
            .map(LispObject::Number),
        None => unreachable!("arity is checked before dispatch"),
    }
}

const ADD: PrimitiveFn = PrimitiveFn {
    name: "+",
    fn_ptr: add_,
    arity: Arity::at_least(1),
};

fn add_(_env: &mut Environment, args: LispList) -> Outcome {
    fold_ints(args, |acc, x| Ok(acc.wrapping_add(x)))
}

const SUB: PrimitiveFn = PrimitiveFn {
    name: "-",
    fn_ptr: sub_,
    arity: Arity::at_least(1),
};

fn sub_(_env: &mut Environment, args: LispList) -> Outcome {
    match args.len() {
        1 => grab_ints(args).map(|ints| LispObject::Number(ints[0].wrapping_neg())),
        _ => fold_ints(args, |acc, x| Ok(acc.wrapping_sub(x))),
    }
}

const MUL: PrimitiveFn = PrimitiveFn {
    name: "*",
    fn_ptr: mul_,
    arity: Arity::at_least(1),
};

fn mul_(_env: &mut Environment, args: LispList) -> Outcome {
    fold_ints(args, |acc, x| Ok(acc.wrapping_mul(x)))
}

const DIV: PrimitiveFn = PrimitiveFn {
    name: "/",
    fn_ptr: div_,
    arity: Arity::at_least(1),
};

fn div_(_env: &mut Environment, args: LispList) -> Outcome {
    fold_ints(args, |acc, x| match x {
        0 => Err(BuiltinError::DivideByZero),
        _ => Ok(acc.wrapping_div(x)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nums(values: &[LispInt]) -> LispList {
        LispList(values.iter().copied().map(LispObject::Number).collect())
    }

    fn qexpr(values: &[LispInt]) -> LispObject {
        LispObject::QExpr(nums(values))
    }

    fn call_str(name: &str, args: LispList) -> String {
        let mut env = Environment::default();
        call(&mut env, name, args).to_string()
    }

    #[test]
    fn names_round_trip() {
        for &builtin in Builtin::ALL.iter() {
            assert_eq!(builtin.name().parse::<Builtin>().ok(), Some(builtin));
        }
    }

    #[test]
    fn unknown_selector() {
        assert_eq!(call_str("cons", nums(&[1])), "Error: Unknown function");
    }

    #[test]
    fn arithmetic() {
        assert_eq!(call_str("+", nums(&[1, 2, 3])), "6");
        assert_eq!(call_str("-", nums(&[10, 4, 3])), "3");
        assert_eq!(call_str("-", nums(&[5])), "-5");
        assert_eq!(call_str("*", nums(&[2, 3, 4])), "24");
        assert_eq!(call_str("/", nums(&[20, 2, 5])), "2");
        assert_eq!(call_str("/", nums(&[7])), "7");
    }

    #[test]
    fn arithmetic_wraps() {
        assert_eq!(
            call_str("+", nums(&[LispInt::MAX, 1])),
            LispInt::MIN.to_string()
        );
        assert_eq!(
            call_str("-", nums(&[LispInt::MIN])),
            LispInt::MIN.to_string()
        );
        assert_eq!(
            call_str("/", nums(&[LispInt::MIN, -1])),
            LispInt::MIN.to_string()
        );
    }

    #[test]
    fn division_by_zero_aborts_fold() {
        assert_eq!(call_str("/", nums(&[4, 0])), "Error: Division by zero");
        assert_eq!(call_str("/", nums(&[4, 0, 2])), "Error: Division by zero");
    }

    #[test]
    fn non_numbers_rejected() {
        let args = LispList(vec![LispObject::Number(1), qexpr(&[2])]);
        assert_eq!(call_str("+", args), "Error: Cannot operate on non-number");
    }

    #[test]
    fn arithmetic_needs_an_argument() {
        assert_eq!(
            call_str("*", LispList::default()),
            "Error: Function '*' passed incorrect number of arguments. Got 0, Expected at least 1."
        );
    }

    #[test]
    fn list_relabels() {
        assert_eq!(call_str("list", nums(&[1, 2, 3])), "{1 2 3}");
        assert_eq!(call_str("list", LispList::default()), "{}");
    }

    #[test]
    fn head_and_tail() {
        assert_eq!(call_str("head", LispList(vec![qexpr(&[1, 2, 3])])), "{1}");
        assert_eq!(call_str("tail", LispList(vec![qexpr(&[1, 2, 3])])), "{2 3}");
        assert_eq!(call_str("tail", LispList(vec![qexpr(&[1])])), "{}");
    }

    #[test]
    fn head_errors() {
        assert_eq!(
            call_str("head", LispList(vec![qexpr(&[1]), qexpr(&[2])])),
            "Error: Function 'head' passed incorrect number of arguments. Got 2, Expected exactly 1."
        );
        assert_eq!(
            call_str("head", nums(&[1])),
            "Error: Function 'head' passed incorrect type for argument 0. Got Number, Expected Q-Expression."
        );
        assert_eq!(
            call_str("tail", LispList(vec![qexpr(&[])])),
            "Error: Function 'tail' passed {} for argument 0."
        );
    }

    #[test]
    fn join_concatenates_in_order() {
        let args = LispList(vec![qexpr(&[1, 2]), qexpr(&[]), qexpr(&[3, 4])]);
        assert_eq!(call_str("join", args), "{1 2 3 4}");
    }

    #[test]
    fn join_checks_every_argument() {
        let args = LispList(vec![qexpr(&[1]), LispObject::new_sexpr()]);
        assert_eq!(
            call_str("join", args),
            "Error: Function 'join' passed incorrect type for argument 1. Got S-Expression, Expected Q-Expression."
        );
    }

    #[test]
    fn eval_runs_quoted_code() {
        let code = LispObject::wrap_qexpr(vec![
            LispObject::new_symbol("+"),
            LispObject::Number(1),
            LispObject::Number(2),
        ]);
        assert_eq!(call_str("eval", LispList(vec![code])), "3");
        assert_eq!(call_str("eval", LispList(vec![qexpr(&[])])), "()");
    }

    #[test]
    fn def_binds_names() {
        let mut env = Environment::default();
        let args = LispList(vec![
            LispObject::wrap_qexpr(vec![
                LispObject::new_symbol("a"),
                LispObject::new_symbol("b"),
            ]),
            LispObject::Number(1),
            qexpr(&[2]),
        ]);
        assert_eq!(call(&mut env, "def", args), LispObject::new_sexpr());
        assert_eq!(env.get("a"), LispObject::Number(1));
        assert_eq!(env.get("b"), qexpr(&[2]));
    }

    #[test]
    fn def_errors() {
        let args = LispList(vec![
            LispObject::wrap_qexpr(vec![LispObject::Number(1)]),
            LispObject::Number(1),
        ]);
        assert_eq!(
            call_str("def", args),
            "Error: Function 'def' cannot define non-symbol. Got Number, Expected Symbol."
        );
        let args = LispList(vec![
            LispObject::wrap_qexpr(vec![LispObject::new_symbol("a")]),
            LispObject::Number(1),
            LispObject::Number(2),
        ]);
        assert_eq!(
            call_str("def", args),
            "Error: Function 'def' passed incorrect number of values for symbols. Got 2, Expected 1."
        );
        assert_eq!(
            call_str("def", nums(&[1])),
            "Error: Function 'def' passed incorrect type for argument 0. Got Number, Expected Q-Expression."
        );
    }
}
