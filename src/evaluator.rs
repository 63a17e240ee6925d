use crate::environment::Environment;
use crate::types::{LispList, LispObject};
use itertools::Itertools;

pub fn eval(env: &mut Environment, obj: LispObject) -> LispObject {
    log::trace!("eval {}", obj);
    match obj {
        LispObject::Symbol(name) => env.get(&name),
        LispObject::SExpr(list) => eval_sexpr(env, list),
        _ => obj,
    }
}

fn eval_sexpr(env: &mut Environment, list: LispList) -> LispObject {
    // Every child is evaluated before any of them is inspected for errors.
    let mut cells: LispList = LispList(list.0.into_iter().map(|obj| eval(env, obj)).collect());

    if let Some(index) = cells.iter().position(LispObject::is_error) {
        return cells.take(index).unwrap_or_else(LispObject::new_sexpr);
    }

    match cells.len() {
        0 => LispObject::SExpr(cells),
        1 => cells.take(0).unwrap_or_else(LispObject::new_sexpr),
        _ => match cells.pop(0) {
            Some(LispObject::Function(builtin)) => builtin.apply(env, cells),
            _ => LispObject::error("First element is not a function"),
        },
    }
}

pub(crate) fn pretty_print_args(args: &[LispObject]) -> String {
    match args.len() {
        0 => "no args".into(),
        1 => args[0].to_string(),
        _ => format!("\n\t{}", args.iter().join("\n\t")),
    }
}
