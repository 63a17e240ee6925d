use crate::syntax::SyntaxNode;
use crate::types::{LispInt, LispObject};

pub fn read(node: &SyntaxNode) -> LispObject {
    if node.has_tag("number") {
        return read_number(&node.contents);
    }
    if node.has_tag("symbol") {
        return LispObject::new_symbol(&node.contents);
    }

    let list = if node.is_root() || node.has_tag("sexpr") {
        LispObject::new_sexpr()
    } else if node.has_tag("qexpr") {
        LispObject::new_qexpr()
    } else {
        return LispObject::Error(format!("Unexpected syntax node '{}'", node.tag));
    };

    node.children
        .iter()
        .filter(|child| !child.is_punctuation())
        .fold(list, |list, child| list.add(read(child)))
}

fn read_number(chars: &str) -> LispObject {
    match chars.parse::<LispInt>() {
        Ok(value) => LispObject::Number(value),
        Err(e) => {
            log::trace!("cannot read {:?} as a number: {}", chars, e);
            LispObject::error("Invalid number")
        }
    }
}
