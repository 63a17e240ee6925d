use crate::core::Builtin;
use crate::types::{LispObject, LispSymbol};

/// A single flat table of bindings, kept in insertion order.
#[derive(Debug)]
pub struct Environment {
    bindings: Vec<(LispSymbol, LispObject)>,
}

impl Environment {
    /// An environment with no bindings at all, not even the builtins.
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> LispObject {
        match self.bindings.iter().find(|(name, _)| name.as_str() == key) {
            Some((_, value)) => value.clone(),
            None => LispObject::Error(format!("Unbound symbol '{}'", key)),
        }
    }

    pub fn put<T>(&mut self, key: T, value: &LispObject)
    where
        T: Into<LispSymbol>,
    {
        let key = key.into();
        log::debug!("put {} = {}", key, value);
        match self.bindings.iter_mut().find(|(name, _)| *name == key) {
            Some((_, bound)) => *bound = value.clone(),
            None => self.bindings.push((key, value.clone())),
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for Environment {
    fn default() -> Self {
        let mut env = Self::empty();
        for &builtin in Builtin::ALL.iter() {
            env.put(builtin.name(), &LispObject::Function(builtin));
        }
        env
    }
}
