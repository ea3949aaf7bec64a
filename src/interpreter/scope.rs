//! Variable and function storage shared by consecutive evaluations.

use std::{collections::HashMap, rc::Rc};

use tracing::debug;

use crate::{
    ast::FunctionDef,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{complex::I, core::Value},
    },
};

/// Name of the implicit binding holding the last top-level result.
pub const ANS: &str = "ans";

/// Construction options for a [`Scope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Reject every mutation with [`RuntimeError::ReadOnly`].
    pub read_only: bool,
    /// Seed the scope with the built-in constants (`pi`, `e`, `i`, ...).
    pub constants: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { read_only: false,
               constants: true, }
    }
}

/// What a name is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A plain value.
    Value(Value),
    /// A user-defined function. Only the definition is stored; free names in
    /// its body are resolved when it is called.
    Function(Rc<FunctionDef>),
}

/// A mapping from names to values and user functions.
///
/// A scope belongs to one evaluator and lives as long as it does. Names are
/// unique and the last write wins, regardless of whether the previous entry
/// was a value or a function.
#[derive(Debug, Clone)]
pub struct Scope {
    entries: HashMap<String, Entry>,
    options: Options,
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    /// Creates a writable scope holding the built-in constants.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Creates a read-only scope holding the built-in constants.
    ///
    /// # Example
    /// ```
    /// use unitmath::interpreter::{scope::Scope, value::core::Value};
    ///
    /// let mut scope = Scope::read_only();
    /// assert!(scope.get("pi").is_ok());
    /// assert!(scope.set("a", Value::Number(3.0)).is_err());
    /// ```
    #[must_use]
    pub fn read_only() -> Self {
        Self::with_options(Options { read_only: true,
                                     ..Options::default() })
    }

    /// Creates a scope configured by `options`.
    #[must_use]
    pub fn with_options(options: Options) -> Self {
        let mut scope = Self { entries: HashMap::new(),
                               options };
        if options.constants {
            scope.seed_constants();
        }
        scope
    }

    fn seed_constants(&mut self) {
        use std::f64::consts;

        let constants = [("pi", Value::Number(consts::PI)),
                         ("PI", Value::Number(consts::PI)),
                         ("e", Value::Number(consts::E)),
                         ("E", Value::Number(consts::E)),
                         ("tau", Value::Number(consts::TAU)),
                         ("phi", Value::Number(f64::midpoint(1.0, 5.0_f64.sqrt()))),
                         ("i", Value::Complex(I)),
                         ("Infinity", Value::Number(f64::INFINITY)),
                         ("NaN", Value::Number(f64::NAN)),
                         ("LN2", Value::Number(consts::LN_2)),
                         ("LN10", Value::Number(consts::LN_10)),
                         ("LOG2E", Value::Number(consts::LOG2_E)),
                         ("LOG10E", Value::Number(consts::LOG10_E)),
                         ("SQRT2", Value::Number(consts::SQRT_2)),
                         ("SQRT1_2", Value::Number(consts::FRAC_1_SQRT_2))];
        for (name, value) in constants {
            self.entries.insert(name.to_string(), Entry::Value(value));
        }
    }

    /// Returns `true` if mutations are rejected.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.options.read_only
    }

    /// Returns the options the scope was built with.
    #[must_use]
    pub const fn options(&self) -> Options {
        self.options
    }

    /// Fails with [`RuntimeError::ReadOnly`] if the scope is read-only.
    ///
    /// Called before any part of a mutating statement is evaluated.
    pub fn check_writable(&self, operation: &'static str, name: &str, position: usize) -> EvalResult<()> {
        if self.is_read_only() {
            debug!(operation, name, "rejected mutation of read-only scope");
            return Err(RuntimeError::ReadOnly { operation,
                                                name: name.to_string(),
                                                position });
        }
        Ok(())
    }

    /// Returns `true` if `name` is bound to a value or a function.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the value bound to `name`, if it is bound to a value.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        match self.entries.get(name) {
            Some(Entry::Value(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a copy of the value bound to `name`.
    ///
    /// # Errors
    /// `UndefinedSymbol` if `name` is not bound to a value.
    pub fn get(&self, name: &str) -> EvalResult<Value> {
        self.value(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedSymbol { name:     name.to_string(),
                                                           position: 0, })
    }

    /// Binds `name` to `value`, replacing any previous entry.
    ///
    /// # Errors
    /// `ReadOnly` if the scope is read-only.
    pub fn set(&mut self, name: &str, value: Value) -> EvalResult<()> {
        self.check_writable("assign", name, 0)?;
        debug!(name, %value, "binding committed");
        self.entries.insert(name.to_string(), Entry::Value(value));
        Ok(())
    }

    /// Returns the user function bound to `name`.
    #[must_use]
    pub fn get_function(&self, name: &str) -> Option<Rc<FunctionDef>> {
        match self.entries.get(name) {
            Some(Entry::Function(def)) => Some(Rc::clone(def)),
            _ => None,
        }
    }

    /// Binds a user function under its name, replacing any previous entry.
    ///
    /// # Errors
    /// `ReadOnly` if the scope is read-only.
    pub fn define_function(&mut self, def: FunctionDef) -> EvalResult<()> {
        self.check_writable("define function", &def.name, def.position)?;
        debug!(signature = %def.signature(), "function defined");
        self.entries.insert(def.name.clone(), Entry::Function(Rc::new(def)));
        Ok(())
    }

    /// Removes the binding of `name` and returns it.
    ///
    /// # Errors
    /// `ReadOnly` if the scope is read-only.
    pub fn remove(&mut self, name: &str) -> EvalResult<Option<Entry>> {
        self.check_writable("remove", name, 0)?;
        Ok(self.entries.remove(name))
    }

    /// Removes every user binding. Built-in constants are restored if the
    /// scope was created with them.
    ///
    /// # Errors
    /// `ReadOnly` if the scope is read-only.
    pub fn clear(&mut self) -> EvalResult<()> {
        self.check_writable("clear", "*", 0)?;
        self.entries.clear();
        if self.options.constants {
            self.seed_constants();
        }
        Ok(())
    }

    /// Returns the last top-level result.
    #[must_use]
    pub fn ans(&self) -> Option<&Value> {
        self.value(ANS)
    }

    /// Stores the last top-level result. Ignored on read-only scopes.
    pub fn set_ans(&mut self, value: Value) {
        if !self.is_read_only() {
            self.entries.insert(ANS.to_string(), Entry::Value(value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expr;

    fn identity() -> FunctionDef {
        FunctionDef { name:     "f".to_string(),
                      params:   vec!["x".to_string()],
                      body:     Box::new(Expr::Variable { name:     "x".to_string(),
                                                          position: 0, }),
                      position: 0, }
    }

    #[test]
    fn constants_are_optional() {
        assert!(Scope::new().contains("pi"));
        let bare = Scope::with_options(Options { read_only: false,
                                                 constants: false, });
        assert!(!bare.contains("pi"));
    }

    #[test]
    fn last_write_wins_across_kinds() {
        let mut scope = Scope::new();
        scope.define_function(identity()).unwrap();
        assert!(scope.get_function("f").is_some());
        scope.set("f", Value::Number(1.0)).unwrap();
        assert!(scope.get_function("f").is_none());
        assert_eq!(scope.get("f").unwrap(), Value::Number(1.0));
    }

    #[test]
    fn read_only_rejects_every_mutation() {
        let mut scope = Scope::read_only();
        assert!(matches!(scope.set("a", Value::Number(1.0)),
                         Err(RuntimeError::ReadOnly { .. })));
        assert!(scope.define_function(identity()).is_err());
        assert!(scope.remove("pi").is_err());
        assert!(scope.clear().is_err());
        scope.set_ans(Value::Number(1.0));
        assert!(scope.ans().is_none());
    }

    #[test]
    fn clear_restores_constants() {
        let mut scope = Scope::new();
        scope.set("a", Value::Number(1.0)).unwrap();
        scope.clear().unwrap();
        assert!(!scope.contains("a"));
        assert!(scope.contains("e"));
    }

    #[test]
    fn missing_names_are_undefined() {
        assert!(matches!(Scope::new().get("nope"),
                         Err(RuntimeError::UndefinedSymbol { ref name, .. }) if name == "nope"));
    }
}
