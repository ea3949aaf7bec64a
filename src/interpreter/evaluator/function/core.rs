use std::rc::Rc;

use crate::{
    ast::{Expr, FunctionDef},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Bindings, Context, EvalResult},
            function::{arithmetic, builtin, matrix},
        },
        value::core::Value,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated argument values and the byte
/// offset of the call.
type BuiltinFn = fn(&[Value], usize) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
/// - `AtLeast(n)` means the builtin reduces over `n` or more arguments.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    AtLeast(usize),
}

/// Defines builtin functions by generating a lookup table.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
    };
}

builtin_functions! {
    "abs"       => { arity: Arity::Exact(1), func: builtin::abs },
    "sqrt"      => { arity: Arity::Exact(1), func: builtin::sqrt },
    "exp"       => { arity: Arity::Exact(1), func: builtin::exp },
    "log"       => { arity: Arity::OneOf(&[1, 2]), func: builtin::log },
    "log10"     => { arity: Arity::Exact(1), func: builtin::log10 },
    "sin"       => { arity: Arity::Exact(1), func: builtin::sin },
    "cos"       => { arity: Arity::Exact(1), func: builtin::cos },
    "tan"       => { arity: Arity::Exact(1), func: builtin::tan },
    "asin"      => { arity: Arity::Exact(1), func: builtin::asin },
    "acos"      => { arity: Arity::Exact(1), func: builtin::acos },
    "atan"      => { arity: Arity::Exact(1), func: builtin::atan },
    "atan2"     => { arity: Arity::Exact(2), func: builtin::atan2 },
    "ceil"      => { arity: Arity::Exact(1), func: |args, pos| builtin::unary_round("ceil", args, pos) },
    "floor"     => { arity: Arity::Exact(1), func: |args, pos| builtin::unary_round("floor", args, pos) },
    "round"     => { arity: Arity::OneOf(&[1, 2]), func: builtin::round },
    "sign"      => { arity: Arity::Exact(1), func: builtin::sign },
    "re"        => { arity: Arity::Exact(1), func: builtin::re },
    "im"        => { arity: Arity::Exact(1), func: builtin::im },
    "conj"      => { arity: Arity::Exact(1), func: builtin::conj },
    "arg"       => { arity: Arity::Exact(1), func: builtin::arg },
    "assert"    => { arity: Arity::Exact(1), func: builtin::assert_fn },
    "factorial" => { arity: Arity::Exact(1), func: arithmetic::factorial_fn },
    "gcd"       => { arity: Arity::AtLeast(2), func: arithmetic::gcd },
    "lcm"       => { arity: Arity::AtLeast(2), func: arithmetic::lcm },
    "add"       => { arity: Arity::Exact(2), func: arithmetic::add },
    "subtract"  => { arity: Arity::Exact(2), func: arithmetic::subtract },
    "multiply"  => { arity: Arity::Exact(2), func: arithmetic::multiply },
    "divide"    => { arity: Arity::Exact(2), func: arithmetic::divide },
    "pow"       => { arity: Arity::Exact(2), func: arithmetic::pow },
    "equal"     => { arity: Arity::Exact(2), func: arithmetic::equal },
    "unequal"   => { arity: Arity::Exact(2), func: arithmetic::unequal },
    "smaller"   => { arity: Arity::Exact(2), func: arithmetic::smaller },
    "larger"    => { arity: Arity::Exact(2), func: arithmetic::larger },
    "size"      => { arity: Arity::Exact(1), func: matrix::size },
    "transpose" => { arity: Arity::Exact(1), func: matrix::transpose },
    "zeros"     => { arity: Arity::OneOf(&[1, 2]), func: matrix::zeros },
    "ones"      => { arity: Arity::OneOf(&[1, 2]), func: matrix::ones },
    "eye"       => { arity: Arity::OneOf(&[1, 2]), func: matrix::eye },
    "lu"        => { arity: Arity::Exact(1), func: matrix::lu },
    "det"       => { arity: Arity::Exact(1), func: matrix::det },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// Returns `true` if the count is permitted, `false` otherwise.
    fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(arr) => arr.contains(&n),
            Self::AtLeast(m) => n >= *m,
        }
    }

    /// Describes the accepted counts for error messages.
    fn describe(&self) -> String {
        match self {
            Self::Exact(m) => m.to_string(),
            Self::OneOf(arr) => arr.iter()
                                   .map(ToString::to_string)
                                   .collect::<Vec<_>>()
                                   .join(" or "),
            Self::AtLeast(m) => format!("at least {m}"),
        }
    }
}

impl Context {
    /// Evaluates `name(arguments)`.
    ///
    /// Whether this is a call or an index read is decided by what `name` is
    /// bound to at this moment, checked in order:
    /// 1. a parameter of the function being evaluated (index read);
    /// 2. a user function in the scope (call);
    /// 3. a value in the scope (index read);
    /// 4. a built-in function (call).
    ///
    /// User values therefore shadow built-ins of the same name.
    ///
    /// # Errors
    /// - `UndefinedSymbol` if the name is bound to nothing.
    /// - `ArgumentCount` if the argument count does not match, reported before
    ///   any argument is evaluated.
    ///
    /// # Example
    /// ```
    /// use unitmath::{
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    ///     parse,
    /// };
    ///
    /// let mut ctx = Context::new();
    /// let v = ctx.eval(&parse("gcd(12, 18, 27)").unwrap(), None).unwrap();
    /// assert_eq!(v, Value::Number(3.0));
    ///
    /// ctx.eval(&parse("gcd = [7, 8, 9]").unwrap(), None).unwrap();
    /// let v = ctx.eval(&parse("gcd(2)").unwrap(), None).unwrap();
    /// assert_eq!(v, Value::Number(8.0));
    /// ```
    pub fn eval_call(&mut self,
                     name: &str,
                     arguments: &[Expr],
                     position: usize,
                     bindings: Option<&Bindings>)
                     -> EvalResult<Value> {
        if let Some(b) = bindings
           && let Some(value) = b.get(name)
        {
            let value = value.clone();
            return self.eval_index_read(&value, arguments, position, bindings);
        }
        if let Some(def) = self.scope.get_function(name) {
            return self.call_user_function(&def, arguments, position, bindings);
        }
        if let Some(value) = self.scope.value(name).cloned() {
            return self.eval_index_read(&value, arguments, position, bindings);
        }
        if let Some(builtin) = BUILTIN_TABLE.iter().find(|b| b.name == name) {
            if !builtin.arity.check(arguments.len()) {
                return Err(RuntimeError::ArgumentCount { name: name.to_string(),
                                                         expected: builtin.arity.describe(),
                                                         found: arguments.len(),
                                                         position });
            }
            let args = self.eval_arguments(arguments, bindings)?;
            return (builtin.func)(&args, position);
        }
        Err(RuntimeError::UndefinedSymbol { name: name.to_string(),
                                            position })
    }

    fn eval_arguments(&mut self, arguments: &[Expr], bindings: Option<&Bindings>) -> EvalResult<Vec<Value>> {
        arguments.iter()
                 .map(|arg| self.eval(arg, bindings))
                 .collect()
    }

    /// Executes a user-defined function.
    ///
    /// Its parameter count must match the number of supplied arguments.
    /// Arguments are evaluated in the caller's bindings; the body then sees
    /// only the new parameter bindings plus the scope as it is now, so free
    /// names pick up their current values.
    fn call_user_function(&mut self,
                          def: &Rc<FunctionDef>,
                          arguments: &[Expr],
                          position: usize,
                          bindings: Option<&Bindings>)
                          -> EvalResult<Value> {
        if arguments.len() != def.params.len() {
            return Err(RuntimeError::ArgumentCount { name: def.name.clone(),
                                                     expected: def.params.len().to_string(),
                                                     found: arguments.len(),
                                                     position });
        }

        let values = self.eval_arguments(arguments, bindings)?;
        let locals = def.params
                        .iter()
                        .cloned()
                        .zip(values)
                        .collect::<Bindings>();

        self.eval(&def.body, Some(&locals))
    }
}
