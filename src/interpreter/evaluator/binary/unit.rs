use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::unsupported,
        },
        value::{core::Value, unit::UnitValue},
    },
    util::num::f64_to_i32_checked,
};

fn incompatible(left: &UnitValue, right: &UnitValue, position: usize) -> RuntimeError {
    RuntimeError::IncompatibleUnits { left: left.unit_name(),
                                      right: right.unit_name(),
                                      position }
}

/// Builds a unit value raised to `power`, or a plain number when the powers
/// cancel out.
fn with_power(template: &UnitValue, value: f64, power: i32) -> Value {
    if power == 0 {
        return Value::Number(value);
    }
    Value::Unit(UnitValue { value,
                            power,
                            fixed_prefix: false,
                            ..template.clone() })
}

impl Context {
    /// Evaluates an operation between two unit values.
    ///
    /// `+`, `-` and the comparisons need both sides to measure the same
    /// quantity; the result of `+`/`-` keeps the left operand's unit. `*` and
    /// `/` need the same base unit dimension and compose the powers, so
    /// `m * m` is `m^2` and `cm / m` is a plain number.
    ///
    /// # Errors
    /// `IncompatibleUnits` when the dimensions do not allow the operation.
    ///
    /// # Example
    /// ```
    /// use unitmath::{
    ///     ast::BinaryOperator,
    ///     interpreter::{
    ///         evaluator::core::Context,
    ///         units::find_unit,
    ///         value::{core::Value, unit::UnitValue},
    ///     },
    /// };
    ///
    /// let (cm, centi) = find_unit("cm").unwrap();
    /// let (m, none) = find_unit("m").unwrap();
    /// let a = UnitValue::new(50.0, cm, centi);
    /// let b = UnitValue::new(1.0, m, none);
    ///
    /// let sum = Context::eval_unit_unit(BinaryOperator::Add, &a, &b, 0).unwrap();
    /// assert_eq!(sum.to_string(), "150 cm");
    ///
    /// let ratio = Context::eval_unit_unit(BinaryOperator::Div, &a, &b, 0).unwrap();
    /// assert_eq!(ratio, Value::Number(0.5));
    /// ```
    pub fn eval_unit_unit(op: BinaryOperator,
                          left: &UnitValue,
                          right: &UnitValue,
                          position: usize)
                          -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mul, Pow, Sub};

        match op {
            Add | Sub => {
                if !left.same_dimension(right) {
                    return Err(incompatible(left, right, position));
                }
                let value = if op == Add {
                    left.value + right.value
                } else {
                    left.value - right.value
                };
                Ok(Value::Unit(left.with_value(value)))
            },
            Mul | Div => {
                if !left.same_base(right) {
                    return Err(incompatible(left, right, position));
                }
                if op == Mul {
                    Ok(with_power(left, left.value * right.value, left.power + right.power))
                } else {
                    Ok(with_power(left, left.value / right.value, left.power - right.power))
                }
            },
            Pow => Err(unsupported(op,
                                   &Value::Unit(left.clone()),
                                   &Value::Unit(right.clone()),
                                   position)),
            _ => {
                if !left.same_dimension(right) {
                    return Err(incompatible(left, right, position));
                }
                Ok(Value::Bool(Self::compare_numbers(op, left.value, right.value)))
            },
        }
    }

    /// Evaluates `unit <op> number`.
    ///
    /// `*` and `/` scale the magnitude, `^` raises the unit to an integer
    /// power.
    pub fn eval_unit_number(op: BinaryOperator,
                            unit: &UnitValue,
                            number: f64,
                            position: usize)
                            -> EvalResult<Value> {
        match op {
            BinaryOperator::Mul => Ok(Value::Unit(unit.with_value(unit.value * number))),
            BinaryOperator::Div => Ok(Value::Unit(unit.with_value(unit.value / number))),
            BinaryOperator::Pow => {
                let exponent = f64_to_i32_checked(number, "^", position)?;
                Ok(with_power(unit,
                              unit.value.powi(exponent),
                              unit.power.saturating_mul(exponent)))
            },
            _ => Err(unsupported(op, &Value::Unit(unit.clone()), &Value::Number(number), position)),
        }
    }

    /// Evaluates `number <op> unit`.
    ///
    /// `*` scales the magnitude and `/` inverts the unit's power, so
    /// `1 / s` is a frequency.
    pub fn eval_number_unit(op: BinaryOperator,
                            number: f64,
                            unit: &UnitValue,
                            position: usize)
                            -> EvalResult<Value> {
        match op {
            BinaryOperator::Mul => Ok(Value::Unit(unit.with_value(number * unit.value))),
            BinaryOperator::Div => Ok(with_power(unit, number / unit.value, -unit.power)),
            _ => Err(unsupported(op, &Value::Number(number), &Value::Unit(unit.clone()), position)),
        }
    }
}
