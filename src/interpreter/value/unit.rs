use std::fmt::Display;

use crate::{
    interpreter::units::{Dimension, Prefix, UnitDef, best_prefix},
    util::num::format_number,
};

/// A magnitude carrying a physical unit.
///
/// The magnitude is stored in SI base units. `unit`, `prefix` and `power`
/// only describe how the value was written and how it is displayed, so two
/// values with the same dimension compare and add directly.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitValue {
    /// Magnitude in SI base units.
    pub value:        f64,
    /// The catalog unit used for display.
    pub unit:         &'static UnitDef,
    /// The prefix used for display.
    pub prefix:       &'static Prefix,
    /// Power the unit is raised to (`2` for `m^2`).
    pub power:        i32,
    /// Set by an `in` conversion: display keeps `prefix` instead of choosing
    /// the best one.
    pub fixed_prefix: bool,
}

impl UnitValue {
    /// Builds a unit value from a magnitude written in `prefix` + `unit`.
    ///
    /// # Example
    /// ```
    /// use unitmath::interpreter::{units::find_unit, value::unit::UnitValue};
    ///
    /// let (unit, prefix) = find_unit("cm").unwrap();
    /// let length = UnitValue::new(5.0, unit, prefix);
    /// assert!((length.value - 0.05).abs() < 1e-12);
    /// assert_eq!(length.to_string(), "50 mm");
    /// ```
    #[must_use]
    pub fn new(magnitude: f64, unit: &'static UnitDef, prefix: &'static Prefix) -> Self {
        Self { value: magnitude * unit.value * unit.prefix_factor(prefix),
               unit,
               prefix,
               power: 1,
               fixed_prefix: false }
    }

    /// Returns a copy holding another SI magnitude.
    #[must_use]
    pub fn with_value(&self, value: f64) -> Self {
        Self { value,
               ..self.clone() }
    }

    /// Returns the full dimension, including the power.
    #[must_use]
    pub fn dimension(&self) -> Dimension {
        self.unit.dimension * self.power
    }

    /// Returns `true` if both values are expressed in units of the same base
    /// dimension, regardless of their powers.
    #[must_use]
    pub fn same_base(&self, other: &Self) -> bool {
        self.unit.dimension == other.unit.dimension
    }

    /// Returns `true` if both values measure the same quantity.
    #[must_use]
    pub fn same_dimension(&self, other: &Self) -> bool {
        self.dimension() == other.dimension()
    }

    /// Re-expresses the value in another unit. The prefix is fixed so the
    /// result displays exactly in the requested unit.
    ///
    /// The caller checks that the dimensions agree.
    #[must_use]
    pub fn convert_to(&self, unit: &'static UnitDef, prefix: &'static Prefix) -> Self {
        Self { value: self.value,
               unit,
               prefix,
               power: 1,
               fixed_prefix: true }
    }

    /// Returns the magnitude as displayed with `prefix`.
    #[must_use]
    pub fn magnitude_in(&self, prefix: &Prefix) -> f64 {
        self.value / (self.unit.value * self.unit.prefix_factor(prefix)).powi(self.power)
    }

    /// Returns the prefix used for display.
    #[must_use]
    pub fn display_prefix(&self) -> &'static Prefix {
        if self.fixed_prefix {
            self.prefix
        } else {
            best_prefix(self.unit,
                        self.prefix,
                        self.value / self.unit.value.powi(self.power),
                        self.power)
        }
    }

    /// Returns the written unit, such as `cm` or `m^2`.
    #[must_use]
    pub fn unit_name(&self) -> String {
        self.name_with(self.prefix)
    }

    fn name_with(&self, prefix: &Prefix) -> String {
        if self.power == 1 {
            format!("{}{}", prefix.name, self.unit.name)
        } else {
            format!("{}{}^{}", prefix.name, self.unit.name, self.power)
        }
    }
}

impl Display for UnitValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = self.display_prefix();
        write!(f,
               "{} {}",
               format_number(self.magnitude_in(prefix)),
               self.name_with(prefix))
    }
}
