//! Built-in catalog of physical units and SI prefixes.
//!
//! Every unit is described by its dimension (an exponent vector over the
//! base quantities), its factor relative to the SI base unit, and the prefix
//! family it accepts. Magnitudes are always stored in SI base units; the
//! catalog only decides how they are read and displayed.

use std::ops::Mul;

/// Number of base quantities tracked by a [`Dimension`].
pub const BASE_QUANTITIES: usize = 9;

/// Exponents of the base quantities: length, mass, time, current,
/// temperature, luminous intensity, amount of substance, angle and bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimension(pub [i32; BASE_QUANTITIES]);

impl Dimension {
    /// Length.
    pub const LENGTH: Self = Self([1, 0, 0, 0, 0, 0, 0, 0, 0]);
    /// Area.
    pub const SURFACE: Self = Self([2, 0, 0, 0, 0, 0, 0, 0, 0]);
    /// Volume.
    pub const VOLUME: Self = Self([3, 0, 0, 0, 0, 0, 0, 0, 0]);
    /// Mass.
    pub const MASS: Self = Self([0, 1, 0, 0, 0, 0, 0, 0, 0]);
    /// Time.
    pub const TIME: Self = Self([0, 0, 1, 0, 0, 0, 0, 0, 0]);
    /// Frequency.
    pub const FREQUENCY: Self = Self([0, 0, -1, 0, 0, 0, 0, 0, 0]);
    /// Electric current.
    pub const CURRENT: Self = Self([0, 0, 0, 1, 0, 0, 0, 0, 0]);
    /// Temperature.
    pub const TEMPERATURE: Self = Self([0, 0, 0, 0, 1, 0, 0, 0, 0]);
    /// Luminous intensity.
    pub const LUMINOUS_INTENSITY: Self = Self([0, 0, 0, 0, 0, 1, 0, 0, 0]);
    /// Amount of substance.
    pub const AMOUNT_OF_SUBSTANCE: Self = Self([0, 0, 0, 0, 0, 0, 1, 0, 0]);
    /// Plane angle.
    pub const ANGLE: Self = Self([0, 0, 0, 0, 0, 0, 0, 1, 0]);
    /// Information.
    pub const BIT: Self = Self([0, 0, 0, 0, 0, 0, 0, 0, 1]);
    /// Force.
    pub const FORCE: Self = Self([1, 1, -2, 0, 0, 0, 0, 0, 0]);
    /// Energy.
    pub const ENERGY: Self = Self([2, 1, -2, 0, 0, 0, 0, 0, 0]);
    /// Power.
    pub const POWER: Self = Self([2, 1, -3, 0, 0, 0, 0, 0, 0]);
}

impl Mul<i32> for Dimension {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self::Output {
        Self(self.0.map(|exp| exp * rhs))
    }
}

/// A decimal prefix such as `k` or `milli`.
#[derive(Debug, PartialEq)]
pub struct Prefix {
    /// The prefix as written in front of a unit name.
    pub name:       &'static str,
    /// The multiplier applied to the unit.
    pub value:      f64,
    /// Whether the prefix takes part in best-prefix selection for display.
    pub scientific: bool,
}

const fn prefix(name: &'static str, value: f64, scientific: bool) -> Prefix {
    Prefix { name,
             value,
             scientific }
}

/// The empty prefix shared by every unit.
pub static NO_PREFIX: Prefix = prefix("", 1.0, true);

static SHORT_PREFIXES: [Prefix; 20] = [prefix("da", 1e1, false),
                                       prefix("h", 1e2, false),
                                       prefix("k", 1e3, true),
                                       prefix("M", 1e6, true),
                                       prefix("G", 1e9, true),
                                       prefix("T", 1e12, true),
                                       prefix("P", 1e15, true),
                                       prefix("E", 1e18, true),
                                       prefix("Z", 1e21, true),
                                       prefix("Y", 1e24, true),
                                       prefix("d", 1e-1, false),
                                       prefix("c", 1e-2, false),
                                       prefix("m", 1e-3, true),
                                       prefix("u", 1e-6, true),
                                       prefix("n", 1e-9, true),
                                       prefix("p", 1e-12, true),
                                       prefix("f", 1e-15, true),
                                       prefix("a", 1e-18, true),
                                       prefix("z", 1e-21, true),
                                       prefix("y", 1e-24, true)];

static LONG_PREFIXES: [Prefix; 20] = [prefix("deca", 1e1, false),
                                      prefix("hecto", 1e2, false),
                                      prefix("kilo", 1e3, true),
                                      prefix("mega", 1e6, true),
                                      prefix("giga", 1e9, true),
                                      prefix("tera", 1e12, true),
                                      prefix("peta", 1e15, true),
                                      prefix("exa", 1e18, true),
                                      prefix("zetta", 1e21, true),
                                      prefix("yotta", 1e24, true),
                                      prefix("deci", 1e-1, false),
                                      prefix("centi", 1e-2, false),
                                      prefix("milli", 1e-3, true),
                                      prefix("micro", 1e-6, true),
                                      prefix("nano", 1e-9, true),
                                      prefix("pico", 1e-12, true),
                                      prefix("femto", 1e-15, true),
                                      prefix("atto", 1e-18, true),
                                      prefix("zepto", 1e-21, true),
                                      prefix("yocto", 1e-24, true)];

/// The prefix family a unit accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefixes {
    /// No prefixes (`inch`, `deg`, ...).
    None,
    /// Symbol prefixes (`km`, `ms`, ...).
    Short,
    /// Word prefixes (`kilometer`, `millisecond`, ...).
    Long,
}

impl Prefixes {
    /// Returns the non-empty prefixes of this family.
    #[must_use]
    pub fn all(self) -> &'static [Prefix] {
        match self {
            Self::None => &[],
            Self::Short => &SHORT_PREFIXES,
            Self::Long => &LONG_PREFIXES,
        }
    }

    /// Looks up a prefix by its written form. The empty string always
    /// resolves to [`NO_PREFIX`].
    #[must_use]
    pub fn find(self, name: &str) -> Option<&'static Prefix> {
        if name.is_empty() {
            return Some(&NO_PREFIX);
        }
        self.all().iter().find(|p| p.name == name)
    }
}

/// A catalog entry.
#[derive(Debug, PartialEq)]
pub struct UnitDef {
    /// The unit name as written in expressions.
    pub name:            &'static str,
    /// The dimension of one unit.
    pub dimension:       Dimension,
    /// Size of one unit expressed in SI base units.
    pub value:           f64,
    /// Accepted prefix family.
    pub prefixes:        Prefixes,
    /// Power the prefix is raised to (`2` for `m2`, `3` for `m3`).
    pub prefix_exponent: i32,
}

const fn unit(name: &'static str,
              dimension: Dimension,
              value: f64,
              prefixes: Prefixes,
              prefix_exponent: i32)
              -> UnitDef {
    UnitDef { name,
              dimension,
              value,
              prefixes,
              prefix_exponent }
}

impl UnitDef {
    /// Returns the factor of `prefix` for this unit, taking squared and cubic
    /// units into account.
    ///
    /// # Example
    /// ```
    /// use unitmath::interpreter::units::find_unit;
    ///
    /// let (unit, prefix) = find_unit("cm2").unwrap();
    /// assert!((unit.prefix_factor(prefix) - 1e-4).abs() < 1e-18);
    /// ```
    #[must_use]
    pub fn prefix_factor(&self, prefix: &Prefix) -> f64 {
        prefix.value.powi(self.prefix_exponent)
    }
}

/// All units known to the interpreter.
pub static UNITS: &[UnitDef] =
    &[// length
      unit("m", Dimension::LENGTH, 1.0, Prefixes::Short, 1),
      unit("meter", Dimension::LENGTH, 1.0, Prefixes::Long, 1),
      unit("inch", Dimension::LENGTH, 0.0254, Prefixes::None, 1),
      unit("ft", Dimension::LENGTH, 0.3048, Prefixes::None, 1),
      unit("foot", Dimension::LENGTH, 0.3048, Prefixes::None, 1),
      unit("yd", Dimension::LENGTH, 0.9144, Prefixes::None, 1),
      unit("yard", Dimension::LENGTH, 0.9144, Prefixes::None, 1),
      unit("mi", Dimension::LENGTH, 1609.344, Prefixes::None, 1),
      unit("mile", Dimension::LENGTH, 1609.344, Prefixes::None, 1),
      unit("mil", Dimension::LENGTH, 0.0000254, Prefixes::None, 1),
      unit("angstrom", Dimension::LENGTH, 1e-10, Prefixes::None, 1),
      // surface
      unit("m2", Dimension::SURFACE, 1.0, Prefixes::Short, 2),
      unit("sqin", Dimension::SURFACE, 6.4516e-4, Prefixes::None, 1),
      unit("sqft", Dimension::SURFACE, 0.092_903_04, Prefixes::None, 1),
      unit("sqyd", Dimension::SURFACE, 0.836_127_36, Prefixes::None, 1),
      unit("sqmi", Dimension::SURFACE, 2_589_988.110_336, Prefixes::None, 1),
      // volume
      unit("m3", Dimension::VOLUME, 1.0, Prefixes::Short, 3),
      unit("L", Dimension::VOLUME, 0.001, Prefixes::Short, 1),
      unit("l", Dimension::VOLUME, 0.001, Prefixes::Short, 1),
      unit("litre", Dimension::VOLUME, 0.001, Prefixes::Long, 1),
      unit("cuin", Dimension::VOLUME, 1.638_706_4e-5, Prefixes::None, 1),
      unit("cuft", Dimension::VOLUME, 0.028_316_846_592, Prefixes::None, 1),
      // angles
      unit("rad", Dimension::ANGLE, 1.0, Prefixes::Short, 1),
      unit("deg", Dimension::ANGLE, std::f64::consts::PI / 180.0, Prefixes::None, 1),
      unit("grad", Dimension::ANGLE, std::f64::consts::PI / 200.0, Prefixes::None, 1),
      unit("cycle", Dimension::ANGLE, std::f64::consts::TAU, Prefixes::None, 1),
      // time
      unit("s", Dimension::TIME, 1.0, Prefixes::Short, 1),
      unit("second", Dimension::TIME, 1.0, Prefixes::Long, 1),
      unit("min", Dimension::TIME, 60.0, Prefixes::None, 1),
      unit("minute", Dimension::TIME, 60.0, Prefixes::None, 1),
      unit("h", Dimension::TIME, 3600.0, Prefixes::None, 1),
      unit("hour", Dimension::TIME, 3600.0, Prefixes::None, 1),
      unit("day", Dimension::TIME, 86400.0, Prefixes::None, 1),
      unit("Hz", Dimension::FREQUENCY, 1.0, Prefixes::Short, 1),
      unit("hertz", Dimension::FREQUENCY, 1.0, Prefixes::Long, 1),
      // mass
      unit("g", Dimension::MASS, 0.001, Prefixes::Short, 1),
      unit("gram", Dimension::MASS, 0.001, Prefixes::Long, 1),
      unit("t", Dimension::MASS, 1000.0, Prefixes::Short, 1),
      unit("lb", Dimension::MASS, 0.453_592_37, Prefixes::None, 1),
      unit("oz", Dimension::MASS, 0.028_349_523_125, Prefixes::None, 1),
      // electric current
      unit("A", Dimension::CURRENT, 1.0, Prefixes::Short, 1),
      unit("ampere", Dimension::CURRENT, 1.0, Prefixes::Long, 1),
      // temperature
      unit("K", Dimension::TEMPERATURE, 1.0, Prefixes::Short, 1),
      unit("kelvin", Dimension::TEMPERATURE, 1.0, Prefixes::Long, 1),
      // amount of substance
      unit("mol", Dimension::AMOUNT_OF_SUBSTANCE, 1.0, Prefixes::Short, 1),
      unit("mole", Dimension::AMOUNT_OF_SUBSTANCE, 1.0, Prefixes::Long, 1),
      // luminous intensity
      unit("cd", Dimension::LUMINOUS_INTENSITY, 1.0, Prefixes::None, 1),
      unit("candela", Dimension::LUMINOUS_INTENSITY, 1.0, Prefixes::None, 1),
      // derived
      unit("N", Dimension::FORCE, 1.0, Prefixes::Short, 1),
      unit("newton", Dimension::FORCE, 1.0, Prefixes::Long, 1),
      unit("J", Dimension::ENERGY, 1.0, Prefixes::Short, 1),
      unit("joule", Dimension::ENERGY, 1.0, Prefixes::Long, 1),
      unit("W", Dimension::POWER, 1.0, Prefixes::Short, 1),
      unit("watt", Dimension::POWER, 1.0, Prefixes::Long, 1),
      // information
      unit("b", Dimension::BIT, 1.0, Prefixes::Short, 1),
      unit("bits", Dimension::BIT, 1.0, Prefixes::Long, 1),
      unit("B", Dimension::BIT, 8.0, Prefixes::Short, 1),
      unit("bytes", Dimension::BIT, 8.0, Prefixes::Long, 1)];

/// Resolves a unit name, with or without prefix.
///
/// An exact unit name wins over a prefixed reading, so `min` is a minute and
/// not a milli-inch.
///
/// # Example
/// ```
/// use unitmath::interpreter::units::find_unit;
///
/// let (unit, prefix) = find_unit("km").unwrap();
/// assert_eq!(unit.name, "m");
/// assert_eq!(prefix.name, "k");
///
/// let (unit, prefix) = find_unit("min").unwrap();
/// assert_eq!(unit.name, "min");
/// assert_eq!(prefix.name, "");
///
/// assert!(find_unit("kinch").is_none());
/// assert!(find_unit("foo").is_none());
/// ```
#[must_use]
pub fn find_unit(name: &str) -> Option<(&'static UnitDef, &'static Prefix)> {
    if let Some(unit) = UNITS.iter().find(|u| u.name == name) {
        return Some((unit, &NO_PREFIX));
    }
    UNITS.iter().find_map(|unit| {
                    let prefix_name = name.strip_suffix(unit.name)?;
                    if prefix_name.is_empty() {
                        return None;
                    }
                    unit.prefixes.find(prefix_name).map(|prefix| (unit, prefix))
                })
}

/// Picks the scientific prefix that displays `magnitude` (already divided by
/// the unit factor) closest to a mantissa of about `10^1.2`.
///
/// Returns `current` when no other prefix does better, when `magnitude` is
/// zero, or for negative powers (`0.5 s^-1` rather than `500 ks^-1`).
#[must_use]
pub fn best_prefix(unit: &'static UnitDef,
                   current: &'static Prefix,
                   magnitude: f64,
                   power: i32)
                   -> &'static Prefix {
    let magnitude = magnitude.abs();
    if magnitude == 0.0 || !magnitude.is_finite() || power < 0 {
        return current;
    }
    let exponent = unit.prefix_exponent * power;
    let score = |prefix: &Prefix| ((magnitude / prefix.value.powi(exponent)).log10() - 1.2).abs();

    let mut best = current;
    let mut best_score = score(current);
    for candidate in std::iter::once(&NO_PREFIX).chain(unit.prefixes.all()) {
        if !candidate.scientific {
            continue;
        }
        let candidate_score = score(candidate);
        if candidate_score < best_score {
            best = candidate;
            best_score = candidate_score;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_names_win_over_prefixed_readings() {
        assert_eq!(find_unit("cd").map(|(u, _)| u.name), Some("cd"));
        assert_eq!(find_unit("mi").map(|(u, _)| u.name), Some("mi"));
        assert_eq!(find_unit("ms").map(|(u, p)| (u.name, p.name)), Some(("s", "m")));
    }

    #[test]
    fn long_prefixes_only_apply_to_long_names() {
        assert_eq!(find_unit("kilometer").map(|(u, p)| (u.name, p.name)),
                   Some(("meter", "kilo")));
        assert!(find_unit("kilom").is_none());
        assert!(find_unit("kmeter").is_none());
    }

    #[test]
    fn centimetres_display_as_millimetres() {
        let (unit, prefix) = find_unit("cm").unwrap();
        assert_eq!(best_prefix(unit, prefix, 0.05, 1).name, "m");
    }

    #[test]
    fn dimension_powers() {
        assert_eq!(Dimension::LENGTH * 2, Dimension::SURFACE);
        assert_eq!(Dimension::LENGTH * 3, Dimension::VOLUME);
        assert_eq!(Dimension::TIME * -1, Dimension::FREQUENCY);
        assert_eq!(Dimension::MASS * 0, Dimension([0; BASE_QUANTITIES]));
    }

    #[test]
    fn negative_powers_keep_their_prefix() {
        let (second, none) = find_unit("s").unwrap();
        assert_eq!(best_prefix(second, none, 0.5, -1).name, "");
        assert_eq!(best_prefix(second, none, 2e-6, -2).name, "");

        let (_, milli) = find_unit("ms").unwrap();
        assert_eq!(best_prefix(second, milli, 0.5, -1).name, "m");
    }
}
