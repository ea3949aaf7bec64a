use std::{fmt::Display, ops};

use crate::util::num::format_number;

/// `0` as a complex number.
pub const ZERO: ComplexNumber = ComplexNumber::new(0.0, 0.0);
/// `1` as a complex number.
pub const ONE: ComplexNumber = ComplexNumber::new(1.0, 0.0);
/// The imaginary unit `i`.
pub const I: ComplexNumber = ComplexNumber::new(0.0, 1.0);

/// Represents a complex number with real and imaginary parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexNumber {
    /// The real part of the number.
    pub real:      f64,
    /// The imaginary part of the number.
    pub imaginary: f64,
}

impl Display for ComplexNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let imaginary = match self.imaginary.abs() {
            1.0 => String::new(),
            magnitude => format_number(magnitude),
        };
        match (self.real, self.imaginary) {
            (real, 0.0) => write!(f, "{}", format_number(real)),
            (0.0, im) if im < 0.0 => write!(f, "-{imaginary}i"),
            (0.0, _) => write!(f, "{imaginary}i"),
            (real, im) if im < 0.0 => write!(f, "{} - {imaginary}i", format_number(real)),
            (real, _) => write!(f, "{} + {imaginary}i", format_number(real)),
        }
    }
}

impl ComplexNumber {
    /// Constructs a new complex number from real and imaginary components.
    ///
    /// # Example
    /// ```
    /// use unitmath::interpreter::value::complex::ComplexNumber;
    /// let c = ComplexNumber::new(5.0, -1.0);
    /// assert_eq!(c.real, 5.0);
    /// assert_eq!(c.imaginary, -1.0);
    /// assert_eq!(c.to_string(), "5 - i");
    /// ```
    #[must_use]
    pub const fn new(real: f64, imaginary: f64) -> Self {
        Self { real, imaginary }
    }

    /// Returns the absolute value (magnitude) of the complex number.
    #[must_use]
    pub fn abs(&self) -> f64 {
        self.real.hypot(self.imaginary)
    }
    /// Returns the complex conjugate of the number.
    #[must_use]
    pub const fn conj(&self) -> Self {
        Self { real:      self.real,
               imaginary: -self.imaginary, }
    }
    /// Returns the argument (phase angle) in radians.
    ///
    /// # Example
    /// ```
    /// use unitmath::interpreter::value::complex::I;
    /// assert!((I.arg() - std::f64::consts::FRAC_PI_2).abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn arg(self) -> f64 {
        self.imaginary.atan2(self.real)
    }
    /// Raises the complex number to an integer power by repeated squaring.
    ///
    /// # Example
    /// ```
    /// use unitmath::interpreter::value::complex::{ComplexNumber, I, ONE};
    /// assert_eq!(I.powi(0), ONE);
    /// assert_eq!(I.powi(2), ComplexNumber::new(-1.0, 0.0));
    /// ```
    #[must_use]
    pub fn powi(self, exp: i32) -> Self {
        let mut base = self;
        let mut result = ONE;
        let mut n = exp.unsigned_abs();

        while n > 0 {
            if n % 2 == 1 {
                result *= base;
            }
            base *= base;
            n /= 2;
        }

        if exp < 0 { ONE / result } else { result }
    }
    /// Raises the complex number to a complex power using the principal
    /// branch of the logarithm.
    ///
    /// # Example
    /// ```
    /// use unitmath::interpreter::value::complex::{ComplexNumber, I};
    /// let res = I.pow(ComplexNumber::new(2.0, 0.0));
    /// assert!((res.real + 1.0).abs() < 1e-10);
    /// assert!(res.imaginary.abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn pow(self, exp: Self) -> Self {
        if exp.imaginary == 0.0 && exp.real.fract() == 0.0 && exp.real.abs() <= f64::from(i32::MAX)
        {
            #[allow(clippy::cast_possible_truncation)]
            return self.powi(exp.real as i32);
        }
        if self == ZERO {
            return ZERO;
        }
        (exp * self.ln()).exp()
    }
    /// Returns the principal square root of the complex number.
    ///
    /// # Example
    /// ```
    /// use unitmath::interpreter::value::complex::ComplexNumber;
    /// let s = ComplexNumber::new(-4.0, 0.0).sqrt();
    /// assert!(s.real.abs() < 1e-10);
    /// assert!((s.imaginary - 2.0).abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn sqrt(self) -> Self {
        let a = self.real;
        let b = self.imaginary;
        let r = a.hypot(b);

        let real = f64::midpoint(r, a).sqrt();
        let imaginary = ((r - a) / 2.0).sqrt().copysign(b);

        Self { real, imaginary }
    }
    /// Returns the sine of the complex number.
    #[must_use]
    pub fn sin(self) -> Self {
        Self { real:      self.real.sin() * self.imaginary.cosh(),
               imaginary: self.real.cos() * self.imaginary.sinh(), }
    }
    /// Returns the cosine of the complex number.
    #[must_use]
    pub fn cos(self) -> Self {
        Self { real:      self.real.cos() * self.imaginary.cosh(),
               imaginary: -self.real.sin() * self.imaginary.sinh(), }
    }
    /// Returns the tangent of the complex number.
    #[must_use]
    pub fn tan(self) -> Self {
        self.sin() / self.cos()
    }
    /// Returns the exponential of the complex number.
    ///
    /// # Example
    /// ```
    /// use unitmath::interpreter::value::complex::{ComplexNumber, I};
    /// let z = (I * ComplexNumber::new(std::f64::consts::PI, 0.0)).exp();
    /// assert!((z.real + 1.0).abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn exp(self) -> Self {
        let exp_r = self.real.exp();
        Self { real:      exp_r * self.imaginary.cos(),
               imaginary: exp_r * self.imaginary.sin(), }
    }
    /// Returns the natural logarithm (ln) of the complex number.
    #[must_use]
    pub fn ln(self) -> Self {
        Self { real:      self.abs().ln(),
               imaginary: self.arg(), }
    }
}

impl ops::Neg for ComplexNumber {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self { real:      -self.real,
               imaginary: -self.imaginary, }
    }
}

impl ops::Add for ComplexNumber {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self { real:      self.real + rhs.real,
               imaginary: self.imaginary + rhs.imaginary, }
    }
}

impl ops::Sub for ComplexNumber {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self { real:      self.real - rhs.real,
               imaginary: self.imaginary - rhs.imaginary, }
    }
}

impl ops::Mul for ComplexNumber {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self { real:      self.real
                              .mul_add(rhs.real, -(self.imaginary * rhs.imaginary)),
               imaginary: self.real.mul_add(rhs.imaginary, self.imaginary * rhs.real), }
    }
}

impl ops::MulAssign for ComplexNumber {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl ops::Div for ComplexNumber {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        let denom = rhs.real.mul_add(rhs.real, rhs.imaginary * rhs.imaginary);
        Self { real:      self.real.mul_add(rhs.real, self.imaginary * rhs.imaginary) / denom,
               imaginary: self.imaginary
                              .mul_add(rhs.real, -(self.real * rhs.imaginary))
                          / denom, }
    }
}

impl<T> From<T> for ComplexNumber where T: Into<f64>
{
    fn from(value: T) -> Self {
        Self { real:      value.into(),
               imaginary: 0.0, }
    }
}
