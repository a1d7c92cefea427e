//! Decimal fixed‑point values: a 256‑bit integer paired with its scale.

use crate::error::{Error, InputError, MathError};
use crate::math::math_helpers::pow10;
use crate::math::power;
use crate::WAD_DECIMALS;
use alloy_primitives::U256;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of fractional decimal digits of a fixed‑point value.
///
/// Valid range is `0..=18`; anything larger is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Decimals(u8);

impl Decimals {
    /// The 18 decimal "scaled" representation.
    pub const WAD: Self = Self(WAD_DECIMALS);

    pub fn new(value: u8) -> Result<Self, InputError> {
        if value > WAD_DECIMALS {
            return Err(InputError::InvalidDecimals(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// `10^decimals`.
    pub fn factor(self) -> Result<U256, MathError> {
        pow10(self.0 as u32)
    }

    /// `10^(18 - decimals)`, the multiplier that lifts a value at this
    /// scale to 18 decimals.
    pub fn wad_factor(self) -> Result<U256, MathError> {
        pow10((WAD_DECIMALS - self.0) as u32)
    }
}

impl Default for Decimals {
    fn default() -> Self {
        Self::WAD
    }
}

impl TryFrom<u8> for Decimals {
    type Error = InputError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Decimals> for u8 {
    fn from(decimals: Decimals) -> Self {
        decimals.0
    }
}

impl fmt::Display for Decimals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Direction used when a conversion drops digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rounding {
    /// Towards zero (floor).
    #[default]
    Down,
    /// Towards positive infinity (ceiling).
    Up,
}

/// A non‑negative decimal number stored as `value / 10^decimals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FixedPoint {
    value: U256,
    decimals: Decimals,
}

impl FixedPoint {
    pub const fn new(value: U256, decimals: Decimals) -> Self {
        Self { value, decimals }
    }

    /// A raw value at 18 decimals.
    pub const fn wad(value: U256) -> Self {
        Self::new(value, Decimals::WAD)
    }

    /// The fixed‑point representation of the whole number `n`.
    pub fn scale(n: U256, decimals: Decimals) -> Result<Self, Error> {
        let value = n
            .checked_mul(decimals.factor()?)
            .ok_or(MathError::Overflow)?;
        Ok(Self::new(value, decimals))
    }

    /// Parses a plain decimal string such as `"8.5"` or `"50000"` at the
    /// given scale.
    ///
    /// Trailing fractional digits beyond `decimals` are accepted only when
    /// they are zeros; anything else fails with `MathError::PrecisionLoss`.
    pub fn parse(s: &str, decimals: Decimals) -> Result<Self, Error> {
        let s = s.trim();
        if s.starts_with('-') {
            return Err(InputError::Negative.into());
        }

        let invalid = || InputError::InvalidNumber(s.to_owned());
        let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty())
            || !all_digits(int_part)
            || !all_digits(frac_part)
        {
            return Err(invalid().into());
        }

        let places = decimals.get() as usize;
        let (kept, dropped) = frac_part.split_at(frac_part.len().min(places));
        if dropped.bytes().any(|b| b != b'0') {
            return Err(MathError::PrecisionLoss.into());
        }

        let mut digits = String::with_capacity(int_part.len() + places);
        digits.push_str(int_part);
        digits.push_str(kept);
        digits.extend(std::iter::repeat('0').take(places - kept.len()));

        let digits = digits.trim_start_matches('0');
        let value = if digits.is_empty() {
            U256::ZERO
        } else {
            U256::from_str_radix(digits, 10).map_err(|_| MathError::Overflow)?
        };
        Ok(Self::new(value, decimals))
    }

    #[inline]
    pub const fn value(&self) -> U256 {
        self.value
    }

    #[inline]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Converts to another scale, rounding as requested when digits are
    /// dropped.
    pub fn rescale(self, to: Decimals, rounding: Rounding) -> Result<Self, Error> {
        let from = self.decimals.get();
        let to_places = to.get();

        let value = if to_places >= from {
            let factor = pow10((to_places - from) as u32)?;
            self.value.checked_mul(factor).ok_or(MathError::Overflow)?
        } else {
            let factor = pow10((from - to_places) as u32)?;
            let (quotient, remainder) = self.value.div_rem(factor);
            match rounding {
                Rounding::Down => quotient,
                Rounding::Up if remainder.is_zero() => quotient,
                Rounding::Up => quotient + U256::ONE,
            }
        };
        Ok(Self::new(value, to))
    }

    /// Like [`rescale`](Self::rescale), but fails with
    /// `MathError::PrecisionLoss` instead of rounding.
    pub fn rescale_exact(self, to: Decimals) -> Result<Self, Error> {
        let down = self.rescale(to, Rounding::Down)?;
        let up = self.rescale(to, Rounding::Up)?;
        if down != up {
            return Err(MathError::PrecisionLoss.into());
        }
        Ok(down)
    }

    /// Decodes to the nearest `f64`. Meant for comparisons and display,
    /// never for feeding results back into the integer routines.
    pub fn to_f64_lossy(&self) -> f64 {
        let raw: f64 = self.value.to_string().parse().unwrap_or(f64::INFINITY);
        raw / 10f64.powi(self.decimals.get() as i32)
    }

    /// `self^exponent` for a plain integer exponent, at this value's scale.
    ///
    /// The power is taken at 18 decimals and floored back.
    pub fn scaled_pow(self, exponent: U256) -> Result<Self, Error> {
        let base = self.rescale(Decimals::WAD, Rounding::Down)?;
        let result = Self::wad(power::scaled_pow(base.value, exponent)?);
        result.rescale(self.decimals, Rounding::Down)
    }

    /// `self * base^exponent`; all three must share one scale.
    pub fn mul_pow(self, base: Self, exponent: Self) -> Result<Self, Error> {
        for operand in [base, exponent] {
            if operand.decimals != self.decimals {
                return Err(InputError::ScaleMismatch {
                    expected: self.decimals.get(),
                    found: operand.decimals.get(),
                }
                .into());
            }
        }
        let value = power::mul_pow(self.value, base.value, exponent.value, self.decimals.get())?;
        Ok(Self::new(value, self.decimals))
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let places = self.decimals.get() as usize;
        let digits = self.value.to_string();
        if places == 0 {
            return f.write_str(&digits);
        }
        if digits.len() <= places {
            return write!(f, "0.{digits:0>places$}");
        }
        let (int_part, frac_part) = digits.split_at(digits.len() - places);
        write!(f, "{int_part}.{frac_part}")
    }
}
