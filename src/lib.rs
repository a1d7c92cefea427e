//! Fixed‑point power, logarithm and exponential math over 256‑bit
//! integers, with the rounding behaviour of EVM contract math.
//!
//! This crate exposes:
//! - `scaled_pow`: integer powers of an 18‑decimal base, by repeated squaring.
//! - `mul_pow`: `value * base^exponent` for real exponents at any scale
//!   from 0 to 18 decimals.
//! - Low‑level primitives (`math::*`): `ln`, `exp`, `pow`, full‑precision
//!   `mul_div` and bit helpers.
//! - [`FixedPoint`], a value paired with its [`Decimals`] scale, for parsing,
//!   rescaling and decoding.
//!
//! Integer arithmetic rounds down. Real powers carry a bounded error
//! (`math::power::POW_RELATIVE_ERROR`), and `mul_pow` resolves products
//! within that bound of an exact result to the exact result. Out‑of‑range
//! inputs are reported as errors instead of wrapping.
//!
//! # Examples
//!
//! ## Integer power
//! ```
//! use fixed_pow_math::{scaled_pow, U256, WAD};
//!
//! // 0.5^3 = 0.125
//! let half = WAD / U256::from(2u8);
//! let result = scaled_pow(half, U256::from(3u8)).unwrap();
//! assert_eq!(result, U256::from(125_000_000_000_000_000u64));
//! ```
//!
//! ## Real power at a token's own scale
//! ```
//! use fixed_pow_math::{mul_pow, FixedPoint, Decimals};
//!
//! let decimals = Decimals::new(6).unwrap();
//! let value = FixedPoint::parse("180", decimals).unwrap();
//! let base = FixedPoint::parse("8.5", decimals).unwrap();
//! let exponent = FixedPoint::parse("0.6", decimals).unwrap();
//!
//! // 180 * 8.5^0.6 = 650.015721154...
//! let result = mul_pow(value.value(), base.value(), exponent.value(), 6).unwrap();
//! assert_eq!(result, fixed_pow_math::U256::from(650_015_721u64));
//! ```

pub use alloy_primitives::{Sign, I256, U256};

pub mod error;
pub mod fixed_point;
pub mod math;

pub use error::{Error, InputError, MathError};
pub use fixed_point::{Decimals, FixedPoint, Rounding};
pub use math::power::{mul_pow, scaled_pow};

/// Number of decimals of the "scaled" representation.
pub const WAD_DECIMALS: u8 = 18;

/// `10^18`, fixed‑point one at 18 decimals.
pub const WAD: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);
