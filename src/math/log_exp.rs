//! Natural exponential and logarithm for 18 decimal fixed point numbers.
//!
//! Arbitrary real powers are computed as `x^y = exp(y * ln(x))`. Both
//! halves decompose their argument over the powers of two `2^7 .. 2^-4`
//! whose exponentials are precomputed, and finish with a short series on
//! the remainder. Intermediate values carry 20 decimals, and 36 decimals
//! for logarithms of arguments close to one.
//!
//! Every intermediate step truncates, but truncating a negative
//! logarithm raises the final result, so [`pow`] is not a floor: it lands
//! within [`POW_RELATIVE_ERROR`](crate::math::power::POW_RELATIVE_ERROR)
//! plus one unit of the exact power, on either side.
//!
//! Signs are carried next to unsigned magnitudes, so no intermediate
//! relies on two's complement arithmetic.

use crate::error::{Error, InputError, MathError};
use alloy_primitives::{Sign, I256, U256};
use tracing::{debug, trace};

/// Builds a `U256` from a `u128` in const context.
const fn u256(x: u128) -> U256 {
    U256::from_limbs([x as u64, (x >> 64) as u64, 0, 0])
}

const ONE_18: U256 = crate::WAD;
const ONE_20: U256 = u256(100_000_000_000_000_000_000);
pub(crate) const ONE_36: U256 = u256(1_000_000_000_000_000_000_000_000_000_000_000_000);
const HUNDRED: U256 = u256(100);

/// Largest argument accepted by [`exp`]: `ln((2^255 - 1) / 10^20)` is
/// about 130.7.
pub const MAX_NATURAL_EXPONENT: U256 = u256(130_000_000_000_000_000_000);

/// Magnitude of the most negative argument [`exp`] resolves; below it the
/// result is smaller than `10^-18` and floors to zero.
pub const MIN_NATURAL_EXPONENT_ABS: U256 = u256(41_000_000_000_000_000_000);

// ln_36 is used strictly between 0.9 and 1.1.
const LN_36_LOWER_BOUND: U256 = u256(900_000_000_000_000_000);
const LN_36_UPPER_BOUND: U256 = u256(1_100_000_000_000_000_000);

// x_n = 2^(7 - n) at 18 decimals, a_n = e^(x_n) with no decimals.
const X0: U256 = u256(128_000_000_000_000_000_000);
const A0: U256 = U256::from_limbs([0x0262827000000000, 0xf53a27172fa9ec63, 0x0195e54c5dd42177, 0]);
const X1: U256 = u256(64_000_000_000_000_000_000);
const A1: U256 = u256(6_235_149_080_811_616_882_910_000_000);

// x_n at 20 decimals, a_n = e^(x_n) at 20 decimals.
const X2: U256 = u256(3_200_000_000_000_000_000_000);
const A2: U256 = u256(7_896_296_018_268_069_516_100_000_000_000_000);
const X3: U256 = u256(1_600_000_000_000_000_000_000);
const A3: U256 = u256(888_611_052_050_787_263_676_000_000);
const X4: U256 = u256(800_000_000_000_000_000_000);
const A4: U256 = u256(298_095_798_704_172_827_474_000);
const X5: U256 = u256(400_000_000_000_000_000_000);
const A5: U256 = u256(5_459_815_003_314_423_907_810);
const X6: U256 = u256(200_000_000_000_000_000_000);
const A6: U256 = u256(738_905_609_893_065_022_723);
const X7: U256 = u256(100_000_000_000_000_000_000);
const A7: U256 = u256(271_828_182_845_904_523_536);
const X8: U256 = u256(50_000_000_000_000_000_000);
const A8: U256 = u256(164_872_127_070_012_814_685);
const X9: U256 = u256(25_000_000_000_000_000_000);
const A9: U256 = u256(128_402_541_668_774_148_407);
const X10: U256 = u256(12_500_000_000_000_000_000);
const A10: U256 = u256(113_314_845_306_682_631_683);
const X11: U256 = u256(6_250_000_000_000_000_000);
const A11: U256 = u256(106_449_445_891_785_942_956);

/// `e^x` for a signed 18 decimal fixed point `x`.
///
/// Arguments above [`MAX_NATURAL_EXPONENT`] fail with
/// [`MathError::Overflow`]; arguments below `-41` return zero.
pub fn exp(x: I256) -> Result<U256, Error> {
    let (sign, magnitude) = x.into_sign_and_abs();
    trace!(%x, "exp");
    exp_signed(sign, magnitude)
}

/// `ln(a)` for an unsigned 18 decimal fixed point `a`.
///
/// # Errors
///
/// - [`InputError::LogOfZero`] for `a == 0`.
/// - [`MathError::Overflow`] for `a >= 2^255`.
pub fn ln(a: U256) -> Result<I256, Error> {
    trace!(%a, "ln");
    if a.is_zero() {
        debug!("rejecting logarithm of zero");
        return Err(InputError::LogOfZero.into());
    }
    if a.bit(255) {
        debug!(%a, "logarithm argument outside the signed range");
        return Err(MathError::Overflow.into());
    }

    let (sign, magnitude) = if LN_36_LOWER_BOUND < a && a < LN_36_UPPER_BOUND {
        let (sign, ln_36_a) = ln_36(a);
        (sign, ln_36_a / ONE_18)
    } else {
        ln_internal(a)
    };

    I256::checked_from_sign_and_abs(sign, magnitude)
        .ok_or_else(|| MathError::Overflow.into())
}

/// `x^y` where both `x` and `y` are unsigned 18 decimal fixed point
/// numbers.
///
/// `0^0` is defined as one.
pub fn pow(x: U256, y: U256) -> Result<U256, Error> {
    trace!(%x, %y, "pow");
    if y.is_zero() {
        return Ok(ONE_18);
    }
    if x.is_zero() {
        return Ok(U256::ZERO);
    }
    if x.bit(255) {
        debug!(%x, "pow base outside the signed range");
        return Err(MathError::Overflow.into());
    }

    // Keeps y * ln(x) inside 255 bits.
    let mild_exponent_bound = (U256::ONE << 254) / ONE_20;
    if y >= mild_exponent_bound {
        debug!(%y, "pow exponent too large");
        return Err(MathError::Overflow.into());
    }

    let (sign, log_x_times_y) = if LN_36_LOWER_BOUND < x && x < LN_36_UPPER_BOUND {
        let (sign, ln_36_x) = ln_36(x);
        // Two 18 decimal products, so the 36 decimal log never has to be
        // multiplied by y in one piece.
        let high = ln_36_x / ONE_18;
        let low = ln_36_x % ONE_18;
        (sign, high * y + low * y / ONE_18)
    } else {
        let (sign, ln_x) = ln_internal(x);
        (sign, ln_x * y)
    };

    exp_signed(sign, log_x_times_y / ONE_18)
}

fn exp_signed(sign: Sign, x: U256) -> Result<U256, Error> {
    match sign {
        Sign::Positive => {
            if x > MAX_NATURAL_EXPONENT {
                debug!(%x, "exp argument above the natural exponent bound");
                return Err(MathError::Overflow.into());
            }
            Ok(exp_positive(x))
        }
        Sign::Negative => {
            if x > MIN_NATURAL_EXPONENT_ABS {
                debug!(%x, "exp of negative argument flushed to zero");
                return Ok(U256::ZERO);
            }
            // e^(-x) = 1 / e^x
            Ok(ONE_36 / exp_positive(x))
        }
    }
}

/// `e^x` for `0 <= x <= MAX_NATURAL_EXPONENT`.
fn exp_positive(mut x: U256) -> U256 {
    // e^x0 and e^x1 are too large for 18 decimals and are stored as plain
    // integers. x0 + x1 exceeds the bound, so at most one applies.
    let first_an = if x >= X0 {
        x -= X0;
        A0
    } else if x >= X1 {
        x -= X1;
        A1
    } else {
        U256::ONE
    };

    x *= HUNDRED;
    let mut product = ONE_20;

    macro_rules! exp_step {
        ($x_n:expr, $a_n:expr) => {
            if x >= $x_n {
                x -= $x_n;
                product = product * $a_n / ONE_20;
            }
        };
    }

    exp_step!(X2, A2);
    exp_step!(X3, A3);
    exp_step!(X4, A4);
    exp_step!(X5, A5);
    exp_step!(X6, A6);
    exp_step!(X7, A7);
    exp_step!(X8, A8);
    exp_step!(X9, A9);

    // Taylor series on the remainder, x < 0.25.
    let mut series_sum = ONE_20;
    let mut term = x;
    series_sum += term;
    for n in 2u64..=12 {
        term = term * x / ONE_20 / U256::from(n);
        series_sum += term;
    }

    product * series_sum / ONE_20 * first_an / HUNDRED
}

/// 18 decimal natural log for arguments outside the `ln_36` window.
fn ln_internal(mut a: U256) -> (Sign, U256) {
    if a < ONE_18 {
        // ln(a) = -ln(1/a)
        let (_, magnitude) = ln_internal(ONE_36 / a);
        return (Sign::Negative, magnitude);
    }

    let mut sum = U256::ZERO;
    if a >= A0 * ONE_18 {
        a /= A0;
        sum += X0;
    }
    if a >= A1 * ONE_18 {
        a /= A1;
        sum += X1;
    }

    sum *= HUNDRED;
    a *= HUNDRED;

    macro_rules! ln_step {
        ($x_n:expr, $a_n:expr) => {
            if a >= $a_n {
                a = a * ONE_20 / $a_n;
                sum += $x_n;
            }
        };
    }

    ln_step!(X2, A2);
    ln_step!(X3, A3);
    ln_step!(X4, A4);
    ln_step!(X5, A5);
    ln_step!(X6, A6);
    ln_step!(X7, A7);
    ln_step!(X8, A8);
    ln_step!(X9, A9);
    ln_step!(X10, A10);
    ln_step!(X11, A11);

    // a < a11 (about 1.06): ln(a) = 2 * atanh(z), z = (a - 1) / (a + 1)
    let z = (a - ONE_20) * ONE_20 / (a + ONE_20);
    let z_squared = z * z / ONE_20;

    let mut num = z;
    let mut series_sum = num;
    for k in [3u64, 5, 7, 9, 11] {
        num = num * z_squared / ONE_20;
        series_sum += num / U256::from(k);
    }

    (Sign::Positive, (sum + series_sum * U256::from(2u8)) / HUNDRED)
}

/// 36 decimal natural log for `0.9 < x < 1.1` (18 decimal input).
fn ln_36(x: U256) -> (Sign, U256) {
    let x = x * ONE_18;
    let (sign, distance) = if x < ONE_36 {
        (Sign::Negative, ONE_36 - x)
    } else {
        (Sign::Positive, x - ONE_36)
    };

    // |z| = |x - 1| / (x + 1); every odd power keeps the sign of z.
    let z = distance * ONE_36 / (x + ONE_36);
    let z_squared = z * z / ONE_36;

    let mut num = z;
    let mut series_sum = num;
    for k in [3u64, 5, 7, 9, 11, 13, 15] {
        num = num * z_squared / ONE_36;
        series_sum += num / U256::from(k);
    }

    (sign, series_sum * U256::from(2u8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn wad(x: u128) -> U256 {
        U256::from(x) * ONE_18
    }

    fn signed(x: i128) -> I256 {
        I256::try_from(x).unwrap()
    }

    fn assert_close(actual: U256, expected: U256, max_diff: u64) {
        let diff = if actual > expected {
            actual - expected
        } else {
            expected - actual
        };
        assert!(
            diff <= U256::from(max_diff),
            "{actual} differs from {expected} by {diff}"
        );
    }

    #[test]
    fn exp_of_zero_is_one() {
        assert_eq!(exp(I256::ZERO).unwrap(), ONE_18);
    }

    #[test]
    fn exp_of_one_is_e() {
        let result = exp(signed(1_000_000_000_000_000_000)).unwrap();
        assert_close(result, U256::from(2_718_281_828_459_045_235u64), 2);
    }

    #[test]
    fn exp_of_minus_one() {
        let result = exp(signed(-1_000_000_000_000_000_000)).unwrap();
        assert_close(result, U256::from(367_879_441_171_442_321u64), 2);
    }

    #[test]
    fn exp_near_bounds() {
        assert!(exp(signed(129_000_000_000_000_000_000)).is_ok());
        let tiny = exp(signed(-40_000_000_000_000_000_000)).unwrap();
        // e^-40 ~ 4.25e-18
        assert_eq!(tiny, U256::from(4u8));
    }

    #[test]
    fn exp_above_bound_overflows() {
        let result = exp(signed(131_000_000_000_000_000_000));
        assert!(matches!(result, Err(Error::MathError(MathError::Overflow))));
    }

    #[test]
    fn exp_below_bound_flushes_to_zero() {
        let result = exp(signed(-42_000_000_000_000_000_000)).unwrap();
        assert_eq!(result, U256::ZERO);
    }

    #[test]
    fn ln_of_one_is_zero() {
        assert_eq!(ln(ONE_18).unwrap(), I256::ZERO);
    }

    #[test]
    fn ln_of_hundred() {
        let result = ln(wad(100)).unwrap();
        let (sign, magnitude) = result.into_sign_and_abs();
        assert_eq!(sign, Sign::Positive);
        assert_close(magnitude, U256::from(4_605_170_185_988_091_368u64), 2);
    }

    #[test]
    fn ln_near_one_uses_high_precision() {
        // ln(0.95) = -0.051293294387550533...
        let result = ln(U256::from(950_000_000_000_000_000u64)).unwrap();
        let (sign, magnitude) = result.into_sign_and_abs();
        assert_eq!(sign, Sign::Negative);
        assert_eq!(magnitude, U256::from(51_293_294_387_550_533u64));
    }

    #[test]
    fn ln_of_half_is_negative() {
        let result = ln(U256::from(500_000_000_000_000_000u64)).unwrap();
        let (sign, magnitude) = result.into_sign_and_abs();
        assert_eq!(sign, Sign::Negative);
        assert_close(magnitude, U256::from(693_147_180_559_945_309u64), 2);
    }

    #[test]
    fn ln_of_large_argument() {
        // ln(1e50) = 115.129254649702284200...
        let a = U256::from_str("100000000000000000000000000000000000000000000000000000000000000000000")
            .unwrap();
        let (sign, magnitude) = ln(a).unwrap().into_sign_and_abs();
        assert_eq!(sign, Sign::Positive);
        assert_close(magnitude, U256::from(115_129_254_649_702_284_200u128), 10);
    }

    #[test]
    fn ln_of_zero_is_rejected() {
        let result = ln(U256::ZERO);
        assert!(matches!(
            result,
            Err(Error::InputError(InputError::LogOfZero))
        ));
    }

    #[test]
    fn ln_outside_signed_range_is_rejected() {
        let result = ln(U256::MAX);
        assert!(matches!(result, Err(Error::MathError(MathError::Overflow))));
    }

    #[test]
    fn exp_inverts_ln() {
        for x in [
            U256::from(3u8),
            U256::from(123_456_789_000u64),
            U256::from(950_000_000_000_000_000u64),
            wad(7),
            wad(50_000),
        ] {
            let round_trip = exp(ln(x).unwrap()).unwrap();
            let tolerance = x / U256::from(1_000_000_000_000u64) + U256::from(2u8);
            let diff = if round_trip > x {
                round_trip - x
            } else {
                x - round_trip
            };
            assert!(diff <= tolerance, "exp(ln({x})) = {round_trip}");
        }
    }

    #[test]
    fn pow_edge_cases() {
        assert_eq!(pow(U256::ZERO, U256::ZERO).unwrap(), ONE_18);
        assert_eq!(pow(wad(5), U256::ZERO).unwrap(), ONE_18);
        assert_eq!(pow(U256::ZERO, wad(3)).unwrap(), U256::ZERO);
        assert_eq!(pow(ONE_18, wad(3)).unwrap(), ONE_18);
    }

    #[test]
    fn pow_integer_and_fractional() {
        assert_close(pow(wad(2), wad(2)).unwrap(), wad(4), 10);
        assert_close(
            pow(wad(4), U256::from(500_000_000_000_000_000u64)).unwrap(),
            wad(2),
            10,
        );
        // 0.5^3
        assert_close(
            pow(U256::from(500_000_000_000_000_000u64), wad(3)).unwrap(),
            U256::from(125_000_000_000_000_000u64),
            10,
        );
    }

    #[test]
    fn pow_near_one() {
        // 0.95^7 = 0.698337296093750000
        let result = pow(U256::from(950_000_000_000_000_000u64), wad(7)).unwrap();
        assert_close(result, U256::from(698_337_296_093_750_000u64), 10);
    }

    #[test]
    fn pow_result_too_large_overflows() {
        // 10^60 > e^130
        let result = pow(wad(10), wad(60));
        assert!(matches!(result, Err(Error::MathError(MathError::Overflow))));
    }

    #[test]
    fn pow_result_too_small_floors_to_zero() {
        // 0.001^10 = 1e-30
        let result = pow(U256::from(1_000_000_000_000_000u64), wad(10)).unwrap();
        assert_eq!(result, U256::ZERO);
    }

    #[test]
    fn pow_rejects_huge_exponent() {
        let result = pow(wad(2), U256::ONE << 250);
        assert!(matches!(result, Err(Error::MathError(MathError::Overflow))));
    }
}
