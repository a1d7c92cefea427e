use crate::error::{Error, MathError};
use crate::fixed_point::Decimals;
use crate::math::bit_math::{bit_is_set, most_significant_bit};
use crate::math::log_exp::{pow, ONE_36};
use crate::math::math_helpers::{div_rounding_up, mul_div, mul_div_rounding_up};
use crate::WAD;
use alloy_primitives::U256;
use tracing::{debug, trace};

/// Raises an 18‑decimal fixed‑point `base` to a plain integer `exponent`,
/// returning the result at 18 decimals.
///
/// Square‑and‑multiply runs over the exponent bits from the top, with the
/// accumulator held at 36 decimals and every product floored. Each step is
/// monotone in its inputs, so the result never decreases as `base` grows.
/// `0^0` is one.
///
/// Returns `MathError::Overflow` when `base > 1` and the power no longer
/// fits at 36 decimals.
pub fn scaled_pow(base: U256, exponent: U256) -> Result<U256, Error> {
    trace!(%base, %exponent, "scaled_pow");

    if exponent.is_zero() {
        return Ok(WAD);
    }
    if base.is_zero() {
        return Ok(U256::ZERO);
    }
    if base == WAD {
        return Ok(WAD);
    }

    let base_36 = base.checked_mul(WAD).ok_or_else(|| {
        debug!(%base, "scaled_pow base does not fit at 36 decimals");
        MathError::Overflow
    })?;

    let top = most_significant_bit(exponent)?;
    let mut acc = ONE_36;

    for index in (0..=top).rev() {
        acc = mul_div(acc, acc, ONE_36).inspect_err(|_| {
            debug!(%base, %exponent, "scaled_pow overflow while squaring");
        })?;
        if bit_is_set(exponent, index) {
            acc = mul_div(acc, base_36, ONE_36).inspect_err(|_| {
                debug!(%base, %exponent, "scaled_pow overflow while multiplying");
            })?;
        }
        // Nothing below 1e-36 survives further squaring.
        if acc.is_zero() {
            return Ok(U256::ZERO);
        }
    }

    Ok(acc / WAD)
}

/// Relative error bound of the `exp(y * ln(x))` route at 18 decimals,
/// in units of `10^-18` (so `1e-14`). Whole exponents through
/// [`scaled_pow`] stay well inside it.
pub const POW_RELATIVE_ERROR: U256 = U256::from_limbs([10_000, 0, 0, 0]);

// Above this many units at the caller's scale the error margin is never
// smaller than half a unit, so results are plain floors.
const SETTLE_LIMIT: U256 = U256::from_limbs([100_000_000_000_000, 0, 0, 0]);

/// Computes `value * base^exponent` where all three operands and the
/// result are fixed‑point numbers with `decimals` decimals, and
/// `exponent` may be fractional.
///
/// `base` and `exponent` are lifted to 18 decimals and the power is taken
/// there. Whole exponents on bases no greater than one go through
/// [`scaled_pow`]; everything else through `exp(exponent * ln(base))`,
/// which is accurate to [`POW_RELATIVE_ERROR`] plus one unit at 18
/// decimals, in either direction.
///
/// The product with `value` is floored at the caller's scale. When the
/// 18 decimal product falls short of the next multiple of `10^-decimals`
/// by no more than that error margin, it is taken to be that multiple,
/// so exact powers such as `4^0.5` come out exact. This needs the margin
/// to stay under half a unit, which holds for results below roughly
/// `5 * 10^13` units at the caller's scale; larger results, and every
/// result at 18 decimals, are the floor of the approximated product.
///
/// # Errors
///
/// - `InputError::InvalidDecimals` when `decimals > 18`.
/// - `MathError::Overflow` when an operand cannot be lifted to 18
///   decimals, or the power or the product does not fit in 256 bits.
pub fn mul_pow(value: U256, base: U256, exponent: U256, decimals: u8) -> Result<U256, Error> {
    trace!(%value, %base, %exponent, decimals, "mul_pow");

    let decimals = Decimals::new(decimals).inspect_err(|_| {
        debug!(decimals, "mul_pow rejected decimals");
    })?;
    let lift = decimals.wad_factor()?;

    let base_wad = base.checked_mul(lift).ok_or(MathError::Overflow)?;
    let exponent_wad = exponent.checked_mul(lift).ok_or(MathError::Overflow)?;

    let power = wad_power(base_wad, exponent_wad)?;
    settle(value, power, decimals)
}

fn wad_power(base: U256, exponent: U256) -> Result<U256, Error> {
    let (whole, fraction) = exponent.div_rem(WAD);
    if fraction.is_zero() && base <= WAD {
        return scaled_pow(base, whole);
    }
    pow(base, exponent)
}

/// Floors `value * power` (power at 18 decimals) at the scale of `value`,
/// resolving products that sit within the power's error margin below a
/// multiple of `10^-decimals` to that multiple.
fn settle(value: U256, power: U256, decimals: Decimals) -> Result<U256, Error> {
    let floor = mul_div(value, power, WAD)?;
    let lift = decimals.wad_factor()?;
    if lift == U256::ONE || floor >= SETTLE_LIMIT {
        return Ok(floor);
    }

    let factor = decimals.factor()?;
    // Digits of the 18 decimal product below the last place of `value`.
    let below = value.mul_mod(power, WAD) / factor;

    // The 18 decimal product is under (floor + 1) * lift.
    let relative = mul_div_rounding_up(floor + U256::ONE, lift * POW_RELATIVE_ERROR, WAD)?;
    // One unit of power error, scaled by value in whole units, on each
    // side of the comparison.
    let absolute = div_rounding_up(value, factor)?.saturating_mul(U256::from(2u8));
    let margin = relative.saturating_add(absolute).saturating_add(U256::from(2u8));

    if margin.saturating_mul(U256::from(2u8)) < lift && lift - below <= margin {
        trace!(%floor, %below, %margin, "mul_pow settled on the next unit");
        return Ok(floor + U256::ONE);
    }
    Ok(floor)
}
