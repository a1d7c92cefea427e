use crate::error::MathError;
use alloy_primitives::U256;

/// Returns the index (0–255) of the most significant set bit in a `U256`,
/// or `MathError::ZeroValue` if the input is zero.
///
/// The integer power routine walks exponent bits from this index down.
pub fn most_significant_bit(x: U256) -> Result<u8, MathError> {
    if x.is_zero() {
        return Err(MathError::ZeroValue);
    }
    Ok(255 - x.leading_zeros() as u8)
}

/// Returns whether bit `index` of `x` is set.
#[inline(always)]
pub fn bit_is_set(x: U256, index: u8) -> bool {
    x.bit(index as usize)
}
