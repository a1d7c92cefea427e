pub mod bit_math;
pub mod log_exp;
pub mod math_helpers;
pub mod power;

pub use log_exp::{exp, ln, pow};
pub use math_helpers::{div_rounding_up, mul_div, mul_div_rounding_up, pow10};
