// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::Signed;
use std::fmt;

/// formats the wrapped value with `Display` when asked for `Debug`
pub(crate) struct DebugAsDisplay<T>(pub T);

impl<T: fmt::Display> fmt::Debug for DebugAsDisplay<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// rounds to the nearest integer, rounding half-way cases away from zero
///
/// This is the rounding rule used for the size-reduction multipliers, so
/// `5/2` rounds to `3` and `-5/2` rounds to `-3` (round-half-to-even would
/// give `2` and `-2`).
///
/// ```
/// # use num_bigint::BigInt;
/// # use num_rational::BigRational;
/// # use olll::util::round_half_away_from_zero;
/// let r = |n: i32, d: i32| BigRational::new(n.into(), d.into());
/// assert_eq!(round_half_away_from_zero(&r(5, 2)), BigInt::from(3));
/// assert_eq!(round_half_away_from_zero(&r(-5, 2)), BigInt::from(-3));
/// assert_eq!(round_half_away_from_zero(&r(7, 5)), BigInt::from(1));
/// ```
pub fn round_half_away_from_zero(value: &BigRational) -> BigInt {
    // floor((2 * |n| + d) / (2 * d)) is |n / d| rounded half up
    let two = BigInt::from(2);
    let magnitude =
        (value.numer().abs() * &two + value.denom()).div_floor(&(value.denom() * &two));
    if value.is_negative() {
        -magnitude
    } else {
        magnitude
    }
}
