//! GCD reduction of integer pairs to lowest terms.
//!
//! Every multiplication and division performed by the triad functions is
//! followed by [`normalize`], so intermediate values never carry a common
//! factor and equality between rationals is plain structural equality.
//!
//! # Example
//!
//! ```
//! use num_bigint::BigInt;
//! use triadic_framework::rational::normalize;
//!
//! let (n, d) = normalize(BigInt::from(6), BigInt::from(-8)).unwrap();
//! assert_eq!((n, d), (BigInt::from(-3), BigInt::from(4)));
//! ```

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::error::{Result, TriadError};

/// Reduces `n / d` to lowest terms with a positive denominator.
///
/// The result `(n', d')` satisfies `n'/d' = n/d`, `d' > 0` and
/// `gcd(|n'|, d') = 1`. Zero normalizes to `0/1`.
///
/// # Errors
///
/// Returns [`TriadError::DivisionByZero`] when `d` is zero.
pub fn normalize(n: BigInt, d: BigInt) -> Result<(BigInt, BigInt)> {
    if d.is_zero() {
        return Err(TriadError::DivisionByZero { numerator: n });
    }
    Ok(reduce(n, d))
}

/// Lowest-terms reduction for a denominator already known to be non-zero.
pub(crate) fn reduce(n: BigInt, d: BigInt) -> (BigInt, BigInt) {
    debug_assert!(!d.is_zero());
    if n.is_zero() {
        return (BigInt::zero(), BigInt::one());
    }

    let g = n.gcd(&d);
    let (mut n, mut d) = (n / &g, d / &g);
    if d.is_negative() {
        n = -n;
        d = -d;
    }
    (n, d)
}

/// Greatest common divisor, always non-negative. `gcd(0, 0) = 0`.
#[inline]
#[must_use]
pub fn gcd(x: &BigInt, y: &BigInt) -> BigInt {
    x.gcd(y)
}

/// Least common multiple, always non-negative. `lcm(x, 0) = 0`.
#[inline]
#[must_use]
pub fn lcm(x: &BigInt, y: &BigInt) -> BigInt {
    x.lcm(y)
}

/// Whether `(n, d)` already satisfies the lowest-terms invariant.
#[must_use]
pub fn is_reduced(n: &BigInt, d: &BigInt) -> bool {
    d.is_positive() && gcd(n, d).is_one()
}
