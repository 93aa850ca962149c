// This file is part of the float16 project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Correctly rounded arithmetic
//!
//! Every operation computes its exact result, or enough bits of it plus a
//! sticky bit, in integers and rounds once with [`compose`].

use crate::detail::{compose, fix24, split, squash, SIGN_MASK};
use crate::F16;
use core::iter::{Product, Sum};
use core::ops;

/// Floor of the square root, one bit at a time
const fn isqrt(x: u64) -> u64 {
    let mut rem = x;
    let mut root = 0;
    let mut bit = 1 << 62;

    while bit > x {
        bit >>= 2;
    }

    while bit != 0 {
        if rem >= root + bit {
            rem -= root + bit;
            root = (root >> 1) + bit;
        } else {
            root >>= 1;
        }
        bit >>= 2;
    }

    root
}

#[allow(clippy::should_implement_trait)]
impl F16 {
    /// Signed zero or infinity from a sign flag
    const fn signed(self, negative: bool) -> Self {
        if negative {
            Self(self.0 | SIGN_MASK)
        } else {
            self
        }
    }

    /// Sign of a product or quotient
    const fn product_sign(self, other: Self) -> bool {
        (self.0 ^ other.0) & SIGN_MASK != 0
    }

    /// Sum rounded to nearest, ties to even
    ///
    /// Infinities of opposite signs give NaN.  Exact cancellation gives +0,
    /// and `x + (-0)` is `x`.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn add(self, rhs: Self) -> Self {
        if self.is_nan() || rhs.is_nan() {
            return Self::NAN;
        }

        match (self.is_infinite(), rhs.is_infinite()) {
            (true, true) if self.0 != rhs.0 => return Self::NAN,
            (true, _) => return self,
            (false, true) => return rhs,
            (false, false) => (),
        }

        match (self.is_zero(), rhs.is_zero()) {
            // -0 only if both are -0
            (true, true) => return Self(self.0 & rhs.0),
            (false, true) => return self,
            (true, false) => return rhs,
            (false, false) => (),
        }

        let sum = fix24(self.0) + fix24(rhs.0);

        if sum == 0 {
            return Self::ZERO;
        }

        Self(compose(sum < 0, -24, sum.unsigned_abs() as u128))
    }

    /// Difference rounded to nearest, ties to even
    #[must_use]
    pub const fn sub(self, rhs: Self) -> Self {
        self.add(rhs.negate())
    }

    /// Product rounded to nearest, ties to even
    ///
    /// `∞ × 0` is NaN.  Underflow rounds at the subnormal quantum and may
    /// give a signed zero.
    #[must_use]
    pub const fn mul(self, rhs: Self) -> Self {
        if self.is_nan() || rhs.is_nan() {
            return Self::NAN;
        }

        let negative = self.product_sign(rhs);

        if self.is_infinite() || rhs.is_infinite() {
            return if self.is_zero() || rhs.is_zero() {
                Self::NAN
            } else {
                Self::INFINITY.signed(negative)
            };
        }

        if self.is_zero() || rhs.is_zero() {
            return Self::ZERO.signed(negative);
        }

        let (_, ea, ma) = split(self.0);
        let (_, eb, mb) = split(rhs.0);

        Self(compose(negative, ea + eb - 20, (ma * mb) as u128))
    }

    /// Quotient rounded to nearest, ties to even
    ///
    /// `x / 0` is a signed infinity for nonzero `x`, while `0 / 0` and
    /// `∞ / ∞` are NaN.
    #[must_use]
    pub const fn div(self, rhs: Self) -> Self {
        if self.is_nan() || rhs.is_nan() {
            return Self::NAN;
        }

        let negative = self.product_sign(rhs);

        match (self.is_infinite(), rhs.is_infinite()) {
            (true, true) => return Self::NAN,
            (true, false) => return Self::INFINITY.signed(negative),
            (false, true) => return Self::ZERO.signed(negative),
            (false, false) => (),
        }

        match (self.is_zero(), rhs.is_zero()) {
            (true, true) => return Self::NAN,
            (false, true) => return Self::INFINITY.signed(negative),
            (true, false) => return Self::ZERO.signed(negative),
            (false, false) => (),
        }

        let (_, ea, ma) = split(self.0);
        let (_, eb, mb) = split(rhs.0);

        // At least 14 quotient bits: 11 to keep and 3 to round
        let dividend = (ma as u128) << 14;
        let divisor = mb as u128;
        let quotient = dividend / divisor | squash(dividend % divisor);

        Self(compose(negative, ea - eb - 14, quotient))
    }

    /// Remainder of truncated division with the sign of `self`, like `fmod`
    ///
    /// The result is always exact.  `x % 0` and `∞ % y` are NaN, while
    /// `x % ∞` is `x`.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn rem(self, rhs: Self) -> Self {
        if self.is_nan() || rhs.is_nan() || self.is_infinite() || rhs.is_zero() {
            return Self::NAN;
        }

        if rhs.is_infinite() || self.is_zero() {
            return self;
        }

        let negative = self.is_sign_negative();

        match fix24(self.0) % fix24(rhs.0) {
            0 => Self::ZERO.signed(negative),
            r => Self(compose(negative, -24, r.unsigned_abs() as u128)),
        }
    }

    /// Square root rounded to nearest, ties to even
    ///
    /// ±0, +∞, and NaN are returned unchanged.  Other negative inputs give
    /// NaN.
    #[must_use]
    pub const fn sqrt(self) -> Self {
        if self.is_zero() || self.is_nan() || self.0 == Self::INFINITY.0 {
            return self;
        }

        if self.is_sign_negative() {
            return Self::NAN;
        }

        let (_, exp, significand) = split(self.0);
        let mut significand = significand as u64;
        let mut exp = exp - 10;

        // Make the exponent even
        if exp & 1 != 0 {
            significand <<= 1;
            exp -= 1;
        }

        // At least 14 root bits: 11 to keep and 3 to round
        let radicand = significand << 16;
        let root = isqrt(radicand);
        let root = root as u128 | squash((radicand - root * root) as u128);

        Self(compose(false, (exp - 16) / 2, root))
    }

    /// Fused multiply-add: `self * a + b` with a single rounding
    ///
    /// The product and the sum are formed exactly in 128-bit integers.
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub const fn mul_add(self, a: Self, b: Self) -> Self {
        if self.is_nan() || a.is_nan() || b.is_nan() {
            return Self::NAN;
        }

        let negative = self.product_sign(a);

        if self.is_infinite() || a.is_infinite() {
            if self.is_zero() || a.is_zero() || b.is_infinite() && b.is_sign_negative() != negative {
                return Self::NAN;
            }
            return Self::INFINITY.signed(negative);
        }

        if b.is_infinite() {
            return b;
        }

        if self.is_zero() || a.is_zero() {
            return if b.is_zero() {
                Self::ZERO.signed(negative && b.is_sign_negative())
            } else {
                b
            };
        }

        let (_, ex, mx) = split(self.0);
        let (_, ey, my) = split(a.0);
        let product_exp = ex + ey - 20;
        let product = (mx * my) as i128;

        if b.is_zero() {
            return Self(compose(negative, product_exp, product as u128));
        }

        let (_, ez, mz) = split(b.0);
        let addend_exp = ez - 10;
        let exp = if product_exp < addend_exp { product_exp } else { addend_exp };

        // Shifts are at most 73 bits, so both terms fit in 85 bits.
        let product = product << (product_exp - exp);
        let addend = (mz as i128) << (addend_exp - exp);

        let product = if negative { -product } else { product };
        let addend = if b.is_sign_negative() { -addend } else { addend };
        let sum = product + addend;

        if sum == 0 {
            return Self::ZERO;
        }

        Self(compose(sum < 0, exp, sum.unsigned_abs()))
    }

    /// The lesser of two values, ignoring NaN unless both are NaN
    #[must_use]
    pub const fn min(self, other: Self) -> Self {
        match (self.is_nan(), other.is_nan()) {
            (true, _) => other,
            (false, true) => self,
            (false, false) if self.key() <= other.key() => self,
            (false, false) => other,
        }
    }

    /// The greater of two values, ignoring NaN unless both are NaN
    #[must_use]
    pub const fn max(self, other: Self) -> Self {
        match (self.is_nan(), other.is_nan()) {
            (true, _) => other,
            (false, true) => self,
            (false, false) if self.key() >= other.key() => self,
            (false, false) => other,
        }
    }
}

macro_rules! forward_binary {
    ($($trait:ident::$method:ident, $assign_trait:ident::$assign:ident;)*) => {$(
        impl ops::$trait for F16 {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                Self::$method(self, rhs)
            }
        }

        impl ops::$trait<&F16> for F16 {
            type Output = Self;

            fn $method(self, rhs: &Self) -> Self {
                Self::$method(self, *rhs)
            }
        }

        impl ops::$assign_trait for F16 {
            fn $assign(&mut self, rhs: Self) {
                *self = Self::$method(*self, rhs);
            }
        }

        impl ops::$assign_trait<&F16> for F16 {
            fn $assign(&mut self, rhs: &Self) {
                *self = Self::$method(*self, *rhs);
            }
        }
    )*};
}

forward_binary! {
    Add::add, AddAssign::add_assign;
    Sub::sub, SubAssign::sub_assign;
    Mul::mul, MulAssign::mul_assign;
    Div::div, DivAssign::div_assign;
    Rem::rem, RemAssign::rem_assign;
}

impl ops::Neg for F16 {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl Sum for F16 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::add)
    }
}

impl<'a> Sum<&'a F16> for F16 {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Product for F16 {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, Self::mul)
    }
}

impl<'a> Product<&'a F16> for F16 {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().product()
    }
}
