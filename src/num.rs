// This file is part of the float16 project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! [`num_traits`] implementations

use crate::detail::{compose, BIAS, EXP_MASK, FRAC_MASK, SHIFT};
use crate::{ParseError, F16};
use core::num::FpCategory;
use num_traits::float::FloatCore;
use num_traits::{Bounded, FromPrimitive, Num, NumCast, One, Signed, ToPrimitive, Zero};

impl Zero for F16 {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        Self::is_zero(*self)
    }
}

impl One for F16 {
    fn one() -> Self {
        Self::ONE
    }
}

impl Num for F16 {
    type FromStrRadixErr = ParseError;

    /// Parse a decimal literal
    ///
    /// Only radix 10 is supported; any other radix is a syntax error.
    /// Hexadecimal literals with a `0x` prefix are accepted in radix 10 as
    /// they are by [`F16::parse`].
    fn from_str_radix(s: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        if radix == 10 {
            Self::parse(s)
        } else {
            Err(ParseError::syntax(s))
        }
    }
}

impl Bounded for F16 {
    fn min_value() -> Self {
        Self::MIN
    }

    fn max_value() -> Self {
        Self::MAX
    }
}

impl Signed for F16 {
    fn abs(&self) -> Self {
        Self::abs(*self)
    }

    fn abs_sub(&self, other: &Self) -> Self {
        if *self <= *other {
            Self::ZERO
        } else {
            *self - *other
        }
    }

    fn signum(&self) -> Self {
        Self::signum(*self)
    }

    fn is_positive(&self) -> bool {
        Self::is_sign_positive(*self) && !Self::is_nan(*self)
    }

    fn is_negative(&self) -> bool {
        Self::is_sign_negative(*self) && !Self::is_nan(*self)
    }
}

impl ToPrimitive for F16 {
    fn to_i64(&self) -> Option<i64> {
        Self::to_f64(*self).to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        Self::to_f64(*self).to_u64()
    }

    fn to_f32(&self) -> Option<f32> {
        Some(Self::to_f32(*self))
    }

    fn to_f64(&self) -> Option<f64> {
        Some(Self::to_f64(*self))
    }
}

impl FromPrimitive for F16 {
    fn from_i64(n: i64) -> Option<Self> {
        Some(Self(compose(n < 0, 0, n.unsigned_abs().into())))
    }

    fn from_u64(n: u64) -> Option<Self> {
        Some(Self(compose(false, 0, n.into())))
    }

    fn from_i128(n: i128) -> Option<Self> {
        Some(Self(compose(n < 0, 0, n.unsigned_abs())))
    }

    fn from_u128(n: u128) -> Option<Self> {
        Some(Self(compose(false, 0, n)))
    }

    fn from_f32(n: f32) -> Option<Self> {
        Some(Self::from_f32(n))
    }

    fn from_f64(n: f64) -> Option<Self> {
        Some(Self::from_f64(n))
    }
}

impl NumCast for F16 {
    fn from<T: ToPrimitive>(n: T) -> Option<Self> {
        n.to_f64().map(Self::from_f64)
    }
}

impl FloatCore for F16 {
    fn infinity() -> Self {
        Self::INFINITY
    }

    fn neg_infinity() -> Self {
        Self::NEG_INFINITY
    }

    fn nan() -> Self {
        Self::NAN
    }

    fn neg_zero() -> Self {
        Self::NEG_ZERO
    }

    fn min_value() -> Self {
        Self::MIN
    }

    fn min_positive_value() -> Self {
        Self::MIN_POSITIVE
    }

    fn epsilon() -> Self {
        Self::EPSILON
    }

    fn max_value() -> Self {
        Self::MAX
    }

    fn is_nan(self) -> bool {
        Self::is_nan(self)
    }

    fn is_infinite(self) -> bool {
        Self::is_infinite(self)
    }

    fn is_finite(self) -> bool {
        Self::is_finite(self)
    }

    fn is_normal(self) -> bool {
        Self::is_normal(self)
    }

    fn is_subnormal(self) -> bool {
        Self::is_subnormal(self)
    }

    fn classify(self) -> FpCategory {
        Self::classify(self)
    }

    fn is_sign_positive(self) -> bool {
        Self::is_sign_positive(self)
    }

    fn is_sign_negative(self) -> bool {
        Self::is_sign_negative(self)
    }

    fn abs(self) -> Self {
        Self::abs(self)
    }

    fn signum(self) -> Self {
        Self::signum(self)
    }

    fn min(self, other: Self) -> Self {
        Self::min(self, other)
    }

    fn max(self, other: Self) -> Self {
        Self::max(self, other)
    }

    fn to_degrees(self) -> Self {
        Self::from_f64(Self::to_f64(self).to_degrees())
    }

    fn to_radians(self) -> Self {
        Self::from_f64(Self::to_f64(self).to_radians())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn integer_decode(self) -> (u64, i16, i8) {
        let bits = self.to_bits();
        let sign = if Self::is_sign_negative(self) { -1 } else { 1 };
        let biased = (bits & EXP_MASK) >> SHIFT;
        let frac: u64 = (bits & FRAC_MASK).into();

        let mantissa = if biased == 0 {
            frac << 1
        } else {
            frac | 1 << SHIFT
        };

        let exponent = biased as i16 - (BIAS + SHIFT as i32) as i16;
        (mantissa, exponent, sign)
    }
}
