// This file is part of the float16 project.
//
// Copyright (C) 2024-2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! IEEE 754 binary16 emulated in software
//!
//! [`F16`] is a half-precision float whose parsing, formatting, and
//! arithmetic all work on the 16-bit encoding directly.  Every operation
//! rounds to nearest, ties to even, exactly once.  Nothing is computed in
//! `f32` or `f64` and narrowed afterwards, so results never inherit the
//! rounding boundaries of a wider format.
//!
//! ```
//! use float16::{F16, Verb};
//!
//! let x: F16 = "0.1".parse().unwrap();
//! assert_eq!(x.to_bits(), 0x2E66);
//! assert_eq!(x.to_string(), "0.1");
//! assert_eq!(x.to_text(Verb::Fixed, Some(10)), "0.0999755859");
//! assert_eq!((x + x).to_bits(), 0x3266);
//! ```
#![no_std]
#![warn(missing_docs)]

extern crate alloc;

mod arith;
mod cmp;
mod convert;
mod decimal;
mod detail;
mod format;
mod num;
mod parse;
mod shortest;

pub use core::num::FpCategory;
pub use format::{Verb, VerbError};
pub use parse::{ErrorKind, ParseError};

use detail::{EXP_MASK, FRAC_MASK, SIGN_MASK};

/// IEEE 754 binary16: 1 sign bit, 5 exponent bits, 10 fraction bits
///
/// Every one of the 65536 bit patterns is a valid value.  NaN payloads are
/// kept by [`F16::from_bits`] and [`F16::to_bits`] but carry no meaning: all
/// NaNs compare and propagate alike.
#[derive(Clone, Copy, Default)]
#[repr(transparent)]
pub struct F16(u16);

impl F16 {
    /// The radix of the internal representation
    pub const RADIX: u32 = 2;

    /// Number of significant binary digits, including the implicit bit
    pub const MANTISSA_DIGITS: u32 = detail::SHIFT + 1;

    /// One greater than the maximum possible power of 2 exponent
    pub const MAX_EXP: i32 = detail::BIAS + 1;

    /// One greater than the minimum possible normal power of 2 exponent
    pub const MIN_EXP: i32 = 2 - detail::BIAS;

    /// Positive zero
    pub const ZERO: Self = Self(0);

    /// Negative zero
    pub const NEG_ZERO: Self = Self(SIGN_MASK);

    /// One
    pub const ONE: Self = Self(0x3C00);

    /// Negative one
    pub const NEG_ONE: Self = Self(0xBC00);

    /// Positive infinity
    pub const INFINITY: Self = Self(EXP_MASK);

    /// Negative infinity
    pub const NEG_INFINITY: Self = Self(SIGN_MASK | EXP_MASK);

    /// The canonical quiet NaN
    pub const NAN: Self = Self(0x7E00);

    /// Largest finite value, 65504
    pub const MAX: Self = Self(0x7BFF);

    /// Smallest finite value, -65504
    pub const MIN: Self = Self(0xFBFF);

    /// Smallest positive normal value, 2<sup>-14</sup>
    pub const MIN_POSITIVE: Self = Self(0x0400);

    /// Smallest positive subnormal value, 2<sup>-24</sup>
    pub const MIN_POSITIVE_SUBNORMAL: Self = Self(0x0001);

    /// Difference between 1 and the next larger value, 2<sup>-10</sup>
    pub const EPSILON: Self = Self(0x1400);

    /// Raw transmutation from `u16`
    #[must_use]
    pub const fn from_bits(v: u16) -> Self {
        Self(v)
    }

    /// Raw transmutation to `u16`
    #[must_use]
    pub const fn to_bits(self) -> u16 {
        self.0
    }

    /// Check if the value is NaN
    #[must_use]
    pub const fn is_nan(self) -> bool {
        self.0 & !SIGN_MASK > EXP_MASK
    }

    /// Check if the value is positive or negative infinity
    #[must_use]
    pub const fn is_infinite(self) -> bool {
        self.0 & !SIGN_MASK == EXP_MASK
    }

    /// Check if the value is neither infinite nor NaN
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.0 & EXP_MASK != EXP_MASK
    }

    /// Check if the value is neither zero, infinite, subnormal, nor NaN
    #[must_use]
    pub const fn is_normal(self) -> bool {
        matches!(self.classify(), FpCategory::Normal)
    }

    /// Check if the value is subnormal
    #[must_use]
    pub const fn is_subnormal(self) -> bool {
        matches!(self.classify(), FpCategory::Subnormal)
    }

    /// Check if the value is positive or negative zero
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 & !SIGN_MASK == 0
    }

    /// Get the floating-point category of the value
    #[must_use]
    pub const fn classify(self) -> FpCategory {
        match (self.0 & EXP_MASK, self.0 & FRAC_MASK) {
            (0, 0) => FpCategory::Zero,
            (0, _) => FpCategory::Subnormal,
            (EXP_MASK, 0) => FpCategory::Infinite,
            (EXP_MASK, _) => FpCategory::Nan,
            _ => FpCategory::Normal,
        }
    }

    /// Check if the sign bit is clear
    #[must_use]
    pub const fn is_sign_positive(self) -> bool {
        self.0 & SIGN_MASK == 0
    }

    /// Check if the sign bit is set
    #[must_use]
    pub const fn is_sign_negative(self) -> bool {
        self.0 & SIGN_MASK != 0
    }

    /// Absolute value, clearing the sign bit
    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0 & !SIGN_MASK)
    }

    /// Flip the sign bit
    ///
    /// This is exact for every input, NaN included.
    #[must_use]
    pub const fn negate(self) -> Self {
        Self(self.0 ^ SIGN_MASK)
    }

    /// Magnitude of `self` with the sign of `sign`
    #[must_use]
    pub const fn copysign(self, sign: Self) -> Self {
        Self(self.0 & !SIGN_MASK | sign.0 & SIGN_MASK)
    }

    /// Sign of the value as ±1, or NaN for NaN
    ///
    /// Zeros map to one with the same sign, matching the primitive floats.
    #[must_use]
    pub const fn signum(self) -> Self {
        if self.is_nan() {
            Self::NAN
        } else {
            Self::ONE.copysign(self)
        }
    }
}
