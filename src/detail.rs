// This file is part of the float16 project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Implementation details
//!
//! This module is not considered part of the public API.  It holds the bit
//! manipulation shared by the parser, the formatter, and the arithmetic.

pub const SIGN_MASK: u16 = 0x8000;
pub const EXP_MASK: u16 = 0x7C00;
pub const FRAC_MASK: u16 = 0x03FF;

/// Number of explicit fraction bits
pub const SHIFT: u32 = 10;

/// Exponent bias
pub const BIAS: i32 = 15;

/// Sentinel returned by [`fix24`] for infinities
pub const FIX24_INFINITY: i64 = 1 << 41;

/// Decompose into sign, unbiased exponent, and significand
///
/// The significand carries its leading bit at position [`SHIFT`] even for
/// subnormals, which are renormalized with a leading-zero count.  The value
/// is `significand * 2^(exp - SHIFT)`.  Zero yields a zero significand.
/// Infinities and NaNs are not meaningful here.
#[must_use]
pub const fn split(bits: u16) -> (bool, i32, u32) {
    let negative = bits & SIGN_MASK != 0;
    let biased = ((bits & EXP_MASK) >> SHIFT) as i32;
    let frac = (bits & FRAC_MASK) as u32;

    if biased == 0 {
        let len = u32::BITS - frac.leading_zeros();
        #[allow(clippy::cast_possible_wrap)]
        let exp = len as i32 - (BIAS + SHIFT as i32);
        (negative, exp, frac << (SHIFT + 1 - len))
    } else {
        (negative, biased - BIAS, frac | 1 << SHIFT)
    }
}

/// Shift right by `shift` bits, rounding to nearest, ties to even
const fn round_shift(x: u128, shift: u32) -> u128 {
    if shift > u128::BITS {
        return 0;
    }

    let (q, r) = if shift == u128::BITS {
        (0, x)
    } else {
        (x >> shift, x & ((1 << shift) - 1))
    };

    let half = 1 << (shift - 1);
    q + (r > half || r == half && q & 1 == 1) as u128
}

/// Round `significand * 2^exp` to the nearest binary16 bits, ties to even
///
/// Results beyond the finite range saturate to infinity.  Results below the
/// normal range are rounded at the subnormal quantum and may flush to a
/// signed zero.  Nonzero bits that the caller already discarded must be
/// folded into the least significant bit as a sticky bit, at least two places
/// below the rounding position.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
pub const fn compose(negative: bool, exp: i32, significand: u128) -> u16 {
    let sign = if negative { SIGN_MASK } else { 0 };

    if significand == 0 {
        return sign;
    }

    // Exponent of the leading bit
    let top = exp + (u128::BITS - significand.leading_zeros()) as i32 - 1;

    if top > BIAS {
        return sign | EXP_MASK;
    }

    // Exponent of the unit in the last place
    let normalized = if top < 1 - BIAS { 1 - BIAS } else { top };
    let mut quantum = normalized - SHIFT as i32;
    let shift = quantum - exp;

    let mut m = if shift <= 0 {
        significand << -shift
    } else {
        round_shift(significand, shift as u32)
    };

    // Rounding carried into a new binade
    if m == 2 << SHIFT {
        m >>= 1;
        quantum += 1;
    }

    let m = m as u16;

    if m >> SHIFT == 0 {
        return sign | m;
    }

    match quantum + SHIFT as i32 + BIAS {
        biased @ 1..=30 => sign | (biased as u16) << SHIFT | (m & FRAC_MASK),
        _ => sign | EXP_MASK,
    }
}

/// Fold every bit of `x` into a single sticky bit
#[must_use]
pub const fn squash(x: u128) -> u128 {
    (x != 0) as u128
}

/// Value scaled by 2<sup>24</sup> as a signed integer
///
/// Every finite binary16 is an exact multiple of 2<sup>-24</sup>, so this is
/// lossless.  Infinities saturate to [`FIX24_INFINITY`].
#[must_use]
pub const fn fix24(bits: u16) -> i64 {
    let biased = (bits & EXP_MASK) >> SHIFT;
    let frac = (bits & FRAC_MASK) as i64;

    let magnitude = match biased {
        0 => frac,
        0x1F => FIX24_INFINITY,
        _ => (frac | 1 << SHIFT) << (biased - 1),
    };

    if bits & SIGN_MASK == 0 {
        magnitude
    } else {
        -magnitude
    }
}
