// This file is part of the float16 project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Shortest decimal digits that parse back to the same value
//!
//! A finite binary16 is a multiple of 2<sup>-24</sup>, and so are the
//! midpoints to its neighbors after one more bit.  Multiplying everything
//! by 2<sup>25</sup> · 5<sup>25</sup> = 10<sup>25</sup> turns the value and
//! its rounding interval into integers, where decimal rounding is plain
//! division.

use crate::detail::{EXP_MASK, FRAC_MASK, SHIFT, SIGN_MASK};

/// 5<sup>25</sup>
const FIVE25: u128 = 298_023_223_876_953_125;

/// Decimal places of the scaled integers
const SCALE: i32 = 25;

/// Decimal digits of a nonnegative number `0.d₁d₂…dₙ × 10^point`
#[derive(Clone, Copy, Debug)]
pub struct Digits {
    buf: [u8; 40],
    len: usize,
    point: i32,
}

impl Digits {
    /// Digits of `n × 10^-scale` with trailing zeros dropped
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn new(mut n: u128, scale: i32) -> Self {
        let mut reversed = [0; 40];
        let mut len = 0;

        while n > 0 {
            reversed[len] = b'0' + (n % 10) as u8;
            n /= 10;
            len += 1;
        }

        let zeros = reversed[..len].iter().take_while(|&&c| c == b'0').count();
        let mut buf = [0; 40];

        for (slot, &c) in buf.iter_mut().zip(reversed[zeros..len].iter().rev()) {
            *slot = c;
        }

        Self {
            buf,
            len: len - zeros,
            point: if len == 0 { 0 } else { len as i32 - scale },
        }
    }

    /// Significant digits as ASCII, empty for zero
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Decimal exponent of the digit string read as a fraction
    pub const fn point(&self) -> i32 {
        self.point
    }
}

/// Round `n` to a multiple of `unit`, ties to even
pub fn round_to_unit(n: u128, unit: u128) -> u128 {
    if unit == 1 {
        return n;
    }

    let (q, r) = (n / unit, n % unit);
    let half = unit / 2;
    let up = r > half || r == half && q % 2 == 1;
    (q + u128::from(up)) * unit
}

/// Rounding interval of a positive finite value in units of 2<sup>-25</sup>
///
/// Returns the lower midpoint, the exact value, and the upper midpoint.  At a
/// power of two the gap below is half the gap above.
fn interval(bits: u16) -> (u128, u128, u128) {
    let biased = (bits & EXP_MASK) >> SHIFT;
    let frac = u128::from(bits & FRAC_MASK);

    if biased == 0 {
        let exact = frac << 1;
        return (exact - 1, exact, exact + 1);
    }

    let exact = (frac | 1 << SHIFT) << biased;
    let half = 1 << (biased - 1);

    let below = if frac == 0 && biased > 1 {
        half >> 1
    } else {
        half
    };

    (exact - below, exact, exact + half)
}

/// Fewest digits strictly inside the rounding interval of `|bits|`
///
/// At each rounding position, from 10<sup>`max_place`</sup> down to the last
/// digit of the exact expansion, the value is rounded to nearest, ties to
/// even, and the first result strictly inside the interval wins.  The place
/// is counted in decimal places from 10<sup>-25</sup>.  Fixed notation passes
/// 25 so that the integer part is never rounded away, scientific notation
/// passes 30.
///
/// The magnitude must be finite.
pub fn shortest(bits: u16, max_place: u32) -> Digits {
    let bits = bits & !SIGN_MASK;

    if bits == 0 {
        return Digits::new(0, 0);
    }

    let (lower, exact, upper) = interval(bits);
    let (lower, exact, upper) = (lower * FIVE25, exact * FIVE25, upper * FIVE25);

    let found = (0..=max_place)
        .rev()
        .map(|place| round_to_unit(exact, 10u128.pow(place)))
        .find(|&candidate| lower < candidate && candidate < upper);

    Digits::new(found.unwrap_or(exact), SCALE)
}
