// This file is part of the float16 project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Multiple-precision decimal for exact binary ⇄ decimal conversion
//!
//! A [`Decimal`] stores `0.d₁d₂…dₙ × 10^decimal_point` with ASCII digits.
//! Multiplying or dividing by a power of two shifts digits in place, so a
//! binary16 value or a parsed literal can be scaled without losing a single
//! digit.  Digits that do not fit are dropped, and the `truncated` flag
//! records whether any of them was nonzero.

/// Capacity of the digit buffer
///
/// Every binary16 value and rounding midpoint has fewer than 30 significant
/// digits, so truncation only ever drops digits that cannot decide a tie.
const MAX_DIGITS: usize = 64;

/// Largest shift done in one step: `10 << MAX_SHIFT` must fit in `u64`
const MAX_SHIFT: u32 = 60;

#[derive(Clone, Debug)]
pub struct Decimal {
    digits: [u8; MAX_DIGITS],
    num_digits: usize,
    decimal_point: i32,
    pub negative: bool,
    truncated: bool,
}

impl Default for Decimal {
    fn default() -> Self {
        Self {
            digits: [b'0'; MAX_DIGITS],
            num_digits: 0,
            decimal_point: 0,
            negative: false,
            truncated: false,
        }
    }
}

impl Decimal {
    /// Exact decimal expansion of an integer
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn from_u64(mut v: u64) -> Self {
        let mut reversed = [0; 20];
        let mut len = 0;

        while v > 0 {
            reversed[len] = b'0' + (v % 10) as u8;
            v /= 10;
            len += 1;
        }

        let mut d = Self::default();

        for (slot, &c) in d.digits.iter_mut().zip(reversed[..len].iter().rev()) {
            *slot = c;
        }

        d.num_digits = len;
        d.decimal_point = len as i32;
        d.trim();
        d
    }

    /// Read a decimal literal: sign, digits, optional point, optional exponent
    ///
    /// Underscores among the digits are skipped; the caller validates their
    /// placement.  The whole input must be consumed.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn parse(s: &[u8]) -> Option<Self> {
        let mut d = Self::default();
        let mut i = 0;

        match s.first() {
            Some(b'+') => i += 1,
            Some(b'-') => {
                d.negative = true;
                i += 1;
            }
            _ => (),
        }

        let mut saw_dot = false;
        let mut saw_digits = false;

        // Significant digits seen, stored or not
        let mut significant = 0;

        while let Some(&c) = s.get(i) {
            match c {
                b'_' => (),
                b'.' if saw_dot => return None,
                b'.' => {
                    saw_dot = true;
                    d.decimal_point = significant;
                }
                b'0'..=b'9' => {
                    saw_digits = true;

                    if c == b'0' && significant == 0 {
                        d.decimal_point -= 1;
                    } else {
                        significant += 1;

                        if d.num_digits < MAX_DIGITS {
                            d.digits[d.num_digits] = c;
                            d.num_digits += 1;
                        } else if c != b'0' {
                            d.truncated = true;
                        }
                    }
                }
                _ => break,
            }
            i += 1;
        }

        if !saw_digits {
            return None;
        }

        if !saw_dot {
            d.decimal_point = significant;
        }

        if s.get(i).is_some_and(|c| c.eq_ignore_ascii_case(&b'e')) {
            i += 1;

            let negative = match s.get(i) {
                Some(b'+') => {
                    i += 1;
                    false
                }
                Some(b'-') => {
                    i += 1;
                    true
                }
                _ => false,
            };

            if !s.get(i).is_some_and(u8::is_ascii_digit) {
                return None;
            }

            // Anything past 10000 is over- or underflow anyway
            let mut e = 0;

            while let Some(&c) = s.get(i) {
                match c {
                    b'0'..=b'9' if e < 10000 => e = e * 10 + i32::from(c - b'0'),
                    b'0'..=b'9' | b'_' => (),
                    _ => break,
                }
                i += 1;
            }

            d.decimal_point += if negative { -e } else { e };
        }

        d.trim();
        (i == s.len()).then_some(d)
    }

    /// The stored significant digits as ASCII, without trailing zeros
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.num_digits]
    }

    /// Position of the decimal point relative to the first digit
    pub const fn decimal_point(&self) -> i32 {
        self.decimal_point
    }

    /// Leading digit as ASCII, or `b'0'` for zero
    pub fn leading_digit(&self) -> u8 {
        self.digits().first().copied().unwrap_or(b'0')
    }

    pub const fn is_zero(&self) -> bool {
        self.num_digits == 0
    }

    /// Drop trailing zeros
    fn trim(&mut self) {
        while self.num_digits > 0 && self.digits[self.num_digits - 1] == b'0' {
            self.num_digits -= 1;
        }

        if self.num_digits == 0 {
            self.decimal_point = 0;
        }
    }

    /// Multiply by 2<sup>k</sup>, 0 < k ≤ [`MAX_SHIFT`]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn left_shift(&mut self, k: u32) {
        // Least significant digit first
        let mut product = [0u8; MAX_DIGITS + 20];
        let mut len = 0;
        let mut carry = 0;

        for &c in self.digits().iter().rev() {
            let n = (u64::from(c - b'0') << k) + carry;
            product[len] = (n % 10) as u8;
            carry = n / 10;
            len += 1;
        }

        while carry > 0 {
            product[len] = (carry % 10) as u8;
            carry /= 10;
            len += 1;
        }

        self.decimal_point += (len - self.num_digits) as i32;

        let kept = len.min(MAX_DIGITS);
        let (dropped, kept_digits) = product[..len].split_at(len - kept);

        for (slot, &digit) in self.digits.iter_mut().zip(kept_digits.iter().rev()) {
            *slot = b'0' + digit;
        }

        self.truncated |= dropped.iter().any(|&digit| digit != 0);
        self.num_digits = kept;
        self.trim();
    }

    /// Divide by 2<sup>k</sup>, 0 < k ≤ [`MAX_SHIFT`]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn right_shift(&mut self, k: u32) {
        let mut read = 0;
        let mut write = 0;
        let mut n: u64 = 0;

        // Pick up enough leading digits to cover the first shift
        while n >> k == 0 {
            if read >= self.num_digits {
                if n == 0 {
                    self.num_digits = 0;
                    return;
                }
                while n >> k == 0 {
                    n *= 10;
                    read += 1;
                }
                break;
            }
            n = n * 10 + u64::from(self.digits[read] - b'0');
            read += 1;
        }

        self.decimal_point -= read as i32 - 1;
        let mask = (1 << k) - 1;

        // Pick up a digit, put down a digit
        while read < self.num_digits {
            let c = u64::from(self.digits[read] - b'0');
            self.digits[write] = b'0' + (n >> k) as u8;
            n = (n & mask) * 10 + c;
            read += 1;
            write += 1;
        }

        // Put down the remaining digits
        while n > 0 {
            let digit = (n >> k) as u8;
            n &= mask;

            if write < MAX_DIGITS {
                self.digits[write] = b'0' + digit;
                write += 1;
            } else if digit > 0 {
                self.truncated = true;
            }

            n *= 10;
        }

        self.num_digits = write;
        self.trim();
    }

    /// Multiply by 2<sup>k</sup> (divide for negative `k`)
    #[allow(clippy::cast_sign_loss)]
    pub fn shift(&mut self, mut k: i32) {
        const STEP: i32 = MAX_SHIFT as i32;

        if self.is_zero() {
            return;
        }

        while k > STEP {
            self.left_shift(MAX_SHIFT);
            k -= STEP;
        }

        while k < -STEP {
            self.right_shift(MAX_SHIFT);
            k += STEP;
        }

        match k {
            1.. => self.left_shift(k as u32),
            ..=-1 => self.right_shift(k.unsigned_abs()),
            0 => (),
        }
    }

    /// Whether rounding to `nd` digits should round up, ties to even
    ///
    /// A truncated tail means the value is above an apparent tie.
    #[allow(clippy::cast_sign_loss)]
    fn should_round_up(&self, nd: i32) -> bool {
        if nd < 0 || nd as usize >= self.num_digits {
            return false;
        }

        let nd = nd as usize;

        if self.digits[nd] == b'5' && nd + 1 == self.num_digits {
            return self.truncated || nd > 0 && (self.digits[nd - 1] - b'0') % 2 == 1;
        }

        self.digits[nd] >= b'5'
    }

    /// Round to `nd` significant digits, ties to even
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn round(&mut self, nd: usize) {
        if nd >= self.num_digits {
            return;
        }

        if self.should_round_up(nd as i32) {
            self.round_up(nd);
        } else {
            self.round_down(nd);
        }
    }

    fn round_down(&mut self, nd: usize) {
        self.num_digits = nd;
        self.trim();
    }

    fn round_up(&mut self, nd: usize) {
        if let Some(i) = self.digits[..nd].iter().rposition(|&c| c < b'9') {
            self.digits[i] += 1;
            self.num_digits = i + 1;
            return;
        }

        // All nines
        self.digits[0] = b'1';
        self.num_digits = 1;
        self.decimal_point += 1;
    }

    /// Integer part rounded to nearest, ties to even
    ///
    /// Saturates at [`u64::MAX`] for values of more than 19 digits.
    #[allow(clippy::cast_sign_loss)]
    pub fn rounded_integer(&self) -> u64 {
        if self.decimal_point > 19 {
            return u64::MAX;
        }

        let dp = self.decimal_point.max(0) as usize;
        let stored = dp.min(self.num_digits);

        let n = self.digits[..stored]
            .iter()
            .fold(0, |n, &c| n * 10 + u64::from(c - b'0'));

        let n = (stored..dp).fold(n, |n, _| n * 10);
        n + u64::from(self.should_round_up(self.decimal_point))
    }
}
