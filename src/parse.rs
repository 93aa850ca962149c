// This file is part of the float16 project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Correctly rounded conversion from text
//!
//! Decimal literals go through [`Decimal`], which scales the digits by
//! powers of two until 11 significant bits can be rounded off exactly.
//! Hexadecimal literals already are binary, so their mantissa goes straight
//! to [`compose`].

use crate::decimal::Decimal;
use crate::detail::{compose, BIAS, EXP_MASK, FRAC_MASK, SHIFT, SIGN_MASK};
use crate::F16;
use alloc::string::{String, ToString};
use core::str::FromStr;
use thiserror::Error;

const FUNC: &str = "F16::parse";

/// Why a literal was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The text is not a well-formed literal
    #[error("invalid syntax")]
    Syntax,

    /// The literal is well-formed but rounds beyond the finite range
    #[error("value out of range")]
    Range,
}

/// Failure to parse an [`F16`]
///
/// The error still carries a usable value: the correctly signed infinity for
/// [`ErrorKind::Range`] and zero for [`ErrorKind::Syntax`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{func}: parsing {text:?}: {kind}")]
pub struct ParseError {
    func: &'static str,
    text: String,
    kind: ErrorKind,
    negative: bool,
}

impl ParseError {
    pub(crate) fn syntax(text: &str) -> Self {
        Self::new(text, ErrorKind::Syntax, false)
    }

    fn range(text: &str, negative: bool) -> Self {
        Self::new(text, ErrorKind::Range, negative)
    }

    fn new(text: &str, kind: ErrorKind, negative: bool) -> Self {
        log::trace!("{FUNC}: rejecting {text:?}: {kind}");

        Self {
            func: FUNC,
            text: text.to_string(),
            kind,
            negative,
        }
    }

    /// The kind of failure
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The operation that failed
    #[must_use]
    pub const fn func(&self) -> &'static str {
        self.func
    }

    /// The rejected input
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Fallback value: signed infinity on overflow, zero on bad syntax
    #[must_use]
    pub const fn value(&self) -> F16 {
        match (self.kind, self.negative) {
            (ErrorKind::Syntax, _) => F16::ZERO,
            (ErrorKind::Range, false) => F16::INFINITY,
            (ErrorKind::Range, true) => F16::NEG_INFINITY,
        }
    }
}

/// Length of the common prefix of `s` and the lowercase `prefix`, ignoring
/// the case of `s`
fn common_prefix_len_ignore_case(s: &[u8], prefix: &[u8]) -> usize {
    s.iter()
        .zip(prefix)
        .take_while(|(c, p)| c.to_ascii_lowercase() == **p)
        .count()
}

/// Recognize a signed infinity or NaN at the start of `s`
///
/// Returns the value and the number of bytes consumed.
fn special(s: &[u8]) -> Option<(F16, usize)> {
    let (sign, start) = match s.first()? {
        b'+' => (F16::ONE, 1),
        b'-' => (F16::NEG_ONE, 1),
        _ => (F16::ONE, 0),
    };

    let rest = &s[start..];

    // Anything longer than "inf" is ok, but without the whole "infinity"
    // only "inf" is consumed.
    match common_prefix_len_ignore_case(rest, b"infinity") {
        8 => return Some((F16::INFINITY.copysign(sign), start + 8)),
        3..=7 => return Some((F16::INFINITY.copysign(sign), start + 3)),
        _ => (),
    }

    (common_prefix_len_ignore_case(rest, b"nan") == 3).then_some((F16::NAN.copysign(sign), start + 3))
}

/// Hexadecimal literal as `mantissa × 2^exp`
///
/// Nonzero digits past the sixteenth are folded into the lowest bit of the
/// mantissa.
#[derive(Debug)]
struct HexLiteral {
    mantissa: u64,
    exp: i32,
    negative: bool,
}

/// Class of the last character seen by [`underscore_ok`]
#[derive(Clone, Copy, PartialEq, Eq)]
enum Seen {
    Start,
    Digit,
    Underscore,
    Other,
}

/// Check that every underscore sits between digits, or between the base
/// prefix and a digit
fn underscore_ok(s: &[u8]) -> bool {
    let s = match s {
        [b'+' | b'-', rest @ ..] => rest,
        _ => s,
    };

    let (hex, body, mut seen) = match s {
        [b'0', x, rest @ ..] if x.eq_ignore_ascii_case(&b'x') => (true, rest, Seen::Digit),
        _ => (false, s, Seen::Start),
    };

    for &c in body {
        seen = match c {
            b'0'..=b'9' => Seen::Digit,
            _ if hex && c.is_ascii_hexdigit() => Seen::Digit,
            b'_' if seen == Seen::Digit => Seen::Underscore,
            _ if matches!(seen, Seen::Underscore) || c == b'_' => return false,
            _ => Seen::Other,
        };
    }

    seen != Seen::Underscore
}

/// Split the sign off a literal
fn sign(s: &[u8]) -> (bool, &[u8]) {
    match s {
        [b'+', rest @ ..] => (false, rest),
        [b'-', rest @ ..] => (true, rest),
        _ => (false, s),
    }
}

/// Check for `0x` followed by at least one character after the sign
fn is_hex(s: &[u8]) -> bool {
    matches!(sign(s).1, [b'0', x, _, ..] if x.eq_ignore_ascii_case(&b'x'))
}

/// Read a whole hexadecimal literal
///
/// Returns `None` on a syntax error, including trailing characters.
fn read_hex(s: &[u8]) -> Option<HexLiteral> {
    let (negative, body) = sign(s);
    let mut i = 2;
    let mut underscores = false;

    let mut mantissa: u64 = 0;
    let mut truncated = false;
    let mut saw_dot = false;
    let mut saw_digits = false;
    let mut nd = 0;
    let mut nd_mant = 0;
    let mut dp = 0;

    while let Some(&c) = body.get(i) {
        match c {
            b'_' => underscores = true,
            b'.' if saw_dot => return None,
            b'.' => {
                saw_dot = true;
                dp = nd;
            }
            _ => match char::from(c).to_digit(16) {
                // Leading zeros
                Some(0) if nd == 0 => {
                    saw_digits = true;
                    dp -= 1;
                }
                Some(digit) => {
                    saw_digits = true;
                    nd += 1;

                    // 16^16 still fits in u64
                    if nd_mant < 16 {
                        mantissa = (mantissa << 4) | u64::from(digit);
                        nd_mant += 1;
                    } else if digit != 0 {
                        truncated = true;
                    }
                }
                None => break,
            },
        }
        i += 1;
    }

    if !saw_digits {
        return None;
    }

    if !saw_dot {
        dp = nd;
    }

    // The binary exponent is mandatory
    if !body.get(i).is_some_and(|c| c.eq_ignore_ascii_case(&b'p')) {
        return None;
    }
    i += 1;

    let exp_negative = match body.get(i) {
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

    if !body.get(i).is_some_and(u8::is_ascii_digit) {
        return None;
    }

    let mut e = 0;

    while let Some(&c) = body.get(i) {
        match c {
            b'0'..=b'9' if e < 10000 => e = e * 10 + i32::from(c - b'0'),
            b'0'..=b'9' => (),
            b'_' => underscores = true,
            _ => return None,
        }
        i += 1;
    }

    if underscores && !underscore_ok(s) {
        return None;
    }

    let dp = 4 * dp + if exp_negative { -e } else { e };

    Some(HexLiteral {
        mantissa: mantissa | u64::from(truncated),
        exp: if mantissa == 0 { 0 } else { dp - 4 * nd_mant },
        negative,
    })
}

/// Binary exponents gained by shifting out as many decimal digits as the
/// index, one more digit falls back to the last entry plus one
const POWTAB: [i32; 9] = [1, 3, 6, 9, 13, 16, 19, 23, 26];

fn power_shift(digits: i32) -> i32 {
    usize::try_from(digits)
        .ok()
        .and_then(|i| POWTAB.get(i).copied())
        .unwrap_or(27)
}

/// Round a decimal to binary16 bits, reporting overflow
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
fn decimal_to_bits(d: &mut Decimal) -> (u16, bool) {
    let sign = if d.negative { SIGN_MASK } else { 0 };

    // 10^-9 is less than half the smallest subnormal, and 10^5 overflows.
    if d.is_zero() || d.decimal_point() < -8 {
        return (sign, false);
    }
    if d.decimal_point() > 5 {
        return (sign | EXP_MASK, true);
    }

    // Scale by powers of two until in range [0.5, 1)
    let mut exp = 0;

    while d.decimal_point() > 0 {
        let n = power_shift(d.decimal_point());
        d.shift(-n);
        exp += n;
    }

    while d.decimal_point() < 0 || d.decimal_point() == 0 && d.leading_digit() < b'5' {
        let n = power_shift(-d.decimal_point());
        d.shift(n);
        exp -= n;
    }

    // [0.5, 1) to [1, 2)
    exp -= 1;

    // Denormalize below the smallest normal exponent
    if exp < 1 - BIAS {
        let n = 1 - BIAS - exp;
        d.shift(-n);
        exp += n;
    }

    if exp > BIAS {
        return (sign | EXP_MASK, true);
    }

    d.shift(SHIFT as i32 + 1);
    let mut mantissa = d.rounded_integer();

    // Rounding carried into a new binade
    if mantissa == 2 << SHIFT {
        mantissa >>= 1;
        exp += 1;

        if exp > BIAS {
            return (sign | EXP_MASK, true);
        }
    }

    if mantissa >> SHIFT == 0 {
        exp = -BIAS;
    }

    let biased = ((exp + BIAS) as u16) << SHIFT;
    (sign | biased | (mantissa as u16 & FRAC_MASK), false)
}

impl F16 {
    /// Parse a decimal or hexadecimal literal, rounding to nearest, ties to
    /// even
    ///
    /// Accepted forms are `[±]digits[.digits][e[±]digits]`,
    /// `[±]0x hexdigits[.hexdigits]p[±]digits`, and case-insensitive
    /// `[±]inf`, `[±]infinity`, `[±]nan`.  Underscores may separate digits.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Syntax`] if the text is not exactly one literal,
    /// [`ErrorKind::Range`] if it rounds beyond [`F16::MAX`] in magnitude.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let s = text.as_bytes();

        if let Some((value, len)) = special(s) {
            return if len == s.len() {
                Ok(value)
            } else {
                Err(ParseError::syntax(text))
            };
        }

        if is_hex(s) {
            let literal = read_hex(s).ok_or_else(|| ParseError::syntax(text))?;

            // More than 16 hex digits leave at least 61 bits, so the sticky
            // bit is far below the rounding position.
            let x = Self(compose(literal.negative, literal.exp, literal.mantissa.into()));

            return if x.is_infinite() {
                Err(ParseError::range(text, literal.negative))
            } else {
                Ok(x)
            };
        }

        let mut d = Decimal::parse(s)
            .filter(|_| !s.contains(&b'_') || underscore_ok(s))
            .ok_or_else(|| ParseError::syntax(text))?;

        match decimal_to_bits(&mut d) {
            (_, true) => Err(ParseError::range(text, d.negative)),
            (bits, false) => Ok(Self(bits)),
        }
    }
}

impl FromStr for F16 {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
