// This file is part of the float16 project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Conversion to text
//!
//! Fixed-precision output scales the value to an integer in units of
//! 10<sup>-24</sup>, which is exact because 2<sup>-24</sup> =
//! 5<sup>24</sup> · 10<sup>-24</sup>.  Rounding is then integer division.

use crate::decimal::Decimal;
use crate::detail::{fix24, split, BIAS, FRAC_MASK, SHIFT};
use crate::shortest::{round_to_unit, shortest, Digits};
use crate::F16;
use alloc::string::{String, ToString};
use core::fmt::{self, Write};
use thiserror::Error;

/// 5<sup>24</sup>
const FIVE24: u128 = 59_604_644_775_390_625;

/// Largest magnitude printed in scientific notation by the shortest
/// [`Verb::General`], about 9.996e-5
const GENERAL_SCI_MAX: u16 = 0x068D;

/// Format family, named after the `printf`-style verb character
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `b`: decimal significand and binary exponent, `-1234p-20`
    Binary,
    /// `f`: fixed notation, `123.456`
    Fixed,
    /// `e`: scientific notation, `1.23456e+02`
    Exp,
    /// `E`: scientific notation, `1.23456E+02`
    ExpUpper,
    /// `g`: scientific notation for small or large exponents, fixed
    /// otherwise
    General,
    /// `G`: like [`Verb::General`] with `E` for the exponent
    GeneralUpper,
    /// `x`: hexadecimal significand and binary exponent, `0x1.ffcp+15`
    Hex,
    /// `X`: like [`Verb::Hex`] in upper case, `0X1.FFCP+15`
    HexUpper,
}

/// A character that names no [`Verb`]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unknown format verb {0:?}")]
pub struct VerbError(pub char);

impl TryFrom<char> for Verb {
    type Error = VerbError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Ok(match c {
            'b' => Self::Binary,
            'f' => Self::Fixed,
            'e' => Self::Exp,
            'E' => Self::ExpUpper,
            'g' => Self::General,
            'G' => Self::GeneralUpper,
            'x' => Self::Hex,
            'X' => Self::HexUpper,
            _ => return Err(VerbError(c)),
        })
    }
}

impl From<Verb> for char {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Binary => 'b',
            Verb::Fixed => 'f',
            Verb::Exp => 'e',
            Verb::ExpUpper => 'E',
            Verb::General => 'g',
            Verb::GeneralUpper => 'G',
            Verb::Hex => 'x',
            Verb::HexUpper => 'X',
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char((*self).into())
    }
}

/// Magnitude in units of 10<sup>-24</sup>
#[allow(clippy::cast_sign_loss)]
const fn dec24(bits: u16) -> u128 {
    fix24(bits).unsigned_abs() as u128 * FIVE24
}

/// Write digits `0.d₁d₂…dₙ × 10^point` in fixed notation with `frac`
/// fractional digits, padding with zeros
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn write_fixed<W: Write + ?Sized>(w: &mut W, digits: &[u8], point: i32, frac: usize) -> fmt::Result {
    if point > 0 {
        let point = point as usize;
        let stored = point.min(digits.len());

        for &c in &digits[..stored] {
            w.write_char(c.into())?;
        }
        for _ in stored..point {
            w.write_char('0')?;
        }
    } else {
        w.write_char('0')?;
    }

    if frac > 0 {
        w.write_char('.')?;

        for i in 0..frac {
            let j = point as isize + i as isize;
            let c = usize::try_from(j)
                .ok()
                .and_then(|j| digits.get(j))
                .copied()
                .unwrap_or(b'0');
            w.write_char(c.into())?;
        }
    }

    Ok(())
}

/// Write digits `0.d₁d₂…dₙ × 10^point` in scientific notation with `frac`
/// digits after the point and an exponent of at least two digits
fn write_exp<W: Write + ?Sized>(w: &mut W, digits: &[u8], point: i32, frac: usize, e: char) -> fmt::Result {
    w.write_char(digits.first().map_or('0', |&c| c.into()))?;

    if frac > 0 {
        w.write_char('.')?;

        let stored = digits.len().min(frac + 1);

        for &c in digits.get(1..stored).unwrap_or_default() {
            w.write_char(c.into())?;
        }
        for _ in stored.max(1)..=frac {
            w.write_char('0')?;
        }
    }

    let exp = if digits.is_empty() { 0 } else { point - 1 };
    let sign = if exp < 0 { '-' } else { '+' };
    write!(w, "{e}{sign}{:02}", exp.unsigned_abs())
}

fn write_digits_fixed<W: Write + ?Sized>(w: &mut W, digits: &Digits) -> fmt::Result {
    let len = i32::try_from(digits.as_bytes().len()).unwrap_or(i32::MAX);
    let frac = usize::try_from(len - digits.point()).unwrap_or(0);
    write_fixed(w, digits.as_bytes(), digits.point(), frac)
}

fn write_digits_exp<W: Write + ?Sized>(w: &mut W, digits: &Digits, e: char) -> fmt::Result {
    let frac = digits.as_bytes().len().saturating_sub(1);
    write_exp(w, digits.as_bytes(), digits.point(), frac, e)
}

/// `%b`: decimal significand times a power of two
fn write_binary<W: Write + ?Sized>(w: &mut W, bits: u16) -> fmt::Result {
    let biased = i32::from(bits >> SHIFT);
    let frac = bits & FRAC_MASK;

    let (significand, exp) = if biased == 0 {
        (frac, 1 - BIAS)
    } else {
        (frac | 1 << SHIFT, biased - BIAS)
    };

    #[allow(clippy::cast_possible_wrap)]
    let exp = exp - SHIFT as i32;
    let sign = if exp < 0 { '-' } else { '+' };
    write!(w, "{significand}p{sign}{}", exp.unsigned_abs())
}

/// `%f` with a given number of fractional digits
#[allow(clippy::cast_possible_truncation)]
fn write_fixed_precision<W: Write + ?Sized>(w: &mut W, bits: u16, precision: usize) -> fmt::Result {
    let n = match 24usize.checked_sub(precision) {
        Some(places) => round_to_unit(dec24(bits), 10u128.pow(places as u32)),
        None => dec24(bits),
    };

    let digits = Digits::new(n, 24);
    write_fixed(w, digits.as_bytes(), digits.point(), precision)
}

/// `%e` with a given number of digits after the point
#[allow(clippy::cast_possible_truncation)]
fn write_exp_precision<W: Write + ?Sized>(w: &mut W, bits: u16, precision: usize, e: char) -> fmt::Result {
    let n = dec24(bits);

    // Keep one more significant digit than the precision
    let n = match n.checked_ilog10() {
        Some(log) if log as usize > precision => round_to_unit(n, 10u128.pow(log - precision as u32)),
        _ => n,
    };

    let digits = Digits::new(n, 24);
    write_exp(w, digits.as_bytes(), digits.point(), precision, e)
}

/// `%g` with a given number of significant digits
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
fn write_general_precision<W: Write + ?Sized>(w: &mut W, bits: u16, precision: usize, e: char) -> fmt::Result {
    let precision = precision.max(1);

    let mut d = Decimal::from_u64(fix24(bits).unsigned_abs());
    d.shift(-24);
    d.round(precision);

    let digits = d.digits();
    let point = d.decimal_point();
    let nd = digits.len() as i32;

    // %e is used if the exponent from the conversion is less than -4 or
    // greater than or equal to the precision.  Trailing zeros are removed.
    let mut eprec = precision as i32;
    if eprec > nd && nd >= point {
        eprec = nd;
    }

    let exp = point - 1;

    if exp < -4 || exp >= eprec {
        let frac = precision.min(digits.len()).saturating_sub(1);
        return write_exp(w, digits, point, frac, e);
    }

    let kept = if precision as i32 > point { nd } else { precision as i32 };
    write_fixed(w, digits, point, (kept - point).max(0) as usize)
}

/// Hexadecimal digit
fn nibble(x: u32, upper: bool) -> char {
    let c = char::from_digit(x & 0xF, 16).unwrap_or('0');
    if upper {
        c.to_ascii_uppercase()
    } else {
        c
    }
}

/// Shift right by `drop` bits, rounding to nearest, ties to even, and shift
/// back
const fn round_bits(x: u32, drop: u32) -> u32 {
    let half = 1 << (drop - 1);
    let q = x >> drop;
    let r = x & ((1 << drop) - 1);
    let up = r > half || r == half && q & 1 == 1;
    (q + up as u32) << drop
}

/// `%x`: hexadecimal significand times a power of two
fn write_hex<W: Write + ?Sized>(w: &mut W, bits: u16, precision: Option<usize>, upper: bool) -> fmt::Result {
    let (x, p) = if upper { ('X', 'P') } else { ('x', 'p') };

    if bits == 0 {
        write!(w, "0{x}0")?;

        if let Some(precision @ 1..) = precision {
            w.write_char('.')?;
            for _ in 0..precision {
                w.write_char('0')?;
            }
        }

        return write!(w, "{p}+00");
    }

    let (_, mut exp, mut significand) = split(bits);

    let nibbles = match precision {
        None if significand & 0x3FF == 0 => 0,
        None if significand & 0x3F == 0 => 1,
        None if significand & 0x3 == 0 => 2,
        None => 3,
        Some(precision @ 0..=2) => {
            #[allow(clippy::cast_possible_truncation)]
            let precision = precision as u32;
            significand = round_bits(significand, SHIFT - 4 * precision);

            // Rounding carried into a new binade
            if significand >> (SHIFT + 1) != 0 {
                significand >>= 1;
                exp += 1;
            }
            precision
        }
        Some(_) => 3,
    };

    write!(w, "0{x}1")?;

    if nibbles > 0 {
        w.write_char('.')?;
    }

    // The 10 fraction bits as 3 nibbles, the last padded with 2 zero bits
    let shifts = [6, 2];

    for i in 0..nibbles {
        let digit = match shifts.get(i as usize) {
            Some(&shift) => significand >> shift,
            None => significand << 2,
        };
        w.write_char(nibble(digit, upper))?;
    }

    if let Some(precision) = precision {
        for _ in 3..precision {
            w.write_char('0')?;
        }
    }

    let sign = if exp < 0 { '-' } else { '+' };
    write!(w, "{p}{sign}{:02}", exp.unsigned_abs())
}

impl F16 {
    /// Format into a [`String`]
    ///
    /// See [`F16::write_text`] for the meaning of the arguments.
    #[must_use]
    pub fn to_text(self, verb: Verb, precision: Option<usize>) -> String {
        Text {
            value: self,
            verb,
            precision,
        }
        .to_string()
    }

    /// Format with a verb and an optional precision
    ///
    /// NaN prints as `NaN` and infinities as `+Inf` and `-Inf` regardless
    /// of the verb.  Negative values, `-0` included, start with `-`.
    ///
    /// | Verb | `None` | `Some(n)` |
    /// |---|---|---|
    /// | [`Verb::Binary`] | exact | ignored |
    /// | [`Verb::Fixed`] | shortest round-trip | `n` digits after the point |
    /// | [`Verb::Exp`] | shortest round-trip | `n` digits after the point |
    /// | [`Verb::General`] | shortest round-trip | `n` significant digits |
    /// | [`Verb::Hex`] | exact, shortest | `n` hex digits after the point |
    ///
    /// Every rounding is to nearest, ties to even.
    ///
    /// # Errors
    ///
    /// Only errors from the writer are propagated.
    pub fn write_text<W: Write + ?Sized>(self, w: &mut W, verb: Verb, precision: Option<usize>) -> fmt::Result {
        if self.is_nan() {
            return w.write_str("NaN");
        }

        if self.is_infinite() {
            return w.write_str(if self.is_sign_negative() { "-Inf" } else { "+Inf" });
        }

        if self.is_sign_negative() {
            w.write_char('-')?;
        }

        let bits = self.abs().to_bits();

        match (verb, precision) {
            (Verb::Binary, _) => write_binary(w, bits),
            (Verb::Fixed, None) => write_digits_fixed(w, &shortest(bits, 25)),
            (Verb::Fixed, Some(precision)) => write_fixed_precision(w, bits, precision),
            (Verb::Exp, None) => write_digits_exp(w, &shortest(bits, 30), 'e'),
            (Verb::ExpUpper, None) => write_digits_exp(w, &shortest(bits, 30), 'E'),
            (Verb::Exp, Some(precision)) => write_exp_precision(w, bits, precision, 'e'),
            (Verb::ExpUpper, Some(precision)) => write_exp_precision(w, bits, precision, 'E'),
            (Verb::General | Verb::GeneralUpper, None) if bits == 0 => w.write_char('0'),
            (Verb::General, None) if bits <= GENERAL_SCI_MAX => write_digits_exp(w, &shortest(bits, 30), 'e'),
            (Verb::GeneralUpper, None) if bits <= GENERAL_SCI_MAX => {
                write_digits_exp(w, &shortest(bits, 30), 'E')
            }
            (Verb::General | Verb::GeneralUpper, None) => write_digits_fixed(w, &shortest(bits, 25)),
            (Verb::General, Some(precision)) => write_general_precision(w, bits, precision, 'e'),
            (Verb::GeneralUpper, Some(precision)) => write_general_precision(w, bits, precision, 'E'),
            (Verb::Hex, _) => write_hex(w, bits, precision, false),
            (Verb::HexUpper, _) => write_hex(w, bits, precision, true),
        }
    }

    /// Adapter from [`fmt::Formatter`] flags
    ///
    /// Finite values honor width, fill, alignment, `+`, and sign-aware zero
    /// padding.  NaN and infinities are only padded.
    fn pad(self, f: &mut fmt::Formatter<'_>, verb: Verb, precision: Option<usize>) -> fmt::Result {
        if !self.is_finite() {
            return pad_special(f, &self.to_text(verb, None));
        }

        let body = self.abs().to_text(verb, precision);
        f.pad_integral(self.is_sign_positive(), "", &body)
    }
}

/// Pad without truncating to the precision, which [`fmt::Formatter::pad`]
/// would do
fn pad_special(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let padding = f.width().unwrap_or(0).saturating_sub(text.len());

    let (before, after) = match f.align() {
        Some(fmt::Alignment::Left) => (0, padding),
        Some(fmt::Alignment::Center) => (padding / 2, padding - padding / 2),
        Some(fmt::Alignment::Right) | None => (padding, 0),
    };

    let fill = f.fill();

    for _ in 0..before {
        f.write_char(fill)?;
    }

    f.write_str(text)?;

    for _ in 0..after {
        f.write_char(fill)?;
    }

    Ok(())
}

/// [`F16::write_text`] as a [`fmt::Display`]
struct Text {
    value: F16,
    verb: Verb,
    precision: Option<usize>,
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.write_text(f, self.verb, self.precision)
    }
}

impl fmt::Display for F16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            None => self.pad(f, Verb::General, None),
            precision => self.pad(f, Verb::Fixed, precision),
        }
    }
}

impl fmt::Debug for F16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::LowerExp for F16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pad(f, Verb::Exp, f.precision())
    }
}

impl fmt::UpperExp for F16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pad(f, Verb::ExpUpper, f.precision())
    }
}

impl fmt::LowerHex for F16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pad(f, Verb::Hex, f.precision())
    }
}

impl fmt::UpperHex for F16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pad(f, Verb::HexUpper, f.precision())
    }
}

impl fmt::Binary for F16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pad(f, Verb::Binary, None)
    }
}
