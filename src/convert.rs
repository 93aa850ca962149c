// This file is part of the float16 project.
//
// Copyright (C) 2024-2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Conversions between [`F16`] and the primitive floats

use crate::detail::{compose, split, EXP_MASK, FRAC_MASK, SHIFT, SIGN_MASK};
use crate::F16;
use core::num::FpCategory;

impl F16 {
    /// Round an `f32` to the nearest [`F16`], ties to even
    ///
    /// NaN maps to the quiet NaN with the same sign.
    #[must_use]
    pub const fn from_f32(x: f32) -> Self {
        let bits = x.to_bits();
        let negative = bits >> 31 != 0;
        #[allow(clippy::cast_possible_wrap)]
        let biased = (bits >> 23 & 0xFF) as i32;
        let frac = bits & 0x7F_FFFF;

        let sign = if negative { SIGN_MASK } else { 0 };

        Self(match biased {
            0xFF if frac != 0 => sign | Self::NAN.0,
            0xFF => sign | EXP_MASK,
            0 => compose(negative, -149, frac as u128),
            _ => compose(negative, biased - 150, (frac | 1 << 23) as u128),
        })
    }

    /// Round an `f64` to the nearest [`F16`], ties to even
    ///
    /// NaN maps to the quiet NaN with the same sign.
    #[must_use]
    pub const fn from_f64(x: f64) -> Self {
        let bits = x.to_bits();
        let negative = bits >> 63 != 0;
        #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
        let biased = (bits >> 52 & 0x7FF) as i32;
        let frac = bits & 0xF_FFFF_FFFF_FFFF;

        let sign = if negative { SIGN_MASK } else { 0 };

        Self(match biased {
            0x7FF if frac != 0 => sign | Self::NAN.0,
            0x7FF => sign | EXP_MASK,
            0 => compose(negative, -1074, frac as u128),
            _ => compose(negative, biased - 1075, (frac | 1 << 52) as u128),
        })
    }

    /// Exact conversion to `f32`
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn to_f32(self) -> f32 {
        let sign = ((self.0 & SIGN_MASK) as u32) << 16;

        let magnitude = match self.classify() {
            FpCategory::Zero => 0,
            FpCategory::Infinite => 0x7F80_0000,
            FpCategory::Nan => 0x7FC0_0000 | ((self.0 & FRAC_MASK) as u32) << 13,
            _ => {
                let (_, exp, significand) = split(self.0);
                ((exp + 127) as u32) << 23 | (significand & FRAC_MASK as u32) << (23 - SHIFT)
            }
        };

        f32::from_bits(sign | magnitude)
    }

    /// Exact conversion to `f64`
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn to_f64(self) -> f64 {
        let sign = ((self.0 & SIGN_MASK) as u64) << 48;

        let magnitude = match self.classify() {
            FpCategory::Zero => 0,
            FpCategory::Infinite => 0x7FF0 << 48,
            FpCategory::Nan => 0x7FF8 << 48 | ((self.0 & FRAC_MASK) as u64) << 42,
            _ => {
                let (_, exp, significand) = split(self.0);
                let frac = (significand & FRAC_MASK as u32) as u64;
                ((exp + 1023) as u64) << 52 | frac << (52 - SHIFT)
            }
        };

        f64::from_bits(sign | magnitude)
    }
}

impl From<F16> for f32 {
    fn from(x: F16) -> Self {
        x.to_f32()
    }
}

impl From<F16> for f64 {
    fn from(x: F16) -> Self {
        x.to_f64()
    }
}

macro_rules! from_small_int {
    ($($t:ty)*) => {$(
        impl From<$t> for F16 {
            fn from(x: $t) -> Self {
                Self::from_f32(x.into())
            }
        }
    )*};
}

from_small_int!(i8 u8);
