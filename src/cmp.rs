// This file is part of the float16 project.
//
// Copyright (C) 2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Comparison

use crate::detail::SIGN_MASK;
use crate::F16;
use core::cmp::Ordering;

impl F16 {
    /// Order-preserving integer key of a non-NaN value
    ///
    /// Sign-magnitude becomes two's complement, so both zeros map to 0.
    #[allow(clippy::cast_lossless)]
    pub(crate) const fn key(self) -> i32 {
        let magnitude = (self.0 & !SIGN_MASK) as i32;

        if self.is_sign_negative() {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Total comparison where NaN is less than everything else
    ///
    /// All NaNs are equal to each other, and so are ±0.  This is the order
    /// to sort by when NaNs must not poison the result.
    #[must_use]
    pub const fn compare(self, other: Self) -> Ordering {
        match (self.is_nan(), other.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => {
                let (a, b) = (self.key(), other.key());

                if a < b {
                    Ordering::Less
                } else if a > b {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            }
        }
    }
}

/// IEEE 754 equality: NaN equals nothing, and +0 equals -0
impl PartialEq for F16 {
    fn eq(&self, other: &Self) -> bool {
        !self.is_nan() && !other.is_nan() && self.key() == other.key()
    }
}

/// IEEE 754 ordering: NaN is unordered
impl PartialOrd for F16 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_nan() || other.is_nan() {
            None
        } else {
            Some(self.key().cmp(&other.key()))
        }
    }
}
