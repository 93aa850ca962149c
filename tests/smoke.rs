// This file is part of the float16 project.
//
// Copyright (C) 2024-2025 Chen-Pang He <jdh8@skymizer.com>
//
// This Source Code Form is subject to the terms of the Mozilla
// Public License v. 2.0. If a copy of the MPL was not distributed
// with this file, You can obtain one at http://mozilla.org/MPL/2.0/.

use float16::{ErrorKind, F16, Verb, VerbError};
use num_traits::float::FloatCore;
use num_traits::{Bounded, FromPrimitive, Num, NumCast, One, Signed, ToPrimitive, Zero};
use yare::parameterized;

#[parameterized(
    half_f = { 0x3800, 'f', None, "0.5" },
    half_f2 = { 0x3800, 'f', Some(2), "0.50" },
    half_f0 = { 0x3800, 'f', Some(0), "0" },
    half_e = { 0x3800, 'e', None, "5e-01" },
    half_e3 = { 0x3800, 'e', Some(3), "5.000e-01" },
    half_g = { 0x3800, 'g', None, "0.5" },
    half_x = { 0x3800, 'x', None, "0x1p-01" },
    half_x2 = { 0x3800, 'x', Some(2), "0x1.00p-01" },
    half_b = { 0x3800, 'b', None, "1024p-11" },

    zero_f = { 0x0000, 'f', None, "0" },
    zero_f2 = { 0x0000, 'f', Some(2), "0.00" },
    zero_e = { 0x0000, 'e', None, "0e+00" },
    zero_e3 = { 0x0000, 'e', Some(3), "0.000e+00" },
    zero_g = { 0x0000, 'g', None, "0" },
    zero_g3 = { 0x0000, 'g', Some(3), "0" },
    zero_x = { 0x0000, 'x', None, "0x0p+00" },
    zero_x2 = { 0x0000, 'x', Some(2), "0x0.00p+00" },
    zero_b = { 0x0000, 'b', None, "0p-24" },

    neg_zero_f = { 0x8000, 'f', None, "-0" },
    neg_zero_e = { 0x8000, 'e', None, "-0e+00" },
    neg_zero_g = { 0x8000, 'g', None, "-0" },
    neg_zero_x = { 0x8000, 'x', None, "-0x0p+00" },

    max_f = { 0x7BFF, 'f', None, "65504" },
    max_f2 = { 0x7BFF, 'f', Some(2), "65504.00" },
    max_e = { 0x7BFF, 'e', None, "6.55e+04" },
    max_upper_e = { 0x7BFF, 'E', None, "6.55E+04" },
    max_e0 = { 0x7BFF, 'e', Some(0), "7e+04" },
    max_g = { 0x7BFF, 'g', None, "65504" },
    max_g1 = { 0x7BFF, 'g', Some(1), "7e+04" },
    max_g3 = { 0x7BFF, 'g', Some(3), "6.55e+04" },
    max_upper_g3 = { 0x7BFF, 'G', Some(3), "6.55E+04" },
    max_g8 = { 0x7BFF, 'g', Some(8), "65504" },
    max_x = { 0x7BFF, 'x', None, "0x1.ffcp+15" },
    max_upper_x = { 0x7BFF, 'X', None, "0X1.FFCP+15" },
    max_x0 = { 0x7BFF, 'x', Some(0), "0x1p+16" },
    max_x5 = { 0x7BFF, 'x', Some(5), "0x1.ffc00p+15" },
    max_b = { 0x7BFF, 'b', None, "2047p+5" },
    min_f = { 0xFBFF, 'f', None, "-65504" },

    above_one_f = { 0x3C01, 'f', None, "1.001" },
    above_one_f2 = { 0x3C01, 'f', Some(2), "1.00" },
    above_one_e = { 0x3C01, 'e', None, "1.001e+00" },
    above_one_g = { 0x3C01, 'g', None, "1.001" },
    above_one_g8 = { 0x3C01, 'g', Some(8), "1.0009766" },
    above_one_x = { 0x3C01, 'x', None, "0x1.004p+00" },
    above_one_x2 = { 0x3C01, 'x', Some(2), "0x1.00p+00" },
    above_one_b = { 0x3C01, 'b', None, "1025p-10" },

    third_f = { 0x3555, 'f', None, "0.3333" },
    third_e3 = { 0x3555, 'e', Some(3), "3.333e-01" },
    third_g1 = { 0x3555, 'g', Some(1), "0.3" },
    third_g3 = { 0x3555, 'g', Some(3), "0.333" },
    third_g8 = { 0x3555, 'g', Some(8), "0.33325195" },
    third_x1 = { 0x3555, 'x', Some(1), "0x1.5p-02" },
    third_x2 = { 0x3555, 'x', Some(2), "0x1.55p-02" },

    tenth_f = { 0x2E66, 'f', None, "0.1" },
    tenth_f10 = { 0x2E66, 'f', Some(10), "0.0999755859" },
    tenth_e = { 0x2E66, 'e', None, "1e-01" },
    tenth_e3 = { 0x2E66, 'e', Some(3), "9.998e-02" },
    tenth_g8 = { 0x2E66, 'g', Some(8), "0.099975586" },
    tenth_x = { 0x2E66, 'x', None, "0x1.998p-04" },
    tenth_x0 = { 0x2E66, 'x', Some(0), "0x1p-03" },
    tenth_x1 = { 0x2E66, 'x', Some(1), "0x1.ap-04" },
    tenth_x2 = { 0x2E66, 'x', Some(2), "0x1.9ap-04" },
    tenth_b = { 0x2E66, 'b', None, "1638p-14" },

    hundred_f = { 0x5640, 'f', None, "100" },
    hundred_e = { 0x5640, 'e', None, "1e+02" },
    hundred_g1 = { 0x5640, 'g', Some(1), "1e+02" },
    hundred_g3 = { 0x5640, 'g', Some(3), "100" },
    hundred_x = { 0x5640, 'x', None, "0x1.9p+06" },

    below_one_f = { 0x3BFF, 'f', None, "0.9995" },
    below_one_f2 = { 0x3BFF, 'f', Some(2), "1.00" },
    below_one_f0 = { 0x3BFF, 'f', Some(0), "1" },
    below_one_e0 = { 0x3BFF, 'e', Some(0), "1e+00" },
    below_one_g1 = { 0x3BFF, 'g', Some(1), "1" },
    below_one_x0 = { 0x3BFF, 'x', Some(0), "0x1p+00" },
    below_one_x1 = { 0x3BFF, 'x', Some(1), "0x1.0p+00" },

    tie_odd_f0 = { 0x3E00, 'f', Some(0), "2" },
    tie_odd_g1 = { 0x3E00, 'g', Some(1), "2" },
    tie_odd_x0 = { 0x3E00, 'x', Some(0), "0x1p+01" },
    tie_even_f0 = { 0x4100, 'f', Some(0), "2" },
    tie_even_e0 = { 0x4100, 'e', Some(0), "2e+00" },
    tie_even_x0 = { 0x4100, 'x', Some(0), "0x1p+01" },

    tiny_f = { 0x0001, 'f', None, "0.00000006" },
    tiny_f2 = { 0x0001, 'f', Some(2), "0.00" },
    tiny_e = { 0x0001, 'e', None, "6e-08" },
    tiny_e3 = { 0x0001, 'e', Some(3), "5.960e-08" },
    tiny_g = { 0x0001, 'g', None, "6e-08" },
    tiny_g3 = { 0x0001, 'g', Some(3), "5.96e-08" },
    tiny_g8 = { 0x0001, 'g', Some(8), "5.9604645e-08" },
    tiny_x = { 0x0001, 'x', None, "0x1p-24" },
    tiny_b = { 0x0001, 'b', None, "1p-24" },

    subnormal_max_f = { 0x03FF, 'f', None, "0.000061" },
    subnormal_max_e = { 0x03FF, 'e', None, "6.1e-05" },
    subnormal_max_e3 = { 0x03FF, 'e', Some(3), "6.098e-05" },
    subnormal_max_g = { 0x03FF, 'g', None, "6.1e-05" },
    subnormal_max_x = { 0x03FF, 'x', None, "0x1.ff8p-15" },
    subnormal_max_x0 = { 0x03FF, 'x', Some(0), "0x1p-14" },
    subnormal_max_b = { 0x03FF, 'b', None, "1023p-24" },

    general_sci_f = { 0x068D, 'f', None, "0.00009996" },
    general_sci_g = { 0x068D, 'g', None, "9.996e-05" },
    general_sci_upper_g = { 0x068D, 'G', None, "9.996E-05" },
    general_sci_g1 = { 0x068D, 'g', Some(1), "0.0001" },
    general_sci_g8 = { 0x068D, 'g', Some(8), "9.9956989e-05" },
    general_sci_b = { 0x068D, 'b', None, "1677p-24" },
    general_fixed_g = { 0x068E, 'g', None, "0.0001" },
    general_fixed_e = { 0x068E, 'e', None, "1e-04" },
    general_fixed_g8 = { 0x068E, 'g', Some(8), "0.00010001659" },

    power_of_two_f = { 0x2400, 'f', None, "0.015625" },
    power_of_two_g = { 0x2400, 'g', None, "0.015625" },
    power_of_two_e = { 0x7400, 'e', None, "1.6384e+04" },
    power_of_two_upper_g = { 0x7400, 'G', None, "16384" },

    nan_f = { 0x7E00, 'f', None, "NaN" },
    nan_e3 = { 0x7E00, 'e', Some(3), "NaN" },
    nan_x = { 0x7E00, 'x', None, "NaN" },
    neg_nan_g = { 0xFE00, 'g', None, "NaN" },
    inf_g = { 0x7C00, 'g', None, "+Inf" },
    inf_f2 = { 0x7C00, 'f', Some(2), "+Inf" },
    neg_inf_e = { 0xFC00, 'e', None, "-Inf" },
    neg_inf_b = { 0xFC00, 'b', None, "-Inf" },
)]
fn to_text(bits: u16, verb: char, precision: Option<usize>, expected: &str) {
    let verb = Verb::try_from(verb).unwrap();
    let x = F16::from_bits(bits);
    assert_eq!(x.to_text(verb, precision), expected);

    let mut text = String::from("> ");
    x.write_text(&mut text, verb, precision).unwrap();
    assert_eq!(text, format!("> {expected}"));
}

#[parameterized(
    display = { "{}", 0x3800, "0.5" },
    display_plus = { "{:+}", 0x3800, "+0.5" },
    display_width = { "{:8}", 0x3800, "     0.5" },
    display_left = { "{:<8}", 0x3800, "0.5     " },
    display_center = { "{:^7}", 0x3800, "  0.5  " },
    display_zero_pad = { "{:08}", 0xB800, "-00000.5" },
    display_precision = { "{:.2}", 0x3800, "0.50" },
    display_neg_zero = { "{}", 0x8000, "-0" },
    debug = { "{:?}", 0x2E66, "0.1" },
    lower_exp = { "{:e}", 0x5640, "1e+02" },
    lower_exp_precision = { "{:.6e}", 0x3800, "5.000000e-01" },
    upper_exp = { "{:E}", 0x7BFF, "6.55E+04" },
    lower_hex = { "{:x}", 0x3800, "0x1p-01" },
    lower_hex_precision = { "{:.1x}", 0x3800, "0x1.0p-01" },
    upper_hex = { "{:X}", 0x3800, "0X1P-01" },
    binary = { "{:b}", 0x0000, "0p-24" },
    nan = { "{}", 0x7E00, "NaN" },
    nan_width = { "{:>5}", 0x7E00, "  NaN" },
    nan_precision = { "{:.1}", 0x7E00, "NaN" },
    inf = { "{}", 0x7C00, "+Inf" },
    neg_inf_left = { "{:<6}", 0xFC00, "-Inf  " },
)]
fn formatter(pattern: &str, bits: u16, expected: &str) {
    let x = F16::from_bits(bits);

    let actual = match pattern {
        "{}" => format!("{x}"),
        "{:+}" => format!("{x:+}"),
        "{:8}" => format!("{x:8}"),
        "{:<8}" => format!("{x:<8}"),
        "{:^7}" => format!("{x:^7}"),
        "{:08}" => format!("{x:08}"),
        "{:.2}" => format!("{x:.2}"),
        "{:?}" => format!("{x:?}"),
        "{:e}" => format!("{x:e}"),
        "{:.6e}" => format!("{x:.6e}"),
        "{:E}" => format!("{x:E}"),
        "{:x}" => format!("{x:x}"),
        "{:.1x}" => format!("{x:.1x}"),
        "{:X}" => format!("{x:X}"),
        "{:b}" => format!("{x:b}"),
        "{:>5}" => format!("{x:>5}"),
        "{:.1}" => format!("{x:.1}"),
        "{:<6}" => format!("{x:<6}"),
        _ => unreachable!("{pattern}"),
    };

    assert_eq!(actual, expected);
}

#[parameterized(
    tenth = { "0.1", 0x2E66 },
    one = { "1", 0x3C00 },
    neg_two = { "-2", 0xC000 },
    plus_half = { "+.5", 0x3800 },
    exponent = { "1e2", 0x5640 },
    upper_exponent = { "1E+2", 0x5640 },
    trailing_dot = { "100.", 0x5640 },
    underscores = { "1_000", 0x63D0 },
    exponent_underscore = { "1e-1_0", 0x0000 },
    max = { "65504", 0x7BFF },
    below_overflow = { "65519", 0x7BFF },
    just_below_overflow = { "65519.999999", 0x7BFF },
    tiny = { "0.000000059604644775390625", 0x0001 },
    tiny_tie = { "0.0000000298023223876953125", 0x0000 },
    above_tiny_tie = { "0.00000002980232238769531250001", 0x0001 },
    underflow = { "1e-9", 0x0000 },
    huge_negative_exponent = { "1e-100000", 0x0000 },
    neg_zero = { "-0", 0x8000 },
    one_tie = { "1.00048828125", 0x3C00 },
    above_one_tie = { "1.0004882812500001", 0x3C01 },
    many_digits = { "0.33325195312500000000000000000000000000000000000000000000000000000000001", 0x3555 },
    hex_max = { "0x1.ffcp+15", 0x7BFF },
    hex_truncated = { "0x1.ffcfp+15", 0x7BFF },
    hex_upper = { "0X1.FFCP+15", 0x7BFF },
    hex_tiny = { "0x1p-24", 0x0001 },
    hex_underscore = { "0x_1p-24", 0x0001 },
    hex_neg_zero = { "-0x0p+00", 0x8000 },
    inf = { "inf", 0x7C00 },
    infinity = { "-Infinity", 0xFC00 },
    upper_inf = { "+INF", 0x7C00 },
    nan = { "nan", 0x7E00 },
)]
fn parse(text: &str, bits: u16) {
    assert_eq!(F16::parse(text).unwrap().to_bits(), bits);
    assert_eq!(text.parse::<F16>().unwrap().to_bits(), bits);
}

#[parameterized(
    empty = { "" },
    space = { " " },
    sign = { "+" },
    nan_fraction = { "NaN.0" },
    infx = { "infx" },
    infinityx = { "infinityx" },
    hex_prefix = { "0x" },
    hex_dot = { "0x." },
    hex_no_digits = { "0x.p" },
    hex_no_exponent_digits = { "0x.0p" },
    hex_exponent_sign = { "0x.0p+" },
    hex_exponent_minus = { "0x.0p-" },
    hex_p = { "0x0p" },
    hex_p_plus = { "0x0p+" },
    hex_p_minus = { "0x0p-" },
    hex_without_exponent = { "0x1.8" },
    hex_two_dots = { "0x1.2.3p0" },
    hex_trailing = { "0x1p0x" },
    underscore_before_exponent = { "1_e2" },
    exponent = { "1e" },
    trailing_underscore = { "1_" },
    leading_underscore = { "_1" },
    double_underscore = { "1__0" },
    two_dots = { "1.2.3" },
    trailing_space = { "1 " },
)]
fn parse_syntax_error(text: &str) {
    let error = F16::parse(text).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Syntax);
    assert_eq!(error.func(), "F16::parse");
    assert_eq!(error.text(), text);
    assert_eq!(error.value().to_bits(), 0);
}

#[parameterized(
    overflow = { "65520", false },
    exponent = { "6.552e4", false },
    large = { "1e5", false },
    hex = { "0x1.ffep+15", false },
    negative = { "-65520", true },
    huge_exponent = { "-1e100000", true },
)]
fn parse_range_error(text: &str, negative: bool) {
    let error = F16::parse(text).unwrap_err();
    let expected = if negative { F16::NEG_INFINITY } else { F16::INFINITY };

    assert_eq!(error.kind(), ErrorKind::Range);
    assert_eq!(error.value().to_bits(), expected.to_bits());
}

#[test]
fn parse_error_message() {
    let error = F16::parse("65520").unwrap_err();
    assert_eq!(error.to_string(), r#"F16::parse: parsing "65520": value out of range"#);

    let error = F16::parse("1e").unwrap_err();
    assert_eq!(error.to_string(), r#"F16::parse: parsing "1e": invalid syntax"#);
}

#[test]
fn verb() {
    for c in ['b', 'f', 'e', 'E', 'g', 'G', 'x', 'X'] {
        let verb = Verb::try_from(c).unwrap();
        assert_eq!(char::from(verb), c);
        assert_eq!(verb.to_string(), c.to_string());
    }

    assert_eq!(Verb::try_from('q'), Err(VerbError('q')));
    assert_eq!(VerbError('q').to_string(), "unknown format verb 'q'");
}

#[test]
fn num_traits() {
    let from = |bits| F16::from_bits(bits);

    assert_eq!(F16::zero().to_bits(), 0);
    assert!(Zero::is_zero(&F16::NEG_ZERO));
    assert_eq!(F16::one().to_bits(), 0x3C00);
    assert_eq!(<F16 as Bounded>::max_value().to_bits(), 0x7BFF);
    assert_eq!(<F16 as Bounded>::min_value().to_bits(), 0xFBFF);

    assert_eq!(F16::from_str_radix("1.5", 10).unwrap().to_bits(), 0x3E00);
    assert_eq!(F16::from_str_radix("1.5", 16).unwrap_err().kind(), ErrorKind::Syntax);

    assert_eq!(F16::from_i64(-3).unwrap().to_bits(), 0xC200);
    assert_eq!(F16::from_u64(2049).unwrap().to_bits(), 0x6800);
    assert_eq!(F16::from_u64(65520).unwrap().to_bits(), 0x7C00);
    assert_eq!(F16::from_i128(-65504).unwrap().to_bits(), 0xFBFF);
    assert_eq!(<F16 as NumCast>::from(3u8).unwrap().to_bits(), 0x4200);

    assert_eq!(from(0x4100).to_i64(), Some(2));
    assert_eq!(from(0xC100).to_i64(), Some(-2));
    assert_eq!(from(0xC100).to_u64(), None);
    assert_eq!(F16::NAN.to_i64(), None);
    assert_eq!(ToPrimitive::to_f64(&from(0x2E66)), Some(0.099_975_585_937_5));

    assert_eq!(Signed::abs_sub(&from(0x4200), &F16::ONE).to_bits(), 0x4000);
    assert_eq!(Signed::abs_sub(&F16::ONE, &from(0x4200)).to_bits(), 0);
    assert!(Signed::is_negative(&F16::NEG_ZERO));
    assert!(!Signed::is_positive(&F16::NAN));
    assert_eq!(Signed::signum(&F16::NEG_ZERO).to_bits(), 0xBC00);

    assert_eq!(FloatCore::integer_decode(F16::ONE), (1024, -10, 1));
    assert_eq!(FloatCore::integer_decode(from(0x8001)), (2, -25, -1));
    assert_eq!(FloatCore::integer_decode(F16::MAX), (2047, 5, 1));
    assert_eq!(FloatCore::max(F16::NAN, F16::ONE).to_bits(), 0x3C00);
    assert_eq!(FloatCore::min(F16::ONE, F16::NAN).to_bits(), 0x3C00);
    assert_eq!(FloatCore::classify(from(0x0001)), core::num::FpCategory::Subnormal);
    assert_eq!(<F16 as FloatCore>::epsilon().to_bits(), F16::EPSILON.to_bits());
}

#[test]
fn constants() {
    assert_eq!(F16::MAX.to_f64(), 65504.0);
    assert_eq!(F16::MIN_POSITIVE.to_f64(), libm::exp2(-14.0));
    assert_eq!(F16::MIN_POSITIVE_SUBNORMAL.to_f64(), libm::exp2(-24.0));
    assert_eq!(F16::EPSILON.to_f64(), libm::exp2(-10.0));
    assert_eq!(F16::ONE.negate().to_bits(), F16::NEG_ONE.to_bits());
    assert!(F16::NAN.is_nan());
    assert_eq!(F16::MANTISSA_DIGITS, 11);
    assert_eq!(F16::MAX_EXP, 16);
    assert_eq!(F16::MIN_EXP, -13);

    assert_eq!(<F16 as From<i8>>::from(-3).to_bits(), 0xC200);
    assert_eq!(<F16 as From<u8>>::from(255).to_bits(), 0x5BF8);
    assert_eq!(Into::<f32>::into(F16::MAX), 65504.0);
}
