//! Manual trig calculator: a number plus a unit mode in, sin/cos/tan out.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, ValueEnum, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    pub fn toggle(&self) -> Self {
        match self {
            AngleUnit::Degrees => AngleUnit::Radians,
            AngleUnit::Radians => AngleUnit::Degrees,
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            AngleUnit::Degrees => "DEG",
            AngleUnit::Radians => "RAD",
        }
    }
}

/// Tangent is undefined where cosine vanishes; an explicit sentinel keeps
/// infinities out of the display path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tangent {
    Value(f64),
    Undefined,
}

impl fmt::Display for Tangent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tangent::Value(value) => write!(f, "{:.4}", value),
            Tangent::Undefined => write!(f, "Undefined"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalcResult {
    /// The evaluated input, as radians, to feed back into the shared angle.
    pub radians: f64,
    pub sin: f64,
    pub cos: f64,
    pub tan: Tangent,
}

const COS_ZERO_TOLERANCE: f64 = 1e-10;

/// Evaluate a raw field value in the given unit. Non-numeric input yields
/// `None`; the caller leaves its state untouched.
pub fn evaluate(input: &str, unit: AngleUnit) -> Option<CalcResult> {
    let value: f64 = input.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    let radians = match unit {
        AngleUnit::Degrees => value.to_radians(),
        AngleUnit::Radians => value,
    };

    let sin = radians.sin();
    let cos = radians.cos();
    let tan = if cos.abs() < COS_ZERO_TOLERANCE {
        Tangent::Undefined
    } else {
        Tangent::Value(radians.tan())
    };

    Some(CalcResult {
        radians,
        sin,
        cos,
        tan,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ninety_degrees_has_undefined_tangent() {
        let result = evaluate("90", AngleUnit::Degrees).unwrap();
        assert_relative_eq!(result.sin, 1.0, epsilon = 1e-9);
        assert!(result.cos.abs() < 1e-9);
        assert_eq!(result.tan, Tangent::Undefined);
        assert_eq!(result.tan.to_string(), "Undefined");
    }

    #[test]
    fn forty_five_degrees() {
        let result = evaluate("45", AngleUnit::Degrees).unwrap();
        assert_relative_eq!(result.sin, result.cos, epsilon = 1e-12);
        assert_eq!(format!("{:.4}", result.sin), "0.7071");
        assert_eq!(result.tan.to_string(), "1.0000");
    }

    #[test]
    fn two_seventy_degrees_is_also_undefined() {
        let result = evaluate("270", AngleUnit::Degrees).unwrap();
        assert_eq!(result.tan, Tangent::Undefined);
    }

    #[test]
    fn radian_mode_passes_the_value_through() {
        let result = evaluate("1.5", AngleUnit::Radians).unwrap();
        assert_relative_eq!(result.radians, 1.5);
        assert_relative_eq!(result.sin, 1.5_f64.sin());
    }

    #[test]
    fn garbage_input_is_rejected() {
        assert!(evaluate("", AngleUnit::Degrees).is_none());
        assert!(evaluate("abc", AngleUnit::Degrees).is_none());
        assert!(evaluate("1.2.3", AngleUnit::Radians).is_none());
        assert!(evaluate("NaN", AngleUnit::Radians).is_none());
        assert!(evaluate("inf", AngleUnit::Radians).is_none());
    }

    #[test]
    fn negative_angles_are_fine() {
        let result = evaluate("-45", AngleUnit::Degrees).unwrap();
        assert_relative_eq!(result.sin, -(0.5_f64.sqrt()), epsilon = 1e-12);
    }
}
