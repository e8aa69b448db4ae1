/*!
 * Combination of the current argument pair into one display string.
 *
 * `Combiner::combine` never fails: every pair gets a result, numeric
 * or not.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// How two arguments are reduced to one result
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CombinePolicy {
    /// Sum when both arguments are numbers, concatenate otherwise
    #[default]
    NumericSum,
    /// Always concatenate the two arguments
    Concatenate,
}

impl fmt::Display for CombinePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumericSum => write!(f, "numeric_sum"),
            Self::Concatenate => write!(f, "concatenate"),
        }
    }
}

impl std::str::FromStr for CombinePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "numeric_sum" | "sum" => Ok(Self::NumericSum),
            "concatenate" | "concat" => Ok(Self::Concatenate),
            _ => Err(anyhow::anyhow!("Invalid combine policy: {}", s)),
        }
    }
}

/// Pure reduction of two arguments to one string
#[derive(Debug, Clone, Copy, Default)]
pub struct Combiner {
    policy: CombinePolicy,
}

impl Combiner {
    pub fn new(policy: CombinePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> CombinePolicy {
        self.policy
    }

    /// Combine two arguments according to the configured policy
    ///
    /// With `NumericSum`:
    /// - two integers add exactly (`"3"`, `"4"` gives `"7"`); an overflowing sum
    ///   or an integer wider than `i128` falls back to concatenation
    /// - two finite decimals add as `f64` (`"1.5"`, `"2"` gives `"3.5"`)
    /// - anything else concatenates (`"foo"`, `"bar"` gives `"foobar"`)
    pub fn combine(&self, arg1: &str, arg2: &str) -> String {
        match self.policy {
            CombinePolicy::NumericSum => {
                numeric_sum(arg1, arg2).unwrap_or_else(|| concatenate(arg1, arg2))
            }
            CombinePolicy::Concatenate => concatenate(arg1, arg2),
        }
    }
}

fn concatenate(arg1: &str, arg2: &str) -> String {
    let mut result = String::with_capacity(arg1.len() + arg2.len());
    result.push_str(arg1);
    result.push_str(arg2);
    result
}

fn numeric_sum(arg1: &str, arg2: &str) -> Option<String> {
    let (a, b) = (arg1.trim(), arg2.trim());

    if let (Ok(x), Ok(y)) = (a.parse::<i128>(), b.parse::<i128>()) {
        // Integers never take the float path, even on overflow
        return x.checked_add(y).map(|sum| sum.to_string());
    }

    // Too wide for i128; f64 would round the digits away
    if is_wide_integer(a) || is_wide_integer(b) {
        return None;
    }

    let x = parse_finite(a)?;
    let y = parse_finite(b)?;
    let sum = x + y;

    sum.is_finite().then(|| format_float(sum))
}

/// An integer literal (optional sign, ASCII digits) outside the i128 range
fn is_wide_integer(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && value.parse::<i128>().is_err()
}

/// Parse a finite float; "inf" and "NaN" spellings are not numbers here
fn parse_finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn format_float(value: f64) -> String {
    // -0.0 would print as "-0"
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}
