use crate::utils::error::{AdapterError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric input as callers hand it over: a JSON number or a string holding one.
///
/// Identifiers and foreign keys go out as integers, measures as floats; the coercion
/// happens before anything is sent so a bad value never reaches the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Numeric {
    /// Integer coercion. Strings use their leading integer part ("12abc" is 12),
    /// floats are truncated toward zero.
    pub fn as_id(&self, field: &str) -> Result<i64> {
        match self {
            Numeric::Int(n) => Ok(*n),
            Numeric::Float(f) if f.is_finite() => Ok(f.trunc() as i64),
            Numeric::Float(_) => Err(self.invalid(field, "not a finite number")),
            Numeric::Text(s) => {
                leading_integer(s.trim()).ok_or_else(|| self.invalid(field, "not an integer"))
            }
        }
    }

    pub fn as_number(&self, field: &str) -> Result<f64> {
        let value = match self {
            Numeric::Int(n) => *n as f64,
            Numeric::Float(f) => *f,
            Numeric::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| self.invalid(field, "not a number"))?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(self.invalid(field, "not a finite number"))
        }
    }

    /// Zero and empty text count as "no value" for optional references.
    pub fn is_blank(&self) -> bool {
        match self {
            Numeric::Int(n) => *n == 0,
            Numeric::Float(f) => *f == 0.0,
            Numeric::Text(s) => s.trim().is_empty(),
        }
    }

    fn invalid(&self, field: &str, reason: &str) -> AdapterError {
        AdapterError::InvalidValue {
            field: field.to_string(),
            value: self.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Coerces a patch value as a float, keeping an explicit null as `Some(None)`.
pub fn patch_number(value: &Option<Option<Numeric>>, field: &str) -> Result<Option<Option<f64>>> {
    value
        .as_ref()
        .map(|inner| inner.as_ref().map(|n| n.as_number(field)).transpose())
        .transpose()
}

/// Coerces a patch value as an integer id, keeping an explicit null as `Some(None)`.
pub fn patch_id(value: &Option<Option<Numeric>>, field: &str) -> Result<Option<Option<i64>>> {
    value
        .as_ref()
        .map(|inner| inner.as_ref().map(|n| n.as_id(field)).transpose())
        .transpose()
}

fn leading_integer(s: &str) -> Option<i64> {
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Int(n) => write!(f, "{}", n),
            Numeric::Float(v) => write!(f, "{}", v),
            Numeric::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::Int(value)
    }
}

impl From<i32> for Numeric {
    fn from(value: i32) -> Self {
        Numeric::Int(value.into())
    }
}

impl From<u32> for Numeric {
    fn from(value: u32) -> Self {
        Numeric::Int(value.into())
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric::Float(value)
    }
}

impl From<&str> for Numeric {
    fn from(value: &str) -> Self {
        Numeric::Text(value.to_string())
    }
}

impl From<String> for Numeric {
    fn from(value: String) -> Self {
        Numeric::Text(value)
    }
}

impl From<&String> for Numeric {
    fn from(value: &String) -> Self {
        Numeric::Text(value.clone())
    }
}
