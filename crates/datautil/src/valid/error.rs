//! Validation error types

use std::fmt;
use thiserror::Error;

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A bound set on a schema, either integral or floating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Limit {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Int(n) => write!(f, "{}", n),
            Limit::Float(n) => write!(f, "{}", n),
        }
    }
}

macro_rules! limit_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Limit {
            fn from(n: $t) -> Self {
                Limit::Int(n as i64)
            }
        })*
    };
}

limit_from_int!(i8, i16, i32, i64, isize, u8, u16, u32);

macro_rules! limit_from_wide_uint {
    ($($t:ty),*) => {
        $(impl From<$t> for Limit {
            /// Saturates at `i64::MAX`.
            fn from(n: $t) -> Self {
                Limit::Int(i64::try_from(n).unwrap_or(i64::MAX))
            }
        })*
    };
}

limit_from_wide_uint!(u64, usize);

impl From<f32> for Limit {
    fn from(n: f32) -> Self {
        Limit::Float(n as f64)
    }
}

impl From<f64> for Limit {
    fn from(n: f64) -> Self {
        Limit::Float(n)
    }
}

/// Errors returned by the schema checks and the converters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Empty input, with no default and outside slice mode.
    #[error("empty string")]
    Empty,

    /// Empty input under the REQUIRED flag.
    #[error("required string")]
    Required,

    /// A bound check ran before any type was recorded.
    #[error("the type has not been set")]
    TypeNotSet,

    #[error("minimum length: {0}")]
    MinLen(Limit),

    #[error("maximum length: {0}")]
    MaxLen(Limit),

    /// A converter or validator rejected the input.
    #[error(transparent)]
    Invalid(#[from] ValidError),
}

impl Error {
    /// The rejection reason, when a converter failed.
    pub fn reason(&self) -> Option<&Reason> {
        match self {
            Error::Invalid(e) => Some(&e.reason),
            _ => None,
        }
    }
}

/// A failed validation inside a named converter.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidError {
    /// The failing function
    pub func: &'static str,
    /// The input, empty when not worth echoing
    pub input: String,
    pub reason: Reason,
}

impl ValidError {
    pub fn new(func: &'static str, input: impl Into<String>, reason: impl Into<Reason>) -> Self {
        Self {
            func,
            input: input.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.input.is_empty() {
            write!(f, "valid::{}: {}", self.func, self.reason)
        } else {
            write!(
                f,
                "valid::{}: parsing {:?}: {}",
                self.func, self.input, self.reason
            )
        }
    }
}

impl std::error::Error for ValidError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}

/// Why a converter rejected its input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Reason {
    #[error("not boolean value")]
    Bool,

    #[error("only letters are allowed (a-zA-Z)")]
    Alpha,

    #[error("only letters and numbers are allowed (a-zA-Z0-9)")]
    AlphaNum,

    #[error("only ASCII characters are allowed")]
    Ascii,

    #[error("the value is not a string")]
    NotString,

    #[error("value out of range")]
    Range,

    #[error("invalid checksum")]
    LuhnChecksum,

    #[error("invalid digit {0:?}")]
    Digit(char),

    #[error("IP address in domain")]
    IpDomain,

    #[error("no IP address")]
    NoIp,

    #[error(r#"no protocol scheme (like "http://")"#)]
    NoScheme,

    #[error("no protocol schemes for http,https,ftp")]
    HttpFtp,

    #[error("no ICANN domain: {0:?}")]
    Icann(String),

    #[error("invalid MAC address")]
    Mac,

    #[error("invalid mail address: {0}")]
    Address(&'static str),

    #[error("domain lookup failed: {0}")]
    Dns(String),

    #[error("does not match format: {0}")]
    PatternFormat(String),

    #[error("does not match expression: `{0}`")]
    PatternExpr(String),

    #[error(transparent)]
    Regex(#[from] regex::Error),

    #[error(transparent)]
    ParseInt(#[from] std::num::ParseIntError),

    #[error(transparent)]
    ParseFloat(#[from] std::num::ParseFloatError),

    #[error(transparent)]
    Time(#[from] chrono::ParseError),

    #[error(transparent)]
    Base32(#[from] data_encoding::DecodeError),

    #[error(transparent)]
    Base64(#[from] base64::DecodeError),

    #[error(transparent)]
    Url(#[from] url::ParseError),
}
