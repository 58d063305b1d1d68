//! String validation schemas
//!
//! A [`Schema`] carries the [`Checker`] flags and bounds for one input
//! field. Every converter in this module runs the same two-phase pipeline:
//!
//! - [`Schema::pre_check`] trims, substitutes the default value, enforces
//!   REQUIRED and folds case, recording the target [`Type`]
//! - the conversion itself (parse a number, match a pattern, ...)
//! - [`Schema::post_check`] enforces the min/max bounds for the recorded type

mod convert;
pub mod error;
mod extra;

pub use convert::{
    bool, contains_float64, contains_int, contains_string, contains_uint, float32, float64,
    float64_slice, int, int16, int32, int64, int8, int_slice, set_bool_strings, string,
    string_slice, time, uint, uint16, uint32, uint64, uint8, uint_slice,
};
pub use error::{Error, Limit, Reason, Result, ValidError};
pub use extra::{
    base32, base64, check_domain, email, hexadecimal, ip, luhn_checksum, mac, pattern,
    pattern_with_cache, url, RegexCache,
};

use crate::types::Type;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Check-ups and modifications applied to an input string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Checker(u16);

impl Checker {
    /// No flags.
    pub const NONE: Checker = Checker(0);

    /// Required; can not be empty.
    pub const REQUIRED: Checker = Checker(1);
    /// Remove all leading and trailing space.
    pub const TRIM_SPACE: Checker = Checker(1 << 1);
    /// Convert to lower case.
    pub const TO_LOWERCASE: Checker = Checker(1 << 2);
    /// Convert to upper case.
    pub const TO_UPPERCASE: Checker = Checker(1 << 3);

    const MIN_LEN: Checker = Checker(1 << 4);
    const MAX_LEN: Checker = Checker(1 << 5);

    /// Strings can not hold a number.
    pub const STRICT_STRING: Checker = Checker(1 << 6);
    /// Only letters (a-zA-Z).
    pub const ALPHA: Checker = Checker(1 << 7);
    /// Only letters and digits.
    pub const ALPHANUMERIC: Checker = Checker(1 << 8);
    /// Only ASCII characters.
    pub const ASCII: Checker = Checker(1 << 9);

    /// Protocol scheme must be http, https or ftp (URLs).
    pub const HTTP_FTP: Checker = Checker(1 << 10);
    /// The domain must resolve.
    pub const DNS: Checker = Checker(1 << 11);
    /// The domain must end in an ICANN public suffix.
    pub const TLD: Checker = Checker(1 << 12);

    pub fn contains(self, other: Checker) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn bits(self) -> u16 {
        self.0
    }
}

impl BitOr for Checker {
    type Output = Checker;

    fn bitor(self, rhs: Checker) -> Checker {
        Checker(self.0 | rhs.0)
    }
}

impl BitOrAssign for Checker {
    fn bitor_assign(&mut self, rhs: Checker) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Checker {
    type Output = Checker;

    fn bitand(self, rhs: Checker) -> Checker {
        Checker(self.0 & rhs.0)
    }
}

/// Time layout used by [`time`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeFormat {
    Rfc3339,
    /// A chrono `strftime`-style format string
    Custom(String),
}

/// A validation schema for one input field.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Value used for empty input
    pub by_default: String,

    time_fmt: TimeFormat,
    pattern_fmt: String,

    // Bounds; zero means unset
    min: i64,
    max: i64,
    min_f: f64,
    max_f: f64,

    data_type: Option<Type>,
    flags: Checker,

    /// Slice mode lets empty input through so a reader knows where to stop
    pub is_slice: bool,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new(Checker::NONE)
    }
}

impl Schema {
    /// Create a schema with the given checkers and RFC 3339 as time format
    pub fn new(flags: Checker) -> Self {
        Self {
            by_default: String::new(),
            time_fmt: TimeFormat::Rfc3339,
            pattern_fmt: String::new(),
            min: 0,
            max: 0,
            min_f: 0.0,
            max_f: 0.0,
            data_type: None,
            flags,
            is_slice: false,
        }
    }

    /// Type recorded by the last pre-check
    pub fn data_type(&self) -> Option<Type> {
        self.data_type
    }

    pub fn checker(&self) -> Checker {
        self.flags
    }

    pub fn pattern_fmt(&self) -> &str {
        &self.pattern_fmt
    }

    pub fn time_fmt(&self) -> &TimeFormat {
        &self.time_fmt
    }

    /// Replace the checker flags
    pub fn set_checker(&mut self, flags: Checker) -> &mut Self {
        self.flags = flags;
        self
    }

    pub fn set_default(&mut self, value: impl Into<String>) -> &mut Self {
        self.by_default = value.into();
        self
    }

    /// Minimum length of a string, or minimum value of a number
    pub fn set_min(&mut self, n: impl Into<Limit>) -> &mut Self {
        match n.into() {
            Limit::Int(n) => self.min = n,
            Limit::Float(n) => self.min_f = n,
        }
        self.flags |= Checker::MIN_LEN;
        self
    }

    /// Maximum length of a string, or maximum value of a number
    pub fn set_max(&mut self, n: impl Into<Limit>) -> &mut Self {
        match n.into() {
            Limit::Int(n) => self.max = n,
            Limit::Float(n) => self.max_f = n,
        }
        self.flags |= Checker::MAX_LEN;
        self
    }

    /// Both bounds at once; they share one numeric type
    pub fn set_range<L: Into<Limit>>(&mut self, min: L, max: L) -> &mut Self {
        self.set_min(min);
        self.set_max(max)
    }

    /// Message shown when a pattern does not match, instead of the expression
    pub fn set_pattern_fmt(&mut self, fmt: impl Into<String>) -> &mut Self {
        self.pattern_fmt = fmt.into();
        self
    }

    pub fn set_time_fmt(&mut self, fmt: TimeFormat) -> &mut Self {
        self.time_fmt = fmt;
        self
    }

    /// Normalize the input and apply REQUIRED and the default value.
    ///
    /// Trimming comes first. A default value is returned untouched, so case
    /// folding only applies to what the user typed, and only for textual
    /// types (lowercase wins over uppercase).
    pub fn pre_check(&mut self, input: &str, typ: Type) -> Result<String> {
        let mut value = if self.flags.contains(Checker::TRIM_SPACE) {
            input.trim().to_string()
        } else {
            input.to_string()
        };

        if value.is_empty() {
            if !self.by_default.is_empty() {
                return Ok(self.by_default.clone());
            }
            if self.flags.contains(Checker::REQUIRED) {
                return Err(Error::Required);
            }
            if !self.is_slice {
                return Err(Error::Empty);
            }
        }

        if typ.is_textual() {
            if self.flags.contains(Checker::TO_LOWERCASE) {
                value = value.to_lowercase();
            } else if self.flags.contains(Checker::TO_UPPERCASE) {
                value = value.to_uppercase();
            }
        }

        self.data_type = Some(typ);
        Ok(value)
    }

    /// Check the bounds for the type recorded by [`Schema::pre_check`].
    pub fn post_check<V: Measure + ?Sized>(&self, value: &V) -> Result<()> {
        let check_min = self.flags.contains(Checker::MIN_LEN);
        let check_max = self.flags.contains(Checker::MAX_LEN);

        if self.data_type == Some(Type::Bool) || (!check_min && !check_max) {
            return Ok(());
        }
        let typ = self.data_type.ok_or(Error::TypeNotSet)?;
        let measure = value.measure();

        if typ.is_textual() {
            let len = match measure {
                Measurement::Len(n) => n as i64,
                _ => 0,
            };
            if check_min && self.min != 0 && self.min > len {
                return Err(Error::MinLen(Limit::Int(self.min)));
            }
            if check_max && self.max != 0 && self.max < len {
                return Err(Error::MaxLen(Limit::Int(self.max)));
            }
        } else if typ.is_signed() {
            let n = match measure {
                Measurement::Signed(n) => n,
                _ => 0,
            };
            if check_min && self.min != 0 && self.min > n {
                return Err(Error::MinLen(Limit::Int(self.min)));
            }
            if check_max && self.max != 0 && self.max < n {
                return Err(Error::MaxLen(Limit::Int(self.max)));
            }
        } else if typ.is_unsigned() {
            let n = match measure {
                Measurement::Unsigned(n) => n,
                _ => 0,
            };
            // A negative bound can never be broken by an unsigned value
            if check_min && self.min > 0 && self.min as u64 > n {
                return Err(Error::MinLen(Limit::Int(self.min)));
            }
            if check_max && self.max != 0 && (self.max < 0 || (self.max as u64) < n) {
                return Err(Error::MaxLen(Limit::Int(self.max)));
            }
        } else if typ.is_float() {
            let n = match measure {
                Measurement::Float(n) => n,
                _ => 0.0,
            };
            if check_min && self.min_f != 0.0 && self.min_f > n {
                return Err(Error::MinLen(Limit::Float(self.min_f)));
            }
            if check_max && self.max_f != 0.0 && self.max_f < n {
                return Err(Error::MaxLen(Limit::Float(self.max_f)));
            }
        }

        Ok(())
    }
}

/// What a bound is compared against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// Length in characters
    Len(usize),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    None,
}

/// Values that [`Schema::post_check`] knows how to bound.
pub trait Measure {
    fn measure(&self) -> Measurement;
}

impl Measure for str {
    fn measure(&self) -> Measurement {
        Measurement::Len(self.chars().count())
    }
}

impl Measure for String {
    fn measure(&self) -> Measurement {
        self.as_str().measure()
    }
}

impl Measure for bool {
    fn measure(&self) -> Measurement {
        Measurement::None
    }
}

macro_rules! measure_as {
    ($variant:ident, $target:ty: $($t:ty),*) => {
        $(impl Measure for $t {
            fn measure(&self) -> Measurement {
                Measurement::$variant(*self as $target)
            }
        })*
    };
}

measure_as!(Signed, i64: i8, i16, i32, i64, isize);
measure_as!(Unsigned, u64: u8, u16, u32, u64, usize);
measure_as!(Float, f64: f32, f64);
