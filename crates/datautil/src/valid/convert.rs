//! Typed converters: booleans, numbers, strings, times and their slices

use super::error::{Error, Reason, Result, ValidError};
use super::{Checker, Measure, Schema, TimeFormat};
use crate::types::Type;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::RwLock;

// == bool

/// Extra strings accepted by [`bool`]
static BOOL_STRINGS: Lazy<RwLock<HashMap<String, bool>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Replace the extra strings accepted as booleans.
///
/// Every key is also registered in upper case and, when longer than one
/// character, in title case.
pub fn set_bool_strings(strings: &HashMap<String, bool>) {
    let mut table = HashMap::with_capacity(strings.len() * 3);

    for (key, &value) in strings {
        table.insert(key.clone(), value);
        table.insert(key.to_uppercase(), value);
        if key.chars().count() > 1 {
            table.insert(title_case(key), value);
        }
    }

    match BOOL_STRINGS.write() {
        Ok(mut guard) => *guard = table,
        Err(poisoned) => *poisoned.into_inner() = table,
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn extra_bool(s: &str) -> Option<bool> {
    let table = match BOOL_STRINGS.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    table.get(s).copied()
}

/// Check if the input is a boolean value.
///
/// Accepts "1", "t", "true", "y", "yes" as true and "0", "f", "false", "n",
/// "no" as false, in lower, upper and title case, plus the extra strings set
/// with [`set_bool_strings`].
pub fn bool(s: &mut Schema, input: &str) -> Result<bool> {
    let input = s.pre_check(input, Type::Bool)?;

    match input.as_str() {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => return Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => return Ok(false),
        "y" | "Y" | "yes" | "YES" | "Yes" => return Ok(true),
        "n" | "N" | "no" | "NO" | "No" => return Ok(false),
        _ => {}
    }

    extra_bool(&input).ok_or_else(|| ValidError::new("bool", input, Reason::Bool).into())
}

// == string

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Check if the input is a text value.
///
/// Uses the flags STRICT_STRING, ASCII, ALPHA and ALPHANUMERIC, then the
/// length bounds.
pub fn string(s: &mut Schema, input: &str) -> Result<String> {
    let input = s.pre_check(input, Type::String)?;
    let flags = s.checker();

    if flags.contains(Checker::STRICT_STRING) && input.parse::<f64>().is_ok() {
        return Err(ValidError::new("string", input, Reason::NotString).into());
    }

    if flags.contains(Checker::ASCII) && !input.is_ascii() {
        return Err(ValidError::new("string", input, Reason::Ascii).into());
    }
    if flags.contains(Checker::ALPHA) {
        if !input.chars().all(is_letter) {
            return Err(ValidError::new("string", input, Reason::Alpha).into());
        }
    } else if flags.contains(Checker::ALPHANUMERIC)
        && !input.chars().all(|c| is_letter(c) || c.is_ascii_digit())
    {
        return Err(ValidError::new("string", input, Reason::AlphaNum).into());
    }

    s.post_check(&input)?;
    Ok(input)
}

// == time

/// Check if the input is a time in the schema's format.
///
/// Custom formats without an offset are read as UTC.
pub fn time(s: &mut Schema, input: &str) -> Result<DateTime<FixedOffset>> {
    let input = s.pre_check(input, Type::Time)?;

    let parsed = match s.time_fmt() {
        TimeFormat::Rfc3339 => DateTime::parse_from_rfc3339(&input),
        TimeFormat::Custom(fmt) => DateTime::parse_from_str(&input, fmt).or_else(|err| {
            NaiveDateTime::parse_from_str(&input, fmt)
                .map(|dt| dt.and_utc().fixed_offset())
                .or_else(|_| {
                    NaiveDate::parse_from_str(&input, fmt)
                        .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc().fixed_offset())
                })
                .map_err(|_| err)
        }),
    };

    parsed.map_err(|e| ValidError::new("time", "", e).into())
}

// == numbers

fn number<T>(s: &mut Schema, input: &str, typ: Type, func: &'static str) -> Result<T>
where
    T: FromStr + Measure,
    Reason: From<T::Err>,
{
    let input = s.pre_check(input, typ)?;
    let value = input
        .parse::<T>()
        .map_err(|e| Error::from(ValidError::new(func, input.as_str(), e)))?;
    s.post_check(&value)?;
    Ok(value)
}

/// Like [`number`], but a finite literal too large for the width is out of
/// range instead of silently becoming infinity.
fn float<T>(s: &mut Schema, input: &str, typ: Type, func: &'static str) -> Result<T>
where
    T: FromStr<Err = std::num::ParseFloatError> + Measure + Into<f64> + Copy,
{
    let input = s.pre_check(input, typ)?;
    let value = input
        .parse::<T>()
        .map_err(|e| Error::from(ValidError::new(func, input.as_str(), e)))?;
    if value.into().is_infinite() && !is_infinity_literal(&input) {
        return Err(ValidError::new(func, input, Reason::Range).into());
    }
    s.post_check(&value)?;
    Ok(value)
}

fn is_infinity_literal(input: &str) -> bool {
    let digits = input.trim_start_matches(['+', '-']);
    digits.eq_ignore_ascii_case("inf") || digits.eq_ignore_ascii_case("infinity")
}

macro_rules! number_converter {
    ($($(#[$doc:meta])* $name:ident => $t:ty, $typ:expr, $parse:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(s: &mut Schema, input: &str) -> Result<$t> {
                $parse(s, input, $typ, stringify!($name))
            }
        )*
    };
}

number_converter! {
    /// Check if the input is an `isize`.
    int => isize, Type::Int, number;
    /// Check if the input is an `i8`.
    int8 => i8, Type::Int8, number;
    /// Check if the input is an `i16`.
    int16 => i16, Type::Int16, number;
    /// Check if the input is an `i32`.
    int32 => i32, Type::Int32, number;
    /// Check if the input is an `i64`.
    int64 => i64, Type::Int64, number;
    /// Check if the input is a `usize`.
    uint => usize, Type::Uint, number;
    /// Check if the input is a `u8`.
    uint8 => u8, Type::Uint8, number;
    /// Check if the input is a `u16`.
    uint16 => u16, Type::Uint16, number;
    /// Check if the input is a `u32`.
    uint32 => u32, Type::Uint32, number;
    /// Check if the input is a `u64`.
    uint64 => u64, Type::Uint64, number;
    /// Check if the input is an `f32`.
    float32 => f32, Type::Float32, float;
    /// Check if the input is an `f64`.
    float64 => f64, Type::Float64, float;
}

// == slices

/// Run `convert` over every element in slice mode, stopping at the first error.
fn each<T>(
    s: &mut Schema,
    inputs: &[&str],
    convert: fn(&mut Schema, &str) -> Result<T>,
) -> Result<Vec<T>> {
    let was_slice = s.is_slice;
    s.is_slice = true;

    let values = inputs.iter().map(|elem| convert(s, elem)).collect();

    s.is_slice = was_slice;
    values
}

/// Check that each element is an `isize`.
pub fn int_slice(s: &mut Schema, inputs: &[&str]) -> Result<Vec<isize>> {
    each(s, inputs, int)
}

/// Check that each element is a `usize`.
pub fn uint_slice(s: &mut Schema, inputs: &[&str]) -> Result<Vec<usize>> {
    each(s, inputs, uint)
}

/// Check that each element is an `f64`.
pub fn float64_slice(s: &mut Schema, inputs: &[&str]) -> Result<Vec<f64>> {
    each(s, inputs, float64)
}

/// Check that each element is a text value.
pub fn string_slice(s: &mut Schema, inputs: &[&str]) -> Result<Vec<String>> {
    each(s, inputs, string)
}

// == search

/// Check the input as an `isize` and look it up in `values`.
pub fn contains_int(s: &mut Schema, values: &[isize], input: &str) -> Result<bool> {
    let value = int(s, input)?;
    Ok(values.contains(&value))
}

/// Check the input as a `usize` and look it up in `values`.
pub fn contains_uint(s: &mut Schema, values: &[usize], input: &str) -> Result<bool> {
    let value = uint(s, input)?;
    Ok(values.contains(&value))
}

/// Check the input as an `f64` and look it up in `values`.
pub fn contains_float64(s: &mut Schema, values: &[f64], input: &str) -> Result<bool> {
    let value = float64(s, input)?;
    Ok(values.contains(&value))
}

/// Check the input as text and look the normalized value up in `values`.
pub fn contains_string(s: &mut Schema, values: &[&str], input: &str) -> Result<bool> {
    let value = string(s, input)?;
    Ok(values.contains(&value.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valid::Limit;

    #[test]
    fn test_bool_builtin_strings() {
        let mut schema = Schema::default();
        let cases = [
            ("Y", true),
            ("YES", true),
            ("y", true),
            ("yes", true),
            ("True", true),
            ("1", true),
            ("N", false),
            ("NO", false),
            ("n", false),
            ("no", false),
            ("F", false),
            ("0", false),
        ];

        for (input, want) in cases {
            assert_eq!(bool(&mut schema, input).unwrap(), want, "bool({:?})", input);
        }
        assert!(bool(&mut schema, "maybe").is_err());
    }

    #[test]
    fn test_bool_extra_strings() {
        let extra: HashMap<String, bool> = [("oui", true), ("non", false), ("o", true)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        set_bool_strings(&extra);

        let mut schema = Schema::default();
        for input in ["oui", "Oui", "OUI", "o", "O"] {
            assert!(bool(&mut schema, input).unwrap(), "bool({:?})", input);
        }
        assert!(!bool(&mut schema, "NON").unwrap());
        assert!(!bool(&mut schema, "Non").unwrap());
    }

    #[test]
    fn test_string_strict() {
        let mut schema = Schema::new(Checker::STRICT_STRING);
        assert_eq!(string(&mut schema, "foo").unwrap(), "foo");

        for input in ["-1", "0", "1", "1.2", "0.1", ".1", "1."] {
            let err = string(&mut schema, input).unwrap_err();
            assert_eq!(err.reason(), Some(&Reason::NotString), "string({:?})", input);
        }
    }

    #[test]
    fn test_string_character_classes() {
        let mut schema = Schema::new(Checker::ASCII);
        assert!(string(&mut schema, "plain text").is_ok());
        assert_eq!(
            string(&mut schema, "café").unwrap_err().reason(),
            Some(&Reason::Ascii)
        );

        let mut schema = Schema::new(Checker::ALPHA);
        assert!(string(&mut schema, "abcXYZ").is_ok());
        assert_eq!(
            string(&mut schema, "abc1").unwrap_err().reason(),
            Some(&Reason::Alpha)
        );

        let mut schema = Schema::new(Checker::ALPHANUMERIC);
        assert!(string(&mut schema, "abc123").is_ok());
        assert_eq!(
            string(&mut schema, "abc-123").unwrap_err().reason(),
            Some(&Reason::AlphaNum)
        );
    }

    #[test]
    fn test_string_pipeline() {
        let mut schema = Schema::new(Checker::REQUIRED | Checker::TRIM_SPACE);
        assert_eq!(string(&mut schema, " foo  ").unwrap(), "foo");
        assert_eq!(string(&mut schema, ""), Err(Error::Required));

        schema.set_default("bar");
        assert_eq!(string(&mut schema, "").unwrap(), "bar");

        schema.set_checker(Checker::TO_UPPERCASE);
        assert_eq!(string(&mut schema, " ja").unwrap(), " JA");
    }

    #[test]
    fn test_int_range() {
        let mut schema = Schema::new(Checker::REQUIRED | Checker::TRIM_SPACE);
        assert_eq!(int(&mut schema, "666").unwrap(), 666);

        schema.set_range(6, 66);
        assert_eq!(int(&mut schema, "5"), Err(Error::MinLen(Limit::Int(6))));
        assert_eq!(int(&mut schema, "67"), Err(Error::MaxLen(Limit::Int(66))));
        assert_eq!(int(&mut schema, "6").unwrap(), 6);
    }

    #[test]
    fn test_numbers_respect_width() {
        let mut schema = Schema::default();
        assert_eq!(int8(&mut schema, "-128").unwrap(), -128);
        assert!(int8(&mut schema, "128").is_err());
        assert!(uint8(&mut schema, "256").is_err());
        assert!(uint16(&mut schema, "-1").is_err());
        assert_eq!(int64(&mut schema, "9223372036854775807").unwrap(), i64::MAX);
        assert_eq!(uint32(&mut schema, "4294967295").unwrap(), u32::MAX);
        assert_eq!(float32(&mut schema, "1.5").unwrap(), 1.5);
        assert_eq!(schema.data_type(), Some(Type::Float32));

        let err = int16(&mut schema, "abc").unwrap_err();
        assert!(matches!(err.reason(), Some(Reason::ParseInt(_))));
        assert!(err.to_string().starts_with("valid::int16: parsing \"abc\""));
    }

    #[test]
    fn test_float_overflow_is_out_of_range() {
        let mut schema = Schema::default();
        let err = float32(&mut schema, "1e39").unwrap_err();
        assert_eq!(err.reason(), Some(&Reason::Range));
        assert_eq!(
            err.to_string(),
            "valid::float32: parsing \"1e39\": value out of range"
        );
        assert!(float64(&mut schema, "1e39").is_ok());
        assert_eq!(float64(&mut schema, "-1e400").unwrap_err().reason(), Some(&Reason::Range));

        assert_eq!(float32(&mut schema, "inf").unwrap(), f32::INFINITY);
        assert_eq!(float64(&mut schema, "-Infinity").unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_uint64_bounds() {
        let mut schema = Schema::default();
        schema.set_range(2u64, 10u64);
        assert_eq!(uint64(&mut schema, "10").unwrap(), 10);
        assert_eq!(uint64(&mut schema, "11"), Err(Error::MaxLen(Limit::Int(10))));

        // saturates at the largest signed bound
        schema.set_max(u64::MAX);
        assert_eq!(schema.max, i64::MAX);
        assert!(uint64(&mut schema, "9223372036854775807").is_ok());
    }

    #[test]
    fn test_float_bounds() {
        let mut schema = Schema::default();
        schema.set_range(1.5, 2.5);
        assert!(float64(&mut schema, "2.0").is_ok());
        assert_eq!(
            float64(&mut schema, "3"),
            Err(Error::MaxLen(Limit::Float(2.5)))
        );
    }

    #[test]
    fn test_time_formats() {
        let mut schema = Schema::default();
        let t = time(&mut schema, "2014-03-10T15:04:05Z").unwrap();
        assert_eq!(t.timestamp(), 1394463845);
        assert!(time(&mut schema, "10/03/2014").is_err());

        schema.set_time_fmt(TimeFormat::Custom("%d/%m/%Y".to_string()));
        let t = time(&mut schema, "10/03/2014").unwrap();
        assert_eq!(t.format("%Y-%m-%d").to_string(), "2014-03-10");

        schema.set_time_fmt(TimeFormat::Custom("%Y-%m-%d %H:%M".to_string()));
        let t = time(&mut schema, "2014-03-10 15:04").unwrap();
        assert_eq!(t.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_slices() {
        let mut schema = Schema::default();
        assert_eq!(int_slice(&mut schema, &["1", "-2", "3"]).unwrap(), vec![1, -2, 3]);
        assert!(uint_slice(&mut schema, &["1", "-2"]).is_err());
        assert!(!schema.is_slice);

        assert_eq!(
            float64_slice(&mut schema, &["1.5", "2"]).unwrap(),
            vec![1.5, 2.0]
        );

        // Empty elements pass through in slice mode
        assert_eq!(
            string_slice(&mut schema, &["a", ""]).unwrap(),
            vec!["a".to_string(), String::new()]
        );
        assert!(int_slice(&mut schema, &["1", ""]).is_err());
        assert!(!schema.is_slice);
    }

    #[test]
    fn test_contains() {
        let mut schema = Schema::new(Checker::TRIM_SPACE);
        assert!(contains_int(&mut schema, &[1, 2, 3], " 2 ").unwrap());
        assert!(!contains_uint(&mut schema, &[1, 2, 3], "4").unwrap());
        assert!(contains_float64(&mut schema, &[1.5], "1.5").unwrap());
        assert!(contains_string(&mut schema, &["go", "rust"], " rust").unwrap());
        assert!(contains_int(&mut schema, &[1], "x").is_err());

        schema.set_checker(Checker::TO_LOWERCASE);
        assert!(contains_string(&mut schema, &["mit"], "MIT").unwrap());
    }
}
