//! Extra validators: checksums, encodings, network values and patterns

use super::error::{Reason, Result, ValidError};
use super::{Checker, Schema};
use crate::types::Type;
use ::base64::engine::general_purpose::{STANDARD, URL_SAFE};
use ::base64::Engine;
use ::url::Url;
use hickory_resolver::Resolver;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;

// == Algorithms

/// Validate identification numbers such as credit card or IMEI numbers
/// with the Luhn algorithm.
pub fn luhn_checksum(s: &mut Schema, input: &str) -> Result<String> {
    let input = s.pre_check(input, Type::Custom)?;

    let mut sum = 0;
    // From the rightmost digit, doubling every second one
    for (pos, c) in input.chars().rev().enumerate() {
        let Some(mut digit) = c.to_digit(10) else {
            return Err(ValidError::new("luhn_checksum", input.clone(), Reason::Digit(c)).into());
        };
        if pos % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }

    if sum % 10 != 0 {
        return Err(ValidError::new("luhn_checksum", input, Reason::LuhnChecksum).into());
    }
    Ok(input)
}

// == Encodings

/// Check that the input is base32 (standard, then extended hex alphabet)
/// and return the decoded bytes.
pub fn base32(s: &mut Schema, input: &str) -> Result<Vec<u8>> {
    let input = s.pre_check(input, Type::Custom)?;

    data_encoding::BASE32
        .decode(input.as_bytes())
        .or_else(|_| data_encoding::BASE32HEX.decode(input.as_bytes()))
        .map_err(|e| ValidError::new("base32", input, e).into())
}

/// Check that the input is base64 (standard, then URL-safe alphabet)
/// and return the decoded bytes.
pub fn base64(s: &mut Schema, input: &str) -> Result<Vec<u8>> {
    let input = s.pre_check(input, Type::Custom)?;

    STANDARD
        .decode(&input)
        .or_else(|_| URL_SAFE.decode(&input))
        .map_err(|e| ValidError::new("base64", input, e).into())
}

/// Check that the input is a hexadecimal number, with or without "0x".
pub fn hexadecimal(s: &mut Schema, input: &str) -> Result<i64> {
    let input = s.pre_check(input, Type::Custom)?;

    let digits = match input.strip_prefix("0x") {
        Some(rest) if !rest.is_empty() => rest,
        _ => input.as_str(),
    };

    i64::from_str_radix(digits, 16).map_err(|e| ValidError::new("hexadecimal", "", e).into())
}

// == Net

/// Check a domain with the TLD flag (an ICANN public suffix, not an IP)
/// and the DNS flag (the registrable domain resolves).
///
/// Mail domains must publish at least one MX record; other domains must
/// resolve to an address.
pub fn check_domain(
    flags: Checker,
    domain: &str,
    for_email: bool,
) -> std::result::Result<(), Reason> {
    if flags.contains(Checker::TLD) {
        if domain.parse::<IpAddr>().is_ok() {
            return Err(Reason::IpDomain);
        }

        let suffix = psl::suffix(domain.as_bytes());
        let icann = suffix
            .as_ref()
            .map(|s| s.is_known() && s.typ() == Some(psl::Type::Icann))
            .unwrap_or(false);
        if !icann {
            let name = suffix
                .map(|s| String::from_utf8_lossy(s.as_bytes()).into_owned())
                .unwrap_or_default();
            return Err(Reason::Icann(name));
        }
    }

    if flags.contains(Checker::DNS) {
        let registrable = psl::domain(domain.as_bytes())
            .map(|d| String::from_utf8_lossy(d.as_bytes()).into_owned())
            .ok_or_else(|| Reason::Dns(format!("no registrable domain in {:?}", domain)))?;

        tracing::debug!(domain = %registrable, for_email, "resolving domain");
        if for_email {
            lookup_mx(&registrable)?;
        } else {
            dns_lookup::lookup_host(&registrable)
                .map_err(|e| Reason::Dns(e.to_string()))?;
        }
    }

    Ok(())
}

/// Require at least one mail exchanger for `domain`.
///
/// The blocking resolver drives its own runtime, so it runs on a scoped
/// thread to stay usable from inside an async caller.
fn lookup_mx(domain: &str) -> std::result::Result<(), Reason> {
    std::thread::scope(|scope| {
        scope
            .spawn(|| {
                let resolver =
                    Resolver::from_system_conf().map_err(|e| Reason::Dns(e.to_string()))?;
                let records = resolver
                    .mx_lookup(domain)
                    .map_err(|e| Reason::Dns(e.to_string()))?;
                match records.iter().next() {
                    Some(mx) => {
                        tracing::debug!(domain, exchange = %mx.exchange(), "found mail exchanger");
                        Ok(())
                    }
                    None => Err(Reason::Dns(format!("no MX record for {:?}", domain))),
                }
            })
            .join()
            .unwrap_or_else(|_| Err(Reason::Dns("MX lookup aborted".to_string())))
    })
}

static ADDR_SPEC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?:[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*|"(?:[^"\\\r\n]|\\.)*")@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*$"#,
    )
    .expect("address regex is valid")
});

/// Pull the address out of `addr` or `Display Name <addr>`.
fn parse_address(input: &str) -> std::result::Result<&str, Reason> {
    let input = input.trim();
    let addr = match (input.rfind('<'), input.ends_with('>')) {
        (Some(start), true) => &input[start + 1..input.len() - 1],
        (None, false) => input,
        _ => return Err(Reason::Address("unclosed angle-addr")),
    };

    if !addr.contains('@') {
        return Err(Reason::Address("missing @ in addr-spec"));
    }
    if !ADDR_SPEC.is_match(addr) {
        return Err(Reason::Address("malformed addr-spec"));
    }
    Ok(addr)
}

/// Check that the input is an email address and return the address part.
///
/// Uses the flag TLD to check the domain and DNS to resolve it.
pub fn email(s: &mut Schema, input: &str) -> Result<String> {
    let input = s.pre_check(input, Type::Custom)?;

    let addr = match parse_address(&input).map(str::to_string) {
        Ok(addr) => addr,
        Err(reason) => return Err(ValidError::new("email", input, reason).into()),
    };

    let domain = addr.rsplit('@').next().unwrap_or_default();
    if let Err(reason) = check_domain(s.checker(), domain, true) {
        return Err(ValidError::new("email", addr, reason).into());
    }

    Ok(addr)
}

/// Check that the input is an IP address.
///
/// Uses the flag DNS to require a reverse lookup.
pub fn ip(s: &mut Schema, input: &str) -> Result<String> {
    let input = s.pre_check(input, Type::Custom)?;

    let addr = match input.parse::<IpAddr>() {
        Ok(addr) => addr,
        Err(_) => return Err(ValidError::new("ip", input, Reason::NoIp).into()),
    };
    if s.checker().contains(Checker::DNS) {
        if let Err(e) = dns_lookup::lookup_addr(&addr) {
            return Err(ValidError::new("ip", input, Reason::Dns(e.to_string())).into());
        }
    }

    Ok(input)
}

fn hex_groups(input: &str, sep: char, width: usize) -> Option<usize> {
    let mut count = 0;
    for group in input.split(sep) {
        if group.len() != width || !group.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        count += width / 2;
    }
    Some(count)
}

/// Check that the input is a hardware address: EUI-48, EUI-64 or a
/// 20-octet InfiniBand address, written as `01:23:45:67:89:ab`,
/// `01-23-45-67-89-ab` or `0123.4567.89ab`.
pub fn mac(s: &mut Schema, input: &str) -> Result<String> {
    let input = s.pre_check(input, Type::Custom)?;

    let octets = if input.contains(':') {
        hex_groups(&input, ':', 2)
    } else if input.contains('-') {
        hex_groups(&input, '-', 2)
    } else if input.contains('.') {
        hex_groups(&input, '.', 4)
    } else {
        None
    };

    match octets {
        Some(6 | 8 | 20) => Ok(input),
        _ => Err(ValidError::new("mac", "", Reason::Mac).into()),
    }
}

/// Check that the input is a URL and return it normalized.
///
/// Uses the flags HTTP_FTP for the protocol scheme, TLD for the domain and
/// DNS to resolve it.
pub fn url(s: &mut Schema, input: &str) -> Result<String> {
    let input = s.pre_check(input, Type::Custom)?;

    let parsed = match Url::parse(&input) {
        Ok(u) => u,
        Err(::url::ParseError::RelativeUrlWithoutBase) => {
            return Err(ValidError::new("url", input, Reason::NoScheme).into())
        }
        Err(e) => return Err(ValidError::new("url", input, e).into()),
    };

    let flags = s.checker();
    if flags.contains(Checker::HTTP_FTP) && !matches!(parsed.scheme(), "http" | "https" | "ftp") {
        return Err(ValidError::new("url", input, Reason::HttpFtp).into());
    }
    let host = parsed.host_str().unwrap_or_default();
    if let Err(reason) = check_domain(flags, host, false) {
        return Err(ValidError::new("url", input, reason).into());
    }

    Ok(parsed.to_string())
}

// == Regular expressions

/// Compiled regular expressions keyed by the Adler-32 checksum of their text.
///
/// Entries live as long as the cache.
#[derive(Debug, Default)]
pub struct RegexCache {
    entries: Mutex<HashMap<u32, Regex>>,
}

impl RegexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the compiled expression, compiling and storing it on first use
    pub fn get_or_compile(&self, expr: &str) -> std::result::Result<Regex, regex::Error> {
        let key = adler::adler32_slice(expr.as_bytes());
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(re) = entries.get(&key) {
            if re.as_str() == expr {
                return Ok(re.clone());
            }
            // Checksum collision: keep the first entry, compile this one uncached
            tracing::debug!(key, expr, "pattern checksum collision");
            return Regex::new(expr);
        }

        let re = Regex::new(expr)?;
        tracing::debug!(key, expr, "compiled pattern");
        entries.insert(key, re.clone());
        Ok(re)
    }

    pub fn len(&self) -> usize {
        match self.entries.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

static PATTERNS: Lazy<RegexCache> = Lazy::new(RegexCache::new);

/// Check if the input matches a regular expression, using the process-wide cache.
pub fn pattern(s: &mut Schema, expr: &str, input: &str) -> Result<String> {
    pattern_with_cache(&PATTERNS, s, expr, input)
}

/// Check if the input matches a regular expression, compiled through `cache`.
pub fn pattern_with_cache(
    cache: &RegexCache,
    s: &mut Schema,
    expr: &str,
    input: &str,
) -> Result<String> {
    let input = s.pre_check(input, Type::Custom)?;

    let re = match cache.get_or_compile(expr) {
        Ok(re) => re,
        Err(e) => return Err(ValidError::new("pattern", input, e).into()),
    };

    if !re.is_match(&input) {
        let reason = if s.pattern_fmt().is_empty() {
            Reason::PatternExpr(expr.to_string())
        } else {
            Reason::PatternFormat(s.pattern_fmt().to_string())
        };
        return Err(ValidError::new("pattern", input, reason).into());
    }
    Ok(input)
}
