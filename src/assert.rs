//! Lexical validators for attribute values.
//!
//! Stateless predicates enforcing the XML Schema lexical classes used by the
//! SAML metadata vocabulary: NCName identifiers, ISO-8601 durations, and
//! UTC instants in `YYYY-MM-DDThh:mm:ssZ` form.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{BindError, BindResult};

/// Returns true if `value` is a valid NCName.
///
/// An NCName contains no colons, starts with a letter or underscore, and
/// continues with letters, digits, `.`, `-` or `_`. The empty string is not
/// a valid NCName.
#[must_use]
pub fn is_valid_ncname(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '_' | '\u{B7}'))
}

/// Asserts that an optional identifier is either absent or a valid NCName.
///
/// Absent values are always fine; a present value that fails the NCName
/// lexical class raises a [`BindError::SchemaViolation`] naming the field.
pub fn assert_nullable_ncname(field: &str, value: Option<&str>) -> BindResult<()> {
    match value {
        None => Ok(()),
        Some(v) if is_valid_ncname(v) => Ok(()),
        Some(_) => Err(BindError::schema_violation(field, "must be a valid NCName")),
    }
}

/// Returns true if `value` matches the ISO-8601 duration grammar.
///
/// Accepts `-?PnYnMnDTnHnMnS` with at least one designator present, as well
/// as the `PnW` week form. A trailing `T` with no time components, a bare
/// `P`, and fractional values anywhere but the seconds component are all
/// rejected.
#[must_use]
pub fn is_valid_duration(value: &str) -> bool {
    let s = value.strip_prefix('-').unwrap_or(value);
    let Some(s) = s.strip_prefix('P') else {
        return false;
    };
    if s.is_empty() {
        return false;
    }

    // Week form is exclusive with all other designators.
    if let Some(weeks) = s.strip_suffix('W') {
        return !weeks.is_empty() && weeks.bytes().all(|b| b.is_ascii_digit());
    }

    let (date, time) = match s.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (s, None),
    };

    let mut seen = false;
    if !scan_components(date, &['Y', 'M', 'D'], false, &mut seen) {
        return false;
    }
    if let Some(time) = time {
        // "PT" with nothing after the T is malformed.
        if time.is_empty() {
            return false;
        }
        let mut seen_time = false;
        if !scan_components(time, &['H', 'M', 'S'], true, &mut seen_time) || !seen_time {
            return false;
        }
        seen = true;
    }
    seen
}

/// Scans a run of `<digits><designator>` components in the given order.
///
/// `allow_fraction` permits a decimal fraction on the final (seconds)
/// component only.
fn scan_components(mut s: &str, order: &[char], allow_fraction: bool, seen: &mut bool) -> bool {
    let mut next = 0;
    while !s.is_empty() {
        let digits = s.bytes().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            return false;
        }
        let mut len = digits;
        let rest = &s[digits..];
        let fractional = rest.starts_with('.');
        if fractional {
            let frac = rest[1..].bytes().take_while(|b| b.is_ascii_digit()).count();
            if frac == 0 {
                return false;
            }
            len += 1 + frac;
        }
        let Some(designator) = s[len..].chars().next() else {
            return false;
        };
        let Some(pos) = order[next..].iter().position(|&d| d == designator) else {
            return false;
        };
        if fractional && !(allow_fraction && designator == 'S') {
            return false;
        }
        next += pos + 1;
        *seen = true;
        s = &s[len + designator.len_utf8()..];
    }
    true
}

/// Asserts that an optional duration is either absent or lexically valid.
pub fn assert_nullable_duration(field: &str, value: Option<&str>) -> BindResult<()> {
    match value {
        None => Ok(()),
        Some(v) if is_valid_duration(v) => Ok(()),
        Some(_) => Err(BindError::schema_violation(
            field,
            "must be a valid xs:duration",
        )),
    }
}

/// Renders an instant in the fixed `YYYY-MM-DDThh:mm:ssZ` form.
///
/// Output is always UTC with a literal `Z` suffix and second precision;
/// timezone offsets are never emitted.
#[must_use]
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Parses an instant in the fixed `YYYY-MM-DDThh:mm:ssZ` form.
pub fn parse_instant(field: &str, value: &str) -> BindResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%SZ")
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            BindError::schema_violation(field, "must be a UTC instant in YYYY-MM-DDThh:mm:ssZ form")
        })
}

/// Generates a document identifier that is always a valid NCName.
#[must_use]
pub fn generate_id() -> String {
    format!("_{}", uuid::Uuid::new_v4().simple())
}
