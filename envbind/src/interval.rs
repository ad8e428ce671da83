//! Interval literals such as `10s`, `300ms`, `1h30m` or `1.5h`.
//!
//! An interval is a sequence of decimal numbers, each with an optional
//! fraction and a mandatory unit suffix. Valid units are `ns`, `us` (or
//! `µs`), `ms`, `s`, `m` and `h`. The bare literal `0` needs no unit.

use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

// Digits past this point cannot change the result at nanosecond precision.
const MAX_FRACTION_DIGITS: u32 = 18;

const UNITS: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("\u{00b5}s", 1_000),
    ("\u{03bc}s", 1_000),
    ("ms", 1_000_000),
    ("s", NANOS_PER_SEC),
    ("m", 60 * NANOS_PER_SEC),
    ("h", 3_600 * NANOS_PER_SEC),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntervalError {
    #[error("empty interval")]
    Empty,

    #[error("negative intervals are not supported")]
    Negative,

    #[error("expected a number at {0:?}")]
    InvalidNumber(String),

    #[error("missing unit after number")]
    MissingUnit,

    #[error("unknown unit {0:?}")]
    UnknownUnit(String),

    #[error("interval out of range")]
    Overflow,
}

/// Parse an interval literal into a [`Duration`].
pub fn parse_interval(input: &str) -> Result<Duration, IntervalError> {
    let (negative, mut rest) = match input.as_bytes().first() {
        None => return Err(IntervalError::Empty),
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        Some(_) => (false, input),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(IntervalError::InvalidNumber(input.to_string()));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (nanos, tail) = parse_component(rest)?;
        total = total.checked_add(nanos).ok_or(IntervalError::Overflow)?;
        rest = tail;
    }

    if negative && total > 0 {
        return Err(IntervalError::Negative);
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| IntervalError::Overflow)?;
    // Remainder of a division by 1e9 always fits.
    let nanos = (total % NANOS_PER_SEC) as u32;
    Ok(Duration::new(secs, nanos))
}

/// Parse one `number unit` pair from the front of `s`, returning its length
/// in nanoseconds and the unparsed tail.
fn parse_component(s: &str) -> Result<(u128, &str), IntervalError> {
    let (whole, whole_digits, s) = leading_int(s)?;

    let (fraction, scale, fraction_digits, s) = match s.strip_prefix('.') {
        Some(after_dot) => leading_fraction(after_dot),
        None => (0, 1, 0, s),
    };

    if whole_digits == 0 && fraction_digits == 0 {
        return Err(IntervalError::InvalidNumber(s.to_string()));
    }

    let unit_len = s
        .find(|c: char| c.is_ascii_digit() || c == '.')
        .unwrap_or(s.len());
    if unit_len == 0 {
        return Err(IntervalError::MissingUnit);
    }
    let (unit, tail) = s.split_at(unit_len);
    let per_unit = UNITS
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, nanos)| *nanos)
        .ok_or_else(|| IntervalError::UnknownUnit(unit.to_string()))?;

    let nanos = whole
        .checked_mul(per_unit)
        .and_then(|n| n.checked_add(fraction * per_unit / scale))
        .ok_or(IntervalError::Overflow)?;

    Ok((nanos, tail))
}

fn leading_int(s: &str) -> Result<(u128, usize, &str), IntervalError> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u128 = 0;
    for b in s[..digits].bytes() {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u128::from(b - b'0')))
            .ok_or(IntervalError::Overflow)?;
    }
    Ok((value, digits, &s[digits..]))
}

fn leading_fraction(s: &str) -> (u128, u128, usize, &str) {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u128 = 0;
    let mut scale: u128 = 1;
    for b in s[..digits].bytes().take(MAX_FRACTION_DIGITS as usize) {
        value = value * 10 + u128::from(b - b'0');
        scale *= 10;
    }
    (value, scale, digits, &s[digits..])
}
