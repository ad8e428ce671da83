//! Coercion of raw strings into typed slots

use std::str::FromStr;

use crate::error::CoerceError;
use crate::field::Slot;
use crate::interval::parse_interval;

/// Parse `raw` according to the slot's type and store it.
///
/// On failure the slot is left untouched. An [`Slot::Unsupported`] slot is
/// rejected by the binder before coercion is attempted; reaching it here
/// still reports an error rather than silently skipping.
pub(crate) fn assign(slot: Slot<'_>, raw: &str) -> Result<(), CoerceError> {
    match slot {
        Slot::Text(dst) => *dst = raw.to_string(),
        Slot::Bool(dst) => *dst = parse_bool(raw)?,
        Slot::I8(dst) => *dst = parse_int(raw, "i8")?,
        Slot::I16(dst) => *dst = parse_int(raw, "i16")?,
        Slot::I32(dst) => *dst = parse_int(raw, "i32")?,
        Slot::I64(dst) => *dst = parse_int(raw, "i64")?,
        Slot::I128(dst) => *dst = parse_int(raw, "i128")?,
        Slot::Isize(dst) => *dst = parse_int(raw, "isize")?,
        Slot::U8(dst) => *dst = parse_uint(raw, "u8")?,
        Slot::U16(dst) => *dst = parse_uint(raw, "u16")?,
        Slot::U32(dst) => *dst = parse_uint(raw, "u32")?,
        Slot::U64(dst) => *dst = parse_uint(raw, "u64")?,
        Slot::U128(dst) => *dst = parse_uint(raw, "u128")?,
        Slot::Usize(dst) => *dst = parse_uint(raw, "usize")?,
        Slot::Duration(dst) => {
            *dst = parse_interval(raw).map_err(|e| CoerceError::new("Duration", raw, e))?
        }
        Slot::Unsupported(type_name) => {
            return Err(CoerceError::new(type_name, raw, "unsupported bind type"))
        }
    }
    Ok(())
}

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
fn parse_bool(raw: &str) -> Result<bool, CoerceError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(CoerceError::new("bool", raw, "invalid boolean literal")),
    }
}

/// Base-10 parse; the target type bounds the accepted range.
fn parse_int<T>(raw: &str, type_name: &'static str) -> Result<T, CoerceError>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    raw.parse::<T>()
        .map_err(|e| CoerceError::new(type_name, raw, e))
}

/// Like [`parse_int`], but without the leading `+` that `FromStr` allows.
fn parse_uint<T>(raw: &str, type_name: &'static str) -> Result<T, CoerceError>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    if raw.starts_with('+') {
        return Err(CoerceError::new(
            type_name,
            raw,
            "sign not allowed for unsigned integers",
        ));
    }
    parse_int(raw, type_name)
}
