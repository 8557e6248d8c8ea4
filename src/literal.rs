//! Conversion of flag values from text.
//!
//! Booleans accept `true`, `True`, `TRUE`, `t`, `T`, `1` and the empty string
//! as true, and `false`, `False`, `FALSE`, `f`, `F`, `0` as false.
//!
//! Integers are written in base 10, or in base 16 and base 2 with a `0x` or
//! `0b` prefix. A base-10 literal may not start with a redundant `0`. Signed
//! integers take an optional leading `-`, which comes before the prefix:
//! `-0x10` is `-16`.
use std::{
    num::{ParseFloatError, ParseIntError},
    str::FromStr,
};

use crate::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LiteralError {
    #[error("expected a boolean, got `{0}`")]
    Bool(String),
    #[error("base-10 literal cannot start with 0")]
    LeadingZero,
    #[error("unexpected sign in integer literal")]
    UnexpectedSign,
    #[error(transparent)]
    Int(#[from] ParseIntError),
    #[error(transparent)]
    Float(#[from] ParseFloatError),
}

pub fn parse_bool(text: &str) -> Result<bool, LiteralError> {
    match text {
        "" | "true" | "True" | "TRUE" | "t" | "T" | "1" => Ok(true),
        "false" | "False" | "FALSE" | "f" | "F" | "0" => Ok(false),
        _ => Err(LiteralError::Bool(text.to_string())),
    }
}

/// Integer types accepted by [`parse_int`].
pub trait Integer: Sized {
    const SIGNED: bool;
    fn from_str_radix(src: &str, radix: u32) -> Result<Self, ParseIntError>;
}

macro_rules! integer {
    ($($ty:ty => $signed:literal),*) => {$(
        impl Integer for $ty {
            const SIGNED: bool = $signed;
            fn from_str_radix(src: &str, radix: u32) -> Result<Self, ParseIntError> {
                <$ty>::from_str_radix(src, radix)
            }
        }
    )*};
}

integer!(i32 => true, i64 => true, u32 => false, u64 => false);

pub fn parse_int<T: Integer>(text: &str) -> Result<T, LiteralError> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) if T::SIGNED => (true, rest),
        _ => (false, text),
    };
    let (radix, digits) = split_radix(rest)?;
    if digits.starts_with(['+', '-']) {
        return Err(LiteralError::UnexpectedSign);
    }
    let res = if negative {
        // Re-attach the sign so that `MIN` round-trips without overflow.
        T::from_str_radix(&format!("-{digits}"), radix)
    } else {
        T::from_str_radix(digits, radix)
    };
    Ok(res?)
}

fn split_radix(text: &str) -> Result<(u32, &str), LiteralError> {
    let rest = match text.strip_prefix('0') {
        None => return Ok((10, text)),
        Some("") => return Ok((10, text)),
        Some(rest) => rest,
    };
    if let Some(hex) = rest.strip_prefix('x') {
        Ok((16, hex))
    } else if let Some(bin) = rest.strip_prefix('b') {
        Ok((2, bin))
    } else {
        Err(LiteralError::LeadingZero)
    }
}

pub fn parse_float<T>(text: &str) -> Result<T, LiteralError>
where
    T: FromStr<Err = ParseFloatError>,
{
    Ok(text.parse::<T>()?)
}

/// Parses `text` into a value of the same variant as `current`.
pub(crate) fn convert(current: &Value, text: &str) -> Result<Value, LiteralError> {
    let res = match current {
        Value::Bool(_) => Value::Bool(parse_bool(text)?),
        Value::I32(_) => Value::I32(parse_int(text)?),
        Value::I64(_) => Value::I64(parse_int(text)?),
        Value::U32(_) => Value::U32(parse_int(text)?),
        Value::U64(_) => Value::U64(parse_int(text)?),
        Value::F32(_) => Value::F32(parse_float(text)?),
        Value::F64(_) => Value::F64(parse_float(text)?),
        Value::Str(_) => Value::Str(text.to_string()),
    };
    Ok(res)
}
