use std::fmt;

/// The current or default value of a flag.
///
/// The variant is chosen when the flag is registered and never changes
/// afterwards; parsing only ever replaces a value with another value of the
/// same variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Str(String),
}

impl Value {
    /// Name of the variant's Rust type, as used in messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Str(_) => "String",
        }
    }

    pub fn same_type(&self, other: &Value) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(it) => fmt::Display::fmt(it, f),
            Value::I32(it) => fmt::Display::fmt(it, f),
            Value::I64(it) => fmt::Display::fmt(it, f),
            Value::U32(it) => fmt::Display::fmt(it, f),
            Value::U64(it) => fmt::Display::fmt(it, f),
            Value::F32(it) => fmt::Display::fmt(it, f),
            Value::F64(it) => fmt::Display::fmt(it, f),
            Value::Str(it) => f.write_str(it),
        }
    }
}

/// A Rust type that can be stored in a [`Value`].
///
/// Implemented for `bool`, `i32`, `i64`, `u32`, `u64`, `f32`, `f64` and
/// `String`.
pub trait FlagValue: Sized + 'static {
    fn into_value(self) -> Value;
    fn from_value(value: &Value) -> Option<&Self>;
}

/// A default accepted by [`Flags::set`](crate::Flags::set).
///
/// Every [`FlagValue`] is its own default; `&str` is stored as a `String`.
pub trait IntoFlag {
    type Stored: FlagValue;
    fn into_stored(self) -> Self::Stored;
}

macro_rules! flag_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl FlagValue for $ty {
            fn into_value(self) -> Value {
                Value::$variant(self)
            }
            fn from_value(value: &Value) -> Option<&Self> {
                match value {
                    Value::$variant(it) => Some(it),
                    _ => None,
                }
            }
        }

        impl IntoFlag for $ty {
            type Stored = $ty;
            fn into_stored(self) -> $ty {
                self
            }
        }
    )*};
}

flag_value! {
    bool => Bool,
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => Str,
}

impl IntoFlag for &str {
    type Stored = String;
    fn into_stored(self) -> String {
        self.to_string()
    }
}
