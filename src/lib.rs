//! Typed command line flags.
//!
//! Flags are declared up front on a [`Flags`] registry, each with a name, a
//! default value and a usage line. Parsing then walks the argument vector,
//! converts every `-name=value`, `--name=value`, `-name value` or `--name value`
//! into the declared type and returns the index of the first positional
//! argument.
//!
//! ```
//! use tflags::{Flags, ParseOptions};
//!
//! # fn main() -> tflags::Result<()> {
//! let mut flags = Flags::new();
//! let name = flags.set("name", "undefined", "specify your name")?;
//! let age = flags.set("age", 0, "specify your age")?;
//! let cool = flags.set("cool", false, "specify whether you're cool or not")?;
//!
//! let args = ["hello", "-cool", "-name=Sam", "--age", "30", "notes.txt"];
//! let tail = flags.parse(&args, ParseOptions::default())?;
//!
//! assert_eq!(flags[name], "Sam");
//! assert_eq!(flags[age], 30);
//! assert!(flags[cool]);
//! assert_eq!(&args[tail..], ["notes.txt"]);
//! # Ok(())
//! # }
//! ```
//!
//! Boolean flags given without a value are set to `true`. Integers accept
//! `0x` and `0b` prefixes, see [`literal`] for the exact grammar.
use std::{ffi::OsString, io};

mod parse;
mod registry;
mod usage;
mod value;

pub mod literal;

pub use crate::{
    literal::LiteralError,
    parse::ParseOptions,
    registry::{Entry, Flag, Flags},
    value::{FlagValue, IntoFlag, Value},
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("No arguments were provided")]
    EmptyInput,
    #[error("Flag name is missing after `-` in argument {index}")]
    MalformedToken { index: usize },
    #[error("Unknown flag: `{name}`")]
    UnknownFlag { name: String },
    #[error("Expected a value for `{name}`")]
    MissingValue { name: String },
    #[error("Can't parse `{name}`, {source}")]
    Conversion {
        name: String,
        value: String,
        #[source]
        source: LiteralError,
    },
    #[error("Can't parse `{name}`, invalid numeric literal `{value}`: base-10 literal cannot start with 0")]
    InvalidNumericLiteral { name: String, value: String },
    #[error("Argument count {count} exceeds the {len} arguments provided")]
    OutOfBounds { count: usize, len: usize },
    #[error("Flag registered more than once: `{name}`")]
    DuplicateFlag { name: String },
    #[error("Can't parse argument {index}, invalid utf8: {arg:?}")]
    InvalidUtf8 { index: usize, arg: OsString },
    #[error("Failed to write usage: {0}")]
    Usage(#[from] io::Error),
}

/// Fieldless discriminant of [`Error`], handy for matching in callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyInput,
    MalformedToken,
    UnknownFlag,
    MissingValue,
    Conversion,
    InvalidNumericLiteral,
    OutOfBounds,
    DuplicateFlag,
    InvalidUtf8,
    Usage,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyInput => ErrorKind::EmptyInput,
            Error::MalformedToken { .. } => ErrorKind::MalformedToken,
            Error::UnknownFlag { .. } => ErrorKind::UnknownFlag,
            Error::MissingValue { .. } => ErrorKind::MissingValue,
            Error::Conversion { .. } => ErrorKind::Conversion,
            Error::InvalidNumericLiteral { .. } => ErrorKind::InvalidNumericLiteral,
            Error::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            Error::DuplicateFlag { .. } => ErrorKind::DuplicateFlag,
            Error::InvalidUtf8 { .. } => ErrorKind::InvalidUtf8,
            Error::Usage(_) => ErrorKind::Usage,
        }
    }

    /// The flag this error is about, if any.
    pub fn flag(&self) -> Option<&str> {
        match self {
            Error::UnknownFlag { name }
            | Error::MissingValue { name }
            | Error::Conversion { name, .. }
            | Error::InvalidNumericLiteral { name, .. }
            | Error::DuplicateFlag { name } => Some(name.as_str()),
            _ => None,
        }
    }

    /// Prints the error to stderr and exits the process with status 2.
    pub fn exit(self) -> ! {
        eprintln!("{self}");
        std::process::exit(2)
    }

    pub(crate) fn from_literal(name: String, value: String, err: LiteralError) -> Error {
        match err {
            LiteralError::LeadingZero => Error::InvalidNumericLiteral { name, value },
            source => Error::Conversion { name, value, source },
        }
    }
}
