//! Positional message arguments

use fluent::FluentValue;
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

/// Largest magnitude an `f64` holds without rounding neighbouring integers.
pub(crate) const MAX_EXACT_INTEGER: u64 = 1 << 53;

/// A value substituted into a message template.
///
/// Arguments are owned so that errors carrying them stay `Send + Sync +
/// 'static`. Anything displayable can be captured with [`Argument::display`].
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Text
    Str(String),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Floating point number
    Float(f64),
    /// Boolean, rendered as `true` or `false`
    Bool(bool),
    /// Single character
    Char(char),
}

impl Argument {
    /// Capture the `Display` rendering of a value as a text argument.
    pub fn display(value: impl fmt::Display) -> Self {
        Self::Str(value.to_string())
    }

    /// Name of the argument's kind, as reported in formatting defects.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) | Self::UInt(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
            Self::Char(_) => "character",
        }
    }

    /// Whether the argument may fill a `NUMBER()` placeholder.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::UInt(_) | Self::Float(_))
    }

    /// Convert into a Fluent value borrowing from this argument.
    ///
    /// Fluent numbers are `f64`, so integers beyond 2^53 are passed as their
    /// exact decimal text instead.
    pub(crate) fn to_fluent(&self) -> FluentValue<'_> {
        match self {
            Self::Str(s) => FluentValue::from(s.as_str()),
            Self::Int(n) if n.unsigned_abs() <= MAX_EXACT_INTEGER => FluentValue::from(*n),
            Self::UInt(n) if *n <= MAX_EXACT_INTEGER => FluentValue::from(*n),
            Self::Int(n) => FluentValue::from(n.to_string()),
            Self::UInt(n) => FluentValue::from(n.to_string()),
            Self::Float(n) => FluentValue::from(*n),
            Self::Bool(b) => FluentValue::from(if *b { "true" } else { "false" }),
            Self::Char(c) => FluentValue::from(c.to_string()),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Char(c) => write!(f, "{c}"),
        }
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Argument {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for Argument {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<Cow<'_, str>> for Argument {
    fn from(value: Cow<'_, str>) -> Self {
        Self::Str(value.into_owned())
    }
}

impl From<&Path> for Argument {
    fn from(value: &Path) -> Self {
        Self::Str(value.display().to_string())
    }
}

impl From<PathBuf> for Argument {
    fn from(value: PathBuf) -> Self {
        Self::from(value.as_path())
    }
}

impl From<&PathBuf> for Argument {
    fn from(value: &PathBuf) -> Self {
        Self::from(value.as_path())
    }
}

impl From<char> for Argument {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<bool> for Argument {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Argument {
                fn from(value: $t) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Argument {
                fn from(value: $t) -> Self {
                    Self::UInt(u64::from(value))
                }
            }
        )*
    };
}

from_signed!(i8, i16, i32, i64);
from_unsigned!(u8, u16, u32, u64);

impl From<isize> for Argument {
    #[allow(clippy::cast_possible_truncation)]
    fn from(value: isize) -> Self {
        // isize is at most 64 bits on supported targets
        Self::Int(value as i64)
    }
}

impl From<usize> for Argument {
    #[allow(clippy::cast_possible_truncation)]
    fn from(value: usize) -> Self {
        // usize is at most 64 bits on supported targets
        Self::UInt(value as u64)
    }
}

impl From<f32> for Argument {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Argument {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_pick_variant() {
        assert_eq!(Argument::from("page"), Argument::Str("page".to_string()));
        assert_eq!(Argument::from(-3i32), Argument::Int(-3));
        assert_eq!(Argument::from(4096usize), Argument::UInt(4096));
        assert_eq!(Argument::from(0.5f32), Argument::Float(0.5));
        assert_eq!(Argument::from(true), Argument::Bool(true));
        assert_eq!(Argument::from('x'), Argument::Char('x'));
        assert_eq!(
            Argument::from(PathBuf::from("/tmp/pages.db")),
            Argument::Str("/tmp/pages.db".to_string())
        );
    }

    #[test]
    fn test_display_capture() {
        let addr = std::net::Ipv4Addr::LOCALHOST;
        assert_eq!(Argument::display(addr), Argument::Str("127.0.0.1".to_string()));
    }

    #[test]
    fn test_kind_and_numeric() {
        assert_eq!(Argument::from("a").kind(), "string");
        assert_eq!(Argument::from(1u8).kind(), "integer");
        assert!(Argument::from(1u8).is_numeric());
        assert!(Argument::from(1.5).is_numeric());
        assert!(!Argument::from("12").is_numeric());
        assert!(!Argument::from(false).is_numeric());
    }

    #[test]
    fn test_large_integers_stay_exact() {
        let exact = |arg: Argument| match arg.to_fluent() {
            FluentValue::String(s) => s.into_owned(),
            other => panic!("expected exact text, got {other:?}"),
        };
        assert_eq!(exact(Argument::from(9_007_199_254_740_993i64)), "9007199254740993");
        assert_eq!(exact(Argument::from(i64::MIN)), "-9223372036854775808");
        assert_eq!(exact(Argument::from(u64::MAX)), "18446744073709551615");
        assert!(matches!(Argument::from(4096u32).to_fluent(), FluentValue::Number(_)));
        assert!(matches!(Argument::from(1u64 << 53).to_fluent(), FluentValue::Number(_)));
    }

    #[test]
    fn test_display_rendering() {
        assert_eq!(Argument::from(42i64).to_string(), "42");
        assert_eq!(Argument::from(2.5).to_string(), "2.5");
        assert_eq!(Argument::from(false).to_string(), "false");
        assert_eq!(Argument::from("widget").to_string(), "widget");
    }
}
