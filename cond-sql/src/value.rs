//! Scalar values that can appear as SQL literals.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

/// A value the compiler knows how to render as a SQL literal.
///
/// The set is closed: anything that cannot be converted into one of these
/// variants cannot be placed in a condition.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::exhaustive_enums)]
pub enum Scalar {
    /// `NULL`
    Null,
    /// Single-quoted, embedded quotes doubled.
    String(String),
    /// `'Y'` / `'N'`
    Bool(bool),
    /// Any integer width.
    Int(i128),
    /// Rendered with `.` as decimal point. Must be finite.
    Float(f64),
    /// Fixed-point decimal.
    Decimal(Decimal),
    /// Rendered as `'yyyyMMdd'`.
    Date(NaiveDate),
    /// Enumeration member, rendered as its unquoted discriminant.
    Enum(i128),
    /// Single-quoted hyphenated form.
    Uuid(Uuid),
}

impl Scalar {
    /// Build an enumeration value from its discriminant.
    ///
    /// ```
    /// use cond_sql::Scalar;
    ///
    /// #[repr(i32)]
    /// enum Status { Open = 1, Closed = 2 }
    ///
    /// assert_eq!(Scalar::enumeration(Status::Closed as i32), Scalar::Enum(2));
    /// ```
    pub fn enumeration(discriminant: impl Into<i128>) -> Self {
        Self::Enum(discriminant.into())
    }

    /// Whether this is [`Scalar::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short type name, used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::String(_) => "string",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Decimal(_) => "decimal",
            Self::Date(_) => "date",
            Self::Enum(_) => "enum",
            Self::Uuid(_) => "uuid",
        }
    }
}

macro_rules! scalar_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Int(i128::from(value))
                }
            }
        )*
    };
}

scalar_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl From<usize> for Scalar {
    #[inline]
    fn from(value: usize) -> Self {
        // usize is at most 64 bits on supported targets
        Self::Int(value as i128)
    }
}

impl From<isize> for Scalar {
    #[inline]
    fn from(value: isize) -> Self {
        Self::Int(value as i128)
    }
}

impl From<f64> for Scalar {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Goes through the shortest decimal text of the `f32`, so `0.1f32` stays
/// `0.1` instead of widening to `0.10000000149011612`.
impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Self::Float(
            value
                .to_string()
                .parse()
                .unwrap_or_else(|_| f64::from(value)),
        )
    }
}

impl From<bool> for Scalar {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Scalar {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Scalar {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for Scalar {
    #[inline]
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<Decimal> for Scalar {
    #[inline]
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<NaiveDate> for Scalar {
    #[inline]
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

/// Only the date part is kept; date literals carry no time of day.
impl From<NaiveDateTime> for Scalar {
    #[inline]
    fn from(value: NaiveDateTime) -> Self {
        Self::Date(value.date())
    }
}

impl From<Uuid> for Scalar {
    #[inline]
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
