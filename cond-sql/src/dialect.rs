//! SQL dialect implementations for SAP HANA and SQL Server.
//!
//! The two back ends differ in identifier quoting. Literal conventions for
//! booleans and dates are shared and come from the host platform, so they are
//! provided as default methods.

use chrono::NaiveDate;
use serde::Deserialize;

/// SQL dialect trait for back-end specific syntax.
pub trait Dialect: Clone + Copy {
    /// Short, stable name used in diagnostics and configuration.
    fn name(&self) -> &'static str;

    /// Quote a column identifier. Embedded quote characters are not escaped.
    fn quote_ident(&self, ident: &str) -> String;

    /// Boolean literal. Boolean-like user fields store `Y`/`N`.
    #[inline]
    fn bool_lit(&self, val: bool) -> &'static str {
        if val { "'Y'" } else { "'N'" }
    }

    /// Date literal in the compact `'yyyyMMdd'` form. The compiler only
    /// passes dates with years in `0..=9999`.
    #[inline]
    fn date_lit(&self, date: NaiveDate) -> String {
        format!("'{}'", date.format("%Y%m%d"))
    }
}

/// SAP HANA dialect: `"Column"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)]
pub struct Hana;

impl Dialect for Hana {
    #[inline]
    fn name(&self) -> &'static str {
        "hana"
    }

    #[inline]
    fn quote_ident(&self, ident: &str) -> String {
        format!("\"{ident}\"")
    }
}

/// Microsoft SQL Server dialect: `[Column]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)]
pub struct SqlServer;

impl Dialect for SqlServer {
    #[inline]
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    #[inline]
    fn quote_ident(&self, ident: &str) -> String {
        format!("[{ident}]")
    }
}

/// A dialect chosen at runtime, e.g. from the host session.
///
/// Deserializes from the same names [`AnyDialect::from_name`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
#[allow(clippy::exhaustive_enums)]
pub enum AnyDialect {
    /// See [`Hana`].
    #[default]
    Hana,
    /// See [`SqlServer`].
    SqlServer,
}

/// A dialect name other than `hana`, `sqlserver` or `mssql`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dialect '{0}', expected hana, sqlserver or mssql")]
pub struct UnknownDialect(String);

impl AnyDialect {
    /// Map the host session's "is this a HANA connection" flag.
    #[inline]
    #[must_use]
    pub const fn from_flag(is_hana: bool) -> Self {
        if is_hana { Self::Hana } else { Self::SqlServer }
    }

    /// Parse a dialect name (`hana`, `sqlserver` or `mssql`), ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hana" => Some(Self::Hana),
            "sqlserver" | "mssql" => Some(Self::SqlServer),
            _ => None,
        }
    }
}

impl TryFrom<String> for AnyDialect {
    type Error = UnknownDialect;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::from_name(&name).ok_or(UnknownDialect(name))
    }
}

impl Dialect for AnyDialect {
    fn name(&self) -> &'static str {
        match self {
            Self::Hana => Hana.name(),
            Self::SqlServer => SqlServer.name(),
        }
    }

    fn quote_ident(&self, ident: &str) -> String {
        match self {
            Self::Hana => Hana.quote_ident(ident),
            Self::SqlServer => SqlServer.quote_ident(ident),
        }
    }
}

impl From<Hana> for AnyDialect {
    fn from(_: Hana) -> Self {
        Self::Hana
    }
}

impl From<SqlServer> for AnyDialect {
    fn from(_: SqlServer) -> Self {
        Self::SqlServer
    }
}

/// Supplies the dialect flag owned by the hosting session.
///
/// Queried once per compile call; implementations are free to look the flag
/// up from a live connection.
pub trait DialectSource {
    /// Whether the current connection targets SAP HANA.
    fn is_hana(&self) -> bool;

    /// The dialect the flag selects.
    fn dialect(&self) -> AnyDialect {
        AnyDialect::from_flag(self.is_hana())
    }
}

impl DialectSource for bool {
    fn is_hana(&self) -> bool {
        *self
    }
}

impl DialectSource for AnyDialect {
    fn is_hana(&self) -> bool {
        matches!(self, Self::Hana)
    }
}

impl<F: Fn() -> bool> DialectSource for F {
    fn is_hana(&self) -> bool {
        self()
    }
}
