//! Fluent `WHERE` condition trees compiled to SAP HANA or SQL Server SQL.
//!
//! Build a tree of conditions with [`ConditionBuilder`], then compile it for
//! one of two dialects. Values are rendered as literals (this crate does not
//! produce parameterized statements); column names are quoted but otherwise
//! trusted.
//!
//! ```
//! use cond_sql::{ConditionBuilder, Hana, LogicalOperator, to_where_clause};
//! use chrono::NaiveDate;
//!
//! let tree = ConditionBuilder::new()
//!     .equals("CardType", "C")
//!     .equals("U_Active", true)
//!     .greater_or_equal("DocDate", NaiveDate::from_ymd_opt(2024, 3, 7).unwrap())
//!     .group(LogicalOperator::Or, |g| g.is_null("U_Region").in_list("U_Region", ["EU", "NA"]))
//!     .build()?;
//!
//! assert_eq!(
//!     to_where_clause(&tree, Hana)?,
//!     "WHERE \"CardType\" = 'C' AND \"U_Active\" = 'Y' AND \"DocDate\" >= '20240307' \
//!      AND (\"U_Region\" IS NULL OR \"U_Region\" IN ('EU', 'NA'))"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Dialects
//!
//! | Dialect       | Identifier  | Boolean       | Date         |
//! |---------------|-------------|---------------|--------------|
//! | [`Hana`]      | `"Column"`  | `'Y'` / `'N'` | `'yyyyMMdd'` |
//! | [`SqlServer`] | `[Column]`  | `'Y'` / `'N'` | `'yyyyMMdd'` |
//!
//! When the dialect is only known at runtime, use [`AnyDialect`] or pass a
//! [`DialectSource`] to [`where_clause_from`].

mod builder;
mod compile;
mod condition;
mod config;
mod dialect;
mod validate;
mod value;
mod vocab;

pub use builder::{BuildError, ConditionBuilder};
pub use compile::{
    CompileError, compile_condition, format_literal, to_where_clause, to_where_fragment,
    where_clause_from,
};
pub use condition::{Condition, Group};
pub use config::{
    ConfigError, ENV_ALLOWED_COLUMNS, ENV_DIALECT, ENV_MAX_DEPTH, QueryConfig,
};
pub use dialect::{AnyDialect, Dialect, DialectSource, Hana, SqlServer, UnknownDialect};
pub use validate::{
    DEFAULT_MAX_DEPTH, TreeValidator, ValidationError, assert_valid_sql_identifier,
    is_valid_sql_identifier,
};
pub use value::Scalar;
pub use vocab::{CompareOp, ComparisonKind, LogicalOperator};

/// Start a builder whose root group combines with `AND`.
pub fn conditions() -> ConditionBuilder {
    ConditionBuilder::new()
}

/// Start a builder whose root group combines with `OR`.
pub fn any_of() -> ConditionBuilder {
    ConditionBuilder::with_operator(LogicalOperator::Or)
}
