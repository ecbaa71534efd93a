//! Compile a condition tree into `WHERE` clause text.
//!
//! Compilation is pure: the same tree and dialect always produce the same
//! string, nothing is cached, and trees can be compiled from many threads at
//! once.
//!
//! Group rendering joins the group's conditions, then its non-empty
//! subgroups (each wrapped in parentheses), with the group's operator. A
//! subgroup that renders to nothing is skipped entirely.

use chrono::{Datelike, NaiveDate};

use crate::condition::{Condition, Group};
use crate::dialect::{Dialect, DialectSource};
use crate::value::Scalar;

/// Failure to render a tree.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum CompileError {
    /// NaN and infinities have no SQL literal.
    #[error(
        "non-finite float {value} has no SQL literal (column {})",
        .column.as_deref().unwrap_or("<none>")
    )]
    NonFiniteFloat { column: Option<String>, value: f64 },
    /// `'yyyyMMdd'` only has room for years 0 through 9999.
    #[error(
        "date {date} is outside the yyyyMMdd range (column {})",
        .column.as_deref().unwrap_or("<none>")
    )]
    DateOutOfRange {
        column: Option<String>,
        date: NaiveDate,
    },
}

/// Render a single value as a SQL literal.
///
/// ```
/// use cond_sql::{Hana, Scalar, format_literal};
///
/// assert_eq!(format_literal(&Hana, &Scalar::from("O'Brien"))?, "'O''Brien'");
/// assert_eq!(format_literal(&Hana, &Scalar::from(true))?, "'Y'");
/// assert_eq!(format_literal(&Hana, &Scalar::Null)?, "NULL");
/// # Ok::<(), cond_sql::CompileError>(())
/// ```
pub fn format_literal<D: Dialect>(dialect: &D, value: &Scalar) -> Result<String, CompileError> {
    literal(dialect, value, None)
}

fn literal<D: Dialect>(
    dialect: &D,
    value: &Scalar,
    column: Option<&str>,
) -> Result<String, CompileError> {
    let sql = match value {
        Scalar::Null => "NULL".to_string(),
        Scalar::String(s) => quote_str(s),
        Scalar::Bool(b) => dialect.bool_lit(*b).to_string(),
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => {
            if !f.is_finite() {
                return Err(CompileError::NonFiniteFloat {
                    column: column.map(str::to_string),
                    value: *f,
                });
            }
            // Display for f64 never uses exponent notation or grouping
            f.to_string()
        },
        Scalar::Decimal(d) => d.to_string(),
        Scalar::Date(d) => {
            if !(0..=9999).contains(&d.year()) {
                return Err(CompileError::DateOutOfRange {
                    column: column.map(str::to_string),
                    date: *d,
                });
            }
            dialect.date_lit(*d)
        },
        Scalar::Enum(e) => e.to_string(),
        Scalar::Uuid(u) => format!("'{}'", u.hyphenated()),
    };
    Ok(sql)
}

fn quote_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// Render a single condition.
pub fn compile_condition<D: Dialect>(
    dialect: &D,
    condition: &Condition,
) -> Result<String, CompileError> {
    let kind = condition.kind();

    let sql = match condition {
        Condition::Compare { column, op, value } => format!(
            "{} {} {}",
            dialect.quote_ident(column),
            op.as_sql(),
            literal(dialect, value, Some(column))?
        ),
        Condition::Range { column, from, to, .. } => format!(
            "{} {} {} AND {}",
            dialect.quote_ident(column),
            kind.keyword(),
            literal(dialect, from, Some(column))?,
            literal(dialect, to, Some(column))?
        ),
        Condition::Set { column, values, .. } => {
            let items = values
                .iter()
                .map(|v| literal(dialect, v, Some(column)))
                .collect::<Result<Vec<_>, _>>()?;
            format!(
                "{} {} ({})",
                dialect.quote_ident(column),
                kind.keyword(),
                items.join(", ")
            )
        },
        Condition::Null { column, .. } => {
            format!("{} {}", dialect.quote_ident(column), kind.keyword())
        },
        Condition::Exists { subquery, .. } => format!("{} ({subquery})", kind.keyword()),
    };

    Ok(sql)
}

/// Render a group without the `WHERE` keyword.
///
/// Returns the empty string for a group with no conditions anywhere in its
/// subtree.
pub fn to_where_fragment<D: Dialect>(group: &Group, dialect: &D) -> Result<String, CompileError> {
    let mut parts = Vec::with_capacity(group.conditions.len() + group.subgroups.len());

    for condition in &group.conditions {
        parts.push(compile_condition(dialect, condition)?);
    }

    for subgroup in &group.subgroups {
        let inner = to_where_fragment(subgroup, dialect)?;
        if !inner.is_empty() {
            parts.push(format!("({inner})"));
        }
    }

    Ok(parts.join(group.operator.separator()))
}

/// Render a full `WHERE` clause, or the empty string for an empty tree.
pub fn to_where_clause<D: Dialect>(group: &Group, dialect: D) -> Result<String, CompileError> {
    let fragment = to_where_fragment(group, &dialect)?;

    tracing::trace!(
        dialect = dialect.name(),
        conditions = group.condition_count(),
        len = fragment.len(),
        "compiled where clause"
    );

    if fragment.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!("WHERE {fragment}"))
    }
}

/// Render a full `WHERE` clause, asking `source` for the dialect once.
pub fn where_clause_from<S>(group: &Group, source: &S) -> Result<String, CompileError>
where
    S: DialectSource + ?Sized,
{
    to_where_clause(group, source.dialect())
}

impl Group {
    /// Shorthand for [`to_where_clause`].
    pub fn to_where_clause<D: Dialect>(&self, dialect: D) -> Result<String, CompileError> {
        to_where_clause(self, dialect)
    }
}
