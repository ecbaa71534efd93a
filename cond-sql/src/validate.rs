//! Opt-in checks for condition trees before they are compiled.
//!
//! Neither the builder nor the compiler validate column names; callers that
//! accept column names or subqueries from less trusted code can run a
//! [`TreeValidator`] over the built tree first.
//!
//! # Example
//!
//! ```
//! use cond_sql::{ComparisonKind, ConditionBuilder, TreeValidator, ValidationError};
//!
//! let validator = TreeValidator::new()
//!     .allow_columns(&["CardCode", "DocTotal"])
//!     .deny_kinds(&[ComparisonKind::Exists, ComparisonKind::NotExists]);
//!
//! let ok = ConditionBuilder::new().equals("CardCode", "C001").build()?;
//! assert!(validator.validate(&ok).is_ok());
//!
//! let bad = ConditionBuilder::new().equals("Password", "x").build()?;
//! assert!(matches!(
//!     validator.validate(&bad),
//!     Err(ValidationError::ColumnNotAllowed { .. })
//! ));
//! # Ok::<(), cond_sql::BuildError>(())
//! ```

use crate::condition::{Condition, Group};
use crate::vocab::ComparisonKind;

/// Longest identifier accepted (SQL Server limit; HANA allows 127).
const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Default maximum nesting depth of subgroups.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Whether `s` is a plain SQL identifier that needs no escaping inside quotes.
///
/// A plain identifier starts with an ASCII letter or underscore, continues
/// with ASCII letters, digits or underscores, and is 1 to 128 characters long.
///
/// ```
/// use cond_sql::is_valid_sql_identifier;
///
/// assert!(is_valid_sql_identifier("U_Status"));
/// assert!(is_valid_sql_identifier("_x1"));
/// assert!(!is_valid_sql_identifier(""));
/// assert!(!is_valid_sql_identifier("1abc"));
/// assert!(!is_valid_sql_identifier("a\"b"));
/// assert!(!is_valid_sql_identifier("a]; DROP"));
/// ```
#[inline]
#[must_use]
pub fn is_valid_sql_identifier(s: &str) -> bool {
    if s.is_empty() || s.len() > MAX_IDENTIFIER_LENGTH {
        return false;
    }

    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {},
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Assert that a string is a plain SQL identifier.
///
/// # Panics
///
/// Panics if the identifier is not plain. Intended for column names written
/// in code, not for runtime input.
#[inline]
pub fn assert_valid_sql_identifier(s: &str, context: &str) {
    assert!(
        is_valid_sql_identifier(s),
        "Invalid SQL {context} name '{s}': must start with letter/underscore, \
             contain only ASCII alphanumeric/underscore, and be 1-128 chars"
    );
}

/// A rule a tree broke.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// Column name is not a plain identifier.
    #[error("column '{column}' is not a plain SQL identifier")]
    InvalidIdentifier { column: String },
    /// Column is not in the allowed list.
    #[error("column '{column}' is not allowed. Allowed columns: {}", .allowed.join(", "))]
    ColumnNotAllowed { column: String, allowed: Vec<String> },
    /// Comparison kind is denied.
    #[error("comparison '{kind:?}' is denied")]
    KindDenied { kind: ComparisonKind },
    /// Subgroups are nested deeper than allowed.
    #[error("group nesting depth {actual} exceeds maximum {max}")]
    NestingTooDeep { max: usize, actual: usize },
    /// `EXISTS` with blank subquery text.
    #[error("EXISTS condition has an empty subquery")]
    EmptySubquery,
}

/// Rules checked by [`TreeValidator::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct TreeValidator {
    /// Allowed column names. Empty = allow all columns.
    pub allowed_columns: Vec<String>,
    /// Denied comparison kinds.
    pub denied_kinds: Vec<ComparisonKind>,
    /// Maximum subgroup nesting depth.
    pub max_depth: usize,
    /// Reject column names that are not plain identifiers.
    pub require_plain_identifiers: bool,
}

impl Default for TreeValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeValidator {
    /// Allow every column and kind, up to [`DEFAULT_MAX_DEPTH`] levels.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            allowed_columns: Vec::new(),
            denied_kinds: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            require_plain_identifiers: false,
        }
    }

    /// Set allowed columns (whitelist). Empty allows all.
    #[must_use]
    pub fn allow_columns(mut self, columns: &[&str]) -> Self {
        self.allowed_columns = columns.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Set denied comparison kinds.
    #[must_use]
    pub fn deny_kinds(mut self, kinds: &[ComparisonKind]) -> Self {
        self.denied_kinds = kinds.to_vec();
        self
    }

    /// Set maximum nesting depth.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Reject column names that are not plain identifiers.
    #[must_use]
    pub fn require_plain_identifiers(mut self, yes: bool) -> Self {
        self.require_plain_identifiers = yes;
        self
    }

    /// Check a tree, returning the first violation found.
    ///
    /// Conditions are checked depth-first, a group's own conditions before
    /// its subgroups.
    pub fn validate(&self, group: &Group) -> Result<(), ValidationError> {
        let result = self.validate_at(group, 0);
        if let Err(err) = &result {
            tracing::debug!(error = %err, "condition tree rejected");
        }
        result
    }

    fn validate_at(&self, group: &Group, depth: usize) -> Result<(), ValidationError> {
        if depth > self.max_depth {
            return Err(ValidationError::NestingTooDeep {
                max: self.max_depth,
                actual: depth,
            });
        }

        for condition in &group.conditions {
            self.validate_condition(condition)?;
        }

        for subgroup in &group.subgroups {
            self.validate_at(subgroup, depth + 1)?;
        }

        Ok(())
    }

    fn validate_condition(&self, condition: &Condition) -> Result<(), ValidationError> {
        let kind = condition.kind();
        if self.denied_kinds.contains(&kind) {
            return Err(ValidationError::KindDenied { kind });
        }

        match condition {
            Condition::Exists { subquery, .. } => {
                if subquery.trim().is_empty() {
                    return Err(ValidationError::EmptySubquery);
                }
            },
            _ => {
                if let Some(column) = condition.column() {
                    self.validate_column(column)?;
                }
            },
        }

        Ok(())
    }

    fn validate_column(&self, column: &str) -> Result<(), ValidationError> {
        if self.require_plain_identifiers && !is_valid_sql_identifier(column) {
            return Err(ValidationError::InvalidIdentifier {
                column: column.to_string(),
            });
        }

        if !self.allowed_columns.is_empty() && !self.allowed_columns.iter().any(|c| c == column) {
            return Err(ValidationError::ColumnNotAllowed {
                column: column.to_string(),
                allowed: self.allowed_columns.clone(),
            });
        }

        Ok(())
    }
}
