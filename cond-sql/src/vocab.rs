//! Comparison and logical operator vocabulary.

use std::fmt;

use serde::Deserialize;

/// Logical combinator applied to every direct child of a [`Group`](crate::Group).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(clippy::exhaustive_enums)]
pub enum LogicalOperator {
    /// All children must match: `AND`
    #[default]
    And,
    /// At least one child must match: `OR`
    Or,
}

impl LogicalOperator {
    /// SQL keyword for this combinator.
    #[inline]
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    /// Separator used when joining sibling fragments, e.g. `" AND "`.
    #[inline]
    pub(crate) const fn separator(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Every kind of leaf condition the compiler knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[allow(clippy::exhaustive_enums)]
pub enum ComparisonKind {
    /// `col = v`
    Equals,
    /// `col <> v`
    NotEquals,
    /// `col > v`
    GreaterThan,
    /// `col < v`
    LessThan,
    /// `col >= v`
    GreaterOrEqual,
    /// `col <= v`
    LessOrEqual,
    /// `col LIKE v`
    Like,
    /// `col NOT LIKE v`
    NotLike,
    /// `col IN (v1, v2, ...)`
    In,
    /// `col NOT IN (v1, v2, ...)`
    NotIn,
    /// `col BETWEEN a AND b`
    Between,
    /// `col NOT BETWEEN a AND b`
    NotBetween,
    /// `col IS NULL`
    IsNull,
    /// `col IS NOT NULL`
    IsNotNull,
    /// `EXISTS (subquery)`
    Exists,
    /// `NOT EXISTS (subquery)`
    NotExists,
}

impl ComparisonKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::Equals,
        Self::NotEquals,
        Self::GreaterThan,
        Self::LessThan,
        Self::GreaterOrEqual,
        Self::LessOrEqual,
        Self::Like,
        Self::NotLike,
        Self::In,
        Self::NotIn,
        Self::Between,
        Self::NotBetween,
        Self::IsNull,
        Self::IsNotNull,
        Self::Exists,
        Self::NotExists,
    ];

    /// SQL keyword or operator text for this kind.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::NotEquals => "<>",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Between => "BETWEEN",
            Self::NotBetween => "NOT BETWEEN",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
            Self::Exists => "EXISTS",
            Self::NotExists => "NOT EXISTS",
        }
    }

    /// Whether this kind is the `NOT` form of another kind.
    #[must_use]
    pub const fn is_negated(self) -> bool {
        matches!(
            self,
            Self::NotEquals
                | Self::NotLike
                | Self::NotIn
                | Self::NotBetween
                | Self::IsNotNull
                | Self::NotExists
        )
    }

    /// Whether conditions of this kind reference a column.
    #[must_use]
    pub const fn has_column(self) -> bool {
        !matches!(self, Self::Exists | Self::NotExists)
    }
}

impl fmt::Display for ComparisonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The single-value comparison kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::exhaustive_enums)]
pub enum CompareOp {
    /// Equal: `=`
    Eq,
    /// Not equal: `<>`
    Ne,
    /// Greater than: `>`
    Gt,
    /// Less than: `<`
    Lt,
    /// Greater than or equal: `>=`
    Gte,
    /// Less than or equal: `<=`
    Lte,
    /// Pattern match: `LIKE`
    Like,
    /// Negated pattern match: `NOT LIKE`
    NotLike,
}

impl CompareOp {
    /// The [`ComparisonKind`] this operator belongs to.
    #[must_use]
    pub const fn kind(self) -> ComparisonKind {
        match self {
            Self::Eq => ComparisonKind::Equals,
            Self::Ne => ComparisonKind::NotEquals,
            Self::Gt => ComparisonKind::GreaterThan,
            Self::Lt => ComparisonKind::LessThan,
            Self::Gte => ComparisonKind::GreaterOrEqual,
            Self::Lte => ComparisonKind::LessOrEqual,
            Self::Like => ComparisonKind::Like,
            Self::NotLike => ComparisonKind::NotLike,
        }
    }

    /// SQL operator text.
    #[inline]
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        self.kind().keyword()
    }
}
