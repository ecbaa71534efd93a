//! Condition tree: leaf [`Condition`]s grouped under [`Group`] nodes.
//!
//! The payload of a condition is part of its variant, so a `Between` always
//! carries a range and an `In` always carries a value set. There is no way to
//! construct a condition whose payload does not match its kind.

use crate::value::Scalar;
use crate::vocab::{CompareOp, ComparisonKind, LogicalOperator};

/// A leaf comparison in a `WHERE` clause.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::exhaustive_enums)]
pub enum Condition {
    /// `col <op> value` for the eight single-value kinds.
    Compare {
        column: String,
        op: CompareOp,
        value: Scalar,
    },
    /// `col [NOT ]BETWEEN from AND to`. Bounds are kept in argument order.
    Range {
        column: String,
        negated: bool,
        from: Scalar,
        to: Scalar,
    },
    /// `col [NOT ]IN (...)`. Order and duplicates are preserved.
    Set {
        column: String,
        negated: bool,
        values: Vec<Scalar>,
    },
    /// `col IS [NOT ]NULL`
    Null { column: String, negated: bool },
    /// `[NOT ]EXISTS (subquery)`. The subquery text is trusted verbatim.
    Exists { negated: bool, subquery: String },
}

impl Condition {
    /// Single-value comparison.
    pub fn compare(column: impl Into<String>, op: CompareOp, value: impl Into<Scalar>) -> Self {
        Self::Compare {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    /// `col BETWEEN from AND to`
    pub fn between(
        column: impl Into<String>,
        from: impl Into<Scalar>,
        to: impl Into<Scalar>,
    ) -> Self {
        Self::Range {
            column: column.into(),
            negated: false,
            from: from.into(),
            to: to.into(),
        }
    }

    /// `col NOT BETWEEN from AND to`
    pub fn not_between(
        column: impl Into<String>,
        from: impl Into<Scalar>,
        to: impl Into<Scalar>,
    ) -> Self {
        Self::Range {
            column: column.into(),
            negated: true,
            from: from.into(),
            to: to.into(),
        }
    }

    /// `col IN (...)`
    pub fn in_set<I, V>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        Self::Set {
            column: column.into(),
            negated: false,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// `col NOT IN (...)`
    pub fn not_in_set<I, V>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        Self::Set {
            column: column.into(),
            negated: true,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// `col IS NULL`
    pub fn is_null(column: impl Into<String>) -> Self {
        Self::Null {
            column: column.into(),
            negated: false,
        }
    }

    /// `col IS NOT NULL`
    pub fn is_not_null(column: impl Into<String>) -> Self {
        Self::Null {
            column: column.into(),
            negated: true,
        }
    }

    /// `EXISTS (subquery)`
    pub fn exists(subquery: impl Into<String>) -> Self {
        Self::Exists {
            negated: false,
            subquery: subquery.into(),
        }
    }

    /// `NOT EXISTS (subquery)`
    pub fn not_exists(subquery: impl Into<String>) -> Self {
        Self::Exists {
            negated: true,
            subquery: subquery.into(),
        }
    }

    /// The comparison kind, derived from the variant.
    #[must_use]
    pub const fn kind(&self) -> ComparisonKind {
        match self {
            Self::Compare { op, .. } => op.kind(),
            Self::Range { negated, .. } => {
                if *negated {
                    ComparisonKind::NotBetween
                } else {
                    ComparisonKind::Between
                }
            },
            Self::Set { negated, .. } => {
                if *negated {
                    ComparisonKind::NotIn
                } else {
                    ComparisonKind::In
                }
            },
            Self::Null { negated, .. } => {
                if *negated {
                    ComparisonKind::IsNotNull
                } else {
                    ComparisonKind::IsNull
                }
            },
            Self::Exists { negated, .. } => {
                if *negated {
                    ComparisonKind::NotExists
                } else {
                    ComparisonKind::Exists
                }
            },
        }
    }

    /// The referenced column, or `None` for `EXISTS` conditions.
    #[must_use]
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::Compare { column, .. }
            | Self::Range { column, .. }
            | Self::Set { column, .. }
            | Self::Null { column, .. } => Some(column),
            Self::Exists { .. } => None,
        }
    }
}

/// An internal tree node: one logical operator over ordered conditions and
/// ordered subgroups.
#[derive(Debug, Clone, PartialEq, Default)]
#[allow(clippy::exhaustive_structs)]
pub struct Group {
    /// Combinator for every direct child.
    pub operator: LogicalOperator,
    /// Leaf conditions, in insertion order.
    pub conditions: Vec<Condition>,
    /// Nested groups, in insertion order.
    pub subgroups: Vec<Group>,
}

impl Group {
    /// Create an empty group with the given operator.
    #[must_use]
    pub const fn new(operator: LogicalOperator) -> Self {
        Self {
            operator,
            conditions: Vec::new(),
            subgroups: Vec::new(),
        }
    }

    /// Create an AND group from conditions.
    #[must_use]
    pub fn and(conditions: Vec<Condition>) -> Self {
        Self {
            operator: LogicalOperator::And,
            conditions,
            subgroups: Vec::new(),
        }
    }

    /// Create an OR group from conditions.
    #[must_use]
    pub fn or(conditions: Vec<Condition>) -> Self {
        Self {
            operator: LogicalOperator::Or,
            conditions,
            subgroups: Vec::new(),
        }
    }

    /// Append a condition.
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Append a subgroup.
    #[must_use]
    pub fn with_group(mut self, group: Self) -> Self {
        self.subgroups.push(group);
        self
    }

    /// No direct conditions and no direct subgroups.
    ///
    /// A group whose subgroups are all (recursively) empty is not `is_empty`,
    /// but still compiles to the empty string; see [`Group::is_vacuous`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.subgroups.is_empty()
    }

    /// Contains no condition anywhere in the subtree.
    #[must_use]
    pub fn is_vacuous(&self) -> bool {
        self.conditions.is_empty() && self.subgroups.iter().all(Self::is_vacuous)
    }

    /// Total number of conditions in the subtree.
    #[must_use]
    pub fn condition_count(&self) -> usize {
        self.conditions.len()
            + self
                .subgroups
                .iter()
                .map(Self::condition_count)
                .sum::<usize>()
    }

    /// Nesting depth below this group (0 for a group without subgroups).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.subgroups
            .iter()
            .map(|g| g.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Visit every condition in the subtree, depth-first, conditions before
    /// subgroups. `depth` is 0 for the receiver's own conditions.
    pub fn walk<'a, F>(&'a self, f: &mut F)
    where
        F: FnMut(&'a Condition, usize),
    {
        self.walk_at(0, f);
    }

    fn walk_at<'a, F>(&'a self, depth: usize, f: &mut F)
    where
        F: FnMut(&'a Condition, usize),
    {
        for condition in &self.conditions {
            f(condition, depth);
        }
        for group in &self.subgroups {
            group.walk_at(depth + 1, f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_follows_variant() {
        assert_eq!(
            Condition::compare("a", CompareOp::Like, "x%").kind(),
            ComparisonKind::Like
        );
        assert_eq!(Condition::between("a", 1, 2).kind(), ComparisonKind::Between);
        assert_eq!(
            Condition::not_between("a", 1, 2).kind(),
            ComparisonKind::NotBetween
        );
        assert_eq!(Condition::in_set("a", [1, 2]).kind(), ComparisonKind::In);
        assert_eq!(
            Condition::not_in_set("a", Vec::<i32>::new()).kind(),
            ComparisonKind::NotIn
        );
        assert_eq!(Condition::is_null("a").kind(), ComparisonKind::IsNull);
        assert_eq!(Condition::is_not_null("a").kind(), ComparisonKind::IsNotNull);
        assert_eq!(Condition::exists("SELECT 1").kind(), ComparisonKind::Exists);
        assert_eq!(
            Condition::not_exists("SELECT 1").kind(),
            ComparisonKind::NotExists
        );
    }

    #[test]
    fn test_column_accessor() {
        assert_eq!(Condition::is_null("DocEntry").column(), Some("DocEntry"));
        assert_eq!(Condition::exists("SELECT 1").column(), None);
    }

    #[test]
    fn test_set_preserves_order_and_duplicates() {
        let cond = Condition::in_set("Code", ["b", "a", "b"]);
        let Condition::Set { values, .. } = cond else {
            panic!("expected Set");
        };
        assert_eq!(
            values,
            vec![
                Scalar::String("b".into()),
                Scalar::String("a".into()),
                Scalar::String("b".into()),
            ]
        );
    }

    #[test]
    fn test_group_metrics() {
        let group = Group::and(vec![Condition::is_null("a")])
            .with_group(Group::or(vec![
                Condition::is_null("b"),
                Condition::is_null("c"),
            ]))
            .with_group(Group::new(LogicalOperator::And).with_group(Group::default()));

        assert_eq!(group.condition_count(), 3);
        assert_eq!(group.depth(), 2);
        assert!(!group.is_empty());
        assert!(!group.is_vacuous());
        assert!(group.subgroups[1].is_vacuous());
        assert!(!group.subgroups[1].is_empty());
    }

    #[test]
    fn test_walk_reports_depth() {
        let group = Group::and(vec![Condition::is_null("a")])
            .with_group(Group::or(vec![Condition::is_null("b")]));
        let mut seen = Vec::new();
        group.walk(&mut |c, depth| seen.push((c.column().map(str::to_string), depth)));
        assert_eq!(
            seen,
            vec![(Some("a".to_string()), 0), (Some("b".to_string()), 1)]
        );
    }
}
