//! Fluent builder for condition trees.
//!
//! The builder keeps a stack of in-progress groups. Leaf methods append to the
//! group on top of the stack; [`ConditionBuilder::group`] pushes a child group,
//! runs the nested closure and pops it again.
//!
//! # Example
//!
//! ```
//! use cond_sql::{ConditionBuilder, LogicalOperator, SqlServer, to_where_clause};
//!
//! let tree = ConditionBuilder::new()
//!     .equals("Status", "Active")
//!     .greater_than("Score", 75)
//!     .group(LogicalOperator::Or, |g| {
//!         g.less_than("Age", 18).greater_than("Age", 65)
//!     })
//!     .build()?;
//!
//! assert_eq!(
//!     to_where_clause(&tree, SqlServer)?,
//!     "WHERE [Status] = 'Active' AND [Score] > 75 AND ([Age] < 18 OR [Age] > 65)"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::condition::{Condition, Group};
use crate::value::Scalar;
use crate::vocab::{CompareOp, LogicalOperator};

/// Misuse of the builder's group stack.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    /// `build` was called while nested groups were still open.
    #[error("{open} nested group(s) still open at build time")]
    UnclosedGroups { open: usize },
    /// `close_group` was called with only the root group on the stack.
    #[error("close_group called with no open nested group")]
    NoOpenGroup,
    /// A `group` closure returned with a different stack depth than it started with.
    #[error("group closure left the stack unbalanced: expected depth {expected}, found {actual}")]
    UnbalancedGroup { expected: usize, actual: usize },
}

/// Stack-based fluent builder producing a [`Group`] tree.
///
/// The builder is moved through the chain, so a single owner drives it from
/// start to [`build`](Self::build).
#[derive(Debug)]
#[must_use = "builder does nothing until build() is called"]
pub struct ConditionBuilder {
    root: Group,
    open: Vec<Group>,
    fault: Option<BuildError>,
}

impl Default for ConditionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConditionBuilder {
    /// Create a builder whose root group combines with `AND`.
    pub fn new() -> Self {
        Self::with_operator(LogicalOperator::And)
    }

    /// Create a builder whose root group combines with `operator`.
    pub fn with_operator(operator: LogicalOperator) -> Self {
        Self {
            root: Group::new(operator),
            open: Vec::new(),
            fault: None,
        }
    }

    /// Number of nested groups currently open (0 at the root).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    fn current(&mut self) -> &mut Group {
        self.open.last_mut().unwrap_or(&mut self.root)
    }

    fn push(mut self, condition: Condition) -> Self {
        self.current().conditions.push(condition);
        self
    }

    fn compare(self, column: impl Into<String>, op: CompareOp, value: impl Into<Scalar>) -> Self {
        self.push(Condition::compare(column, op, value))
    }

    /// Append a prebuilt condition to the current group.
    pub fn condition(self, condition: Condition) -> Self {
        self.push(condition)
    }

    /// Append a prebuilt group as a child of the current group.
    pub fn with_group(mut self, group: Group) -> Self {
        self.current().subgroups.push(group);
        self
    }

    /// `column = value`
    pub fn equals(self, column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.compare(column, CompareOp::Eq, value)
    }

    /// `column <> value`
    pub fn not_equals(self, column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.compare(column, CompareOp::Ne, value)
    }

    /// `column > value`
    pub fn greater_than(self, column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.compare(column, CompareOp::Gt, value)
    }

    /// `column >= value`
    pub fn greater_or_equal(self, column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.compare(column, CompareOp::Gte, value)
    }

    /// `column < value`
    pub fn less_than(self, column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.compare(column, CompareOp::Lt, value)
    }

    /// `column <= value`
    pub fn less_or_equal(self, column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.compare(column, CompareOp::Lte, value)
    }

    /// `column LIKE pattern`
    pub fn like(self, column: impl Into<String>, pattern: impl Into<Scalar>) -> Self {
        self.compare(column, CompareOp::Like, pattern)
    }

    /// `column NOT LIKE pattern`
    pub fn not_like(self, column: impl Into<String>, pattern: impl Into<Scalar>) -> Self {
        self.compare(column, CompareOp::NotLike, pattern)
    }

    /// `column IS NULL`
    pub fn is_null(self, column: impl Into<String>) -> Self {
        self.push(Condition::is_null(column))
    }

    /// `column IS NOT NULL`
    pub fn is_not_null(self, column: impl Into<String>) -> Self {
        self.push(Condition::is_not_null(column))
    }

    /// `column BETWEEN from AND to`. Bounds are not reordered.
    pub fn between(
        self,
        column: impl Into<String>,
        from: impl Into<Scalar>,
        to: impl Into<Scalar>,
    ) -> Self {
        self.push(Condition::between(column, from, to))
    }

    /// `column NOT BETWEEN from AND to`
    pub fn not_between(
        self,
        column: impl Into<String>,
        from: impl Into<Scalar>,
        to: impl Into<Scalar>,
    ) -> Self {
        self.push(Condition::not_between(column, from, to))
    }

    /// `column IN (...)`. An empty set renders as `IN ()`.
    pub fn in_list<I, V>(self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        self.push(Condition::in_set(column, values))
    }

    /// `column NOT IN (...)`. An empty set renders as `NOT IN ()`.
    pub fn not_in_list<I, V>(self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        self.push(Condition::not_in_set(column, values))
    }

    /// `EXISTS (subquery)`. The subquery is inserted verbatim.
    pub fn exists(self, subquery: impl Into<String>) -> Self {
        self.push(Condition::exists(subquery))
    }

    /// `NOT EXISTS (subquery)`
    pub fn not_exists(self, subquery: impl Into<String>) -> Self {
        self.push(Condition::not_exists(subquery))
    }

    /// Open a nested group and make it current.
    ///
    /// Must be paired with [`close_group`](Self::close_group) before
    /// [`build`](Self::build). Prefer [`group`](Self::group) where a closure fits.
    pub fn open_group(mut self, operator: LogicalOperator) -> Self {
        self.open.push(Group::new(operator));
        self
    }

    /// Close the current nested group, attaching it to its parent.
    pub fn close_group(mut self) -> Result<Self, BuildError> {
        if self.close_top() {
            Ok(self)
        } else {
            Err(BuildError::NoOpenGroup)
        }
    }

    fn close_top(&mut self) -> bool {
        match self.open.pop() {
            Some(group) => {
                self.current().subgroups.push(group);
                true
            },
            None => false,
        }
    }

    /// Build a nested group with `operator` inside `nested`.
    ///
    /// The closure receives the builder with the new group on top of the stack
    /// and must hand it back at the same depth. If it does not, the stack is
    /// restored and [`build`](Self::build) reports [`BuildError::UnbalancedGroup`].
    pub fn group<F>(self, operator: LogicalOperator, nested: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let expected = self.open.len() + 1;
        let mut this = nested(self.open_group(operator));

        let actual = this.open.len();
        if actual != expected {
            tracing::debug!(expected, actual, "group closure left the builder stack unbalanced");
            this.fault
                .get_or_insert(BuildError::UnbalancedGroup { expected, actual });
        }
        while this.open.len() >= expected {
            this.close_top();
        }
        this
    }

    /// Like [`group`](Self::group), but an unbalanced closure fails here
    /// instead of at [`build`](Self::build).
    ///
    /// ```
    /// use cond_sql::{BuildError, ConditionBuilder, LogicalOperator};
    ///
    /// let err = ConditionBuilder::new()
    ///     .try_group(LogicalOperator::Or, |g| g.open_group(LogicalOperator::And))
    ///     .unwrap_err();
    /// assert_eq!(err, BuildError::UnbalancedGroup { expected: 1, actual: 2 });
    /// ```
    pub fn try_group<F>(self, operator: LogicalOperator, nested: F) -> Result<Self, BuildError>
    where
        F: FnOnce(Self) -> Self,
    {
        let expected = self.open.len() + 1;
        let mut this = nested(self.open_group(operator));

        let actual = this.open.len();
        if actual != expected {
            return Err(BuildError::UnbalancedGroup { expected, actual });
        }
        this.close_top();
        Ok(this)
    }

    /// Shorthand for `group(LogicalOperator::And, nested)`.
    pub fn and_group<F>(self, nested: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.group(LogicalOperator::And, nested)
    }

    /// Shorthand for `group(LogicalOperator::Or, nested)`.
    pub fn or_group<F>(self, nested: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.group(LogicalOperator::Or, nested)
    }

    /// Finish building and return the root group.
    ///
    /// Fails if nested groups are still open or a `group` closure left the
    /// stack unbalanced.
    pub fn build(self) -> Result<Group, BuildError> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }
        if !self.open.is_empty() {
            tracing::debug!(open = self.open.len(), "build called with open groups");
            return Err(BuildError::UnclosedGroups {
                open: self.open.len(),
            });
        }
        Ok(self.root)
    }
}
