//! Clause traits shared by the statement types.
//!
//! Each trait exposes one clause through a storage accessor and provides the
//! builder methods on top of it, so every statement that stores the clause
//! gets the same API. Bring them into scope through [`crate::prelude`].

use crate::builder::QueryBuilder;
use crate::condition::{Condition, Operator, build_condition, merge_condition};
use crate::error::SqlResult;
use crate::stmt::clause::{Column, IntoOrderBy};
use crate::stmt::select::Select;
use crate::value::Value;

/// Output of assembling a statement: SQL text with `?` placeholders and the
/// values to bind, in placeholder order.
#[derive(Clone, Debug, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl BuiltQuery {
    /// Create a new built query.
    pub fn new(sql: String, params: Vec<Value>) -> Self {
        Self { sql, params }
    }

    /// Split into `(sql, params)`.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    /// Number of `?` placeholders in the SQL text.
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }
}

/// A statement the [`QueryBuilder`] can assemble.
pub trait Statement {
    /// Statement kind as used in log output and errors.
    const KIND: &'static str;

    /// Render with the given builder.
    fn assemble_with(&self, builder: &QueryBuilder) -> SqlResult<BuiltQuery>;
}

// ==================== WHERE ====================

/// WHERE clause support.
///
/// Same-operator calls flatten into one group; switching operator wraps the
/// existing tree once.
///
/// ```ignore
/// let q = Select::new()
///     .from("t")
///     .and_where("c1 = x")
///     .and_where(("c2 = ?", 1))
///     .or_where(("c3 IN (?)", vec![1, 2, 3]));
/// // WHERE ((c1 = x) AND (c2 = ?)) OR (c3 IN (?, ?, ?))
/// ```
pub trait WhereClause: Sized {
    #[doc(hidden)]
    fn where_slot(&mut self) -> &mut Option<Condition>;

    /// Current WHERE tree, if any.
    fn where_condition(&self) -> Option<&Condition>;

    /// Add a condition combined with AND.
    fn and_where(mut self, condition: impl Into<Condition>) -> Self {
        merge_condition(
            self.where_slot(),
            build_condition(condition.into()),
            Operator::All,
        );
        self
    }

    /// Add a condition combined with OR.
    fn or_where(mut self, condition: impl Into<Condition>) -> Self {
        merge_condition(
            self.where_slot(),
            build_condition(condition.into()),
            Operator::Any,
        );
        self
    }

    /// Add a negated condition combined with AND.
    fn not_where(mut self, condition: impl Into<Condition>) -> Self {
        merge_condition(
            self.where_slot(),
            build_condition(condition.into()),
            Operator::NotAll,
        );
        self
    }

    /// Add a negated condition combined with OR.
    fn or_not_where(mut self, condition: impl Into<Condition>) -> Self {
        merge_condition(
            self.where_slot(),
            build_condition(condition.into()),
            Operator::NotAny,
        );
        self
    }

    fn reset_where(mut self) -> Self {
        *self.where_slot() = None;
        self
    }
}

// ==================== ORDER BY ====================

/// ORDER BY clause support. Directions are validated by the dialect at
/// assembly time.
pub trait OrderBy: Sized {
    #[doc(hidden)]
    fn order_by_slot(&mut self) -> &mut Vec<(Column, Option<String>)>;

    fn order_by_list(&self) -> &[(Column, Option<String>)];

    fn has_order_by(&self) -> bool {
        !self.order_by_list().is_empty()
    }

    /// Append ORDER BY items.
    ///
    /// ```ignore
    /// q.order_by([("a", "DESC"), ("b", "ASC")]);
    /// q.order_by("c");
    /// ```
    fn order_by(mut self, items: impl IntoOrderBy) -> Self {
        self.order_by_slot().extend(items.into_order_by());
        self
    }

    fn reset_order_by(mut self) -> Self {
        self.order_by_slot().clear();
        self
    }
}

// ==================== LIMIT / OFFSET ====================

/// LIMIT and OFFSET support.
pub trait LimitOffset: Sized {
    #[doc(hidden)]
    fn limit_slot(&mut self) -> &mut Option<u64>;

    #[doc(hidden)]
    fn offset_slot(&mut self) -> &mut Option<u64>;

    fn get_limit(&self) -> Option<u64>;

    fn get_offset(&self) -> Option<u64>;

    fn has_limit(&self) -> bool {
        self.get_limit().is_some()
    }

    fn has_offset(&self) -> bool {
        self.get_offset().is_some()
    }

    /// Set LIMIT. A negative value removes it.
    fn limit(mut self, limit: i64) -> Self {
        *self.limit_slot() = u64::try_from(limit).ok();
        self
    }

    /// Set OFFSET. Zero or a negative value removes it.
    fn offset(mut self, offset: i64) -> Self {
        *self.offset_slot() = u64::try_from(offset).ok().filter(|o| *o > 0);
        self
    }

    fn reset_limit(mut self) -> Self {
        *self.limit_slot() = None;
        self
    }

    fn reset_offset(mut self) -> Self {
        *self.offset_slot() = None;
        self
    }
}

// ==================== WITH ====================

/// One WITH entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Cte {
    pub query: Select,
    pub alias: String,
    pub recursive: bool,
}

/// WITH (common table expression) support.
pub trait CommonTableExpression: Sized {
    #[doc(hidden)]
    fn with_slot(&mut self) -> &mut Vec<Cte>;

    fn with_list(&self) -> &[Cte];

    /// Add `alias AS (query)`.
    fn with(mut self, query: Select, alias: impl Into<String>) -> Self {
        self.with_slot().push(Cte {
            query,
            alias: alias.into(),
            recursive: false,
        });
        self
    }

    /// Add a recursive CTE. Any recursive entry renders `WITH RECURSIVE`.
    fn with_recursive(mut self, query: Select, alias: impl Into<String>) -> Self {
        self.with_slot().push(Cte {
            query,
            alias: alias.into(),
            recursive: true,
        });
        self
    }

    fn reset_with(mut self) -> Self {
        self.with_slot().clear();
        self
    }
}

/// Implement the clause traits for a statement struct by naming its fields.
macro_rules! impl_where_clause {
    ($ty:ty, $field:ident) => {
        impl $crate::stmt::traits::WhereClause for $ty {
            fn where_slot(&mut self) -> &mut Option<$crate::condition::Condition> {
                &mut self.$field
            }

            fn where_condition(&self) -> Option<&$crate::condition::Condition> {
                self.$field.as_ref()
            }
        }
    };
}

macro_rules! impl_cte {
    ($ty:ty, $field:ident) => {
        impl $crate::stmt::traits::CommonTableExpression for $ty {
            fn with_slot(&mut self) -> &mut Vec<$crate::stmt::traits::Cte> {
                &mut self.$field
            }

            fn with_list(&self) -> &[$crate::stmt::traits::Cte] {
                &self.$field
            }
        }
    };
}

pub(crate) use impl_cte;
pub(crate) use impl_where_clause;
