//! Boolean condition trees for WHERE, HAVING and JOIN ... ON.
//!
//! A [`Condition`] is either a leaf (literal text, text with `?` placeholders
//! and bound arguments, a raw [`Expression`] or a subquery) or a group of
//! children combined under an [`Operator`].
//!
//! Statements grow their trees through `merge_condition`: repeated merges
//! under the same operator append to the root group, a different operator
//! wraps the existing root, and the negated operators wrap the new node in
//! its own `NOT` group so the negation binds to exactly that node.
//!
//! # Example
//! ```ignore
//! use sqlweave::prelude::*;
//!
//! let q = Select::new()
//!     .from("users")
//!     .and_where(("status = ?", "active"))
//!     .and_where(("role IN (?)", vec!["admin", "owner"]))
//!     .or_not_where("deleted_at IS NOT NULL");
//! ```

use crate::expression::Expression;
use crate::stmt::Select;
use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

/// Logical operator of a condition group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Every child must hold.
    All,
    /// At least one child must hold.
    Any,
    /// No child may hold: `NOT (a) AND NOT (b)`.
    NotAll,
    /// At least one child must not hold: `NOT (a) OR NOT (b)`.
    NotAny,
}

impl Operator {
    /// SQL keyword joining the children of a group.
    pub fn keyword(self) -> &'static str {
        match self {
            Operator::All | Operator::NotAll => "AND",
            Operator::Any | Operator::NotAny => "OR",
        }
    }

    /// Whether each child is rendered under `NOT`.
    pub fn is_negated(self) -> bool {
        matches!(self, Operator::NotAll | Operator::NotAny)
    }
}

/// An argument bound to one `?` placeholder of a keyed condition.
#[derive(Clone, Debug, PartialEq)]
pub enum Bound {
    /// Single scalar: renders as `?`.
    Value(Value),
    /// List of scalars: renders as `?, ?, ?` (or `NULL` when empty).
    List(Vec<Value>),
    /// Raw fragment spliced in place of the placeholder.
    Expr(Expression),
    /// Subquery spliced in place of the placeholder as `(SELECT ...)`.
    Select(Box<Select>),
}

/// A node of a condition tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    /// Text without parameters, e.g. `c1 = c2`.
    Literal(String),
    /// Text with `?` placeholders and their arguments.
    Keyed { expr: String, args: Vec<Bound> },
    /// Raw expression carrying its own values.
    Raw(Expression),
    /// Subquery used as a predicate.
    Sub(Box<Select>),
    /// Children combined under an operator. Never empty.
    Group {
        op: Operator,
        children: Vec<Condition>,
    },
}

impl Condition {
    /// Literal condition text.
    pub fn literal(sql: impl Into<String>) -> Self {
        Condition::Literal(sql.into())
    }

    /// Condition text with a single argument.
    ///
    /// A list argument bound to a lone placeholder expands in place, so
    /// `bind("id IN (?)", vec![1, 2, 3])` renders `id IN (?, ?, ?)`.
    pub fn bind(expr: impl Into<String>, arg: impl Into<Bound>) -> Self {
        Condition::Keyed {
            expr: expr.into(),
            args: vec![arg.into()],
        }
    }

    /// Condition text with one argument per placeholder.
    ///
    /// # Example
    /// ```ignore
    /// Condition::bind_all("a IN (?) AND b < ?", [Bound::from(vec![1, 2]), Bound::from(3)])
    /// ```
    pub fn bind_all<I>(expr: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Bound>,
    {
        Condition::Keyed {
            expr: expr.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Group combining children with AND. Empty input yields the literal `1`.
    pub fn all<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Condition>,
    {
        Self::group(Operator::All, children)
    }

    /// Group combining children with OR. Empty input yields the literal `0`.
    pub fn any<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Condition>,
    {
        Self::group(Operator::Any, children)
    }

    /// Group rendered as `NOT (a) AND NOT (b)`.
    pub fn not_all<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Condition>,
    {
        Self::group(Operator::NotAll, children)
    }

    /// Group rendered as `NOT (a) OR NOT (b)`.
    pub fn not_any<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Condition>,
    {
        Self::group(Operator::NotAny, children)
    }

    /// Group under an explicit operator.
    ///
    /// An empty group is replaced by a boolean literal: `1` for
    /// [`Operator::All`], `0` otherwise.
    pub fn group<I>(op: Operator, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Condition>,
    {
        let mut children: Vec<Condition> = children.into_iter().map(Into::into).collect();
        if children.is_empty() {
            let truth = if op == Operator::All { "1" } else { "0" };
            children.push(Condition::Literal(truth.to_string()));
        }
        Condition::Group { op, children }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Condition::Group { .. })
    }

    /// Operator of a group node.
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Condition::Group { op, .. } => Some(*op),
            _ => None,
        }
    }

    /// Children of a group node (empty for leaves).
    pub fn children(&self) -> &[Condition] {
        match self {
            Condition::Group { children, .. } => children,
            _ => &[],
        }
    }
}

/// Normalize caller input into a group.
///
/// Pre-built groups pass through unchanged; any leaf is wrapped in a
/// single-child AND group.
pub(crate) fn build_condition(condition: Condition) -> Condition {
    if condition.is_group() {
        condition
    } else {
        Condition::Group {
            op: Operator::All,
            children: vec![condition],
        }
    }
}

/// Merge `condition` into the tree at `base` under `op`.
pub(crate) fn merge_condition(base: &mut Option<Condition>, condition: Condition, op: Operator) {
    let merged = match base.take() {
        None => Condition::Group {
            op,
            children: vec![condition],
        },
        Some(Condition::Group {
            op: base_op,
            mut children,
        }) if base_op == op => {
            children.push(condition);
            Condition::Group { op, children }
        }
        Some(existing) => match op {
            Operator::NotAll => Condition::Group {
                op: Operator::All,
                children: vec![
                    existing,
                    Condition::Group {
                        op: Operator::NotAll,
                        children: vec![condition],
                    },
                ],
            },
            Operator::NotAny => Condition::Group {
                op: Operator::Any,
                children: vec![
                    existing,
                    Condition::Group {
                        op: Operator::NotAny,
                        children: vec![condition],
                    },
                ],
            },
            _ => Condition::Group {
                op,
                children: vec![existing, condition],
            },
        },
    };

    *base = Some(merged);
}

// ==================== Conversions into Bound ====================

macro_rules! impl_bound_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Bound {
                fn from(v: $t) -> Self {
                    Bound::Value(Value::from(v))
                }
            }
        )*
    };
}

macro_rules! impl_bound_list {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<Vec<$t>> for Bound {
                fn from(v: Vec<$t>) -> Self {
                    Bound::List(v.into_iter().map(Value::from).collect())
                }
            }

            impl<const N: usize> From<[$t; N]> for Bound {
                fn from(v: [$t; N]) -> Self {
                    Bound::List(v.into_iter().map(Value::from).collect())
                }
            }

            impl From<&[$t]> for Bound {
                fn from(v: &[$t]) -> Self {
                    Bound::List(v.iter().cloned().map(Value::from).collect())
                }
            }
        )*
    };
}

impl_bound_scalar!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    &str,
    String,
    Uuid,
    NaiveDate,
    NaiveDateTime,
    DateTime<Utc>,
    serde_json::Value,
);

impl_bound_list!(
    bool,
    i16,
    i32,
    i64,
    u16,
    u32,
    f64,
    &str,
    String,
    Uuid,
    NaiveDate,
    NaiveDateTime,
    DateTime<Utc>,
    Value,
);

#[cfg(feature = "rust_decimal")]
impl_bound_scalar!(rust_decimal::Decimal);

impl From<Value> for Bound {
    fn from(v: Value) -> Self {
        Bound::Value(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Bound {
    fn from(v: Option<T>) -> Self {
        Bound::Value(Value::from(v))
    }
}

impl From<Expression> for Bound {
    fn from(e: Expression) -> Self {
        Bound::Expr(e)
    }
}

impl From<Select> for Bound {
    fn from(s: Select) -> Self {
        Bound::Select(Box::new(s))
    }
}

// ==================== Conversions into Condition ====================

impl From<&str> for Condition {
    fn from(s: &str) -> Self {
        Condition::Literal(s.to_string())
    }
}

impl From<String> for Condition {
    fn from(s: String) -> Self {
        Condition::Literal(s)
    }
}

impl From<Expression> for Condition {
    fn from(e: Expression) -> Self {
        Condition::Raw(e)
    }
}

impl From<Select> for Condition {
    fn from(s: Select) -> Self {
        Condition::Sub(Box::new(s))
    }
}

impl<T: Into<Bound>> From<(&str, T)> for Condition {
    fn from((expr, arg): (&str, T)) -> Self {
        Condition::bind(expr, arg)
    }
}

impl<T: Into<Bound>> From<(String, T)> for Condition {
    fn from((expr, arg): (String, T)) -> Self {
        Condition::bind(expr, arg)
    }
}

/// A list of conditions is combined with AND.
impl From<Vec<Condition>> for Condition {
    fn from(children: Vec<Condition>) -> Self {
        Condition::all(children)
    }
}

/// Keyed pairs sharing an argument type are combined with AND.
impl<T: Into<Bound>, const N: usize> From<[(&str, T); N]> for Condition {
    fn from(pairs: [(&str, T); N]) -> Self {
        Condition::all(pairs.map(Condition::from))
    }
}
