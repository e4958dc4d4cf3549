//! Predicate helpers producing [`Condition`] values.
//!
//! Each helper renders one column comparison in the shape expected by SQL
//! NULL semantics: negative comparisons also match NULL rows, so
//! `unequal("c", 1)` yields `(c != ? OR c IS NULL)`.
//!
//! # Example
//! ```ignore
//! use sqlweave::filter;
//! use sqlweave::prelude::*;
//!
//! let q = Select::new()
//!     .columns("*")
//!     .from("hosts")
//!     .and_where(filter::like("name", "web*"))
//!     .and_where(filter::equal("state", vec![0, 1]))
//!     .not_where(filter::is_null("acknowledged_at"));
//! ```

use crate::condition::{Bound, Condition};
use crate::stmt::Select;
use crate::value::Value;

// ==================== Pattern matching ====================

/// Translate a wildcard pattern: `*` matches anything, a literal `%` is escaped.
fn like_pattern(pattern: &str) -> String {
    pattern.replace('%', "\\%").replace('*', "%")
}

/// `col LIKE ?`. A lone `*` matches every non-NULL value.
pub fn like(column: &str, pattern: &str) -> Condition {
    if pattern == "*" {
        return is_not_null(column);
    }
    Condition::bind(format!("{column} LIKE ?"), like_pattern(pattern))
}

/// `(col NOT LIKE ? OR col IS NULL)`. A lone `*` matches only NULL.
pub fn unlike(column: &str, pattern: &str) -> Condition {
    if pattern == "*" {
        return is_null(column);
    }
    Condition::bind(
        format!("({column} NOT LIKE ? OR {column} IS NULL)"),
        like_pattern(pattern),
    )
}

// ==================== Equality ====================

/// `col = ?`, or `col IN (?)` for a list, or `col IS NULL` for NULL.
pub fn equal(column: &str, value: impl Into<Bound>) -> Condition {
    match value.into() {
        Bound::Value(Value::Null) => is_null(column),
        list @ Bound::List(_) => Condition::bind(format!("{column} IN (?)"), list),
        value => Condition::bind(format!("{column} = ?"), value),
    }
}

/// Negation of [`equal`] that also matches NULL rows.
pub fn unequal(column: &str, value: impl Into<Bound>) -> Condition {
    match value.into() {
        Bound::Value(Value::Null) => is_not_null(column),
        list @ Bound::List(_) => Condition::bind(
            format!("({column} NOT IN (?) OR {column} IS NULL)"),
            list,
        ),
        value => Condition::bind(format!("({column} != ? OR {column} IS NULL)"), value),
    }
}

pub fn is_null(column: &str) -> Condition {
    Condition::literal(format!("{column} IS NULL"))
}

pub fn is_not_null(column: &str) -> Condition {
    Condition::literal(format!("{column} IS NOT NULL"))
}

// ==================== Ordering ====================

pub fn greater_than(column: &str, value: impl Into<Bound>) -> Condition {
    Condition::bind(format!("{column} > ?"), value)
}

pub fn greater_than_or_equal(column: &str, value: impl Into<Bound>) -> Condition {
    Condition::bind(format!("{column} >= ?"), value)
}

pub fn less_than(column: &str, value: impl Into<Bound>) -> Condition {
    Condition::bind(format!("{column} < ?"), value)
}

pub fn less_than_or_equal(column: &str, value: impl Into<Bound>) -> Condition {
    Condition::bind(format!("{column} <= ?"), value)
}

/// `col BETWEEN ? AND ?`.
pub fn between(column: &str, low: impl Into<Bound>, high: impl Into<Bound>) -> Condition {
    Condition::bind_all(format!("{column} BETWEEN ? AND ?"), [low.into(), high.into()])
}

// ==================== Subqueries ====================

/// Render one column bare and several as a row constructor `( a, b )`.
fn column_tuple(columns: &[&str]) -> String {
    match columns {
        [single] => (*single).to_string(),
        _ => format!("( {} )", columns.join(", ")),
    }
}

/// `col IN (SELECT ...)` or `( a, b ) IN (SELECT ...)`.
pub fn in_select(columns: &[&str], select: Select) -> Condition {
    Condition::bind(format!("{} IN ?", column_tuple(columns)), select)
}

/// `NOT IN (SELECT ...)`.
///
/// A single column also matches NULL rows; a row constructor cannot be
/// NULL-checked as a whole and is negated as is.
pub fn not_in_select(columns: &[&str], select: Select) -> Condition {
    match columns {
        [single] => Condition::bind(
            format!("({single} NOT IN ? OR {single} IS NULL)"),
            select,
        ),
        _ => Condition::bind(format!("{} NOT IN ?", column_tuple(columns)), select),
    }
}

/// `EXISTS (SELECT ...)`.
pub fn exists(select: Select) -> Condition {
    Condition::bind("EXISTS ?", select)
}

/// `NOT EXISTS (SELECT ...)`.
pub fn not_exists(select: Select) -> Condition {
    Condition::bind("NOT EXISTS ?", select)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::QueryBuilder;
    use crate::stmt::WhereClause;

    fn where_sql(condition: Condition) -> (String, Vec<Value>) {
        QueryBuilder::default()
            .assemble(&Select::new().and_where(condition))
            .unwrap()
            .into_parts()
    }

    fn sub() -> Select {
        Select::new().columns("id").from("t").and_where(("x = ?", 1))
    }

    #[test]
    fn test_like() {
        assert_eq!(where_sql(like("foo", "*")).0, "WHERE foo IS NOT NULL");

        let (sql, values) = where_sql(like("foo", "*bar*"));
        assert_eq!(sql, "WHERE foo LIKE ?");
        assert_eq!(values, vec![Value::from("%bar%")]);

        let (_, values) = where_sql(like("foo", "*%*"));
        assert_eq!(values, vec![Value::from("%\\%%")]);
    }

    #[test]
    fn test_unlike() {
        assert_eq!(where_sql(unlike("foo", "*")).0, "WHERE foo IS NULL");

        let (sql, values) = where_sql(unlike("foo", "bar*"));
        assert_eq!(sql, "WHERE (foo NOT LIKE ? OR foo IS NULL)");
        assert_eq!(values, vec![Value::from("bar%")]);
    }

    #[test]
    fn test_equal_and_unequal() {
        assert_eq!(where_sql(equal("foo", "bar")).0, "WHERE foo = ?");
        assert_eq!(where_sql(equal("foo", Value::Null)).0, "WHERE foo IS NULL");

        let (sql, values) = where_sql(equal("foo", vec!["bar", "baz"]));
        assert_eq!(sql, "WHERE foo IN (?, ?)");
        assert_eq!(values.len(), 2);

        assert_eq!(
            where_sql(unequal("foo", "bar")).0,
            "WHERE (foo != ? OR foo IS NULL)"
        );
        assert_eq!(
            where_sql(unequal("foo", vec![1])).0,
            "WHERE (foo NOT IN (?) OR foo IS NULL)"
        );
        assert_eq!(where_sql(unequal("foo", None::<i32>)).0, "WHERE foo IS NOT NULL");
    }

    #[test]
    fn test_ordering() {
        assert_eq!(where_sql(greater_than("a", 1)).0, "WHERE a > ?");
        assert_eq!(where_sql(greater_than_or_equal("a", 1)).0, "WHERE a >= ?");
        assert_eq!(where_sql(less_than("a", 1)).0, "WHERE a < ?");
        assert_eq!(where_sql(less_than_or_equal("a", 1)).0, "WHERE a <= ?");

        let (sql, values) = where_sql(between("a", 1, 10));
        assert_eq!(sql, "WHERE a BETWEEN ? AND ?");
        assert_eq!(values, vec![Value::Int(1), Value::Int(10)]);
    }

    #[test]
    fn test_in_select() {
        let (sql, values) = where_sql(in_select(&["foo"], sub()));
        assert_eq!(sql, "WHERE foo IN (SELECT id FROM t WHERE x = ?)");
        assert_eq!(values, vec![Value::Int(1)]);

        assert_eq!(
            where_sql(in_select(&["foo", "bar"], sub())).0,
            "WHERE ( foo, bar ) IN (SELECT id FROM t WHERE x = ?)"
        );
    }

    #[test]
    fn test_not_in_select() {
        assert_eq!(
            where_sql(not_in_select(&["foo"], sub())).0,
            "WHERE (foo NOT IN (SELECT id FROM t WHERE x = ?) OR foo IS NULL)"
        );
        assert_eq!(
            where_sql(not_in_select(&["foo", "bar"], sub())).0,
            "WHERE ( foo, bar ) NOT IN (SELECT id FROM t WHERE x = ?)"
        );
    }

    #[test]
    fn test_exists() {
        assert_eq!(
            where_sql(exists(sub())).0,
            "WHERE EXISTS (SELECT id FROM t WHERE x = ?)"
        );
        assert_eq!(
            where_sql(not_exists(sub())).0,
            "WHERE NOT EXISTS (SELECT id FROM t WHERE x = ?)"
        );
    }
}
