//! # sqlweave
//!
//! Composable SQL statement builders that assemble into SQL text with
//! positional `?` placeholders plus the ordered values to bind.
//!
//! ## Features
//!
//! - **Statements as data**: [`Select`], [`Insert`], [`Update`] and [`Delete`]
//!   are plain owned values; `clone()` is always a deep copy
//! - **Condition trees**: WHERE, HAVING and JOIN ... ON share one
//!   AND/OR/NOT tree that flattens repeated operators
//! - **List expansion**: `("id IN (?)", vec![1, 2, 3])` renders
//!   `id IN (?, ?, ?)` with three bound values
//! - **Dialects**: quoting, LIMIT/OFFSET syntax and per-database rewrites
//!   for PostgreSQL, MySQL, SQL Server, Oracle and SQLite
//! - **Safe defaults**: INSERT, UPDATE and DELETE without a target are
//!   rejected instead of rendering broken SQL
//!
//! ## Example
//!
//! ```ignore
//! use sqlweave::prelude::*;
//!
//! let qb = QueryBuilder::for_driver("pgsql")?;
//!
//! let active = Select::new()
//!     .columns(["id", "name"])
//!     .from("users")
//!     .and_where(("status = ?", "active"))
//!     .and_where(("role IN (?)", vec!["admin", "owner"]))
//!     .order_by(("name", "ASC"))
//!     .limit(10);
//!
//! let (sql, params) = qb.assemble(&active)?.into_parts();
//! // SELECT id, name FROM users WHERE (status = ?) AND (role IN (?, ?)) ORDER BY name ASC LIMIT 10
//!
//! let (sql, params) = qb
//!     .assemble(&Update::new().table("users").set("status", "inactive").and_where(("id = ?", 7)))?
//!     .into_parts();
//! // UPDATE users SET status = ? WHERE id = ?
//! ```
//!
//! ## Logging
//!
//! With the default `tracing` feature every assembled statement is emitted as
//! a `debug` event on the `sqlweave.sql` target.

pub mod builder;
pub mod condition;
pub mod config;
pub mod dialect;
pub mod error;
pub mod expression;
pub mod filter;
pub mod ident;
pub mod prelude;
pub mod stmt;
pub mod value;

pub use builder::{QueryBuilder, SelectHook};
pub use condition::{Bound, Condition, Operator};
pub use config::BuilderConfig;
pub use dialect::{Ansi, Dialect, Mssql, Mysql, Oracle, Pgsql, Sqlite};
pub use error::{SqlError, SqlResult};
pub use expression::Expression;
pub use ident::{Ident, QuoteStyle, quote_identifier};
pub use stmt::{
    BuiltQuery, Column, CommonTableExpression, Delete, Insert, JoinKind, LimitOffset, Operand,
    OrderBy, Select, Statement, TableRef, Update, WhereClause,
};
pub use value::Value;
