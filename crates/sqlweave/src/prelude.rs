//! Convenient imports for typical `sqlweave` usage.
//!
//! Brings the statement builders and the clause traits that carry their
//! shared methods (`and_where`, `order_by`, `limit`, `with`) into scope:
//!
//! ```ignore
//! use sqlweave::prelude::*;
//! ```

pub use crate::{
    BuiltQuery, Condition, Delete, Expression, Insert, QueryBuilder, Select, SqlError, SqlResult,
    Update, Value,
};

pub use crate::{CommonTableExpression, LimitOffset, OrderBy, Statement, WhereClause};

pub use crate::filter;
