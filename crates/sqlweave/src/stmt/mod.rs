//! Statement builders.
//!
//! - [`Select`]: columns, FROM, JOIN, WHERE, GROUP BY, HAVING, ORDER BY,
//!   LIMIT/OFFSET, UNION
//! - [`Insert`]: keyed values, positional values or INSERT ... SELECT
//! - [`Update`]: SET assignments with WHERE
//! - [`Delete`]: DELETE with WHERE
//!
//! All four carry WITH through [`CommonTableExpression`]. Builders consume
//! and return `self`, so statements are assembled in a single chain and
//! cloned when a variant is needed.

pub(crate) mod clause;
mod delete;
mod insert;
mod select;
pub(crate) mod traits;
mod update;


pub use clause::{
    AliasList, Column, IntoAliased, IntoColumnList, IntoOrderBy, JoinKind, Operand, TableRef,
};
pub use delete::Delete;
pub use insert::Insert;
pub use select::{Join, Select, Union};
pub use traits::{
    BuiltQuery, CommonTableExpression, Cte, LimitOffset, OrderBy, Statement, WhereClause,
};
pub use update::Update;
