//! UPDATE statement.

use crate::builder::QueryBuilder;
use crate::condition::Condition;
use crate::error::SqlResult;
use crate::stmt::clause::{IntoAliased, Operand};
use crate::stmt::traits::{BuiltQuery, Cte, Statement, impl_cte, impl_where_clause};

/// UPDATE statement builder.
///
/// ```ignore
/// let q = Update::new()
///     .table("users")
///     .set("status", "inactive")
///     .and_where(("id = ?", 7));
/// // UPDATE users SET status = ? WHERE id = ?
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Update {
    pub(crate) with: Vec<Cte>,
    pub(crate) table: Option<(Option<String>, String)>,
    pub(crate) set: Vec<(String, Operand)>,
    pub(crate) where_: Option<Condition>,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target table: `"table"` or `("alias", "table")`.
    ///
    /// When several are given the last one wins.
    pub fn table(mut self, table: impl IntoAliased<String>) -> Self {
        if let Some(last) = table.into_aliased().pop() {
            self.table = Some(last);
        }
        self
    }

    /// Target table name and alias.
    pub fn target(&self) -> Option<(&str, Option<&str>)> {
        self.table
            .as_ref()
            .map(|(alias, table)| (table.as_str(), alias.as_deref()))
    }

    /// Assign a column. Assigning the same column again replaces the value.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Operand>) -> Self {
        let column = column.into();
        let value = value.into();
        match self.set.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.set.push((column, value)),
        }
        self
    }

    /// Assign several columns from `(column, value)` pairs.
    pub fn set_many<I, K, V>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Operand>,
    {
        pairs
            .into_iter()
            .fold(self, |update, (column, value)| update.set(column, value))
    }

    pub fn set_list(&self) -> &[(String, Operand)] {
        &self.set
    }
}

impl_where_clause!(Update, where_);
impl_cte!(Update, with);

impl Statement for Update {
    const KIND: &'static str = "UPDATE";

    fn assemble_with(&self, builder: &QueryBuilder) -> SqlResult<BuiltQuery> {
        builder.assemble_update(self)
    }
}
