//! INSERT statement.

use crate::builder::QueryBuilder;
use crate::error::SqlResult;
use crate::stmt::clause::{IntoAliased, Operand};
use crate::stmt::select::Select;
use crate::stmt::traits::{BuiltQuery, Cte, Statement, impl_cte};

/// INSERT statement builder.
///
/// Rows come either from a value list or from a SELECT:
///
/// ```ignore
/// let q = Insert::new()
///     .into("users")
///     .set("name", "alice")
///     .set("created_at", Expression::new("NOW()"));
/// // INSERT INTO users (name,created_at) VALUES(?,NOW())
///
/// let q = Insert::new()
///     .into("archive")
///     .columns(["id", "name"])
///     .select(Select::new().columns(["id", "name"]).from("users"));
/// // INSERT INTO archive (id,name) SELECT id, name FROM users
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Insert {
    pub(crate) with: Vec<Cte>,
    pub(crate) into: Option<(Option<String>, String)>,
    pub(crate) columns: Vec<String>,
    pub(crate) values: Vec<Operand>,
    pub(crate) select: Option<Box<Select>>,
}

impl Insert {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target table: `"table"` or `("alias", "table")`.
    pub fn into(mut self, table: impl IntoAliased<String>) -> Self {
        if let Some(last) = table.into_aliased().pop() {
            self.into = Some(last);
        }
        self
    }

    pub fn table(&self) -> Option<&str> {
        self.into.as_ref().map(|(_, table)| table.as_str())
    }

    /// Target table name and alias.
    pub fn target(&self) -> Option<(&str, Option<&str>)> {
        self.into
            .as_ref()
            .map(|(alias, table)| (table.as_str(), alias.as_deref()))
    }

    /// Replace the column list.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn column_list(&self) -> &[String] {
        &self.columns
    }

    /// Replace columns and values from `(column, value)` pairs.
    pub fn values<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Operand>,
    {
        self.columns.clear();
        self.values.clear();
        for (column, value) in pairs {
            self.columns.push(column.into());
            self.values.push(value.into());
        }
        self
    }

    /// Replace the values only, matched positionally against [`columns`](Self::columns).
    pub fn row_values<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Add one column with its value. Setting the same column again
    /// replaces the value.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Operand>) -> Self {
        let column = column.into();
        let value = value.into();
        match self.columns.iter().position(|c| *c == column) {
            Some(i) if i < self.values.len() => self.values[i] = value,
            _ => {
                self.columns.push(column);
                self.values.push(value);
            }
        }
        self
    }

    pub fn value_list(&self) -> &[Operand] {
        &self.values
    }

    /// Insert the rows produced by `query` instead of a value list.
    pub fn select(mut self, query: Select) -> Self {
        self.select = Some(Box::new(query));
        self
    }

    pub fn select_source(&self) -> Option<&Select> {
        self.select.as_deref()
    }
}

impl_cte!(Insert, with);

impl Statement for Insert {
    const KIND: &'static str = "INSERT";

    fn assemble_with(&self, builder: &QueryBuilder) -> SqlResult<BuiltQuery> {
        builder.assemble_insert(self)
    }
}
