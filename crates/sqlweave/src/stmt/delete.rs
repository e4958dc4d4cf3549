//! DELETE statement.

use crate::builder::QueryBuilder;
use crate::condition::Condition;
use crate::error::SqlResult;
use crate::stmt::clause::IntoAliased;
use crate::stmt::traits::{BuiltQuery, Cte, Statement, impl_cte, impl_where_clause};

/// DELETE statement builder.
///
/// ```ignore
/// let q = Delete::new().from(("t1", "table")).and_where(("id = ?", 1));
/// // DELETE FROM table t1 WHERE id = ?
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Delete {
    pub(crate) with: Vec<Cte>,
    pub(crate) from: Option<(Option<String>, String)>,
    pub(crate) where_: Option<Condition>,
}

impl Delete {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target table: `"table"` or `("alias", "table")`.
    pub fn from(mut self, table: impl IntoAliased<String>) -> Self {
        if let Some(last) = table.into_aliased().pop() {
            self.from = Some(last);
        }
        self
    }

    /// Target table name and alias.
    pub fn target(&self) -> Option<(&str, Option<&str>)> {
        self.from
            .as_ref()
            .map(|(alias, table)| (table.as_str(), alias.as_deref()))
    }
}

impl_where_clause!(Delete, where_);
impl_cte!(Delete, with);

impl Statement for Delete {
    const KIND: &'static str = "DELETE";

    fn assemble_with(&self, builder: &QueryBuilder) -> SqlResult<BuiltQuery> {
        builder.assemble_delete(self)
    }
}
