use std::borrow::Cow;

use super::{Dialect, hooks};
use crate::builder::{QueryBuilder, SelectHook};
use crate::error::SqlResult;
use crate::stmt::clause::Column;
use crate::stmt::Select;

/// PostgreSQL: ANSI quoting and `LIMIT n OFFSET m`, plus [`CompleteGroupBy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Pgsql;

impl Dialect for Pgsql {
    fn name(&self) -> &'static str {
        "pgsql"
    }

    fn register_callbacks(&self, builder: &mut QueryBuilder) {
        hooks::register_default_callbacks(builder);
        builder.on_assemble_select(CompleteGroupBy);
    }
}

/// Completes clauses PostgreSQL is strict about.
///
/// - With GROUP BY, every selected column that is not an expression is
///   appended to GROUP BY (by alias when aliased), in SELECT order.
/// - With DISTINCT and ORDER BY, plain ORDER BY columns missing from the
///   SELECT list are appended to it.
///
/// Expressions are assumed to be aggregates and are left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompleteGroupBy;

impl CompleteGroupBy {
    fn missing_group_by(select: &Select) -> Vec<String> {
        if select.group_by.is_empty() {
            return Vec::new();
        }

        let grouped: Vec<&str> = select.group_by.iter().filter_map(Column::as_name).collect();
        let mut missing: Vec<String> = Vec::new();
        for (alias, column) in select.columns.iter() {
            let candidate = match (alias, column) {
                (_, Column::Expr(_)) => continue,
                (Some(alias), _) => alias,
                (None, Column::Name(name)) => name.as_str(),
                (None, Column::Select(_)) => continue,
            };
            if !grouped.contains(&candidate) && !missing.iter().any(|m| m == candidate) {
                missing.push(candidate.to_string());
            }
        }
        missing
    }

    fn missing_select_columns(select: &Select) -> Vec<String> {
        if !select.distinct || select.order_by.is_empty() {
            return Vec::new();
        }

        let selected: Vec<&str> = select
            .columns
            .iter()
            .filter_map(|(alias, column)| alias.or_else(|| column.as_name()))
            .collect();

        let mut missing: Vec<String> = Vec::new();
        for (column, _) in &select.order_by {
            let Some(name) = column.as_name() else { continue };
            if !selected.contains(&name) && !missing.iter().any(|m| m == name) {
                missing.push(name.to_string());
            }
        }
        missing
    }
}

impl SelectHook for CompleteGroupBy {
    fn name(&self) -> &'static str {
        "complete_group_by"
    }

    fn on_assemble_select(&self, select: &mut Cow<'_, Select>) -> SqlResult<()> {
        let group_by = Self::missing_group_by(select);
        if !group_by.is_empty() {
            select
                .to_mut()
                .group_by
                .extend(group_by.into_iter().map(Column::Name));
        }

        let columns = Self::missing_select_columns(select);
        if !columns.is_empty() {
            let select = select.to_mut();
            for column in columns {
                select.columns.push(None, Column::Name(column));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::Expression;
    use crate::stmt::OrderBy;

    fn assemble(q: &Select) -> String {
        QueryBuilder::new(Pgsql).assemble(q).unwrap().sql
    }

    #[test]
    fn select_without_group_by_is_unmodified() {
        let q = Select::new().columns(["a", "b", "c"]).from("d");
        assert_eq!(assemble(&q), "SELECT a, b, c FROM d");
    }

    #[test]
    fn select_columns_are_appended_to_group_by_in_select_order() {
        let q = Select::new().columns(["b", "a", "c"]).from("d").group_by("c");
        assert_eq!(assemble(&q), "SELECT b, a, c FROM d GROUP BY c, b, a");
        assert_eq!(q.group_by_list().len(), 1);
    }

    #[test]
    fn group_by_completion_ignores_expressions() {
        let q = Select::new()
            .columns(Column::from(Expression::new("MAX(b)")))
            .columns(["a", "c"])
            .from("d")
            .group_by("c");
        assert_eq!(assemble(&q), "SELECT (MAX(b)), a, c FROM d GROUP BY c, a");
    }

    #[test]
    fn aliased_columns_group_by_alias() {
        let q = Select::new()
            .columns(("day", "date_trunc('day', ts)"))
            .columns(("total", Expression::new("SUM(x)")))
            .from("t")
            .group_by("day");
        assert_eq!(
            assemble(&q),
            "SELECT date_trunc('day', ts) AS day, (SUM(x)) AS total FROM t GROUP BY day"
        );
    }

    #[test]
    fn distinct_order_by_columns_join_the_select_list() {
        let q = Select::new()
            .distinct()
            .columns("a")
            .from("t")
            .order_by(["b", "a"]);
        assert_eq!(assemble(&q), "SELECT DISTINCT a, b FROM t ORDER BY b, a");
    }
}
