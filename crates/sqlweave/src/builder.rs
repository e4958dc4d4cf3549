//! Statement assembly.
//!
//! [`QueryBuilder`] renders a statement into SQL text with positional `?`
//! placeholders plus the ordered values to bind. Clauses are rendered in a
//! fixed order (WITH, verb and target, JOIN, WHERE, GROUP BY, HAVING,
//! ORDER BY, LIMIT/OFFSET, UNION); unset clauses are skipped.
//!
//! The builder is configured once with a [`Dialect`], which supplies LIMIT
//! syntax and registers [`SelectHook`]s that may validate or rewrite each
//! SELECT (nested ones included) before it is rendered. Hooks work on a
//! copy-on-write view, so the caller's statement is never modified.
//!
//! # Example
//! ```ignore
//! use sqlweave::prelude::*;
//!
//! let qb = QueryBuilder::new(Pgsql);
//! let (sql, params) = qb
//!     .assemble(&Select::new().columns("id").from("users").and_where(("id IN (?)", vec![1, 2])))?
//!     .into_parts();
//! assert_eq!(sql, "SELECT id FROM users WHERE id IN (?, ?)");
//! # Ok::<(), sqlweave::SqlError>(())
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::condition::{Bound, Condition};
use crate::config::BuilderConfig;
use crate::dialect::{self, Ansi, Dialect};
use crate::error::{SqlError, SqlResult};
use crate::expression::Expression;
use crate::stmt::clause::{Column, Operand, TableRef};
use crate::stmt::traits::{BuiltQuery, Cte, Statement};
use crate::stmt::{Delete, Insert, Select, Update};
use crate::value::Value;

/// A callback run before every SELECT is rendered.
///
/// Implementations inspect the statement and either reject it or rewrite it
/// through [`Cow::to_mut`]. Plain closures implement this trait.
pub trait SelectHook: Send + Sync {
    /// Name used in trace output.
    fn name(&self) -> &'static str {
        "custom"
    }

    fn on_assemble_select(&self, select: &mut Cow<'_, Select>) -> SqlResult<()>;
}

impl<F> SelectHook for F
where
    F: Fn(&mut Cow<'_, Select>) -> SqlResult<()> + Send + Sync,
{
    fn on_assemble_select(&self, select: &mut Cow<'_, Select>) -> SqlResult<()> {
        self(select)
    }
}

/// Renders statements to `(sql, params)` for one dialect.
#[derive(Clone)]
pub struct QueryBuilder {
    dialect: Arc<dyn Dialect>,
    separator: String,
    select_hooks: Vec<Arc<dyn SelectHook>>,
}

impl fmt::Debug for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("dialect", &self.dialect.name())
            .field("separator", &self.separator)
            .field(
                "select_hooks",
                &self.select_hooks.iter().map(|h| h.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(Ansi)
    }
}

impl QueryBuilder {
    /// Create a builder for `dialect` and let it register its hooks.
    pub fn new(dialect: impl Dialect + 'static) -> Self {
        Self::with_dialect(Arc::new(dialect))
    }

    /// Create a builder from a shared dialect.
    pub fn with_dialect(dialect: Arc<dyn Dialect>) -> Self {
        let mut builder = Self {
            dialect: Arc::clone(&dialect),
            separator: " ".to_string(),
            select_hooks: Vec::new(),
        };
        dialect.register_callbacks(&mut builder);
        builder
    }

    /// Create a builder for a driver name such as `"pgsql"` or `"mysql"`.
    pub fn for_driver(driver: &str) -> SqlResult<Self> {
        Ok(Self::with_dialect(dialect::for_driver(driver)?))
    }

    /// Create a builder from configuration.
    pub fn from_config(config: &BuilderConfig) -> SqlResult<Self> {
        config.validate()?;
        Ok(Self::for_driver(&config.driver)?.separator(config.separator.clone()))
    }

    /// Text placed between clauses (default: a single space).
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Register a hook run before each SELECT is rendered.
    pub fn on_assemble_select(&mut self, hook: impl SelectHook + 'static) -> &mut Self {
        self.select_hooks.push(Arc::new(hook));
        self
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Quote an identifier for the configured dialect.
    pub fn quote_identifier(&self, name: &str) -> String {
        self.dialect.quote_identifier(name)
    }

    /// Assemble any statement.
    pub fn assemble<S: Statement>(&self, statement: &S) -> SqlResult<BuiltQuery> {
        statement.assemble_with(self)
    }

    // ==================== Entry points ====================

    pub fn assemble_select(&self, select: &Select) -> SqlResult<BuiltQuery> {
        let mut values = Vec::new();
        let sql = self.render_select(select, &mut values)?;
        Ok(self.finish(Select::KIND, sql, values))
    }

    pub fn assemble_insert(&self, insert: &Insert) -> SqlResult<BuiltQuery> {
        let (alias, table) = insert
            .into
            .as_ref()
            .ok_or_else(|| SqlError::incomplete(Insert::KIND, "no target table"))?;

        if insert.select.is_none() {
            if insert.values.is_empty() {
                return Err(SqlError::incomplete(Insert::KIND, "no values or SELECT source"));
            }
            if insert.columns.len() != insert.values.len() {
                return Err(SqlError::incomplete(
                    Insert::KIND,
                    format!(
                        "{} column(s) but {} value(s)",
                        insert.columns.len(),
                        insert.values.len()
                    ),
                ));
            }
        }

        let mut values = Vec::new();
        let mut parts = vec![
            self.build_with(&insert.with, &mut values)?,
            format!("INSERT INTO {}", aliased(table, alias.as_deref())),
        ];

        if !insert.columns.is_empty() {
            parts.push(format!("({})", insert.columns.join(",")));
        }

        match &insert.select {
            Some(select) => parts.push(self.render_select(select, &mut values)?),
            None => {
                let mut rendered = Vec::with_capacity(insert.values.len());
                for operand in &insert.values {
                    rendered.push(self.render_operand(operand, "VALUES", &mut values)?);
                }
                parts.push(format!("VALUES({})", rendered.join(",")));
            }
        }

        let sql = self.join_parts(parts);
        Ok(self.finish(Insert::KIND, sql, values))
    }

    pub fn assemble_update(&self, update: &Update) -> SqlResult<BuiltQuery> {
        let (alias, table) = update
            .table
            .as_ref()
            .ok_or_else(|| SqlError::incomplete(Update::KIND, "no target table"))?;
        if update.set.is_empty() {
            return Err(SqlError::incomplete(Update::KIND, "no SET assignments"));
        }

        let mut values = Vec::new();
        let with = self.build_with(&update.with, &mut values)?;
        let target = format!("UPDATE {}", aliased(table, alias.as_deref()));

        let mut assignments = Vec::with_capacity(update.set.len());
        for (column, operand) in &update.set {
            let rendered = self.render_operand(operand, "SET", &mut values)?;
            assignments.push(format!("{column} = {rendered}"));
        }

        let where_ = self.build_condition_clause("WHERE", update.where_.as_ref(), &mut values)?;
        let sql = self.join_parts(vec![
            with,
            target,
            format!("SET {}", assignments.join(", ")),
            where_,
        ]);
        Ok(self.finish(Update::KIND, sql, values))
    }

    pub fn assemble_delete(&self, delete: &Delete) -> SqlResult<BuiltQuery> {
        let (alias, table) = delete
            .from
            .as_ref()
            .ok_or_else(|| SqlError::incomplete(Delete::KIND, "no target table"))?;

        let mut values = Vec::new();
        let with = self.build_with(&delete.with, &mut values)?;
        let target = format!("DELETE FROM {}", aliased(table, alias.as_deref()));
        let where_ = self.build_condition_clause("WHERE", delete.where_.as_ref(), &mut values)?;

        let sql = self.join_parts(vec![with, target, where_]);
        Ok(self.finish(Delete::KIND, sql, values))
    }

    fn finish(&self, kind: &'static str, sql: String, values: Vec<Value>) -> BuiltQuery {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "sqlweave.sql",
            kind,
            dialect = self.dialect.name(),
            param_count = values.len(),
            sql = %sql,
            "assembled statement"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = kind;

        BuiltQuery::new(sql, values)
    }

    // ==================== SELECT ====================

    /// Render a SELECT, appending its values. Used for nested selects too.
    fn render_select(&self, select: &Select, values: &mut Vec<Value>) -> SqlResult<String> {
        let mut select = Cow::Borrowed(select);
        for hook in &self.select_hooks {
            hook.on_assemble_select(&mut select)?;
            #[cfg(feature = "tracing")]
            if matches!(select, Cow::Owned(_)) {
                tracing::trace!(target: "sqlweave.sql", hook = hook.name(), "select rewritten by hook");
            }
        }
        let select = select.as_ref();

        let with = self.build_with(&select.with, values)?;

        let main = vec![
            self.build_columns(select, values)?,
            self.build_from(select, values)?,
            self.build_joins(select, values)?,
            self.build_condition_clause("WHERE", select.where_.as_ref(), values)?,
            self.build_group_by(&select.group_by, values)?,
            self.build_condition_clause("HAVING", select.having.as_ref(), values)?,
            self.build_order_by(&select.order_by, values)?,
            self.dialect
                .render_limit_offset(select.limit, select.offset, &self.separator),
        ];
        let main = self.join_parts(main);

        let body = if select.unions.is_empty() {
            main
        } else {
            let mut parts = Vec::with_capacity(select.unions.len() + 1);
            let bare_first = !select.has_own_clauses();
            if !bare_first {
                parts.push(format!("({main})"));
            }
            for (i, union) in select.unions.iter().enumerate() {
                let member = self.render_select(&union.query, values)?;
                if i == 0 && bare_first {
                    parts.push(format!("({member})"));
                } else {
                    let keyword = if union.all { "UNION ALL" } else { "UNION" };
                    parts.push(format!("{keyword} ({member})"));
                }
            }
            // ORDER BY / LIMIT of a body-less statement trail the last member
            if bare_first && !main.is_empty() {
                parts.push(main);
            }
            parts.join(&self.separator)
        };

        Ok(self.join_parts(vec![with, body]))
    }

    fn build_with(&self, ctes: &[Cte], values: &mut Vec<Value>) -> SqlResult<String> {
        if ctes.is_empty() {
            return Ok(String::new());
        }

        let mut rendered = Vec::with_capacity(ctes.len());
        for cte in ctes {
            let sql = self.render_select(&cte.query, values)?;
            rendered.push(format!("{} AS ({sql})", cte.alias));
        }

        let keyword = if ctes.iter().any(|c| c.recursive) {
            "WITH RECURSIVE"
        } else {
            "WITH"
        };
        Ok(format!("{keyword} {}", rendered.join(", ")))
    }

    fn build_columns(&self, select: &Select, values: &mut Vec<Value>) -> SqlResult<String> {
        if select.columns.is_empty() && !select.distinct && select.from.is_empty() {
            return Ok(String::new());
        }

        let mut sql = String::from("SELECT");
        if select.distinct {
            sql.push_str(" DISTINCT");
        }
        if select.columns.is_empty() {
            return Ok(sql);
        }

        let mut rendered = Vec::with_capacity(select.columns.len());
        for (alias, column) in select.columns.iter() {
            let col = match column {
                Column::Name(name) => name.clone(),
                Column::Expr(expr) => format!("({})", self.render_expression(expr, "SELECT", values)?),
                Column::Select(sub) => format!("({})", self.render_select(sub, values)?),
            };
            rendered.push(match alias {
                Some(alias) => format!("{col} AS {alias}"),
                None => col,
            });
        }

        sql.push(' ');
        sql.push_str(&rendered.join(", "));
        Ok(sql)
    }

    fn build_from(&self, select: &Select, values: &mut Vec<Value>) -> SqlResult<String> {
        if select.from.is_empty() {
            return Ok(String::new());
        }

        let mut rendered = Vec::with_capacity(select.from.len());
        for (alias, table) in select.from.iter() {
            let source = self.render_table(table, values)?;
            rendered.push(aliased(&source, alias));
        }
        Ok(format!("FROM {}", rendered.join(", ")))
    }

    fn build_joins(&self, select: &Select, values: &mut Vec<Value>) -> SqlResult<String> {
        let mut rendered = Vec::with_capacity(select.joins.len());
        for join in &select.joins {
            let table = self.render_table(&join.table, values)?;
            let on = self.render_condition(&join.on, "JOIN", values)?;
            rendered.push(format!(
                "{} {} ON {on}",
                join.kind.keyword(),
                aliased(&table, join.alias.as_deref())
            ));
        }
        Ok(rendered.join(&self.separator))
    }

    fn build_group_by(&self, group_by: &[Column], values: &mut Vec<Value>) -> SqlResult<String> {
        if group_by.is_empty() {
            return Ok(String::new());
        }

        let mut rendered = Vec::with_capacity(group_by.len());
        for column in group_by {
            rendered.push(self.render_column_ref(column, "GROUP BY", values)?);
        }
        Ok(format!("GROUP BY {}", rendered.join(", ")))
    }

    fn build_order_by(
        &self,
        order_by: &[(Column, Option<String>)],
        values: &mut Vec<Value>,
    ) -> SqlResult<String> {
        if order_by.is_empty() {
            return Ok(String::new());
        }

        let mut rendered = Vec::with_capacity(order_by.len());
        for (column, direction) in order_by {
            let col = self.render_column_ref(column, "ORDER BY", values)?;
            rendered.push(match direction.as_deref().map(str::trim) {
                Some(dir) if !dir.is_empty() => format!("{col} {dir}"),
                _ => col,
            });
        }
        Ok(format!("ORDER BY {}", rendered.join(", ")))
    }

    // ==================== Conditions ====================

    fn build_condition_clause(
        &self,
        keyword: &'static str,
        condition: Option<&Condition>,
        values: &mut Vec<Value>,
    ) -> SqlResult<String> {
        match condition {
            Some(condition) => Ok(format!(
                "{keyword} {}",
                self.render_condition(condition, keyword, values)?
            )),
            None => Ok(String::new()),
        }
    }

    /// Render a condition tree depth-first.
    ///
    /// Plain groups render a lone child bare and several children as
    /// `(a) OP (b)`. Negated groups render every child as `NOT (child)`.
    fn render_condition(
        &self,
        condition: &Condition,
        clause: &'static str,
        values: &mut Vec<Value>,
    ) -> SqlResult<String> {
        match condition {
            Condition::Literal(sql) => {
                let placeholders = sql.matches('?').count();
                if placeholders > 0 {
                    return Err(SqlError::placeholder_mismatch(
                        clause,
                        sql.as_str(),
                        placeholders,
                        0,
                    ));
                }
                Ok(sql.clone())
            }
            Condition::Keyed { expr, args } => self.render_keyed(expr, args, clause, values),
            Condition::Raw(expr) => self.render_expression(expr, clause, values),
            Condition::Sub(select) => Ok(format!("({})", self.render_select(select, values)?)),
            Condition::Group { op, children } => {
                let mut parts = Vec::with_capacity(children.len());
                for child in children {
                    parts.push(self.render_condition(child, clause, values)?);
                }

                if op.is_negated() {
                    let negated: Vec<String> = parts.iter().map(|p| format!("NOT ({p})")).collect();
                    Ok(negated.join(&format!(" {} ", op.keyword())))
                } else if parts.len() == 1 {
                    Ok(parts.remove(0))
                } else {
                    Ok(format!("({})", parts.join(&format!(") {} (", op.keyword()))))
                }
            }
        }
    }

    /// Substitute arguments into the `?` placeholders of `expr`.
    ///
    /// With a single placeholder every argument is rendered at that spot,
    /// comma-separated. Otherwise arguments map one-to-one onto placeholders
    /// (a lone list argument is first spread into one argument per element).
    /// List arguments expand to `?, ?, ...`; expressions and subqueries are
    /// spliced in place.
    fn render_keyed(
        &self,
        expr: &str,
        args: &[Bound],
        clause: &'static str,
        values: &mut Vec<Value>,
    ) -> SqlResult<String> {
        let segments: Vec<&str> = expr.split('?').collect();
        let placeholders = segments.len() - 1;

        let spread: Vec<Bound>;
        let args = match args {
            [Bound::List(list)] if placeholders > 1 => {
                spread = list.iter().cloned().map(Bound::Value).collect();
                &spread[..]
            }
            _ => args,
        };

        if placeholders == 1 && !args.is_empty() {
            let mut rendered = Vec::with_capacity(args.len());
            for arg in args {
                rendered.push(self.render_bound(arg, clause, values)?);
            }
            return Ok(format!("{}{}{}", segments[0], rendered.join(", "), segments[1]));
        }

        if placeholders != args.len() {
            return Err(SqlError::placeholder_mismatch(
                clause,
                expr,
                placeholders,
                args.len(),
            ));
        }

        let mut sql = String::with_capacity(expr.len());
        sql.push_str(segments[0]);
        for (arg, segment) in args.iter().zip(&segments[1..]) {
            sql.push_str(&self.render_bound(arg, clause, values)?);
            sql.push_str(segment);
        }
        Ok(sql)
    }

    fn render_bound(
        &self,
        arg: &Bound,
        clause: &'static str,
        values: &mut Vec<Value>,
    ) -> SqlResult<String> {
        match arg {
            Bound::Value(value) => {
                values.push(value.clone());
                Ok("?".to_string())
            }
            Bound::List(list) if list.is_empty() => Ok("NULL".to_string()),
            Bound::List(list) => {
                values.extend(list.iter().cloned());
                Ok(vec!["?"; list.len()].join(", "))
            }
            Bound::Expr(expr) => self.render_expression(expr, clause, values),
            Bound::Select(select) => Ok(format!("({})", self.render_select(select, values)?)),
        }
    }

    // ==================== Leaves ====================

    fn render_expression(
        &self,
        expr: &Expression,
        clause: &'static str,
        values: &mut Vec<Value>,
    ) -> SqlResult<String> {
        let placeholders = expr.placeholder_count();
        if placeholders != expr.values().len() {
            return Err(SqlError::placeholder_mismatch(
                clause,
                expr.statement(),
                placeholders,
                expr.values().len(),
            ));
        }
        values.extend(expr.values().iter().cloned());
        Ok(expr.statement().to_string())
    }

    /// GROUP BY / ORDER BY item: expressions bare, subqueries parenthesized.
    fn render_column_ref(
        &self,
        column: &Column,
        clause: &'static str,
        values: &mut Vec<Value>,
    ) -> SqlResult<String> {
        match column {
            Column::Name(name) => Ok(name.clone()),
            Column::Expr(expr) => self.render_expression(expr, clause, values),
            Column::Select(sub) => Ok(format!("({})", self.render_select(sub, values)?)),
        }
    }

    fn render_table(&self, table: &TableRef, values: &mut Vec<Value>) -> SqlResult<String> {
        match table {
            TableRef::Table(name) => Ok(name.clone()),
            TableRef::Select(sub) => Ok(format!("({})", self.render_select(sub, values)?)),
        }
    }

    fn render_operand(
        &self,
        operand: &Operand,
        clause: &'static str,
        values: &mut Vec<Value>,
    ) -> SqlResult<String> {
        match operand {
            Operand::Value(value) => {
                values.push(value.clone());
                Ok("?".to_string())
            }
            Operand::Expr(expr) => self.render_expression(expr, clause, values),
            Operand::Select(sub) => Ok(format!("({})", self.render_select(sub, values)?)),
        }
    }

    fn join_parts(&self, parts: Vec<String>) -> String {
        parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(&self.separator)
    }
}

fn aliased(source: &str, alias: Option<&str>) -> String {
    match alias {
        Some(alias) => format!("{source} {alias}"),
        None => source.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::traits::{LimitOffset, WhereClause};

    #[test]
    fn single_placeholder_expands_every_argument() {
        let qb = QueryBuilder::default();
        let mut values = Vec::new();
        let sql = qb
            .render_keyed("c IN (?)", &[Bound::from(vec![1, 2, 3])], "WHERE", &mut values)
            .unwrap();
        assert_eq!(sql, "c IN (?, ?, ?)");
        assert_eq!(values, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn lone_list_is_spread_over_several_placeholders() {
        let qb = QueryBuilder::default();
        let mut values = Vec::new();
        let sql = qb
            .render_keyed(
                "INTERVAL(a, ?, ?, ?) < ?",
                &[Bound::from(vec![1, 2, 3, 4])],
                "WHERE",
                &mut values,
            )
            .unwrap();
        assert_eq!(sql, "INTERVAL(a, ?, ?, ?) < ?");
        assert_eq!(values.len(), 4);
    }

    #[test]
    fn empty_list_renders_null() {
        let qb = QueryBuilder::default();
        let mut values = Vec::new();
        let sql = qb
            .render_keyed("c IN (?)", &[Bound::List(vec![])], "WHERE", &mut values)
            .unwrap();
        assert_eq!(sql, "c IN (NULL)");
        assert!(values.is_empty());
    }

    #[test]
    fn arity_mismatch_names_the_clause() {
        let qb = QueryBuilder::default();
        let mut values = Vec::new();
        let err = qb
            .render_keyed(
                "a = ? AND b = ?",
                &[Bound::from(1), Bound::from(2), Bound::from(3)],
                "HAVING",
                &mut values,
            )
            .unwrap_err();
        assert_eq!(
            err,
            SqlError::placeholder_mismatch("HAVING", "a = ? AND b = ?", 2, 3)
        );

        let err = qb
            .render_keyed("a = b", &[Bound::from(1)], "WHERE", &mut values)
            .unwrap_err();
        assert!(err.is_placeholder_mismatch());
    }

    #[test]
    fn closure_hooks_can_rewrite_without_touching_input() {
        let mut qb = QueryBuilder::default();
        qb.on_assemble_select(|select: &mut Cow<'_, Select>| {
            if !select.has_limit() {
                let limited = select.as_ref().clone().limit(100);
                *select = Cow::Owned(limited);
            }
            Ok(())
        });

        let query = Select::new().columns("a").from("t");
        let built = qb.assemble(&query).unwrap();
        assert_eq!(built.sql, "SELECT a FROM t LIMIT 100");
        assert_eq!(query.get_limit(), None);
    }

    #[test]
    fn separator_is_configurable() {
        let qb = QueryBuilder::default().separator("\n");
        let built = qb
            .assemble(&Select::new().columns("a").from("t").and_where("a > 1"))
            .unwrap();
        assert_eq!(built.sql, "SELECT a\nFROM t\nWHERE a > 1");
    }

    #[test]
    fn debug_lists_hooks() {
        let qb = QueryBuilder::default();
        let debug = format!("{qb:?}");
        assert!(debug.contains("ansi"));
        assert!(debug.contains("validate_order_by"));
    }
}
