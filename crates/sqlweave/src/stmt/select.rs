//! SELECT statement.

use crate::builder::QueryBuilder;
use crate::condition::{Condition, Operator, build_condition, merge_condition};
use crate::error::SqlResult;
use crate::stmt::clause::{
    AliasList, Column, IntoAliased, IntoColumnList, JoinKind, TableRef,
};
use crate::stmt::traits::{
    BuiltQuery, Cte, LimitOffset, OrderBy, Statement, impl_cte,
    impl_where_clause,
};

/// One JOIN entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub alias: Option<String>,
    pub table: TableRef,
    pub on: Condition,
}

/// One UNION member.
#[derive(Clone, Debug, PartialEq)]
pub struct Union {
    pub query: Select,
    pub all: bool,
}

/// SELECT statement builder.
///
/// Every clause is plain owned data, so `clone()` is a deep copy: nested
/// subqueries and expressions are never shared between clones.
///
/// # Example
/// ```ignore
/// use sqlweave::prelude::*;
///
/// let q = Select::new()
///     .distinct()
///     .columns(["c.id", "c.name"])
///     .columns(("orders", "COUNT(o.customer)"))
///     .from(("c", "customer"))
///     .left_join("order o", "o.customer = c.id")
///     .and_where(("c.name LIKE ?", "%Doe%"))
///     .group_by("c.id")
///     .order_by("c.name")
///     .limit(25);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Select {
    pub(crate) with: Vec<Cte>,
    pub(crate) distinct: bool,
    pub(crate) columns: AliasList<Column>,
    pub(crate) from: AliasList<TableRef>,
    pub(crate) joins: Vec<Join>,
    pub(crate) where_: Option<Condition>,
    pub(crate) group_by: Vec<Column>,
    pub(crate) having: Option<Condition>,
    pub(crate) order_by: Vec<(Column, Option<String>)>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
    pub(crate) unions: Vec<Union>,
}

impl Select {
    /// Create an empty SELECT.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== DISTINCT / columns ====================

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn reset_distinct(mut self) -> Self {
        self.distinct = false;
        self
    }

    /// Append columns. Re-using an alias replaces that column in place.
    pub fn columns(mut self, columns: impl IntoAliased<Column>) -> Self {
        self.columns.extend(columns.into_aliased());
        self
    }

    pub fn column_list(&self) -> &AliasList<Column> {
        &self.columns
    }

    pub fn reset_columns(mut self) -> Self {
        self.columns.clear();
        self
    }

    // ==================== FROM ====================

    /// Append FROM sources: `"table"`, `"table alias"`, `("alias", "table")`
    /// or `("alias", subselect)`.
    pub fn from(mut self, tables: impl IntoAliased<TableRef>) -> Self {
        self.from.extend(tables.into_aliased());
        self
    }

    pub fn from_list(&self) -> &AliasList<TableRef> {
        &self.from
    }

    pub fn reset_from(mut self) -> Self {
        self.from.clear();
        self
    }

    // ==================== JOIN ====================

    /// Add an INNER JOIN for each given source.
    pub fn join(self, table: impl IntoAliased<TableRef>, on: impl Into<Condition>) -> Self {
        self.push_join(JoinKind::Inner, table, on)
    }

    /// Add a LEFT JOIN for each given source.
    pub fn left_join(self, table: impl IntoAliased<TableRef>, on: impl Into<Condition>) -> Self {
        self.push_join(JoinKind::Left, table, on)
    }

    /// Add a RIGHT JOIN for each given source.
    pub fn right_join(self, table: impl IntoAliased<TableRef>, on: impl Into<Condition>) -> Self {
        self.push_join(JoinKind::Right, table, on)
    }

    /// Add a FULL JOIN for each given source.
    pub fn full_join(self, table: impl IntoAliased<TableRef>, on: impl Into<Condition>) -> Self {
        self.push_join(JoinKind::Full, table, on)
    }

    fn push_join(
        mut self,
        kind: JoinKind,
        table: impl IntoAliased<TableRef>,
        on: impl Into<Condition>,
    ) -> Self {
        let on = build_condition(on.into());
        for (alias, table) in table.into_aliased() {
            self.joins.push(Join {
                kind,
                alias,
                table,
                on: on.clone(),
            });
        }
        self
    }

    pub fn join_list(&self) -> &[Join] {
        &self.joins
    }

    pub fn reset_join(mut self) -> Self {
        self.joins.clear();
        self
    }

    // ==================== GROUP BY / HAVING ====================

    /// Append GROUP BY columns.
    pub fn group_by(mut self, columns: impl IntoColumnList) -> Self {
        self.group_by.extend(columns.into_column_list());
        self
    }

    pub fn group_by_list(&self) -> &[Column] {
        &self.group_by
    }

    pub fn reset_group_by(mut self) -> Self {
        self.group_by.clear();
        self
    }

    /// Add a HAVING condition combined with AND.
    pub fn having(mut self, condition: impl Into<Condition>) -> Self {
        merge_condition(&mut self.having, build_condition(condition.into()), Operator::All);
        self
    }

    /// Add a HAVING condition combined with OR.
    pub fn or_having(mut self, condition: impl Into<Condition>) -> Self {
        merge_condition(&mut self.having, build_condition(condition.into()), Operator::Any);
        self
    }

    /// Add a negated HAVING condition combined with AND.
    pub fn not_having(mut self, condition: impl Into<Condition>) -> Self {
        merge_condition(
            &mut self.having,
            build_condition(condition.into()),
            Operator::NotAll,
        );
        self
    }

    /// Add a negated HAVING condition combined with OR.
    pub fn or_not_having(mut self, condition: impl Into<Condition>) -> Self {
        merge_condition(
            &mut self.having,
            build_condition(condition.into()),
            Operator::NotAny,
        );
        self
    }

    pub fn having_condition(&self) -> Option<&Condition> {
        self.having.as_ref()
    }

    pub fn reset_having(mut self) -> Self {
        self.having = None;
        self
    }

    // ==================== UNION ====================

    pub fn union(mut self, query: Select) -> Self {
        self.unions.push(Union { query, all: false });
        self
    }

    pub fn union_all(mut self, query: Select) -> Self {
        self.unions.push(Union { query, all: true });
        self
    }

    pub fn union_list(&self) -> &[Union] {
        &self.unions
    }

    pub fn reset_union(mut self) -> Self {
        self.unions.clear();
        self
    }

    // ==================== Pagination ====================

    /// Set LIMIT and OFFSET together.
    pub fn paginate(self, limit: i64, offset: i64) -> Self {
        self.limit(limit).offset(offset)
    }

    /// Whether the statement has a query body of its own: a select list,
    /// DISTINCT, FROM, JOIN, WHERE, GROUP BY or HAVING.
    ///
    /// Without one, ORDER BY, LIMIT and OFFSET apply to the whole union.
    pub fn has_own_clauses(&self) -> bool {
        self.distinct
            || !self.columns.is_empty()
            || !self.from.is_empty()
            || !self.joins.is_empty()
            || self.where_.is_some()
            || !self.group_by.is_empty()
            || self.having.is_some()
    }

    /// Derive `SELECT COUNT(*) AS cnt` over this statement.
    ///
    /// ORDER BY, LIMIT and OFFSET are dropped. Statements with GROUP BY,
    /// DISTINCT or UNION are counted through a derived table `s`.
    pub fn count_query(&self) -> Select {
        let mut query = self.clone();
        query.order_by.clear();
        query.limit = None;
        query.offset = None;

        if !query.group_by.is_empty() || query.distinct || !query.unions.is_empty() {
            let with = std::mem::take(&mut query.with);
            query = Select {
                with,
                ..Select::new()
            }
            .from(("s", query));
        }

        query.columns.clear();
        query
            .columns
            .push(Some("cnt".to_string()), Column::from("COUNT(*)"));
        query
    }
}

impl_where_clause!(Select, where_);
impl_cte!(Select, with);

impl OrderBy for Select {
    fn order_by_slot(&mut self) -> &mut Vec<(Column, Option<String>)> {
        &mut self.order_by
    }

    fn order_by_list(&self) -> &[(Column, Option<String>)] {
        &self.order_by
    }
}

impl LimitOffset for Select {
    fn limit_slot(&mut self) -> &mut Option<u64> {
        &mut self.limit
    }

    fn offset_slot(&mut self) -> &mut Option<u64> {
        &mut self.offset
    }

    fn get_limit(&self) -> Option<u64> {
        self.limit
    }

    fn get_offset(&self) -> Option<u64> {
        self.offset
    }
}

impl Statement for Select {
    const KIND: &'static str = "SELECT";

    fn assemble_with(&self, builder: &QueryBuilder) -> SqlResult<BuiltQuery> {
        builder.assemble_select(self)
    }
}
