//! Clause building blocks shared by the statement types.

use crate::expression::Expression;
use crate::stmt::select::Select;
use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

/// A column-like item: plain text, a raw expression or a subquery.
///
/// Plain text is emitted verbatim (it is not quoted). Expressions are
/// parenthesized in the SELECT list and bare in GROUP BY / ORDER BY;
/// subqueries are always parenthesized.
#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    Name(String),
    Expr(Expression),
    Select(Box<Select>),
}

impl Column {
    /// The column text, if this is a plain name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Column::Name(n) => Some(n),
            _ => None,
        }
    }
}

impl From<&str> for Column {
    fn from(s: &str) -> Self {
        Column::Name(s.to_string())
    }
}

impl From<String> for Column {
    fn from(s: String) -> Self {
        Column::Name(s)
    }
}

impl From<i64> for Column {
    fn from(n: i64) -> Self {
        Column::Name(n.to_string())
    }
}

impl From<i32> for Column {
    fn from(n: i32) -> Self {
        Column::Name(n.to_string())
    }
}

impl From<Expression> for Column {
    fn from(e: Expression) -> Self {
        Column::Expr(e)
    }
}

impl From<Select> for Column {
    fn from(s: Select) -> Self {
        Column::Select(Box::new(s))
    }
}

/// A FROM / JOIN / INTO source.
#[derive(Clone, Debug, PartialEq)]
pub enum TableRef {
    Table(String),
    Select(Box<Select>),
}

impl From<&str> for TableRef {
    fn from(s: &str) -> Self {
        TableRef::Table(s.to_string())
    }
}

impl From<String> for TableRef {
    fn from(s: String) -> Self {
        TableRef::Table(s)
    }
}

impl From<Select> for TableRef {
    fn from(s: Select) -> Self {
        TableRef::Select(Box::new(s))
    }
}

/// JOIN flavour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    pub fn keyword(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
        }
    }
}

/// A value assigned by INSERT or UPDATE.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// Bound as `?`.
    Value(Value),
    /// Emitted verbatim with its own values.
    Expr(Expression),
    /// Emitted as `(SELECT ...)`.
    Select(Box<Select>),
}

macro_rules! impl_operand_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Operand {
                fn from(v: $t) -> Self {
                    Operand::Value(Value::from(v))
                }
            }
        )*
    };
}

impl_operand_scalar!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    &str,
    String,
    Vec<u8>,
    Uuid,
    NaiveDate,
    NaiveDateTime,
    DateTime<Utc>,
    serde_json::Value,
    Value,
);

#[cfg(feature = "rust_decimal")]
impl_operand_scalar!(rust_decimal::Decimal);

impl<T: Into<Value>> From<Option<T>> for Operand {
    fn from(v: Option<T>) -> Self {
        Operand::Value(Value::from(v))
    }
}

impl From<Expression> for Operand {
    fn from(e: Expression) -> Self {
        Operand::Expr(e)
    }
}

impl From<Select> for Operand {
    fn from(s: Select) -> Self {
        Operand::Select(Box::new(s))
    }
}

// ==================== AliasList ====================

/// Ordered `(alias, item)` pairs.
///
/// Entries without an alias render positionally. Pushing an alias that is
/// already present replaces that entry in place, keeping its position.
#[derive(Clone, Debug, PartialEq)]
pub struct AliasList<T> {
    entries: Vec<(Option<String>, T)>,
}

impl<T> Default for AliasList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> AliasList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, alias: Option<String>, item: T) {
        if let Some(name) = alias.as_deref()
            && let Some(slot) = self
                .entries
                .iter_mut()
                .find(|(a, _)| a.as_deref() == Some(name))
        {
            slot.1 = item;
            return;
        }
        self.entries.push((alias, item));
    }

    pub fn extend(&mut self, items: Vec<(Option<String>, T)>) {
        for (alias, item) in items {
            self.push(alias, item);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, &T)> {
        self.entries.iter().map(|(a, t)| (a.as_deref(), t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Look up an entry by alias.
    pub fn get(&self, alias: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(a, _)| a.as_deref() == Some(alias))
            .map(|(_, t)| t)
    }
}

// ==================== Input conversions ====================

/// Input accepted wherever `{alias: source}` pairs are allowed.
///
/// - `"col"` or `Expression`/`Select` values: positional entries
/// - `("alias", source)`: aliased entry
/// - `Vec` / arrays of the above: several entries in order
pub trait IntoAliased<T> {
    fn into_aliased(self) -> Vec<(Option<String>, T)>;
}

impl<'a, T: From<&'a str>> IntoAliased<T> for &'a str {
    fn into_aliased(self) -> Vec<(Option<String>, T)> {
        vec![(None, T::from(self))]
    }
}

impl<T: From<String>> IntoAliased<T> for String {
    fn into_aliased(self) -> Vec<(Option<String>, T)> {
        vec![(None, T::from(self))]
    }
}

impl IntoAliased<Column> for Expression {
    fn into_aliased(self) -> Vec<(Option<String>, Column)> {
        vec![(None, Column::Expr(self))]
    }
}

impl IntoAliased<Column> for Select {
    fn into_aliased(self) -> Vec<(Option<String>, Column)> {
        vec![(None, Column::Select(Box::new(self)))]
    }
}

impl IntoAliased<Column> for Column {
    fn into_aliased(self) -> Vec<(Option<String>, Column)> {
        vec![(None, self)]
    }
}

impl IntoAliased<TableRef> for Select {
    fn into_aliased(self) -> Vec<(Option<String>, TableRef)> {
        vec![(None, TableRef::Select(Box::new(self)))]
    }
}

impl<T, V: Into<T>> IntoAliased<T> for (&str, V) {
    fn into_aliased(self) -> Vec<(Option<String>, T)> {
        vec![(Some(self.0.to_string()), self.1.into())]
    }
}

impl<T, V: Into<T>> IntoAliased<T> for (String, V) {
    fn into_aliased(self) -> Vec<(Option<String>, T)> {
        vec![(Some(self.0), self.1.into())]
    }
}

impl<T, I: IntoAliased<T>> IntoAliased<T> for Vec<I> {
    fn into_aliased(self) -> Vec<(Option<String>, T)> {
        self.into_iter().flat_map(IntoAliased::into_aliased).collect()
    }
}

impl<T, I: IntoAliased<T>, const N: usize> IntoAliased<T> for [I; N] {
    fn into_aliased(self) -> Vec<(Option<String>, T)> {
        self.into_iter().flat_map(IntoAliased::into_aliased).collect()
    }
}

/// Input accepted by GROUP BY: one column or a list of columns.
pub trait IntoColumnList {
    fn into_column_list(self) -> Vec<Column>;
}

impl IntoColumnList for &str {
    fn into_column_list(self) -> Vec<Column> {
        vec![Column::from(self)]
    }
}

impl IntoColumnList for String {
    fn into_column_list(self) -> Vec<Column> {
        vec![Column::from(self)]
    }
}

impl IntoColumnList for Column {
    fn into_column_list(self) -> Vec<Column> {
        vec![self]
    }
}

impl IntoColumnList for Expression {
    fn into_column_list(self) -> Vec<Column> {
        vec![Column::Expr(self)]
    }
}

impl IntoColumnList for Select {
    fn into_column_list(self) -> Vec<Column> {
        vec![Column::Select(Box::new(self))]
    }
}

impl<I: IntoColumnList> IntoColumnList for Vec<I> {
    fn into_column_list(self) -> Vec<Column> {
        self.into_iter().flat_map(IntoColumnList::into_column_list).collect()
    }
}

impl<I: IntoColumnList, const N: usize> IntoColumnList for [I; N] {
    fn into_column_list(self) -> Vec<Column> {
        self.into_iter().flat_map(IntoColumnList::into_column_list).collect()
    }
}

/// Input accepted by ORDER BY.
///
/// - `"col"`: no direction
/// - `("col", "DESC")`: column with direction
/// - `Vec` / arrays of the above
pub trait IntoOrderBy {
    fn into_order_by(self) -> Vec<(Column, Option<String>)>;
}

impl IntoOrderBy for &str {
    fn into_order_by(self) -> Vec<(Column, Option<String>)> {
        vec![(Column::from(self), None)]
    }
}

impl IntoOrderBy for String {
    fn into_order_by(self) -> Vec<(Column, Option<String>)> {
        vec![(Column::from(self), None)]
    }
}

impl IntoOrderBy for Expression {
    fn into_order_by(self) -> Vec<(Column, Option<String>)> {
        vec![(Column::Expr(self), None)]
    }
}

impl IntoOrderBy for Select {
    fn into_order_by(self) -> Vec<(Column, Option<String>)> {
        vec![(Column::Select(Box::new(self)), None)]
    }
}

impl<C: Into<Column>> IntoOrderBy for (C, &str) {
    fn into_order_by(self) -> Vec<(Column, Option<String>)> {
        vec![(self.0.into(), Some(self.1.to_string()))]
    }
}

impl<I: IntoOrderBy> IntoOrderBy for Vec<I> {
    fn into_order_by(self) -> Vec<(Column, Option<String>)> {
        self.into_iter().flat_map(IntoOrderBy::into_order_by).collect()
    }
}

impl<I: IntoOrderBy, const N: usize> IntoOrderBy for [I; N] {
    fn into_order_by(self) -> Vec<(Column, Option<String>)> {
        self.into_iter().flat_map(IntoOrderBy::into_order_by).collect()
    }
}
