//! Raw SQL fragments with their own bound values.

use crate::value::Value;

/// An opaque SQL fragment such as `NOW()` or `x = ?`.
///
/// The statement is emitted verbatim; each `?` in it consumes one entry of
/// `values`. The optional column list records which columns the fragment
/// references, for callers and dialect rewrites that need to know.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    statement: String,
    values: Vec<Value>,
    columns: Option<Vec<String>>,
}

impl Expression {
    /// Create an expression without bound values.
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            values: Vec::new(),
            columns: None,
        }
    }

    /// Create an expression with bound values.
    ///
    /// # Example
    /// ```ignore
    /// let e = Expression::with_values("? + ?", [1, 2]);
    /// ```
    pub fn with_values<I, V>(statement: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            statement: statement.into(),
            values: values.into_iter().map(Into::into).collect(),
            columns: None,
        }
    }

    /// Append one bound value.
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Record the columns this expression references.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn statement(&self) -> &str {
        &self.statement
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn referenced_columns(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }

    /// Number of `?` placeholders in the statement text.
    pub fn placeholder_count(&self) -> usize {
        self.statement.matches('?').count()
    }
}
