use std::borrow::Cow;

use super::{Dialect, hooks, render_offset_fetch};
use crate::builder::{QueryBuilder, SelectHook};
use crate::error::SqlResult;
use crate::ident::QuoteStyle;
use crate::stmt::clause::Column;
use crate::stmt::Select;

/// Microsoft SQL Server: bracket-quoted identifiers and
/// `OFFSET m ROWS FETCH NEXT n ROWS ONLY`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mssql;

impl Dialect for Mssql {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn quote_style(&self) -> QuoteStyle {
        QuoteStyle::BRACKET
    }

    fn render_limit_offset(&self, limit: Option<u64>, offset: Option<u64>, _separator: &str) -> String {
        render_offset_fetch(limit, offset)
    }

    fn register_callbacks(&self, builder: &mut QueryBuilder) {
        hooks::register_default_callbacks(builder);
        builder.on_assemble_select(LimitRequiresOrder);
    }
}

/// OFFSET/FETCH is only valid after ORDER BY; adds `ORDER BY 1` when a
/// limited SELECT has none.
#[derive(Debug, Clone, Copy, Default)]
pub struct LimitRequiresOrder;

impl SelectHook for LimitRequiresOrder {
    fn name(&self) -> &'static str {
        "limit_requires_order"
    }

    fn on_assemble_select(&self, select: &mut Cow<'_, Select>) -> SqlResult<()> {
        let limited = select.limit.is_some() || select.offset.is_some();
        if limited && select.order_by.is_empty() {
            select.to_mut().order_by.push((Column::from("1"), None));
        }
        Ok(())
    }
}
