//! SELECT hooks shared by every dialect.

use std::borrow::Cow;

use crate::builder::{QueryBuilder, SelectHook};
use crate::error::{SqlError, SqlResult};
use crate::stmt::Select;

/// Rejects ORDER BY directions other than ASC, DESC or empty.
///
/// Comparison is case-insensitive and ignores surrounding whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateOrderBy;

impl SelectHook for ValidateOrderBy {
    fn name(&self) -> &'static str {
        "validate_order_by"
    }

    fn on_assemble_select(&self, select: &mut Cow<'_, Select>) -> SqlResult<()> {
        for (_, direction) in &select.order_by {
            let Some(direction) = direction else { continue };
            let normalized = direction.trim();
            if !(normalized.is_empty()
                || normalized.eq_ignore_ascii_case("asc")
                || normalized.eq_ignore_ascii_case("desc"))
            {
                return Err(SqlError::InvalidDirection(direction.clone()));
            }
        }
        Ok(())
    }
}

/// Hooks every dialect registers.
pub fn register_default_callbacks(builder: &mut QueryBuilder) {
    builder.on_assemble_select(ValidateOrderBy);
}
