use super::{Dialect, render_offset_fetch};

/// Oracle 12c and later.
///
/// Oracle has no `LIMIT`; row limiting uses `OFFSET .. FETCH NEXT`. Unlike
/// SQL Server an ORDER BY is not required.
#[derive(Debug, Clone, Copy, Default)]
pub struct Oracle;

impl Dialect for Oracle {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn render_limit_offset(&self, limit: Option<u64>, offset: Option<u64>, _separator: &str) -> String {
        render_offset_fetch(limit, offset)
    }
}
