use super::Dialect;

/// Standard SQL: double-quoted identifiers, `LIMIT n OFFSET m`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ansi;

impl Dialect for Ansi {
    fn name(&self) -> &'static str {
        "ansi"
    }
}
