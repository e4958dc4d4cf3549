use super::Dialect;

/// SQLite: ANSI quoting and `LIMIT n OFFSET m`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }
}
