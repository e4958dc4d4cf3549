//! Per-database syntax adapters.
//!
//! A [`Dialect`] is consulted by the [`QueryBuilder`] for the few things that
//! differ between databases: identifier quoting, LIMIT/OFFSET syntax and
//! SELECT rewrites registered as [`SelectHook`](crate::builder::SelectHook)s.
//!
//! | driver names                      | dialect    |
//! |-----------------------------------|------------|
//! | `ansi`                            | [`Ansi`]   |
//! | `mysql`                           | [`Mysql`]  |
//! | `pgsql`, `postgres`, `postgresql` | [`Pgsql`]  |
//! | `mssql`, `sqlsrv`, `dblib`        | [`Mssql`]  |
//! | `oci`, `oracle`                   | [`Oracle`] |
//! | `sqlite`                          | [`Sqlite`] |

mod ansi;
pub mod hooks;
mod mssql;
mod mysql;
mod oracle;
mod pgsql;
mod sqlite;

use std::fmt;
use std::sync::Arc;

use crate::builder::QueryBuilder;
use crate::error::{SqlError, SqlResult};
use crate::ident::{self, QuoteStyle};

pub use ansi::Ansi;
pub use mssql::{LimitRequiresOrder, Mssql};
pub use mysql::Mysql;
pub use oracle::Oracle;
pub use pgsql::{CompleteGroupBy, Pgsql};
pub use sqlite::Sqlite;

/// Syntax strategy for one database.
pub trait Dialect: Send + Sync + fmt::Debug {
    /// Short lowercase name, used in logs.
    fn name(&self) -> &'static str;

    fn quote_style(&self) -> QuoteStyle {
        QuoteStyle::DOUBLE
    }

    /// Quote a possibly dotted identifier, segment by segment.
    fn quote_identifier(&self, name: &str) -> String {
        ident::quote_identifier(name, self.quote_style())
    }

    /// Quote pre-split identifier segments.
    fn quote_parts(&self, parts: &[&str]) -> String {
        ident::quote_parts(parts.iter().copied(), self.quote_style())
    }

    /// Render the LIMIT/OFFSET tail of a SELECT. Empty when neither is set.
    fn render_limit_offset(&self, limit: Option<u64>, offset: Option<u64>, separator: &str) -> String {
        let mut parts = Vec::with_capacity(2);
        if let Some(limit) = limit {
            parts.push(format!("LIMIT {limit}"));
        }
        if let Some(offset) = offset {
            parts.push(format!("OFFSET {offset}"));
        }
        parts.join(separator)
    }

    /// Register SELECT hooks on a freshly created builder.
    fn register_callbacks(&self, builder: &mut QueryBuilder) {
        hooks::register_default_callbacks(builder);
    }
}

/// `OFFSET m ROWS FETCH NEXT n ROWS ONLY`, shared by the dialects without LIMIT.
pub(crate) fn render_offset_fetch(limit: Option<u64>, offset: Option<u64>) -> String {
    match (limit, offset) {
        (None, None) => String::new(),
        (Some(limit), offset) => format!(
            "OFFSET {} ROWS FETCH NEXT {limit} ROWS ONLY",
            offset.unwrap_or(0)
        ),
        (None, Some(offset)) => format!("OFFSET {offset} ROWS"),
    }
}

/// Resolve a driver name to its dialect.
pub fn for_driver(driver: &str) -> SqlResult<Arc<dyn Dialect>> {
    let dialect: Arc<dyn Dialect> = match driver.trim().to_ascii_lowercase().as_str() {
        "ansi" => Arc::new(Ansi),
        "mysql" => Arc::new(Mysql),
        "pgsql" | "postgres" | "postgresql" => Arc::new(Pgsql),
        "mssql" | "sqlsrv" | "dblib" => Arc::new(Mssql),
        "oci" | "oracle" => Arc::new(Oracle),
        "sqlite" => Arc::new(Sqlite),
        _ => return Err(SqlError::UnsupportedDriver(driver.to_string())),
    };
    Ok(dialect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_aliases_resolve() {
        assert_eq!(for_driver("postgres").unwrap().name(), "pgsql");
        assert_eq!(for_driver("PostgreSQL").unwrap().name(), "pgsql");
        assert_eq!(for_driver("sqlsrv").unwrap().name(), "mssql");
        assert_eq!(for_driver("dblib").unwrap().name(), "mssql");
        assert_eq!(for_driver("oci").unwrap().name(), "oracle");
        assert_eq!(for_driver("sqlite").unwrap().name(), "sqlite");
    }

    #[test]
    fn unknown_driver_is_rejected() {
        let err = for_driver("db2").unwrap_err();
        assert_eq!(err, SqlError::UnsupportedDriver("db2".to_string()));
        assert_eq!(err.to_string(), "Unsupported database driver: db2");
    }

    #[test]
    fn default_limit_offset() {
        assert_eq!(Ansi.render_limit_offset(Some(10), Some(20), " "), "LIMIT 10 OFFSET 20");
        assert_eq!(Ansi.render_limit_offset(None, Some(20), " "), "OFFSET 20");
        assert_eq!(Ansi.render_limit_offset(None, None, " "), "");
    }

    #[test]
    fn offset_fetch() {
        assert_eq!(
            render_offset_fetch(Some(10), None),
            "OFFSET 0 ROWS FETCH NEXT 10 ROWS ONLY"
        );
        assert_eq!(render_offset_fetch(None, Some(5)), "OFFSET 5 ROWS");
        assert_eq!(render_offset_fetch(None, None), "");
    }

    #[test]
    fn quoting_follows_dialect() {
        assert_eq!(Ansi.quote_identifier("t.c"), r#""t"."c""#);
        assert_eq!(Mysql.quote_identifier("t.*"), "`t`.*");
        assert_eq!(Mssql.quote_identifier("dbo.users"), "[dbo].[users]");
        assert_eq!(Pgsql.quote_parts(&["a.b", "c"]), r#""a.b"."c""#);
    }
}
