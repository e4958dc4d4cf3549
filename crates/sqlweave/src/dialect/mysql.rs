use super::Dialect;
use crate::ident::QuoteStyle;

/// MySQL / MariaDB: backtick-quoted identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mysql;

impl Dialect for Mysql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_style(&self) -> QuoteStyle {
        QuoteStyle::BACKTICK
    }
}
