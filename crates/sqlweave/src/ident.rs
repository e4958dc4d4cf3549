//! SQL identifier quoting.
//!
//! [`Ident`] splits a dotted path (`schema.table.column`) into segments and
//! renders each segment wrapped in the quote characters of a [`QuoteStyle`].
//!
//! - `*` is never quoted, so `t.*` renders as `"t".*`
//! - A closing quote character inside a segment is escaped by doubling it
//! - Segments that are already quoted in the input are unwrapped first, so
//!   quoting is idempotent and dots inside them are preserved
//!
//! # Example
//! ```ignore
//! use sqlweave::ident::{Ident, QuoteStyle};
//!
//! let id = Ident::parse("public.users", QuoteStyle::DOUBLE);
//! assert_eq!(id.to_sql(QuoteStyle::DOUBLE), r#""public"."users""#);
//! ```

/// Opening and closing quote characters of a dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteStyle {
    pub open: char,
    pub close: char,
}

impl QuoteStyle {
    /// ANSI double quotes: `"name"`.
    pub const DOUBLE: QuoteStyle = QuoteStyle {
        open: '"',
        close: '"',
    };
    /// MySQL backticks: `` `name` ``.
    pub const BACKTICK: QuoteStyle = QuoteStyle {
        open: '`',
        close: '`',
    };
    /// SQL Server brackets: `[name]`.
    pub const BRACKET: QuoteStyle = QuoteStyle {
        open: '[',
        close: ']',
    };

    /// Quote one segment. `*` is returned unchanged.
    pub fn quote(&self, segment: &str) -> String {
        if segment == "*" {
            return segment.to_string();
        }

        let mut out = String::with_capacity(segment.len() + 2);
        out.push(self.open);
        for c in segment.chars() {
            if c == self.close {
                out.push(self.close);
            }
            out.push(c);
        }
        out.push(self.close);
        out
    }
}

/// A dotted SQL identifier (column, table, or schema name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    parts: Vec<String>,
}

impl Ident {
    /// Build an identifier from pre-split segments.
    ///
    /// Segments are taken verbatim: dots inside them are not split.
    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a dotted path into segments.
    ///
    /// Segments wrapped in `style`'s quote characters are unwrapped (with
    /// doubled closing quotes collapsed) and may contain dots.
    pub fn parse(s: &str, style: QuoteStyle) -> Self {
        let mut parts = Vec::new();
        let mut chars = s.chars().peekable();

        loop {
            let mut name = String::new();

            if chars.peek() == Some(&style.open) {
                chars.next();
                while let Some(c) = chars.next() {
                    if c == style.close {
                        // Escaped closing quote.
                        if chars.peek() == Some(&style.close) {
                            chars.next();
                            name.push(c);
                            continue;
                        }
                        break;
                    }
                    name.push(c);
                }
                // Anything between the closing quote and the next dot stays with this part.
                while let Some(&c) = chars.peek() {
                    if c == '.' {
                        break;
                    }
                    name.push(c);
                    chars.next();
                }
            } else {
                while let Some(&c) = chars.peek() {
                    if c == '.' {
                        break;
                    }
                    name.push(c);
                    chars.next();
                }
            }

            parts.push(name);

            match chars.next() {
                Some('.') => continue,
                _ => break,
            }
        }

        Self { parts }
    }

    /// The unquoted segments.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Render the identifier with every segment quoted.
    pub fn to_sql(&self, style: QuoteStyle) -> String {
        self.parts
            .iter()
            .map(|p| style.quote(p))
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Quote a dotted identifier path.
pub fn quote_identifier(name: &str, style: QuoteStyle) -> String {
    Ident::parse(name, style).to_sql(style)
}

/// Quote pre-split identifier segments, joining them with `.`.
pub fn quote_parts<I, S>(parts: I, style: QuoteStyle) -> String
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Ident::from_parts(parts).to_sql(style)
}
