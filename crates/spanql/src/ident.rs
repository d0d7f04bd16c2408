//! SQL identifier handling.
//!
//! This module provides [`Ident`], a column/table path such as `a` or
//! `Singers.SingerId`. Segments are stored unquoted; the renderer decides
//! whether a segment needs backtick quoting.
//!
//! - Unquoted parts in [`Ident::parse`] are validated against `[A-Za-z_][A-Za-z0-9_]*`
//! - Quoted parts use backticks and `\` escapes
//!
//! # Example
//! ```ignore
//! use spanql::Ident;
//!
//! let c = Ident::parse("Singers.SingerId")?;
//! let q = Ident::parse("`Order`.`Item Count`")?;
//! # Ok::<(), spanql::SqlError>(())
//! ```

use crate::error::{SqlError, SqlResult};
use crate::render;

/// A SQL identifier made of one or more dot-separated segments.
///
/// Construction never fails; an identifier with zero segments is reported
/// as [`SqlError::EmptyIdentifier`] when it is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub parts: Vec<String>,
}

impl Ident {
    /// Create an identifier from its segments.
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse an identifier string, supporting dotted and quoted forms.
    ///
    /// - Dotted: `Singers.SingerId`
    /// - Quoted: `` `Order`.`Item Count` ``
    /// - Mixed: ``Albums.`Select`.x``
    pub fn parse(s: &str) -> SqlResult<Self> {
        if s.is_empty() {
            return Err(SqlError::EmptyIdentifier);
        }

        let mut parts = Vec::new();
        let mut chars = s.chars().peekable();

        while chars.peek().is_some() {
            if !parts.is_empty() {
                match chars.next() {
                    Some('.') => {
                        if chars.peek().is_none() {
                            return Err(SqlError::InvalidIdentifier(s.to_string()));
                        }
                    }
                    Some(_) => return Err(SqlError::InvalidIdentifier(s.to_string())),
                    None => break,
                }
            }

            if chars.peek() == Some(&'`') {
                chars.next();
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('`') => break,
                        Some('\\') => match chars.next() {
                            Some(c) => name.push(c),
                            None => return Err(SqlError::InvalidIdentifier(s.to_string())),
                        },
                        Some(c) => name.push(c),
                        None => return Err(SqlError::InvalidIdentifier(s.to_string())),
                    }
                }
                if name.is_empty() {
                    return Err(SqlError::EmptyIdentifier);
                }
                parts.push(name);
                continue;
            }

            let mut name = String::new();
            while let Some(&c) = chars.peek() {
                if c == '.' {
                    break;
                }
                let valid = if name.is_empty() {
                    c == '_' || c.is_ascii_alphabetic()
                } else {
                    c == '_' || c.is_ascii_alphanumeric()
                };
                if !valid {
                    return Err(SqlError::InvalidIdentifier(s.to_string()));
                }
                name.push(c);
                chars.next();
            }
            if name.is_empty() {
                return Err(SqlError::EmptyIdentifier);
            }
            parts.push(name);
        }

        Ok(Self { parts })
    }

    /// Check whether the identifier has no segments.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Render the identifier as SQL.
    pub fn to_sql(&self) -> SqlResult<String> {
        let mut out = String::new();
        self.write_sql(&mut out)?;
        Ok(out)
    }

    pub(crate) fn write_sql(&self, out: &mut String) -> SqlResult<()> {
        if self.parts.is_empty() {
            return Err(SqlError::EmptyIdentifier);
        }
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            render::write_name(part, out)?;
        }
        Ok(())
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Self::new([name])
    }
}

impl From<String> for Ident {
    fn from(name: String) -> Self {
        Self::new([name])
    }
}

impl From<&String> for Ident {
    fn from(name: &String) -> Self {
        Self::new([name.as_str()])
    }
}

impl From<Vec<String>> for Ident {
    fn from(parts: Vec<String>) -> Self {
        Self { parts }
    }
}

impl<const N: usize> From<[&str; N]> for Ident {
    fn from(parts: [&str; N]) -> Self {
        Self::new(parts)
    }
}

/// Create an identifier expression from its segments.
///
/// `ident(["a", "b"])` renders as `a.b`.
pub fn ident<I, S>(parts: I) -> Ident
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Ident::new(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_simple() {
        assert_eq!(ident(["users"]).to_sql().unwrap(), "users");
    }

    #[test]
    fn ident_dotted() {
        assert_eq!(ident(["a", "b"]).to_sql().unwrap(), "a.b");
    }

    #[test]
    fn ident_empty_fails_on_render() {
        let ident = Ident::new(Vec::<String>::new());
        assert!(ident.is_empty());
        assert_eq!(ident.to_sql(), Err(SqlError::EmptyIdentifier));
    }

    #[test]
    fn ident_empty_segment_fails_on_render() {
        assert_eq!(ident(["a", ""]).to_sql(), Err(SqlError::EmptyIdentifier));
    }

    #[test]
    fn ident_quotes_reserved_and_odd_names() {
        assert_eq!(ident(["Order"]).to_sql().unwrap(), "`Order`");
        assert_eq!(ident(["item count"]).to_sql().unwrap(), "`item count`");
        assert_eq!(ident(["1st"]).to_sql().unwrap(), "`1st`");
        assert_eq!(ident(["a`b"]).to_sql().unwrap(), r"`a\`b`");
    }

    #[test]
    fn parse_dotted() {
        let ident = Ident::parse("Singers.SingerId").unwrap();
        assert_eq!(ident.parts, vec!["Singers", "SingerId"]);
    }

    #[test]
    fn parse_quoted_with_escape() {
        let ident = Ident::parse(r"`has\`tick`.x").unwrap();
        assert_eq!(ident.parts, vec!["has`tick", "x"]);
        assert_eq!(ident.to_sql().unwrap(), r"`has\`tick`.x");
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(Ident::parse(""), Err(SqlError::EmptyIdentifier));
        assert!(Ident::parse("1table").is_err());
        assert!(Ident::parse("my table").is_err());
        assert!(Ident::parse("a..b").is_err());
        assert!(Ident::parse("a.").is_err());
        assert!(Ident::parse("`unclosed").is_err());
    }
}
