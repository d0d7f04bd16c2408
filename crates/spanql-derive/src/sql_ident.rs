use std::collections::HashMap;

use proc_macro2::Span;
use syn::{Error, LitStr, Result};

/// Parse an explicit column name. Any non-empty name without NUL is accepted;
/// the renderer quotes names that need it.
pub(crate) fn parse_column_name(lit: &LitStr) -> Result<String> {
    check_column_name(&lit.value(), lit.span())
}

pub(crate) fn check_column_name(s: &str, span: Span) -> Result<String> {
    if s.is_empty() {
        return Err(Error::new(span, "column name must not be empty"));
    }
    if s.contains('\0') {
        return Err(Error::new(span, "column name must not contain NUL"));
    }
    Ok(s.to_string())
}

/// Reject two fields mapping to the same column.
pub(crate) fn check_unique_columns<'a>(
    columns: impl IntoIterator<Item = (&'a str, Span)>,
) -> Result<()> {
    let mut seen = HashMap::<&str, Span>::new();
    for (column, span) in columns {
        if seen.insert(column, span).is_some() {
            return Err(Error::new(
                span,
                format!("duplicate column '{column}': another field already maps to it"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_name_rules() {
        let span = Span::call_site();
        assert_eq!(check_column_name("first name", span).unwrap(), "first name");
        assert!(check_column_name("", span).is_err());
        assert!(check_column_name("a\0b", span).is_err());
    }

    #[test]
    fn duplicates_rejected() {
        let span = Span::call_site();
        assert!(check_unique_columns([("a", span), ("b", span)]).is_ok());
        assert!(check_unique_columns([("a", span), ("b", span), ("a", span)]).is_err());
    }
}
