//! Derive macros for spanql
//!
//! Provides `#[derive(Record)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod record;
mod sql_ident;

/// Derive `Record` (and `IntoRow` for the type and references to it).
///
/// # Example
///
/// ```ignore
/// use spanql::Record;
///
/// #[derive(Record)]
/// #[spanner(rename_all = "PascalCase")]
/// struct Singer {
///     singer_id: i64,
///     #[spanner(column = "FirstName")]
///     first: String,
///     #[spanner(skip)]
///     cached: Option<String>,
/// }
/// ```
///
/// # Attributes
///
/// - `#[spanner(rename_all = "...")]` - Column case for fields without an explicit
///   column: `lowercase`, `UPPERCASE`, `snake_case`, `SCREAMING_SNAKE_CASE`,
///   `kebab-case`, `camelCase` or `PascalCase`
/// - `#[spanner(column = "name")]` - Map field to a different column name
/// - `#[spanner(skip)]` - Leave the field out of the mapping
///
/// Two fields mapping to the same column is a compile error.
#[proc_macro_derive(Record, attributes(spanner))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
