//! Record derive macro implementation

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Data, DeriveInput, Fields, GenericParam, Lifetime, LifetimeParam, LitStr, Result};

use crate::sql_ident::{check_column_name, check_unique_columns, parse_column_name};

/// Case conversion applied to field names without an explicit column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RenameRule {
    Lower,
    Upper,
    Snake,
    ScreamingSnake,
    Kebab,
    Camel,
    Pascal,
}

impl RenameRule {
    fn parse(lit: &LitStr) -> Result<Self> {
        match lit.value().as_str() {
            "lowercase" => Ok(RenameRule::Lower),
            "UPPERCASE" => Ok(RenameRule::Upper),
            "snake_case" => Ok(RenameRule::Snake),
            "SCREAMING_SNAKE_CASE" => Ok(RenameRule::ScreamingSnake),
            "kebab-case" => Ok(RenameRule::Kebab),
            "camelCase" => Ok(RenameRule::Camel),
            "PascalCase" => Ok(RenameRule::Pascal),
            other => Err(syn::Error::new(
                lit.span(),
                format!(
                    "unknown rename_all rule '{other}' (expected one of lowercase, UPPERCASE, \
                     snake_case, SCREAMING_SNAKE_CASE, kebab-case, camelCase, PascalCase)"
                ),
            )),
        }
    }

    fn apply(self, field: &str) -> String {
        match self {
            RenameRule::Lower => field.to_ascii_lowercase(),
            RenameRule::Upper => field.to_ascii_uppercase(),
            RenameRule::Snake => field.to_snake_case(),
            RenameRule::ScreamingSnake => field.to_shouty_snake_case(),
            RenameRule::Kebab => field.to_kebab_case(),
            RenameRule::Camel => field.to_lower_camel_case(),
            RenameRule::Pascal => field.to_upper_camel_case(),
        }
    }
}

#[derive(Default)]
struct FieldAttr {
    column: Option<String>,
    skip: bool,
}

fn struct_rename_rule(input: &DeriveInput) -> Result<Option<RenameRule>> {
    let mut rule = None;
    for attr in &input.attrs {
        if !attr.path().is_ident("spanner") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                let lit: LitStr = meta.value()?.parse()?;
                rule = Some(RenameRule::parse(&lit)?);
                Ok(())
            } else {
                Err(meta.error("unsupported struct attribute (expected rename_all)"))
            }
        })?;
    }
    Ok(rule)
}

fn field_attr(field: &syn::Field) -> Result<FieldAttr> {
    let mut parsed = FieldAttr::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("spanner") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("column") {
                let lit: LitStr = meta.value()?.parse()?;
                parsed.column = Some(parse_column_name(&lit)?);
                Ok(())
            } else if meta.path.is_ident("skip") {
                parsed.skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported field attribute (expected column or skip)"))
            }
        })?;
    }
    if parsed.skip && parsed.column.is_some() {
        return Err(syn::Error::new_spanned(
            field,
            "a skipped field cannot also set a column",
        ));
    }
    Ok(parsed)
}

struct MappedField<'a> {
    ident: &'a syn::Ident,
    ty: &'a syn::Type,
    column: String,
    span: Span,
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Record can only be derived for structs",
            ));
        }
    };

    let rule = struct_rename_rule(&input)?;

    let mut mapped = Vec::new();
    for field in fields {
        let attr = field_attr(field)?;
        if attr.skip {
            continue;
        }
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let span = ident.span();
        let column = match attr.column {
            Some(column) => column,
            None => {
                let raw = ident.to_string();
                let raw = raw.strip_prefix("r#").unwrap_or(&raw);
                let column = rule.map_or_else(|| raw.to_string(), |r| r.apply(raw));
                check_column_name(&column, span)?
            }
        };
        mapped.push(MappedField {
            ident,
            ty: &field.ty,
            column,
            span,
        });
    }

    check_unique_columns(mapped.iter().map(|f| (f.column.as_str(), f.span)))?;

    let record_type = name.to_string();
    let columns: Vec<&str> = mapped.iter().map(|f| f.column.as_str()).collect();
    let arms = mapped.iter().map(|f| {
        let ident = f.ident;
        let column = &f.column;
        quote! {
            #column => ::core::option::Option::Some(::spanql::ToExpr::to_expr(&self.#ident))
        }
    });

    // Generic field types need a ToExpr bound; concrete ones are checked directly.
    let mut generics = input.generics.clone();
    if generics.type_params().next().is_some() {
        let where_clause = generics.make_where_clause();
        for f in &mapped {
            let ty = f.ty;
            where_clause
                .predicates
                .push(syn::parse_quote!(#ty: ::spanql::ToExpr));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut ref_generics = generics.clone();
    let lifetime = Lifetime::new("'__spanql_record", Span::call_site());
    ref_generics
        .params
        .insert(0, GenericParam::Lifetime(LifetimeParam::new(lifetime.clone())));
    let (ref_impl_generics, _, _) = ref_generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::spanql::Record for #name #ty_generics #where_clause {
            const RECORD_TYPE: &'static str = #record_type;

            fn columns() -> &'static [&'static str] {
                &[#(#columns),*]
            }

            fn column_value(
                &self,
                column: &str,
            ) -> ::core::option::Option<::spanql::SqlResult<::spanql::Expr>> {
                match column {
                    #(#arms,)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics ::spanql::IntoRow for #name #ty_generics #where_clause {
            fn into_row(
                self,
                columns: &[::std::string::String],
            ) -> ::spanql::SqlResult<::spanql::Row> {
                ::spanql::encode_record(&self, columns)
            }
        }

        impl #ref_impl_generics ::spanql::IntoRow for &#lifetime #name #ty_generics #where_clause {
            fn into_row(
                self,
                columns: &[::std::string::String],
            ) -> ::spanql::SqlResult<::spanql::Row> {
                ::spanql::encode_record(self, columns)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand_err(input: DeriveInput) -> String {
        match expand(input) {
            Ok(_) => panic!("expected an error"),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn test_rename_rules() {
        assert_eq!(RenameRule::Pascal.apply("singer_id"), "SingerId");
        assert_eq!(RenameRule::Camel.apply("singer_id"), "singerId");
        assert_eq!(RenameRule::ScreamingSnake.apply("singer_id"), "SINGER_ID");
        assert_eq!(RenameRule::Upper.apply("singer_id"), "SINGER_ID");
        assert_eq!(RenameRule::Snake.apply("singerId"), "singer_id");
        assert_eq!(RenameRule::Kebab.apply("singer_id"), "singer-id");
    }

    #[test]
    fn test_expand_lists_columns_in_order() {
        let input: DeriveInput = parse_quote! {
            #[spanner(rename_all = "PascalCase")]
            struct Singer {
                singer_id: i64,
                #[spanner(column = "Name")]
                first_name: String,
                #[spanner(skip)]
                cached: bool,
            }
        };
        let tokens = expand(input).unwrap().to_string();
        let singer_id = tokens.find("\"SingerId\"").unwrap();
        let name = tokens.find("\"Name\"").unwrap();
        assert!(singer_id < name);
        assert!(tokens.contains("\"Singer\""));
        assert!(!tokens.contains("cached"));
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Dup {
                a: i64,
                #[spanner(column = "a")]
                b: i64,
            }
        };
        assert!(expand_err(input).contains("duplicate column 'a'"));
    }

    #[test]
    fn test_tuple_struct_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Pair(i64, i64);
        };
        assert!(expand_err(input).contains("named fields"));
    }

    #[test]
    fn test_unknown_attribute_rejected() {
        let input: DeriveInput = parse_quote! {
            struct T {
                #[spanner(rename = "x")]
                a: i64,
            }
        };
        assert!(expand_err(input).contains("unsupported field attribute"));
    }

    #[test]
    fn test_skip_with_column_rejected() {
        let input: DeriveInput = parse_quote! {
            struct T {
                #[spanner(skip, column = "x")]
                a: i64,
            }
        };
        assert!(expand_err(input).contains("skipped field"));
    }
}
