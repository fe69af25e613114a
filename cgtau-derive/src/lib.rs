use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Lit, LitStr, Meta, Type};

/// Derive macro that describes a record's fields for the `schema` command.
///
/// For each named field, extracts:
/// - Field name (respects `#[serde(rename = "...")]`)
/// - Required (false for `Option<T>` or `#[serde(default)]` fields)
/// - Description (from doc comments)
///
/// Generates a `field_schema() -> &'static [SchemaField]` method. The
/// `SchemaField` type must be in scope where the derive is used.
#[proc_macro_derive(FieldSchema, attributes(serde))]
pub fn derive_field_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(name, "FieldSchema requires named fields")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "FieldSchema only supports structs")
                .to_compile_error()
                .into()
        }
    };

    let mut entries = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let serde = match SerdeField::parse(&field.attrs) {
            Ok(serde) => serde,
            Err(err) => return err.to_compile_error().into(),
        };
        let field_name = serde.rename.unwrap_or_else(|| ident.to_string());
        let required = !serde.default && !is_option(&field.ty);
        let description = doc_comment(&field.attrs);

        entries.push(quote! {
            SchemaField {
                name: #field_name,
                required: #required,
                description: #description,
            }
        });
    }

    let expanded = quote! {
        impl #name {
            pub fn field_schema() -> &'static [SchemaField] {
                static FIELDS: &[SchemaField] = &[
                    #(#entries),*
                ];
                FIELDS
            }
        }
    };

    TokenStream::from(expanded)
}

#[derive(Default)]
struct SerdeField {
    rename: Option<String>,
    default: bool,
}

impl SerdeField {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut serde = SerdeField::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    serde.rename = Some(value.value());
                } else if meta.path.is_ident("default") {
                    serde.default = true;
                    if meta.input.peek(syn::Token![=]) {
                        let _: LitStr = meta.value()?.parse()?;
                    }
                } else if meta.input.peek(syn::Token![=]) {
                    // deserialize_with, alias and friends
                    let _: LitStr = meta.value()?.parse()?;
                }
                Ok(())
            })?;
        }
        Ok(serde)
    }
}

fn doc_comment(attrs: &[Attribute]) -> String {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(meta) => match &meta.value {
                syn::Expr::Lit(syn::ExprLit {
                    lit: Lit::Str(doc), ..
                }) => Some(doc.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_option(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        _ => false,
    }
}
