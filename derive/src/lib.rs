//! `#[derive(Bencode)]` for rbencode.
//!
//! Generates `Aggregate`, `Marshal` and `Unmarshal` implementations for structs
//! with named fields. Field options:
//!
//! - `#[bencode(rename = "key")]` stores the field under `key`;
//! - `#[bencode(skip)]` ignores the field;
//! - fields without `pub` visibility are ignored.
//!
//! Two mapped fields with the same key are a compile error.

use std::collections::HashSet;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Field, Fields, LitStr, Visibility};

#[proc_macro_derive(Bencode, attributes(bencode))]
pub fn derive_bencode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

struct FieldMapping {
    ident: syn::Ident,
    ty: syn::Type,
    wire_name: String,
    skipped: bool,
    hidden: bool,
}

impl FieldMapping {
    fn is_mapped(&self) -> bool {
        !self.skipped && !self.hidden
    }
}

fn parse_field(field: &Field) -> syn::Result<FieldMapping> {
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;

    let mut wire_name = ident.to_string();
    if let Some(stripped) = wire_name.strip_prefix("r#") {
        wire_name = stripped.to_string();
    }
    let mut skipped = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("bencode") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skipped = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let name: LitStr = meta.value()?.parse()?;
                wire_name = name.value();
                Ok(())
            } else {
                Err(meta.error("expected `rename = \"...\"` or `skip`"))
            }
        })?;
    }

    Ok(FieldMapping {
        ident,
        ty: field.ty.clone(),
        wire_name,
        skipped,
        hidden: matches!(field.vis, Visibility::Inherited),
    })
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Bencode can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Bencode can only be derived for structs",
            ))
        }
    };

    let mappings = fields
        .iter()
        .map(parse_field)
        .collect::<syn::Result<Vec<_>>>()?;

    let mut wire_names = HashSet::new();
    for (field, mapping) in fields.iter().zip(&mappings) {
        if mapping.is_mapped() && !wire_names.insert(mapping.wire_name.as_str()) {
            return Err(syn::Error::new_spanned(
                field,
                format!("duplicate bencode key `{}`", mapping.wire_name),
            ));
        }
    }

    // Generic structs get one bound per mapped field type.
    let mut generics = input.generics.clone();
    if generics.type_params().next().is_some() {
        let where_clause = generics.make_where_clause();
        for mapping in mappings.iter().filter(|m| m.is_mapped()) {
            let ty = &mapping.ty;
            where_clause.predicates.push(parse_quote! {
                #ty: ::rbencode::marshal::Marshal + ::rbencode::marshal::Unmarshal
            });
        }
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let descriptors = mappings.iter().map(|m| {
        let field_name = m.ident.to_string();
        let wire_name = &m.wire_name;
        let skipped = m.skipped;
        let hidden = m.hidden;
        quote! {
            ::rbencode::marshal::FieldDescriptor {
                name: #field_name,
                wire_name: #wire_name,
                skipped: #skipped,
                hidden: #hidden,
            }
        }
    });

    let mapped: Vec<(usize, &syn::Ident)> = mappings
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_mapped())
        .map(|(index, m)| (index, &m.ident))
        .collect();

    let field_arms = mapped.iter().map(|(index, ident)| {
        quote! {
            #index => ::core::option::Option::Some(
                &self.#ident as &dyn ::rbencode::marshal::Marshal
            ),
        }
    });

    let field_mut_arms = mapped.iter().map(|(index, ident)| {
        quote! {
            #index => ::core::option::Option::Some(
                &mut self.#ident as &mut dyn ::rbencode::marshal::Unmarshal
            ),
        }
    });

    Ok(quote! {
        impl #impl_generics ::rbencode::marshal::Aggregate for #name #ty_generics #where_clause {
            const FIELDS: &'static [::rbencode::marshal::FieldDescriptor] = &[
                #(#descriptors),*
            ];

            fn field(&self, index: usize) -> ::core::option::Option<&dyn ::rbencode::marshal::Marshal> {
                match index {
                    #(#field_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn ::rbencode::marshal::Unmarshal> {
                match index {
                    #(#field_mut_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics ::rbencode::marshal::Marshal for #name #ty_generics #where_clause {
            fn marshal(
                &self,
                encoder: &mut ::rbencode::Encoder,
            ) -> ::core::result::Result<(), ::rbencode::BencodeError> {
                ::rbencode::marshal::marshal_aggregate(self, encoder)
            }
        }

        impl #impl_generics ::rbencode::marshal::Unmarshal for #name #ty_generics #where_clause {
            fn unmarshal_from(
                &mut self,
                value: &::rbencode::Value,
            ) -> ::core::result::Result<(), ::rbencode::BencodeError> {
                ::rbencode::marshal::unmarshal_aggregate(self, value)
            }
        }
    })
}

#[cfg(test)]
mod tests;
