use syn::{parse_quote, DeriveInput, Item};

use super::expand;

fn expand_err(input: DeriveInput) -> String {
    match expand(&input) {
        Ok(_) => panic!("expected expansion to fail"),
        Err(e) => e.to_string(),
    }
}

fn expanded_impls(input: DeriveInput) -> Vec<syn::ItemImpl> {
    let tokens = expand(&input).unwrap();
    let file: syn::File = syn::parse2(tokens).unwrap();
    file.items
        .into_iter()
        .filter_map(|item| match item {
            Item::Impl(item) => Some(item),
            _ => None,
        })
        .collect()
}

#[test]
fn test_duplicate_rename_rejected() {
    let message = expand_err(parse_quote! {
        struct Pair {
            #[bencode(rename = "x")]
            pub first: i64,
            #[bencode(rename = "x")]
            pub second: i64,
        }
    });
    assert_eq!(message, "duplicate bencode key `x`");
}

#[test]
fn test_rename_onto_field_name_rejected() {
    let message = expand_err(parse_quote! {
        struct Pair {
            pub length: i64,
            #[bencode(rename = "length")]
            pub size: i64,
        }
    });
    assert_eq!(message, "duplicate bencode key `length`");
}

#[test]
fn test_unmapped_fields_may_share_a_key() {
    let input: DeriveInput = parse_quote! {
        struct Pair {
            pub name: String,
            #[bencode(skip, rename = "name")]
            pub alias: String,
            name_cache: String,
        }
    };
    assert!(expand(&input).is_ok());
}

#[test]
fn test_unknown_option_rejected() {
    let message = expand_err(parse_quote! {
        struct Single {
            #[bencode(flatten)]
            pub inner: i64,
        }
    });
    assert!(message.contains("rename"));
}

#[test]
fn test_non_struct_rejected() {
    let message = expand_err(parse_quote! {
        enum Kind { A, B }
    });
    assert_eq!(message, "Bencode can only be derived for structs");

    let message = expand_err(parse_quote! {
        struct Tuple(pub i64);
    });
    assert_eq!(
        message,
        "Bencode can only be derived for structs with named fields"
    );
}

#[test]
fn test_generic_struct_bounds_mapped_fields() {
    let impls = expanded_impls(parse_quote! {
        struct Tagged<T> {
            pub tag: String,
            pub payload: T,
            #[bencode(skip)]
            pub scratch: T,
        }
    });
    assert_eq!(impls.len(), 3);
    for item in impls {
        let where_clause = item.generics.where_clause.unwrap();
        assert_eq!(where_clause.predicates.len(), 2);
    }
}

#[test]
fn test_concrete_struct_has_no_added_bounds() {
    let impls = expanded_impls(parse_quote! {
        struct Plain {
            pub tag: String,
        }
    });
    assert_eq!(impls.len(), 3);
    assert!(impls.iter().all(|item| item.generics.where_clause.is_none()));
}
