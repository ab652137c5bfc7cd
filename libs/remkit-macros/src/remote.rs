use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use std::collections::HashSet;
use syn::punctuated::Punctuated;
use syn::{Expr, ExprLit, ItemTrait, Lit, Meta, Token};

const ALLOWED_KEYS: &[&str] = &["name", "transport"];
const TRANSPORTS: &[(&str, &str)] = &[
    ("http", "Http"),
    ("rmi", "Rmi"),
    ("bincode", "Bincode"),
    ("msgpack", "MsgPack"),
];

fn err(spanned: &dyn quote::ToTokens, message: String) -> TokenStream {
    syn::Error::new_spanned(spanned, message).to_compile_error()
}

pub fn expand_remote(args: &Punctuated<Meta, Token![,]>, item: &ItemTrait) -> TokenStream {
    if !item.generics.params.is_empty() {
        return err(
            &item.generics,
            "remote contracts cannot be generic".to_owned(),
        );
    }

    let mut name = String::new();
    let mut variant = "Http";
    let mut seen_keys = HashSet::new();

    for meta in args {
        let Meta::NameValue(nv) = meta else {
            return err(meta, "expected `key = value`".to_owned());
        };
        let Some(key) = nv.path.get_ident().map(ToString::to_string) else {
            return err(&nv.path, "expected an identifier key".to_owned());
        };
        if !ALLOWED_KEYS.contains(&key.as_str()) {
            return err(
                &nv.path,
                format!(
                    "unknown key '{key}'; expected one of: {}",
                    ALLOWED_KEYS.join(", ")
                ),
            );
        }
        if !seen_keys.insert(key.clone()) {
            return err(&nv.path, format!("duplicate key '{key}'"));
        }
        match key.as_str() {
            "name" => {
                let Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) = &nv.value
                else {
                    return err(&nv.value, "name expects a string literal".to_owned());
                };
                name = lit.value();
            }
            "transport" => {
                let Expr::Path(path) = &nv.value else {
                    return err(
                        &nv.value,
                        "transport expects an identifier, e.g. `transport = rmi`".to_owned(),
                    );
                };
                let Some(ident) = path.path.get_ident().map(ToString::to_string) else {
                    return err(&path.path, "transport expects a plain identifier".to_owned());
                };
                let Some((_, v)) = TRANSPORTS.iter().find(|(n, _)| *n == ident) else {
                    let known: Vec<&str> = TRANSPORTS.iter().map(|(n, _)| *n).collect();
                    return err(
                        &path.path,
                        format!(
                            "unsupported transport '{ident}'; expected one of: {}",
                            known.join(", ")
                        ),
                    );
                };
                variant = v;
            }
            _ => unreachable!("key validated above"),
        }
    }

    let trait_ident = &item.ident;
    let type_name = trait_ident.to_string();
    let variant = format_ident!("{variant}");

    quote! {
        #item

        ::remkit::inventory::submit! {
            ::remkit::manifest::ContractRegistration {
                module_path: ::core::module_path!(),
                type_name: #type_name,
                descriptor: ::remkit::descriptor::ExposureDescriptor {
                    name: #name,
                    transport: ::remkit::descriptor::TransportKind::#variant,
                },
            }
        }
    }
}
