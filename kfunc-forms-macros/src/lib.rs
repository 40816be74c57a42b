//! Procedural macros for kfunc form records.
//!
//! `#[derive(FormRecord)]` turns a struct declaration into a static field
//! table: one entry per public field holding its declared name, its raw
//! `#[form("...")]` metadata and an accessor that borrows the field's storage.

#![warn(missing_docs, clippy::pedantic)]

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::{
    parse_macro_input, Attribute, Data, DeriveInput, Error, Field, Fields, GenericArgument, LitStr,
    Path, PathArguments, PathSegment, Token, Type, Visibility,
};

const DEFAULT_CRATE: &str = "::kfunc_forms";

/// Scalar types bound from the first submitted value.
const SCALAR_TYPES: &[&str] = &[
    "String", "bool", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64",
    "u128", "usize", "f32", "f64",
];

/// Derives `FormRecord` for a struct with named fields.
///
/// Public fields are entered in declaration order; private fields are left
/// out. A field's metadata is given as `#[form("type=number,label=A")]`.
/// The binder handles `String`, primitive integers and floats, `bool` and
/// `Vec<String>`, recognised by the last segment of the field's type path.
/// Fields of any other type still appear in the schema but are never bound.
#[proc_macro_derive(FormRecord, attributes(form))]
pub fn derive_form_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

enum Binding {
    Scalar,
    TextList,
    Unbound,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let krate = crate_path(&input.attrs)?;
    let ident = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "FormRecord cannot be derived for generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unnamed(_) | Fields::Unit => {
                return Err(Error::new_spanned(
                    ident,
                    "FormRecord requires a struct with named fields",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(Error::new_spanned(
                ident,
                "FormRecord can only be derived for structs",
            ));
        }
    };

    let mut names: Vec<String> = Vec::new();
    let mut accessors = Vec::new();
    let mut entries = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        if matches!(field.vis, Visibility::Inherited) {
            continue;
        }
        let Some(field_ident) = &field.ident else {
            continue;
        };

        let declared = field_ident.unraw().to_string();
        let tag = field_tag(field)?.map(|lit| lit.value()).unwrap_or_default();

        let name = effective_name(&declared, &tag);
        if names.contains(&name) {
            return Err(Error::new_spanned(
                field,
                format!("duplicate form field name `{name}`"),
            ));
        }
        names.push(name);

        let accessor = format_ident!("__kfunc_form_slot_{}", index);
        accessors.push(match classify(&field.ty) {
            Binding::Scalar => quote! {
                fn #accessor(record: &mut #ident) -> #krate::FieldSlot<'_> {
                    #krate::FieldSlot::Scalar(&mut record.#field_ident)
                }
            },
            Binding::TextList => quote! {
                fn #accessor(record: &mut #ident) -> #krate::FieldSlot<'_> {
                    #krate::FieldSlot::TextList(&mut record.#field_ident)
                }
            },
            Binding::Unbound => quote! {
                fn #accessor(_record: &mut #ident) -> #krate::FieldSlot<'_> {
                    #krate::FieldSlot::Unbound
                }
            },
        });
        entries.push(quote! {
            #krate::FieldEntry::new(#declared, #tag, #accessor)
        });
    }

    Ok(quote! {
        #[automatically_derived]
        impl #krate::FormRecord for #ident {
            fn fields() -> &'static [#krate::FieldEntry<Self>] {
                #(#accessors)*

                const FIELDS: &[#krate::FieldEntry<#ident>] = &[#(#entries),*];
                FIELDS
            }
        }
    })
}

/// Reads `#[form(crate = "...")]` from the struct, if present.
fn crate_path(attrs: &[Attribute]) -> syn::Result<TokenStream2> {
    let mut path: Option<Path> = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("form")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                path = Some(lit.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported form attribute, expected `crate = \"...\"`"))
            }
        })?;
    }

    Ok(match path {
        Some(path) => quote!(#path),
        None => DEFAULT_CRATE
            .parse()
            .map_err(|err| Error::new(Span::call_site(), format!("{err}")))?,
    })
}

/// Reads the metadata string from `#[form("...")]` on a field.
fn field_tag(field: &Field) -> syn::Result<Option<LitStr>> {
    let mut tag = None;

    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("form")) {
        let mut args =
            attr.parse_args_with(Punctuated::<LitStr, Token![,]>::parse_terminated)?;
        if args.len() != 1 {
            return Err(Error::new_spanned(
                attr,
                "expected a single metadata string: #[form(\"key=value,...\")]",
            ));
        }
        if tag.is_some() {
            return Err(Error::new_spanned(attr, "duplicate form attribute"));
        }
        tag = args.pop().map(syn::punctuated::Pair::into_value);
    }

    Ok(tag)
}

/// Name the field is addressed by, following the runtime `name=` rule.
fn effective_name(declared: &str, tag: &str) -> String {
    tag.split(',')
        .filter_map(|entry| entry.trim().split_once('='))
        .filter(|(key, value)| *key == "name" && !value.is_empty())
        .next_back()
        .map_or_else(|| declared.to_owned(), |(_, value)| value.to_owned())
}

fn classify(ty: &Type) -> Binding {
    let Some(segment) = last_segment(ty) else {
        return Binding::Unbound;
    };
    let ident = segment.ident.to_string();

    match &segment.arguments {
        PathArguments::None if SCALAR_TYPES.contains(&ident.as_str()) => Binding::Scalar,
        PathArguments::AngleBracketed(args) if ident == "Vec" && args.args.len() == 1 => {
            match args.args.first() {
                Some(GenericArgument::Type(inner)) if is_string(inner) => Binding::TextList,
                _ => Binding::Unbound,
            }
        }
        _ => Binding::Unbound,
    }
}

fn is_string(ty: &Type) -> bool {
    last_segment(ty).is_some_and(|segment| {
        segment.ident == "String" && matches!(segment.arguments, PathArguments::None)
    })
}

fn last_segment(ty: &Type) -> Option<&PathSegment> {
    match ty {
        Type::Path(path) if path.qself.is_none() => path.path.segments.last(),
        Type::Group(group) => last_segment(&group.elem),
        Type::Paren(paren) => last_segment(&paren.elem),
        _ => None,
    }
}
