//! Macro `#[derive(Ordinal)]` for defining custom index types.
//!
//! See [`ixarray` crate](https://docs.rs/ixarray).

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Lit, Meta, NestedMeta};

/// Derives `ixarray::Ordinal` for a struct wrapping a single `Ordinal` field.
///
/// # Examples
///
/// A newtype that cannot be mixed up with other positions:
///
/// ```
/// use ixarray::{Array, Ordinal};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Ordinal)]
/// struct RowIx(u16);
///
/// let rows: Array<&str, RowIx> = Array::from_slice(&["header", "body"]).unwrap();
/// assert_eq!(rows.at(RowIx(1)), Ok(&"body"));
/// assert_eq!(RowIx::NAME, "RowIx");
/// ```
///
/// Lowering the maximum length and renaming the type in diagnostics:
///
/// ```
/// use ixarray::{Array, Error, Ordinal};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Ordinal)]
/// #[ordinal(max = 2, name = "pair index")]
/// struct PairIx { raw: u8 }
///
/// let mut a: Array<char, PairIx> = Array::from_slice(&['l', 'r']).unwrap();
/// assert_eq!(
///     a.try_push('x').unwrap_err().to_string(),
///     "3 elements requested but index type `pair index` allows at most 2"
/// );
/// ```
///
/// # Attributes
///
/// * `#[ordinal(max = N)]` - the largest length, at most the field type's `MAX_SIZE`.
///   Defaults to the field type's `MAX_SIZE`.
/// * `#[ordinal(name = "...")]` - the name shown in errors. Defaults to the struct name.
///
/// The generated implementation relies on the struct's `Ord` agreeing with the field's,
/// which `#[derive(PartialOrd, Ord)]` guarantees.
///
/// A `max` the field type cannot represent is rejected at compile time:
///
/// ```compile_fail
/// use ixarray::Ordinal;
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Ordinal)]
/// #[ordinal(max = 256)]
/// struct TooBig(u8);
/// ```
///
/// So is a field that is not itself an index type:
///
/// ```compile_fail
/// use ixarray::Ordinal;
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Ordinal)]
/// struct NotOrdinal(char);
/// ```
#[proc_macro_derive(Ordinal, attributes(ordinal))]
pub fn derive_ordinal(item: proc_macro::TokenStream) -> proc_macro::TokenStream {
    match derive_ordinal_impl(item.into()) {
        Ok(x) => x,
        Err(Error(msg, span)) => quote_spanned!(span =>
            ::core::compile_error!(#msg);
        ),
    }
    .into()
}

struct Error(&'static str, proc_macro2::Span);

const USAGE: &str = "expected #[ordinal(max = N)] and/or #[ordinal(name = \"...\")]";

struct Options {
    max: Option<usize>,
    name: Option<String>,
}

impl Options {
    fn parse(attrs: &[syn::Attribute]) -> Result<Self, Error> {
        let mut options = Options {
            max: None,
            name: None,
        };
        for attr in attrs.iter().filter(|a| a.path.is_ident("ordinal")) {
            let list = match attr.parse_meta() {
                Ok(Meta::List(list)) => list,
                Ok(other) => return Err(Error(USAGE, other.span())),
                Err(e) => return Err(Error(USAGE, e.span())),
            };
            for nested in list.nested {
                let nv = match nested {
                    NestedMeta::Meta(Meta::NameValue(nv)) => nv,
                    other => return Err(Error(USAGE, other.span())),
                };
                match &nv.lit {
                    Lit::Int(i) if nv.path.is_ident("max") => {
                        let max = i
                            .base10_parse::<usize>()
                            .map_err(|_| Error("max must be a non-negative integer", i.span()))?;
                        options.max = Some(max);
                    }
                    Lit::Str(s) if nv.path.is_ident("name") => options.name = Some(s.value()),
                    _ => return Err(Error(USAGE, nv.span())),
                }
            }
        }
        Ok(options)
    }
}

fn derive_ordinal_impl(item: TokenStream) -> Result<TokenStream, Error> {
    let d: DeriveInput = match syn::parse2(item) {
        Ok(d) => d,
        Err(e) => {
            return Err(Error(
                "derive(Ordinal) could not parse this as a struct",
                e.span(),
            ))
        }
    };
    if !d.generics.params.is_empty() {
        return Err(Error(
            "derive(Ordinal) does not support generic types",
            d.generics.span(),
        ));
    }
    let fields = if let Data::Struct(s) = &d.data {
        &s.fields
    } else {
        return Err(Error("derive(Ordinal) requires a struct", d.ident.span()));
    };
    let field = match fields {
        Fields::Named(f) if f.named.len() == 1 => &f.named[0],
        Fields::Unnamed(f) if f.unnamed.len() == 1 => &f.unnamed[0],
        _ => {
            return Err(Error(
                "derive(Ordinal) requires a struct with exactly one field",
                fields.span(),
            ))
        }
    };
    let member = match &field.ident {
        Some(ident) => syn::Member::Named(ident.clone()),
        None => syn::Member::Unnamed(syn::Index::from(0)),
    };
    let inner = &field.ty;
    let tyname = &d.ident;
    let options = Options::parse(&d.attrs)?;
    let name = options.name.unwrap_or_else(|| tyname.to_string());
    let (max_size, max_check) = match options.max {
        Some(max) => (
            quote!(#max),
            quote!(
                const _: () = ::core::assert!(
                    #max <= <#inner as ::ixarray::Ordinal>::MAX_SIZE,
                    "ordinal max exceeds the maximum of the underlying type"
                );
            ),
        ),
        None => (quote!(<#inner as ::ixarray::Ordinal>::MAX_SIZE), quote!()),
    };

    Ok(quote!(
        #max_check

        unsafe impl ::ixarray::Ordinal for #tyname {
            const ZERO: Self = Self { #member: <#inner as ::ixarray::Ordinal>::ZERO };
            const MAX_SIZE: usize = #max_size;
            const NAME: &'static str = #name;

            #[inline(always)]
            fn as_usize(self) -> usize {
                <#inner as ::ixarray::Ordinal>::as_usize(self.#member)
            }

            #[inline(always)]
            fn from_usize(x: usize) -> ::core::option::Option<Self> {
                if x > <Self as ::ixarray::Ordinal>::MAX_SIZE {
                    return ::core::option::Option::None;
                }
                <#inner as ::ixarray::Ordinal>::from_usize(x).map(|v| Self { #member: v })
            }
        }
    ))
}
