//! Derive macro implementation for envbind

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

mod attrs;

use attrs::{FieldAttrs, StructAttrs};

/// `EnvBind` derive macro
///
/// Implements `envbind::Record` by generating the field table the binder
/// walks: one entry per bound field, in declaration order.
///
/// # Supported Attributes
///
/// **Field-level**:
/// - `#[env("KEY")]`: bind from `KEY`
/// - `#[env("KEY,required")]`: fail when `KEY` is unset
/// - `#[env("KEY,default=VALUE")]`: use `VALUE` when `KEY` is unset or empty
/// - `#[env("-")]`: leave the field out entirely (any type allowed)
///
/// **Struct-level**:
/// - `#[env(implicit)]`: list fields without `#[env]` too, with no directive,
///   so a binder with implicit keys enabled can fill them. Such fields must
///   then be of a bindable type.
///
/// Without `#[env(implicit)]`, fields without `#[env]` are left out like
/// `#[env("-")]` fields and may be of any type.
///
/// Also generates an inherent `from_env()` for `Default` structs, so callers
/// don't need `envbind::Record` in scope.
///
/// # Example
///
/// See the `envbind` crate documentation for usage examples.
#[proc_macro_derive(EnvBind, attributes(env))]
pub fn derive_envbind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    // Struct name
    let struct_name = &input.ident;
    let implicit = StructAttrs::from_input(input)?.implicit;

    // Extract fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    struct_name,
                    format!("EnvBind only supports structs with named fields: `{struct_name}`"),
                ));
            }
        },
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                struct_name,
                format!("EnvBind only supports structs, found enum `{struct_name}`"),
            ));
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                struct_name,
                format!("EnvBind only supports structs, found union `{struct_name}`"),
            ));
        }
    };

    let mut entries = Vec::with_capacity(fields.len());
    for field in fields {
        let attrs = FieldAttrs::from_field(field)?;
        if attrs.is_skipped() || (attrs.directive.is_none() && !implicit) {
            continue;
        }

        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let name = ident.unraw().to_string();

        let directive = match &attrs.directive {
            Some(lit) => quote! { ::core::option::Option::Some(#lit) },
            None => quote! { ::core::option::Option::None },
        };

        entries.push(quote! {
            ::envbind::Field::new(
                #name,
                #directive,
                ::envbind::AsSlot::as_slot(&mut self.#ident)
            )
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::envbind::Record for #struct_name #ty_generics #where_clause {
            fn fields(&mut self) -> ::std::vec::Vec<::envbind::Field<'_>> {
                ::std::vec![#(#entries),*]
            }
        }

        impl #impl_generics #struct_name #ty_generics #where_clause {
            /// Create an instance from `Default` and bind it from the
            /// environment with the default binder.
            #[allow(dead_code)]
            pub fn from_env() -> ::core::result::Result<Self, ::envbind::BindError>
            where
                for<'__envbind> Self: ::core::default::Default,
            {
                <Self as ::envbind::Record>::from_env()
            }
        }
    })
}
