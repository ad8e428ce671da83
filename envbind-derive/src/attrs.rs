//! Attribute parsing for `#[env(...)]` annotations.
//!
//! The directive string is passed through unchanged; its grammar is checked
//! by the runtime when the record is bound.

use syn::{Attribute, DeriveInput, Field, Ident, LitStr};

/// Struct-level option that lists fields without `#[env]`.
const IMPLICIT: &str = "implicit";

/// Directive that removes a field from the generated table.
const SKIP: &str = "-";

/// Parsed `#[env(...)]` attribute of a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// The directive literal, or `None` when the field has no `#[env]`.
    pub directive: Option<LitStr>,
}

impl FieldAttrs {
    /// Extract the `#[env("...")]` attribute from a struct field.
    ///
    /// Other attributes are ignored so they stay available to other macros.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in env_attrs(&field.attrs) {
            if attrs.directive.is_some() {
                return Err(syn::Error::new_spanned(attr, "duplicate env attribute"));
            }

            let directive: LitStr = attr.parse_args().map_err(|e| {
                syn::Error::new(
                    e.span(),
                    "expected a directive string, e.g. #[env(\"KEY,required\")]",
                )
            })?;
            attrs.directive = Some(directive);
        }

        Ok(attrs)
    }

    /// `#[env("-")]`: the field is not part of the record.
    pub fn is_skipped(&self) -> bool {
        self.directive
            .as_ref()
            .is_some_and(|directive| directive.value() == SKIP)
    }
}

/// Parsed `#[env(...)]` attribute of the struct itself.
#[derive(Debug, Default)]
pub struct StructAttrs {
    /// `#[env(implicit)]`: fields without `#[env]` are part of the record.
    pub implicit: bool,
}

impl StructAttrs {
    pub fn from_input(input: &DeriveInput) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in env_attrs(&input.attrs) {
            if attrs.implicit {
                return Err(syn::Error::new_spanned(attr, "duplicate env attribute"));
            }

            let option = attr
                .parse_args::<Ident>()
                .ok()
                .filter(|option| option == IMPLICIT);
            if option.is_none() {
                return Err(syn::Error::new_spanned(
                    attr,
                    "expected `#[env(implicit)]` on a struct",
                ));
            }
            attrs.implicit = true;
        }

        Ok(attrs)
    }
}

fn env_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("env"))
}
