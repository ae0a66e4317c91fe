use quote::ToTokens;
use syn::{Attribute, Meta, NestedMeta, spanned::Spanned};

use crate::REFLECT_ATTR;

pub(crate) static REFERENCE_ATTR: &str = "reference";

/// Attributes placed on the reflected type itself.
#[derive(Default)]
pub(crate) struct ReflectContainerAttr {
    /// Instances are shared handles rather than plain values.
    pub reference: bool,
}

impl ReflectContainerAttr {
    pub(crate) fn from_attributes(attrs: &[Attribute]) -> Result<Self, syn::Error> {
        let mut res = Self::default();

        let reflect_attrs = attrs.iter()
            .filter(|attr| attr.path.is_ident(REFLECT_ATTR));

        for attr in reflect_attrs {
            let Meta::List(list) = attr.parse_meta()? else {
                return Err(syn::Error::new(attr.span(), format!("Expected `#[{REFLECT_ATTR}(..)]`")));
            };

            for nested in &list.nested {
                match nested {
                    NestedMeta::Meta(Meta::Path(path)) if path.is_ident(REFERENCE_ATTR) => {
                        if res.reference {
                            return Err(syn::Error::new_spanned(path, format!("Duplicated '{REFERENCE_ATTR}' attribute")));
                        }
                        res.reference = true;
                    }
                    other => {
                        return Err(syn::Error::new_spanned(
                            other,
                            format!("Unknown reflect attributes: {}", other.to_token_stream()),
                        ));
                    }
                }
            }
        }

        Ok(res)
    }
}
