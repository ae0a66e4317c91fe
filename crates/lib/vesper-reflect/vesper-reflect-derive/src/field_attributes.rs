use quote::ToTokens;
use syn::{Attribute, Meta, NestedMeta};

use crate::REFLECT_ATTR;

pub(crate) static IGNORE_ATTR: &str = "ignore";

/// Container for attributes defined on a reflected type's field.
#[derive(Default)]
pub(crate) struct ReflectFieldAttr {
    /// Field is invisible to reflection, as if it didn't exist.
    pub ignore: bool,
}

pub(crate) fn parse_field_attributes(attrs: &[Attribute]) -> Result<ReflectFieldAttr, syn::Error> {
    let mut res = ReflectFieldAttr::default();
    let mut errors: Option<syn::Error> = None;

    // we only care about the `reflect` attributes.
    let attr_iter = attrs.iter()
        .filter(|attr| attr.path.is_ident(REFLECT_ATTR));

    for attr in attr_iter {
        let attr_meta = attr.parse_meta()?;
        if let Err(error) = parse_attribute_meta(&mut res, &attr_meta) {
            // combine all errors while parsing one field
            match &mut errors {
                Some(errors) => errors.combine(error),
                None => errors = Some(error),
            }
        }
    }

    match errors {
        Some(errors) => Err(errors),
        None => Ok(res),
    }
}

fn parse_attribute_meta(reflect_attr: &mut ReflectFieldAttr, meta: &Meta) -> Result<(), syn::Error> {
    match meta {
        // a meta path is like the test in #[test].
        Meta::Path(path) if path.is_ident(IGNORE_ATTR) => {
            (!reflect_attr.ignore)
                .then(|| reflect_attr.ignore = true)
                .ok_or_else(|| syn::Error::new_spanned(path, format!("Duplicated '{IGNORE_ATTR}' attribute")))
        }
        Meta::Path(path) => Err(
            syn::Error::new_spanned(path, format!("Unknown reflect attributes: {}", path.to_token_stream()))
        ),
        // a name-value meta is like the path = "..." in #[path = "sys/windows.rs"].
        Meta::NameValue(named) => Err(
            syn::Error::new_spanned(named, format!("Unexpected named attributes: {}", named.to_token_stream()))
        ),
        // a meta list is like the derive(Copy) in #[derive(Copy)].
        Meta::List(list) if !list.path.is_ident(REFLECT_ATTR) => Err(
            syn::Error::new_spanned(list, "Unexpected property!")
        ),
        Meta::List(list) => {
            for nested in &list.nested {
                if let NestedMeta::Meta(meta) = nested {
                    // recursively parse Meta::List
                    parse_attribute_meta(reflect_attr, meta)?;
                }
            }
            Ok(())
        }
    }
}
