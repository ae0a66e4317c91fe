mod gen_struct;
mod gen_tuple_struct;

mod gen_reflect;
mod gen_registration;
mod gen_typed;

pub(crate) use gen_struct::*;
pub(crate) use gen_tuple_struct::*;

pub(crate) use gen_reflect::*;
pub(crate) use gen_registration::*;
pub(crate) use gen_typed::*;

use proc_macro2::TokenStream;
use quote::quote;
use syn::GenericParam;

use crate::{reflect_meta::ReflectMeta, quoted::QuotedClone};

/// Where clause shared by every generated impl.
///
/// Generic parameters and the types of reflected fields must be reflectable
/// themselves, and `Self` must be `Clone` for `Reflect::clone_value`.
pub(crate) fn gen_where_clause(meta: &ReflectMeta, field_types: &[syn::Type]) -> TokenStream {
    let reflect_crate_path = meta.reflect_crate_path();
    let generics = meta.generics();

    let existing = generics.where_clause
        .iter()
        .flat_map(|clause| clause.predicates.iter());

    let type_params = generics.params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(param) => Some(&param.ident),
            _ => None,
        })
        .collect::<Vec<_>>();

    // field bounds only matter (and only stay acyclic) when generics are involved
    let field_types: &[syn::Type] = if type_params.is_empty() { &[] } else { field_types };

    quote! {
        where
            #(#existing,)*
            Self: #QuotedClone,
            #(#type_params: #reflect_crate_path::Reflect,)*
            #(#field_types: #reflect_crate_path::Reflect,)*
    }
}
