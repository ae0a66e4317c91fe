use proc_macro2::TokenStream;
use quote::quote;

use crate::reflect_meta::ReflectMeta;

pub(crate) fn gen_typed(
    meta: &ReflectMeta,
    where_clause: &TokenStream,
    generator: TokenStream,
) -> TokenStream {
    let reflect_crate_path = meta.reflect_crate_path();
    let type_name = meta.type_name();
    let generics = meta.generics();
    let is_generics = !generics.params.is_empty();

    let static_cell = if is_generics {
        quote! {
            static TYPE_INFO_CELL: #reflect_crate_path::GenericTypeInfoOnceCell = #reflect_crate_path::GenericTypeInfoOnceCell::new();
            TYPE_INFO_CELL.get_or_insert::<Self, _>(|| { #generator })
        }
    } else {
        quote! {
            static TYPE_INFO_CELL: #reflect_crate_path::NonGenericTypeInfoOnceCell = #reflect_crate_path::NonGenericTypeInfoOnceCell::new();
            TYPE_INFO_CELL.get_or_set(|| { #generator })
        }
    };

    let semantics = meta.is_reference().then(|| quote! {
        fn semantics() -> #reflect_crate_path::Semantics {
            #reflect_crate_path::Semantics::Reference
        }
    });

    let (impl_generics, ty_generics, _) = generics.split_for_impl();

    // generate a static OnceCell to store TypeInfo for `'static` lifetime.
    quote! {
        impl #impl_generics #reflect_crate_path::Typed for #type_name #ty_generics #where_clause {
            fn type_info() -> &'static #reflect_crate_path::TypeInfo {
                #static_cell
            }

            #semantics
        }
    }
}
