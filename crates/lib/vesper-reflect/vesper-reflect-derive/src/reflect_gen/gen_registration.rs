use proc_macro2::{TokenStream, Ident};
use syn::{Path, Generics};

use quote::quote;

pub(crate) fn gen_type_registration(
    type_name: &Ident,
    reflect_crate_path: &Path,
    generics: &Generics,
    where_clause: &TokenStream,
) -> TokenStream {
    let (impl_generics, ty_generics, _) = generics.split_for_impl();

    quote! {
        impl #impl_generics #reflect_crate_path::type_registry::GetTypeRegistration for #type_name #ty_generics #where_clause {
            fn get_type_registration() -> #reflect_crate_path::type_registry::TypeRegistration {
                #reflect_crate_path::type_registry::TypeRegistration::type_of::<Self>()
            }
        }
    }
}
