use proc_macro2::{TokenStream, Ident};
use quote::quote;

use crate::{
    reflect_meta::ReflectMeta,
    quoted::{QuotedBox, QuotedClone},
};

/// Generate the `Reflect` impl shared by structs and tuple structs.
///
/// `variant` names the `ReflectRef`/`ReflectMut` variant.
pub(crate) fn gen_reflect(
    meta: &ReflectMeta,
    where_clause: &TokenStream,
    variant: Ident,
) -> TokenStream {
    let reflect_crate_path = meta.reflect_crate_path();
    let type_name = meta.type_name();
    let (impl_generics, ty_generics, _) = meta.generics().split_for_impl();

    quote! {
        impl #impl_generics #reflect_crate_path::Reflect for #type_name #ty_generics #where_clause {
            #[inline]
            fn type_name(&self) -> &'static str {
                ::core::any::type_name::<Self>()
            }

            #[inline]
            fn get_type_info(&self) -> &'static #reflect_crate_path::TypeInfo {
                <Self as #reflect_crate_path::Typed>::type_info()
            }

            #[inline]
            fn into_reflect(self: #QuotedBox<Self>) -> #QuotedBox<dyn #reflect_crate_path::Reflect> {
                self
            }

            #[inline]
            fn as_reflect(&self) -> &dyn #reflect_crate_path::Reflect {
                self
            }

            #[inline]
            fn as_reflect_mut(&mut self) -> &mut dyn #reflect_crate_path::Reflect {
                self
            }

            fn reflect_ref(&self) -> #reflect_crate_path::ReflectRef<'_> {
                #reflect_crate_path::ReflectRef::#variant(self)
            }

            fn reflect_mut(&mut self) -> #reflect_crate_path::ReflectMut<'_> {
                #reflect_crate_path::ReflectMut::#variant(self)
            }

            #[inline]
            fn set(&mut self, value: #reflect_crate_path::Value) -> #reflect_crate_path::ReflectResult<()> {
                #reflect_crate_path::__private::set_concrete(self, value)
            }

            #[inline]
            fn clone_value(&self) -> #reflect_crate_path::Value {
                #QuotedBox::new(#QuotedClone::clone(self))
            }
        }
    }
}
