use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{quote, ToTokens};
use syn::Ident;

use crate::{
    reflect_meta::StructMetaInfo,
    quoted::QuotedOption,
};

use super::{gen_typed, gen_reflect, gen_where_clause};

/// Generate Typed, GetTypeRegistration, Struct and Reflect for a struct with named fields
/// or a unit struct.
pub(crate) fn gen_struct(struct_meta: &StructMetaInfo) -> TokenStream {
    let meta = struct_meta.meta();
    let reflect_crate_path = meta.reflect_crate_path();
    let struct_name = meta.type_name();
    let qoption = QuotedOption.to_token_stream();

    let field_names = struct_meta.reflected_fields()
        .map(|field| field.name())
        .collect::<Vec<_>>();
    let field_idents = struct_meta.reflected_fields()
        .map(|field| field.member())
        .collect::<Vec<_>>();

    let field_types = struct_meta.reflected_types();
    let field_count = field_idents.len();
    let field_indices = (0..field_count).collect::<Vec<usize>>();

    let where_clause = gen_where_clause(meta, &field_types);

    let struct_name_string = struct_name.to_string();
    let typed_impl = gen_typed(
        meta,
        &where_clause,
        // this generator function only called once
        quote! {
            let fields: [#reflect_crate_path::NamedField; #field_count] = [
                #(#reflect_crate_path::NamedField::new::<#field_types>(#field_names, #field_indices),)*
            ];
            let info = #reflect_crate_path::type_info::StructTypeInfo::new::<Self>(#struct_name_string, &fields);
            #reflect_crate_path::TypeInfo::Struct(info)
        },
    );

    let type_registration_impl = meta.get_type_registration(&where_clause);
    let reflect_impl = gen_reflect(
        meta,
        &where_clause,
        Ident::new("Struct", Span::call_site()),
    );

    let (impl_generics, type_generics, _) = meta.generics().split_for_impl();

    TokenStream::from(
        quote! {
            // implement GetTypeRegistration
            #type_registration_impl

            // implement Typed
            #typed_impl

            // implement Struct
            impl #impl_generics #reflect_crate_path::type_info::Struct for #struct_name #type_generics #where_clause {
                fn field(&self, name: &str) -> #qoption<&dyn #reflect_crate_path::Reflect> {
                    match name {
                        #(#field_names => #qoption::Some(&self.#field_idents),)*
                        _ => #qoption::None,
                    }
                }

                fn field_mut(&mut self, name: &str) -> #qoption<&mut dyn #reflect_crate_path::Reflect> {
                    match name {
                        #(#field_names => #qoption::Some(&mut self.#field_idents),)*
                        _ => #qoption::None,
                    }
                }

                fn field_at(&self, index: usize) -> #qoption<&dyn #reflect_crate_path::Reflect> {
                    match index {
                        #(#field_indices => #qoption::Some(&self.#field_idents),)*
                        _ => #qoption::None,
                    }
                }

                fn field_at_mut(&mut self, index: usize) -> #qoption<&mut dyn #reflect_crate_path::Reflect> {
                    match index {
                        #(#field_indices => #qoption::Some(&mut self.#field_idents),)*
                        _ => #qoption::None,
                    }
                }

                fn num_fields(&self) -> usize {
                    #field_count
                }

                fn field_name_at(&self, index: usize) -> #qoption<&str> {
                    match index {
                        #(#field_indices => #qoption::Some(#field_names),)*
                        _ => #qoption::None,
                    }
                }

                fn iter(&self) -> #reflect_crate_path::type_info::StructFieldIter<'_> {
                    #reflect_crate_path::type_info::StructFieldIter::new(self)
                }
            }

            // implement Reflect
            #reflect_impl
        }
    )
}
