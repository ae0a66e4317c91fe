use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{quote, ToTokens};
use syn::Ident;

use crate::{
    reflect_meta::StructMetaInfo,
    quoted::QuotedOption,
};

use super::{gen_typed, gen_reflect, gen_where_clause};

/// Generate Typed, GetTypeRegistration, TupleStruct and Reflect for a tuple struct.
pub(crate) fn gen_tuple_struct(struct_meta: &StructMetaInfo) -> TokenStream {
    let meta = struct_meta.meta();
    let reflect_crate_path = meta.reflect_crate_path();
    let struct_name = meta.type_name();
    let qoption = QuotedOption.to_token_stream();

    let field_idents = struct_meta.reflected_fields()
        .map(|field| field.member())
        .collect::<Vec<_>>();

    // declared positions, ignored fields included
    let field_positions = struct_meta.reflected_fields()
        .map(|field| field.index)
        .collect::<Vec<_>>();

    let field_types = struct_meta.reflected_types();
    let field_count = field_idents.len();
    let field_indices = (0..field_count).collect::<Vec<usize>>();

    let where_clause = gen_where_clause(meta, &field_types);

    let struct_name_string = struct_name.to_string();
    let typed_impl = gen_typed(
        meta,
        &where_clause,
        quote! {
            let fields: [#reflect_crate_path::UnnamedField; #field_count] = [
                #(#reflect_crate_path::UnnamedField::new::<#field_types>(#field_indices, #field_positions),)*
            ];
            let info = #reflect_crate_path::type_info::TupleStructTypeInfo::new::<Self>(#struct_name_string, &fields);
            #reflect_crate_path::TypeInfo::TupleStruct(info)
        },
    );

    let type_registration_impl = meta.get_type_registration(&where_clause);
    let reflect_impl = gen_reflect(
        meta,
        &where_clause,
        Ident::new("TupleStruct", Span::call_site()),
    );

    let (impl_generics, type_generics, _) = meta.generics().split_for_impl();

    TokenStream::from(
        quote! {
            #type_registration_impl

            #typed_impl

            impl #impl_generics #reflect_crate_path::type_info::TupleStruct for #struct_name #type_generics #where_clause {
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

                fn iter(&self) -> #reflect_crate_path::type_info::TupleStructFieldIter<'_> {
                    #reflect_crate_path::type_info::TupleStructFieldIter::new(self)
                }
            }

            #reflect_impl
        }
    )
}
