extern crate proc_macro;

mod field_attributes;
mod container_attributes;

mod reflect_meta;
mod reflect_gen;

mod crate_manifest;
mod quoted;

use proc_macro::TokenStream;
use reflect_gen::{gen_struct, gen_tuple_struct};
use reflect_meta::ReflectTypeMetaInfo;
use syn::{parse_macro_input, DeriveInput};

pub(crate) static REFLECT_ATTR: &str = "reflect";

/// Derive `Reflect`, `Typed`, `GetTypeRegistration` and `Struct` (or `TupleStruct`).
///
/// Supported helper attributes:
/// - `#[reflect(ignore)]` on a field hides it from reflection.
/// - `#[reflect(reference)]` on the type gives it reference semantics.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let derive_input = parse_macro_input!(input as DeriveInput);

    let reflect_meta = match ReflectTypeMetaInfo::from_derive_input(&derive_input) {
        Ok(meta) => meta,
        Err(err) => return err.into_compile_error().into(),
    };

    match reflect_meta {
        ReflectTypeMetaInfo::Struct(meta) | ReflectTypeMetaInfo::UnitStruct(meta) => gen_struct(&meta),
        ReflectTypeMetaInfo::TupleStruct(meta) => gen_tuple_struct(&meta),
    }
}
