mod struct_meta;

use vesper_core::result::{ResultFlattener, CombinableError};

pub(crate) use struct_meta::*;

use syn::{Ident, Generics, DeriveInput, Data, Fields, spanned::Spanned, Path};

use crate::{
    field_attributes,
    container_attributes::ReflectContainerAttr,
    reflect_gen,
    crate_manifest::CrateManifest,
};

const VESPER_REFLECT_CRATE_NAME: &str = "vesper_reflect";

pub struct SynError {
    inner: syn::Error,
}

impl CombinableError for SynError {
    fn combine(&mut self, other: Self) {
        self.inner.combine(other.inner)
    }
}

impl From<syn::Error> for SynError {
    fn from(value: syn::Error) -> Self {
        Self {
            inner: value
        }
    }
}

pub(crate) enum ReflectTypeMetaInfo<'a> {
    Struct(StructMetaInfo<'a>),
    UnitStruct(StructMetaInfo<'a>),
    TupleStruct(StructMetaInfo<'a>),
}

/// Metadata of all reflected types.
pub(crate) struct ReflectMeta<'a> {
    /// Reflected name of this type. (e.g. struct MyStruct {}, then ident = "MyStruct")
    type_name: &'a Ident,
    /// Generics of this type. (e.g. <T, U>)
    generics: &'a Generics,
    /// Attributes on the type itself. (e.g. #[reflect(reference)])
    attrs: ReflectContainerAttr,
    /// Cached crate path to `vesper-reflect` crate.
    reflect_crate_path: Path,
}

impl<'a> ReflectMeta<'a> {
    pub fn new(type_name: &'a Ident, generics: &'a Generics, attrs: ReflectContainerAttr) -> Self {
        let reflect_crate_path = CrateManifest::get_path_default(VESPER_REFLECT_CRATE_NAME);
        Self {
            type_name,
            generics,
            attrs,
            reflect_crate_path,
        }
    }

    pub fn type_name(&self) -> &'a Ident {
        self.type_name
    }

    pub fn generics(&self) -> &'a Generics {
        self.generics
    }

    pub fn is_reference(&self) -> bool {
        self.attrs.reference
    }

    pub fn reflect_crate_path(&self) -> &Path {
        &self.reflect_crate_path
    }

    /// Returns the `GetTypeRegistration` impl as a `TokenStream`.
    pub fn get_type_registration(&self, where_clause: &proc_macro2::TokenStream) -> proc_macro2::TokenStream {
        reflect_gen::gen_type_registration(
            self.type_name,
            &self.reflect_crate_path,
            self.generics,
            where_clause,
        )
    }
}

impl<'a> ReflectTypeMetaInfo<'a> {
    pub fn from_derive_input(input: &'a DeriveInput) -> Result<Self, syn::Error> {
        let attrs = ReflectContainerAttr::from_attributes(&input.attrs)?;
        let meta = ReflectMeta::new(&input.ident, &input.generics, attrs);

        match &input.data {
            Data::Struct(data) => {
                let struct_meta = StructMetaInfo {
                    meta,
                    fields: Self::collect_struct_fields(&data.fields)?,
                };

                match data.fields {
                    Fields::Named(..) => Ok(Self::Struct(struct_meta)),
                    Fields::Unnamed(..) => Ok(Self::TupleStruct(struct_meta)),
                    Fields::Unit => Ok(Self::UnitStruct(struct_meta)),
                }
            }
            Data::Enum(..) => Err(syn::Error::new(
                input.span(),
                "Reflection not supported for enums",
            )),
            Data::Union(..) => Err(syn::Error::new(
                input.span(),
                "Reflection not supported for unions",
            ))
        }
    }

    fn collect_struct_fields(fields: &Fields) -> Result<Vec<StructField>, syn::Error> {
        let struct_fields: ResultFlattener<StructField, SynError> = fields.iter().enumerate()
            .map(|(index, field)| -> Result<StructField, SynError> {
                let attrs = field_attributes::parse_field_attributes(&field.attrs)?;

                Ok(StructField {
                    field,
                    attrs,
                    index,
                })
            })
            .fold(
                ResultFlattener::default(),
                ResultFlattener::fold
            );

        struct_fields.finish().map_err(|err| err.inner)
    }
}
