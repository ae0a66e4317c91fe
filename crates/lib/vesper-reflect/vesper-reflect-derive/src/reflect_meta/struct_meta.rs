use crate::field_attributes::ReflectFieldAttr;

use super::ReflectMeta;

use syn::{Field, Index, Member};

pub(crate) struct StructField<'a> {
    pub field: &'a Field,
    /// Reflection attributes.
    pub attrs: ReflectFieldAttr,
    /// Index of this field in the declaration, ignored fields included.
    pub index: usize,
}

impl<'a> StructField<'a> {
    /// `self.<member>` accessor of this field.
    pub fn member(&self) -> Member {
        self.field
            .ident
            .as_ref()
            .map(|ident| Member::Named(ident.clone()))
            .unwrap_or_else(|| Member::Unnamed(Index::from(self.index)))
    }

    pub fn name(&self) -> String {
        self.field
            .ident
            .as_ref()
            .map(|ident| ident.to_string())
            .unwrap_or_else(|| self.index.to_string())
    }
}

pub(crate) struct StructMetaInfo<'a> {
    pub(super) meta: ReflectMeta<'a>,
    pub(super) fields: Vec<StructField<'a>>,
}

impl<'a> StructMetaInfo<'a> {
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    /// Fields visible to reflection, in declaration order.
    pub fn reflected_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter()
            .filter(|field| !field.attrs.ignore)
    }

    pub fn reflected_types(&self) -> Vec<syn::Type> {
        self.reflected_fields()
            .map(|field| field.field.ty.clone())
            .collect()
    }
}
