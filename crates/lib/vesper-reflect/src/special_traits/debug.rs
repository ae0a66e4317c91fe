use std::fmt::{Debug, Formatter, Result};

use crate::{get_type_collapsed_name, Array, Struct, TupleStruct};

#[inline]
pub fn struct_debug(dyn_struct: &dyn Struct, f: &mut Formatter<'_>) -> Result {
    let name = get_type_collapsed_name(dyn_struct.type_name());
    let mut debug = f.debug_struct(&name);
    for field_index in 0..dyn_struct.num_fields() {
        if let (Some(field_name), Some(field)) = (dyn_struct.field_name_at(field_index), dyn_struct.field_at(field_index)) {
            debug.field(field_name, &field as &dyn Debug);
        }
    }
    debug.finish()
}

#[inline]
pub fn tuple_struct_debug(dyn_tuple_struct: &dyn TupleStruct, f: &mut Formatter<'_>) -> Result {
    let name = get_type_collapsed_name(dyn_tuple_struct.type_name());
    let mut debug = f.debug_tuple(&name);
    for field in dyn_tuple_struct.iter() {
        debug.field(&field as &dyn Debug);
    }
    debug.finish()
}

#[inline]
pub fn array_debug(dyn_array: &dyn Array, f: &mut Formatter<'_>) -> Result {
    let mut debug = f.debug_list();
    for item in dyn_array.iter() {
        debug.entry(&item as &dyn Debug);
    }
    debug.finish()
}
