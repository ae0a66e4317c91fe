//! Fully qualified std paths for use inside `quote!()`.
//!
//! Generated code must not depend on what the user has in scope, so every
//! std item is spelled out in full. These unit structs save us from writing
//! the full path every single time.

use quote::{ToTokens, quote};

pub(crate) struct QuotedOption;

pub(crate) struct QuotedBox;

pub(crate) struct QuotedClone;

impl ToTokens for QuotedOption {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        quote!(::core::option::Option).to_tokens(tokens)
    }
}

impl ToTokens for QuotedBox {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        quote!(::std::boxed::Box).to_tokens(tokens)
    }
}

impl ToTokens for QuotedClone {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        quote!(::core::clone::Clone).to_tokens(tokens)
    }
}
