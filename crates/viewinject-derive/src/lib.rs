use proc_macro::TokenStream;

mod elements;
mod view_inject;

/// Generate the field injector for a struct.
///
/// Fields marked `#[bind(id)]` are resolved by id from a view source and
/// assigned when the injector runs. Marked fields must not be private.
///
/// `#[view_inject(crate = "path")]` changes the path generated code uses to
/// reach the runtime crate; `#[view_inject(deny_duplicate_ids)]` turns a
/// reused id into a compile error.
#[proc_macro_derive(ViewInject, attributes(bind, view_inject))]
pub fn derive_view_inject(input: TokenStream) -> TokenStream {
    view_inject::derive_view_inject(input.into()).into()
}

/// Declare the `#[bind]` marker without generating anything.
///
/// For types whose injector is generated by `viewinject-build` from a build
/// script rather than by `#[derive(ViewInject)]`.
#[proc_macro_derive(Bind, attributes(bind))]
pub fn derive_bind(_input: TokenStream) -> TokenStream {
    TokenStream::new()
}
