use crate::elements::collect;
use darling::{Error, FromDeriveInput};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Generics, Ident, Path};
use viewinject_compiler::{
    codegen,
    diagnostic::Diagnostics,
    element::{RoundEnvironment, TypeRef},
    model::ClassModel,
    paths::CratePaths,
    processor::RoundContext,
};

///
/// ViewInjectArgs
///

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(view_inject), supports(struct_any))]
struct ViewInjectArgs {
    ident: Ident,
    generics: Generics,

    #[darling(default, rename = "crate")]
    krate: Option<Path>,

    #[darling(default)]
    deny_duplicate_ids: bool,
}

pub fn derive_view_inject(input: TokenStream) -> TokenStream {
    match expand(input) {
        Ok(tokens) => tokens,
        Err(err) => err.write_errors(),
    }
}

// expand
// engine diagnostics are emitted next to the injector rather than instead of
// it, so one bad field doesn't also break every use of the host
fn expand(input: TokenStream) -> darling::Result<TokenStream> {
    let input: DeriveInput = syn::parse2(input)?;
    let args = ViewInjectArgs::from_derive_input(&input)?;

    if !args.generics.params.is_empty() {
        return Err(
            Error::custom("`ViewInject` cannot be derived for generic types")
                .with_span(&args.generics),
        );
    }

    let host = TypeRef::new("", args.ident.to_string());
    let paths = args
        .krate
        .as_ref()
        .map_or_else(CratePaths::new, CratePaths::from_path);

    let (collected, mut errors) = collect(&input, &host);
    let round = RoundEnvironment::new(collected.elements.clone());

    let mut diagnostics = Diagnostics::new();
    let mut context = RoundContext::new();
    context.populate(&round, &mut diagnostics, args.deny_duplicate_ids);

    errors.extend(diagnostics.errors().map(|diagnostic| {
        let span = collected.span(diagnostic.element.id);
        Error::from(syn::Error::new(span, &diagnostic.message))
    }));

    // a host without marked fields still gets an injector that does nothing
    let model = context
        .registry()
        .get(&host.qualified_name())
        .cloned()
        .unwrap_or_else(|| ClassModel::new(host.clone()));
    let injector = codegen::injector(&model, &paths);

    let errors = (!errors.is_empty()).then(|| Error::multiple(errors).write_errors());

    Ok(quote! {
        #injector
        #errors
    })
}

///
/// TESTS
///
