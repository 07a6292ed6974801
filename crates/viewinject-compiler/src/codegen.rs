//! Injector source generation.
//!
//! Everything here is a pure function of its inputs: the same model always
//! renders to the same text, so generated files are reproducible and can be
//! compared verbatim in tests.

use crate::{
    element::{ElementRef, TypeRef},
    model::ClassModel,
    paths::CratePaths,
};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Ident, Path, parse_str};

///
/// GeneratedArtifact
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedArtifact {
    pub package_name: String,
    pub generated_type_name: String,
    pub source_text: String,
    pub host: TypeRef,
    pub anchor: ElementRef,
}

impl GeneratedArtifact {
    #[must_use]
    pub fn from_model(model: &ClassModel, paths: &CratePaths) -> Self {
        Self {
            package_name: model.host.package.clone(),
            generated_type_name: model.generated_type_name(),
            source_text: generate(model, paths),
            host: model.host.clone(),
            anchor: model.anchor(),
        }
    }

    /// `package::Host$$ViewInject`, the name the artifact is created under.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.package_name.is_empty() {
            self.generated_type_name.clone()
        } else {
            format!("{}::{}", self.package_name, self.generated_type_name)
        }
    }
}

/// Render the injector source for one host type.
#[must_use]
pub fn generate(model: &ClassModel, paths: &CratePaths) -> String {
    let header = header(model);
    let tokens = injector(model, paths);

    format!("{header}{tokens}\n")
}

/// Rust identifier of the generated type: the artifact name without `$`.
#[must_use]
pub fn injector_ident(host: &TypeRef) -> Ident {
    let name = format!("{}{}", host.simple_name, crate::SUFFIX).replace('$', "");

    format_ident!("{name}")
}

/// Injector tokens for one model. The derive front end splices these
/// directly into its expansion.
#[must_use]
pub fn injector(model: &ClassModel, paths: &CratePaths) -> TokenStream {
    let rt = &paths.runtime;
    let host = format_ident!("{}", model.host.simple_name);
    let injector = injector_ident(&model.host);
    let artifact_name = format!("{}{}", model.qualified_name(), crate::SUFFIX);
    let doc = format!(" Field injector generated for `{}`.", model.qualified_name());

    let ids = model.fields.keys();
    let assignments = model.fields.values().map(|field| {
        let member = &field.name;
        let ty = &field.declared_type;
        let id = field.id;

        quote! {
            host.#member = #rt::cast::<#ty>(source, #id)?;
        }
    });

    quote! {
        #[doc = #doc]
        #[derive(Clone, Copy, Debug, Default)]
        pub struct #injector;

        impl #injector {
            pub const NAME: &'static str = #artifact_name;
        }

        impl #rt::ViewInject<#host> for #injector {
            fn ids(&self) -> &'static [i32] {
                &[#(#ids),*]
            }

            #[allow(unused_variables)]
            fn inject(
                &self,
                host: &mut #host,
                source: &dyn #rt::ViewSource,
            ) -> ::core::result::Result<(), #rt::InjectError> {
                #(#assignments)*

                ::core::result::Result::Ok(())
            }
        }

        impl #rt::Injectable for #host {
            type Injector = #injector;
        }
    }
}

///
/// Registration
///
/// One host in the registration table, with the `#[cfg]` attributes that
/// gate its declaration.
///

#[derive(Clone, Debug)]
pub struct Registration {
    pub host: TypeRef,
    pub cfg: Vec<Attribute>,
}

impl Registration {
    #[must_use]
    pub const fn new(host: TypeRef) -> Self {
        Self {
            host,
            cfg: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_cfg(mut self, cfg: Vec<Attribute>) -> Self {
        self.cfg = cfg;
        self
    }

    /// Key the injector is registered under: `package::Host$$ViewInject`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}{}", self.host.qualified_name(), crate::SUFFIX)
    }
}

impl From<TypeRef> for Registration {
    fn from(host: TypeRef) -> Self {
        Self::new(host)
    }
}

/// Render the registration table covering `entries`.
///
/// The table is a single `register_injectors` function meant to be
/// `include!`d at the crate root; host paths are therefore `crate::`-relative.
/// Entries are keyed by their qualified artifact name, so same-named hosts in
/// different modules never share a key.
#[must_use]
pub fn generate_registry(entries: &[Registration], paths: &CratePaths) -> String {
    let rt = &paths.runtime;

    let mut entries = entries.to_vec();
    entries.sort_by(|a, b| a.host.cmp(&b.host));
    entries.dedup_by(|a, b| a.host == b.host);

    let registrations = entries.iter().filter_map(|entry| {
        let host = &entry.host;
        let host_path = crate_path(&host.qualified_name())?;
        let injector = injector_ident(host);
        let injector_path = if host.package.is_empty() {
            quote!(crate::#injector)
        } else {
            let package = crate_path(&host.package)?;
            quote!(#package::#injector)
        };

        let name = entry.name();
        let cfg = &entry.cfg;

        Some(quote! {
            #(#cfg)*
            registry.register::<#host_path, #injector_path>(#name);
        })
    });

    let tokens = quote! {
        /// Register every injector generated for this crate.
        pub fn register_injectors(registry: &mut #rt::InjectorRegistry) {
            #(#registrations)*
        }
    };

    format!("// @generated by viewinject. Do not edit.\n{tokens}\n")
}

// crate_path
// hosts reach here through the scanner, so an unparsable path is only logged
fn crate_path(path: &str) -> Option<Path> {
    match parse_str(&format!("crate::{path}")) {
        Ok(path) => Some(path),
        Err(err) => {
            tracing::warn!(path, %err, "skipping host with invalid path");
            None
        }
    }
}

fn header(model: &ClassModel) -> String {
    let package = if model.host.package.is_empty() {
        "crate"
    } else {
        model.host.package.as_str()
    };

    format!(
        "// @generated by viewinject. Do not edit.\n// package: {package}\n// artifact: {}{}\n",
        model.qualified_name(),
        crate::SUFFIX,
    )
}

///
/// TESTS
///
