use proc_macro2::TokenStream;
use quote::quote;
use syn::Path;

/// Environment variable overriding the runtime crate path in generated code.
pub const RUNTIME_CRATE_ENV: &str = "VIEWINJECT_CRATE";

fn parse_path(value: &str) -> Option<TokenStream> {
    syn::parse_str::<Path>(value.trim())
        .ok()
        .map(|path| quote!(#path))
}

fn env_path(name: &str) -> Option<TokenStream> {
    std::env::var(name).ok().and_then(|value| parse_path(&value))
}

///
/// CratePaths
///
/// Resolves the runtime crate root that generated injectors refer to.
/// Precedence: an explicit path (derive attribute or build option), then
/// `VIEWINJECT_CRATE`, then `::viewinject`.
///

#[derive(Clone, Debug)]
pub struct CratePaths {
    pub runtime: TokenStream,
}

impl CratePaths {
    #[must_use]
    pub fn new() -> Self {
        Self::resolve(None)
    }

    /// Resolve with an optional explicit override; an unparsable override is
    /// ignored in favour of the next source.
    #[must_use]
    pub fn resolve(explicit: Option<&str>) -> Self {
        let runtime = explicit
            .and_then(parse_path)
            .or_else(|| env_path(RUNTIME_CRATE_ENV))
            .unwrap_or_else(|| quote!(::viewinject));

        Self { runtime }
    }

    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        Self {
            runtime: quote!(#path),
        }
    }
}

impl Default for CratePaths {
    fn default() -> Self {
        Self::new()
    }
}

///
/// TESTS
///
