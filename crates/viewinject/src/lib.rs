//! ## Crate layout
//! - `inject`: the injector and view-source contracts generated code targets.
//! - `injector`: entry points that locate an injector and run it.
//! - `registry`: name-keyed registration table filled by generated code.
//! - `views`: a ready-made [`ViewSource`] keyed by id.
//!
//! `#[derive(ViewInject)]` (re-exported from `viewinject-derive`) generates
//! the injector for a struct whose fields carry `#[bind(id)]`. Types whose
//! injector comes from `viewinject-build` use `#[derive(Bind)]` instead, which
//! only declares the marker.

pub mod inject;
pub mod injector;
pub mod registry;
pub mod views;

// export so generated code resolves inside this crate too
extern crate self as viewinject;

pub use inject::{InjectError, Injectable, ViewInject, ViewSource, cast};
pub use injector::ViewInjector;
pub use registry::{InjectorRegistry, LookupError};
pub use viewinject_derive::{Bind, ViewInject};
pub use views::Views;

use thiserror::Error as ThisError;

//
// Consts
//

/// Appended to a host type's name to name its generated injector.
pub const SUFFIX: &str = "$$ViewInject";

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Inject(#[from] InjectError),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        InjectError, Injectable, InjectorRegistry, LookupError, ViewInject, ViewInjector,
        ViewSource, Views,
    };
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, ViewInject)]
    struct Screen {
        #[bind(4)]
        pub title: String,
    }

    #[test]
    fn derive_resolves_runtime_paths_inside_this_crate() {
        let mut screen = Screen {
            title: String::new(),
        };
        let views = Views::new().with(4, "home".to_string());

        ViewInjector::inject_view_from(&mut screen, &views).expect("inject should succeed");

        assert_eq!(screen.title, "home");
        assert_eq!(ScreenViewInject::NAME, "Screen$$ViewInject");
    }

    #[test]
    fn errors_convert_into_the_crate_error() {
        let err: Error = InjectError::ViewNotFound { id: 1 }.into();

        assert_eq!(err.to_string(), "no view with id 1");
    }
}
