//! ## Engine layout
//! - `attr`: reads `#[bind]` and visibility off syn trees.
//! - `element`: the declaration model front ends hand to a round.
//! - `scan`: validates `#[bind]` usage and yields accepted fields.
//! - `model`: per-host class models and the round registry.
//! - `codegen`: renders injector source and the registration table.
//! - `filer` / `writer`: output resources and failure-isolated writes.
//! - `diagnostic`: non-fatal reporting against declarations.
//! - `processor`: the round entry point tying the above together.

pub mod attr;
pub mod codegen;
pub mod diagnostic;
pub mod element;
pub mod filer;
pub mod model;
pub mod options;
pub mod paths;
pub mod processor;
pub mod scan;
pub mod writer;

/// Name of the marker attribute: `#[bind(id)]`.
pub const MARKER: &str = "bind";

/// Appended to a host's simple name to name its injector.
pub const SUFFIX: &str = "$$ViewInject";

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        attr::bind_annotation,
        codegen::{GeneratedArtifact, Registration, generate, generate_registry},
        diagnostic::{Diagnostic, Diagnostics, Level, Messager},
        element::{
            Annotation, AnnotationValue, Element, ElementId, ElementKind, ElementRef,
            RoundEnvironment, TypeRef, Visibility,
        },
        filer::{Filer, FsFiler, MemoryFiler},
        model::{ClassModel, ClassModelRegistry, FieldDescriptor},
        options::ProcessorOptions,
        paths::CratePaths,
        processor::{RoundContext, RoundReport, SourceVersion, ViewInjectProcessor},
        report,
        writer::{ArtifactWriter, WriteError},
    };
}
