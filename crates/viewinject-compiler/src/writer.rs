use crate::{
    codegen::GeneratedArtifact,
    diagnostic::{Level, Messager},
    element::ElementRef,
    filer::Filer,
    report,
};
use std::io::{self, BufWriter, Write};
use thiserror::Error as ThisError;

///
/// WriteError
///

#[derive(Debug, ThisError)]
pub enum WriteError {
    #[error("unable to create `{name}`: {source}")]
    Create { name: String, source: io::Error },

    #[error("unable to write `{name}`: {source}")]
    Write { name: String, source: io::Error },
}

impl WriteError {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Create { name, .. } | Self::Write { name, .. } => name,
        }
    }
}

///
/// ArtifactWriter
///
/// Persists generated text through a [`Filer`]. A failure is reported
/// against the artifact's anchor and returned; it never affects other
/// artifacts written through the same writer.
///

pub struct ArtifactWriter<'a> {
    filer: &'a mut dyn Filer,
}

impl<'a> ArtifactWriter<'a> {
    pub fn new(filer: &'a mut dyn Filer) -> Self {
        Self { filer }
    }

    pub fn write(
        &mut self,
        artifact: &GeneratedArtifact,
        messager: &mut dyn Messager,
    ) -> Result<(), WriteError> {
        self.write_text(
            &artifact.qualified_name(),
            &artifact.source_text,
            &artifact.anchor,
            messager,
        )
    }

    /// Write arbitrary generated text under `name`.
    pub fn write_text(
        &mut self,
        name: &str,
        text: &str,
        anchor: &ElementRef,
        messager: &mut dyn Messager,
    ) -> Result<(), WriteError> {
        let result = write_source(&mut *self.filer, name, text);

        match &result {
            Ok(()) => tracing::debug!(artifact = name, bytes = text.len(), "wrote generated source"),
            Err(err) => report!(
                messager,
                Level::Error,
                anchor.clone(),
                "unable to write injector for type `{anchor}`: {err}"
            ),
        }

        result
    }
}

// write_source
// the buffered writer (and the resource under it) is dropped on every path out
fn write_source(filer: &mut dyn Filer, name: &str, text: &str) -> Result<(), WriteError> {
    let resource = filer
        .create_source_file(name)
        .map_err(|source| WriteError::Create {
            name: name.to_string(),
            source,
        })?;

    let mut out = BufWriter::new(resource);
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|source| WriteError::Write {
            name: name.to_string(),
            source,
        })
}

///
/// TESTS
///
