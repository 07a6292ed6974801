use crate::walk::SourceSet;
use std::io::{self, Write};
use viewinject_compiler::diagnostic::{Diagnostic, Level, Messager};

///
/// CargoMessager
///
/// Prints diagnostics as `cargo:warning=` lines, pointing at the source
/// location the walker recorded for the element.
///

pub struct CargoMessager<'a, W: Write> {
    sources: &'a SourceSet,
    out: W,
    errors: usize,
}

impl<'a> CargoMessager<'a, io::Stdout> {
    #[must_use]
    pub fn stdout(sources: &'a SourceSet) -> Self {
        Self::new(sources, io::stdout())
    }
}

impl<'a, W: Write> CargoMessager<'a, W> {
    pub const fn new(sources: &'a SourceSet, out: W) -> Self {
        Self {
            sources,
            out,
            errors: 0,
        }
    }

    /// Number of `Error` level diagnostics printed so far.
    #[must_use]
    pub const fn errors(&self) -> usize {
        self.errors
    }

    /// Print a raw cargo instruction (`rerun-if-changed=...`).
    pub fn instruction(&mut self, instruction: &str) {
        if let Err(err) = writeln!(self.out, "cargo:{instruction}") {
            tracing::warn!(%err, "unable to print cargo instruction");
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Messager for CargoMessager<'_, W> {
    fn print_message(&mut self, diagnostic: Diagnostic) {
        if diagnostic.level == Level::Error {
            self.errors += 1;
        }

        let location = self
            .sources
            .location(diagnostic.element.id)
            .map(|location| format!(" at {location}"))
            .unwrap_or_default();
        let message = diagnostic.message.replace('\n', " ");

        if let Err(err) = writeln!(
            self.out,
            "cargo:warning={}: {message} (`{}`{location})",
            diagnostic.level, diagnostic.element
        ) {
            tracing::warn!(%err, "unable to print diagnostic");
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use viewinject_compiler::element::{ElementId, ElementRef};

    #[test]
    fn prints_one_cargo_warning_per_diagnostic() {
        let sources = SourceSet::default();
        let mut messager = CargoMessager::new(&sources, Vec::new());

        messager.print_message(Diagnostic::error(
            ElementRef::new(ElementId(3), "ui::Main::title"),
            "field `title` marked with `#[bind]` must not be private\nsecond line",
        ));
        messager.print_message(Diagnostic::new(
            Level::Note,
            ElementRef::new(ElementId(4), "ui::Main"),
            "note",
        ));

        assert_eq!(messager.errors(), 1);
        let out = String::from_utf8(messager.into_inner()).expect("utf8");
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(
            lines,
            [
                "cargo:warning=error: field `title` marked with `#[bind]` must not be private second line (`ui::Main::title`)",
                "cargo:warning=note: note (`ui::Main`)",
            ]
        );
    }

    #[test]
    fn instructions_are_prefixed() {
        let sources = SourceSet::default();
        let mut messager = CargoMessager::new(&sources, Vec::new());

        messager.instruction("rerun-if-changed=src");

        assert_eq!(
            String::from_utf8(messager.into_inner()).expect("utf8"),
            "cargo:rerun-if-changed=src\n"
        );
    }
}
