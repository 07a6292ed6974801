use crate::element::ElementRef;
use std::fmt::{self, Display};

///
/// Level
///

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Level {
    Note,
    Warning,
    Error,
}

impl Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Note => "note",
            Self::Warning => "warning",
            Self::Error => "error",
        };

        f.write_str(label)
    }
}

///
/// Diagnostic
///
/// A rendered message attached to the declaration it concerns.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub level: Level,
    pub element: ElementRef,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn new(level: Level, element: ElementRef, message: impl Into<String>) -> Self {
        Self {
            level,
            element,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(element: ElementRef, message: impl Into<String>) -> Self {
        Self::new(Level::Error, element, message)
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} (at `{}`)", self.level, self.message, self.element)
    }
}

///
/// Messager
///
/// Sink for diagnostics. Implementations must not panic and must not
/// interrupt the caller: reporting is the recovery path for every
/// usage and IO problem a round runs into.
///

pub trait Messager {
    fn print_message(&mut self, diagnostic: Diagnostic);
}

impl<M: Messager + ?Sized> Messager for &mut M {
    fn print_message(&mut self, diagnostic: Diagnostic) {
        (**self).print_message(diagnostic);
    }
}

/// Log and forward a diagnostic.
pub fn report(messager: &mut dyn Messager, diagnostic: Diagnostic) {
    match diagnostic.level {
        Level::Error => tracing::warn!(element = %diagnostic.element, "{}", diagnostic.message),
        Level::Warning | Level::Note => {
            tracing::debug!(element = %diagnostic.element, "{}", diagnostic.message);
        }
    }

    messager.print_message(diagnostic);
}

/// Format and report a diagnostic against an element.
///
/// `report!(messager, Level::Error, element_ref, "fmt {}", args...)`
#[macro_export]
macro_rules! report {
    ($messager:expr, $level:expr, $element:expr, $($arg:tt)+) => {
        $crate::diagnostic::report(
            $messager,
            $crate::diagnostic::Diagnostic::new($level, $element, format!($($arg)+)),
        )
    };
}

///
/// Diagnostics
///
/// In-memory collector.
///

#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.level == Level::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| d.level == Level::Error)
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl Messager for Diagnostics {
    fn print_message(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementId;

    #[test]
    fn report_macro_formats_and_collects() {
        let mut diagnostics = Diagnostics::new();
        let element = ElementRef::new(ElementId(7), "p::Sample::a");

        report!(
            &mut diagnostics,
            Level::Error,
            element,
            "field `{}` must not be {}",
            "a",
            "private"
        );

        assert_eq!(diagnostics.len(), 1);
        let entry = &diagnostics.entries()[0];
        assert_eq!(entry.message, "field `a` must not be private");
        assert_eq!(entry.element.id, ElementId(7));
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn notes_are_not_errors() {
        let mut diagnostics = Diagnostics::new();
        report(
            &mut diagnostics,
            Diagnostic::new(Level::Note, ElementRef::new(ElementId(0), "x"), "hello"),
        );

        assert!(!diagnostics.has_errors());
        assert_eq!(diagnostics.errors().count(), 0);
    }

    #[test]
    fn display_includes_level_and_element() {
        let diagnostic = Diagnostic::error(ElementRef::new(ElementId(1), "p::A::b"), "bad");

        assert_eq!(diagnostic.to_string(), "error: bad (at `p::A::b`)");
    }
}
