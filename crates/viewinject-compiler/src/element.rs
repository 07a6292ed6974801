//! Language-neutral model of the declarations a front end hands to a round.
//!
//! Front ends (the derive, the build-script source walker, tests) translate
//! whatever introspection they have into [`Element`]s. The engine never sees
//! source text.

use std::fmt::{self, Display};

///
/// ElementId
///
/// Opaque handle a front end uses to map a diagnostic back to its own
/// location information (spans, file/line pairs).
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ElementId(pub usize);

///
/// ElementKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum ElementKind {
    Const,
    Enum,
    Field,
    Function,
    Method,
    Other,
    Static,
    Struct,
    Variant,
}

impl ElementKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Const => "const",
            Self::Enum => "enum",
            Self::Field => "field",
            Self::Function => "function",
            Self::Method => "method",
            Self::Other => "item",
            Self::Static => "static",
            Self::Struct => "struct",
            Self::Variant => "variant",
        }
    }
}

impl Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// Visibility
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Visibility {
    Public,
    Crate,
    Restricted(String),
    #[default]
    Private,
}

impl Visibility {
    #[must_use]
    pub const fn is_private(&self) -> bool {
        matches!(self, Self::Private)
    }
}

///
/// TypeRef
///
/// A host type as seen by the engine: its module path (`::` separated,
/// empty at the crate root) and its simple name.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TypeRef {
    pub package: String,
    pub simple_name: String,
}

impl TypeRef {
    #[must_use]
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            simple_name: simple_name.into(),
        }
    }

    /// Split a `a::b::Name` path into package and simple name.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        match path.rsplit_once("::") {
            Some((package, name)) => Self::new(package, name),
            None => Self::new("", path),
        }
    }

    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.simple_name.clone()
        } else {
            format!("{}::{}", self.package, self.simple_name)
        }
    }

    /// Module path segments, outermost first.
    pub fn package_segments(&self) -> impl Iterator<Item = &str> {
        self.package.split("::").filter(|s| !s.is_empty())
    }
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}", self.simple_name)
        } else {
            write!(f, "{}::{}", self.package, self.simple_name)
        }
    }
}

///
/// AnnotationValue
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AnnotationValue {
    Int(i32),
    Str(String),
    Missing,
}

///
/// Annotation
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Annotation {
    pub name: String,
    pub value: AnnotationValue,
}

impl Annotation {
    #[must_use]
    pub fn new(name: impl Into<String>, value: AnnotationValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// The `#[bind(id)]` marker.
    #[must_use]
    pub fn bind(id: i32) -> Self {
        Self::new(crate::MARKER, AnnotationValue::Int(id))
    }
}

///
/// Element
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub name: String,
    pub kind: ElementKind,
    pub visibility: Visibility,
    pub enclosing: Option<TypeRef>,
    pub declared_type: Option<String>,
    pub annotations: Vec<Annotation>,
}

impl Element {
    #[must_use]
    pub fn new(id: ElementId, name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            visibility: Visibility::Private,
            enclosing: None,
            declared_type: None,
            annotations: Vec::new(),
        }
    }

    /// Convenience constructor for a field of `host`.
    #[must_use]
    pub fn field(
        id: ElementId,
        host: &TypeRef,
        name: impl Into<String>,
        declared_type: impl Into<String>,
        visibility: Visibility,
    ) -> Self {
        Self {
            visibility,
            enclosing: Some(host.clone()),
            declared_type: Some(declared_type.into()),
            ..Self::new(id, name, ElementKind::Field)
        }
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    #[must_use]
    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.name == name)
    }

    /// Reference used when attaching diagnostics to this element.
    #[must_use]
    pub fn to_ref(&self) -> ElementRef {
        let display = match &self.enclosing {
            Some(host) => format!("{host}::{}", self.name),
            None => self.name.clone(),
        };

        ElementRef { id: self.id, display }
    }
}

///
/// ElementRef
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ElementRef {
    pub id: ElementId,
    pub display: String,
}

impl ElementRef {
    #[must_use]
    pub fn new(id: ElementId, display: impl Into<String>) -> Self {
        Self {
            id,
            display: display.into(),
        }
    }
}

impl Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

///
/// RoundEnvironment
///
/// Everything a front end makes visible to one round.
///

#[derive(Clone, Debug, Default)]
pub struct RoundEnvironment {
    pub elements: Vec<Element>,
    pub processing_over: bool,
}

impl RoundEnvironment {
    #[must_use]
    pub const fn new(elements: Vec<Element>) -> Self {
        Self {
            elements,
            processing_over: false,
        }
    }

    /// Final, empty round that signals the end of processing.
    #[must_use]
    pub const fn last() -> Self {
        Self {
            elements: Vec::new(),
            processing_over: true,
        }
    }

    pub fn elements_annotated_with<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements
            .iter()
            .filter(move |e| e.annotation(name).is_some())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_ref_parses_package_and_name() {
        let ty = TypeRef::parse("app::ui::MainScreen");
        assert_eq!(ty.package, "app::ui");
        assert_eq!(ty.simple_name, "MainScreen");
        assert_eq!(ty.qualified_name(), "app::ui::MainScreen");
        assert_eq!(ty.package_segments().collect::<Vec<_>>(), ["app", "ui"]);
    }

    #[test]
    fn root_type_ref_has_no_package() {
        let ty = TypeRef::parse("Root");
        assert!(ty.package.is_empty());
        assert_eq!(ty.qualified_name(), "Root");
        assert_eq!(ty.package_segments().count(), 0);
    }

    #[test]
    fn annotated_filter_skips_unmarked_elements() {
        let host = TypeRef::new("p", "Sample");
        let round = RoundEnvironment::new(vec![
            Element::field(ElementId(0), &host, "a", "Widget", Visibility::Public)
                .with_annotation(Annotation::bind(1)),
            Element::field(ElementId(1), &host, "plain", "u8", Visibility::Public),
        ]);

        let marked: Vec<_> = round
            .elements_annotated_with(crate::MARKER)
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(marked, ["a"]);
    }

    #[test]
    fn element_ref_includes_host_path() {
        let host = TypeRef::new("p", "Sample");
        let field = Element::field(ElementId(3), &host, "a", "Widget", Visibility::Public);

        assert_eq!(field.to_ref().to_string(), "p::Sample::a");
        assert_eq!(field.to_ref().id, ElementId(3));
    }
}
