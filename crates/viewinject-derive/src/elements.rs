use darling::Error;
use proc_macro2::Span;
use quote::ToTokens;
use syn::{Data, DeriveInput, spanned::Spanned};
use viewinject_compiler::{
    attr::bind_annotation,
    element::{Element, ElementId, ElementKind, TypeRef, Visibility},
};

///
/// Collected
///
/// Elements of one derive input, with the span each one came from so
/// engine diagnostics can be pointed back at source.
///

#[derive(Debug, Default)]
pub struct Collected {
    pub elements: Vec<Element>,
    spans: Vec<Span>,
}

impl Collected {
    fn next_id(&self) -> ElementId {
        ElementId(self.elements.len())
    }

    fn push(&mut self, element: Element, span: Span) {
        self.elements.push(element);
        self.spans.push(span);
    }

    pub fn span(&self, id: ElementId) -> Span {
        self.spans.get(id.0).copied().unwrap_or_else(Span::call_site)
    }
}

/// Translate `input` into engine elements. Malformed `#[bind]` attributes
/// are returned as errors; their elements are still collected, unmarked.
pub fn collect(input: &DeriveInput, host: &TypeRef) -> (Collected, Vec<Error>) {
    let mut out = Collected::default();
    let mut errors = Error::accumulator();

    // the marker on the type itself
    if let Some(Some(annotation)) = errors.handle(bind_annotation(&input.attrs).map_err(Error::from)) {
        let element = Element::new(out.next_id(), input.ident.to_string(), ElementKind::Struct)
            .with_annotation(annotation);
        out.push(element, input.ident.span());
    }

    if let Data::Struct(data) = &input.data {
        for (index, field) in data.fields.iter().enumerate() {
            let name = field
                .ident
                .as_ref()
                .map_or_else(|| index.to_string(), ToString::to_string);
            let declared_type = field.ty.to_token_stream().to_string();

            let mut element = Element::field(
                out.next_id(),
                host,
                name,
                declared_type,
                Visibility::from(&field.vis),
            );
            if let Some(Some(annotation)) =
                errors.handle(bind_annotation(&field.attrs).map_err(Error::from))
            {
                element = element.with_annotation(annotation);
            }

            // a single token keeps the reported span stable
            let span = field
                .ident
                .as_ref()
                .map_or_else(|| field.ty.span(), syn::Ident::span);
            out.push(element, span);
        }
    }

    let errors = match errors.finish() {
        Ok(()) => Vec::new(),
        Err(err) => err.into_iter().collect(),
    };

    (out, errors)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;
    use viewinject_compiler::element::AnnotationValue;

    fn host() -> TypeRef {
        TypeRef::new("", "Screen")
    }

    #[test]
    fn named_fields_become_field_elements() {
        let input: DeriveInput = parse_quote! {
            struct Screen {
                #[bind(1)]
                pub title: Label,
                count: u32,
            }
        };

        let (collected, errors) = collect(&input, &host());

        assert!(errors.is_empty());
        assert_eq!(collected.elements.len(), 2);
        let title = &collected.elements[0];
        assert_eq!(title.name, "title");
        assert_eq!(title.kind, ElementKind::Field);
        assert_eq!(title.visibility, Visibility::Public);
        assert_eq!(title.declared_type.as_deref(), Some("Label"));
        assert_eq!(
            title.annotation("bind").map(|a| &a.value),
            Some(&AnnotationValue::Int(1))
        );
        assert!(collected.elements[1].annotations.is_empty());
    }

    #[test]
    fn tuple_fields_are_named_by_index() {
        let input: DeriveInput = parse_quote! {
            struct Screen(#[bind(2)] pub Button);
        };

        let (collected, _) = collect(&input, &host());

        assert_eq!(collected.elements[0].name, "0");
        assert_eq!(collected.elements[0].id, ElementId(0));
    }

    #[test]
    fn marker_on_the_struct_is_collected_as_a_struct() {
        let input: DeriveInput = parse_quote! {
            #[bind(3)]
            struct Screen {
                pub title: Label,
            }
        };

        let (collected, _) = collect(&input, &host());

        assert_eq!(collected.elements[0].kind, ElementKind::Struct);
        assert!(collected.elements[0].annotation("bind").is_some());
    }

    #[test]
    fn malformed_marker_is_an_error_and_leaves_the_field_unmarked() {
        let input: DeriveInput = parse_quote! {
            struct Screen {
                #[bind(key = 1)]
                pub title: Label,
            }
        };

        let (collected, errors) = collect(&input, &host());

        assert_eq!(errors.len(), 1);
        assert!(collected.elements[0].annotations.is_empty());
    }
}
