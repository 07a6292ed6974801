use crate::{
    diagnostic::{Diagnostic, Messager, report},
    element::{Annotation, AnnotationValue, Element, ElementKind, RoundEnvironment},
    model::FieldDescriptor,
};
use proc_macro2::{Group, TokenStream, TokenTree};
use quote::ToTokens;
use std::slice;
use syn::{Ident, Member, Path, Type, parse_str};

///
/// AnnotationScanner
///
/// Single pass over the marked elements of one round. Yields every field
/// that passes validation and reports every one that doesn't; a rejected
/// element never stops the scan. Iteration consumes the scanner, so a new
/// round needs a new scanner.
///

pub struct AnnotationScanner<'a> {
    marker: &'a str,
    elements: slice::Iter<'a, Element>,
    messager: &'a mut dyn Messager,
}

impl<'a> AnnotationScanner<'a> {
    pub fn new(round: &'a RoundEnvironment, messager: &'a mut dyn Messager) -> Self {
        Self {
            marker: crate::MARKER,
            elements: round.elements.iter(),
            messager,
        }
    }
}

impl Iterator for AnnotationScanner<'_> {
    type Item = FieldDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        for element in self.elements.by_ref() {
            let Some(annotation) = element.annotation(self.marker) else {
                continue;
            };

            match accept(element, annotation) {
                Ok(field) => return Some(field),
                Err(message) => {
                    report(&mut *self.messager, Diagnostic::error(element.to_ref(), message));
                }
            }
        }

        None
    }
}

/// Scan `round`, reporting rejected elements to `messager`.
pub fn scan<'a>(round: &'a RoundEnvironment, messager: &'a mut dyn Messager) -> AnnotationScanner<'a> {
    AnnotationScanner::new(round, messager)
}

// accept
// first failing check wins, so each rejected element produces one diagnostic
fn accept(element: &Element, annotation: &Annotation) -> Result<FieldDescriptor, String> {
    let marker = &annotation.name;
    let name = &element.name;

    if element.kind != ElementKind::Field {
        return Err(format!(
            "`#[{marker}]` must be declared on a field, found {} `{name}`",
            element.kind
        ));
    }

    if element.visibility.is_private() {
        return Err(format!(
            "field `{name}` marked with `#[{marker}]` must not be private"
        ));
    }

    let Some(owner) = element.enclosing.clone() else {
        return Err(format!(
            "`#[{marker}]` must be declared on a field of a struct, `{name}` is not inside one"
        ));
    };

    let Ok(host) = parse_str::<Ident>(&owner.simple_name) else {
        return Err(format!("enclosing type `{owner}` is not a valid type path"));
    };
    if parse_str::<Path>(&owner.qualified_name()).is_err() {
        return Err(format!("enclosing type `{owner}` is not a valid type path"));
    }

    let id = match annotation.value {
        AnnotationValue::Int(id) => id,
        AnnotationValue::Str(_) | AnnotationValue::Missing => {
            return Err(format!(
                "`#[{marker}]` on field `{name}` requires an integer id"
            ));
        }
    };

    let member: Member =
        parse_str(name).map_err(|_| format!("`{name}` is not a valid field name"))?;

    let declared = element.declared_type.as_deref().unwrap_or_default();
    let declared_type: Type = parse_str(declared)
        .and_then(|ty: Type| syn::parse2(resolve_self(ty.into_token_stream(), &host)))
        .map_err(|_| format!("field `{name}` has unsupported type `{declared}`"))?;

    Ok(FieldDescriptor {
        element: element.id,
        name: member,
        declared_type,
        id,
        owner,
    })
}

// resolve_self
// the injector impl has a `Self` of its own, so the host is named explicitly
fn resolve_self(tokens: TokenStream, host: &Ident) -> TokenStream {
    tokens
        .into_iter()
        .map(|tree| match tree {
            TokenTree::Ident(ident) if ident == "Self" => TokenTree::Ident(host.clone()),
            TokenTree::Group(group) => {
                let mut resolved = Group::new(group.delimiter(), resolve_self(group.stream(), host));
                resolved.set_span(group.span());
                TokenTree::Group(resolved)
            }
            other => other,
        })
        .collect()
}

///
/// TESTS
///
