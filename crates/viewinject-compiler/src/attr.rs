//! Reading `#[bind]` off syn attributes and visibilities. Shared by every
//! front end that starts from syn trees.

use crate::element::{Annotation, AnnotationValue, Visibility};
use quote::ToTokens;
use syn::{
    Attribute, Expr, ExprLit, ExprUnary, Ident, Lit, LitInt, Meta, Token, UnOp,
    parse::ParseStream,
};

/// The `#[bind]` annotation in `attrs`, if any.
///
/// Accepted forms are `#[bind(1)]`, `#[bind(id = 1)]` and `#[bind = 1]`.
/// A bare `#[bind]` or a non-integer value still yields an annotation so
/// the scanner can report it against the element.
pub fn bind_annotation(attrs: &[Attribute]) -> syn::Result<Option<Annotation>> {
    let Some(attr) = attrs.iter().find(|attr| attr.path().is_ident(crate::MARKER)) else {
        return Ok(None);
    };

    let value = match &attr.meta {
        Meta::Path(_) => AnnotationValue::Missing,
        Meta::List(list) => list.parse_args_with(parse_list_value)?,
        Meta::NameValue(nv) => expr_value(&nv.value)?,
    };

    Ok(Some(Annotation::new(crate::MARKER, value)))
}

// parse_list_value
// `1`, `-1`, `id = 1` or any other literal
fn parse_list_value(input: ParseStream) -> syn::Result<AnnotationValue> {
    if input.peek(Ident) && input.peek2(Token![=]) {
        let key: Ident = input.parse()?;
        if key != "id" {
            return Err(syn::Error::new(
                key.span(),
                format!("unknown `#[bind]` argument `{key}`, expected `id`"),
            ));
        }
        input.parse::<Token![=]>()?;
    }

    let negative = input.parse::<Option<Token![-]>>()?.is_some();
    let lit: Lit = input.parse()?;

    lit_value(&lit, negative)
}

fn expr_value(expr: &Expr) -> syn::Result<AnnotationValue> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => lit_value(lit, false),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => match &**expr {
            Expr::Lit(ExprLit { lit, .. }) => lit_value(lit, true),
            other => Ok(AnnotationValue::Str(other.to_token_stream().to_string())),
        },
        other => Ok(AnnotationValue::Str(other.to_token_stream().to_string())),
    }
}

fn lit_value(lit: &Lit, negative: bool) -> syn::Result<AnnotationValue> {
    match lit {
        Lit::Int(int) => int_value(int, negative).map(AnnotationValue::Int),
        Lit::Str(s) => Ok(AnnotationValue::Str(s.value())),
        other => Ok(AnnotationValue::Str(other.to_token_stream().to_string())),
    }
}

fn int_value(int: &LitInt, negative: bool) -> syn::Result<i32> {
    let magnitude: i64 = int.base10_parse()?;
    let value = if negative { -magnitude } else { magnitude };

    i32::try_from(value)
        .map_err(|_| syn::Error::new(int.span(), format!("bind id {value} does not fit in an i32")))
}

impl From<&syn::Visibility> for Visibility {
    fn from(vis: &syn::Visibility) -> Self {
        match vis {
            syn::Visibility::Public(_) => Self::Public,
            syn::Visibility::Restricted(restricted) => {
                let path = &restricted.path;

                if path.is_ident("crate") {
                    Self::Crate
                } else if path.is_ident("self") {
                    Self::Private
                } else {
                    Self::Restricted(path.to_token_stream().to_string())
                }
            }
            syn::Visibility::Inherited => Self::Private,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn value(attrs: &[Attribute]) -> Option<AnnotationValue> {
        bind_annotation(attrs)
            .expect("attribute should parse")
            .map(|annotation| annotation.value)
    }

    #[test]
    fn positional_and_named_ids_parse() {
        let positional: Vec<Attribute> = parse_quote!(#[bind(7)]);
        let named: Vec<Attribute> = parse_quote!(#[bind(id = 8)]);
        let assigned: Vec<Attribute> = parse_quote!(#[bind = 9]);

        assert_eq!(value(&positional), Some(AnnotationValue::Int(7)));
        assert_eq!(value(&named), Some(AnnotationValue::Int(8)));
        assert_eq!(value(&assigned), Some(AnnotationValue::Int(9)));
    }

    #[test]
    fn negative_ids_parse() {
        let list: Vec<Attribute> = parse_quote!(#[bind(-3)]);
        let assigned: Vec<Attribute> = parse_quote!(#[bind = -4]);

        assert_eq!(value(&list), Some(AnnotationValue::Int(-3)));
        assert_eq!(value(&assigned), Some(AnnotationValue::Int(-4)));
    }

    #[test]
    fn bare_and_string_markers_are_kept_for_the_scanner() {
        let bare: Vec<Attribute> = parse_quote!(#[bind]);
        let string: Vec<Attribute> = parse_quote!(#[bind("one")]);

        assert_eq!(value(&bare), Some(AnnotationValue::Missing));
        assert_eq!(value(&string), Some(AnnotationValue::Str("one".to_string())));
    }

    #[test]
    fn unmarked_field_has_no_annotation() {
        let plain: Vec<Attribute> = parse_quote!(#[doc = "x"]);

        assert_eq!(value(&plain), None);
    }

    #[test]
    fn out_of_range_id_is_an_error() {
        let big: Vec<Attribute> = parse_quote!(#[bind(4294967296)]);

        let err = bind_annotation(&big).expect_err("id is too large");

        assert!(err.to_string().contains("does not fit"), "got: {err}");
    }

    #[test]
    fn unknown_argument_is_an_error() {
        let wrong: Vec<Attribute> = parse_quote!(#[bind(key = 1)]);

        let err = bind_annotation(&wrong).expect_err("unknown argument");

        assert!(err.to_string().contains("expected `id`"), "got: {err}");
    }

    #[test]
    fn visibilities_map_to_engine_levels() {
        let cases: [(syn::Visibility, Visibility); 5] = [
            (parse_quote!(pub), Visibility::Public),
            (parse_quote!(pub(crate)), Visibility::Crate),
            (parse_quote!(pub(self)), Visibility::Private),
            (parse_quote!(pub(super)), Visibility::Restricted("super".to_string())),
            (syn::Visibility::Inherited, Visibility::Private),
        ];

        for (vis, expected) in &cases {
            assert_eq!(&Visibility::from(vis), expected);
        }
    }
}
