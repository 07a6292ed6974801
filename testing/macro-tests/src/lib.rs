//! Shared fixtures for the derive tests.

use std::rc::Rc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Widget(pub &'static str);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Label(pub String);

impl Label {
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self(text.to_string())
    }
}

/// Views for ids 1 (`Widget`) and 2 (`Label`), plus a shared view at 3.
#[must_use]
pub fn sample_views() -> viewinject::Views {
    viewinject::Views::new()
        .with(1, Widget("button"))
        .with(2, Label::new("title"))
        .with(3, Rc::new(Widget("shared")))
}
