#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Widget(pub &'static str);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Label(pub &'static str);
