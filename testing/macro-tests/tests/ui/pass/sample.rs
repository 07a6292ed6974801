use viewinject::{ViewInject, ViewInjector, Views};

#[derive(Clone, Debug, PartialEq)]
pub struct Widget(u32);

#[derive(Clone, Debug, PartialEq)]
pub struct Label(&'static str);

#[derive(ViewInject)]
pub struct Sample {
    #[bind(1)]
    pub a: Widget,
    #[bind(2)]
    pub(crate) b: Label,
}

fn main() {
    let views = Views::new().with(1, Widget(1)).with(2, Label("b"));
    let mut sample = Sample {
        a: Widget(0),
        b: Label(""),
    };

    ViewInjector::inject_view_from(&mut sample, &views).unwrap();

    assert_eq!(sample.a, Widget(1));
    assert_eq!(sample.b, Label("b"));
}
