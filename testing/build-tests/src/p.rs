use crate::widgets::{Label, Widget};
use viewinject::Bind;

#[derive(Debug, Bind)]
pub struct Sample {
    #[bind(1)]
    pub a: Widget,
    #[bind(2)]
    pub b: Label,
}

include!(concat!(env!("OUT_DIR"), "/p/Sample$$ViewInject.rs"));
