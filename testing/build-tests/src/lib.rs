//! A crate whose injectors come from its build script, next to one that
//! uses the derive. Both end up in the generated registration table.

pub mod p;
pub mod screens;
pub mod widgets;

use widgets::Widget;

#[derive(Debug, viewinject::ViewInject)]
pub struct Root {
    #[bind(5)]
    pub header: Widget,
}

include!(concat!(env!("OUT_DIR"), "/viewinject_registry.rs"));
