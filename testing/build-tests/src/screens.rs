//! Two hosts sharing a simple name, told apart by their module.

pub mod a {
    use crate::widgets::Widget;

    #[derive(Debug, viewinject::ViewInject)]
    pub struct Screen {
        #[bind(1)]
        pub title: Widget,
    }
}

pub mod b {
    use crate::widgets::Label;

    #[derive(Debug, viewinject::ViewInject)]
    pub struct Screen {
        #[bind(2)]
        pub caption: Label,
    }
}
