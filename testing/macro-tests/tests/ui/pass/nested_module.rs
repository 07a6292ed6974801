mod screens {
    use viewinject::{Bind, ViewInject};

    #[derive(Clone)]
    pub struct Button;

    #[derive(ViewInject)]
    pub struct Main(#[bind(id = -1)] pub Button);

    // marker only, injector comes from a build script
    #[derive(Bind)]
    pub struct Detail {
        #[bind(2)]
        pub button: Button,
    }
}

fn main() {
    use viewinject::ViewInject;

    assert_eq!(screens::MainViewInject.ids(), &[-1]);
    let _ = screens::Detail {
        button: screens::Button,
    };
}
