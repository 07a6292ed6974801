pub struct Widget;

#[derive(viewinject::ViewInject)]
pub struct Screen {
    #[bind(1)]
    hidden: Widget,
}

fn main() {
    let screen = Screen { hidden: Widget };
    let _ = screen.hidden;
    let _ = ScreenViewInject;
}
