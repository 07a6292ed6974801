pub struct Widget;

#[derive(viewinject::ViewInject)]
#[bind(3)]
pub struct Screen {
    pub title: Widget,
}

fn main() {
    let screen = Screen { title: Widget };
    let _ = screen.title;
    let _ = ScreenViewInject;
}
