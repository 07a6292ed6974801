use std::{any::Any, rc::Rc};
use viewinject::{
    Error, InjectError, Injectable, InjectorRegistry, LookupError, ViewInject, ViewInjector,
    ViewSource, Views,
};
use viewinject_macro_tests::{Label, Widget, sample_views};

#[derive(Debug, ViewInject)]
pub struct Sample {
    #[bind(1)]
    pub a: Widget,
    #[bind(2)]
    pub b: Label,
    pub untouched: u8,
}

impl Sample {
    fn unset() -> Self {
        Self {
            a: Widget("unset"),
            b: Label::new("unset"),
            untouched: 9,
        }
    }
}

#[derive(ViewInject)]
pub struct Activity {
    #[bind(id = 2)]
    pub title: Label,
    #[bind(id = 3)]
    pub(crate) shared: Rc<Widget>,
    views: Views,
}

impl ViewSource for Activity {
    fn find_view_by_id(&self, id: i32) -> Option<Box<dyn Any>> {
        self.views.find_view_by_id(id)
    }
}

#[derive(Debug, PartialEq, Eq, ViewInject)]
pub struct Pair(#[bind(7)] pub Widget, pub u8);

#[derive(Debug, ViewInject)]
#[view_inject(crate = "::viewinject")]
pub struct Reused {
    #[bind(1)]
    pub first: Widget,
    #[bind(1)]
    pub second: Widget,
}

#[test]
fn sample_injects_each_bound_field() {
    let mut sample = Sample::unset();

    ViewInjector::inject_view_from(&mut sample, &sample_views()).expect("inject should succeed");

    assert_eq!(sample.a, Widget("button"));
    assert_eq!(sample.b, Label::new("title"));
    assert_eq!(sample.untouched, 9);
}

#[test]
fn injector_reports_its_ids_and_name() {
    assert_eq!(SampleViewInject.ids(), &[1, 2]);
    assert_eq!(SampleViewInject::NAME, "Sample$$ViewInject");
}

#[test]
fn injectable_ties_host_to_its_injector() {
    fn ids_of<T: Injectable>() -> &'static [i32] {
        <T::Injector as Default>::default().ids()
    }

    assert_eq!(ids_of::<Sample>(), &[1, 2]);
    assert_eq!(ids_of::<Pair>(), &[7]);
}

#[test]
fn host_can_be_its_own_view_source() {
    let mut activity = Activity {
        title: Label::new("unset"),
        shared: Rc::new(Widget("unset")),
        views: sample_views(),
    };

    ViewInjector::inject_view(&mut activity).expect("inject should succeed");

    assert_eq!(activity.title, Label::new("title"));
    assert_eq!(*activity.shared, Widget("shared"));
}

#[test]
fn tuple_fields_are_injected_by_index() {
    let mut pair = Pair(Widget("unset"), 4);
    let views = Views::new().with(7, Widget("seven"));

    ViewInjector::inject_view_from(&mut pair, &views).expect("inject should succeed");

    assert_eq!(pair, Pair(Widget("seven"), 4));
}

#[test]
fn missing_view_is_an_error() {
    let mut sample = Sample::unset();
    let views = Views::new().with(1, Widget("button"));

    let err = ViewInjector::inject_view_from(&mut sample, &views).expect_err("id 2 missing");

    assert_eq!(err, InjectError::ViewNotFound { id: 2 });
}

#[test]
fn wrong_view_type_is_an_error() {
    let mut sample = Sample::unset();
    let views = Views::new().with(1, Label::new("not a widget")).with(2, Label::new("x"));

    let err = ViewInjector::inject_view_from(&mut sample, &views).expect_err("id 1 mistyped");

    assert!(matches!(err, InjectError::TypeMismatch { id: 1, .. }));
}

#[test]
fn later_field_wins_a_reused_id() {
    let mut reused = Reused {
        first: Widget("unset"),
        second: Widget("unset"),
    };

    ViewInjector::inject_view_from(&mut reused, &sample_views()).expect("inject should succeed");

    assert_eq!(reused.first, Widget("unset"));
    assert_eq!(reused.second, Widget("button"));
    assert_eq!(ReusedViewInject.ids(), &[1]);
}

#[test]
fn registered_injectors_are_found_by_name() {
    let mut registry = InjectorRegistry::new();
    registry.register::<Sample, SampleViewInject>(SampleViewInject::NAME);
    registry.register::<Pair, PairViewInject>(PairViewInject::NAME);

    let mut sample = Sample::unset();
    ViewInjector::inject_registered_from(&registry, &mut sample, &sample_views())
        .expect("inject should succeed");
    assert_eq!(sample.a, Widget("button"));

    let injector = registry
        .find_by_name::<Pair>("Pair$$ViewInject")
        .expect("registered by name");
    assert_eq!(injector.ids(), &[7]);
}

#[test]
fn unregistered_host_is_a_lookup_error() {
    let registry = InjectorRegistry::new();
    let mut sample = Sample::unset();

    let err = ViewInjector::inject_registered_from(&registry, &mut sample, &sample_views())
        .expect_err("nothing registered");

    assert!(matches!(err, Error::Lookup(LookupError::NotRegistered { .. })));
}
