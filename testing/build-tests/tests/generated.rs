use viewinject::{InjectorRegistry, ViewInject, ViewInjector, Views};
use viewinject_build_tests::{
    Root,
    p::{Sample, SampleViewInject},
    register_injectors, screens,
    widgets::{Label, Widget},
};

fn views() -> Views {
    Views::new()
        .with(1, Widget("a"))
        .with(2, Label("b"))
        .with(5, Widget("header"))
}

fn sample() -> Sample {
    Sample {
        a: Widget("unset"),
        b: Label("unset"),
    }
}

#[test]
fn build_script_injector_assigns_each_field() {
    let mut sample = sample();

    ViewInjector::inject_view_from(&mut sample, &views()).expect("inject should succeed");

    assert_eq!(sample.a, Widget("a"));
    assert_eq!(sample.b, Label("b"));
}

#[test]
fn build_script_injector_is_named_after_its_package() {
    assert_eq!(SampleViewInject::NAME, "p::Sample$$ViewInject");
    assert_eq!(SampleViewInject.ids(), &[1, 2]);
}

#[test]
fn registry_covers_generated_and_derived_hosts() {
    let mut registry = InjectorRegistry::new();
    register_injectors(&mut registry);

    assert_eq!(
        registry.names().collect::<Vec<_>>(),
        [
            "Root$$ViewInject",
            "p::Sample$$ViewInject",
            "screens::a::Screen$$ViewInject",
            "screens::b::Screen$$ViewInject",
        ]
    );

    let mut sample = sample();
    ViewInjector::inject_registered_from(&registry, &mut sample, &views())
        .expect("inject should succeed");
    assert_eq!(sample.a, Widget("a"));

    let mut root = Root {
        header: Widget("unset"),
    };
    ViewInjector::inject_registered_from(&registry, &mut root, &views())
        .expect("inject should succeed");
    assert_eq!(root.header, Widget("header"));
}

#[test]
fn same_named_hosts_resolve_to_their_own_injectors() {
    let mut registry = InjectorRegistry::new();
    register_injectors(&mut registry);

    let mut a = screens::a::Screen {
        title: Widget("unset"),
    };
    ViewInjector::inject_registered_from(&registry, &mut a, &views())
        .expect("inject should succeed");
    assert_eq!(a.title, Widget("a"));

    let mut b = screens::b::Screen {
        caption: Label("unset"),
    };
    ViewInjector::inject_registered_from(&registry, &mut b, &views())
        .expect("inject should succeed");
    assert_eq!(b.caption, Label("b"));
}

#[test]
fn injector_names_match_registered_keys() {
    let mut registry = InjectorRegistry::new();
    register_injectors(&mut registry);

    assert!(registry.contains(&ViewInjector::injector_name::<Sample>()));
    assert!(registry.contains(&ViewInjector::injector_name::<Root>()));
    assert!(registry.contains(&ViewInjector::injector_name::<screens::a::Screen>()));
    assert!(registry.contains(&ViewInjector::injector_name::<screens::b::Screen>()));
}
