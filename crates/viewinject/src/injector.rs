use crate::{
    Error,
    inject::{InjectError, Injectable, ViewInject, ViewSource},
    registry::{InjectorRegistry, artifact_name},
};
use std::{
    any::Any,
    cell::RefCell,
    collections::BTreeMap,
};

///
/// ViewInjector
///
/// Entry points that run the injector belonging to a host. The `*_view`
/// functions resolve it statically through [`Injectable`]; the
/// `*_registered` functions go through an [`InjectorRegistry`] by name.
///
/// When the host is its own view source, the views it will be asked for are
/// resolved up front, before the host is borrowed mutably for assignment.
///

pub struct ViewInjector;

impl ViewInjector {
    /// Inject `host` using itself as the view source.
    pub fn inject_view<T>(host: &mut T) -> Result<(), InjectError>
    where
        T: Injectable + ViewSource,
    {
        let injector = T::Injector::default();
        let resolved = Resolved::capture(&*host, injector.ids());

        injector.inject(host, &resolved)
    }

    /// Inject `host` using views found in `source`.
    pub fn inject_view_from<T: Injectable>(
        host: &mut T,
        source: &dyn ViewSource,
    ) -> Result<(), InjectError> {
        T::Injector::default().inject(host, source)
    }

    /// Inject `host` from itself, finding its injector in `registry`.
    pub fn inject_registered<T>(registry: &InjectorRegistry, host: &mut T) -> Result<(), Error>
    where
        T: ViewSource + 'static,
    {
        let injector = registry.find::<T>()?;
        let resolved = Resolved::capture(&*host, injector.ids());

        injector.inject(host, &resolved)?;

        Ok(())
    }

    /// Inject `host` from `source`, finding its injector in `registry`.
    pub fn inject_registered_from<T: 'static>(
        registry: &InjectorRegistry,
        host: &mut T,
        source: &dyn ViewSource,
    ) -> Result<(), Error> {
        registry.find::<T>()?.inject(host, source)?;

        Ok(())
    }

    /// Name the injector for `T` is registered under: the host's path
    /// within its crate followed by `$$ViewInject`.
    #[must_use]
    pub fn injector_name<T: ?Sized>() -> String {
        artifact_name::<T>()
    }
}

///
/// Resolved
///
/// Views looked up ahead of injection. Each one is handed out once.
///

struct Resolved {
    views: RefCell<BTreeMap<i32, Box<dyn Any>>>,
}

impl Resolved {
    fn capture(source: &dyn ViewSource, ids: &[i32]) -> Self {
        let views = ids
            .iter()
            .filter_map(|&id| source.find_view_by_id(id).map(|view| (id, view)))
            .collect();

        Self {
            views: RefCell::new(views),
        }
    }
}

impl ViewSource for Resolved {
    fn find_view_by_id(&self, id: i32) -> Option<Box<dyn Any>> {
        self.views.borrow_mut().remove(&id)
    }
}

///
/// TESTS
///
