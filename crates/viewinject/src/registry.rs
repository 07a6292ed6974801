use crate::{SUFFIX, inject::ViewInject};
use std::{
    any::{Any, TypeId, type_name},
    collections::BTreeMap,
    fmt,
};
use thiserror::Error as ThisError;

///
/// LookupError
///
/// Raised when an injector that generation should have produced cannot be
/// found. Always a build inconsistency, never retried.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum LookupError {
    #[error("can not find {name}, something went wrong when compiling")]
    NotRegistered { name: String },

    #[error("injector {name} is registered for `{found}`, not `{expected}`")]
    HostMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

type Factory<T> = fn() -> Box<dyn ViewInject<T>>;

// artifact_name
// generated names are crate-relative, so the leading crate segment goes
pub(crate) fn artifact_name<T: ?Sized>() -> String {
    let path = type_name::<T>();
    let local = path.split_once("::").map_or(path, |(_, rest)| rest);

    format!("{local}{SUFFIX}")
}

///
/// Entry
///

struct Entry {
    host_name: &'static str,
    factory: Box<dyn Any + Send + Sync>,
}

///
/// InjectorRegistry
///
/// Injector name -> factory table. Generated `register_injectors` functions
/// fill it; lookups go by host type or by `<host>$$ViewInject` name.
///

#[derive(Default)]
pub struct InjectorRegistry {
    by_name: BTreeMap<&'static str, Entry>,
    by_type: BTreeMap<TypeId, &'static str>,
}

impl InjectorRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            by_name: BTreeMap::new(),
            by_type: BTreeMap::new(),
        }
    }

    /// Register injector `I` for host `T` under `name`. A later registration
    /// under the same name replaces the earlier one.
    pub fn register<T, I>(&mut self, name: &'static str)
    where
        T: 'static,
        I: ViewInject<T> + Default + 'static,
    {
        let factory: Factory<T> = || Box::new(I::default());

        tracing::debug!(name, host = type_name::<T>(), "registered injector");
        self.by_type.insert(TypeId::of::<T>(), name);
        self.by_name.insert(
            name,
            Entry {
                host_name: type_name::<T>(),
                factory: Box::new(factory),
            },
        );
    }

    /// Injector registered for host type `T`.
    pub fn find<T: 'static>(&self) -> Result<Box<dyn ViewInject<T>>, LookupError> {
        let name = self
            .by_type
            .get(&TypeId::of::<T>())
            .ok_or_else(|| LookupError::NotRegistered {
                name: artifact_name::<T>(),
            })?;

        self.find_by_name(name)
    }

    /// Injector registered under `name`, which must target host `T`.
    pub fn find_by_name<T: 'static>(
        &self,
        name: &str,
    ) -> Result<Box<dyn ViewInject<T>>, LookupError> {
        let entry = self
            .by_name
            .get(name)
            .ok_or_else(|| LookupError::NotRegistered {
                name: name.to_string(),
            })?;

        let factory = entry
            .factory
            .downcast_ref::<Factory<T>>()
            .ok_or_else(|| LookupError::HostMismatch {
                name: name.to_string(),
                expected: type_name::<T>(),
                found: entry.host_name,
            })?;

        Ok(factory())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_name.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl fmt::Debug for InjectorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectorRegistry")
            .field("names", &self.by_name.keys().collect::<Vec<_>>())
            .finish()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inject::{InjectError, ViewSource, cast};

    #[derive(Debug, Default)]
    struct Screen {
        title: String,
    }

    #[derive(Default)]
    struct ScreenInjector;

    impl ViewInject<Screen> for ScreenInjector {
        fn ids(&self) -> &'static [i32] {
            &[1]
        }

        fn inject(&self, host: &mut Screen, source: &dyn ViewSource) -> Result<(), InjectError> {
            host.title = cast::<String>(source, 1)?;
            Ok(())
        }
    }

    #[derive(Default)]
    struct Other;

    const NAME: &str = "tests::Screen$$ViewInject";

    #[test]
    fn finds_by_type_and_by_name() {
        let mut registry = InjectorRegistry::new();
        registry.register::<Screen, ScreenInjector>(NAME);

        assert!(registry.contains(NAME));
        assert_eq!(registry.find::<Screen>().expect("by type").ids(), &[1]);
        assert_eq!(
            registry.find_by_name::<Screen>(NAME).expect("by name").ids(),
            &[1]
        );
    }

    #[test]
    fn missing_type_names_the_expected_injector() {
        let registry = InjectorRegistry::new();

        let err = registry.find::<Screen>().err().expect("nothing registered");

        match err {
            LookupError::NotRegistered { name } => {
                assert_eq!(name, "registry::tests::Screen$$ViewInject");
            }
            other @ LookupError::HostMismatch { .. } => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn name_registered_for_another_host_is_a_mismatch() {
        let mut registry = InjectorRegistry::new();
        registry.register::<Screen, ScreenInjector>(NAME);

        let err = registry.find_by_name::<Other>(NAME).err().expect("wrong host");

        assert!(matches!(err, LookupError::HostMismatch { .. }));
    }

    #[test]
    fn names_are_listed_in_order() {
        let mut registry = InjectorRegistry::new();
        registry.register::<Screen, ScreenInjector>("b::Screen$$ViewInject");
        registry.register::<Screen, ScreenInjector>("a::Screen$$ViewInject");

        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            ["a::Screen$$ViewInject", "b::Screen$$ViewInject"]
        );
        assert_eq!(registry.len(), 2);
    }
}
