use std::any::{Any, type_name};
use thiserror::Error as ThisError;

///
/// InjectError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum InjectError {
    #[error("no view with id {id}")]
    ViewNotFound { id: i32 },

    #[error("view {id} is not a `{expected}`")]
    TypeMismatch { id: i32, expected: &'static str },
}

///
/// ViewSource
///
/// Anything that can hand out a view by numeric id.
///

pub trait ViewSource {
    fn find_view_by_id(&self, id: i32) -> Option<Box<dyn Any>>;
}

///
/// ViewInject
///
/// The injector contract. `inject` resolves every bound field of `host`
/// from `source` and assigns it; `ids` lists the ids it will ask for.
///

pub trait ViewInject<T: ?Sized> {
    fn ids(&self) -> &'static [i32];

    fn inject(&self, host: &mut T, source: &dyn ViewSource) -> Result<(), InjectError>;
}

///
/// Injectable
///
/// Implemented by generated code for every host type, tying the host to its
/// injector at compile time.
///

pub trait Injectable: Sized {
    type Injector: ViewInject<Self> + Default;
}

/// Find view `id` in `source` and downcast it to `V`.
pub fn cast<V: 'static>(source: &dyn ViewSource, id: i32) -> Result<V, InjectError> {
    let view = source
        .find_view_by_id(id)
        .ok_or(InjectError::ViewNotFound { id })?;

    view.downcast::<V>()
        .map(|view| *view)
        .map_err(|_| InjectError::TypeMismatch {
            id,
            expected: type_name::<V>(),
        })
}

///
/// TESTS
///
