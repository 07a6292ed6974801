use crate::inject::ViewSource;
use std::{any::Any, collections::BTreeMap, fmt};

type ViewFactory = Box<dyn Fn() -> Box<dyn Any>>;

///
/// Views
///
/// An id -> view table. Each lookup hands out a fresh clone, so views meant
/// to be shared should be stored behind `Rc`/`Arc`.
///

#[derive(Default)]
pub struct Views {
    entries: BTreeMap<i32, ViewFactory>,
}

impl Views {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn insert<V: Clone + 'static>(&mut self, id: i32, view: V) {
        self.entries
            .insert(id, Box::new(move || Box::new(view.clone()) as Box<dyn Any>));
    }

    #[must_use]
    pub fn with<V: Clone + 'static>(mut self, id: i32, view: V) -> Self {
        self.insert(id, view);
        self
    }

    #[must_use]
    pub fn contains(&self, id: i32) -> bool {
        self.entries.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ViewSource for Views {
    fn find_view_by_id(&self, id: i32) -> Option<Box<dyn Any>> {
        self.entries.get(&id).map(|factory| factory())
    }
}

impl fmt::Debug for Views {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Views")
            .field("ids", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
