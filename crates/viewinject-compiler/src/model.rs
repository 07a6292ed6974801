use crate::element::{ElementId, ElementRef, TypeRef};
use std::collections::{BTreeMap, btree_map};
use syn::{Member, Type};

///
/// FieldDescriptor
///
/// One accepted `#[bind]` field.
///

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    pub element: ElementId,
    pub name: Member,
    pub declared_type: Type,
    pub id: i32,
    pub owner: TypeRef,
}

impl FieldDescriptor {
    /// Field name as written in source (`a`, or `0` for tuple fields).
    #[must_use]
    pub fn field_name(&self) -> String {
        match &self.name {
            Member::Named(ident) => ident.to_string(),
            Member::Unnamed(index) => index.index.to_string(),
        }
    }
}

///
/// ClassModel
///
/// Everything collected for one host type during a round. Ids are kept
/// ordered so generation is deterministic.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ClassModel {
    pub host: TypeRef,
    pub fields: BTreeMap<i32, FieldDescriptor>,
}

impl ClassModel {
    #[must_use]
    pub const fn new(host: TypeRef) -> Self {
        Self {
            host,
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn qualified_name(&self) -> String {
        self.host.qualified_name()
    }

    /// `Host$$ViewInject`
    #[must_use]
    pub fn generated_type_name(&self) -> String {
        format!("{}{}", self.host.simple_name, crate::SUFFIX)
    }

    /// Insert a field, returning the descriptor previously bound to the same id.
    pub fn insert(&mut self, field: FieldDescriptor) -> Option<FieldDescriptor> {
        self.fields.insert(field.id, field)
    }

    #[must_use]
    pub fn get(&self, id: i32) -> Option<&FieldDescriptor> {
        self.fields.get(&id)
    }

    /// Where diagnostics about the whole host are attached: the host's
    /// earliest accepted field.
    #[must_use]
    pub fn anchor(&self) -> ElementRef {
        let id = self
            .fields
            .values()
            .map(|field| field.element)
            .min()
            .unwrap_or_default();

        ElementRef::new(id, self.qualified_name())
    }

    #[must_use]
    pub fn ids(&self) -> Vec<i32> {
        self.fields.keys().copied().collect()
    }
}

///
/// ClassModelRegistry
///
/// Host-type qualified name -> model, for a single round.
///

#[derive(Clone, Debug, Default)]
pub struct ClassModelRegistry {
    models: BTreeMap<String, ClassModel>,
}

impl ClassModelRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            models: BTreeMap::new(),
        }
    }

    /// Return the model for `host`, creating an empty one on first use.
    pub fn get_or_create(&mut self, host: &TypeRef) -> &mut ClassModel {
        self.models
            .entry(host.qualified_name())
            .or_insert_with(|| ClassModel::new(host.clone()))
    }

    /// Fold a descriptor into its owner's model. Same-id collisions
    /// overwrite; the displaced descriptor is returned.
    pub fn add(&mut self, field: FieldDescriptor) -> Option<FieldDescriptor> {
        let model = self.get_or_create(&field.owner);
        let replaced = model.insert(field);

        if let Some(prev) = &replaced {
            tracing::debug!(
                host = %prev.owner,
                id = prev.id,
                field = %prev.field_name(),
                "bind id reassigned to a later field"
            );
        }

        replaced
    }

    pub fn clear(&mut self) {
        self.models.clear();
    }

    #[must_use]
    pub fn get(&self, qualified_name: &str) -> Option<&ClassModel> {
        self.models.get(qualified_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassModel> {
        self.models.values()
    }
}

impl<'a> IntoIterator for &'a ClassModelRegistry {
    type Item = (&'a String, &'a ClassModel);
    type IntoIter = btree_map::Iter<'a, String, ClassModel>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.iter()
    }
}

///
/// TESTS
///
