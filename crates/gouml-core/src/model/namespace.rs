//! Namespaces and the complete model.

use indexmap::{IndexMap, map::Entry};

use crate::model::TypeEntity;

/// A package: a named group of type entities.
///
/// Types keep the order in which they were first referenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    name: String,
    types: IndexMap<String, TypeEntity>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the entity named `name`, creating an unset one if needed.
    pub fn entity_or_insert(&mut self, name: &str) -> &mut TypeEntity {
        match self.types.entry(name.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(TypeEntity::new(&self.name, name)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TypeEntity> {
        self.types.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TypeEntity> {
        self.types.get_mut(name)
    }

    /// Iterates over the entities in insertion order.
    pub fn types(&self) -> impl Iterator<Item = &TypeEntity> {
        self.types.values()
    }

    pub fn types_mut(&mut self) -> impl Iterator<Item = &mut TypeEntity> {
        self.types.values_mut()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// The complete declaration model: every namespace seen during a run.
///
/// # Examples
///
/// ```
/// use gouml_core::model::{Model, TypeKind};
///
/// let mut model = Model::new();
/// model
///     .namespace_or_insert("zoo")
///     .entity_or_insert("Dog")
///     .assign_kind(TypeKind::Record);
///
/// assert_eq!(model.len(), 1);
/// assert!(model.lookup("zoo.Dog").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    namespaces: IndexMap<String, Namespace>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the namespace named `name`, creating an empty one if needed.
    pub fn namespace_or_insert(&mut self, name: &str) -> &mut Namespace {
        self.namespaces
            .entry(name.to_string())
            .or_insert_with(|| Namespace::new(name))
    }

    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.get(name)
    }

    pub fn namespace_mut(&mut self, name: &str) -> Option<&mut Namespace> {
        self.namespaces.get_mut(name)
    }

    /// Iterates over the namespaces in insertion order.
    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.namespaces.values()
    }

    pub fn namespaces_mut(&mut self) -> impl Iterator<Item = &mut Namespace> {
        self.namespaces.values_mut()
    }

    /// Iterates over every entity of every namespace.
    pub fn entities(&self) -> impl Iterator<Item = &TypeEntity> {
        self.namespaces.values().flat_map(Namespace::types)
    }

    /// Looks up an entity by its qualified `namespace.name`.
    pub fn lookup(&self, qualified: &str) -> Option<&TypeEntity> {
        let (namespace, name) = qualified.split_once(crate::naming::NAMESPACE_SEPARATOR)?;
        self.namespaces.get(namespace)?.get(name)
    }

    /// Returns the number of namespaces.
    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    /// Returns `true` if the model holds no namespaces.
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}
