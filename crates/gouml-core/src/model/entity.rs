//! Declared types and their kinds.

use std::fmt;

use indexmap::IndexSet;
use log::debug;

use crate::{
    model::{Field, Method},
    naming,
};

/// The kind of a declared type.
///
/// A kind starts out [`TypeKind::Unset`] and is assigned exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeKind {
    /// Not yet classified.
    #[default]
    Unset,
    /// A record type: a `struct`, or any named type that has methods.
    Record,
    /// An interface type.
    Interface,
}

impl TypeKind {
    /// Returns the PlantUML keyword for this kind.
    ///
    /// An unset kind renders as a class, the same as a record.
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeKind::Unset | TypeKind::Record => "class",
            TypeKind::Interface => "interface",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A declared type together with its members and relationships.
///
/// Fields and methods keep the order in which they were appended. The
/// composition and extends sets keep first-insertion order and hold each
/// reference once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntity {
    namespace: String,
    name: String,
    kind: TypeKind,
    fields: Vec<Field>,
    methods: Vec<Method>,
    composition: IndexSet<String>,
    extends: IndexSet<String>,
}

impl TypeEntity {
    /// Creates an empty entity with an unset kind.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            kind: TypeKind::Unset,
            fields: Vec::new(),
            methods: Vec::new(),
            composition: IndexSet::new(),
            extends: IndexSet::new(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `namespace.name`.
    pub fn qualified_name(&self) -> String {
        naming::qualified_name(&self.namespace, &self.name)
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_record(&self) -> bool {
        self.kind == TypeKind::Record
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Returns the composed-type references, as written in the source.
    pub fn composition(&self) -> &IndexSet<String> {
        &self.composition
    }

    /// Returns the extended/implemented-type references.
    pub fn extends(&self) -> &IndexSet<String> {
        &self.extends
    }

    /// Assigns the kind if it is still unset.
    ///
    /// Returns `true` if the kind was assigned. Once a kind is set it never
    /// changes: later assignments are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use gouml_core::model::{TypeEntity, TypeKind};
    ///
    /// let mut entity = TypeEntity::new("pkg", "Foo");
    /// assert!(entity.assign_kind(TypeKind::Record));
    /// assert!(!entity.assign_kind(TypeKind::Interface));
    /// assert_eq!(entity.kind(), TypeKind::Record);
    /// ```
    pub fn assign_kind(&mut self, kind: TypeKind) -> bool {
        if kind == TypeKind::Unset {
            return false;
        }
        if self.kind != TypeKind::Unset {
            if self.kind != kind {
                debug!(
                    type_name = self.qualified_name(),
                    kept:? = self.kind,
                    ignored:? = kind;
                    "Kind already assigned"
                );
            }
            return false;
        }
        self.kind = kind;
        true
    }

    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn add_method(&mut self, method: Method) {
        self.methods.push(method);
    }

    /// Adds a composed-type reference. Returns `false` if it was already present.
    pub fn add_composition(&mut self, reference: impl Into<String>) -> bool {
        self.composition.insert(reference.into())
    }

    /// Adds an extended-type reference. Returns `false` if it was already present.
    pub fn add_extends(&mut self, reference: impl Into<String>) -> bool {
        self.extends.insert(reference.into())
    }

    /// Finds the method with `name`, if any.
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name() == name)
    }

    /// Checks whether this entity's methods cover every method in `required`.
    ///
    /// Each required method must have a counterpart with the same signature
    /// (see [`Method::same_signature`]). An empty requirement is always met.
    pub fn covers(&self, required: &[Method]) -> bool {
        required
            .iter()
            .all(|wanted| self.methods.iter().any(|own| own.same_signature(wanted)))
    }
}
