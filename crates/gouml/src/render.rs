//! PlantUML class-diagram rendering.
//!
//! # Output Shape
//!
//! ```text
//! @startuml
//! namespace zoo {
//!     class Dog {
//!         - name string
//!         + Speak() string
//!     }
//! }
//! zoo.Animal *-- zoo.Dog
//! zoo.Speaker <|-- zoo.Dog
//!
//! @enduml
//! ```
//!
//! Namespaces without types are omitted. Inside a type, members are grouped
//! as private fields, public fields, private methods and public methods, each
//! group keeping declaration order. Edge lines for a namespace follow its
//! closing brace: composition edges first, then extends edges.

use std::fmt::{self, Write as _};

use log::{debug, trace};

use gouml_core::{
    model::{Field, Method, Model, Namespace, TypeEntity},
    naming::{qualified_name, qualify},
    visibility::Visibility,
};

use crate::config::{Ordering, RenderConfig};

const START: &str = "@startuml";
const END: &str = "@enduml";
const TYPE_INDENT: &str = "    ";
const MEMBER_INDENT: &str = "        ";

/// Serializes a [`Model`] to PlantUML text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagramRenderer {
    config: RenderConfig,
}

impl DiagramRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render the model. The output always starts with `@startuml` and ends
    /// with `@enduml` without a trailing newline.
    ///
    /// # Examples
    ///
    /// ```
    /// use gouml::render::DiagramRenderer;
    /// use gouml_core::model::Model;
    ///
    /// let text = DiagramRenderer::default().render(&Model::new());
    /// assert_eq!(text, "@startuml\n\n@enduml");
    /// ```
    pub fn render(&self, model: &Model) -> String {
        let text = PlantUml {
            model,
            config: &self.config,
        }
        .to_string();

        debug!(bytes = text.len(); "Diagram rendered");
        trace!(text = text.as_str(); "Rendered diagram");
        text
    }
}

/// Display adapter writing the whole document.
struct PlantUml<'a> {
    model: &'a Model,
    config: &'a RenderConfig,
}

impl PlantUml<'_> {
    fn namespaces(&self) -> Vec<&Namespace> {
        let mut namespaces: Vec<_> = self
            .model
            .namespaces()
            .filter(|namespace| !namespace.is_empty())
            .collect();
        if self.config.ordering() == Ordering::Alphabetical {
            namespaces.sort_by(|a, b| a.name().cmp(b.name()));
        }
        namespaces
    }

    fn types<'n>(&self, namespace: &'n Namespace) -> Vec<&'n TypeEntity> {
        let mut types: Vec<_> = namespace.types().collect();
        if self.config.ordering() == Ordering::Alphabetical {
            types.sort_by(|a, b| a.name().cmp(b.name()));
        }
        types
    }

    fn write_namespace(&self, f: &mut fmt::Formatter<'_>, namespace: &Namespace) -> fmt::Result {
        let types = self.types(namespace);

        writeln!(f, "namespace {} {{", namespace.name())?;
        for entity in &types {
            self.write_entity(f, entity)?;
        }
        writeln!(f, "}}")?;

        for entity in &types {
            let target = qualified_name(namespace.name(), entity.name());
            for composed in entity.composition() {
                writeln!(f, "{} *-- {target}", qualify(composed, entity.namespace()))?;
            }
        }
        for entity in &types {
            let target = qualified_name(namespace.name(), entity.name());
            for extended in entity.extends() {
                writeln!(f, "{} <|-- {target}", qualify(extended, entity.namespace()))?;
            }
        }
        Ok(())
    }

    fn write_entity(&self, f: &mut fmt::Formatter<'_>, entity: &TypeEntity) -> fmt::Result {
        writeln!(f, "{TYPE_INDENT}{} {} {{", entity.kind(), entity.name())?;

        if !self.config.hide_fields() {
            for visibility in [Visibility::Private, Visibility::Public] {
                for field in entity.fields().iter().filter(|m| m.visibility() == visibility) {
                    writeln!(f, "{MEMBER_INDENT}{}", FieldLine(field))?;
                }
            }
        }
        if !self.config.hide_methods() {
            for visibility in [Visibility::Private, Visibility::Public] {
                for method in entity.methods().iter().filter(|m| m.visibility() == visibility) {
                    writeln!(f, "{MEMBER_INDENT}{}", MethodLine(method))?;
                }
            }
        }

        writeln!(f, "{TYPE_INDENT}}}")
    }
}

impl fmt::Display for PlantUml<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{START}")?;
        for namespace in self.namespaces() {
            self.write_namespace(f, namespace)?;
        }
        write!(f, "\n{END}")
    }
}

/// `- name type`
struct FieldLine<'a>(&'a Field);

impl fmt::Display for FieldLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.0;
        write!(
            f,
            "{} {} {}",
            field.visibility(),
            field.name(),
            field.type_expr()
        )
    }
}

/// `+ Name(p T, U) R` or `+ Name() (A, B)`
struct MethodLine<'a>(&'a Method);

impl fmt::Display for MethodLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = self.0;
        write!(f, "{} {}(", method.visibility(), method.name())?;
        for (i, param) in method.parameters().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if param.is_unnamed() {
                f.write_str(param.type_expr())?;
            } else {
                write!(f, "{} {}", param.name(), param.type_expr())?;
            }
        }
        f.write_char(')')?;

        match method.returns() {
            [] => Ok(()),
            [single] => write!(f, " {single}"),
            several => write!(f, " ({})", several.join(", ")),
        }
    }
}
