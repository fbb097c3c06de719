//! Populating the declaration model from parsed packages.
//!
//! [`ModelBuilder`] walks every top-level declaration of every file and
//! records struct types, interface types and methods. Everything else
//! (imports, variables, constants, free functions, other type shapes) is
//! ignored.

use log::{debug, trace};

use gouml_core::model::{Field, Method, Model, Parameter, TypeEntity, TypeKind};
use gouml_parser::ast::{
    Decl, FieldDecl, FuncDecl, GenDecl, GenKind, InterfaceElem, Signature, SourceFile, Spec,
    TypeExpr,
};

use crate::source::SourcePackage;

/// Builds a [`Model`] from parsed source packages.
///
/// # Examples
///
/// ```
/// use gouml::{builder::ModelBuilder, source::load_sources, config::SourceConfig};
///
/// let packages = load_sources(
///     [("cars/car.go", "package cars\ntype Car struct { Engine }\n")],
///     &SourceConfig::default(),
/// )
/// .expect("valid source");
///
/// let model = ModelBuilder::new().build(&packages);
/// let car = model.lookup("cars.Car").expect("Car declared");
/// assert!(car.composition().contains("Engine"));
/// ```
#[derive(Debug, Default)]
pub struct ModelBuilder {
    model: Model,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the builder and return the model for `packages`.
    pub fn build(mut self, packages: &[SourcePackage]) -> Model {
        for package in packages {
            self.add_package(package);
        }

        debug!(
            namespaces = self.model.len(),
            types = self.model.entities().count();
            "Model built"
        );
        self.model
    }

    fn add_package(&mut self, package: &SourcePackage) {
        // Every package gets a namespace, even one without types.
        self.model.namespace_or_insert(package.name());

        for (path, file) in package.files() {
            trace!(path = path.display().to_string(); "Collecting declarations");
            self.add_file(package.name(), file);
        }
    }

    fn add_file(&mut self, namespace: &str, file: &SourceFile) {
        for decl in &file.decls {
            match decl {
                Decl::Gen(gen_decl) if gen_decl.kind == GenKind::Type => {
                    self.add_type_decl(namespace, gen_decl)
                }
                Decl::Func(func_decl) => self.add_func_decl(namespace, func_decl),
                Decl::Gen(_) => {}
            }
        }
    }

    fn entity(&mut self, namespace: &str, name: &str) -> &mut TypeEntity {
        self.model
            .namespace_or_insert(namespace)
            .entity_or_insert(name)
    }

    /// Only the first spec of a grouped declaration is inspected.
    fn add_type_decl(&mut self, namespace: &str, gen_decl: &GenDecl) {
        let Some(Spec::Type(spec)) = gen_decl.specs.first() else {
            return;
        };
        if gen_decl.specs.len() > 1 {
            debug!(
                namespace,
                first = spec.name.as_str(),
                skipped = gen_decl.specs.len() - 1;
                "Skipping trailing specs of grouped type declaration"
            );
        }

        match &spec.ty {
            TypeExpr::Struct(fields) => {
                let entity = self.entity(namespace, &spec.name);
                entity.assign_kind(TypeKind::Record);
                add_struct_fields(entity, fields);
            }
            TypeExpr::Interface(elems) => {
                let entity = self.entity(namespace, &spec.name);
                entity.assign_kind(TypeKind::Interface);
                add_interface_elems(entity, elems);
            }
            other => {
                trace!(
                    namespace,
                    name = spec.name.as_str(),
                    ty = other.to_string();
                    "Ignoring type declaration"
                );
            }
        }
    }

    fn add_func_decl(&mut self, namespace: &str, func_decl: &FuncDecl) {
        let Some(recv) = &func_decl.recv else {
            return;
        };
        let Some(receiver) = recv.base_type_name() else {
            debug!(
                namespace,
                method = func_decl.name.as_str(),
                receiver = recv.ty.to_string();
                "Skipping method with unsupported receiver"
            );
            return;
        };

        let entity = self.entity(namespace, receiver);
        if entity.kind() == TypeKind::Unset {
            entity.assign_kind(TypeKind::Record);
        }
        entity.add_method(method(&func_decl.name, &func_decl.signature));
    }
}

/// Named fields become [`Field`]s, one per name; embedded fields go to the
/// composition set.
fn add_struct_fields(entity: &mut TypeEntity, fields: &[FieldDecl]) {
    for field in fields {
        if field.is_embedded() {
            let reference = embedded_reference(&field.ty);
            if !entity.add_composition(reference.as_str()) {
                trace!(reference; "Duplicate embedded type");
            }
            continue;
        }

        let type_expr = field.ty.to_string();
        for name in &field.names {
            entity.add_field(Field::new(name.as_str(), type_expr.as_str()));
        }
    }
}

fn add_interface_elems(entity: &mut TypeEntity, elems: &[InterfaceElem]) {
    for elem in elems {
        match elem {
            InterfaceElem::Method { name, signature } => {
                entity.add_method(method(name, signature));
            }
            InterfaceElem::Embedded(ty) => {
                entity.add_composition(embedded_reference(ty));
            }
            InterfaceElem::Union(terms) => {
                trace!(
                    interface = entity.qualified_name(),
                    terms = terms.len();
                    "Ignoring type-set union"
                );
            }
        }
    }
}

/// The type name an embedded field refers to, with a leading `*` removed.
fn embedded_reference(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Pointer(inner) => inner.to_string(),
        other => other.to_string(),
    }
}

fn method(name: &str, signature: &Signature) -> Method {
    let parameters = signature
        .params
        .iter()
        .map(|param| match &param.name {
            Some(param_name) => Parameter::new(param_name.as_str(), param.ty.to_string()),
            None => Parameter::unnamed(param.ty.to_string()),
        })
        .collect();
    let returns = signature
        .results
        .iter()
        .map(|result| result.ty.to_string())
        .collect();

    Method::new(name, parameters, returns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SourceConfig, source::load_sources};

    fn build(sources: &[(&str, &str)]) -> Model {
        let packages = load_sources(sources.iter().copied(), &SourceConfig::default())
            .expect("sources parse");
        ModelBuilder::new().build(&packages)
    }

    #[test]
    fn test_struct_fields_and_composition() {
        let model = build(&[(
            "cars/car.go",
            "package cars\n\ntype Car struct {\n    Engine\n    *Chassis\n    name, Model string\n    wheels []*Wheel\n}\n",
        )]);

        let car = model.lookup("cars.Car").expect("Car");
        assert_eq!(car.kind(), TypeKind::Record);

        let composition: Vec<_> = car.composition().iter().map(String::as_str).collect();
        assert_eq!(composition, vec!["Engine", "Chassis"]);

        let fields: Vec<_> = car
            .fields()
            .iter()
            .map(|f| (f.name(), f.type_expr()))
            .collect();
        assert_eq!(
            fields,
            vec![("name", "string"), ("Model", "string"), ("wheels", "[]*Wheel")]
        );
    }

    #[test]
    fn test_duplicate_embedding_is_recorded_once() {
        let model = build(&[(
            "p/a.go",
            "package p\ntype A struct {\n    Base\n    *Base\n}\n",
        )]);

        let a = model.lookup("p.A").expect("A");
        assert_eq!(a.composition().len(), 1);
        assert!(a.fields().is_empty());
    }

    #[test]
    fn test_interface_methods_and_embeds() {
        let model = build(&[(
            "zoo/speaker.go",
            "package zoo\ntype Speaker interface {\n    io.Writer\n    Speak(times int) (string, error)\n    ~int | string\n}\n",
        )]);

        let speaker = model.lookup("zoo.Speaker").expect("Speaker");
        assert_eq!(speaker.kind(), TypeKind::Interface);
        assert!(speaker.composition().contains("io.Writer"));

        let speak = speaker.method("Speak").expect("Speak");
        assert_eq!(speak.parameters()[0].name(), "times");
        assert_eq!(speak.parameters()[0].type_expr(), "int");
        assert_eq!(speak.returns(), ["string", "error"]);
        assert_eq!(speaker.methods().len(), 1);
    }

    #[test]
    fn test_method_attaches_to_receiver() {
        let model = build(&[(
            "zoo/dog.go",
            "package zoo\ntype Dog struct{}\nfunc (d *Dog) Speak() string { return \"woof\" }\nfunc (Dog) sleep(hours, minutes int) {}\n",
        )]);

        let dog = model.lookup("zoo.Dog").expect("Dog");
        let names: Vec<_> = dog.methods().iter().map(Method::name).collect();
        assert_eq!(names, vec!["Speak", "sleep"]);

        let sleep = dog.method("sleep").expect("sleep");
        let params: Vec<_> = sleep
            .parameters()
            .iter()
            .map(|p| (p.name(), p.type_expr()))
            .collect();
        assert_eq!(params, vec![("hours", "int"), ("minutes", "int")]);
        assert!(sleep.returns().is_empty());
    }

    #[test]
    fn test_method_before_declaration_defaults_to_record() {
        let model = build(&[
            ("zoo/a.go", "package zoo\nfunc (c *Cat) Purr() {}\n"),
            ("zoo/b.go", "package zoo\ntype Cat struct{ lives int }\n"),
        ]);

        let cat = model.lookup("zoo.Cat").expect("Cat");
        assert_eq!(cat.kind(), TypeKind::Record);
        assert_eq!(cat.methods().len(), 1);
        assert_eq!(cat.fields().len(), 1);
    }

    #[test]
    fn test_method_on_non_struct_type_creates_record() {
        let model = build(&[(
            "p/level.go",
            "package p\ntype Level int\nfunc (l Level) String() string { return \"\" }\n",
        )]);

        let level = model.lookup("p.Level").expect("Level");
        assert_eq!(level.kind(), TypeKind::Record);
    }

    #[test]
    fn test_generic_receiver_is_stripped() {
        let model = build(&[(
            "p/list.go",
            "package p\ntype List[T any] struct{ items []T }\nfunc (l *List[T]) Push(v T) {}\n",
        )]);

        let list = model.lookup("p.List").expect("List");
        assert!(list.method("Push").is_some());
    }

    #[test]
    fn test_ignored_declarations() {
        let model = build(&[(
            "p/misc.go",
            "package p\nimport \"fmt\"\nvar x = 1\nconst y = 2\ntype Celsius float64\nfunc helper() { fmt.Println() }\n",
        )]);

        let namespace = model.namespace("p").expect("namespace exists");
        assert!(namespace.is_empty());
    }

    #[test]
    fn test_only_first_grouped_spec_is_inspected() {
        let model = build(&[(
            "p/group.go",
            "package p\ntype (\n    A struct{}\n    B struct{}\n)\n",
        )]);

        assert!(model.lookup("p.A").is_some());
        assert!(model.lookup("p.B").is_none());
    }

    #[test]
    fn test_first_kind_wins() {
        let model = build(&[
            ("p/a.go", "package p\ntype Thing interface{ Do() }\n"),
            ("p/b.go", "package p\ntype Thing struct{ x int }\n"),
        ]);

        let thing = model.lookup("p.Thing").expect("Thing");
        assert_eq!(thing.kind(), TypeKind::Interface);
        assert_eq!(thing.fields().len(), 1);
    }

    #[test]
    fn test_unnamed_parameters_and_named_results() {
        let model = build(&[(
            "p/io.go",
            "package p\ntype R struct{}\nfunc (R) Read([]byte) (n, extra int, err error) { return }\n",
        )]);

        let read = model.lookup("p.R").and_then(|r| r.method("Read")).expect("Read");
        assert!(read.parameters()[0].is_unnamed());
        assert_eq!(read.parameters()[0].type_expr(), "[]byte");
        assert_eq!(read.returns(), ["int", "int", "error"]);
    }
}
