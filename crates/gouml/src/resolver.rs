//! Structural interface satisfaction.
//!
//! Go types implement interfaces implicitly. After the model is built, every
//! record is checked against every interface in the model, and each interface
//! whose full method set the record provides is added to the record's extends
//! set.

use log::{debug, info};

use gouml_core::model::{Method, Model};

/// Adds "implements" edges from records to the interfaces they satisfy.
///
/// A record satisfies an interface when, for every method of the interface,
/// it has a method with the same name, the same ordered parameter types and
/// the same ordered return types. Types are compared as text and parameter
/// names are ignored. An interface without methods is satisfied by every
/// record.
#[derive(Debug, Default, Clone, Copy)]
pub struct SatisfactionResolver;

/// Method set of one interface, detached from the model.
struct InterfaceSignature {
    qualified_name: String,
    methods: Vec<Method>,
}

impl SatisfactionResolver {
    pub fn new() -> Self {
        Self
    }

    /// Append every satisfied interface to each record's extends set.
    ///
    /// The extends entries are fully qualified (`namespace.Name`). Records
    /// and interfaces are visited in model order, so the result is
    /// deterministic.
    pub fn resolve(&self, model: &mut Model) {
        // Interfaces are snapshotted first so records can be mutated freely.
        let interfaces: Vec<InterfaceSignature> = model
            .entities()
            .filter(|entity| entity.is_interface())
            .map(|entity| InterfaceSignature {
                qualified_name: entity.qualified_name(),
                methods: entity.methods().to_vec(),
            })
            .collect();

        let mut edges = 0usize;
        for namespace in model.namespaces_mut() {
            for record in namespace.types_mut().filter(|entity| entity.is_record()) {
                for interface in &interfaces {
                    if record.covers(&interface.methods)
                        && record.add_extends(interface.qualified_name.as_str())
                    {
                        debug!(
                            record = record.qualified_name(),
                            interface = interface.qualified_name.as_str();
                            "Record satisfies interface"
                        );
                        edges += 1;
                    }
                }
            }
        }

        info!(interfaces = interfaces.len(), edges; "Interface satisfaction resolved");
    }
}
