//! Qualified type names.
//!
//! A qualified name is `namespace.typeName`. References collected from source
//! are kept as written (`Engine`, `io.Reader`) and qualified lazily against the
//! namespace of the type that holds them.

/// Separator between a namespace and a type name.
pub const NAMESPACE_SEPARATOR: char = '.';

/// Joins a namespace and a type name.
///
/// # Examples
///
/// ```
/// use gouml_core::naming::qualified_name;
///
/// assert_eq!(qualified_name("zoo", "Dog"), "zoo.Dog");
/// ```
pub fn qualified_name(namespace: &str, name: &str) -> String {
    format!("{namespace}{NAMESPACE_SEPARATOR}{name}")
}

/// Qualifies a type reference with `namespace` unless it already carries one.
///
/// # Examples
///
/// ```
/// use gouml_core::naming::qualify;
///
/// assert_eq!(qualify("Engine", "cars"), "cars.Engine");
/// assert_eq!(qualify("io.Reader", "cars"), "io.Reader");
/// ```
pub fn qualify(reference: &str, namespace: &str) -> String {
    if is_qualified(reference) {
        reference.to_string()
    } else {
        qualified_name(namespace, reference)
    }
}

/// Returns `true` if the reference already contains a namespace separator.
pub fn is_qualified(reference: &str) -> bool {
    reference.contains(NAMESPACE_SEPARATOR)
}
