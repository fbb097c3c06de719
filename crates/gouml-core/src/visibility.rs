//! Member visibility derived from identifier case.
//!
//! Go exports an identifier by capitalizing it. The diagram only needs the
//! classification for grouping and for the `-`/`+` markers, so visibility is
//! never stored: it is recomputed from the name whenever it is asked for.

use std::fmt;

/// Visibility of a field or method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// The name starts with a lower-case letter.
    Private,
    /// Any other name, including names starting with `_` or a non-cased letter.
    Public,
}

impl Visibility {
    /// Classifies a member name.
    ///
    /// A name is private iff its first character is a lower-case letter.
    ///
    /// # Examples
    ///
    /// ```
    /// use gouml_core::visibility::Visibility;
    ///
    /// assert_eq!(Visibility::of("engine"), Visibility::Private);
    /// assert_eq!(Visibility::of("Engine"), Visibility::Public);
    /// assert_eq!(Visibility::of("_hidden"), Visibility::Public);
    /// ```
    pub fn of(name: &str) -> Self {
        match name.chars().next() {
            Some(first) if first.is_lowercase() => Visibility::Private,
            _ => Visibility::Public,
        }
    }

    /// Returns the PlantUML marker for this visibility.
    pub fn marker(&self) -> char {
        match self {
            Visibility::Private => '-',
            Visibility::Public => '+',
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, Visibility::Private)
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Public)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_visibility_markers() {
        assert_eq!(Visibility::Private.marker(), '-');
        assert_eq!(Visibility::Public.marker(), '+');
        assert_eq!(Visibility::Private.to_string(), "-");
    }

    #[test]
    fn test_visibility_unicode_names() {
        assert_eq!(Visibility::of("école"), Visibility::Private);
        assert_eq!(Visibility::of("Über"), Visibility::Public);
        assert_eq!(Visibility::of("日本"), Visibility::Public);
    }

    #[test]
    fn test_visibility_empty_name() {
        assert_eq!(Visibility::of(""), Visibility::Public);
    }

    proptest! {
        #[test]
        fn private_iff_first_char_is_lowercase(name in "[a-zA-Z_][a-zA-Z0-9_]{0,12}") {
            let first = name.chars().next().unwrap();
            let visibility = Visibility::of(&name);
            prop_assert_eq!(visibility.is_private(), first.is_lowercase());
            prop_assert_eq!(visibility.marker() == '-', first.is_lowercase());
        }
    }
}
