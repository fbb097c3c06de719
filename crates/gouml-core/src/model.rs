//! Declaration model types.
//!
//! This module contains the structural representation of a Go code base after
//! its declarations have been collected. These types are passive data: the
//! builder creates and fills them, the resolver appends extends-edges, and the
//! renderer reads them.
//!
//! # Pipeline Position
//!
//! ```text
//! Go source files
//!     ↓ gouml-parser
//! Syntax tree (ast::SourceFile)
//!     ↓ builder
//! Declaration Model (these types)
//!     ↓ resolver
//! Annotated Model (extends-edges added)
//!     ↓ render
//! PlantUML text
//! ```
//!
//! # Organization
//!
//! - [`member`] - Type members: [`Field`], [`Method`], [`Parameter`]
//! - [`entity`] - Declared types: [`TypeEntity`], [`TypeKind`]
//! - [`namespace`] - Grouping: [`Namespace`], [`Model`]

pub mod entity;
pub mod member;
pub mod namespace;

pub use entity::*;
pub use member::*;
pub use namespace::*;
