//! gouml Core Types and Definitions
//!
//! This crate provides the declaration model that gouml builds from Go source
//! and renders into class diagrams. It includes:
//!
//! - **Model**: namespaces, type entities and their members ([`model`] module)
//! - **Naming**: qualified-name helpers shared by the resolver and renderer ([`naming`] module)
//! - **Visibility**: the public/private classification of members ([`visibility`] module)

pub mod model;
pub mod naming;
pub mod visibility;
