//! modgraph - build-package descriptors for C++ modules
//!
//! This crate models a module (a library plus its optional test library
//! and unit-test executable), wires artifact-level dependency edges from
//! module-level declarations, and assembles the registry of all reachable
//! modules that is handed to a project generator.

pub mod core;
pub mod generator;
pub mod ops;
pub mod resolver;
pub mod sources;
pub mod util;

pub use core::{
    artifact::Artifact, artifact::ArtifactId, artifact::ArtifactKind, error::DescriptorError,
    manifest::Manifest, module::Module, provider::ModuleProvider,
};

pub use generator::{Generator, JsonGenerator};
pub use resolver::PackageRegistry;
pub use util::context::GlobalContext;
