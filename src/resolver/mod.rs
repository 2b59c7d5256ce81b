//! Dependency resolution.
//!
//! "Module A depends on module B" is shorthand for a fixed set of
//! artifact-to-artifact edges. This module turns the module-level
//! declarations into those edges and assembles the package registry.
//!
//! The resolver is pure and deterministic: all module descriptors are
//! fetched before a module is resolved.

pub mod registry;

pub use registry::PackageRegistry;

use crate::core::module::link;
use crate::core::{ArtifactKind, Module};

/// Wire the artifact edges implied by `module`'s dependency list.
///
/// A single pass over the dependencies in declaration order:
/// - main library -> each dependency's main library
/// - test library -> each dependency's test library, when both exist
/// - test executable -> each dependency's main library, plus its test
///   library when the dependency is a test framework
///
/// Rules naming an artifact that doesn't exist are skipped. Running the
/// pass again adds nothing. Returns the number of edges added.
pub fn resolve_module<'a>(
    module: &mut Module,
    lookup: impl Fn(&str) -> Option<&'a Module>,
) -> usize {
    let mut added = 0;

    for dep_name in module.dependencies().to_vec() {
        let Some(dep) = lookup(&dep_name) else {
            tracing::debug!("{}: dependency {} not available, skipping", module, dep_name);
            continue;
        };

        for (from, to) in edges_to(module, dep) {
            let Some(to) = dep.artifact_id(to) else {
                continue;
            };
            if let Some(artifact) = module.artifact_mut(from) {
                if link(artifact, to) {
                    added += 1;
                }
            }
        }
    }

    tracing::debug!("resolved {} ({} new edges)", module, added);
    added
}

/// The (own kind, dependency kind) pairs that `module` links against `dep`.
fn edges_to(module: &Module, dep: &Module) -> Vec<(ArtifactKind, ArtifactKind)> {
    let mut edges = vec![(ArtifactKind::MainLibrary, ArtifactKind::MainLibrary)];

    if module.test_library().is_some() && dep.test_library().is_some() {
        edges.push((ArtifactKind::TestLibrary, ArtifactKind::TestLibrary));
    }

    if module.test_executable().is_some() {
        edges.push((ArtifactKind::TestExecutable, ArtifactKind::MainLibrary));
        if dep.is_test_framework() {
            edges.push((ArtifactKind::TestExecutable, ArtifactKind::TestLibrary));
        }
    }

    edges
}
