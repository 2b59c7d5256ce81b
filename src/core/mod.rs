//! Core descriptor types.
//!
//! - Artifacts (main library, test library, test executable)
//! - Modules and their builder
//! - The module provider interface
//! - Manifests declaring modules

pub mod artifact;
pub mod error;
pub mod manifest;
pub mod module;
pub mod provider;

pub use artifact::{Artifact, ArtifactId, ArtifactKind};
pub use error::{DescriptorError, DescriptorResult};
pub use manifest::{find_manifest, Manifest, ModuleSpec, MANIFEST_NAME};
pub use module::Module;
pub use provider::{ModuleProvider, ProviderSet};
