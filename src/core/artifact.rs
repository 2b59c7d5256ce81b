//! Artifact definitions - what gets built.
//!
//! An Artifact is one buildable output of a module: its main library,
//! its test-support library, or its unit-test executable.

use std::fmt;

use serde::Serialize;

use crate::core::error::{DescriptorError, DescriptorResult};

/// The role an artifact plays inside its module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// The module's library, always present
    MainLibrary,

    /// Test-support library other modules' tests may link against
    TestLibrary,

    /// Unit-test executable
    TestExecutable,
}

impl ArtifactKind {
    /// All kinds, in the order a module declares them.
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::MainLibrary,
        ArtifactKind::TestLibrary,
        ArtifactKind::TestExecutable,
    ];

    /// Suffix appended to the module name to form the artifact name.
    pub fn suffix(&self) -> &'static str {
        match self {
            ArtifactKind::MainLibrary => "",
            ArtifactKind::TestLibrary => "_test_lib",
            ArtifactKind::TestExecutable => "_test",
        }
    }

    /// The artifact name this kind gets inside `module`.
    pub fn artifact_name(&self, module: &str) -> String {
        format!("{}{}", module, self.suffix())
    }

    /// Check if this is a library.
    pub fn is_library(&self) -> bool {
        matches!(self, ArtifactKind::MainLibrary | ArtifactKind::TestLibrary)
    }

    /// Get the typical file extension for this kind.
    pub fn extension(&self, os: &str) -> &'static str {
        match (self.is_library(), os) {
            (true, "windows") => "lib",
            (true, _) => "a",
            (false, "windows") => "exe",
            (false, _) => "",
        }
    }

    /// Get the typical file prefix for this kind.
    pub fn prefix(&self, os: &str) -> &'static str {
        if self.is_library() && os != "windows" {
            "lib"
        } else {
            ""
        }
    }

    /// Get the output filename for an artifact of this kind.
    pub fn output_filename(&self, name: &str, os: &str) -> String {
        let prefix = self.prefix(os);
        let ext = self.extension(os);
        if ext.is_empty() {
            format!("{}{}", prefix, name)
        } else {
            format!("{}{}.{}", prefix, name, ext)
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::MainLibrary => write!(f, "main library"),
            ArtifactKind::TestLibrary => write!(f, "test library"),
            ArtifactKind::TestExecutable => write!(f, "test executable"),
        }
    }
}

/// Identity of an artifact: owning module plus artifact name.
///
/// Artifact-to-artifact edges hold these instead of references, so the
/// whole graph stays owned by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ArtifactId {
    pub module: String,
    pub name: String,
}

impl ArtifactId {
    /// The id of the `kind` artifact of `module`.
    pub fn new(module: impl Into<String>, kind: ArtifactKind) -> Self {
        let module = module.into();
        let name = kind.artifact_name(&module);
        ArtifactId { module, name }
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.module, self.name)
    }
}

/// A buildable unit with its ordered dependency list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    #[serde(skip)]
    id: ArtifactId,

    name: String,

    kind: ArtifactKind,

    /// Insertion order is link order in generated projects
    dependencies: Vec<ArtifactId>,
}

impl Artifact {
    /// Create the `kind` artifact of `module` with no dependencies.
    pub fn new(module: &str, kind: ArtifactKind) -> Self {
        let id = ArtifactId::new(module, kind);
        Artifact {
            name: id.name.clone(),
            id,
            kind,
            dependencies: Vec::new(),
        }
    }

    pub fn id(&self) -> &ArtifactId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    pub fn dependencies(&self) -> &[ArtifactId] {
        &self.dependencies
    }

    /// Check if this artifact already declares `dep`.
    pub fn depends_on(&self, dep: &ArtifactId) -> bool {
        self.dependencies.contains(dep)
    }

    /// Append a dependency edge.
    ///
    /// A second identical edge is rejected with `DuplicateDependency`, an
    /// edge to the artifact itself with `CyclicDependency`.
    pub fn add_dependency(&mut self, dep: ArtifactId) -> DescriptorResult<()> {
        if dep == self.id {
            return Err(DescriptorError::cycle([
                self.id.to_string(),
                self.id.to_string(),
            ]));
        }
        if self.depends_on(&dep) {
            return Err(DescriptorError::DuplicateDependency {
                artifact: self.id.to_string(),
                dependency: dep.to_string(),
            });
        }

        self.dependencies.push(dep);
        Ok(())
    }

    /// Get the output filename for this artifact.
    pub fn output_filename(&self, os: &str) -> String {
        self.kind.output_filename(&self.name, os)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_names() {
        assert_eq!(ArtifactKind::MainLibrary.artifact_name("cbase"), "cbase");
        assert_eq!(ArtifactKind::TestLibrary.artifact_name("cbase"), "cbase_test_lib");
        assert_eq!(ArtifactKind::TestExecutable.artifact_name("cbase"), "cbase_test");
    }

    #[test]
    fn test_output_filename() {
        let lib = Artifact::new("cbase", ArtifactKind::MainLibrary);
        assert_eq!(lib.output_filename("linux"), "libcbase.a");
        assert_eq!(lib.output_filename("windows"), "cbase.lib");

        let exe = Artifact::new("cbase", ArtifactKind::TestExecutable);
        assert_eq!(exe.output_filename("linux"), "cbase_test");
        assert_eq!(exe.output_filename("windows"), "cbase_test.exe");
    }

    #[test]
    fn test_add_dependency_preserves_order() {
        let mut exe = Artifact::new("app", ArtifactKind::TestExecutable);
        exe.add_dependency(ArtifactId::new("app", ArtifactKind::MainLibrary))
            .unwrap();
        exe.add_dependency(ArtifactId::new("unittest", ArtifactKind::MainLibrary))
            .unwrap();

        let names: Vec<_> = exe.dependencies().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["app", "unittest"]);
    }

    #[test]
    fn test_duplicate_dependency_rejected() {
        let mut lib = Artifact::new("app", ArtifactKind::MainLibrary);
        let dep = ArtifactId::new("core", ArtifactKind::MainLibrary);
        lib.add_dependency(dep.clone()).unwrap();

        let err = lib.add_dependency(dep).unwrap_err();
        assert!(matches!(err, DescriptorError::DuplicateDependency { .. }));
        assert_eq!(lib.dependencies().len(), 1);
    }

    #[test]
    fn test_self_dependency_rejected() {
        let mut lib = Artifact::new("app", ArtifactKind::MainLibrary);
        let err = lib
            .add_dependency(ArtifactId::new("app", ArtifactKind::MainLibrary))
            .unwrap_err();
        assert!(matches!(err, DescriptorError::CyclicDependency { .. }));
        assert!(lib.dependencies().is_empty());
    }
}
