//! Module - a named source tree and the artifacts built from it.
//!
//! Modules are assembled with a builder: `Module::new` gives the main
//! library, `with_test_library` / `with_test_executable` add the optional
//! test artifacts, and `depend_on` declares module-level dependencies.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::core::artifact::{Artifact, ArtifactId, ArtifactKind};
use crate::core::error::{DescriptorError, DescriptorResult};

/// A named collection of artifacts produced from one source tree.
#[derive(Debug, Clone, Serialize)]
pub struct Module {
    name: String,

    /// Logical source location, opaque to the descriptor model
    root_path: String,

    main_library: Artifact,

    #[serde(skip_serializing_if = "Option::is_none")]
    test_library: Option<Artifact>,

    #[serde(skip_serializing_if = "Option::is_none")]
    test_executable: Option<Artifact>,

    /// Names of the modules this one depends on, in declaration order
    depends_on: Vec<String>,

    test_framework: bool,

    /// Every module known to be reachable through `depends_on`, mapped to
    /// the chain of names leading to it.
    #[serde(skip)]
    reachable: BTreeMap<String, Vec<String>>,
}

/// Validate a module name.
pub fn validate_name(name: &str) -> DescriptorResult<()> {
    let reason = if name.is_empty() {
        "name must not be empty"
    } else if name.chars().any(char::is_whitespace) {
        "name must not contain whitespace"
    } else if name.contains(['/', '\\']) {
        "name must not contain path separators"
    } else {
        return Ok(());
    };

    Err(DescriptorError::InvalidName {
        name: name.to_string(),
        reason,
    })
}

impl Module {
    /// Create a module with a fresh main library named after it.
    pub fn new(name: impl Into<String>, root_path: impl Into<String>) -> DescriptorResult<Self> {
        let name = name.into();
        validate_name(&name)?;

        Ok(Module {
            main_library: Artifact::new(&name, ArtifactKind::MainLibrary),
            name,
            root_path: root_path.into(),
            test_library: None,
            test_executable: None,
            depends_on: Vec::new(),
            test_framework: false,
            reachable: BTreeMap::new(),
        })
    }

    /// Add the `<name>_test_lib` test-support library. Calling it again is a no-op.
    pub fn with_test_library(mut self) -> Self {
        if self.test_library.is_some() {
            return self;
        }

        let lib = Artifact::new(&self.name, ArtifactKind::TestLibrary);
        if let Some(exe) = self.test_executable.as_mut() {
            link(exe, lib.id().clone());
        }
        self.test_library = Some(lib);
        self
    }

    /// Add the `<name>_test` executable, linked to this module's own libraries.
    pub fn with_test_executable(mut self) -> Self {
        if self.test_executable.is_some() {
            return self;
        }

        let mut exe = Artifact::new(&self.name, ArtifactKind::TestExecutable);
        link(&mut exe, self.main_library.id().clone());
        if let Some(lib) = &self.test_library {
            link(&mut exe, lib.id().clone());
        }
        self.test_executable = Some(exe);
        self
    }

    /// Flag this module as a unit-test framework provider.
    ///
    /// Test executables of dependent modules link a framework's test
    /// library in addition to its main library.
    pub fn as_test_framework(mut self) -> Self {
        self.test_framework = true;
        self
    }

    /// Declare that this module depends on `other`.
    ///
    /// Fails with `CyclicDependency` if `other` is this module or already
    /// reaches it. Declaring the same dependency twice is a no-op.
    ///
    /// Reachability is copied from `other` at the time of the call, so a
    /// cycle closed through edges added to `other` afterwards is not seen
    /// here. `PackageRegistry::build` rejects such a graph.
    pub fn depend_on(&mut self, other: &Module) -> DescriptorResult<()> {
        if other.name == self.name {
            return Err(DescriptorError::cycle([&self.name, &self.name]));
        }
        if let Some(chain) = other.reachable.get(&self.name) {
            let mut path = vec![self.name.clone(), other.name.clone()];
            path.extend(chain.iter().cloned());
            return Err(DescriptorError::CyclicDependency { path });
        }

        if self.depends_on.contains(&other.name) {
            tracing::debug!("{} already depends on {}", self.name, other.name);
            return Ok(());
        }

        self.depends_on.push(other.name.clone());
        self.reachable
            .entry(other.name.clone())
            .or_insert_with(|| vec![other.name.clone()]);
        for (name, chain) in &other.reachable {
            self.reachable.entry(name.clone()).or_insert_with(|| {
                let mut via = vec![other.name.clone()];
                via.extend(chain.iter().cloned());
                via
            });
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    pub fn main_library(&self) -> &Artifact {
        &self.main_library
    }

    pub fn test_library(&self) -> Option<&Artifact> {
        self.test_library.as_ref()
    }

    pub fn test_executable(&self) -> Option<&Artifact> {
        self.test_executable.as_ref()
    }

    /// Names of the modules this one depends on, in declaration order.
    pub fn dependencies(&self) -> &[String] {
        &self.depends_on
    }

    pub fn is_test_framework(&self) -> bool {
        self.test_framework
    }

    /// Get an artifact by kind, if the module has one.
    pub fn artifact(&self, kind: ArtifactKind) -> Option<&Artifact> {
        match kind {
            ArtifactKind::MainLibrary => Some(&self.main_library),
            ArtifactKind::TestLibrary => self.test_library.as_ref(),
            ArtifactKind::TestExecutable => self.test_executable.as_ref(),
        }
    }

    pub(crate) fn artifact_mut(&mut self, kind: ArtifactKind) -> Option<&mut Artifact> {
        match kind {
            ArtifactKind::MainLibrary => Some(&mut self.main_library),
            ArtifactKind::TestLibrary => self.test_library.as_mut(),
            ArtifactKind::TestExecutable => self.test_executable.as_mut(),
        }
    }

    /// Iterate over the artifacts this module has.
    pub fn artifacts(&self) -> impl Iterator<Item = &Artifact> {
        ArtifactKind::ALL
            .into_iter()
            .filter_map(move |kind| self.artifact(kind))
    }

    /// The id of the `kind` artifact if this module has one.
    pub fn artifact_id(&self, kind: ArtifactKind) -> Option<ArtifactId> {
        self.artifact(kind).map(|a| a.id().clone())
    }
}

/// Add an edge, treating an already-present edge as done.
pub(crate) fn link(artifact: &mut Artifact, dep: ArtifactId) -> bool {
    match artifact.add_dependency(dep) {
        Ok(()) => true,
        Err(DescriptorError::DuplicateDependency { .. }) => false,
        Err(e) => {
            tracing::debug!("skipping edge on {}: {}", artifact.id(), e);
            false
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq for Module {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Module {}

impl std::hash::Hash for Module {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(artifact: &Artifact) -> Vec<&str> {
        artifact
            .dependencies()
            .iter()
            .map(|d| d.name.as_str())
            .collect()
    }

    #[test]
    fn test_new_module() {
        let module = Module::new("cbase", "github.com/jurgen-kluft/cbase").unwrap();
        assert_eq!(module.name(), "cbase");
        assert_eq!(module.root_path(), "github.com/jurgen-kluft/cbase");
        assert_eq!(module.main_library().name(), "cbase");
        assert!(module.main_library().dependencies().is_empty());
        assert!(module.test_library().is_none());
        assert!(module.test_executable().is_none());
    }

    #[test]
    fn test_invalid_names() {
        for bad in ["", "has space", "a/b", "a\\b"] {
            let err = Module::new(bad, "path").unwrap_err();
            assert!(
                matches!(err, DescriptorError::InvalidName { .. }),
                "{:?} accepted",
                bad
            );
        }
    }

    #[test]
    fn test_test_library_is_idempotent() {
        let module = Module::new("cbase", "p")
            .unwrap()
            .with_test_library()
            .with_test_library();
        assert_eq!(module.test_library().unwrap().name(), "cbase_test_lib");
        assert_eq!(module.artifacts().count(), 2);
    }

    #[test]
    fn test_executable_without_test_library() {
        let module = Module::new("cbase", "p").unwrap().with_test_executable();
        let exe = module.test_executable().unwrap();
        assert_eq!(exe.name(), "cbase_test");
        assert_eq!(names(exe), vec!["cbase"]);
    }

    #[test]
    fn test_executable_links_own_test_library() {
        let module = Module::new("cbase", "p")
            .unwrap()
            .with_test_library()
            .with_test_executable();
        assert_eq!(
            names(module.test_executable().unwrap()),
            vec!["cbase", "cbase_test_lib"]
        );

        // Added afterwards, the test library is still wired in.
        let late = Module::new("cbase", "p")
            .unwrap()
            .with_test_executable()
            .with_test_library();
        assert_eq!(
            names(late.test_executable().unwrap()),
            vec!["cbase", "cbase_test_lib"]
        );
    }

    #[test]
    fn test_depend_on_twice_is_noop() {
        let b = Module::new("b", "p").unwrap();
        let mut a = Module::new("a", "p").unwrap();
        a.depend_on(&b).unwrap();
        a.depend_on(&b).unwrap();
        assert_eq!(a.dependencies(), ["b".to_string()]);
    }

    #[test]
    fn test_direct_cycle_rejected() {
        let mut a = Module::new("a", "p").unwrap();
        let mut b = Module::new("b", "p").unwrap();
        a.depend_on(&b).unwrap();

        let err = b.depend_on(&a).unwrap_err();
        assert_eq!(err, DescriptorError::cycle(["b", "a", "b"]));
        assert!(b.dependencies().is_empty());
    }

    #[test]
    fn test_transitive_cycle_rejected() {
        let mut a = Module::new("a", "p").unwrap();
        let mut b = Module::new("b", "p").unwrap();
        let c = Module::new("c", "p").unwrap();
        b.depend_on(&c).unwrap();
        a.depend_on(&b).unwrap();

        // c is rebuilt here the way a provider would hand it out again.
        let mut c = Module::new("c", "p").unwrap();
        let err = c.depend_on(&a).unwrap_err();
        assert_eq!(err, DescriptorError::cycle(["c", "a", "b", "c"]));
    }

    #[test]
    fn test_self_dependency_rejected() {
        let mut a = Module::new("a", "p").unwrap();
        let same = Module::new("a", "p").unwrap();
        assert!(matches!(
            a.depend_on(&same),
            Err(DescriptorError::CyclicDependency { .. })
        ));
    }
}
