//! PackageRegistry - the immutable module graph.
//!
//! A registry is built once per generation run from a root module and a
//! module provider, and is read-only afterwards. It owns every module;
//! modules and artifacts refer to each other by name only.

use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::core::{
    Artifact, ArtifactId, DescriptorError, DescriptorResult, Module, ModuleProvider,
};
use crate::resolver::resolve_module;
use crate::util::hash::Fingerprint;

/// All modules reachable from a root module, each resolved exactly once.
#[derive(Debug, Clone)]
pub struct PackageRegistry {
    /// Name of the module being built
    root: String,

    /// Modules in resolution order (dependencies before dependents)
    modules: Vec<Module>,

    /// Map from module name to position in `modules`
    index: HashMap<String, usize>,

    /// Module dependency graph
    graph: DiGraph<String, ()>,

    /// Map from module name to node index
    nodes: HashMap<String, NodeIndex>,
}

/// Depth-first traversal state while building a registry.
struct Builder<'p> {
    provider: &'p mut dyn ModuleProvider,
    modules: Vec<Module>,
    index: HashMap<String, usize>,
    /// Modules currently being visited, outermost first
    in_progress: Vec<String>,
}

impl Builder<'_> {
    fn visit(&mut self, module: Module) -> DescriptorResult<()> {
        self.in_progress.push(module.name().to_string());

        for dep in module.dependencies() {
            if self.index.contains_key(dep) {
                continue;
            }
            if let Some(pos) = self.in_progress.iter().position(|n| n == dep) {
                let mut path = self.in_progress[pos..].to_vec();
                path.push(dep.clone());
                return Err(DescriptorError::CyclicDependency { path });
            }

            let fetched = self.provider.fetch_module(dep)?;
            if fetched.name() != dep.as_str() {
                return Err(DescriptorError::NameMismatch {
                    requested: dep.clone(),
                    found: fetched.name().to_string(),
                });
            }
            self.visit(fetched)?;
        }

        let mut module = module;
        let (modules, index) = (&self.modules, &self.index);
        resolve_module(&mut module, |name| index.get(name).map(|&i| &modules[i]));

        self.in_progress.pop();
        self.index
            .insert(module.name().to_string(), self.modules.len());
        self.modules.push(module);
        Ok(())
    }
}

impl PackageRegistry {
    /// Build the registry for `root`, fetching dependencies from `provider`.
    ///
    /// Traversal is depth-first and deduplicates by module name; the
    /// resolver runs on every visited module exactly once. Either the
    /// complete registry is returned or nothing is.
    pub fn build(root: Module, provider: &mut dyn ModuleProvider) -> DescriptorResult<Self> {
        let root_name = root.name().to_string();
        tracing::debug!("building registry for {}", root_name);

        let mut builder = Builder {
            provider,
            modules: Vec::new(),
            index: HashMap::new(),
            in_progress: Vec::new(),
        };
        builder.visit(root)?;

        let Builder { modules, index, .. } = builder;

        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();
        for module in &modules {
            nodes.insert(module.name().to_string(), graph.add_node(module.name().to_string()));
        }
        for module in &modules {
            let from = nodes[module.name()];
            for dep in module.dependencies() {
                if let Some(&to) = nodes.get(dep) {
                    graph.update_edge(from, to, ());
                }
            }
        }

        let registry = PackageRegistry {
            root: root_name,
            modules,
            index,
            graph,
            nodes,
        };
        registry.check_artifact_graph()?;

        tracing::debug!(
            "registry for {} holds {} modules",
            registry.root,
            registry.modules.len()
        );
        Ok(registry)
    }

    /// Verify that the artifact graph is acyclic.
    fn check_artifact_graph(&self) -> DescriptorResult<()> {
        let mut graph: DiGraph<&ArtifactId, ()> = DiGraph::new();
        let mut nodes = HashMap::new();
        for artifact in self.artifacts() {
            nodes.insert(artifact.id(), graph.add_node(artifact.id()));
        }
        for artifact in self.artifacts() {
            for dep in artifact.dependencies() {
                if let Some(&to) = nodes.get(dep) {
                    graph.add_edge(nodes[artifact.id()], to, ());
                }
            }
        }

        toposort(&graph, None).map(|_| ()).map_err(|cycle| {
            let id = graph[cycle.node_id()];
            DescriptorError::cycle([id.to_string(), id.to_string()])
        })
    }

    /// Get the root module.
    pub fn root(&self) -> &Module {
        // The root is always visited last.
        &self.modules[self.index[&self.root]]
    }

    /// Iterate over all modules, dependencies before dependents.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    /// Get a module by name.
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.index.get(name).map(|&i| &self.modules[i])
    }

    /// Get the number of modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// A registry always holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Check if a module with the given name is in the registry.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate over every artifact of every module.
    pub fn artifacts(&self) -> impl Iterator<Item = &Artifact> {
        self.modules.iter().flat_map(|m| m.artifacts())
    }

    /// Look up an artifact by id.
    pub fn artifact(&self, id: &ArtifactId) -> Option<&Artifact> {
        self.module(&id.module)?
            .artifacts()
            .find(|a| a.id() == id)
    }

    /// Direct module dependencies of `name`, in declaration order.
    pub fn deps(&self, name: &str) -> Vec<&Module> {
        self.module(name)
            .map(|m| {
                m.dependencies()
                    .iter()
                    .filter_map(|d| self.module(d))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Modules that depend directly on `name`.
    pub fn dependents(&self, name: &str) -> Vec<&Module> {
        let Some(&node) = self.nodes.get(name) else {
            return Vec::new();
        };

        let mut dependents: Vec<_> = self
            .graph
            .neighbors_directed(node, petgraph::Direction::Incoming)
            .filter_map(|n| self.module(&self.graph[n]))
            .collect();
        dependents.sort_by_key(|m| self.index[m.name()]);
        dependents
    }

    /// Everything `id` links against, transitively, in static-link order.
    ///
    /// Each artifact appears before the artifacts it depends on, and
    /// siblings keep their declaration order. `id` itself is not included.
    pub fn link_order(&self, id: &ArtifactId) -> Option<Vec<&Artifact>> {
        let start = self.artifact(id)?;

        let mut visited = HashSet::new();
        let mut post_order = Vec::new();
        self.post_order(start, &mut visited, &mut post_order);

        post_order.pop();
        post_order.reverse();
        Some(post_order)
    }

    fn post_order<'a>(
        &'a self,
        artifact: &'a Artifact,
        visited: &mut HashSet<&'a ArtifactId>,
        out: &mut Vec<&'a Artifact>,
    ) {
        if !visited.insert(artifact.id()) {
            return;
        }
        // Reverse so that after the final reversal siblings keep their order.
        for dep in artifact.dependencies().iter().rev() {
            if let Some(dep) = self.artifact(dep) {
                self.post_order(dep, visited, out);
            }
        }
        out.push(artifact);
    }

    /// Stable digest of the whole descriptor graph.
    ///
    /// Two registries with the same modules, artifacts and edges (in the
    /// same order) have the same fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut fp = Fingerprint::new();
        fp.update_str(&self.root);

        for module in &self.modules {
            fp.update_str(module.name())
                .update_str(module.root_path())
                .update_bool(module.is_test_framework());
            for dep in module.dependencies() {
                fp.update_str(dep);
            }
            fp.end_group();

            for artifact in module.artifacts() {
                fp.update_str(artifact.name());
                for dep in artifact.dependencies() {
                    fp.update_str(&dep.module).update_str(&dep.name);
                }
                fp.end_group();
            }
            fp.end_group();
        }

        fp.finish()
    }
}
