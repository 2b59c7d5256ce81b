//! Text rendering of the module tree.

use std::collections::HashSet;
use std::fmt::Write;

use crate::core::Module;
use crate::resolver::PackageRegistry;

/// Options for [`render_tree`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeOptions {
    /// Maximum depth to descend (None = unlimited)
    pub depth: Option<usize>,

    /// List each module's artifacts under it
    pub artifacts: bool,
}

/// Render the registry as a tree rooted at its root module.
///
/// Modules already printed are marked `(*)` and not expanded again.
pub fn render_tree(registry: &PackageRegistry, opts: TreeOptions) -> String {
    let mut out = String::new();
    let mut seen = HashSet::new();
    render(
        registry,
        registry.root(),
        0,
        opts,
        &mut seen,
        &mut out,
    );
    out
}

fn render<'a>(
    registry: &'a PackageRegistry,
    module: &'a Module,
    depth: usize,
    opts: TreeOptions,
    seen: &mut HashSet<&'a str>,
    out: &mut String,
) {
    if opts.depth.is_some_and(|max| depth > max) {
        return;
    }

    let prefix = if depth == 0 {
        String::new()
    } else {
        format!("{}├── ", "│   ".repeat(depth - 1))
    };

    let is_duplicate = !seen.insert(module.name());
    let marker = if is_duplicate {
        " (*)"
    } else if module.is_test_framework() {
        " [test framework]"
    } else {
        ""
    };
    let _ = writeln!(out, "{}{} ({}){}", prefix, module.name(), module.root_path(), marker);

    if is_duplicate {
        return;
    }

    if opts.artifacts {
        let indent = "│   ".repeat(depth);
        for artifact in module.artifacts() {
            let _ = writeln!(out, "{}  - {} [{}]", indent, artifact.name(), artifact.kind());
        }
    }

    for dep in registry.deps(module.name()) {
        render(registry, dep, depth + 1, opts, seen, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::MemoryProvider;

    fn diamond() -> PackageRegistry {
        let d = Module::new("d", "p/d").unwrap();
        let mut b = Module::new("b", "p/b").unwrap();
        b.depend_on(&d).unwrap();
        let mut c = Module::new("c", "p/c").unwrap();
        c.depend_on(&d).unwrap();
        let mut a = Module::new("a", "p/a").unwrap().with_test_executable();
        a.depend_on(&b).unwrap();
        a.depend_on(&c).unwrap();

        let mut provider = MemoryProvider::new("test")
            .with_module(b)
            .with_module(c)
            .with_module(d);
        PackageRegistry::build(a, &mut provider).unwrap()
    }

    #[test]
    fn test_render_tree_marks_repeats() {
        let tree = render_tree(&diamond(), TreeOptions::default());
        let expected = "\
a (p/a)
├── b (p/b)
│   ├── d (p/d)
├── c (p/c)
│   ├── d (p/d) (*)
";
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_render_tree_depth_and_artifacts() {
        let tree = render_tree(
            &diamond(),
            TreeOptions {
                depth: Some(0),
                artifacts: true,
            },
        );
        assert_eq!(
            tree,
            "a (p/a)\n  - a [main library]\n  - a_test [test executable]\n"
        );
    }
}
