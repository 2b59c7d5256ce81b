//! Descriptor error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// Result type for descriptor construction.
pub type DescriptorResult<T> = std::result::Result<T, DescriptorError>;

/// A rejected build declaration.
///
/// All of these are local construction errors: nothing is retried and no
/// partial registry is handed out once one is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum DescriptorError {
    #[error("invalid module name `{name}`: {reason}")]
    #[diagnostic(code(modgraph::descriptor::invalid_name))]
    InvalidName { name: String, reason: &'static str },

    #[error("`{artifact}` already depends on `{dependency}`")]
    #[diagnostic(code(modgraph::descriptor::duplicate_dependency))]
    DuplicateDependency { artifact: String, dependency: String },

    #[error("cyclic dependency: {}", .path.join(" -> "))]
    #[diagnostic(
        code(modgraph::descriptor::cyclic_dependency),
        help("Break the cycle by moving shared code into a separate module")
    )]
    CyclicDependency { path: Vec<String> },

    #[error("no module named `{name}` is available from `{source_name}`")]
    #[diagnostic(code(modgraph::descriptor::unknown_module))]
    UnknownModule { name: String, source_name: String },

    #[error("requested module `{requested}` but the provider returned `{found}`")]
    #[diagnostic(code(modgraph::descriptor::name_mismatch))]
    NameMismatch { requested: String, found: String },

    #[error("generator rejected the registry: {reason}")]
    #[diagnostic(code(modgraph::generate::failed))]
    GenerationFailed { reason: String },
}

impl DescriptorError {
    /// Shorthand for a cycle closing back on `path[0]`.
    pub fn cycle(path: impl IntoIterator<Item = impl Into<String>>) -> Self {
        DescriptorError::CyclicDependency {
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            DescriptorError::InvalidName { name, reason } => {
                Diagnostic::error(format!("invalid module name `{}`", name))
                    .with_context(reason.to_string())
                    .with_suggestion(
                        "Use a non-empty identifier without whitespace or path separators",
                    )
            }

            DescriptorError::DuplicateDependency {
                artifact,
                dependency,
            } => Diagnostic::error(format!(
                "`{}` declares `{}` more than once",
                artifact, dependency
            ))
            .with_suggestion(format!("Remove the repeated `{}` entry", dependency)),

            DescriptorError::CyclicDependency { path } => {
                Diagnostic::error("cycle detected in module graph")
                    .with_context(format!("cycle: {}", path.join(" -> ")))
                    .with_suggestion(
                        "Break the cycle by removing or restructuring dependencies",
                    )
            }

            DescriptorError::UnknownModule { name, source_name } => {
                Diagnostic::error(format!("could not find module `{}`", name))
                    .with_context(format!("searched: {}", source_name))
                    .with_suggestion("Check that the module name is spelled correctly")
                    .with_suggestion(crate::util::diagnostic::suggestions::UNKNOWN_MODULE)
            }

            DescriptorError::NameMismatch { requested, found } => Diagnostic::error(format!(
                "module provider answered `{}` with `{}`",
                requested, found
            ))
            .with_context("two distinct modules cannot share a name in one registry"),

            DescriptorError::GenerationFailed { reason } => {
                Diagnostic::error("project generation failed").with_context(reason.clone())
            }
        }
    }
}
