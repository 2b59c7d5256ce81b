//! Handoff to project generators.
//!
//! A generator consumes a finished, read-only [`PackageRegistry`] and
//! turns it into project files. The descriptor model only signals success
//! or `GenerationFailed`; it never inspects what a generator produced.

use std::io::Write;

use serde::Serialize;

use crate::core::{DescriptorError, DescriptorResult, Module};
use crate::resolver::PackageRegistry;

/// Format version of the JSON descriptor document.
pub const DOCUMENT_VERSION: u32 = 1;

/// Something that turns a registry into project files.
pub trait Generator {
    /// Generate from `registry`, or reject it with `GenerationFailed`.
    fn generate(&mut self, registry: &PackageRegistry) -> DescriptorResult<()>;

    /// Get the generator name for display.
    fn name(&self) -> &str;
}

/// Hand `registry` to `generator`.
pub fn generate(registry: &PackageRegistry, generator: &mut dyn Generator) -> DescriptorResult<()> {
    tracing::debug!(
        "handing {} modules to the {} generator",
        registry.len(),
        generator.name()
    );
    generator.generate(registry).inspect_err(|e| {
        tracing::debug!("{} generator failed: {}", generator.name(), e);
    })
}

/// The JSON document written by [`JsonGenerator`].
#[derive(Debug, Serialize)]
pub struct RegistryDocument<'a> {
    pub version: u32,
    pub root: &'a str,
    pub fingerprint: String,
    /// Dependencies before dependents
    pub modules: Vec<&'a Module>,
}

impl<'a> RegistryDocument<'a> {
    pub fn new(registry: &'a PackageRegistry) -> Self {
        RegistryDocument {
            version: DOCUMENT_VERSION,
            root: registry.root().name(),
            fingerprint: registry.fingerprint(),
            modules: registry.modules().collect(),
        }
    }
}

/// Writes the registry as a JSON descriptor document, the input format of
/// out-of-process project generators.
pub struct JsonGenerator<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonGenerator<W> {
    pub fn new(writer: W) -> Self {
        JsonGenerator {
            writer,
            pretty: true,
        }
    }

    /// Toggle pretty-printing.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn validate(registry: &PackageRegistry) -> DescriptorResult<()> {
        if let Some(module) = registry.modules().find(|m| m.root_path().is_empty()) {
            return Err(DescriptorError::GenerationFailed {
                reason: format!("module `{}` has no root path", module.name()),
            });
        }
        Ok(())
    }
}

impl<W: Write> Generator for JsonGenerator<W> {
    fn generate(&mut self, registry: &PackageRegistry) -> DescriptorResult<()> {
        Self::validate(registry)?;

        let document = RegistryDocument::new(registry);
        let written = if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &document)
        } else {
            serde_json::to_writer(&mut self.writer, &document)
        };

        written
            .map_err(|e| e.to_string())
            .and_then(|()| writeln!(self.writer).map_err(|e| e.to_string()))
            .map_err(|reason| DescriptorError::GenerationFailed { reason })
    }

    fn name(&self) -> &str {
        "json"
    }
}
