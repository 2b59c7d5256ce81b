//! Module sources.
//!
//! Sources answer `fetch_module(name)` requests for the registry builder:
//! from modules built in code, or from a Modgraph.toml manifest.

pub mod manifest;
pub mod memory;

pub use manifest::ManifestProvider;
pub use memory::MemoryProvider;
