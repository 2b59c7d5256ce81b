//! High-level operations.
//!
//! This module contains the implementation behind the modgraph commands.

pub mod resolve;
pub mod tree;

pub use resolve::load_registry;
pub use tree::{render_tree, TreeOptions};
