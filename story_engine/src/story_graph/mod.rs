//! Story Graph module - the static narrative content.
//!
//! The graph consists of:
//! - **Nodes**: Narrative beats with text and an ordered list of options
//! - **Options**: Labeled edges carrying a health delta
//! - **Endings**: Nodes without options; reaching one ends the story

pub mod content;
mod graph;
mod node;

pub use graph::*;
pub use node::*;
