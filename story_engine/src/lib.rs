//! # Story Engine
//!
//! The narrative side of the Forest Story adventure. This crate owns the story
//! graph, checks it for broken references before play, and walks it one choice
//! at a time while applying health effects from `story_rules`.
//!
//! ## Core Components
//!
//! - **story_graph**: Nodes, options, the validated graph, and the bundled content
//! - **session**: The traversal loop and the player I/O collaborator it talks to
//! - **error**: Content and session errors

pub mod error;
pub mod session;
pub mod story_graph;

pub use error::*;
pub use session::*;
pub use story_graph::*;
