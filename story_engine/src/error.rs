//! Error types for story content and playthroughs.

use crate::story_graph::NodeId;

/// Errors raised while building, loading, or querying a story graph.
#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    /// A non-ending node points at a node that does not exist.
    #[error("broken reference: node `{from}` points at missing node `{missing}`")]
    BrokenReference { from: NodeId, missing: NodeId },

    /// A lookup asked for a node that is not in the graph.
    #[error("unknown story node: `{0}`")]
    UnknownNode(NodeId),

    /// The same node id was added twice.
    #[error("duplicate story node: `{0}`")]
    DuplicateNode(NodeId),

    /// A node failed its construction checks.
    #[error("invalid story node: {reason}")]
    InvalidNode { reason: String },

    #[error("failed to read story content: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML story content: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse JSON story content: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that end a playthrough abnormally.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Story(#[from] StoryError),

    /// The player I/O returned an index outside `[1, max]`.
    #[error("choice {choice} is out of range 1-{max}")]
    InvalidChoice { choice: usize, max: usize },

    #[error("player I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
