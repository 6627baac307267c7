//! Story node definitions - the narrative beats of the graph.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use story_rules::Outcome;

use crate::error::StoryError;

/// Identifier of a story node, e.g. `"start"` or `"look_around"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A labeled edge to another node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryOption {
    pub target: NodeId,
    pub label: String,
    /// Applied to the player's health when this option is taken. Never positive.
    #[serde(default)]
    pub health_delta: i32,
}

/// One narrative beat: text plus the choices leading away from it.
///
/// A node without options is an ending. Nodes are immutable once built; use
/// [`StoryNode::builder`] to assemble one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryNode {
    text: String,
    #[serde(default)]
    outcome: Outcome,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    options: Vec<StoryOption>,
}

impl StoryNode {
    /// Start building a node.
    pub fn builder() -> StoryNodeBuilder {
        StoryNodeBuilder::default()
    }

    /// Shorthand for an ending node with the given outcome.
    pub fn ending(text: impl Into<String>, outcome: Outcome) -> Result<Self, StoryError> {
        Self::builder().text(text).outcome(outcome).build()
    }

    /// Narrative text shown on arrival.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Options in display order; empty for an ending.
    pub fn options(&self) -> &[StoryOption] {
        &self.options
    }

    /// Outcome reported if the story stops here.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Check if this node is an ending (no further options).
    pub fn is_ending(&self) -> bool {
        self.options.is_empty()
    }

    /// Labels in display order.
    pub fn labels(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.label.as_str()).collect()
    }

    /// Target ids in display order.
    pub fn targets(&self) -> impl Iterator<Item = &NodeId> {
        self.options.iter().map(|o| &o.target)
    }

    /// Construction checks shared by the builder and deserialized content.
    pub(crate) fn check(&self) -> Result<(), StoryError> {
        if self.text.trim().is_empty() {
            return Err(invalid("text must not be empty"));
        }
        for (index, option) in self.options.iter().enumerate() {
            if option.target.as_str().trim().is_empty() {
                return Err(invalid(format!("option {} has an empty target", index + 1)));
            }
            if option.label.trim().is_empty() {
                return Err(invalid(format!(
                    "option {} (to `{}`) has an empty label",
                    index + 1,
                    option.target
                )));
            }
            if option.health_delta > 0 {
                return Err(invalid(format!(
                    "option {} (to `{}`) has positive health delta {}",
                    index + 1,
                    option.target,
                    option.health_delta
                )));
            }
        }
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> StoryError {
    StoryError::InvalidNode {
        reason: reason.into(),
    }
}

/// Accumulates text and option triples, checked once in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct StoryNodeBuilder {
    text: Option<String>,
    options: Vec<StoryOption>,
    outcome: Outcome,
}

impl StoryNodeBuilder {
    /// Set the narrative text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add an option leading to `target`.
    pub fn option(
        mut self,
        target: impl Into<NodeId>,
        label: impl Into<String>,
        health_delta: i32,
    ) -> Self {
        self.options.push(StoryOption {
            target: target.into(),
            label: label.into(),
            health_delta,
        });
        self
    }

    /// Set the outcome reported when this node ends the story.
    pub fn outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Finalize the node.
    pub fn build(self) -> Result<StoryNode, StoryError> {
        let text = self.text.ok_or_else(|| invalid("text is required"))?;
        let node = StoryNode {
            text,
            outcome: self.outcome,
            options: self.options,
        };
        node.check()?;
        Ok(node)
    }
}
