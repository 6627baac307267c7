//! Story Graph - the validated mapping from node id to node.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::{content, NodeId, StoryNode};
use crate::error::StoryError;

/// A reference from one node to a node that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenReference {
    pub from: NodeId,
    pub missing: NodeId,
}

/// The static story: every node keyed by id.
///
/// A graph is only handed out after [`validate`](Self::validate) has passed,
/// and it is never mutated afterwards, so one graph can back any number of
/// sessions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoryGraph {
    nodes: HashMap<NodeId, StoryNode>,
}

/// On-disk shape of story content.
#[derive(Debug, Deserialize)]
struct StoryDocument {
    #[serde(deserialize_with = "node_entries")]
    nodes: Vec<(NodeId, StoryNode)>,
}

/// Read the `nodes` map as entries in document order, keeping repeated ids so
/// the builder can reject them.
fn node_entries<'de, D>(deserializer: D) -> Result<Vec<(NodeId, StoryNode)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(NodeId, StoryNode)>;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a map of node ids to story nodes")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor)
}

impl StoryGraph {
    /// Build and validate the bundled forest story with default tuning.
    pub fn build() -> Result<Self, StoryError> {
        content::forest_story(&Default::default())
    }

    /// Start assembling a graph node by node.
    pub fn builder() -> StoryGraphBuilder {
        StoryGraphBuilder::default()
    }

    /// Check every node and validate references of an assembled map.
    pub fn from_nodes(nodes: HashMap<NodeId, StoryNode>) -> Result<Self, StoryError> {
        for (id, node) in &nodes {
            node.check().map_err(|err| match err {
                StoryError::InvalidNode { reason } => StoryError::InvalidNode {
                    reason: format!("node `{}`: {}", id, reason),
                },
                other => other,
            })?;
        }

        let graph = Self { nodes };
        graph.validate()?;
        Ok(graph)
    }

    /// Parse story content from TOML.
    pub fn from_toml_str(text: &str) -> Result<Self, StoryError> {
        let document: StoryDocument = toml::from_str(text)?;
        Self::from_entries(document.nodes)
    }

    /// Parse story content from JSON.
    pub fn from_json_str(text: &str) -> Result<Self, StoryError> {
        let document: StoryDocument = serde_json::from_str(text)?;
        Self::from_entries(document.nodes)
    }

    fn from_entries(entries: Vec<(NodeId, StoryNode)>) -> Result<Self, StoryError> {
        entries
            .into_iter()
            .fold(Self::builder(), |builder, (id, node)| builder.node(id, node))
            .build()
    }

    /// Load story content from a file; `.json` files are parsed as JSON,
    /// anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoryError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let graph = if is_json {
            Self::from_json_str(&text)?
        } else {
            Self::from_toml_str(&text)?
        };
        tracing::info!(path = %path.display(), nodes = graph.len(), "loaded story content");
        Ok(graph)
    }

    /// All references from non-ending nodes to missing nodes, ordered by
    /// source node id and then option order.
    pub fn broken_references(&self) -> Vec<BrokenReference> {
        let mut ids: Vec<&NodeId> = self.nodes.keys().collect();
        ids.sort();

        let mut broken = Vec::new();
        for id in ids {
            let node = &self.nodes[id];
            if node.is_ending() {
                continue;
            }
            for target in node.targets() {
                if !self.nodes.contains_key(target) {
                    broken.push(BrokenReference {
                        from: id.clone(),
                        missing: target.clone(),
                    });
                }
            }
        }
        broken
    }

    /// Confirm every option target exists.
    ///
    /// Fails on the first broken reference in the order of
    /// [`broken_references`](Self::broken_references).
    pub fn validate(&self) -> Result<(), StoryError> {
        let broken = self.broken_references();
        for reference in broken.iter().skip(1) {
            tracing::warn!(from = %reference.from, missing = %reference.missing, "broken reference");
        }

        match broken.into_iter().next() {
            Some(BrokenReference { from, missing }) => {
                tracing::error!(%from, %missing, "story graph failed validation");
                Err(StoryError::BrokenReference { from, missing })
            }
            None => {
                tracing::debug!(nodes = self.len(), "story graph validated");
                Ok(())
            }
        }
    }

    /// Confirm a start node exists before play.
    pub fn validate_start(&self, start: &str) -> Result<(), StoryError> {
        self.get(start).map(|_| ())
    }

    /// Get a node by id.
    pub fn get(&self, id: &str) -> Result<&StoryNode, StoryError> {
        self.nodes
            .get(id)
            .ok_or_else(|| StoryError::UnknownNode(NodeId::from(id)))
    }

    /// Check if a node exists.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Get the total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids, sorted.
    pub fn node_ids(&self) -> Vec<&NodeId> {
        let mut ids: Vec<_> = self.nodes.keys().collect();
        ids.sort();
        ids
    }

    /// All ending nodes.
    pub fn endings(&self) -> impl Iterator<Item = (&NodeId, &StoryNode)> {
        self.nodes.iter().filter(|(_, node)| node.is_ending())
    }
}

/// Collects nodes and validates the finished graph.
#[derive(Debug, Default)]
pub struct StoryGraphBuilder {
    nodes: HashMap<NodeId, StoryNode>,
    duplicate: Option<NodeId>,
}

impl StoryGraphBuilder {
    /// Add a node under the given id.
    pub fn node(mut self, id: impl Into<NodeId>, node: StoryNode) -> Self {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            self.duplicate.get_or_insert(id);
        } else {
            self.nodes.insert(id, node);
        }
        self
    }

    /// Finish the graph, rejecting duplicates and broken references.
    pub fn build(self) -> Result<StoryGraph, StoryError> {
        if let Some(id) = self.duplicate {
            return Err(StoryError::DuplicateNode(id));
        }
        StoryGraph::from_nodes(self.nodes)
    }
}
