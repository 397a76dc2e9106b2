//! Graph snapshot model.
//!
//! Nodes and edges arrive from the external editor as plain descriptors
//! (JSON via serde). A snapshot is immutable; the only behavior it carries
//! is lookup, backed by an incoming-edge index built once at construction
//! so router traversals never rescan the edge list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// What a node does in the dataflow graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Supplies plaintext material.
    PlaintextSource,
    /// Supplies key material.
    KeySource,
    /// Supplies an initialization vector (doubles as the CTR nonce).
    IvSource,
    /// Supplies the CTR counter start value.
    CounterSource,
    /// Applies the selected block cipher.
    CipherBlock,
    /// XOR-combines two inputs.
    CombineXor,
    /// Receives the final result.
    CiphertextSink,
}

/// Node payload; exactly one representation is authoritative at a time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "encoding", content = "value", rename_all = "snake_case")]
pub enum Payload {
    /// A string of `0`/`1` characters (other characters ignored).
    Bits(String),
    /// A hex string (non-hex characters ignored, even digit count).
    Hex(String),
    /// UTF-8 text taken as raw bytes.
    Text(String),
    /// UTF-8 text interpreted through PKCS#7 block derivation.
    TextPkcs7(String),
    /// Opaque binary handle (file or pixel-buffer bytes).
    Binary(Vec<u8>),
    /// Nothing wired in yet.
    Empty,
}

/// One node of the snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Editor-assigned identifier.
    pub id: String,
    /// Node role.
    pub kind: NodeKind,
    /// Authoritative data payload.
    pub payload: Payload,
}

/// One directed edge: `source.source_port -> target.target_port`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Editor-assigned identifier.
    pub id: String,
    /// Producing node id.
    pub source: String,
    /// Port on the producer, normally `"out"`.
    pub source_port: String,
    /// Consuming node id.
    pub target: String,
    /// Port on the consumer (`"plaintext"`, `"key"`, `"iv"`, `"counter"`,
    /// `"xor"`, `"in"`).
    pub target_port: String,
}

/// Immutable snapshot of the editor's node graph.
///
/// Deliberately not `Deserialize`: snapshots come in through
/// [`GraphSnapshot::from_json`] or [`GraphSnapshot::new`] so the incoming
/// index is always built.
#[derive(Clone, Debug, Serialize)]
pub struct GraphSnapshot {
    /// All nodes, in editor order.
    pub nodes: Vec<Node>,
    /// All edges, in editor order.
    pub edges: Vec<Edge>,
    /// Incoming-edge index: `(target id, target port) -> edge indices`.
    #[serde(skip)]
    incoming: HashMap<(String, String), Vec<usize>>,
}

impl GraphSnapshot {
    /// Builds a snapshot and its adjacency index.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let mut incoming: HashMap<(String, String), Vec<usize>> = HashMap::new();
        for (idx, edge) in edges.iter().enumerate() {
            incoming
                .entry((edge.target.clone(), edge.target_port.clone()))
                .or_default()
                .push(idx);
        }
        Self {
            nodes,
            edges,
            incoming,
        }
    }

    /// Deserializes a snapshot from editor JSON and builds the index.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        struct Raw {
            nodes: Vec<Node>,
            edges: Vec<Edge>,
        }
        let raw: Raw = serde_json::from_str(json)?;
        Ok(Self::new(raw.nodes, raw.edges))
    }

    /// Looks up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Returns the single honored incoming edge for `(node, port)`: the
    /// first matching edge in edge order. Later duplicates are ignored.
    pub fn incoming(&self, node: &str, port: &str) -> Option<&Edge> {
        self.incoming
            .get(&(node.to_string(), port.to_string()))
            .and_then(|indices| indices.first())
            .map(|&idx| &self.edges[idx])
    }

    /// All nodes of a given kind, in node order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    /// Edges leaving `node`, in edge order.
    pub fn outgoing<'a>(&'a self, node: &'a str) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |e| e.source == node)
    }
}
