//! Demonstration-cipher value resolver.
//!
//! One pass in node order, no topological sort: the editor lays sources out
//! before their consumers, and cycles are its responsibility to reject.
//! Source nodes yield their raw bit string; cipher and combine nodes XOR
//! their two inputs bit by bit; the sink copies whatever reaches its `"in"`
//! port. Errors stick to the node that caused them so the rest of the graph
//! keeps rendering.

use std::collections::BTreeMap;

use crate::error::EngineError;
use crate::model::{GraphSnapshot, NodeKind, Payload};

/// Per-node outcome of one evaluation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeValue {
    /// A resolved bit-string value.
    Bits(String),
    /// Nothing wired in; displayed as a placeholder.
    Placeholder,
    /// Evaluation failed at this node; carries the error display string.
    Failed(String),
}

impl NodeValue {
    /// The bit string, if this node resolved.
    pub fn bits(&self) -> Option<&str> {
        match self {
            NodeValue::Bits(bits) => Some(bits),
            _ => None,
        }
    }
}

fn raw_bits(payload: &Payload) -> NodeValue {
    match payload {
        Payload::Bits(bits) => {
            NodeValue::Bits(bits.chars().filter(|c| *c == '0' || *c == '1').collect())
        }
        Payload::Empty => NodeValue::Placeholder,
        other => NodeValue::Failed(
            EngineError::InvalidEncoding(format!(
                "demonstration cipher expects bit strings, got {other:?}"
            ))
            .to_string(),
        ),
    }
}

fn xor_bits(left: &str, right: &str) -> Result<String, EngineError> {
    if left.len() != right.len() {
        return Err(EngineError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(left
        .chars()
        .zip(right.chars())
        .map(|(l, r)| if l != r { '1' } else { '0' })
        .collect())
}

/// Fetches the already-computed value of the producer wired to
/// `(node, port)`.
fn upstream<'a>(
    graph: &GraphSnapshot,
    values: &'a BTreeMap<String, NodeValue>,
    node: &str,
    port: &str,
) -> Option<&'a NodeValue> {
    let edge = graph.incoming(node, port)?;
    values.get(&edge.source)
}

fn combine(
    graph: &GraphSnapshot,
    values: &BTreeMap<String, NodeValue>,
    node: &str,
    left_port: &str,
    right_port: &str,
) -> NodeValue {
    let left = upstream(graph, values, node, left_port);
    let right = upstream(graph, values, node, right_port);
    match (left, right) {
        (Some(NodeValue::Bits(l)), Some(NodeValue::Bits(r))) => match xor_bits(l, r) {
            Ok(bits) => NodeValue::Bits(bits),
            Err(err) => NodeValue::Failed(err.to_string()),
        },
        // An unresolved or failed input leaves this node unresolved too.
        _ => NodeValue::Placeholder,
    }
}

/// Evaluates the demonstration XOR cipher across the snapshot, producing
/// one [`NodeValue`] per node id.
pub fn evaluate(graph: &GraphSnapshot) -> BTreeMap<String, NodeValue> {
    let mut values: BTreeMap<String, NodeValue> = BTreeMap::new();

    for node in &graph.nodes {
        let value = match node.kind {
            NodeKind::PlaintextSource
            | NodeKind::KeySource
            | NodeKind::IvSource
            | NodeKind::CounterSource => raw_bits(&node.payload),
            NodeKind::CipherBlock => combine(graph, &values, &node.id, "plaintext", "key"),
            NodeKind::CombineXor => combine(graph, &values, &node.id, "plaintext", "xor"),
            NodeKind::CiphertextSink => match upstream(graph, &values, &node.id, "in") {
                Some(value) => value.clone(),
                None => NodeValue::Placeholder,
            },
        };
        values.insert(node.id.clone(), value);
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edge, Node};

    fn node(id: &str, kind: NodeKind, payload: Payload) -> Node {
        Node {
            id: id.into(),
            kind,
            payload,
        }
    }

    fn edge(id: &str, source: &str, target: &str, target_port: &str) -> Edge {
        Edge {
            id: id.into(),
            source: source.into(),
            source_port: "out".into(),
            target: target.into(),
            target_port: target_port.into(),
        }
    }

    fn demo_graph(plain: &str, key: &str) -> GraphSnapshot {
        GraphSnapshot::new(
            vec![
                node("p", NodeKind::PlaintextSource, Payload::Bits(plain.into())),
                node("k", NodeKind::KeySource, Payload::Bits(key.into())),
                node("c", NodeKind::CipherBlock, Payload::Empty),
                node("s", NodeKind::CiphertextSink, Payload::Empty),
            ],
            vec![
                edge("e1", "p", "c", "plaintext"),
                edge("e2", "k", "c", "key"),
                edge("e3", "c", "s", "in"),
            ],
        )
    }

    #[test]
    fn xor_demo_reaches_the_sink() {
        let values = evaluate(&demo_graph("1010", "0101"));
        assert_eq!(values["c"], NodeValue::Bits("1111".into()));
        assert_eq!(values["s"], NodeValue::Bits("1111".into()));
    }

    #[test]
    fn length_mismatch_sticks_to_the_cipher_node() {
        let values = evaluate(&demo_graph("101", "0101"));
        match &values["c"] {
            NodeValue::Failed(msg) => assert!(msg.contains("3 bits vs 4 bits"), "{msg}"),
            other => panic!("expected failure, got {other:?}"),
        }
        // Sources still resolved; the sink shows a placeholder.
        assert_eq!(values["p"], NodeValue::Bits("101".into()));
        assert_eq!(values["s"], NodeValue::Placeholder);
    }

    #[test]
    fn whitespace_in_sources_is_ignored() {
        let values = evaluate(&demo_graph("10 10", "01 01"));
        assert_eq!(values["s"], NodeValue::Bits("1111".into()));
    }

    #[test]
    fn unwired_sink_shows_a_placeholder() {
        let graph = GraphSnapshot::new(
            vec![node("s", NodeKind::CiphertextSink, Payload::Empty)],
            vec![],
        );
        assert_eq!(evaluate(&graph)["s"], NodeValue::Placeholder);
    }

    #[test]
    fn combine_node_xors_its_ports() {
        let graph = GraphSnapshot::new(
            vec![
                node("p", NodeKind::PlaintextSource, Payload::Bits("1100".into())),
                node("iv", NodeKind::IvSource, Payload::Bits("1010".into())),
                node("x", NodeKind::CombineXor, Payload::Empty),
            ],
            vec![
                edge("e1", "p", "x", "plaintext"),
                edge("e2", "iv", "x", "xor"),
            ],
        );
        assert_eq!(evaluate(&graph)["x"], NodeValue::Bits("0110".into()));
    }
}
