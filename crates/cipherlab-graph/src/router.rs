//! Chaining-mode router.
//!
//! Locates, for a cipher node under the active chaining mode, the nodes
//! producing its plaintext, key, IV/nonce, and counter, then dispatches to
//! the block ciphers and mode compositors. Resolution tries a direct port
//! match first and then a single hop through one intervening `CombineXor`
//! node; anything still unresolved is a [`EngineError::MissingInput`] and
//! the cipher is not invoked.
//!
//! Cipher and mode selections arrive as the editor's opaque string tags
//! (`"xor"`/`"aes"`/`"des"`, `"ecb"`/`"cbc"`/`"ctr"`), not enums.

use log::{debug, warn};

use cipherlab_modes::{
    cbc_decrypt, cbc_encrypt, ctr_transform, ecb_decrypt, ecb_encrypt, Aes128, BlockCipher,
    CtrLayout, Des, XorCipher,
};

use crate::error::EngineError;
use crate::extract::{counter_value, des_key_bytes, key_block, material_bytes};
use crate::model::{GraphSnapshot, Node, NodeKind};

/// Whether the routed cipher node encrypts or decrypts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Plaintext in, ciphertext out.
    Encrypt,
    /// Ciphertext in, plaintext out.
    Decrypt,
}

/// Producer node ids resolved for one cipher node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteInputs {
    /// Plaintext (or ciphertext, when decrypting) producer.
    pub plaintext: String,
    /// Key producer.
    pub key: String,
    /// IV producer for CBC, nonce producer for CTR.
    pub iv: Option<String>,
    /// Counter-start producer (CTR only).
    pub counter: Option<String>,
}

fn missing(node: &str, port: &str) -> EngineError {
    warn!("node {node}: nothing wired to port \"{port}\"");
    EngineError::MissingInput {
        node: node.to_string(),
        port: port.to_string(),
    }
}

/// Direct producer on `(node, port)`.
fn direct<'a>(graph: &'a GraphSnapshot, node: &str, port: &str) -> Option<&'a str> {
    graph.incoming(node, port).map(|edge| edge.source.as_str())
}

/// The `CombineXor` node wired into `(node, port)`, if any.
fn combine_into<'a>(graph: &'a GraphSnapshot, node: &str, port: &str) -> Option<&'a Node> {
    let source = direct(graph, node, port)?;
    graph
        .node(source)
        .filter(|n| n.kind == NodeKind::CombineXor)
}

/// The `CombineXor` node fed by this node's `"out"` port, if any.
fn combine_after<'a>(graph: &'a GraphSnapshot, node: &str) -> Option<&'a Node> {
    graph
        .outgoing(node)
        .filter_map(|edge| graph.node(&edge.target))
        .find(|n| n.kind == NodeKind::CombineXor)
}

/// Resolves the producers feeding `cipher_node` under `mode`.
pub fn resolve_inputs(
    graph: &GraphSnapshot,
    cipher_node: &str,
    mode: &str,
) -> Result<RouteInputs, EngineError> {
    let key = direct(graph, cipher_node, "key")
        .ok_or_else(|| missing(cipher_node, "key"))?
        .to_string();

    let inputs = match mode {
        "cbc" => {
            // Plaintext and IV may be wired straight in, or arrive through
            // the combine node that models the chaining XOR.
            let combine = combine_into(graph, cipher_node, "xor");
            let plaintext = direct(graph, cipher_node, "plaintext")
                .or_else(|| {
                    combine.and_then(|c| direct(graph, &c.id, "plaintext"))
                })
                .ok_or_else(|| missing(cipher_node, "plaintext"))?;
            let iv = direct(graph, cipher_node, "iv")
                .or_else(|| combine.and_then(|c| direct(graph, &c.id, "xor")))
                .ok_or_else(|| missing(cipher_node, "iv"))?;
            RouteInputs {
                plaintext: plaintext.to_string(),
                key,
                iv: Some(iv.to_string()),
                counter: None,
            }
        }
        "ctr" => {
            // The counter feeds the cipher; the plaintext meets the
            // keystream at the combine node downstream of it.
            let counter = direct(graph, cipher_node, "counter")
                .or_else(|| {
                    direct(graph, cipher_node, "plaintext").filter(|source| {
                        graph
                            .node(source)
                            .is_some_and(|n| n.kind == NodeKind::CounterSource)
                    })
                })
                .ok_or_else(|| missing(cipher_node, "counter"))?
                .to_string();
            let combine = combine_after(graph, cipher_node)
                .ok_or_else(|| missing(cipher_node, "plaintext"))?;
            let plaintext = direct(graph, &combine.id, "plaintext")
                .ok_or_else(|| missing(&combine.id, "plaintext"))?
                .to_string();
            let iv = direct(graph, cipher_node, "iv").map(str::to_string);
            RouteInputs {
                plaintext,
                key,
                iv,
                counter: Some(counter),
            }
        }
        // ECB and the demonstration path: plaintext wired straight in.
        _ => {
            let plaintext = direct(graph, cipher_node, "plaintext")
                .ok_or_else(|| missing(cipher_node, "plaintext"))?
                .to_string();
            RouteInputs {
                plaintext,
                key,
                iv: None,
                counter: None,
            }
        }
    };

    debug!(
        "node {cipher_node} ({mode}): plaintext <- {}, key <- {}, iv <- {:?}, counter <- {:?}",
        inputs.plaintext, inputs.key, inputs.iv, inputs.counter
    );
    Ok(inputs)
}

fn payload<'a>(graph: &'a GraphSnapshot, id: &str) -> Result<&'a crate::model::Payload, EngineError> {
    graph
        .node(id)
        .map(|n| &n.payload)
        .ok_or_else(|| missing(id, "out"))
}

fn build_cipher(
    graph: &GraphSnapshot,
    cipher_tag: &str,
    key_node: &str,
) -> Result<Box<dyn BlockCipher>, EngineError> {
    let key_payload = payload(graph, key_node)?;
    let cipher: Box<dyn BlockCipher> = match cipher_tag {
        "aes" => Box::new(Aes128::new(&key_block(key_payload)?).map_err(EngineError::from)?),
        "des" => Box::new(Des::new(&des_key_bytes(key_payload)?).map_err(EngineError::from)?),
        "xor" => {
            let key = material_bytes(key_payload)?;
            Box::new(XorCipher::new(&key, 16).map_err(EngineError::from)?)
        }
        other => {
            return Err(EngineError::InvalidEncoding(format!(
                "unknown cipher tag \"{other}\""
            )))
        }
    };
    Ok(cipher)
}

/// Resolves a cipher node's inputs, runs the selected cipher under the
/// selected chaining mode, and returns the fresh result bytes. Input nodes
/// are never mutated.
pub fn run_cipher_node(
    graph: &GraphSnapshot,
    cipher_node: &str,
    cipher_tag: &str,
    mode: &str,
    direction: Direction,
    layout: CtrLayout,
) -> Result<Vec<u8>, EngineError> {
    let inputs = resolve_inputs(graph, cipher_node, mode)?;
    let cipher = build_cipher(graph, cipher_tag, &inputs.key)?;
    let data = material_bytes(payload(graph, &inputs.plaintext)?)?;

    let result = match mode {
        "ecb" => match direction {
            Direction::Encrypt => ecb_encrypt(&*cipher, &data)?,
            Direction::Decrypt => ecb_decrypt(&*cipher, &data)?,
        },
        "cbc" => {
            let iv_node = inputs.iv.as_deref().ok_or_else(|| missing(cipher_node, "iv"))?;
            let iv = material_bytes(payload(graph, iv_node)?)?;
            match direction {
                Direction::Encrypt => cbc_encrypt(&*cipher, &iv, &data)?,
                Direction::Decrypt => cbc_decrypt(&*cipher, &iv, &data)?,
            }
        }
        "ctr" => {
            let counter_node = inputs
                .counter
                .as_deref()
                .ok_or_else(|| missing(cipher_node, "counter"))?;
            let counter = counter_value(payload(graph, counter_node)?)?;
            let nonce = match inputs.iv.as_deref() {
                Some(iv_node) => material_bytes(payload(graph, iv_node)?)?,
                None => Vec::new(),
            };
            // CTR is an involution; direction selects nothing.
            ctr_transform(&*cipher, &nonce, counter, layout, &data)?
        }
        other => {
            return Err(EngineError::InvalidEncoding(format!(
                "unknown mode tag \"{other}\""
            )))
        }
    };
    Ok(result)
}

/// Finds the `CiphertextSink` downstream of `node`, looking through at most
/// one combine node, so callers can attach the result.
pub fn sink_for<'a>(graph: &'a GraphSnapshot, node: &str) -> Option<&'a Node> {
    let mut frontier: Vec<&Node> = graph
        .outgoing(node)
        .filter_map(|edge| graph.node(&edge.target))
        .collect();
    for candidate in std::mem::take(&mut frontier) {
        match candidate.kind {
            NodeKind::CiphertextSink => return Some(candidate),
            NodeKind::CombineXor => frontier.extend(
                graph
                    .outgoing(&candidate.id)
                    .filter_map(|edge| graph.node(&edge.target)),
            ),
            _ => {}
        }
    }
    frontier
        .into_iter()
        .find(|n| n.kind == NodeKind::CiphertextSink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edge, Node, Payload};

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

    const KEY_HEX: &str = "2b7e151628aed2a6abf7158809cf4f3c";

    fn ecb_graph() -> GraphSnapshot {
        GraphSnapshot::new(
            vec![
                node("p", NodeKind::PlaintextSource, Payload::Text("attack at dawn".into())),
                node("k", NodeKind::KeySource, Payload::Hex(KEY_HEX.into())),
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

    fn cbc_graph() -> GraphSnapshot {
        GraphSnapshot::new(
            vec![
                node("p", NodeKind::PlaintextSource, Payload::Text("attack at dawn".into())),
                node("k", NodeKind::KeySource, Payload::Hex(KEY_HEX.into())),
                node("iv", NodeKind::IvSource, Payload::Hex("00".repeat(16))),
                node("x", NodeKind::CombineXor, Payload::Empty),
                node("c", NodeKind::CipherBlock, Payload::Empty),
                node("s", NodeKind::CiphertextSink, Payload::Empty),
            ],
            vec![
                edge("e1", "p", "x", "plaintext"),
                edge("e2", "iv", "x", "xor"),
                edge("e3", "x", "c", "xor"),
                edge("e4", "k", "c", "key"),
                edge("e5", "c", "s", "in"),
            ],
        )
    }

    fn ctr_graph() -> GraphSnapshot {
        GraphSnapshot::new(
            vec![
                node("p", NodeKind::PlaintextSource, Payload::Text("stream me".into())),
                node("k", NodeKind::KeySource, Payload::Hex(KEY_HEX.into())),
                node("n", NodeKind::IvSource, Payload::Text("nonce".into())),
                node("ctr", NodeKind::CounterSource, Payload::Text("7".into())),
                node("c", NodeKind::CipherBlock, Payload::Empty),
                node("x", NodeKind::CombineXor, Payload::Empty),
                node("s", NodeKind::CiphertextSink, Payload::Empty),
            ],
            vec![
                edge("e1", "ctr", "c", "counter"),
                edge("e2", "k", "c", "key"),
                edge("e3", "n", "c", "iv"),
                edge("e4", "c", "x", "xor"),
                edge("e5", "p", "x", "plaintext"),
                edge("e6", "x", "s", "in"),
            ],
        )
    }

    #[test]
    fn ecb_resolves_direct_wiring() {
        let inputs = resolve_inputs(&ecb_graph(), "c", "ecb").unwrap();
        assert_eq!(
            inputs,
            RouteInputs {
                plaintext: "p".into(),
                key: "k".into(),
                iv: None,
                counter: None,
            }
        );
    }

    #[test]
    fn ecb_run_matches_direct_compositor_call() {
        let result =
            run_cipher_node(&ecb_graph(), "c", "aes", "ecb", Direction::Encrypt, CtrLayout::default())
                .unwrap();
        let cipher = Aes128::new(&hex::decode(KEY_HEX).unwrap()).unwrap();
        let expected = ecb_encrypt(&cipher, b"attack at dawn").unwrap();
        assert_eq!(result, expected);

        let back = {
            let mut graph = ecb_graph();
            graph.nodes[0].payload = Payload::Binary(result.clone());
            run_cipher_node(&graph, "c", "aes", "ecb", Direction::Decrypt, CtrLayout::default())
                .unwrap()
        };
        assert_eq!(back, b"attack at dawn".to_vec());
    }

    #[test]
    fn cbc_resolves_through_the_combine_node() {
        let inputs = resolve_inputs(&cbc_graph(), "c", "cbc").unwrap();
        assert_eq!(inputs.plaintext, "p");
        assert_eq!(inputs.iv.as_deref(), Some("iv"));
    }

    #[test]
    fn cbc_run_matches_direct_compositor_call() {
        let result =
            run_cipher_node(&cbc_graph(), "c", "aes", "cbc", Direction::Encrypt, CtrLayout::default())
                .unwrap();
        let cipher = Aes128::new(&hex::decode(KEY_HEX).unwrap()).unwrap();
        let expected = cbc_encrypt(&cipher, &[0u8; 16], b"attack at dawn").unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn ctr_resolves_counter_and_downstream_plaintext() {
        let inputs = resolve_inputs(&ctr_graph(), "c", "ctr").unwrap();
        assert_eq!(inputs.counter.as_deref(), Some("ctr"));
        assert_eq!(inputs.plaintext, "p");
        assert_eq!(inputs.iv.as_deref(), Some("n"));
    }

    #[test]
    fn ctr_run_is_an_involution() {
        let once =
            run_cipher_node(&ctr_graph(), "c", "aes", "ctr", Direction::Encrypt, CtrLayout::default())
                .unwrap();
        let twice = {
            let mut graph = ctr_graph();
            graph.nodes[0].payload = Payload::Binary(once.clone());
            run_cipher_node(&graph, "c", "aes", "ctr", Direction::Decrypt, CtrLayout::default())
                .unwrap()
        };
        assert_eq!(twice, b"stream me".to_vec());
        assert_eq!(once.len(), b"stream me".len());
    }

    #[test]
    fn unwired_key_is_missing_input() {
        let graph = GraphSnapshot::new(
            vec![
                node("p", NodeKind::PlaintextSource, Payload::Text("x".into())),
                node("c", NodeKind::CipherBlock, Payload::Empty),
            ],
            vec![edge("e1", "p", "c", "plaintext")],
        );
        assert_eq!(
            resolve_inputs(&graph, "c", "ecb").unwrap_err(),
            EngineError::MissingInput {
                node: "c".into(),
                port: "key".into()
            }
        );
    }

    #[test]
    fn cbc_without_iv_is_missing_input() {
        let mut graph = cbc_graph();
        graph.edges.retain(|e| e.id != "e2");
        let graph = GraphSnapshot::new(graph.nodes, graph.edges);
        assert_eq!(
            resolve_inputs(&graph, "c", "cbc").unwrap_err(),
            EngineError::MissingInput {
                node: "c".into(),
                port: "iv".into()
            }
        );
    }

    #[test]
    fn des_key_rules_are_enforced() {
        let mut graph = ecb_graph();
        graph.nodes[1].payload = Payload::Text("not eight".into());
        let graph = GraphSnapshot::new(graph.nodes, graph.edges);
        let err = run_cipher_node(&graph, "c", "des", "ecb", Direction::Encrypt, CtrLayout::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::Mode(_)), "{err:?}");
    }

    #[test]
    fn des_run_round_trips() {
        let mut graph = ecb_graph();
        graph.nodes[1].payload = Payload::Text("8bytekey".into());
        let graph = GraphSnapshot::new(graph.nodes, graph.edges);
        let ct = run_cipher_node(&graph, "c", "des", "ecb", Direction::Encrypt, CtrLayout::default())
            .unwrap();

        let mut back_graph = graph.clone();
        back_graph.nodes[0].payload = Payload::Binary(ct);
        let back_graph = GraphSnapshot::new(back_graph.nodes, back_graph.edges);
        let pt = run_cipher_node(&back_graph, "c", "des", "ecb", Direction::Decrypt, CtrLayout::default())
            .unwrap();
        assert_eq!(pt, b"attack at dawn".to_vec());
    }

    #[test]
    fn unknown_tags_are_rejected() {
        assert!(run_cipher_node(&ecb_graph(), "c", "rot13", "ecb", Direction::Encrypt, CtrLayout::default()).is_err());
        assert!(run_cipher_node(&ecb_graph(), "c", "aes", "gcm", Direction::Encrypt, CtrLayout::default()).is_err());
    }

    #[test]
    fn sink_is_found_through_a_combine_node() {
        assert_eq!(sink_for(&ecb_graph(), "c").unwrap().id, "s");
        assert_eq!(sink_for(&ctr_graph(), "c").unwrap().id, "s");
        assert!(sink_for(&ecb_graph(), "s").is_none());
    }
}
