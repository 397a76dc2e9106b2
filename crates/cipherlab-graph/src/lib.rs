//! Dataflow-graph evaluation engine.
//!
//! An external node editor produces immutable [`GraphSnapshot`]s of wired
//! cryptographic primitives (plaintext, key, IV, counter, combine, cipher,
//! sink nodes). This crate evaluates them:
//!
//! - [`evaluate`] runs the demonstration XOR cipher across the graph,
//!   producing one value (or attached error) per node.
//! - [`resolve_inputs`]/[`run_cipher_node`] locate the producers feeding a
//!   cipher node under a chaining mode and dispatch to the real block
//!   ciphers and mode compositors.
//!
//! Snapshots are read-only: every evaluation returns fresh result values
//! and never mutates a node.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod codec;
mod error;
mod extract;
mod model;
mod resolver;
mod router;

pub use crate::codec::{
    bits_to_block, bits_to_bytes, block_to_bits, bytes_to_bits, hex_to_block, hex_to_bytes,
    text_pkcs7_to_block, text_to_block,
};
pub use crate::error::EngineError;
pub use crate::extract::{
    counter_value, des_key_bytes, iv_block, key_block, material_bytes, state_block,
};
pub use crate::model::{Edge, GraphSnapshot, Node, NodeKind, Payload};
pub use crate::resolver::{evaluate, NodeValue};
pub use crate::router::{resolve_inputs, run_cipher_node, sink_for, Direction, RouteInputs};
