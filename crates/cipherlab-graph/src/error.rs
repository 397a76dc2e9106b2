//! Engine-level error taxonomy.

use aes_core::AesError;
use cipherlab_modes::ModeError;
use thiserror::Error;

/// Errors produced while evaluating a graph snapshot.
///
/// Resolver errors are attached to the node that caused them (see
/// [`crate::NodeValue`]); router and extractor errors abort only the
/// requesting cipher node's computation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The demonstration cipher was fed bit strings of different lengths.
    #[error("operand length mismatch: {left} bits vs {right} bits")]
    LengthMismatch {
        /// Length of the first operand in bits.
        left: usize,
        /// Length of the second operand in bits.
        right: usize,
    },

    /// A hex or bit string could not be decoded.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// The graph wiring supplies no producer for a required input port.
    #[error("missing input: node {node} has nothing wired to port \"{port}\"")]
    MissingInput {
        /// Consumer node id.
        node: String,
        /// Unsatisfied port name.
        port: String,
    },

    /// Cipher- or mode-level failure.
    #[error(transparent)]
    Mode(#[from] ModeError),

    /// AES engine block error.
    #[error(transparent)]
    Aes(#[from] AesError),
}
