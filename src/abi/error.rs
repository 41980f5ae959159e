//! Error taxonomy for the ABI codec
//!
//! Every failure names the stage it arose in and the offending fragment,
//! so the CLI can print something actionable without extra context.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AbiError {
    /// Unbalanced brackets/parentheses or an unclosed quote while splitting.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("invalid signature: {0:?}")]
    InvalidSignature(String),

    #[error("invalid solidity function definition: {0:?}")]
    InvalidDeclaration(String),

    #[error("empty parameter in {0:?}")]
    EmptyParameter(String),

    #[error("unsupported type: {0:?}")]
    UnsupportedType(String),

    #[error("{what} expects {expected} items, got {got}")]
    ArityMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("invalid address: {0:?}")]
    InvalidAddress(String),

    #[error("invalid bool: {0:?}")]
    InvalidBool(String),

    #[error("bytes{expected} expects {expected} bytes, got {got} in {literal:?}")]
    SizeMismatch {
        expected: usize,
        got: usize,
        literal: String,
    },

    #[error("uint cannot be negative: {0:?}")]
    NegativeUnsigned(String),

    #[error("invalid hex: {0:?}")]
    InvalidHex(String),

    #[error("invalid integer: {0:?}")]
    InvalidInt(String),

    #[error("scientific value is not an integer after scaling: {0:?}")]
    NonIntegerScientific(String),

    #[error("integer does not fit in 256 bits: {0:?}")]
    IntegerOverflow(String),

    /// Conversion failure tagged with the positional argument it came from.
    #[error("argument {index} ({ty}): {source}")]
    Argument {
        index: usize,
        ty: String,
        #[source]
        source: Box<AbiError>,
    },

    #[error("element {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<AbiError>,
    },

    #[error("tuple field {index}: {source}")]
    Field {
        index: usize,
        #[source]
        source: Box<AbiError>,
    },

    #[error("packing failed: {0}")]
    PackingFailure(String),

    #[error("decode failed: {0}")]
    Decode(String),
}

impl AbiError {
    pub(crate) fn for_element(self, index: usize) -> Self {
        AbiError::Element {
            index,
            source: Box::new(self),
        }
    }

    pub(crate) fn for_field(self, index: usize) -> Self {
        AbiError::Field {
            index,
            source: Box::new(self),
        }
    }
}
