//! ABI call-data codec
//!
//! Parses human-entered function signatures (bare `name(type,...)` or full
//! Solidity declarations), converts string literals into typed values and
//! packs them into standard ABI call data. Everything here is pure and
//! stateless; each call re-parses from scratch.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod lexer;
pub mod num;
pub mod signature;
pub mod types;
pub mod value;

pub use decoder::decode_params;
pub use encoder::{encode_call_data, encode_params, selector, selector_bytes};
pub use error::AbiError;
pub use signature::FunctionSignature;
pub use types::TypeDescriptor;
pub use value::Value;
