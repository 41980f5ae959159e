//! trxkit — a command-line toolkit for TRON and EVM-style chains
//!
//! The heart of the crate is the ABI call-data codec in [`abi`]: signature
//! parsing, literal-to-value conversion and head/tail packing, exposed as
//! [`abi::encode_call_data`] and [`abi::selector`]. Around it sit address
//! conversion helpers, hex/time/hash utilities, a read-only key-value
//! store inspector and thin HTTP clients for TronGrid, TronScan and
//! JSON-RPC nodes.

pub mod abi;
pub mod address;
pub mod client;
pub mod commands;
pub mod config;
pub mod store;

pub use abi::{encode_call_data, selector, AbiError, FunctionSignature, TypeDescriptor, Value};
