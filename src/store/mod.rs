//! Read-only access to node key-value databases

pub mod kv;

pub use kv::KvStore;
