//! Hash helper: sha256 and keccak256 over hex or text input

use alloy_primitives::keccak256;
use anyhow::Result;
use sha2::{Digest, Sha256};

use super::{from_hex_input, Report};

/// `hash <data>` — `0x`-prefixed input is hashed as bytes, anything else
/// as its UTF-8 text.
pub fn digest(input: &str) -> Result<()> {
    let data = from_hex_input(input).unwrap_or_else(|| input.as_bytes().to_vec());
    let sha = Sha256::digest(&data);
    let keccak = keccak256(&data);
    Report::new()
        .add("sha256", format!("0x{}", hex::encode(sha)))
        .add("keccak256", format!("0x{keccak:x}"))
        .print();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak_of_empty() {
        // sanity anchor for the hasher wiring
        let hash = keccak256(b"");
        assert_eq!(
            format!("{hash:x}"),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_sha256_of_abc() {
        let hash = Sha256::digest(b"abc");
        assert_eq!(
            hex::encode(hash),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
