//! Deterministic note GUIDs.
//!
//! The GUID is derived from the hanzi alone so that regenerating the deck
//! updates existing notes in Anki instead of adding duplicates. The encoding
//! (SHA-256, first 8 bytes, base 91) matches what the common deck generators
//! emit, so decks produced by earlier tooling line up with ours.

use sha2::{Digest, Sha256};

const BASE91: &[u8; 91] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!#$%&()*+,-./:;<=>?@[]^_`{|}~";

pub fn guid_for(hanzi: &str) -> String {
    let digest = Sha256::digest(hanzi.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let mut value = u64::from_be_bytes(prefix);

    let mut reversed = Vec::new();
    while value > 0 {
        reversed.push(BASE91[(value % 91) as usize]);
        value /= 91;
    }
    reversed.reverse();
    // Every byte comes from the ASCII table above.
    String::from_utf8_lossy(&reversed).into_owned()
}
