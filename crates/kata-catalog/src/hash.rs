#![deny(unsafe_code)]

use sha2::Digest;

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    hex::encode(digest)
}

/// Compare a pinned digest against computed bytes, ignoring case and
/// surrounding whitespace in the pin.
pub fn sha256_matches(expected: &str, bytes: &[u8]) -> bool {
    expected.trim().eq_ignore_ascii_case(&sha256_hex(bytes))
}
