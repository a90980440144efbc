// model = "claude-opus-4-5"
// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! Site identities and content digests.
//!
//! Every site that authors operations is named by an ed25519 public key.
//! The key only serves as a stable, globally unique tie-break token in the
//! total order over operation identities; nothing here signs operations.

use blake3::Hasher;
use ed25519_dalek::SigningKey;
use rand_core::OsRng;
use serde::Deserialize;
use serde::Serialize;

/// A public key, 32 bytes on the ed25519 curve.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyPub(pub [u8; 32]);

/// A blake3 hash, 32 bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash(pub [u8; 32]);

/// Hash a message using blake3.
pub fn hash(message: &[u8]) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(message);
    let result = hasher.finalize();
    return Hash(*result.as_bytes());
}

impl KeyPub {
    /// Generate a fresh site key. The secret half is discarded.
    pub fn generate() -> KeyPub {
        let signing = SigningKey::generate(&mut OsRng);
        return KeyPub(signing.verifying_key().to_bytes());
    }
}

fn hex(bytes: &[u8]) -> String {
    return bytes.iter().map(|b| format!("{:02x}", b)).collect();
}

impl std::fmt::Debug for KeyPub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Eight hex digits are plenty to tell sites apart in logs.
        return write!(f, "KeyPub({})", hex(&self.0[..4]));
    }
}

impl std::fmt::Debug for Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write!(f, "Hash({})", hex(&self.0));
    }
}

impl std::fmt::Display for Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write!(f, "{}", hex(&self.0));
    }
}
