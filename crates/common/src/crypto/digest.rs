use sha2::{Digest, Sha256};

/// Size of a SHA-256 digest in bytes
pub const DIGEST_SIZE: usize = 32;

/// Lowercase hex SHA-256 fingerprint of arbitrary input.
///
/// Used for site identity: the server stores `sha256_hex(secret)` at
/// registration and hands it back as the handshake challenge. No salt is
/// applied; the secret must carry its own entropy.
pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// The shared epoch derivation: `SHA-256(secret || epoch-as-string)`.
///
/// This single digest is consumed two ways by the protocol:
/// - as the AES-256 key for that epoch ([`derive_key`])
/// - hex-encoded, as the per-call authentication proof
///   ([`crate::crypto::generate_proof`])
///
/// A valid proof for epoch `e` therefore reveals the key bytes for epoch
/// `e`. The reuse is part of the wire format and is kept for
/// compatibility with existing stored records.
pub fn epoch_digest(secret: &str, epoch: i64) -> [u8; DIGEST_SIZE] {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(epoch.to_string().as_bytes());
    hasher.finalize().into()
}

/// Derive the epoch-scoped AES-256 key for a message.
pub fn derive_key(secret: &str, epoch: i64) -> [u8; DIGEST_SIZE] {
    epoch_digest(secret, epoch)
}
