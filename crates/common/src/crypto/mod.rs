//! Cryptographic primitives for the veilbin protocol.
//!
//! The security model is deliberately small:
//!
//! - **Identity fingerprints**: a site's shared secret is never stored or
//!   transmitted; only its SHA-256 hex digest crosses the wire (the
//!   handshake challenge) or touches the database.
//! - **Epoch-scoped keys**: every encryption derives a fresh AES-256 key
//!   from `SHA-256(secret || epoch)` where `epoch` is the Unix second of
//!   the operation. There is no persistent key material anywhere.
//! - **Auth proofs**: the hex form of that same digest doubles as the
//!   per-call authentication proof. A proof for epoch `e` therefore also
//!   reveals the key bytes for epoch `e`; the reuse is part of the wire
//!   protocol and is kept for compatibility. See [`epoch_digest`].
//! - **Payload encryption**: AES-256-CBC with a random 16-byte IV per
//!   message, PKCS#7 padding, hex-encoded ciphertext and IV.

mod cipher;
mod digest;
mod proof;

pub use cipher::{decrypt, encrypt, CryptoError, EncryptedPayload, IV_SIZE, KEY_SIZE};
pub use digest::{derive_key, epoch_digest, sha256_hex, DIGEST_SIZE};
pub use proof::{epoch_now, generate_proof, verify_proof};
