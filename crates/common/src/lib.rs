/**
 * Cryptographic primitives for the veilbin protocol.
 *  - SHA-256 identity fingerprints
 *  - Epoch-scoped key derivation and auth proofs
 *  - AES-256-CBC payload encryption
 */
pub mod crypto;
/**
 * Wire protocol message types shared by the server
 *  handlers and the client facade. Field names are
 *  the wire names, verbatim.
 */
pub mod protocol;

pub mod prelude {
    pub use crate::crypto::{
        epoch_now, generate_proof, sha256_hex, verify_proof, CryptoError, EncryptedPayload,
    };
    pub use crate::protocol::ErrorBody;
}
