//! AES-256-CBC payload encryption.
//!
//! Plaintext is the canonical JSON string of the stored value. Every call
//! generates a fresh random 16-byte IV; ciphertext and IV travel as
//! lowercase hex. The key is re-derived per message from the secret and
//! the epoch, so there is nothing to persist between calls.

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use serde_json::Value;

use super::digest::derive_key;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Size of the AES-CBC initialization vector in bytes
pub const IV_SIZE: usize = 16;
/// Size of the AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// Errors that can occur during encryption/decryption
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("failed to generate iv: {0}")]
    Rng(String),
    #[error("failed to serialize plaintext: {0}")]
    Serialize(#[from] serde_json::Error),
    /// One failure class for every decrypt-side problem: wrong key, wrong
    /// epoch, corrupted or tampered payload, malformed hex. The protocol
    /// does not distinguish them.
    #[error("decryption failed")]
    Decryption,
}

/// A ciphertext and the IV it was encrypted under, both hex-encoded for
/// transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    pub ciphertext: String,
    pub iv: String,
}

/// Encrypt a JSON value under the epoch-scoped key.
pub fn encrypt(data: &Value, secret: &str, epoch: i64) -> Result<EncryptedPayload, CryptoError> {
    let plaintext = serde_json::to_string(data)?;
    let key = derive_key(secret, epoch);

    let mut iv = [0u8; IV_SIZE];
    getrandom::getrandom(&mut iv).map_err(|e| CryptoError::Rng(e.to_string()))?;

    let ciphertext = Aes256CbcEnc::new(&key.into(), &iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    Ok(EncryptedPayload {
        ciphertext: hex::encode(ciphertext),
        iv: hex::encode(iv),
    })
}

/// Decrypt a stored payload back into its JSON value.
///
/// The epoch must be the one the payload was encrypted under (a record's
/// own stored epoch, not the epoch of the retrieving call).
///
/// # Errors
///
/// Any mismatch (wrong secret, wrong epoch, malformed hex, bad padding,
/// non-JSON plaintext) yields [`CryptoError::Decryption`]. Garbage is
/// never returned as a successfully decrypted value.
pub fn decrypt(
    ciphertext: &str,
    iv: &str,
    secret: &str,
    epoch: i64,
) -> Result<Value, CryptoError> {
    let ciphertext = hex::decode(ciphertext).map_err(|_| CryptoError::Decryption)?;
    let iv_bytes = hex::decode(iv).map_err(|_| CryptoError::Decryption)?;
    let iv: [u8; IV_SIZE] = iv_bytes.try_into().map_err(|_| CryptoError::Decryption)?;

    let key = derive_key(secret, epoch);
    let plaintext = Aes256CbcDec::new(&key.into(), &iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| CryptoError::Decryption)?;

    let plaintext = String::from_utf8(plaintext).map_err(|_| CryptoError::Decryption)?;
    serde_json::from_str(&plaintext).map_err(|_| CryptoError::Decryption)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let data = json!({"x": 1, "note": "hello world"});
        let payload = encrypt(&data, "s3cr3t", 1700000000).unwrap();

        let recovered = decrypt(&payload.ciphertext, &payload.iv, "s3cr3t", 1700000000).unwrap();
        assert_eq!(recovered, data);
    }

    #[test]
    fn test_fresh_iv_per_call() {
        let data = json!({"x": 1});
        let a = encrypt(&data, "s3cr3t", 1700000000).unwrap();
        let b = encrypt(&data, "s3cr3t", 1700000000).unwrap();

        assert_ne!(a.iv, b.iv);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn test_wrong_secret_fails() {
        let data = json!({"balance": 42});
        let payload = encrypt(&data, "s3cr3t", 1700000000).unwrap();

        let result = decrypt(&payload.ciphertext, &payload.iv, "wrong", 1700000000);
        assert!(matches!(result, Err(CryptoError::Decryption)));
    }

    #[test]
    fn test_wrong_epoch_fails() {
        let data = json!({"balance": 42});
        let payload = encrypt(&data, "s3cr3t", 1700000000).unwrap();

        let result = decrypt(&payload.ciphertext, &payload.iv, "s3cr3t", 1700000001);
        assert!(matches!(result, Err(CryptoError::Decryption)));
    }

    #[test]
    fn test_corrupted_ciphertext_fails() {
        let data = json!({"x": 1});
        let mut payload = encrypt(&data, "s3cr3t", 1700000000).unwrap();

        // Flip a nibble in the last ciphertext block
        let last = payload.ciphertext.pop().unwrap();
        payload
            .ciphertext
            .push(if last == '0' { '1' } else { '0' });

        let result = decrypt(&payload.ciphertext, &payload.iv, "s3cr3t", 1700000000);
        assert!(matches!(result, Err(CryptoError::Decryption)));
    }

    #[test]
    fn test_malformed_hex_fails() {
        let result = decrypt("not hex!", "also not hex", "s3cr3t", 1700000000);
        assert!(matches!(result, Err(CryptoError::Decryption)));

        // Valid hex, wrong IV width
        let data = json!({"x": 1});
        let payload = encrypt(&data, "s3cr3t", 1700000000).unwrap();
        let result = decrypt(&payload.ciphertext, "00ff", "s3cr3t", 1700000000);
        assert!(matches!(result, Err(CryptoError::Decryption)));
    }

    #[test]
    fn test_nested_json_round_trip() {
        let data = json!({
            "user": {"name": "ada", "tags": ["a", "b"]},
            "counts": [1, 2, 3],
            "flag": true,
            "nothing": null
        });
        let payload = encrypt(&data, "another secret", 1690000000).unwrap();
        let recovered =
            decrypt(&payload.ciphertext, &payload.iv, "another secret", 1690000000).unwrap();
        assert_eq!(recovered, data);
    }
}
