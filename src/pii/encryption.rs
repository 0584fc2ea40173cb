//! Field-level encryption
//!
//! Encrypted values are strings of the form `enc:v1:` + base64(nonce || ciphertext || tag).

use crate::utils::error::{FixzitError, Result};
use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, KeyInit},
};
use base64::{Engine as _, engine::general_purpose};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Marker prefix of encrypted field values
pub const ENCRYPTED_PREFIX: &str = "enc:v1:";

/// AES-256-GCM nonce size (96 bits / 12 bytes as recommended by NIST)
const AES_GCM_NONCE_SIZE: usize = 12;

/// AES-GCM authentication tag size
const AES_GCM_TAG_SIZE: usize = 16;

/// Derive a 256-bit key from arbitrary-length input using SHA-256
fn derive_key(secret: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(secret);
    hasher.finalize().into()
}

/// AES-256-GCM cipher for individual document fields
#[derive(Clone)]
pub struct FieldCipher {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for FieldCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldCipher")
            .field("algorithm", &"AES-256-GCM")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl FieldCipher {
    /// Create a cipher whose key is derived from `secret`
    pub fn new(secret: &str) -> Result<Self> {
        if secret.trim().is_empty() {
            return Err(FixzitError::crypto("Field encryption secret cannot be empty"));
        }

        let derived_key = derive_key(secret.as_bytes());
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&derived_key));
        Ok(Self { cipher })
    }

    /// Whether a value carries the encryption marker
    pub fn is_encrypted(value: &str) -> bool {
        value.starts_with(ENCRYPTED_PREFIX)
    }

    /// Encrypt a value; already-encrypted values are returned unchanged
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        if Self::is_encrypted(plaintext) {
            return Ok(plaintext.to_string());
        }

        let mut nonce_bytes = [0u8; AES_GCM_NONCE_SIZE];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| FixzitError::crypto(format!("Encryption failed: {}", e)))?;

        let mut output = Vec::with_capacity(AES_GCM_NONCE_SIZE + ciphertext.len());
        output.extend_from_slice(&nonce_bytes);
        output.extend_from_slice(&ciphertext);

        Ok(format!(
            "{}{}",
            ENCRYPTED_PREFIX,
            general_purpose::STANDARD.encode(&output)
        ))
    }

    /// Decrypt a value; values without the marker are returned unchanged
    pub fn decrypt(&self, value: &str) -> Result<String> {
        let Some(encoded) = value.strip_prefix(ENCRYPTED_PREFIX) else {
            return Ok(value.to_string());
        };

        let encrypted_bytes = general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| FixzitError::crypto(format!("Failed to decode encrypted value: {}", e)))?;

        if encrypted_bytes.len() < AES_GCM_NONCE_SIZE + AES_GCM_TAG_SIZE {
            return Err(FixzitError::crypto(
                "Encrypted value too short - possible corruption or tampering",
            ));
        }

        let (nonce_bytes, ciphertext) = encrypted_bytes.split_at(AES_GCM_NONCE_SIZE);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| {
                FixzitError::crypto(
                    "Decryption failed - value may have been tampered with or wrong key",
                )
            })?;

        String::from_utf8(plaintext)
            .map_err(|e| FixzitError::crypto(format!("Decrypted value is not UTF-8: {}", e)))
    }
}
