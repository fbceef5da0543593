//! # Request Cipher
//!
//! AES-256-GCM envelope used by the test PG.
//!
//! - Key: SHA-256 of the API key (32 bytes)
//! - Nonce: the configured IV, URL-safe base64, 12 bytes once decoded
//! - Tag: 128 bits, appended to the ciphertext
//! - Payload: URL-safe base64 without padding of `ciphertext || tag`
//!
//! The nonce is fixed by the provider contract, so every request under one
//! key reuses it.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use sha2::{Digest, Sha256};

use crate::domain::PgError;

/// GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// Encrypts request bodies for the test PG.
#[derive(Clone)]
pub struct PgCipher {
    cipher: Aes256Gcm,
    nonce: [u8; NONCE_LEN],
}

impl PgCipher {
    /// Derive the cipher from an API key and base64url IV.
    pub fn new(api_key: &str, iv: &str) -> Result<Self, PgError> {
        let key = Sha256::digest(api_key.as_bytes());
        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|e| PgError::InvalidConfig(format!("AES key: {}", e)))?;

        let iv_bytes = URL_SAFE_NO_PAD
            .decode(iv.trim().trim_end_matches('='))
            .map_err(|e| PgError::InvalidConfig(format!("IV is not base64url: {}", e)))?;
        let nonce: [u8; NONCE_LEN] = iv_bytes.as_slice().try_into().map_err(|_| {
            PgError::InvalidConfig(format!(
                "IV must decode to {} bytes, got {}",
                NONCE_LEN,
                iv_bytes.len()
            ))
        })?;

        Ok(Self { cipher, nonce })
    }

    /// Encrypt and encode a plaintext payload.
    pub fn seal(&self, plaintext: &[u8]) -> Result<String, PgError> {
        let sealed = self
            .cipher
            .encrypt(Nonce::from_slice(&self.nonce), plaintext)
            .map_err(|e| PgError::Encryption(e.to_string()))?;

        Ok(URL_SAFE_NO_PAD.encode(sealed))
    }

    /// Decode and decrypt a payload produced by [`PgCipher::seal`].
    pub fn open(&self, payload: &str) -> Result<Vec<u8>, PgError> {
        let sealed = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| PgError::Encryption(format!("payload is not base64url: {}", e)))?;

        self.cipher
            .decrypt(Nonce::from_slice(&self.nonce), sealed.as_slice())
            .map_err(|e| PgError::Encryption(e.to_string()))
    }
}

impl std::fmt::Debug for PgCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgCipher").finish_non_exhaustive()
    }
}
