//! AES-256-GCM envelopes under the facade secret
//!
//! Envelope format (binary):
//! ```text
//! [12 bytes: random nonce][N bytes: ciphertext][16 bytes: GCM tag]
//! ```
//!
//! No AAD, no version byte, no length prefix. The AES key is the 32 ASCII
//! characters of the hex HMAC-MD5 of the secret keyed by itself. Existing
//! ciphertexts depend on that exact derivation, so it must not change.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

use crate::algo::HashAlgo;
use crate::driver::Crypto;
use crate::error::{CryptoError, CryptoResult};
use crate::hash::keyed_digest;
use crate::{NONCE_SIZE, TAG_SIZE};

impl Crypto {
    /// Seal `plaintext` under a fresh random nonce.
    ///
    /// Returns: `[12-byte nonce][ciphertext][16-byte tag]`
    pub fn encrypt(&self, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        let cipher = self.cipher()?;

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng
            .try_fill_bytes(&mut nonce_bytes)
            .map_err(|e| CryptoError::RandomSource(e.to_string()))?;
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| CryptoError::CipherSetup(format!("sealing failed: {e}")))?;

        let mut result = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        result.extend_from_slice(&nonce_bytes);
        result.extend_from_slice(&ciphertext);
        tracing::debug!(plaintext_len = plaintext.len(), envelope_len = result.len(), "sealed envelope");
        Ok(result)
    }

    /// Open an envelope produced by [`Crypto::encrypt`].
    pub fn decrypt(&self, envelope: &[u8]) -> CryptoResult<Vec<u8>> {
        if envelope.len() < NONCE_SIZE + TAG_SIZE {
            tracing::warn!(envelope_len = envelope.len(), "rejected truncated envelope");
            return Err(CryptoError::Authentication(format!(
                "envelope too short: {} bytes (minimum {})",
                envelope.len(),
                NONCE_SIZE + TAG_SIZE
            )));
        }

        let (nonce_bytes, ciphertext) = envelope.split_at(NONCE_SIZE);
        let nonce = Nonce::from_slice(nonce_bytes);
        let cipher = self.cipher()?;

        let plaintext = cipher.decrypt(nonce, ciphertext).map_err(|_| {
            tracing::warn!(envelope_len = envelope.len(), "envelope failed authentication");
            CryptoError::Authentication("invalid key or corrupted data".into())
        })?;
        tracing::debug!(plaintext_len = plaintext.len(), "opened envelope");
        Ok(plaintext)
    }

    /// [`Crypto::encrypt`], hex encoded (lowercase).
    pub fn encrypt_hex(&self, plaintext: &[u8]) -> CryptoResult<String> {
        Ok(hex::encode(self.encrypt(plaintext)?))
    }

    /// Decode hex, then [`Crypto::decrypt`].
    pub fn decrypt_hex(&self, encoded: &str) -> CryptoResult<Vec<u8>> {
        let envelope = hex::decode(encoded).map_err(|e| CryptoError::Encoding(format!("hex: {e}")))?;
        self.decrypt(&envelope)
    }

    /// [`Crypto::encrypt`], URL-safe base64 with padding.
    pub fn encrypt_base64(&self, plaintext: &[u8]) -> CryptoResult<String> {
        Ok(URL_SAFE.encode(self.encrypt(plaintext)?))
    }

    /// Decode URL-safe base64, then [`Crypto::decrypt`].
    pub fn decrypt_base64(&self, encoded: &str) -> CryptoResult<Vec<u8>> {
        let envelope = URL_SAFE
            .decode(encoded)
            .map_err(|e| CryptoError::Encoding(format!("base64: {e}")))?;
        self.decrypt(&envelope)
    }

    /// hex(HMAC-MD5(secret, secret)) as key text. Bypasses the logged hash
    /// path so nothing about the secret reaches the logs.
    fn aes_key(&self) -> CryptoResult<Zeroizing<String>> {
        let secret = self.secret_bytes();
        let digest = Zeroizing::new(keyed_digest(secret, secret, HashAlgo::Md5)?);
        Ok(Zeroizing::new(hex::encode(digest.as_slice())))
    }

    fn cipher(&self) -> CryptoResult<Aes256Gcm> {
        let key = self.aes_key()?;
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|e| CryptoError::CipherSetup(e.to_string()))
    }
}
