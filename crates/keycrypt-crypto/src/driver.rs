//! The keyed crypto facade
//!
//! [`Crypto`] holds one shared secret and nothing else. Hashing lives in
//! [`crate::hash`], the AES-GCM envelope in [`crate::envelope`].

use secrecy::{ExposeSecret, SecretString};

/// Hashing and authenticated encryption driven by a single secret key.
///
/// Immutable after construction and `Send + Sync`: share it by reference or
/// behind an `Arc` without locking.
pub struct Crypto {
    secret: SecretString,
}

impl Crypto {
    /// Build a facade over `secret`. Any string is accepted, including the
    /// empty one, since HMAC takes keys of arbitrary length.
    pub fn new(secret: impl Into<String>) -> Self {
        Self::from_secret(SecretString::from(secret.into()))
    }

    pub fn from_secret(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Raw bytes of the shared secret (the HMAC key).
    pub(crate) fn secret_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

impl std::fmt::Debug for Crypto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crypto")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let crypto = Crypto::new("hunter2");
        let rendered = format!("{crypto:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_secret_bytes() {
        let crypto = Crypto::from_secret(SecretString::from("secret"));
        assert_eq!(crypto.secret_bytes(), b"secret");
    }

    #[test]
    fn test_facade_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Crypto>();
    }
}
