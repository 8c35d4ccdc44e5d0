use thiserror::Error;

pub type CryptoResult<T> = Result<T, CryptoError>;

/// Every failure the facade can report. Messages carry the `crypto:` tag so
/// callers can tell facade errors apart once they are wrapped further up.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("crypto: invalid hash algorithm {0:?}")]
    InvalidAlgorithm(String),

    #[error("crypto: hasher rejected input: {0}")]
    HashWrite(String),

    #[error("crypto: cipher setup failed: {0}")]
    CipherSetup(String),

    #[error("crypto: random source failed: {0}")]
    RandomSource(String),

    #[error("crypto: authentication failed: {0}")]
    Authentication(String),

    #[error("crypto: decoding failed: {0}")]
    Encoding(String),
}

impl CryptoError {
    /// True for tampered, truncated, or wrong-key envelopes.
    pub fn is_authentication(&self) -> bool {
        matches!(self, CryptoError::Authentication(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_tagged() {
        let errors = [
            CryptoError::InvalidAlgorithm("whirlpool".into()),
            CryptoError::HashWrite("x".into()),
            CryptoError::CipherSetup("x".into()),
            CryptoError::RandomSource("x".into()),
            CryptoError::Authentication("x".into()),
            CryptoError::Encoding("x".into()),
        ];
        for err in errors {
            assert!(err.to_string().starts_with("crypto: "), "{err}");
        }
    }

    #[test]
    fn test_invalid_algorithm_names_the_input() {
        let err = CryptoError::InvalidAlgorithm("whirlpool".into());
        assert_eq!(err.to_string(), "crypto: invalid hash algorithm \"whirlpool\"");
    }

    #[test]
    fn test_is_authentication() {
        assert!(CryptoError::Authentication("bad tag".into()).is_authentication());
        assert!(!CryptoError::Encoding("bad hex".into()).is_authentication());
    }
}
