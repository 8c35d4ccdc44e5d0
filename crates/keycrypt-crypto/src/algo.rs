//! Hash algorithm registry
//!
//! A closed set of keyed-hash constructions. Unknown identifiers can only
//! enter through [`str::parse`], which rejects them with
//! [`CryptoError::InvalidAlgorithm`]; once a [`HashAlgo`] exists it is valid.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

/// Digest algorithm used under HMAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HashAlgo {
    Md4,
    Md5,
    Sha1,
    Sha256,
    /// SHA-224 (the truncated SHA-256 variant)
    Sha224,
    Sha512,
    Sha512_224,
    Sha512_256,
    Sha384,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    /// Pre-standard Keccak padding, as used by Ethereum
    Keccak256,
    Keccak512,
}

impl HashAlgo {
    pub const ALL: [HashAlgo; 15] = [
        HashAlgo::Md4,
        HashAlgo::Md5,
        HashAlgo::Sha1,
        HashAlgo::Sha256,
        HashAlgo::Sha224,
        HashAlgo::Sha512,
        HashAlgo::Sha512_224,
        HashAlgo::Sha512_256,
        HashAlgo::Sha384,
        HashAlgo::Sha3_224,
        HashAlgo::Sha3_256,
        HashAlgo::Sha3_384,
        HashAlgo::Sha3_512,
        HashAlgo::Keccak256,
        HashAlgo::Keccak512,
    ];

    /// Digest length in bytes.
    pub const fn size(self) -> usize {
        match self {
            HashAlgo::Md4 | HashAlgo::Md5 => 16,
            HashAlgo::Sha1 => 20,
            HashAlgo::Sha224 | HashAlgo::Sha512_224 | HashAlgo::Sha3_224 => 28,
            HashAlgo::Sha256 | HashAlgo::Sha512_256 | HashAlgo::Sha3_256 | HashAlgo::Keccak256 => {
                32
            }
            HashAlgo::Sha384 | HashAlgo::Sha3_384 => 48,
            HashAlgo::Sha512 | HashAlgo::Sha3_512 | HashAlgo::Keccak512 => 64,
        }
    }

    /// Canonical lowercase identifier.
    pub const fn name(self) -> &'static str {
        match self {
            HashAlgo::Md4 => "md4",
            HashAlgo::Md5 => "md5",
            HashAlgo::Sha1 => "sha1",
            HashAlgo::Sha256 => "sha256",
            HashAlgo::Sha224 => "sha224",
            HashAlgo::Sha512 => "sha512",
            HashAlgo::Sha512_224 => "sha512/224",
            HashAlgo::Sha512_256 => "sha512/256",
            HashAlgo::Sha384 => "sha384",
            HashAlgo::Sha3_224 => "sha3-224",
            HashAlgo::Sha3_256 => "sha3-256",
            HashAlgo::Sha3_384 => "sha3-384",
            HashAlgo::Sha3_512 => "sha3-512",
            HashAlgo::Keccak256 => "keccak256",
            HashAlgo::Keccak512 => "keccak512",
        }
    }
}

/// Digest length for an algorithm identifier, or `None` when the identifier
/// is not in the registry.
pub fn hash_size(name: &str) -> Option<usize> {
    name.parse::<HashAlgo>().ok().map(HashAlgo::size)
}

impl fmt::Display for HashAlgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgo {
    type Err = CryptoError;

    /// Case-insensitive; `-`, `_` and `/` separators are ignored, so
    /// `SHA-256`, `sha_512/224` and `Keccak-256` all resolve.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | '/'))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let algo = match normalized.as_str() {
            "md4" => HashAlgo::Md4,
            "md5" => HashAlgo::Md5,
            "sha1" => HashAlgo::Sha1,
            "sha256" => HashAlgo::Sha256,
            "sha224" | "sha256224" => HashAlgo::Sha224,
            "sha512" => HashAlgo::Sha512,
            "sha512224" => HashAlgo::Sha512_224,
            "sha512256" => HashAlgo::Sha512_256,
            "sha384" => HashAlgo::Sha384,
            "sha3224" => HashAlgo::Sha3_224,
            "sha3256" => HashAlgo::Sha3_256,
            "sha3384" => HashAlgo::Sha3_384,
            "sha3512" => HashAlgo::Sha3_512,
            "keccak256" => HashAlgo::Keccak256,
            "keccak512" => HashAlgo::Keccak512,
            _ => return Err(CryptoError::InvalidAlgorithm(s.to_string())),
        };
        Ok(algo)
    }
}

impl TryFrom<String> for HashAlgo {
    type Error = CryptoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HashAlgo> for String {
    fn from(algo: HashAlgo) -> Self {
        algo.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes_match_registry() {
        let expected = [
            (HashAlgo::Md4, 16),
            (HashAlgo::Md5, 16),
            (HashAlgo::Sha1, 20),
            (HashAlgo::Sha256, 32),
            (HashAlgo::Sha224, 28),
            (HashAlgo::Sha512, 64),
            (HashAlgo::Sha512_224, 28),
            (HashAlgo::Sha512_256, 32),
            (HashAlgo::Sha384, 48),
            (HashAlgo::Sha3_224, 28),
            (HashAlgo::Sha3_256, 32),
            (HashAlgo::Sha3_384, 48),
            (HashAlgo::Sha3_512, 64),
            (HashAlgo::Keccak256, 32),
            (HashAlgo::Keccak512, 64),
        ];
        for (algo, size) in expected {
            assert_eq!(algo.size(), size, "{algo}");
        }
    }

    #[test]
    fn test_canonical_names_parse_back() {
        for algo in HashAlgo::ALL {
            assert_eq!(algo.name().parse::<HashAlgo>().unwrap(), algo);
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("SHA-256".parse::<HashAlgo>().unwrap(), HashAlgo::Sha256);
        assert_eq!("sha_512_224".parse::<HashAlgo>().unwrap(), HashAlgo::Sha512_224);
        assert_eq!("sha256/224".parse::<HashAlgo>().unwrap(), HashAlgo::Sha224);
        assert_eq!("SHA3_512".parse::<HashAlgo>().unwrap(), HashAlgo::Sha3_512);
        assert_eq!("Keccak-256".parse::<HashAlgo>().unwrap(), HashAlgo::Keccak256);
    }

    #[test]
    fn test_unknown_algorithm() {
        let err = "whirlpool".parse::<HashAlgo>().unwrap_err();
        assert_eq!(err, CryptoError::InvalidAlgorithm("whirlpool".into()));
        assert!("".parse::<HashAlgo>().is_err());
    }

    #[test]
    fn test_hash_size_sentinel() {
        assert_eq!(hash_size("sha256"), Some(32));
        assert_eq!(hash_size("keccak512"), Some(64));
        assert_eq!(hash_size("blake3"), None);
    }

    #[test]
    fn test_all_is_distinct() {
        let names: std::collections::HashSet<_> = HashAlgo::ALL.iter().map(|a| a.name()).collect();
        assert_eq!(names.len(), HashAlgo::ALL.len());
    }
}
