//! keycrypt-crypto: keyed hashing and authenticated encryption from one secret
//!
//! A shallow facade over audited RustCrypto primitives. Callers pick a
//! [`HashAlgo`] for HMAC digests and never choose cipher modes or nonces.
//!
//! Key usage:
//! ```text
//! Secret (caller-supplied string)
//!   ├── HMAC key for every digest (hash, check, hash_filename)
//!   └── AES-256-GCM key = hex(HMAC-MD5(secret, secret)) as 32 ASCII bytes
//!       └── Envelope: [12-byte random nonce][ciphertext][16-byte tag]
//! ```

pub mod algo;
pub mod driver;
pub mod envelope;
pub mod error;
pub mod hash;

pub use algo::{hash_size, HashAlgo};
pub use driver::Crypto;
pub use error::{CryptoError, CryptoResult};

/// Size of the derived AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// Size of an AES-GCM nonce (96-bit)
pub const NONCE_SIZE: usize = 12;

/// Size of a GCM authentication tag
pub const TAG_SIZE: usize = 16;
