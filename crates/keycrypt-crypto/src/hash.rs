//! HMAC hashing keyed by the facade secret
//!
//! Digests are returned as lowercase hex. [`Crypto::check`] compares with
//! plain string equality: fine for fingerprints, not for secret tokens.

use std::time::{SystemTime, UNIX_EPOCH};

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};

use crate::algo::HashAlgo;
use crate::driver::Crypto;
use crate::error::{CryptoError, CryptoResult};

impl Crypto {
    /// HMAC of `data` under the shared secret, hex encoded.
    pub fn hash(&self, data: impl AsRef<[u8]>, algo: HashAlgo) -> CryptoResult<String> {
        Ok(hex::encode(self.hash_raw(data, algo)?))
    }

    /// HMAC of `data` under the shared secret, as raw digest bytes.
    pub fn hash_raw(&self, data: impl AsRef<[u8]>, algo: HashAlgo) -> CryptoResult<Vec<u8>> {
        let data = data.as_ref();
        let digest = keyed_digest(self.secret_bytes(), data, algo)?;
        tracing::debug!(%algo, input_len = data.len(), "computed keyed hash");
        Ok(digest)
    }

    /// Recompute the digest of `data` and compare it to `hash`.
    ///
    /// Not constant-time. Do not use it to compare secret tokens.
    pub fn check(&self, data: impl AsRef<[u8]>, hash: &str, algo: HashAlgo) -> CryptoResult<bool> {
        Ok(self.hash(data, algo)? == hash)
    }

    /// Pseudo-unique name for `filename` that keeps its extension.
    ///
    /// Hashes `"<filename>-at-<nanos>"` where `nanos` is the nanosecond within
    /// the current second, then appends the original extension. Two calls in
    /// the same nanosecond produce the same name.
    pub fn hash_filename(&self, filename: &str, algo: HashAlgo) -> CryptoResult<String> {
        let nanos = subsec_nanos(SystemTime::now());
        let digest = self.hash(format!("{filename}-at-{nanos}"), algo)?;
        Ok(digest + extension(filename))
    }

    /// Digest length of `algo` in bytes.
    pub fn hash_size(&self, algo: HashAlgo) -> usize {
        algo.size()
    }
}

/// Nanosecond within the second of `now`, also for clocks set before 1970.
fn subsec_nanos(now: SystemTime) -> u32 {
    match now.duration_since(UNIX_EPOCH) {
        Ok(d) => d.subsec_nanos(),
        Err(e) => e.duration().subsec_nanos(),
    }
}

/// Suffix from the last `.` of the final path element, or `""`.
/// `archive.tar.gz` yields `.gz`, `.bashrc` yields `.bashrc`.
pub(crate) fn extension(filename: &str) -> &str {
    match filename.rfind(|c: char| c == '.' || c == '/') {
        Some(i) if filename[i..].starts_with('.') => &filename[i..],
        _ => "",
    }
}

pub(crate) fn keyed_digest(key: &[u8], data: &[u8], algo: HashAlgo) -> CryptoResult<Vec<u8>> {
    match algo {
        HashAlgo::Md4 => mac::<Hmac<md4::Md4>>(key, data),
        HashAlgo::Md5 => mac::<Hmac<md5::Md5>>(key, data),
        HashAlgo::Sha1 => mac::<Hmac<sha1::Sha1>>(key, data),
        HashAlgo::Sha256 => mac::<Hmac<sha2::Sha256>>(key, data),
        HashAlgo::Sha224 => mac::<Hmac<sha2::Sha224>>(key, data),
        HashAlgo::Sha512 => mac::<Hmac<sha2::Sha512>>(key, data),
        HashAlgo::Sha512_224 => mac::<Hmac<sha2::Sha512_224>>(key, data),
        HashAlgo::Sha512_256 => mac::<Hmac<sha2::Sha512_256>>(key, data),
        HashAlgo::Sha384 => mac::<Hmac<sha2::Sha384>>(key, data),
        HashAlgo::Sha3_224 => mac::<Hmac<sha3::Sha3_224>>(key, data),
        HashAlgo::Sha3_256 => mac::<Hmac<sha3::Sha3_256>>(key, data),
        HashAlgo::Sha3_384 => mac::<Hmac<sha3::Sha3_384>>(key, data),
        HashAlgo::Sha3_512 => mac::<Hmac<sha3::Sha3_512>>(key, data),
        HashAlgo::Keccak256 => mac::<Hmac<sha3::Keccak256>>(key, data),
        HashAlgo::Keccak512 => mac::<Hmac<sha3::Keccak512>>(key, data),
    }
}

fn mac<M: Mac + KeyInit>(key: &[u8], data: &[u8]) -> CryptoResult<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|e| CryptoError::HashWrite(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
