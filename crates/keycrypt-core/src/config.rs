use keycrypt_crypto::HashAlgo;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{KeycryptError, KeycryptResult};

/// Top-level configuration (loaded from keycrypt.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeycryptConfig {
    pub crypto: CryptoConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    /// Environment variable holding the shared secret (default: KEYCRYPT_SECRET)
    pub secret_key_env: String,
    /// File holding the shared secret; a single trailing newline is ignored
    pub secret_key_file: Option<PathBuf>,
    /// Algorithm used when a command does not name one (default: sha256)
    pub default_algo: HashAlgo,
    /// Text encoding for encrypt/decrypt output: "base64" or "hex"
    pub encoding: TextEncoding,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// URL-safe alphabet, padded
    #[default]
    Base64,
    /// Lowercase hexadecimal
    Hex,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (default: warn)
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            secret_key_env: "KEYCRYPT_SECRET".into(),
            secret_key_file: None,
            default_algo: HashAlgo::Sha256,
            encoding: TextEncoding::Base64,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "text".into(),
        }
    }
}

impl KeycryptConfig {
    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> KeycryptResult<Self> {
        if !path.exists() {
            tracing::warn!("config file not found: {}  (using defaults)", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
            .map_err(|e| KeycryptError::Config(format!("parsing {}: {e}", path.display())))
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

impl CryptoConfig {
    /// Resolve the shared secret: `explicit` > `secret_key_env` > `secret_key_file`.
    pub fn resolve_secret(&self, explicit: Option<&str>) -> KeycryptResult<SecretString> {
        if let Some(secret) = explicit {
            return Ok(SecretString::from(secret.to_string()));
        }

        if let Ok(secret) = std::env::var(&self.secret_key_env) {
            tracing::debug!(var = %self.secret_key_env, "secret key from environment");
            return Ok(SecretString::from(secret));
        }

        if let Some(path) = &self.secret_key_file {
            let mut secret = std::fs::read_to_string(path).map_err(|e| {
                KeycryptError::Secret(format!("reading {}: {e}", path.display()))
            })?;
            if secret.ends_with('\n') {
                secret.pop();
                if secret.ends_with('\r') {
                    secret.pop();
                }
            }
            tracing::debug!(path = %path.display(), "secret key from file");
            return Ok(SecretString::from(secret));
        }

        Err(KeycryptError::Secret(format!(
            "no secret key: pass --key, set {}, or configure crypto.secret_key_file",
            self.secret_key_env
        )))
    }
}
