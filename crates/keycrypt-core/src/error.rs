use thiserror::Error;

pub type KeycryptResult<T> = Result<T, KeycryptError>;

#[derive(Debug, Error)]
pub enum KeycryptError {
    #[error("config error: {0}")]
    Config(String),

    #[error("secret key error: {0}")]
    Secret(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
