pub mod config;
pub mod error;

pub use config::KeycryptConfig;
pub use error::{KeycryptError, KeycryptResult};
