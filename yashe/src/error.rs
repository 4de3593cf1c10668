use math::MathError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum YasheError {
    #[error(transparent)]
    Math(#[from] MathError),
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("no secret key invertible mod Q and mod t after {attempts} attempts")]
    KeyGeneration { attempts: usize },
    #[error("invalid plaintext: {0}")]
    InvalidPlaintext(String),
    #[error("invalid ciphertext: {0}")]
    InvalidCiphertext(String),
}

pub type Result<T> = std::result::Result<T, YasheError>;
