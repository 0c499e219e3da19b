//! Error types for the FOD adapter

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("property error: {0}")]
    Property(String),

    #[error("wake lock error: {0}")]
    WakeLock(String),

    #[error("invalid handle: {0}")]
    InvalidHandle(String),
}
