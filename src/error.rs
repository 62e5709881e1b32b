use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NetError>;

/// Failures at the fallible edges of the monitor. The sampling core never
/// returns these; degraded states there are ordinary values.
#[derive(Error, Debug)]
pub enum NetError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// The interface vanished between enumeration and the counter read.
    #[error("interface not present: {0}")]
    InterfaceGone(String),
}
