use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to block shutdown signals: {0}")]
    Signal(#[from] nix::Error),

    #[error("failed to spawn signal listener: {0}")]
    Spawn(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
