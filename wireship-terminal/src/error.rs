/// Errors raised by the terminal backend
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("terminal setup failed: {0}")]
    Setup(#[source] io::Error),

    #[error("terminal too small: {cols}x{rows} cells")]
    TooSmall { cols: u16, rows: u16 },

    #[error("frame output failed: {0}")]
    Frame(#[from] io::Error),

    #[error("terminal restore failed: {0}")]
    Restore(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, TerminalError>;
