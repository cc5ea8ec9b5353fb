/*!
Error handling for the HMI session crate.
*/

use std::io;
use thiserror::Error;

/// Result type for the HMI session crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the HMI session crate
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Serial link error
    #[error("Link error: {0}")]
    Link(String),

    /// Protocol error
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Unexpected byte where a result or presence code was required
    #[error("Invalid wire byte: {0:#04x}")]
    InvalidWireByte(u8),

    /// Key input source closed
    #[error("Input source closed")]
    InputClosed,
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::Io(io_error) => io_error,
            Error::Link(msg) => io::Error::new(io::ErrorKind::BrokenPipe, msg),
            Error::Protocol(msg) => io::Error::new(io::ErrorKind::InvalidData, msg),
            Error::InvalidWireByte(byte) => io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid wire byte: {:#04x}", byte),
            ),
            Error::InputClosed => {
                io::Error::new(io::ErrorKind::UnexpectedEof, "Input source closed")
            }
        }
    }
}

/// Convert a string to an Error::Link
pub fn link_err<T, S: Into<String>>(msg: S) -> Result<T> {
    Err(Error::Link(msg.into()))
}

/// Convert a string to an Error::Protocol
pub fn protocol_err<T, S: Into<String>>(msg: S) -> Result<T> {
    Err(Error::Protocol(msg.into()))
}
