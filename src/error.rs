//! Error kinds for validation, dispatch, and profile storage

use thiserror::Error;

use crate::constants::device;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between a lighting request and the keyboard
#[derive(Error, Debug)]
pub enum Error {
    /// A field was supplied that the mode does not declare, a required field
    /// is missing, or a value could not be parsed at all
    #[error("invalid parameter '{field}': {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    /// A value parsed but falls outside its declared bounds
    #[error("{field} out of range: {value} (expected {min}-{max})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Neither device node exists; the facer kernel module is not loaded
    #[error("no RGB device found (neither {} nor {} exists)", device::DYNAMIC_NODE, device::STATIC_NODE)]
    DeviceNotFound,

    /// The external control tool is not at any known location
    #[error("control tool not found: {0}")]
    ToolNotFound(String),

    /// The external control tool ran and exited nonzero
    #[error("control tool failed: {stderr}")]
    Device { stderr: String },

    /// The external control tool did not exit within the bounded wait
    #[error("control tool did not exit within {seconds}s")]
    Timeout { seconds: u64 },

    /// Profile lookup or delete on an absent name
    #[error("no profile named '{0}'")]
    NotFound(String),

    /// Profile storage failed below the keyed-record abstraction
    #[error("profile storage: {0}")]
    Store(String),
}

impl Error {
    /// Shorthand for the most common construction
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}
