//! # UI Error Types
//!
//! Numeric input is clamped, never rejected. The variants below are the
//! caller mistakes that cannot be clamped into something meaningful.

use thiserror::Error;

/// Errors that can occur while configuring or driving widgets.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// An options selector was asked to show a value it does not contain.
    #[error("invalid option: {value:?} is not one of the available options")]
    InvalidOption {
        /// The rejected value.
        value: String,
    },

    /// An options selector was constructed without any options.
    #[error("options selector {label:?} needs at least one option")]
    EmptyOptions {
        /// Label of the selector.
        label: String,
    },

    /// A pointer transition code outside `0..=3`.
    #[error("invalid pointer transition code: {0}")]
    InvalidTransition(u8),

    /// A colour string that is neither `#rgb` nor `#rrggbb`.
    #[error("invalid colour: {0:?}")]
    InvalidColor(String),

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for UI operations.
pub type UiResult<T> = Result<T, UiError>;
