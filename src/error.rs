//! # Error Types
//!
//! This module defines all error types for the harmony engine.
//!
//! Every error is a contract violation by the caller (an unknown key, a
//! malformed signature, bad configuration). Errors are raised at the boundary
//! of the offending call and that call performs no partial mutation.
//!
//! ## Error Types
//! - `InvalidKey` - Key identifier not present in the key table
//! - `InvalidSignature` - Signature spec is not `^(#|b){0,7}$`
//! - `InvalidClef` - Clef token other than treble/bass
//! - `KeyTable` - A key table document is malformed
//! - `LilyPond` - LilyPond chord input could not be parsed
//! - `Config` - Trainer configuration YAML is invalid
//!
//! ## Usage
//! ```rust
//! use harmony::{HarmonyError, KeySignature};
//!
//! match KeySignature::builtin("H major") {
//!     Ok(_) => unreachable!(),
//!     Err(HarmonyError::InvalidKey(key)) => assert_eq!(key, "H major"),
//!     Err(e) => panic!("unexpected error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HarmonyError {
    /// Unknown key identifier.
    ///
    /// # Example
    /// ```
    /// # use harmony::HarmonyError;
    /// let err = HarmonyError::InvalidKey("H".to_string());
    /// assert_eq!(err.to_string(), "Invalid key: H");
    /// ```
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Signature spec that is not a homogeneous run of 0-7 sharps or flats.
    ///
    /// # Example
    /// ```
    /// # use harmony::HarmonyError;
    /// let err = HarmonyError::InvalidSignature("#b".to_string());
    /// assert_eq!(err.to_string(), "Invalid signature: #b");
    /// ```
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// Clef token other than `treble` or `bass`.
    #[error("Invalid clef: {0}")]
    InvalidClef(String),

    /// Key table document that cannot be parsed or breaks the table shape.
    #[error("Invalid key table: {0}")]
    KeyTable(String),

    /// LilyPond chord text that cannot be converted to MIDI.
    ///
    /// # Example
    /// ```
    /// # use harmony::HarmonyError;
    /// let err = HarmonyError::LilyPond {
    ///     chord: "h e g".to_string(),
    ///     message: "missing or invalid note name in [h]".to_string(),
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "LilyPond error in chord <h e g>: missing or invalid note name in [h]"
    /// );
    /// ```
    #[error("LilyPond error in chord <{chord}>: {message}")]
    LilyPond { chord: String, message: String },

    /// Invalid trainer configuration.
    #[error("Invalid config: {0}")]
    Config(String),
}

impl HarmonyError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            HarmonyError::InvalidKey(_) => "invalidKey",
            HarmonyError::InvalidSignature(_) => "invalidSignature",
            HarmonyError::InvalidClef(_) => "invalidClef",
            HarmonyError::KeyTable(_) => "keyTable",
            HarmonyError::LilyPond { .. } => "lilyPond",
            HarmonyError::Config(_) => "config",
        }
    }
}
