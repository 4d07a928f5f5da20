//! Error Types
//!
//! This module defines the error types used throughout the rig.
//!
//! # Overview
//!
//! The main error type [`GeckoError`] covers the failure modes that can only
//! happen while a rig is being set up:
//! - Missing or invalid joint references
//! - Invalid tuning settings
//! - Settings file I/O and JSON decoding
//! - Unknown debug commands
//!
//! Per-frame code never returns errors. Unsolvable IK geometry and ground
//! probe misses are recovered locally (see [`crate::animation::ik`] and
//! [`crate::animation::stepper`]).
//!
//! # Usage
//!
//! ```rust,ignore
//! use gecko_rig::errors::{GeckoError, Result};
//!
//! fn load() -> Result<GeckoSettings> {
//!     GeckoSettings::from_json_file("gecko.json")
//! }
//! ```

use thiserror::Error;

/// The main error type for the rig.
#[derive(Error, Debug)]
pub enum GeckoError {
    // ========================================================================
    // Rig Configuration Errors
    // ========================================================================
    /// A joint referenced by name does not exist in the skeleton.
    #[error("Joint not found: {0}")]
    MissingJoint(String),

    /// A joint handle is stale or does not belong to the skeleton.
    #[error("Invalid joint reference: {context}")]
    InvalidJoint {
        /// Description of what was being resolved
        context: String,
    },

    /// Two joints were registered under the same name.
    #[error("Duplicate joint name: {0}")]
    DuplicateJoint(String),

    // ========================================================================
    // Settings Errors
    // ========================================================================
    /// A tuning constant is out of its valid range.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ========================================================================
    // Tooling Errors
    // ========================================================================
    /// No command is registered under the requested name.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

/// Alias for `Result<T, GeckoError>`.
pub type Result<T> = std::result::Result<T, GeckoError>;
