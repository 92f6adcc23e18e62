//! Error types for alchemist.
//!
//! All errors are strongly typed using thiserror. Unknown ingredient or
//! effect names are never errors: queries answer them with empty results.
//! Errors only arise while loading data or configuration, and when a
//! selection is edited out of order.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating the ingredient table.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read data file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed ingredient data: {message}")]
    Parse {
        message: String,
    },

    #[error("{kind} name cannot be empty")]
    EmptyName {
        kind: &'static str,
    },

    #[error("{kind} name '{name}' exceeds maximum length of {max_length}")]
    NameTooLong {
        kind: &'static str,
        name: String,
        max_length: usize,
    },

    #[error("Ingredient '{ingredient}' is defined more than once")]
    DuplicateIngredient {
        ingredient: String,
    },

    #[error("Effect '{effect}' is listed more than once for ingredient '{ingredient}'")]
    DuplicateEffect {
        ingredient: String,
        effect: String,
    },

    #[error("Non-finite {field} for '{ingredient}' / '{effect}'")]
    NonFiniteValue {
        ingredient: String,
        effect: String,
        field: &'static str,
    },
}

/// Errors raised when editing a [`crate::Selection`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Slot {slot} does not exist (only {max} slots)")]
    NoSuchSlot {
        slot: usize,
        max: usize,
    },

    #[error("Slot {slot} cannot be filled while slot {missing} is empty")]
    SlotOutOfOrder {
        slot: usize,
        missing: usize,
    },

    #[error("Ingredient '{ingredient}' is already in slot {existing}")]
    DuplicateIngredient {
        slot: usize,
        existing: usize,
        ingredient: String,
    },

    #[error("Ingredient '{ingredient}' cannot go into slot {slot}")]
    NotSelectable {
        slot: usize,
        ingredient: String,
    },
}

/// Errors raised while loading the tool configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config: {message}")]
    Parse {
        message: String,
    },
}

/// Top-level error type for alchemist.
#[derive(Debug, Error)]
pub enum AlchemyError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl AlchemyError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a data error.
    #[must_use]
    pub const fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    /// Returns true if this is a selection error.
    #[must_use]
    pub const fn is_selection(&self) -> bool {
        matches!(self, Self::Selection(_))
    }

    /// Returns true if this is a config error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if this is an internal error.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }

    /// Returns true if the tool cannot continue after this error.
    ///
    /// Without its data table or configuration the tool has nothing to
    /// work with. Selection mistakes are reported and the session goes on.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::Selection(_))
    }
}

/// Result type alias for alchemist operations.
pub type AlchemyResult<T> = Result<T, AlchemyError>;
