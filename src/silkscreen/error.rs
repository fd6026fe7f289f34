//! Error types for silkscreen generation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for silkscreen operations.
pub type SilkscreenResult<T> = Result<T, SilkscreenError>;

/// Errors that can occur while expanding an outline or deriving its
/// silkscreen.
///
/// None of these carry a partial result: a failed run produces no ring and
/// no artwork.
#[derive(Debug, Error)]
pub enum SilkscreenError {
    /// The outline, locks or pads are unusable as given.
    #[error("Malformed input: {message}")]
    MalformedInput {
        /// Description of what's wrong.
        message: String,
    },

    /// The expansion loop hit its iteration cap before reaching a fixed
    /// point.
    #[error(
        "Expansion did not converge within {iterations} iteration(s); retry with relaxed inputs"
    )]
    NonConvergence {
        /// The cap that was exceeded.
        iterations: usize,
    },

    /// A self-intersection was found that no candidate deletion could
    /// resolve.
    #[error("Infeasible repair: {message}")]
    InfeasibleRepair {
        /// Description of the offending intersection.
        message: String,
    },

    /// Failed to read a footprint document.
    #[error("Failed to read footprint file: {path}")]
    FileRead {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A footprint document is not valid JSON for the expected shape.
    #[error("Invalid footprint document: {path}")]
    InvalidDocument {
        /// Path to the file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl SilkscreenError {
    /// Creates a malformed input error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Creates an infeasible repair error.
    pub fn infeasible_repair(message: impl Into<String>) -> Self {
        Self::InfeasibleRepair {
            message: message.into(),
        }
    }

    /// Short machine-readable name of the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MalformedInput { .. } => "malformed_input",
            Self::NonConvergence { .. } => "non_convergence",
            Self::InfeasibleRepair { .. } => "infeasible_repair",
            Self::FileRead { .. } => "file_read",
            Self::InvalidDocument { .. } => "invalid_document",
        }
    }

    /// Whether a caller may reasonably retry with relaxed inputs.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::NonConvergence { .. })
    }
}
