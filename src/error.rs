//! Error kinds for the delivery pipeline.
//!
//! Nothing here is fatal: every error degrades to "don't show" or
//! "show with reduced fidelity". A vetoed build is a normal decision,
//! not an error, and has no variant.

use thiserror::Error;

/// Pipeline error kinds
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Missing permission or invalid platform configuration.
    /// The affected feature is silently disabled and the build continues.
    #[error("missing required permission: {permission}")]
    Configuration { permission: String },

    /// Content picture download failed after exhausting the retry budget.
    /// The notification falls back to text-only style.
    #[error("failed to fetch picture from {url} after {attempts} attempts")]
    Fetch { url: String, attempts: u32 },

    /// The platform rejected the show call. The notification is considered
    /// not shown; there is no retry.
    #[error("platform rejected notification display: {reason}")]
    Display { reason: String },
}
