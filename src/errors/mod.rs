//! Centralized error handling for the M3U combiner
//!
//! Errors split into two layers:
//!
//! - **Source Errors**: a single playlist source could not be retrieved or
//!   decoded. These are never fatal; the combiner skips the source and moves on.
//! - **Application Errors**: configuration, output writing and client setup.
//!   These abort the run.
//!
//! Malformed playlist lines are not errors at all; the grouper skips them.
//!
//! # Usage
//!
//! ```rust
//! use m3u_combiner::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Err(AppError::configuration("no sources configured"))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Source Results
pub type SourceResult<T> = Result<T, SourceError>;
