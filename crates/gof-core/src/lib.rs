//! # gof-core - Core Types
//!
//! Foundation crate for git-open-file. Provides the error type, logging
//! setup, the `git rev-parse` query modes and the command's invocation
//! arguments.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Git Queries (`query`)
//! - [`QueryMode`] - The allow-listed `git rev-parse` path options
//!
//! ### Invocation (`args`)
//! - [`OpenFileArgs`] - `file`, `rev_parse_arg`, `syntax`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use gof_core::prelude::*;
//! ```

pub mod args;
pub mod error;
pub mod logging;
pub mod query;

/// Prelude for common imports used throughout all git-open-file crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use args::OpenFileArgs;
pub use error::{Error, Result, ResultExt};
pub use query::QueryMode;
