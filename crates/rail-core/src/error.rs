//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, keeping error sites clean.

use thiserror::Error;

use crate::location::Location;

/// The top-level error type for `rail-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A train's position/target held the wrong location kind for the
    /// transition being executed — a construction or state-machine bug,
    /// always fatal.
    #[error("expected a {expected} location, found {found}")]
    LocationKind {
        expected: &'static str,
        found:    Location,
    },
}

/// Shorthand result type for all `rail-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
