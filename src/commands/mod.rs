//! Command implementations
//!
//! - `plumbing`: Low-level object inspection (cat-file)
//! - `porcelain`: User-facing operations (init, commit, branch, checkout)

pub mod plumbing;
pub mod porcelain;
