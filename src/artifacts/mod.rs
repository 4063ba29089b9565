//! Data structures and algorithms
//!
//! - `branch`: Branch names and references
//! - `checkout`: Restoring a stored tree into the working directory
//! - `objects`: Object types (blob, tree, commit) and their encodings
//! - `snapshot`: Storing the working directory as a tree

pub mod branch;
pub mod checkout;
pub mod objects;
pub mod snapshot;
