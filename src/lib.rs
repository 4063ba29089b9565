//! A minimal content-addressed version-control engine
//!
//! - `areas`: the object store, references, workspace and the repository handle
//! - `artifacts`: object model, branch names and references, snapshots, checkout
//! - `commands`: engine operations (`init`, `commit`, `branch`, `checkout`, `cat_file`)
//! - `errors`: typed parse and invariant errors

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
