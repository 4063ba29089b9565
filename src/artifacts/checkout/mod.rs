//! Checkout of a stored tree into the working directory
//!
//! Checkout does not diff: the visible working tree is cleared and the target
//! tree is written back in full. Hidden entries survive both steps.

pub mod restorer;
