//! Runnable walkthroughs of the project policy.
//!
//! Each scenario wires real components together against in-memory storage
//! and prints what happened. A scenario returns an error if any observed
//! outcome differs from the policy table.

pub mod lifecycle;
pub mod ownership;
