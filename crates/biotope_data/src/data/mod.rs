//! Core data structures for the Biotope simulation.

pub mod environment;
pub mod history;
pub mod lifeform;
pub mod traits;
