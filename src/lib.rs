//! Biotope: an artificial-life simulation.
//!
//! The [`model::world::World`] owns every lifeform and plant and advances them
//! one tick at a time. Simulation logic lives in `biotope_core`, plain data in
//! `biotope_data`; both are re-exported under [`model`].

pub mod model;
