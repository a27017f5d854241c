//! Headless sandbox harness for the city sim.
//!
//! Loads content and scenario JSON from disk, drives the pure resolver in
//! `citysim-logic`, and runs self-checks. Runs entirely in-process — no
//! editor, no rendering.

pub mod checks;
pub mod content_loader;
pub mod error;
pub mod scenario;
