//! Pure turn-resolution logic for the city sandbox.
//!
//! This crate contains the game logic that is independent of any editor,
//! renderer, or file format. Functions take plain data and return results,
//! making them unit-testable and usable from the headless harness or any
//! future host.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`city`] | Cities, role assignments, building instances, workforce pipeline |
//! | [`constants`] | Canonical resource kinds and session defaults |
//! | [`content`] | Role/building definitions, keyed lookups, content validation |
//! | [`resources`] | Resource table and per-turn delta accumulator |
//! | [`state`] | Session game state and resource-key seeding |
//! | [`turn`] | Per-turn production resolver |

pub mod city;
pub mod constants;
pub mod content;
pub mod resources;
pub mod state;
pub mod turn;
