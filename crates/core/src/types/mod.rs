//! Core types for Planwise.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod multiplier;

pub use id::ScenarioId;
pub use multiplier::{SalesMultiplier, SalesMultiplierError};
