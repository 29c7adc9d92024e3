//! Scenario domain pipeline.
//!
//! The request path runs left to right: [`normalize`] rewrites date-like
//! fields on the raw body, [`validate`] turns the decoded draft into a
//! store-ready record or patch, [`service`] drives the store, and
//! [`preview`] derives the synthetic analytics payload for stored records.

pub mod normalize;
pub mod preview;
pub mod service;
pub mod validate;

pub use preview::PreviewPayload;
pub use service::{ScenarioError, ScenarioService};
pub use validate::FieldError;
