//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (scores, timestamps, errors)
//! - `molecule` - Molecule inputs, validation and structure classification
//! - `report` - The drug analysis report and its lenient schema
//! - `analysis` - Pure services: prompt, normalizer, mock reports, redaction
//! - `dashboard` - Dashboard state, reducer and AI status tracking

pub mod analysis;
pub mod dashboard;
pub mod foundation;
pub mod molecule;
pub mod report;
