//! Trial Risk Dashboard - clinical-trial risk reports from molecule inputs.
//!
//! Turns a handful of molecule descriptors into a structured risk report by
//! prompting a text-completion model and repairing its JSON reply. When the
//! model is unavailable or its reply cannot be read, a deterministic mock
//! report is served instead, so the dashboard always has something to show.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;
