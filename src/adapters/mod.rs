//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Text-completion providers (Gemini, scripted mock)
//! - `http` - Axum routers for the REST API
//! - `monitoring` - Background AI status checks

pub mod ai;
pub mod http;
pub mod monitoring;

pub use ai::{GeminiConfig, GeminiProvider, MockAIProvider};
pub use monitoring::{HealthMonitor, HealthMonitorConfig, MonitorHandle};
