//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google Gemini via the Generative Language API
//! - `MockAIProvider` - Scripted provider for tests

mod gemini_provider;
mod mock_provider;

pub use gemini_provider::{display_name_for, GeminiConfig, GeminiProvider};
pub use mock_provider::{MockAIProvider, MockResponse};
