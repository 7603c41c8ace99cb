//! Shared router harness for HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use trial_risk_dashboard::adapters::ai::MockAIProvider;
use trial_risk_dashboard::application::DashboardStore;
use trial_risk_dashboard::config::{AiProvider, AppConfig};
use trial_risk_dashboard::ports::ProviderInfo;
use trial_risk_dashboard::server::build_router;

pub struct TestApp {
    pub router: Router,
    pub provider: MockAIProvider,
    pub store: DashboardStore,
}

/// Router backed by `provider`, with simulated latency turned off.
pub fn app_with(provider: MockAIProvider) -> TestApp {
    build(provider, AppConfig::default())
}

/// Same as [`app_with`] but in offline mode.
pub fn offline_app(provider: MockAIProvider) -> TestApp {
    let mut config = AppConfig::default();
    config.ai.provider = AiProvider::Offline;
    build(provider, config)
}

fn build(provider: MockAIProvider, mut config: AppConfig) -> TestApp {
    config.features.simulate_latency = false;
    let provider = provider.with_provider_info(ProviderInfo::new(
        "gemini",
        "gemini-1.5-flash",
        "Gemini 1.5 Flash",
    ));
    let store = DashboardStore::new("gemini-1.5-flash");
    let router = build_router(&config, Arc::new(provider.clone()), store.clone());
    TestApp {
        router,
        provider,
        store,
    }
}

impl TestApp {
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send_request(request).await
    }

    pub async fn send_raw(&self, method: Method, uri: &str, raw: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(raw.to_string()))
            .unwrap();
        self.send_request(request).await
    }

    async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}

pub fn pde3a_inputs() -> Value {
    serde_json::json!({
        "geneSymbol": "PDE3A",
        "uniprotId": "P27815",
        "structureType": "Small molecule",
        "mechanism": "PDE3/4 inhibitor",
        "route": "Inhalation",
        "indication": "COPD",
        "phase": "Phase III",
        "type": "Inhaled Small Molecule"
    })
}
