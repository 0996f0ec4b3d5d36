//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext holding an in-memory store and the app router
//! - Device and authentication helpers
//! - Helpers that drive a quiz session through the API

pub mod fixtures;

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::Router;
use axum_test::TestServer;
use serde_json::Value;
use uuid::Uuid;

use verb_quiz_backend::store::Store;
use verb_quiz_backend::{build_router, AppState};
use verb_quiz_core::{RankThresholds, VerbCatalog};

/// Test context containing the shared state and router.
pub struct TestContext {
    pub store: Arc<Store>,
    pub catalog: Arc<VerbCatalog>,
    app: Router,
}

impl TestContext {
    /// Context serving the built-in catalog.
    pub fn new() -> Self {
        Self::with_catalog(VerbCatalog::builtin().expect("built-in catalog parses"))
    }

    pub fn with_catalog(catalog: VerbCatalog) -> Self {
        let state = AppState::new(catalog, RankThresholds::default());
        Self {
            store: state.store.clone(),
            catalog: state.catalog.clone(),
            app: build_router(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to start test server")
    }

    /// Create a test device and return its ID and token.
    pub async fn create_test_device(&self, name: Option<&str>) -> (Uuid, String) {
        let device = self.store.create_device(name).await;
        (device.id, device.token)
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> String {
        format!("Bearer {}", token)
    }

    /// Canonical answer for the question the session is showing.
    ///
    /// Questions show the translation for the infinitive and the infinitive
    /// otherwise, which is enough to find the verb in the set.
    pub fn canonical_answer(&self, set_name: &str, question: &Value) -> String {
        let set = self.catalog.find(set_name).expect("set exists");
        let displayed = question["displayed_word"].as_str().expect("displayed_word");
        let form = question["form"].as_str().expect("form");

        let verb = set
            .verbs
            .iter()
            .find(|v| match form {
                "infinitive" => v.translation == displayed,
                _ => v.key() == displayed,
            })
            .expect("verb for question");

        let form = verb_quiz_core::VerbForm::from_str(form).expect("known form");
        verb.form(form).canonical().to_string()
    }
}

/// Start a session and return its id and response body.
pub async fn start_session(server: &TestServer, token: &str, set_name: &str) -> (String, Value) {
    let response = server
        .post("/api/sessions")
        .add_header(AUTHORIZATION, TestContext::auth_header_value(token))
        .json(&fixtures::start_session_request(set_name))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    let body: Value = response.json();
    let session_id = body["session_id"].as_str().expect("session_id").to_string();
    (session_id, body)
}

/// Submit an answer and return the response body.
pub async fn submit_answer(server: &TestServer, token: &str, session_id: &str, answer: &str) -> Value {
    let response = server
        .post(&format!("/api/sessions/{}/answer", session_id))
        .add_header(AUTHORIZATION, TestContext::auth_header_value(token))
        .json(&fixtures::answer_request(answer))
        .await;

    response.assert_status_ok();
    response.json()
}
