//! Request bodies and small catalogs for tests.

use serde_json::json;
use verb_quiz_core::VerbCatalog;

/// Create a device register request body.
pub fn device_register_request(name: Option<&str>) -> serde_json::Value {
    match name {
        Some(n) => json!({ "name": n }),
        None => json!({}),
    }
}

/// Create a start session request body.
pub fn start_session_request(set_name: &str) -> serde_json::Value {
    json!({ "set_name": set_name })
}

/// Create a submit answer request body.
pub fn answer_request(answer: &str) -> serde_json::Value {
    json!({ "answer": answer })
}

/// Catalog with one single-verb set, so question order is fixed.
pub fn single_verb_catalog() -> VerbCatalog {
    VerbCatalog::from_text(
        "SET: bo\n\
         bo | bor | bodde | bodd | Проживать\n\
         \n\
         SET: bli\n\
         bli | blir | ble, blei | blitt | Становиться\n",
    )
    .expect("fixture catalog parses")
}
