//! Best score API tests.

mod common;

use axum::http::header::AUTHORIZATION;
use serde_json::Value;

use common::{fixtures, start_session, submit_answer, TestContext};

async fn scores(ctx: &TestContext, token: &str) -> Value {
    let response = ctx
        .server()
        .get("/api/scores")
        .add_header(AUTHORIZATION, TestContext::auth_header_value(token))
        .await;

    response.assert_status_ok();
    response.json()
}

fn score_of<'a>(body: &'a Value, set_name: &str) -> &'a Value {
    &body["scores"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["set_name"] == set_name)
        .unwrap()["best_score"]
}

async fn play(ctx: &TestContext, token: &str, set_name: &str, answers: &[&str]) -> Value {
    let server = ctx.server();
    let (session_id, _) = start_session(&server, token, set_name).await;
    let mut last = Value::Null;
    for answer in answers {
        last = submit_answer(&server, token, &session_id, answer).await;
    }
    last
}

/// Test a new device has zero for every set.
#[tokio::test]
async fn test_scores_start_at_zero() {
    let ctx = TestContext::with_catalog(fixtures::single_verb_catalog());
    let (_, token) = ctx.create_test_device(None).await;

    let body = scores(&ctx, &token).await;

    assert_eq!(body["scores"].as_array().unwrap().len(), 2);
    assert_eq!(*score_of(&body, "bo"), 0.0);
    assert_eq!(body["scores"][0]["rank"], "None");
    assert_eq!(body["recommended"], "bo");
}

/// Test only a higher score replaces the stored best.
#[tokio::test]
async fn test_best_score_keeps_maximum() {
    let ctx = TestContext::with_catalog(fixtures::single_verb_catalog());
    let (_, token) = ctx.create_test_device(None).await;

    let first = play(&ctx, &token, "bo", &["bo", "bor", "x", "x"]).await;
    assert_eq!(first["results"]["percent"], 50.0);
    assert_eq!(first["results"]["new_best"], true);

    let worse = play(&ctx, &token, "bo", &["bo", "x", "x", "x"]).await;
    assert_eq!(worse["results"]["percent"], 25.0);
    assert_eq!(worse["results"]["best_score"], 50.0);
    assert_eq!(worse["results"]["new_best"], false);
    assert_eq!(*score_of(&scores(&ctx, &token).await, "bo"), 50.0);

    let better = play(&ctx, &token, "bo", &["bo", "bor", "bodde", "x"]).await;
    assert_eq!(better["results"]["best_score"], 75.0);
    assert_eq!(better["results"]["new_best"], true);

    let body = scores(&ctx, &token).await;
    assert_eq!(*score_of(&body, "bo"), 75.0);
    assert_eq!(body["scores"][0]["rank"], "A");
    assert_eq!(body["recommended"], "bli");
}

/// Test best scores are kept per device.
#[tokio::test]
async fn test_scores_are_per_device() {
    let ctx = TestContext::with_catalog(fixtures::single_verb_catalog());
    let (_, first) = ctx.create_test_device(None).await;
    let (_, second) = ctx.create_test_device(None).await;

    play(&ctx, &first, "bli", &["bli", "blir", "ble", "blitt"]).await;

    assert_eq!(*score_of(&scores(&ctx, &first).await, "bli"), 100.0);
    assert_eq!(*score_of(&scores(&ctx, &second).await, "bli"), 0.0);
}

/// Test an abandoned session leaves the best score untouched.
#[tokio::test]
async fn test_abandoned_session_not_scored() {
    let ctx = TestContext::with_catalog(fixtures::single_verb_catalog());
    let server = ctx.server();
    let (_, token) = ctx.create_test_device(None).await;

    let (session_id, _) = start_session(&server, &token, "bo").await;
    submit_answer(&server, &token, &session_id, "bo").await;
    server
        .delete(&format!("/api/sessions/{}", session_id))
        .add_header(AUTHORIZATION, TestContext::auth_header_value(&token))
        .await;

    assert_eq!(*score_of(&scores(&ctx, &token).await, "bo"), 0.0);
}
