//! Integration tests for the AG-UI streaming endpoint and the CopilotKit
//! remote endpoint.
//!
//! Every test drives the full router with a scripted completion provider
//! and reads the `text/event-stream` body back frame by frame.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{app, event_types, register, send, sse_events, sse_payloads};
use tripmate::adapters::ai::{MockAIProvider, MockError};

fn lisbon_request() -> Value {
    json!({
        "messages": [{"role": "user", "content": "Plan a 3-day trip to Lisbon"}]
    })
}

fn deltas(events: &[Value]) -> Vec<String> {
    events
        .iter()
        .filter(|e| e["type"] == "TEXT_MESSAGE_CONTENT")
        .map(|e| e["delta"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn lisbon_turn_streams_each_fragment_in_order() {
    let app = app(MockAIProvider::new().with_fragments(["Day ", "1: ", "Arrive."]));

    let response = send(&app, "POST", "/api/agent", None, Some(lisbon_request())).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type.as_deref(), Some("text/event-stream"));
    assert_eq!(response.headers["cache-control"], "no-cache");
    assert_eq!(response.headers["x-accel-buffering"], "no");

    let events = sse_events(&response.body);
    assert_eq!(
        event_types(&events),
        [
            "RUN_STARTED",
            "TEXT_MESSAGE_START",
            "TEXT_MESSAGE_CONTENT",
            "TEXT_MESSAGE_CONTENT",
            "TEXT_MESSAGE_CONTENT",
            "TEXT_MESSAGE_END",
            "RUN_FINISHED",
        ]
    );
    assert_eq!(deltas(&events), ["Day ", "1: ", "Arrive."]);

    let message_id = &events[1]["message_id"];
    assert_eq!(events[1]["role"], "assistant");
    for event in &events[2..6] {
        assert_eq!(&event["message_id"], message_id);
    }
    assert_eq!(events[6]["thread_id"], events[0]["thread_id"]);
    assert_eq!(events[6]["run_id"], events[0]["run_id"]);
    assert!(events.iter().all(|e| e["timestamp"].is_i64()));
}

#[tokio::test]
async fn upstream_failure_ends_the_stream_with_run_error() {
    let app = app(MockAIProvider::new().with_failure_after(
        ["Day "],
        MockError::Network {
            message: "connection reset".to_string(),
        },
    ));

    let response = send(&app, "POST", "/api/agent", None, Some(lisbon_request())).await;

    assert_eq!(response.status, StatusCode::OK);
    let events = sse_events(&response.body);
    assert_eq!(
        event_types(&events),
        [
            "RUN_STARTED",
            "TEXT_MESSAGE_START",
            "TEXT_MESSAGE_CONTENT",
            "RUN_ERROR"
        ]
    );
    let error = events.last().unwrap();
    assert_eq!(error["code"], "AGENT_ERROR");
    assert!(error["message"].as_str().unwrap().contains("connection reset"));
}

#[tokio::test]
async fn provider_refusal_reports_run_error_after_message_start() {
    let app = app(MockAIProvider::new().with_error(MockError::AuthenticationFailed));

    let response = send(&app, "POST", "/api/agent", None, Some(lisbon_request())).await;

    assert_eq!(response.status, StatusCode::OK);
    let events = sse_events(&response.body);
    assert_eq!(
        event_types(&events),
        ["RUN_STARTED", "TEXT_MESSAGE_START", "RUN_ERROR"]
    );
}

#[tokio::test]
async fn repeated_runs_get_fresh_identifiers_and_same_text() {
    let app = app(
        MockAIProvider::new()
            .with_fragments(["Day ", "1: ", "Arrive."])
            .with_fragments(["Day ", "1: ", "Arrive."]),
    );

    let first = sse_events(
        &send(&app, "POST", "/api/agent", None, Some(lisbon_request()))
            .await
            .body,
    );
    let second = sse_events(
        &send(&app, "POST", "/api/agent", None, Some(lisbon_request()))
            .await
            .body,
    );

    assert_eq!(event_types(&first), event_types(&second));
    assert_eq!(deltas(&first).concat(), deltas(&second).concat());
    assert_ne!(first[0]["run_id"], second[0]["run_id"]);
    assert_ne!(first[1]["message_id"], second[1]["message_id"]);
}

#[tokio::test]
async fn caller_thread_id_is_used_verbatim() {
    let app = app(MockAIProvider::new().with_response("ok"));
    let mut body = lisbon_request();
    body["threadId"] = json!("thread-from-client");

    let events = sse_events(&send(&app, "POST", "/api/agent", None, Some(body)).await.body);

    assert_eq!(events[0]["thread_id"], "thread-from-client");
    assert_eq!(events.last().unwrap()["thread_id"], "thread-from-client");
}

#[tokio::test]
async fn input_errors_are_rejected_before_the_stream_opens() {
    let app = app(MockAIProvider::new());

    let empty = send(&app, "POST", "/api/agent", None, Some(json!({"messages": []}))).await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.json()["code"], "VALIDATION_FAILED");

    let assistant_only = send(
        &app,
        "POST",
        "/api/agent",
        None,
        Some(json!({"messages": [{"role": "assistant", "content": "Hello"}]})),
    )
    .await;
    assert_eq!(assistant_only.status, StatusCode::BAD_REQUEST);

    let blank = send(
        &app,
        "POST",
        "/api/agent",
        None,
        Some(json!({"messages": [{"role": "user", "content": "   "}]})),
    )
    .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_token_is_rejected_even_though_auth_is_optional() {
    let app = app(MockAIProvider::new());

    let response = send(
        &app,
        "POST",
        "/api/agent",
        Some("not-a-real-token"),
        Some(lisbon_request()),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn finished_turn_is_saved_to_an_owned_chat_session() {
    let app = app(
        MockAIProvider::new()
            .with_response("Lisbon is lovely in May.")
            .with_fragments(["Day 1: ", "Alfama"]),
    );
    let token = register(&app, "streamer@example.com").await;

    let chat = send(
        &app,
        "POST",
        "/api/chat",
        Some(&token),
        Some(json!({"message": "When should I visit Lisbon?"})),
    )
    .await;
    assert_eq!(chat.status, StatusCode::OK);
    let session_id = chat.json()["session_id"].as_str().unwrap().to_string();

    let body = json!({
        "threadId": session_id,
        "messages": [{"role": "user", "content": "Plan day one"}]
    });
    let response = send(&app, "POST", "/api/agent", Some(&token), Some(body)).await;
    assert_eq!(
        event_types(&sse_events(&response.body)).last().map(String::as_str),
        Some("RUN_FINISHED")
    );

    // The turn is recorded after the stream closes.
    let uri = format!("/api/chat/sessions/{}", session_id);
    let mut messages = Vec::new();
    for _ in 0..50 {
        let session = send(&app, "GET", &uri, Some(&token), None).await.json();
        messages = session["messages"].as_array().cloned().unwrap_or_default();
        if messages.len() == 4 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(messages.len(), 4);
    assert_eq!(messages[2]["content"], "Plan day one");
    assert_eq!(messages[3]["role"], "assistant");
    assert_eq!(messages[3]["content"], "Day 1: Alfama");
}

#[tokio::test]
async fn agent_info_describes_the_travel_assistant() {
    let app = app(MockAIProvider::new());

    let response = send(&app, "GET", "/api/agent/info", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let info = response.json();
    assert_eq!(info["name"], "TripMate AI");
    assert_eq!(info["protocol"], "ag-ui");
    assert_eq!(info["actions"].as_array().unwrap().len(), 4);
}

/// CopilotKit bodies end with a bare `[DONE]` marker; the rest is JSON.
fn copilot_frames(body: &str) -> Vec<Value> {
    let payloads = sse_payloads(body);
    assert_eq!(payloads.last().map(String::as_str), Some("[DONE]"));
    payloads[..payloads.len() - 1]
        .iter()
        .map(|p| serde_json::from_str(p).unwrap())
        .collect()
}

#[tokio::test]
async fn copilotkit_reply_carries_text_and_action_result() {
    let app = app(MockAIProvider::new().with_response(
        "Three days in Lisbon:\n```json\n{\"destination\": \"Lisbon\", \"days\": []}\n```",
    ));
    let body = json!({
        "messages": [
            {"role": "user", "content": "Hi"},
            {"role": "assistant", "content": "Hello! Where to?"},
            {"role": "user", "content": "Plan a 3-day trip to Lisbon"}
        ],
        "actions": [{"name": "planTrip"}]
    });

    let response = send(&app, "POST", "/api/copilotkit", None, Some(body)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type.as_deref(), Some("text/event-stream"));
    let frames = copilot_frames(&response.body);
    assert_eq!(
        event_types(&frames),
        ["textMessageStart", "textMessageContent", "textMessageEnd", "actionResult"]
    );
    assert_eq!(frames[0]["id"], frames[1]["id"]);
    assert_eq!(frames[1]["id"], frames[2]["id"]);
    assert!(frames[1]["content"]
        .as_str()
        .unwrap()
        .starts_with("Three days in Lisbon:"));
    assert_eq!(frames[3]["data"]["destination"], "Lisbon");
}

#[tokio::test]
async fn copilotkit_failure_is_an_error_frame_then_done() {
    let app = app(MockAIProvider::new().with_error(MockError::Unavailable {
        message: "overloaded".to_string(),
    }));

    let response = send(&app, "POST", "/api/copilotkit", None, Some(lisbon_request())).await;

    assert_eq!(response.status, StatusCode::OK);
    let frames = copilot_frames(&response.body);
    assert_eq!(event_types(&frames), ["error"]);
    assert!(frames[0]["message"].as_str().unwrap().contains("overloaded"));
}

#[tokio::test]
async fn copilotkit_without_user_message_only_says_done() {
    let app = app(MockAIProvider::new());

    let response = send(
        &app,
        "POST",
        "/api/copilotkit",
        None,
        Some(json!({"messages": [{"role": "assistant", "content": "Hello"}]})),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "data: [DONE]\n\n");
}

#[tokio::test]
async fn copilotkit_info_lists_actions() {
    let app = app(MockAIProvider::new());

    let response = send(&app, "GET", "/api/copilotkit/info", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let actions = response.json()["actions"].as_array().unwrap().clone();
    assert_eq!(actions.len(), 4);
    assert_eq!(actions[0]["name"], "planTrip");
}

#[tokio::test]
async fn length_cutoff_still_finishes_the_run() {
    let app = app(MockAIProvider::new().with_truncated_fragments(["Day 1: ", "Alf"]));

    let response = send(&app, "POST", "/api/agent", None, Some(lisbon_request())).await;

    let events = sse_events(&response.body);
    assert_eq!(event_types(&events).last().map(String::as_str), Some("RUN_FINISHED"));
    assert_eq!(deltas(&events).concat(), "Day 1: Alf");
}
