use std::time::Duration;

use chat_relay_backend::message::RESPONDER_SID;
use chat_relay_backend::services::responder::{AutoResponder, Responder};
use tokio::time::Instant;

fn instant_responder() -> AutoResponder {
    AutoResponder::new(Duration::ZERO, Duration::ZERO)
}

#[tokio::test]
async fn greeting_keywords_get_the_greeting() {
    let responder = instant_responder();
    let reply = responder.respond("Hello everyone", "s1").await;
    assert_eq!(reply.text, "Hello there! How can I help you today?");
    assert_eq!(reply.sender_sid, RESPONDER_SID);
    assert!(reply.is_ai);
}

#[tokio::test]
async fn greeting_rule_beats_question_rule() {
    let responder = instant_responder();
    let reply = responder.respond("hi there?", "s1").await;
    assert_eq!(reply.text, "Hello there! How can I help you today?");
}

#[tokio::test]
async fn farewell_keyword_gets_the_farewell() {
    let responder = instant_responder();
    let reply = responder.respond("ok bye now", "s1").await;
    assert_eq!(reply.text, "Goodbye! Have a great day.");
}

#[tokio::test]
async fn question_mark_gets_the_question_reply() {
    let responder = instant_responder();
    let reply = responder.respond("want some tea?", "s1").await;
    assert!(reply.text.contains("great question"));
}

#[tokio::test]
async fn unmatched_text_draws_a_filler_reply() {
    let responder = instant_responder();
    let reply = responder.respond("just some words", "s1").await;
    assert!(!reply.text.is_empty());
    assert!(reply.is_ai);
}

#[tokio::test]
async fn delay_stays_within_configured_bounds() {
    let responder = AutoResponder::new(Duration::from_millis(20), Duration::from_millis(60));
    let start = Instant::now();
    responder.respond("anything", "s1").await;
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(20));
    assert!(elapsed < Duration::from_secs(2));
}

#[tokio::test]
async fn reply_timestamp_serializes_with_z_suffix() {
    let responder = instant_responder();
    let reply = responder.respond("hello", "s1").await;
    let value = serde_json::to_value(&reply).unwrap();
    let ts = value["timestamp"].as_str().unwrap();
    assert!(ts.ends_with('Z'), "timestamp was {ts}");
    assert!(ts.contains('T'));
}
