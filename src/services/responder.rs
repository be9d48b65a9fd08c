// src/services/responder.rs
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::message::OutboundMessage;

/// Reply-generation strategy. Injectable so tests can swap in a
/// deterministic zero-delay fake.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Produce an automated reply to `text`. Suspends the calling task for
    /// the configured delay; never fails and never broadcasts by itself.
    async fn respond(&self, text: &str, origin_sid: &str) -> OutboundMessage;
}

const FILLER_REPLIES: &[&str] = &[
    "That's an interesting point!",
    "Could you tell me more about that?",
    "I'm still learning, but I'll try my best to understand.",
    "Let me think about that for a moment...",
    "Fascinating! What else is on your mind?",
    "I see. And how does that make you feel? (Just kidding, I'm a basic AI!)",
    "Processing... please stand by.",
    "Hmm, that's a good question.",
];

const GREETING_REPLY: &str = "Hello there! How can I help you today?";
const FAREWELL_REPLY: &str = "Goodbye! Have a great day.";
const QUESTION_REPLY: &str = "That's a great question! Unfortunately, I'm just a dummy AI.";

/// Keyword-rule responder with a randomized thinking delay.
pub struct AutoResponder {
    delay_min: Duration,
    delay_max: Duration,
}

impl AutoResponder {
    pub fn new(delay_min: Duration, delay_max: Duration) -> Self {
        Self { delay_min, delay_max }
    }
}

impl Default for AutoResponder {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), Duration::from_millis(2500))
    }
}

/// Rule precedence: greeting keywords beat the farewell check, which beats
/// the question mark check; the filler pool is the fallback.
fn select_reply(text: &str) -> &'static str {
    let lowered = text.to_lowercase();
    if lowered.contains("hello") || lowered.contains("hi") {
        GREETING_REPLY
    } else if lowered.contains("bye") {
        FAREWELL_REPLY
    } else if text.contains('?') {
        QUESTION_REPLY
    } else {
        let mut rng = rand::rng();
        FILLER_REPLIES
            .choose(&mut rng)
            .copied()
            .unwrap_or(FILLER_REPLIES[0])
    }
}

#[async_trait]
impl Responder for AutoResponder {
    async fn respond(&self, text: &str, _origin_sid: &str) -> OutboundMessage {
        // Pick the delay and reply before suspending; ThreadRng is not Send.
        let (delay, reply) = {
            let mut rng = rand::rng();
            let secs =
                rng.random_range(self.delay_min.as_secs_f64()..=self.delay_max.as_secs_f64());
            (Duration::from_secs_f64(secs), select_reply(text))
        };
        tokio::time::sleep(delay).await;
        OutboundMessage::automated(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_beats_question_rule() {
        assert_eq!(select_reply("hi there?"), GREETING_REPLY);
    }

    #[test]
    fn fallback_draws_from_filler_pool() {
        assert!(FILLER_REPLIES.contains(&select_reply("the weather is nice")));
    }
}
