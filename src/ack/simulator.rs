//! Acknowledgment simulator: decision plus the delay step.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use crate::ack::outcome::{decide, AckOutcome, TOKEN_RANGE};
use crate::config::AckConfig;

/// Source of decision tokens in `0..TOKEN_RANGE`.
pub trait TokenSource: Send + Sync + std::fmt::Debug {
    fn draw(&self) -> u8;
}

/// Draws from the calling thread's RNG; nothing is shared across handlers.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTokens;

impl TokenSource for RandomTokens {
    fn draw(&self) -> u8 {
        rand::thread_rng().gen_range(0..TOKEN_RANGE)
    }
}

/// Always yields the same token.
#[derive(Debug, Clone, Copy)]
pub struct FixedTokens(pub u8);

impl TokenSource for FixedTokens {
    fn draw(&self) -> u8 {
        self.0
    }
}

/// Simulates a remote acknowledger with immediate, negative and slow answers.
#[derive(Debug, Clone)]
pub struct AckSimulator {
    forced: bool,
    delay: Duration,
    tokens: Arc<dyn TokenSource>,
}

impl AckSimulator {
    pub fn new(forced: bool, delay: Duration) -> Self {
        Self::with_tokens(forced, delay, Arc::new(RandomTokens))
    }

    pub fn from_config(config: &AckConfig) -> Self {
        Self::new(config.forced, Duration::from_millis(config.delay_ms))
    }

    pub fn with_tokens(forced: bool, delay: Duration, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            forced,
            delay,
            tokens,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Pick the outcome for one event.
    pub fn decide(&self) -> AckOutcome {
        decide(self.forced, || self.tokens.draw())
    }

    /// Wait out a delayed outcome and return the body text.
    pub async fn settle(&self, outcome: AckOutcome) -> &'static str {
        if outcome.is_delayed() {
            tracing::debug!(delay_ms = self.delay.as_millis() as u64, "Holding acknowledgment");
            tokio::time::sleep(self.delay).await;
        }
        outcome.body()
    }

    /// Decide and settle in one step.
    pub async fn respond(&self) -> (AckOutcome, &'static str) {
        let outcome = self.decide();
        (outcome, self.settle(outcome).await)
    }
}
