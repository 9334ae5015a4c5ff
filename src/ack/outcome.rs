//! Acknowledgment outcomes and the decision function.

/// Number of equally likely tokens drawn per randomized decision.
pub const TOKEN_RANGE: u8 = 6;

/// What the simulated acknowledger answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AckOutcome {
    /// Immediate positive acknowledgment.
    Ack,
    /// Immediate negative acknowledgment.
    Nack,
    /// Positive acknowledgment after the configured delay.
    DelayedAck,
}

impl AckOutcome {
    /// Text written as the response body once the outcome resolves.
    pub fn body(&self) -> &'static str {
        match self {
            AckOutcome::Ack | AckOutcome::DelayedAck => "ACK",
            AckOutcome::Nack => "NACK",
        }
    }

    pub fn is_delayed(&self) -> bool {
        matches!(self, AckOutcome::DelayedAck)
    }
}

impl std::fmt::Display for AckOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AckOutcome::Ack => write!(f, "ack"),
            AckOutcome::Nack => write!(f, "nack"),
            AckOutcome::DelayedAck => write!(f, "delayed-ack"),
        }
    }
}

/// Map a token in `0..TOKEN_RANGE` to an outcome: 0 acks, 1 nacks, the rest delay.
fn outcome_for_token(token: u8) -> AckOutcome {
    match token {
        0 => AckOutcome::Ack,
        1 => AckOutcome::Nack,
        _ => AckOutcome::DelayedAck,
    }
}

/// Decide how to acknowledge an event.
///
/// `draw` yields a token in `0..TOKEN_RANGE`; it is not called when the ACK is forced.
pub fn decide(forced_ack: bool, draw: impl FnOnce() -> u8) -> AckOutcome {
    if forced_ack {
        return AckOutcome::Ack;
    }
    outcome_for_token(draw())
}
