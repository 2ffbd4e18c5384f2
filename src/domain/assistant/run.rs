//! The per-turn protocol state machine.
//!
//! ```text
//! Idle -> RunStarted -> MessageOpen -> MessageClosed -> RunFinished
//!             |              |
//!             +--------------+--> RunError
//! ```
//!
//! Every transition returns the event to send. Transitions that are not
//! legal from the current state return a [`ProtocolViolation`] and leave
//! the state untouched.

use thiserror::Error;

use super::events::StreamEvent;
use super::identity::RunIdentity;
use super::transcript::Transcript;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    RunStarted,
    MessageOpen,
    MessageClosed,
    RunFinished,
    RunError,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::RunFinished | RunState::RunError)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot {action} while run is {state:?}")]
pub struct ProtocolViolation {
    pub state: RunState,
    pub action: &'static str,
}

/// One execution of the streaming protocol for a single turn.
#[derive(Debug)]
pub struct ProtocolRun {
    identity: RunIdentity,
    state: RunState,
    text: String,
    deltas: usize,
}

impl ProtocolRun {
    pub fn new(identity: RunIdentity) -> Self {
        Self {
            identity,
            state: RunState::Idle,
            text: String::new(),
            deltas: 0,
        }
    }

    pub fn identity(&self) -> &RunIdentity {
        &self.identity
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Text accumulated from all deltas so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn delta_count(&self) -> usize {
        self.deltas
    }

    fn advance(
        &mut self,
        allowed: &[RunState],
        next: RunState,
        action: &'static str,
    ) -> Result<(), ProtocolViolation> {
        if !allowed.contains(&self.state) {
            return Err(ProtocolViolation {
                state: self.state,
                action,
            });
        }
        self.state = next;
        Ok(())
    }

    pub fn start(&mut self) -> Result<StreamEvent, ProtocolViolation> {
        self.advance(&[RunState::Idle], RunState::RunStarted, "start run")?;
        Ok(StreamEvent::run_started(&self.identity))
    }

    pub fn open_message(&mut self) -> Result<StreamEvent, ProtocolViolation> {
        self.advance(&[RunState::RunStarted], RunState::MessageOpen, "open message")?;
        Ok(StreamEvent::message_started(&self.identity))
    }

    /// Forwards one upstream fragment verbatim.
    pub fn push_delta(
        &mut self,
        fragment: impl Into<String>,
    ) -> Result<StreamEvent, ProtocolViolation> {
        self.advance(&[RunState::MessageOpen], RunState::MessageOpen, "append delta")?;
        let fragment = fragment.into();
        self.text.push_str(&fragment);
        self.deltas += 1;
        Ok(StreamEvent::message_delta(&self.identity, fragment))
    }

    pub fn close_message(&mut self) -> Result<StreamEvent, ProtocolViolation> {
        self.advance(&[RunState::MessageOpen], RunState::MessageClosed, "close message")?;
        Ok(StreamEvent::message_ended(&self.identity))
    }

    pub fn finish(&mut self) -> Result<StreamEvent, ProtocolViolation> {
        self.advance(&[RunState::MessageClosed], RunState::RunFinished, "finish run")?;
        Ok(StreamEvent::run_finished(&self.identity))
    }

    /// Aborts the run before the message has been closed.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<StreamEvent, ProtocolViolation> {
        self.advance(
            &[RunState::RunStarted, RunState::MessageOpen],
            RunState::RunError,
            "fail run",
        )?;
        Ok(StreamEvent::run_error(message))
    }

    /// Assembled text and extracted payload.
    pub fn into_transcript(self) -> Transcript {
        Transcript::from_text(self.text)
    }
}
