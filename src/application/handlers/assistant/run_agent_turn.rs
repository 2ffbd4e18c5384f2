//! AgentRunner - drives one streamed assistant turn.
//!
//! The runner owns the upstream call and feeds protocol events into an
//! [`EventSink`] as fragments arrive. It never retries: an upstream failure
//! ends the run with a single `RUN_ERROR`. A closed sink means the client
//! is gone, so the upstream stream is dropped immediately.

use futures::StreamExt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::split_at_last_user;
use crate::domain::assistant::{
    ContextBuilder, ContextError, HistoryRecord, ProtocolRun, ProtocolViolation, RunIdentity,
    StreamEvent, Transcript, TurnContext,
};
use crate::ports::{AIProvider, CompletionParams, CompletionRequest, EventSink, FinishReason};

/// Request to run one agent turn.
///
/// `messages` is the caller's transcript, newest last. The last user
/// message is the new input; everything before it is history.
#[derive(Debug, Clone)]
pub struct AgentTurnCommand {
    pub messages: Vec<HistoryRecord>,
    pub thread_id: Option<String>,
}

/// A validated turn, ready to stream.
#[derive(Debug, Clone)]
pub struct PreparedTurn {
    identity: RunIdentity,
    context: TurnContext,
}

impl PreparedTurn {
    pub fn identity(&self) -> &RunIdentity {
        &self.identity
    }

    pub fn user_input(&self) -> &str {
        self.context.user_input()
    }

    pub fn context(&self) -> &TurnContext {
        &self.context
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// `RUN_FINISHED` was delivered. `finish_reason` is `None` when the
    /// upstream stream ended without reporting one.
    Finished {
        transcript: Transcript,
        finish_reason: Option<FinishReason>,
    },
    /// `RUN_ERROR` was emitted.
    Failed {
        message: String,
        partial_text: String,
    },
    /// The sink closed before the run completed.
    Cancelled,
}

enum Halt {
    Closed,
    Broken(ProtocolViolation),
}

async fn emit<S>(sink: &mut S, event: Result<StreamEvent, ProtocolViolation>) -> Result<(), Halt>
where
    S: EventSink + ?Sized,
{
    let event = event.map_err(Halt::Broken)?;
    sink.send(event).await.map_err(|_| Halt::Closed)
}

pub struct AgentRunner {
    ai_provider: Arc<dyn AIProvider>,
    params: CompletionParams,
    context_builder: ContextBuilder,
}

impl AgentRunner {
    pub fn new(ai_provider: Arc<dyn AIProvider>, params: CompletionParams) -> Self {
        Self {
            ai_provider,
            params,
            context_builder: ContextBuilder::new(),
        }
    }

    pub fn with_context_builder(mut self, builder: ContextBuilder) -> Self {
        self.context_builder = builder;
        self
    }

    /// Validates input and mints the run identity.
    ///
    /// Fails before any event is produced, so callers can still answer
    /// with a plain client error.
    pub fn prepare(&self, cmd: AgentTurnCommand) -> Result<PreparedTurn, ContextError> {
        let (history, input) =
            split_at_last_user(&cmd.messages).ok_or(ContextError::EmptyInput)?;
        let context = self.context_builder.build(history, &input.content)?;

        Ok(PreparedTurn {
            identity: RunIdentity::mint(cmd.thread_id),
            context,
        })
    }

    /// Streams the turn into `sink`.
    pub async fn run<S>(&self, turn: PreparedTurn, sink: &mut S) -> RunOutcome
    where
        S: EventSink + ?Sized,
    {
        let PreparedTurn { identity, context } = turn;
        let mut run = ProtocolRun::new(identity);
        info!(
            thread_id = %run.identity().thread_id(),
            run_id = %run.identity().run_id(),
            context_messages = context.len(),
            "Agent run started"
        );

        if let Err(halt) = emit(sink, run.start()).await {
            return self.halted(run, halt);
        }
        if let Err(halt) = emit(sink, run.open_message()).await {
            return self.halted(run, halt);
        }

        let request = CompletionRequest::new(context.into_messages()).with_params(self.params);
        let mut stream = match self.ai_provider.stream_complete(request).await {
            Ok(stream) => stream,
            Err(e) => return self.fail(run, sink, e.to_string()).await,
        };

        let mut finish_reason = None;
        while let Some(item) = stream.next().await {
            match item {
                Ok(chunk) => {
                    if chunk.finish_reason.is_some() {
                        finish_reason = chunk.finish_reason;
                    }
                    if chunk.delta.is_empty() {
                        continue;
                    }
                    if let Err(halt) = emit(sink, run.push_delta(chunk.delta)).await {
                        return self.halted(run, halt);
                    }
                }
                Err(e) => {
                    drop(stream);
                    return self.fail(run, sink, e.to_string()).await;
                }
            }
        }
        drop(stream);

        if let Err(halt) = emit(sink, run.close_message()).await {
            return self.halted(run, halt);
        }
        if let Err(halt) = emit(sink, run.finish()).await {
            return self.halted(run, halt);
        }

        match finish_reason {
            Some(reason) if reason.is_truncated() => warn!(
                run_id = %run.identity().run_id(),
                deltas = run.delta_count(),
                finish_reason = %reason,
                "Agent run finished with a truncated reply"
            ),
            _ => info!(
                run_id = %run.identity().run_id(),
                deltas = run.delta_count(),
                finish_reason = ?finish_reason,
                "Agent run finished"
            ),
        }
        RunOutcome::Finished {
            transcript: run.into_transcript(),
            finish_reason,
        }
    }

    async fn fail<S>(&self, mut run: ProtocolRun, sink: &mut S, message: String) -> RunOutcome
    where
        S: EventSink + ?Sized,
    {
        warn!(
            run_id = %run.identity().run_id(),
            deltas = run.delta_count(),
            error = %message,
            "Upstream completion failed"
        );
        if let Err(halt) = emit(sink, run.fail(message.clone())).await {
            return self.halted(run, halt);
        }
        RunOutcome::Failed {
            message,
            partial_text: run.text().to_string(),
        }
    }

    fn halted(&self, run: ProtocolRun, halt: Halt) -> RunOutcome {
        match halt {
            Halt::Closed => {
                debug!(
                    run_id = %run.identity().run_id(),
                    state = ?run.state(),
                    "Client disconnected, abandoning run"
                );
                RunOutcome::Cancelled
            }
            Halt::Broken(violation) => {
                error!(run_id = %run.identity().run_id(), %violation, "Protocol violation");
                RunOutcome::Failed {
                    message: violation.to_string(),
                    partial_text: run.text().to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::assistant::{EventKind, Role};
    use crate::ports::SinkClosed;
    use async_trait::async_trait;

    fn command(input: &str) -> AgentTurnCommand {
        AgentTurnCommand {
            messages: vec![HistoryRecord::new("user", input)],
            thread_id: None,
        }
    }

    fn runner(provider: MockAIProvider) -> AgentRunner {
        AgentRunner::new(Arc::new(provider), CompletionParams::default())
    }

    async fn run_collect(provider: MockAIProvider, input: &str) -> (Vec<StreamEvent>, RunOutcome) {
        let runner = runner(provider);
        let turn = runner.prepare(command(input)).unwrap();
        let mut events = Vec::new();
        let outcome = runner.run(turn, &mut events).await;
        (events, outcome)
    }

    fn types(events: &[StreamEvent]) -> Vec<&'static str> {
        events.iter().map(StreamEvent::event_type).collect()
    }

    /// Accepts `capacity` events, then reports the client gone.
    struct ClosingSink {
        capacity: usize,
        received: Vec<StreamEvent>,
    }

    #[async_trait]
    impl EventSink for ClosingSink {
        async fn send(&mut self, event: StreamEvent) -> Result<(), SinkClosed> {
            if self.received.len() >= self.capacity {
                return Err(SinkClosed);
            }
            self.received.push(event);
            Ok(())
        }
    }

    #[tokio::test]
    async fn successful_turn_emits_full_sequence() {
        let provider = MockAIProvider::new().with_fragments(["Day ", "1: ", "Arrive."]);
        let (events, outcome) = run_collect(provider, "Plan a 3-day trip to Lisbon").await;

        assert_eq!(
            types(&events),
            vec![
                "RUN_STARTED",
                "TEXT_MESSAGE_START",
                "TEXT_MESSAGE_CONTENT",
                "TEXT_MESSAGE_CONTENT",
                "TEXT_MESSAGE_CONTENT",
                "TEXT_MESSAGE_END",
                "RUN_FINISHED",
            ]
        );
        match outcome {
            RunOutcome::Finished {
                transcript,
                finish_reason,
            } => {
                assert_eq!(transcript.text, "Day 1: Arrive.");
                assert_eq!(finish_reason, Some(FinishReason::Stop));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn length_cutoff_is_reported_on_the_outcome() {
        let provider = MockAIProvider::new().with_truncated_fragments(["Day 1: ", "Arr"]);
        let (events, outcome) = run_collect(provider, "Plan a long trip").await;

        assert_eq!(types(&events).last(), Some(&"RUN_FINISHED"));
        match outcome {
            RunOutcome::Finished {
                transcript,
                finish_reason,
            } => {
                assert_eq!(transcript.text, "Day 1: Arr");
                assert!(finish_reason.is_some_and(FinishReason::is_truncated));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn context_reaches_provider_with_persona_first() {
        let provider = MockAIProvider::new().with_response("ok");
        let runner = runner(provider.clone());
        let turn = runner
            .prepare(AgentTurnCommand {
                messages: vec![
                    HistoryRecord::new("user", "Hi"),
                    HistoryRecord::new("assistant", "Hello!"),
                    HistoryRecord::new("user", "  Where to in May?  "),
                ],
                thread_id: Some("thread_abc".to_string()),
            })
            .unwrap();
        assert_eq!(turn.identity().thread_id(), "thread_abc");

        runner.run(turn, &mut Vec::new()).await;

        let calls = provider.get_calls();
        let messages = &calls[0].messages;
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[3].content, "Where to in May?");
        assert_eq!(calls[0].max_tokens, Some(2000));
    }

    #[tokio::test]
    async fn mid_stream_failure_ends_with_single_run_error() {
        let provider = MockAIProvider::new().with_failure_after(
            ["Day "],
            MockError::Network {
                message: "connection reset".to_string(),
            },
        );
        let (events, outcome) = run_collect(provider, "Plan").await;

        assert_eq!(
            types(&events),
            vec!["RUN_STARTED", "TEXT_MESSAGE_START", "TEXT_MESSAGE_CONTENT", "RUN_ERROR"]
        );
        match &events[3].kind {
            EventKind::RunError { message, code } => {
                assert!(message.contains("connection reset"));
                assert_eq!(code, "AGENT_ERROR");
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(
            outcome,
            RunOutcome::Failed {
                message: "network error: connection reset".to_string(),
                partial_text: "Day ".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn failure_to_open_stream_follows_message_start() {
        let provider = MockAIProvider::new().with_error(MockError::RateLimited {
            retry_after_secs: 20,
        });
        let (events, _) = run_collect(provider, "Plan").await;

        assert_eq!(types(&events), vec!["RUN_STARTED", "TEXT_MESSAGE_START", "RUN_ERROR"]);
    }

    #[tokio::test]
    async fn empty_fragments_are_not_forwarded() {
        let provider = MockAIProvider::new().with_fragments(["", "Hi", ""]);
        let (events, _) = run_collect(provider, "Hello").await;

        let deltas = events
            .iter()
            .filter(|e| e.event_type() == "TEXT_MESSAGE_CONTENT")
            .count();
        assert_eq!(deltas, 1);
    }

    #[tokio::test]
    async fn closed_sink_cancels_a_hanging_upstream() {
        let provider = MockAIProvider::new().with_hang_after(["a", "b", "c"]);
        let runner = runner(provider);
        let turn = runner.prepare(command("Plan")).unwrap();
        let mut sink = ClosingSink {
            capacity: 3,
            received: Vec::new(),
        };

        let outcome = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            runner.run(turn, &mut sink),
        )
        .await
        .expect("run should stop once the sink closes");

        assert_eq!(outcome, RunOutcome::Cancelled);
        assert_eq!(sink.received.len(), 3);
    }

    #[test]
    fn prepare_rejects_missing_or_blank_input() {
        let runner = runner(MockAIProvider::new());

        assert_eq!(runner.prepare(command("   ")).unwrap_err(), ContextError::EmptyInput);
        let no_user = AgentTurnCommand {
            messages: vec![HistoryRecord::new("assistant", "Hello")],
            thread_id: None,
        };
        assert_eq!(runner.prepare(no_user).unwrap_err(), ContextError::EmptyInput);
    }

    #[test]
    fn prepare_uses_last_user_message_as_input() {
        let runner = runner(MockAIProvider::new());
        let turn = runner
            .prepare(AgentTurnCommand {
                messages: vec![
                    HistoryRecord::new("user", "first"),
                    HistoryRecord::new("user", "second"),
                    HistoryRecord::new("assistant", "trailing"),
                ],
                thread_id: None,
            })
            .unwrap();

        assert_eq!(turn.user_input(), "second");
        assert_eq!(turn.context().len(), 3);
    }
}
