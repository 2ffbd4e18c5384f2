//! Event sink port - where a running turn writes its stream events.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::assistant::StreamEvent;

/// The receiving side is gone (client disconnected).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("event sink closed")]
pub struct SinkClosed;

/// Ordered destination for stream events.
///
/// `send` may wait for capacity; a returned `SinkClosed` is final and the
/// producer must stop.
#[async_trait]
pub trait EventSink: Send {
    async fn send(&mut self, event: StreamEvent) -> Result<(), SinkClosed>;
}

#[async_trait]
impl EventSink for tokio::sync::mpsc::Sender<StreamEvent> {
    async fn send(&mut self, event: StreamEvent) -> Result<(), SinkClosed> {
        tokio::sync::mpsc::Sender::send(self, event)
            .await
            .map_err(|_| SinkClosed)
    }
}

/// Collects events in memory.
#[async_trait]
impl EventSink for Vec<StreamEvent> {
    async fn send(&mut self, event: StreamEvent) -> Result<(), SinkClosed> {
        self.push(event);
        Ok(())
    }
}
