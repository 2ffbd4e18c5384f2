//! Assistant module - the streaming conversational turn.
//!
//! A turn is assembled by the [`ContextBuilder`], executed as a
//! [`ProtocolRun`] that emits ordered [`StreamEvent`]s, serialized to the
//! wire by [`encode_event`], and summarised as a [`Transcript`] whose
//! structured payload is recovered by [`extract_payload`].

mod context;
mod encoder;
mod events;
mod extractor;
mod identity;
mod prompts;
mod run;
mod transcript;

pub use context::{
    attach_trip_context, ContextBuilder, ContextError, ContextMessage, HistoryRecord, Role,
    TurnContext, MAX_HISTORY_MESSAGES,
};
pub use encoder::{encode_event, SSE_DATA_PREFIX};
pub use events::{EventKind, StreamEvent, AGENT_ERROR_CODE};
pub use extractor::extract_payload;
pub use identity::RunIdentity;
pub use prompts::{itinerary_prompt, ItineraryRequest, TRAVEL_ASSISTANT_PERSONA};
pub use run::{ProtocolRun, ProtocolViolation, RunState};
pub use transcript::Transcript;
