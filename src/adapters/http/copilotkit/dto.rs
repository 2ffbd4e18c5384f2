//! HTTP DTOs for the CopilotKit endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::application::{CopilotReply, CopilotTurnCommand};
use crate::domain::assistant::{HistoryRecord, SSE_DATA_PREFIX};
use crate::ports::AIError;

/// Terminates every CopilotKit response.
pub const DONE_FRAME: &str = "data: [DONE]\n\n";

/// Request body. `actions` and other CopilotKit fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CopilotRequest {
    #[serde(default)]
    pub messages: Vec<HistoryRecord>,
}

impl From<CopilotRequest> for CopilotTurnCommand {
    fn from(req: CopilotRequest) -> Self {
        Self {
            messages: req.messages,
        }
    }
}

/// One CopilotKit stream frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CopilotFrame {
    TextMessageStart { id: String },
    TextMessageContent { id: String, content: String },
    TextMessageEnd { id: String },
    ActionResult { data: Value },
    Error { message: String },
}

impl CopilotFrame {
    /// Frames for a finished turn, excluding the closing `[DONE]`.
    pub fn for_outcome(outcome: Result<Option<CopilotReply>, AIError>) -> Vec<Self> {
        match outcome {
            Ok(Some(reply)) => {
                let id = reply.message_id;
                let mut frames = vec![
                    Self::TextMessageStart { id: id.clone() },
                    Self::TextMessageContent {
                        id: id.clone(),
                        content: reply.transcript.text,
                    },
                    Self::TextMessageEnd { id },
                ];
                if let Some(data) = reply.transcript.payload {
                    frames.push(Self::ActionResult { data });
                }
                frames
            }
            Ok(None) => Vec::new(),
            Err(e) => vec![Self::Error {
                message: e.to_string(),
            }],
        }
    }

    /// Serializes the frame as `data: {json}\n\n`.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        Ok(format!("{}{}\n\n", SSE_DATA_PREFIX, serde_json::to_string(self)?))
    }
}

/// Static action list served by `GET /api/copilotkit/info`.
pub fn copilot_actions_descriptor() -> Value {
    json!({
        "actions": [
            {
                "name": "planTrip",
                "description": "Plan a complete trip based on user preferences",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "destination": {"type": "string"},
                        "dates": {"type": "string"},
                        "budget": {"type": "number"},
                        "travelers": {"type": "integer"}
                    }
                }
            },
            {
                "name": "recommendDestinations",
                "description": "Get destination recommendations based on preferences",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "preferences": {"type": "object"},
                        "count": {"type": "integer", "default": 5}
                    }
                }
            },
            {
                "name": "generateItinerary",
                "description": "Generate a detailed day-by-day itinerary",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "destination": {"type": "string"},
                        "start_date": {"type": "string"},
                        "end_date": {"type": "string"},
                        "interests": {"type": "array", "items": {"type": "string"}}
                    }
                }
            },
            {
                "name": "estimateBudget",
                "description": "Calculate budget estimate for the trip",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "destination": {"type": "string"},
                        "duration": {"type": "integer"},
                        "travelers": {"type": "integer"},
                        "style": {"type": "string"}
                    }
                }
            }
        ]
    })
}
