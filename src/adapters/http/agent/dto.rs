//! HTTP DTOs for the agent endpoint.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::application::AgentTurnCommand;
use crate::domain::assistant::HistoryRecord;

/// Run input. Fields the agent does not use (tools, state, forwarded
/// props) are accepted and ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRequest {
    #[serde(default)]
    pub messages: Vec<HistoryRecord>,
    #[serde(default)]
    pub thread_id: Option<String>,
}

impl From<AgentRequest> for AgentTurnCommand {
    fn from(req: AgentRequest) -> Self {
        Self {
            messages: req.messages,
            thread_id: req.thread_id.filter(|id| !id.trim().is_empty()),
        }
    }
}

/// Static description served by `GET /api/agent/info`.
pub fn agent_descriptor() -> Value {
    json!({
        "name": "TripMate AI",
        "description": "An intelligent travel planning assistant",
        "version": "2.0.0",
        "protocol": "ag-ui",
        "capabilities": [
            "travel-planning",
            "destination-recommendations",
            "itinerary-generation",
            "budget-estimation"
        ],
        "actions": [
            {
                "name": "planTrip",
                "description": "Create a complete trip plan",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "destination": {"type": "string"},
                        "startDate": {"type": "string", "format": "date"},
                        "endDate": {"type": "string", "format": "date"},
                        "budget": {"type": "number"},
                        "travelers": {"type": "integer", "minimum": 1}
                    },
                    "required": ["destination"]
                }
            },
            {
                "name": "recommendDestinations",
                "description": "Suggest destinations matching interests and budget",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "interests": {"type": "array", "items": {"type": "string"}},
                        "budget": {"type": "string", "enum": ["budget", "mid-range", "luxury"]},
                        "climate": {"type": "string"},
                        "count": {"type": "integer", "default": 5}
                    }
                }
            },
            {
                "name": "generateItinerary",
                "description": "Build a day-by-day itinerary",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "destination": {"type": "string"},
                        "days": {"type": "integer", "minimum": 1},
                        "interests": {"type": "array", "items": {"type": "string"}},
                        "pace": {"type": "string", "enum": ["relaxed", "moderate", "packed"]}
                    },
                    "required": ["destination", "days"]
                }
            },
            {
                "name": "estimateBudget",
                "description": "Estimate trip costs by category",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "destination": {"type": "string"},
                        "duration": {"type": "integer", "minimum": 1},
                        "travelers": {"type": "integer", "minimum": 1},
                        "style": {"type": "string", "enum": ["budget", "mid-range", "luxury"]}
                    },
                    "required": ["destination", "duration"]
                }
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ag_ui_run_input() {
        let req: AgentRequest = serde_json::from_str(
            r#"{
                "threadId": "t-1",
                "runId": "ignored",
                "messages": [{"id": "m1", "role": "user", "content": "Plan Lisbon"}],
                "tools": [],
                "state": {}
            }"#,
        )
        .unwrap();

        let cmd = AgentTurnCommand::from(req);
        assert_eq!(cmd.thread_id.as_deref(), Some("t-1"));
        assert_eq!(cmd.messages, vec![HistoryRecord::new("user", "Plan Lisbon")]);
    }

    #[test]
    fn blank_thread_id_is_treated_as_absent() {
        let req: AgentRequest =
            serde_json::from_str(r#"{"threadId": " ", "messages": []}"#).unwrap();
        assert!(AgentTurnCommand::from(req).thread_id.is_none());
    }

    #[test]
    fn descriptor_lists_four_actions() {
        let descriptor = agent_descriptor();
        assert_eq!(descriptor["protocol"], "ag-ui");
        assert_eq!(descriptor["version"], "2.0.0");
        let names: Vec<&str> = descriptor["actions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            ["planTrip", "recommendDestinations", "generateItinerary", "estimateBudget"]
        );
    }
}
