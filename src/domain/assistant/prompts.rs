//! Fixed prompt text sent to the language model.

use serde_json::Value;

/// System persona placed first in every turn context.
pub const TRAVEL_ASSISTANT_PERSONA: &str = r#"You are TripMate AI, a travel planning assistant. You help travellers choose destinations, plan trips day by day and keep their budget realistic.

WHAT YOU CAN DO:
- Recommend destinations that fit the traveller's interests, season and budget
- Build detailed day-by-day itineraries
- Estimate trip costs and daily budgets
- Suggest activities, restaurants and places to stay
- Share practical tips: visas, transport, packing, local customs

HOW YOU WORK:
1. Ask a clarifying question when dates, budget, interests or group size are missing
2. Account for budget, travel dates, who is travelling and accessibility needs
3. Give specific recommendations with costs, opening hours and booking requirements
4. Say so when you are unsure, and mention seasonality or local events that matter

RESPONSE STYLE:
- Conversational and concise
- Structured lists for itineraries and recommendations
- Briefly explain why each recommendation fits, and offer alternatives

When you recommend destinations, include a fenced ```json block shaped like:
{
  "recommendations": [
    {
      "name": "City",
      "country": "Country",
      "match_score": 85,
      "match_reasons": ["reason"],
      "best_time_to_visit": "March-May",
      "daily_budget": {"budget": 50, "mid_range": 100, "luxury": 250},
      "highlights": ["highlight"],
      "pros": ["pro"],
      "cons": ["con"]
    }
  ]
}

When you produce an itinerary, include it as a fenced ```json block with day-by-day activities."#;

/// Trip facts used to ask the model for an itinerary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItineraryRequest {
    pub destination: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub travelers: u32,
    pub budget: Option<f64>,
    pub currency: String,
    pub notes: Option<String>,
    pub preferences: Option<Value>,
}

fn or_unknown(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("Not specified")
}

/// Builds the user prompt asking for a JSON itinerary document.
pub fn itinerary_prompt(request: &ItineraryRequest) -> String {
    let budget = request
        .budget
        .map(|b| format!("{} {}", b, request.currency))
        .unwrap_or_else(|| "Not specified".to_string());
    let preferences = request
        .preferences
        .as_ref()
        .map(|p| format!("\nAdditional preferences: {}\n", p))
        .unwrap_or_default();

    format!(
        r#"Create a detailed day-by-day itinerary for this trip.

Destination: {destination}
Start date: {start}
End date: {end}
Travelers: {travelers}
Budget: {budget}
Notes: {notes}
{preferences}
Answer with a single fenced ```json block using this structure:
{{
  "destination": "destination name",
  "start_date": "YYYY-MM-DD",
  "end_date": "YYYY-MM-DD",
  "days": [
    {{
      "day_number": 1,
      "date": "YYYY-MM-DD",
      "theme": "Day theme",
      "activities": [
        {{
          "id": "act_1",
          "name": "Activity name",
          "type": "attraction|activity|transport|rest",
          "time_slot": "morning|afternoon|evening",
          "start_time": "HH:MM",
          "duration": 120,
          "location": {{"name": "Location", "address": "Address"}},
          "cost": 0,
          "currency": "{currency}",
          "booking_required": false,
          "notes": "Optional notes"
        }}
      ],
      "meals": [
        {{
          "type": "breakfast|lunch|dinner",
          "suggestion": "Restaurant name",
          "cuisine": "Cuisine type",
          "price_range": "$|$$|$$$",
          "location": "Area"
        }}
      ],
      "daily_cost": 150
    }}
  ],
  "total_estimated_cost": 1500,
  "notes": ["Tip"]
}}"#,
        destination = or_unknown(&request.destination),
        start = or_unknown(&request.start_date),
        end = or_unknown(&request.end_date),
        travelers = request.travelers,
        budget = budget,
        notes = request.notes.as_deref().unwrap_or("None"),
        preferences = preferences,
        currency = request.currency,
    )
}
