//! HTTP DTOs for trip endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::trip::ShareTripResult;
use crate::domain::foundation::Timestamp;
use crate::domain::trip::{NewTrip, Trip, TripChanges, TripStatus};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTripRequest {
    pub name: String,
    #[serde(default)]
    pub status: Option<TripStatus>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub travelers: Option<u32>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<CreateTripRequest> for NewTrip {
    fn from(req: CreateTripRequest) -> Self {
        let mut new = NewTrip::named(req.name);
        if let Some(status) = req.status {
            new.status = status;
        }
        if let Some(travelers) = req.travelers {
            new.travelers = travelers;
        }
        if let Some(currency) = req.currency {
            new.currency = currency;
        }
        new.destination = req.destination;
        new.start_date = req.start_date;
        new.end_date = req.end_date;
        new.budget = req.budget;
        new.notes = req.notes;
        new
    }
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTripRequest {
    pub name: Option<String>,
    pub status: Option<TripStatus>,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub travelers: Option<u32>,
    pub budget: Option<f64>,
    pub currency: Option<String>,
    pub notes: Option<String>,
}

impl From<UpdateTripRequest> for TripChanges {
    fn from(req: UpdateTripRequest) -> Self {
        TripChanges {
            name: req.name,
            status: req.status,
            destination: req.destination,
            start_date: req.start_date,
            end_date: req.end_date,
            travelers: req.travelers,
            budget: req.budget,
            currency: req.currency,
            notes: req.notes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TripResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub status: TripStatus,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub travelers: u32,
    pub budget: Option<f64>,
    pub currency: String,
    pub notes: Option<String>,
    pub share_id: Option<String>,
    pub duration_days: Option<i64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Trip> for TripResponse {
    fn from(trip: Trip) -> Self {
        Self {
            duration_days: trip.duration_days(),
            id: trip.id.to_string(),
            user_id: trip.owner.to_string(),
            name: trip.name,
            status: trip.status,
            destination: trip.destination,
            start_date: trip.start_date,
            end_date: trip.end_date,
            travelers: trip.travelers,
            budget: trip.budget,
            currency: trip.currency,
            notes: trip.notes,
            share_id: trip.share_id.map(|s| s.to_string()),
            created_at: trip.created_at,
            updated_at: trip.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ShareTripResponse {
    pub share_id: String,
    pub share_url: String,
}

impl From<ShareTripResult> for ShareTripResponse {
    fn from(result: ShareTripResult) -> Self {
        Self {
            share_id: result.share_id.to_string(),
            share_url: result.share_url,
        }
    }
}
