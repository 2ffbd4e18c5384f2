//! Trip aggregate.

use chrono::NaiveDate;

use super::status::TripStatus;
use crate::domain::foundation::{ShareId, Timestamp, TripId, UserId, ValidationError};

pub const DEFAULT_CURRENCY: &str = "USD";

const MAX_NAME_LEN: usize = 200;
const MAX_TRAVELERS: u32 = 100;

/// Fields supplied when creating a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrip {
    pub name: String,
    pub status: TripStatus,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub travelers: u32,
    pub budget: Option<f64>,
    pub currency: String,
    pub notes: Option<String>,
}

impl NewTrip {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TripStatus::Draft,
            destination: None,
            start_date: None,
            end_date: None,
            travelers: 1,
            budget: None,
            currency: DEFAULT_CURRENCY.to_string(),
            notes: None,
        }
    }
}

/// Partial update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripChanges {
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

#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub id: TripId,
    pub owner: UserId,
    pub name: String,
    pub status: TripStatus,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub travelers: u32,
    pub budget: Option<f64>,
    pub currency: String,
    pub notes: Option<String>,
    pub share_id: Option<ShareId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl Trip {
    pub fn create(owner: UserId, new: NewTrip) -> Result<Self, ValidationError> {
        let now = Timestamp::now();
        let trip = Self {
            id: TripId::new(),
            owner,
            name: new.name.trim().to_string(),
            status: new.status,
            destination: non_blank(new.destination),
            start_date: new.start_date,
            end_date: new.end_date,
            travelers: new.travelers,
            budget: new.budget,
            currency: new.currency.trim().to_ascii_uppercase(),
            notes: non_blank(new.notes),
            share_id: None,
            created_at: now,
            updated_at: now,
        };
        trip.validate()?;
        Ok(trip)
    }

    /// Applies a partial update; the trip is left untouched on error.
    pub fn apply(&mut self, changes: TripChanges) -> Result<(), ValidationError> {
        let mut next = self.clone();
        if let Some(name) = changes.name {
            next.name = name.trim().to_string();
        }
        if let Some(status) = changes.status {
            next.status = status;
        }
        if changes.destination.is_some() {
            next.destination = non_blank(changes.destination);
        }
        if let Some(date) = changes.start_date {
            next.start_date = Some(date);
        }
        if let Some(date) = changes.end_date {
            next.end_date = Some(date);
        }
        if let Some(travelers) = changes.travelers {
            next.travelers = travelers;
        }
        if let Some(budget) = changes.budget {
            next.budget = Some(budget);
        }
        if let Some(currency) = changes.currency {
            next.currency = currency.trim().to_ascii_uppercase();
        }
        if changes.notes.is_some() {
            next.notes = non_blank(changes.notes);
        }
        next.validate()?;
        next.updated_at = Timestamp::now();
        *self = next;
        Ok(())
    }

    /// Copy owned by the same user, reset to draft and unshared.
    pub fn duplicate(&self) -> Self {
        let now = Timestamp::now();
        Self {
            id: TripId::new(),
            name: format!("{} (Copy)", self.name),
            status: TripStatus::Draft,
            share_id: None,
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }

    /// Returns the share token, minting it on first use.
    pub fn share(&mut self) -> &ShareId {
        if self.share_id.is_none() {
            self.updated_at = Timestamp::now();
        }
        self.share_id.get_or_insert_with(ShareId::generate)
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }

    /// Inclusive length in days when both dates are known.
    pub fn duration_days(&self) -> Option<i64> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((end - start).num_days() + 1),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::out_of_range(
                "name",
                1,
                MAX_NAME_LEN as i64,
                self.name.chars().count() as i64,
            ));
        }
        if self.travelers == 0 || self.travelers > MAX_TRAVELERS {
            return Err(ValidationError::out_of_range(
                "travelers",
                1,
                MAX_TRAVELERS as i64,
                self.travelers as i64,
            ));
        }
        if let Some(budget) = self.budget {
            if !budget.is_finite() || budget < 0.0 {
                return Err(ValidationError::invalid_format(
                    "budget",
                    "must be a non-negative amount",
                ));
            }
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::invalid_format(
                "currency",
                "expected a three-letter currency code",
            ));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(ValidationError::invalid_format(
                    "end_date",
                    "must not be before start_date",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn lisbon(owner: UserId) -> Trip {
        let mut new = NewTrip::named("Lisbon long weekend");
        new.destination = Some("Lisbon".to_string());
        new.start_date = Some(date("2025-05-01"));
        new.end_date = Some(date("2025-05-03"));
        new.currency = "eur".to_string();
        Trip::create(owner, new).unwrap()
    }

    #[test]
    fn create_applies_defaults_and_normalises() {
        let trip = lisbon(UserId::new());
        assert_eq!(trip.status, TripStatus::Draft);
        assert_eq!(trip.travelers, 1);
        assert_eq!(trip.currency, "EUR");
        assert_eq!(trip.duration_days(), Some(3));
        assert!(trip.share_id.is_none());
    }

    #[test]
    fn create_rejects_invalid_fields() {
        let owner = UserId::new();
        assert!(Trip::create(owner, NewTrip::named("   ")).is_err());

        let mut new = NewTrip::named("Trip");
        new.travelers = 0;
        assert!(Trip::create(owner, new).is_err());

        let mut new = NewTrip::named("Trip");
        new.currency = "EURO".to_string();
        assert!(Trip::create(owner, new).is_err());

        let mut new = NewTrip::named("Trip");
        new.budget = Some(-5.0);
        assert!(Trip::create(owner, new).is_err());

        let mut new = NewTrip::named("Trip");
        new.start_date = Some(date("2025-05-03"));
        new.end_date = Some(date("2025-05-01"));
        assert!(Trip::create(owner, new).is_err());
    }

    #[test]
    fn apply_updates_only_given_fields() {
        let mut trip = lisbon(UserId::new());
        trip.apply(TripChanges {
            status: Some(TripStatus::Booked),
            travelers: Some(2),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(trip.status, TripStatus::Booked);
        assert_eq!(trip.travelers, 2);
        assert_eq!(trip.destination.as_deref(), Some("Lisbon"));
    }

    #[test]
    fn invalid_update_leaves_trip_unchanged() {
        let mut trip = lisbon(UserId::new());
        let before = trip.clone();
        let result = trip.apply(TripChanges {
            name: Some("Renamed".to_string()),
            end_date: Some(date("2025-04-01")),
            ..Default::default()
        });

        assert!(result.is_err());
        assert_eq!(trip, before);
    }

    #[test]
    fn duplicate_is_fresh_draft_copy() {
        let mut trip = lisbon(UserId::new());
        trip.status = TripStatus::Booked;
        trip.share();

        let copy = trip.duplicate();
        assert_ne!(copy.id, trip.id);
        assert_eq!(copy.name, "Lisbon long weekend (Copy)");
        assert_eq!(copy.status, TripStatus::Draft);
        assert!(copy.share_id.is_none());
        assert_eq!(copy.owner, trip.owner);
        assert_eq!(copy.destination, trip.destination);
    }

    #[test]
    fn share_id_is_minted_once() {
        let mut trip = lisbon(UserId::new());
        let first = trip.share().clone();
        let second = trip.share().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn duration_needs_both_dates() {
        let trip = Trip::create(UserId::new(), NewTrip::named("Someday")).unwrap();
        assert_eq!(trip.duration_days(), None);
    }
}
