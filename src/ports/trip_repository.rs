//! Trip repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ShareId, TripId, UserId};
use crate::domain::trip::Trip;

/// Persistence for trips.
///
/// Everything else keyed by a trip is only reached through an owned trip,
/// so deleted trips take their itinerary and checklists out of reach. The
/// PostgreSQL schema also cascades the delete.
#[async_trait]
pub trait TripRepository: Send + Sync {
    async fn save(&self, trip: &Trip) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `TripNotFound` if the trip doesn't exist
    async fn update(&self, trip: &Trip) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &TripId) -> Result<Option<Trip>, DomainError>;

    async fn find_by_share_id(&self, share_id: &ShareId) -> Result<Option<Trip>, DomainError>;

    /// Trips owned by a user, most recently updated first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Trip>, DomainError>;

    /// # Errors
    ///
    /// - `TripNotFound` if the trip doesn't exist
    async fn delete(&self, id: &TripId) -> Result<(), DomainError>;
}
