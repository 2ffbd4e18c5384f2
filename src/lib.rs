//! TripMate - travel planning backend with a streaming travel assistant.
//!
//! Users manage trips, itineraries, packing lists and todos over a JSON
//! API. The assistant answers either as a single JSON reply (`/api/chat`)
//! or as an AG-UI event stream (`/api/agent`) that relays model output
//! fragment by fragment.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
