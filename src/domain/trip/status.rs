use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Planning stage of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    #[default]
    Draft,
    Planned,
    Booked,
    Completed,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Draft => "draft",
            TripStatus::Planned => "planned",
            TripStatus::Booked => "booked",
            TripStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TripStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(TripStatus::Draft),
            "planned" => Ok(TripStatus::Planned),
            "booked" => Ok(TripStatus::Booked),
            "completed" => Ok(TripStatus::Completed),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown trip status '{}'", other),
            )),
        }
    }
}
