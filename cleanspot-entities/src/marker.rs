use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};
use strum::EnumString;
use thiserror::Error;

use crate::{id::*, time::*};

pub type MarkerStatusPrimitive = i16;

/// Lifecycle of a reported littered location.
///
/// The status only ever advances: `Active` -> `Cleaned` on the first
/// approved AFTER photo, and `Active`/`Cleaned` -> `Removed` on explicit
/// removal by the reporter. It never reverts to `Active`.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, FromPrimitive, ToPrimitive, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum MarkerStatus {
    Active  = 0,
    Cleaned = 1,
    Removed = 2,
}

impl MarkerStatus {
    pub const fn default() -> Self {
        Self::Active
    }
}

#[derive(Debug, Error)]
#[error("Invalid marker status primitive: {0}")]
pub struct InvalidMarkerStatusPrimitive(MarkerStatusPrimitive);

impl TryFrom<MarkerStatusPrimitive> for MarkerStatus {
    type Error = InvalidMarkerStatusPrimitive;
    fn try_from(from: MarkerStatusPrimitive) -> Result<Self, Self::Error> {
        Self::from_i16(from).ok_or(InvalidMarkerStatusPrimitive(from))
    }
}

impl From<MarkerStatus> for MarkerStatusPrimitive {
    fn from(from: MarkerStatus) -> Self {
        from.to_i16().expect("Marker status primitive")
    }
}

/// Geographic position of a marker in decimal degrees.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A reported littered location.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id          : Id,
    pub coordinates : Coordinates,
    pub description : String,
    pub address     : Option<String>,
    pub status      : MarkerStatus,
    pub reported_by : Id,
    pub created_at  : Timestamp,
    pub updated_at  : Timestamp,
}

impl Marker {
    /// Advances `Active` -> `Cleaned`.
    ///
    /// Returns `false` without modifying anything if the marker is not
    /// `Active`, i.e. the transition has already happened or the marker
    /// has been removed.
    pub fn mark_cleaned(&mut self, at: Timestamp) -> bool {
        if self.status != MarkerStatus::Active {
            return false;
        }
        self.status = MarkerStatus::Cleaned;
        self.updated_at = at;
        true
    }

    pub fn is_active(&self) -> bool {
        self.status == MarkerStatus::Active
    }

    pub fn is_cleaned(&self) -> bool {
        self.status == MarkerStatus::Cleaned
    }

    pub fn is_removed(&self) -> bool {
        self.status == MarkerStatus::Removed
    }
}
