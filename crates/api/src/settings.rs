// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The per-location settings known to the service.

use roomboard_domain::{LocationSettings, service_date_in_zone};
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;
use time::OffsetDateTime;

/// Settings loading errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// The settings document is not valid JSON or has the wrong shape.
    #[error("Settings could not be parsed: {0}")]
    Parse(String),

    /// Two entries share a location identifier.
    #[error("Location '{0}' is configured more than once")]
    DuplicateLocation(String),

    /// A location identifier is blank.
    #[error("Location identifiers cannot be blank")]
    BlankLocation,

    /// A location names a timezone that does not exist.
    #[error("Location '{location}' uses unknown timezone '{timezone}'")]
    UnknownTimezone { location: String, timezone: String },
}

#[derive(Deserialize)]
struct SettingsDocument {
    locations: Vec<LocationSettings>,
}

/// Settings of every configured location, keyed by location identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsRegistry {
    locations: BTreeMap<String, LocationSettings>,
}

impl SettingsRegistry {
    /// Builds a registry, validating every location.
    ///
    /// # Errors
    ///
    /// Returns an error if a location is blank, duplicated, or uses an
    /// unknown timezone.
    pub fn new(locations: Vec<LocationSettings>) -> Result<Self, SettingsError> {
        let mut registry: Self = Self::default();
        for settings in locations {
            registry.insert(settings)?;
        }
        Ok(registry)
    }

    /// Parses a settings document of the form `{"locations": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let document: SettingsDocument =
            serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))?;
        Self::new(document.locations)
    }

    /// Adds a location.
    ///
    /// # Errors
    ///
    /// Returns an error if the location is blank, already present, or uses
    /// an unknown timezone.
    pub fn insert(&mut self, settings: LocationSettings) -> Result<(), SettingsError> {
        let id: String = settings.id.trim().to_string();
        if id.is_empty() {
            return Err(SettingsError::BlankLocation);
        }
        if self.locations.contains_key(&id) {
            return Err(SettingsError::DuplicateLocation(id));
        }
        if service_date_in_zone(OffsetDateTime::now_utc(), &settings.timezone).is_err() {
            return Err(SettingsError::UnknownTimezone {
                location: id,
                timezone: settings.timezone,
            });
        }
        self.locations.insert(id, settings);
        Ok(())
    }

    /// Returns the settings of a location.
    #[must_use]
    pub fn get(&self, location_id: &str) -> Option<&LocationSettings> {
        self.locations.get(location_id.trim())
    }

    /// Returns every location in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &LocationSettings> {
        self.locations.values()
    }

    /// Returns the number of configured locations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns true if no location is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
