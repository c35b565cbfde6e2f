//! Dog record types for dogbook.
//!
//! This module defines the persisted [`DogRecord`] entity, the [`NewDog`]
//! draft that callers fill in before creating one, and the input
//! validation helpers applied before anything reaches the store.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{Error, Result};

/// A dog the user has met or owns.
///
/// Serialized with camelCase field names; absent optional fields are
/// omitted rather than written as `null`. Timestamps are written as
/// RFC 3339 with millisecond precision (`2024-05-01T10:30:00.000Z`).
///
/// Fields this type does not know about are kept in [`DogRecord::extra`]
/// and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DogRecord {
    /// Opaque unique identifier, assigned at creation.
    pub id: String,

    /// The dog's name.
    pub name: String,

    /// The dog's breed.
    pub breed: String,

    /// Reference to an externally stored photo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_uri: Option<String>,

    /// Where the user met the dog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub met_location_text: Option<String>,

    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// When the user met the dog.
    #[serde(serialize_with = "serialize_timestamp")]
    pub met_at: DateTime<Utc>,

    /// When the record was created. Never changes.
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,

    /// When the record was last written.
    #[serde(serialize_with = "serialize_timestamp")]
    pub updated_at: DateTime<Utc>,

    /// `Some(true)` for a dog the user owns; absent or `false` for a dog they met.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_mine: Option<bool>,

    /// Stored fields outside this model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn serialize_timestamp<S: Serializer>(
    value: &DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// The current time, at the precision timestamps are stored with.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

impl DogRecord {
    /// Whether this record is one of the user's own dogs.
    #[must_use]
    pub fn is_mine(&self) -> bool {
        self.is_mine.unwrap_or(false)
    }

    /// Whether this record is a dog the user met but does not own.
    #[must_use]
    pub fn is_met(&self) -> bool {
        !self.is_mine()
    }
}

/// Caller-side draft of a new dog, as entered in a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewDog {
    /// Name as typed; normalized before storage.
    pub name: String,
    /// Breed as selected.
    pub breed: String,
    /// Optional photo reference.
    pub photo_uri: Option<String>,
    /// Optional meeting place.
    pub met_location_text: Option<String>,
    /// Optional notes.
    pub notes: Option<String>,
    /// Mark the dog as owned by the user.
    pub is_mine: bool,
}

impl NewDog {
    /// Create a draft with the two required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, breed: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            breed: breed.into(),
            ..Self::default()
        }
    }

    /// Validate the draft and turn it into a complete record.
    ///
    /// Assigns a fresh UUID and sets `metAt`, `createdAt` and `updatedAt`
    /// to [`now`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the name or breed is blank.
    pub fn into_record(self) -> Result<DogRecord> {
        self.into_record_at(Uuid::new_v4().to_string(), now())
    }

    /// Like [`NewDog::into_record`], with an explicit id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the name or breed is blank.
    pub fn into_record_at(self, id: String, now: DateTime<Utc>) -> Result<DogRecord> {
        validate_dog_input(&self.name, &self.breed)?;

        Ok(DogRecord {
            id,
            name: normalize_name(&self.name).to_string(),
            breed: self.breed.trim().to_string(),
            photo_uri: non_blank(self.photo_uri),
            met_location_text: non_blank(self.met_location_text),
            notes: non_blank(self.notes),
            met_at: now,
            created_at: now,
            updated_at: now,
            is_mine: self.is_mine.then_some(true),
            extra: Map::new(),
        })
    }
}

/// Trim a name for comparison and storage.
#[must_use]
pub fn normalize_name(name: &str) -> &str {
    name.trim()
}

/// Check that a dog's required fields are present.
///
/// # Errors
///
/// Returns [`Error::Validation`] with a user-facing message when the
/// trimmed name or the trimmed breed is empty.
pub fn validate_dog_input(name: &str, breed: &str) -> Result<()> {
    if normalize_name(name).is_empty() {
        return Err(Error::validation("Name is required"));
    }
    if breed.trim().is_empty() {
        return Err(Error::validation("Breed is required"));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
