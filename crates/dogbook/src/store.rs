//! The dog record store.
//!
//! All records live in one JSON array stored under a single key of a
//! [`RecordStore`]. Every mutation reads the whole array, changes it in
//! memory, and writes the whole array back.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::dog::{self, DogRecord};
use crate::error::{Error, Result};
use crate::storage::RecordStore;

/// Key the collection is stored under unless configured otherwise.
pub const DEFAULT_COLLECTION_KEY: &str = "dogs";

/// Durable CRUD over the collection of [`DogRecord`] values.
///
/// Reads never fail: an unreadable or malformed collection is logged and
/// treated as empty. Writes always report failure, and refuse to run on
/// top of a collection they cannot read, so stored data is never replaced
/// by accident.
///
/// Mutations on one `DogStore` are serialized, so concurrent writers
/// sharing it cannot lose each other's updates.
#[derive(Debug)]
pub struct DogStore<S> {
    backend: S,
    key: String,
    write_lock: Mutex<()>,
}

/// How many records fall on each side of the met/mine split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DogCounts {
    /// Dogs the user met.
    pub met: usize,
    /// Dogs the user owns.
    pub mine: usize,
}

impl DogCounts {
    /// Count the records in a collection.
    #[must_use]
    pub fn of(dogs: &[DogRecord]) -> Self {
        let mine = dogs.iter().filter(|dog| dog.is_mine()).count();
        Self {
            met: dogs.len() - mine,
            mine,
        }
    }

    /// Total number of records.
    #[must_use]
    pub fn total(&self) -> usize {
        self.met + self.mine
    }
}

impl<S: RecordStore> DogStore<S> {
    /// Create a store over `backend` using [`DEFAULT_COLLECTION_KEY`].
    #[must_use]
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_COLLECTION_KEY)
    }

    /// Create a store over `backend` using a custom collection key.
    #[must_use]
    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The key the collection is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying persistence service.
    #[must_use]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// All records, in storage order.
    ///
    /// Returns an empty list if nothing is stored or the stored value
    /// cannot be read.
    pub async fn list_all(&self) -> Vec<DogRecord> {
        match self.load().await {
            Ok(dogs) => dogs,
            Err(err @ Error::MalformedData { .. }) => {
                warn!("Ignoring unreadable dog collection: {}", err);
                Vec::new()
            }
            Err(err) => {
                error!("Error loading dogs from storage: {}", err);
                Vec::new()
            }
        }
    }

    /// Records of dogs the user met (`isMine` absent or false).
    pub async fn list_met(&self) -> Vec<DogRecord> {
        self.list_all()
            .await
            .into_iter()
            .filter(DogRecord::is_met)
            .collect()
    }

    /// Records of the user's own dogs (`isMine` true).
    pub async fn list_mine(&self) -> Vec<DogRecord> {
        self.list_all()
            .await
            .into_iter()
            .filter(DogRecord::is_mine)
            .collect()
    }

    /// Look up a record by id.
    pub async fn get_by_id(&self, id: &str) -> Option<DogRecord> {
        self.list_all().await.into_iter().find(|dog| dog.id == id)
    }

    /// Count met and owned dogs.
    pub async fn counts(&self) -> DogCounts {
        DogCounts::of(&self.list_all().await)
    }

    /// Append a new record.
    ///
    /// The record is stored exactly as given; the caller assigns its id
    /// and timestamps (see [`crate::dog::NewDog::into_record`]).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `updatedAt` is earlier than
    /// `createdAt`, [`Error::AlreadyExists`] if a record with the same id
    /// is stored, or a persistence error if the collection cannot be read
    /// or written.
    pub async fn create(&self, record: DogRecord) -> Result<()> {
        if record.updated_at < record.created_at {
            return Err(Error::validation(format!(
                "dog {} was updated before it was created",
                record.id
            )));
        }

        let _guard = self.write_lock.lock().await;
        let mut dogs = self.load().await?;

        if dogs.iter().any(|dog| dog.id == record.id) {
            return Err(Error::already_exists(record.id));
        }

        let id = record.id.clone();
        dogs.push(record);
        self.save(&dogs).await?;

        info!("Created dog {}", id);
        Ok(())
    }

    /// Replace a stored record with the caller's version.
    ///
    /// `id`, `createdAt`, `metAt` and `isMine` are kept from the stored
    /// record. `updatedAt` is set to the current time, always later than
    /// the previous value. Unknown fields of the stored record are kept
    /// unless the caller's version overrides them. Returns the record as
    /// stored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record has the given id, or a
    /// persistence error if the collection cannot be read or written.
    pub async fn update(&self, record: DogRecord) -> Result<DogRecord> {
        let _guard = self.write_lock.lock().await;
        let mut dogs = self.load().await?;

        let Some(slot) = dogs.iter_mut().find(|dog| dog.id == record.id) else {
            return Err(Error::not_found(record.id));
        };

        let mut extra = slot.extra.clone();
        extra.extend(record.extra);

        let updated = DogRecord {
            id: slot.id.clone(),
            met_at: slot.met_at,
            created_at: slot.created_at,
            is_mine: slot.is_mine,
            updated_at: next_updated_at(slot, dog::now()),
            extra,
            ..record
        };
        *slot = updated.clone();
        self.save(&dogs).await?;

        info!("Updated dog {}", updated.id);
        Ok(updated)
    }

    /// Remove a record by id.
    ///
    /// Removing an id that is not stored is not an error. Returns the
    /// removed record so the caller can offer to restore it with
    /// [`DogStore::create`].
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the collection cannot be read or written.
    pub async fn delete(&self, id: &str) -> Result<Option<DogRecord>> {
        let _guard = self.write_lock.lock().await;
        let mut dogs = self.load().await?;

        let removed = dogs
            .iter()
            .position(|dog| dog.id == id)
            .map(|index| dogs.remove(index));
        dogs.retain(|dog| dog.id != id);
        self.save(&dogs).await?;

        if removed.is_some() {
            info!("Deleted dog {}", id);
        } else {
            debug!("Delete of unknown dog {} was a no-op", id);
        }
        Ok(removed)
    }

    /// Read and decode the collection, propagating every failure.
    async fn load(&self) -> Result<Vec<DogRecord>> {
        let Some(json) = self.backend.get(&self.key).await? else {
            debug!("No collection stored under '{}'", self.key);
            return Ok(Vec::new());
        };

        let dogs: Vec<DogRecord> =
            serde_json::from_str(&json).map_err(|source| Error::MalformedData {
                key: self.key.clone(),
                source,
            })?;
        debug!("Loaded {} dogs from '{}'", dogs.len(), self.key);
        Ok(dogs)
    }

    async fn save(&self, dogs: &[DogRecord]) -> Result<()> {
        let json = serde_json::to_string(dogs)?;
        self.backend.set(&self.key, &json).await
    }
}

/// Pick the next `updatedAt` for a record: `now`, unless the clock has not
/// moved past the record's existing timestamps. Steps are one millisecond,
/// the stored precision.
fn next_updated_at(stored: &DogRecord, now: DateTime<Utc>) -> DateTime<Utc> {
    let floor = stored.updated_at.max(stored.created_at);
    if now > floor {
        now
    } else {
        floor + Duration::milliseconds(1)
    }
}
