//! `dogbook` - A local record keeper for the dogs you meet and the dogs you own
//!
//! This library stores dog records as one JSON collection under a single
//! key of an asynchronous key-value service, and offers create, read,
//! update, delete and filtered list operations over it.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod dog;
pub mod error;
pub mod logging;
pub mod query;
pub mod storage;
pub mod store;

pub use config::Config;
pub use dog::{DogRecord, NewDog};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use query::{DogQuery, SortKey, SortOrder};
pub use storage::{MemoryRecordStore, RecordStore, SqliteRecordStore};
pub use store::{DogCounts, DogStore};
