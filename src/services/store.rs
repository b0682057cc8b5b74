//! Record Storage
//!
//! Saved checkout records (addresses, payment methods) kept behind an opaque
//! string id with an optional default marker. The checkout flow reads from a
//! store to populate the assembler's inputs; account pages drive the CRUD.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::checkout::{Address, PaymentMethod};

/// Errors from record storage operations.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    /// No record exists under the given id.
    #[error("no record with id {0:?}")]
    NotFound(String),

    /// A record already exists under the given id.
    #[error("a record with id {0:?} already exists")]
    DuplicateId(String),
}

/// In-memory CRUD store keyed by opaque record id.
#[derive(Debug)]
pub struct RecordStore<T> {
    records: FxHashMap<String, T>,
    default_id: Option<String>,
}

/// Saved delivery addresses.
pub type AddressBook = RecordStore<Address>;

/// Saved payment methods.
pub type Wallet = RecordStore<PaymentMethod>;

impl<T> RecordStore<T> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: FxHashMap::default(),
            default_id: None,
        }
    }

    /// Insert a new record under `id`.
    ///
    /// The first record created becomes the default.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if a record already exists under `id`.
    pub fn create(&mut self, id: impl Into<String>, record: T) -> Result<(), StoreError> {
        let id = id.into();

        if self.records.contains_key(&id) {
            return Err(StoreError::DuplicateId(id));
        }

        if self.default_id.is_none() {
            self.default_id = Some(id.clone());
        }

        self.records.insert(id, record);

        Ok(())
    }

    /// Fetch the record stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record exists under `id`.
    pub fn fetch(&self, id: &str) -> Result<&T, StoreError> {
        self.records
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Replace the record stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record exists under `id`.
    pub fn update(&mut self, id: &str, record: T) -> Result<(), StoreError> {
        let slot = self
            .records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        *slot = record;

        Ok(())
    }

    /// Delete and return the record stored under `id`.
    ///
    /// If the deleted record was the default, the default marker is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record exists under `id`.
    pub fn delete(&mut self, id: &str) -> Result<T, StoreError> {
        let record = self
            .records
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if self.default_id.as_deref() == Some(id) {
            self.default_id = None;
        }

        Ok(record)
    }

    /// Mark the record stored under `id` as the default.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record exists under `id`.
    pub fn set_default(&mut self, id: &str) -> Result<(), StoreError> {
        if !self.records.contains_key(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }

        self.default_id = Some(id.to_string());

        Ok(())
    }

    /// The default record, if one is set.
    #[must_use]
    pub fn default_record(&self) -> Option<&T> {
        self.default_id
            .as_deref()
            .and_then(|id| self.records.get(id))
    }

    /// The id of the default record, if one is set.
    #[must_use]
    pub fn default_id(&self) -> Option<&str> {
        self.default_id.as_deref()
    }

    /// The number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
