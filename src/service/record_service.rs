//! RecordService - CRUD operations over one store, run through the pipeline.

use std::sync::Arc;

use serde::Serialize;

use crate::connection::SimulatedConnection;
use crate::lock::SubmissionGuard;
use crate::record::Record;
use crate::store::{Filter, Store};
use crate::validation::{ValidationResult, Validator};

use super::{Pipeline, ServiceError};

/// Longest accepted search filter, in characters.
pub const MAX_FILTER_LEN: usize = 100;

/// Result of a delete. Deleting an absent id is not an error: it reports
/// `was_deleted: false`, every time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deletion {
    pub id: String,
    pub was_deleted: bool,
}

/// Orchestrates validation, the optional simulated connection and the store
/// for one record type.
///
/// The store handle is typically a clone of a shared [`InMemoryStore`](crate::InMemoryStore)
/// (or an `Arc`/reference), so the service never owns the records exclusively.
pub struct RecordService<R, S> {
    store: S,
    validator: Validator<R>,
    connection: Option<Arc<SimulatedConnection>>,
    submissions: SubmissionGuard,
    id_rules: Validator<str>,
    filter_rules: Validator<str>,
}

impl<R: Record + 'static, S: Store<R>> RecordService<R, S> {
    /// A service with no record rules and no simulated connection.
    pub fn new(store: S) -> Self {
        Self {
            store,
            validator: Validator::new(),
            connection: None,
            submissions: SubmissionGuard::new(),
            id_rules: Validator::new().required("id", |id: &str| id),
            filter_rules: Validator::new().max_len("filter", |filter: &str| filter, MAX_FILTER_LEN),
        }
    }

    /// Rules applied to records on create and update.
    pub fn with_validator(mut self, validator: Validator<R>) -> Self {
        self.validator = validator;
        self
    }

    /// Check this connection before executing each operation.
    pub fn with_connection(mut self, connection: Arc<SimulatedConnection>) -> Self {
        self.connection = Some(connection);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn connection(&self) -> Option<&Arc<SimulatedConnection>> {
        self.connection.as_ref()
    }

    pub fn submissions(&self) -> &SubmissionGuard {
        &self.submissions
    }

    pub fn collection(&self) -> &'static str {
        R::COLLECTION
    }

    fn pipeline(&self, operation: &'static str) -> Pipeline<'_> {
        Pipeline::new(operation).with_connection(self.connection.as_deref())
    }

    /// Look up one record. A missing id is `Ok(None)`.
    pub fn get(&self, id: &str) -> Result<Option<R>, ServiceError> {
        self.pipeline("get")
            .run(
                || self.id_rules.validate(id),
                || Ok(self.store.find_by_id(id.trim())?),
            )
            .into_result()
    }

    /// Records whose search fields contain `filter` (case-insensitive).
    /// An empty filter returns everything.
    pub fn search(&self, filter: &str) -> Result<Vec<R>, ServiceError> {
        self.pipeline("search")
            .run(
                || self.filter_rules.validate(filter.trim()),
                || Ok(self.store.find_all(&Filter::text(filter))?),
            )
            .into_result()
    }

    /// Every record.
    pub fn list(&self) -> Result<Vec<R>, ServiceError> {
        self.search("")
    }

    /// Validate and save a record. The store assigns an id if none is set.
    pub fn create(&self, record: R) -> Result<R, ServiceError> {
        let record = &trimmed_id(record);
        self.pipeline("create")
            .run(
                || self.validator.validate(record),
                || Ok(self.store.save(record.clone())?),
            )
            .into_result()
    }

    /// Validate and overwrite an existing record.
    pub fn update(&self, record: R) -> Result<R, ServiceError> {
        let record = &trimmed_id(record);
        let id = record.id().unwrap_or_default();

        self.pipeline("update")
            .run(
                || {
                    let mut result: ValidationResult = self.id_rules.validate(id);
                    result.merge(self.validator.validate(record));
                    result
                },
                || {
                    let _permit = self
                        .submissions
                        .try_begin(id)?
                        .ok_or_else(|| ServiceError::InProgress(id.to_string()))?;

                    if self.store.find_by_id(id)?.is_none() {
                        return Err(ServiceError::NotFound {
                            collection: R::COLLECTION.to_string(),
                            id: id.to_string(),
                        });
                    }
                    Ok(self.store.save(record.clone())?)
                },
            )
            .into_result()
    }

    /// Remove a record. Deleting an id that is not there succeeds with
    /// `was_deleted: false`.
    pub fn delete(&self, id: &str) -> Result<Deletion, ServiceError> {
        let id = id.trim();
        self.pipeline("delete")
            .run(
                || self.id_rules.validate(id),
                || {
                    let _permit = self
                        .submissions
                        .try_begin(id)?
                        .ok_or_else(|| ServiceError::InProgress(id.to_string()))?;

                    let was_deleted = self.store.delete(id)?;
                    Ok(Deletion {
                        id: id.to_string(),
                        was_deleted,
                    })
                },
            )
            .into_result()
    }
}

/// Strip surrounding whitespace from the record's id so lookups and saves
/// agree on the key.
fn trimmed_id<R: Record>(mut record: R) -> R {
    let trimmed = record.id().map(|id| id.trim().to_string());
    if let Some(id) = trimmed {
        if record.id() != Some(id.as_str()) {
            record.set_id(id);
        }
    }
    record
}
