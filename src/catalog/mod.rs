//! Refreshment points: the sample domain wired onto the generic pieces.
//!
//! Used by the demo binary and the integration tests.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::connection::GuardedStore;
use crate::record::IdStrategy;
use crate::service::RecordService;
use crate::store::{InMemoryStore, StoreError};
use crate::validation::Validator;
use crate::Record;

/// Smallest and largest accepted seating capacity.
pub const CAPACITY_RANGE: std::ops::RangeInclusive<i64> = 1..=500;

/// Collection name, also the prefix of the controller's command names.
pub const COLLECTION: &str = "refreshment_points";

const SAMPLE_POINTS: &str = include_str!("refreshment_points.json");

/// A bar, kiosk or cafe along a tourist route.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Record)]
#[record(collection = "refreshment_points")]
pub struct RefreshmentPoint {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    #[record(search)]
    pub name: String,
    #[serde(default)]
    #[record(search)]
    pub location: String,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub open_from: Option<NaiveDate>,
    #[serde(default)]
    pub open_until: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl RefreshmentPoint {
    pub fn new(name: impl Into<String>, location: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            location: location.into(),
            capacity: Some(capacity),
            open_from: None,
            open_until: None,
            active: true,
        }
    }

    pub fn with_season(mut self, from: NaiveDate, until: NaiveDate) -> Self {
        self.open_from = Some(from);
        self.open_until = Some(until);
        self
    }
}

/// Rules for refreshment points.
pub fn validator() -> Validator<RefreshmentPoint> {
    Validator::new()
        .required("name", |p: &RefreshmentPoint| p.name.as_str())
        .required("location", |p: &RefreshmentPoint| p.location.as_str())
        .present("capacity", |p: &RefreshmentPoint| p.capacity.is_some())
        .range(
            "capacity",
            |p: &RefreshmentPoint| p.capacity.map(i64::from),
            CAPACITY_RANGE,
        )
        .ordered("open_from", "open_until", |p: &RefreshmentPoint| {
            (p.open_from, p.open_until)
        })
}

/// The three seeded points, RP001 to RP003.
pub fn sample_points() -> Result<Vec<RefreshmentPoint>, StoreError> {
    crate::store::load_fixture_json(SAMPLE_POINTS)
}

/// A store seeded with [`sample_points`], minting `RP004`, `RP005`, ...
pub fn sample_store(strategy: IdStrategy) -> Result<InMemoryStore<RefreshmentPoint>, StoreError> {
    InMemoryStore::with_id_strategy(strategy).with_records(sample_points()?)
}

pub type CatalogStore = InMemoryStore<RefreshmentPoint>;
pub type CatalogService = RecordService<RefreshmentPoint, CatalogStore>;

/// A service over the sample store, checking the configured connection
/// before every operation.
pub fn service(config: &SimulationConfig) -> Result<CatalogService, StoreError> {
    let store = sample_store(config.id_strategy.clone().unwrap_or_else(id_strategy))?;
    Ok(RecordService::new(store)
        .with_validator(validator())
        .with_connection(Arc::new(config.build_connection())))
}

/// Like [`service`], but the connection sits underneath the store so every
/// store call can fail on its own.
pub fn guarded_service(
    config: &SimulationConfig,
) -> Result<RecordService<RefreshmentPoint, GuardedStore<InMemoryStore<RefreshmentPoint>>>, StoreError>
{
    let store = sample_store(config.id_strategy.clone().unwrap_or_else(id_strategy))?;
    let connection = Arc::new(config.build_connection());
    Ok(RecordService::new(GuardedStore::new(store, connection)).with_validator(validator()))
}

/// Default id strategy for the catalog: `RP` plus three digits.
pub fn id_strategy() -> IdStrategy {
    IdStrategy::sequential("RP", 3)
}
