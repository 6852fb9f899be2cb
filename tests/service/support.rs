//! Shared fixtures: a catalog service whose connection never flips on its own.

use std::sync::Arc;

use crud_sim::catalog::{self, CatalogService, RefreshmentPoint};
use crud_sim::{FixedSource, RecordService, SimulatedConnection};

pub fn connection() -> Arc<SimulatedConnection> {
    Arc::new(
        SimulatedConnection::new(1.0)
            .with_source(FixedSource(true))
            .with_message("Connection to ETOUR server interrupted"),
    )
}

/// Catalog service seeded with RP001 to RP003.
pub fn service() -> CatalogService {
    let store = catalog::sample_store(catalog::id_strategy()).unwrap();
    RecordService::new(store)
        .with_validator(catalog::validator())
        .with_connection(connection())
}

pub fn ids(points: &[RefreshmentPoint]) -> Vec<String> {
    let mut ids: Vec<String> = points.iter().filter_map(|p| p.id.clone()).collect();
    ids.sort();
    ids
}
