//! Shared fixtures: a CRUD controller over the sample catalog.

use std::sync::Arc;

use crud_sim::catalog::{self, CatalogStore, RefreshmentPoint};
use crud_sim::{Controller, FixedSource, RecordService, SimulatedConnection};

pub fn controller() -> Arc<Controller<RefreshmentPoint, CatalogStore>> {
    let connection = SimulatedConnection::new(1.0)
        .with_source(FixedSource(true))
        .with_message("Connection to ETOUR server interrupted");
    let service = RecordService::new(catalog::sample_store(catalog::id_strategy()).unwrap())
        .with_validator(catalog::validator())
        .with_connection(Arc::new(connection));
    Arc::new(Controller::crud(Arc::new(service)))
}

pub fn cmd(name: &str) -> String {
    format!("{}.{}", catalog::COLLECTION, name)
}
