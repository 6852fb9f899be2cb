use crud_sim::catalog::{self, RefreshmentPoint};
use crud_sim::{ErrorKind, ServiceError, SimulationConfig, Store};

use crate::support::service;

#[test]
fn forced_outage_fails_every_operation_and_changes_nothing() {
    let service = service();
    let connection = service.connection().unwrap().clone();
    connection.force_available(false);

    let expected = ServiceError::Connection("Connection to ETOUR server interrupted".into());
    assert_eq!(service.delete("RP001").unwrap_err(), expected);
    assert_eq!(service.search("").unwrap_err(), expected);
    assert_eq!(
        service
            .create(RefreshmentPoint::new("Mountain Cafe", "Trail", 20))
            .unwrap_err()
            .kind(),
        ErrorKind::Connection
    );

    connection.clear_forced();
    assert_eq!(service.store().count().unwrap(), 3);
    assert!(service.get("RP001").unwrap().is_some());
}

#[test]
fn validation_runs_before_connection_check() {
    let service = service();
    service.connection().unwrap().force_available(false);

    let err = service.create(RefreshmentPoint::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn guarded_store_reports_connection_errors() {
    let config = SimulationConfig {
        success_probability: 0.0,
        ..SimulationConfig::default()
    };
    let service = catalog::guarded_service(&config).unwrap_or_else(|e| panic!("{e}"));

    let err = service.delete("RP001").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connection);
    assert_eq!(service.store().inner().count().unwrap(), 3);
}

#[test]
fn same_seed_same_outages() {
    let config = SimulationConfig {
        success_probability: 0.5,
        seed: Some(2024),
        ..SimulationConfig::default()
    };

    let outcomes = || {
        let service = catalog::service(&config).unwrap_or_else(|e| panic!("{e}"));
        (0..20)
            .map(|_| service.search("").is_ok())
            .collect::<Vec<bool>>()
    };

    let first = outcomes();
    assert_eq!(first, outcomes());
    assert!(first.contains(&true));
    assert!(first.contains(&false));
}

#[test]
fn always_available_config_never_fails() {
    let config = SimulationConfig {
        success_probability: 1.0,
        ..SimulationConfig::default()
    };
    let service = catalog::service(&config).unwrap_or_else(|e| panic!("{e}"));
    for _ in 0..50 {
        assert!(service.search("bar").is_ok());
    }
}

#[test]
fn guarded_store_outage_is_not_an_execution_failure() {
    let config = SimulationConfig {
        success_probability: 0.0,
        connection_message: "Connection to ETOUR server interrupted".into(),
        ..SimulationConfig::default()
    };
    let service = catalog::guarded_service(&config).unwrap_or_else(|e| panic!("{e}"));

    let err = service.search("bar").unwrap_err();
    assert_eq!(
        err,
        ServiceError::Connection("Connection to ETOUR server interrupted".into())
    );
}
