use crud_sim::{
    FixedSource, Phase, Pipeline, ServiceError, SimulatedConnection, ValidationResult,
};

use Phase::*;

#[test]
fn success_walks_every_phase() {
    let connection = SimulatedConnection::new(0.5).with_source(FixedSource(true));
    let invocation = Pipeline::new("lookup")
        .with_connection(Some(&connection))
        .run(ValidationResult::valid, || Ok(7));

    assert_eq!(invocation.operation(), "lookup");
    assert_eq!(
        invocation.phases(),
        &[Start, Validating, Validated, ConnectionCheck, Connected, Executing, Success]
    );
    assert_eq!(invocation.into_result(), Ok(7));
}

#[test]
fn validation_failure_stops_before_connection() {
    let connection = SimulatedConnection::new(0.5).with_source(FixedSource(true));
    let invocation = Pipeline::new("lookup")
        .with_connection(Some(&connection))
        .run(
            || ValidationResult::with_errors(["name is required"]),
            || -> Result<(), ServiceError> { panic!("must not execute") },
        );

    assert_eq!(invocation.phases(), &[Start, Validating, ValidationFailed]);
    assert_eq!(invocation.terminal(), ValidationFailed);
    assert!(invocation.terminal().is_terminal());
}

#[test]
fn connection_failure_skips_execution() {
    let connection = SimulatedConnection::new(0.5)
        .with_source(FixedSource(false))
        .with_message("server unreachable");
    let invocation = Pipeline::new("lookup")
        .with_connection(Some(&connection))
        .run(ValidationResult::valid, || -> Result<(), ServiceError> {
            panic!("must not execute")
        });

    assert_eq!(
        invocation.phases(),
        &[Start, Validating, Validated, ConnectionCheck, ConnectionFailed]
    );
    assert_eq!(
        invocation.result(),
        &Err(ServiceError::Connection("server unreachable".into()))
    );
}

#[test]
fn execution_error_is_carried_through() {
    let invocation = Pipeline::new("lookup").run(ValidationResult::valid, || -> Result<(), _> {
        Err(ServiceError::Execution("disk full".into()))
    });

    assert_eq!(invocation.terminal(), ExecutionFailed);
    assert_eq!(
        invocation.into_result(),
        Err(ServiceError::Execution("disk full".into()))
    );
}

#[test]
fn phase_names() {
    assert_eq!(ConnectionFailed.to_string(), "CONNECTION_FAILED");
    assert_eq!(Validated.as_str(), "VALIDATED");
    assert!(!Executing.is_terminal());
}

#[test]
fn store_outage_ends_as_connection_failure() {
    use std::sync::Arc;

    use crud_sim::catalog::{self, RefreshmentPoint};
    use crud_sim::{GuardedStore, Store};

    let connection = SimulatedConnection::new(0.5)
        .with_source(FixedSource(false))
        .with_message("Connection to ETOUR server interrupted");
    let store = GuardedStore::new(
        catalog::sample_store(catalog::id_strategy()).unwrap(),
        Arc::new(connection),
    );

    let invocation = Pipeline::new("delete").run(ValidationResult::valid, || {
        Ok(Store::<RefreshmentPoint>::delete(&store, "RP001")?)
    });

    assert_eq!(invocation.terminal(), ConnectionFailed);
    assert_eq!(
        invocation.into_result(),
        Err(ServiceError::Connection(
            "Connection to ETOUR server interrupted".into()
        ))
    );
    assert_eq!(store.inner().count().unwrap(), 3);
}
